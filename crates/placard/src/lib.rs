//! # Placard
//!
//! Facade over [`placard_render`] plus the welcome-page demo.
//!
//! The [`demo`] module shows the whole life of a render: build the
//! configuration once, build a data model, look the template up by name, and
//! process it into a writer.
//!
//! ```rust
//! use placard::demo;
//!
//! let mut page = Vec::new();
//! demo::run(&mut page).unwrap();
//! let page = String::from_utf8(page).unwrap();
//! assert!(page.contains("<h1>Welcome Big Joe!</h1>"));
//! ```

pub mod demo;

pub use placard_render::*;

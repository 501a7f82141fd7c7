//! lsdeps - list the dependencies declared in a package.json
//!
//! This crate loads an npm manifest, selects dependency categories with an
//! [`config::InclusionMask`] and prints the dependency names sorted by name.

pub mod config;
pub mod lister;
pub mod logging;
pub mod parser;
pub mod render;

// xltemplates - core/mod.rs
//
// Core business logic layer.
// Dependencies: standard library, walkdir for directory listing.
// Must NOT depend on: ui, platform, app.

pub mod mime;
pub mod model;
pub mod scan;

// xltemplates - app/mod.rs
//
// Application layer: render-cycle orchestration, downloads, launcher.
// Dependencies: core, platform.
// Must NOT depend on: ui.

pub mod download;
pub mod launcher;
pub mod page;

// xltemplates - lib.rs
//
// Library entry point, exposing every layer for the two binaries and for
// integration testing.

pub mod app;
pub mod core;
pub mod platform;
pub mod ui;
pub mod util;

// xltemplates - ui/mod.rs
//
// UI layer: HTML views and the HTTP routes that serve them.
// Dependencies: app (page, download), core (read-only models), actix-web, askama.
// Platform access is limited to opening the browser at startup.

pub mod server;
pub mod view;

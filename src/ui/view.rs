// xltemplates - ui/view.rs
//
// Askama view models. Templates live in `templates/` at the crate root and
// are compiled into the binary; `.html` templates are HTML-escaped.

use crate::app::page::PageView;
use crate::util::error::ServerError;
use askama::Template;

/// Askama view model for the template listing page.
#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate<'a> {
    page: &'a PageView,
}

/// Render `page` to HTML.
///
/// # Errors
/// Returns `ServerError::Render` if Askama rendering fails.
pub fn render_page(page: &PageView) -> Result<String, ServerError> {
    IndexTemplate { page }
        .render()
        .map_err(|source| ServerError::Render { source })
}

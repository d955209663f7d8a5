// xltemplates - ui/server.rs
//
// HTTP surface built on actix-web:
//   GET /               listing page (one render cycle per request)
//   GET /download       one template as an attachment
//   GET /api/templates  the sorted listing as JSON
//   GET /healthz        liveness check
//
// Handlers hold no state between requests beyond the immutable
// `ServerState`; every request rescans the template root.

use crate::app::download::open_for_download;
use crate::app::page::{self, PageConfig, PageView};
use crate::core::model::Category;
use crate::platform::fs::open_in_browser;
use crate::ui::view;
use crate::util::constants;
use crate::util::error::{DownloadError, ServerError};
use actix_web::http::header::{
    Charset, ContentDisposition, DispositionParam, DispositionType, ExtendedValue,
};
use actix_web::{web, App, HttpResponse, HttpServer};
use serde::Deserialize;
use std::path::PathBuf;

/// Immutable per-server state shared with every handler.
#[derive(Debug, Clone)]
pub struct ServerState {
    /// Template root directory.
    pub root: PathBuf,
    /// Page presentation settings.
    pub page: PageConfig,
}

/// Everything needed to start the server.
#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub address: String,
    pub port: u16,
    pub root: PathBuf,
    /// Skip opening the UI in a browser after binding.
    pub headless: bool,
    pub page: PageConfig,
}

/// Register all routes on an actix `App`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(index))
        .route("/download", web::get().to(download))
        .route("/api/templates", web::get().to(api_templates))
        .route("/healthz", web::get().to(healthz));
}

/// Bind and run the server until it is stopped.
///
/// # Errors
/// `ServerError::Bind` if the address cannot be bound, `ServerError::Run`
/// if the server stops with an I/O error.
pub async fn serve(settings: ServerSettings) -> Result<(), ServerError> {
    let bind_addr = format!("{}:{}", settings.address, settings.port);
    let state = web::Data::new(ServerState {
        root: settings.root.clone(),
        page: settings.page.clone(),
    });

    let server = HttpServer::new(move || App::new().app_data(state.clone()).configure(configure))
        .workers(constants::SERVER_WORKERS)
        .bind((settings.address.as_str(), settings.port))
        .map_err(|source| ServerError::Bind {
            addr: bind_addr.clone(),
            source,
        })?;

    tracing::info!(
        addr = %bind_addr,
        root = %settings.root.display(),
        headless = settings.headless,
        "Template server listening"
    );

    if !settings.headless {
        open_in_browser(&browse_url(&settings.address, settings.port));
    }

    server
        .run()
        .await
        .map_err(|source| ServerError::Run {
            addr: bind_addr,
            source,
        })
}

/// URL a local browser should open for a server bound to `address`.
/// Wildcard binds are reached through localhost.
pub fn browse_url(address: &str, port: u16) -> String {
    let host = match address {
        "0.0.0.0" | "::" | "[::]" => "localhost",
        other => other,
    };
    format!("http://{host}:{port}/")
}

async fn index(state: web::Data<ServerState>) -> HttpResponse {
    let (status_ok, page) = match page::build_page(&state.page, &state.root) {
        Ok(page) => (true, page),
        Err(e) => {
            tracing::error!(root = %state.root.display(), error = %e, "Render cycle halted");
            (false, PageView::failed(&state.page, e.to_string()))
        }
    };

    match view::render_page(&page) {
        Ok(html) => {
            let mut response = if status_ok {
                HttpResponse::Ok()
            } else {
                HttpResponse::InternalServerError()
            };
            response.content_type("text/html; charset=utf-8").body(html)
        }
        Err(e) => {
            tracing::error!(error = %e, "Page rendering failed");
            HttpResponse::InternalServerError().body(e.to_string())
        }
    }
}

/// Query parameters of `/download`. A missing `category` means the root.
#[derive(Debug, Deserialize)]
struct DownloadQuery {
    category: Option<String>,
    file: String,
}

async fn download(
    state: web::Data<ServerState>,
    query: web::Query<DownloadQuery>,
) -> HttpResponse {
    let category = Category::from_dir_name(query.category.as_deref());
    let result = open_for_download(&state.root, &category, &query.file)
        .and_then(|download| download.read_all());

    match result {
        Ok(file) => {
            tracing::info!(
                category = %category,
                file = %file.file_name,
                bytes = file.bytes.len(),
                "Serving template"
            );
            HttpResponse::Ok()
                .content_type(file.mime)
                .insert_header(attachment(&file.file_name))
                .body(file.bytes)
        }
        Err(e) => {
            tracing::warn!(category = %category, file = %query.file, error = %e, "Download failed");
            let mut response = match e {
                DownloadError::InvalidName { .. } => HttpResponse::BadRequest(),
                DownloadError::NotFound { .. } => HttpResponse::NotFound(),
                DownloadError::Io { .. } => HttpResponse::InternalServerError(),
            };
            response
                .content_type("text/plain; charset=utf-8")
                .body(format!("Error: {e}."))
        }
    }
}

/// `Content-Disposition: attachment` naming `file_name`.
///
/// Non-ASCII names get an RFC 6266 `filename*` parameter with the exact
/// UTF-8 name, and an ASCII `filename` fallback for older clients.
pub fn attachment(file_name: &str) -> ContentDisposition {
    let mut parameters = vec![DispositionParam::Filename(ascii_fallback(file_name))];
    if !file_name.is_ascii() {
        parameters.push(DispositionParam::FilenameExt(ExtendedValue {
            charset: Charset::Ext("UTF-8".to_string()),
            language_tag: None,
            value: file_name.as_bytes().to_vec(),
        }));
    }
    ContentDisposition {
        disposition: DispositionType::Attachment,
        parameters,
    }
}

fn ascii_fallback(file_name: &str) -> String {
    file_name
        .chars()
        .map(|c| if c.is_ascii() { c } else { '_' })
        .collect()
}

async fn api_templates(state: web::Data<ServerState>) -> HttpResponse {
    match page::scan_root(&state.root) {
        Ok(scan) => HttpResponse::Ok().json(page::listing(&scan)),
        Err(e) => {
            tracing::error!(root = %state.root.display(), error = %e, "Listing halted");
            HttpResponse::InternalServerError()
                .content_type("text/plain; charset=utf-8")
                .body(e.to_string())
        }
    }
}

async fn healthz() -> HttpResponse {
    HttpResponse::Ok().content_type("text/plain").body("ok")
}

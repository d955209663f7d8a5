// xltemplates - tests/e2e_server.rs
//
// End-to-end tests for the HTTP routes: real template trees on disk served
// through the real actix-web service, exercised with actix's test client.

use actix_web::http::{header, StatusCode};
use actix_web::{test, web, App};
use std::fs;
use std::path::{Path, PathBuf};
use xltemplates::app::page::PageConfig;
use xltemplates::ui::server::{configure, ServerState};

fn state(root: &Path) -> web::Data<ServerState> {
    web::Data::new(ServerState {
        root: root.to_path_buf(),
        page: PageConfig::default(),
    })
}

fn reference_tree(root: &Path) {
    fs::write(root.join("x.xlsx"), b"root workbook").unwrap();
    let sales = root.join("Sales");
    fs::create_dir(&sales).unwrap();
    fs::write(sales.join("y.xls"), b"sales workbook").unwrap();
    fs::write(sales.join("z.txt"), b"not a template").unwrap();
    fs::create_dir(root.join("Empty")).unwrap();
}

macro_rules! get {
    ($app:expr, $uri:expr) => {
        test::call_service(&$app, test::TestRequest::get().uri($uri).to_request()).await
    };
}

#[actix_web::test]
async fn e2e_index_lists_categories_in_order() {
    let dir = tempfile::tempdir().unwrap();
    reference_tree(dir.path());
    let app = test::init_service(App::new().app_data(state(dir.path())).configure(configure)).await;

    let resp = get!(app, "/");
    assert_eq!(resp.status(), StatusCode::OK);
    let html = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();

    assert!(html.contains("Excel Template Selector &amp; Downloader"));
    let root_pos = html.find("Files in Root Directory (1 file(s))").expect("root section");
    let sales_pos = html.find("Sales (1 file(s))").expect("sales section");
    assert!(root_pos < sales_pos, "root section must come first");
    assert!(html.contains("x.xlsx"));
    assert!(html.contains("y.xls"));
    assert!(!html.contains("z.txt"));
    assert!(!html.contains("Empty ("), "empty folder must not render a section");
}

#[actix_web::test]
async fn e2e_index_creates_missing_root() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("Excel_templates");
    let app = test::init_service(App::new().app_data(state(&root)).configure(configure)).await;

    let resp = get!(app, "/");
    assert_eq!(resp.status(), StatusCode::OK);
    let html = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(root.is_dir());
    assert!(html.contains("Please add your Excel files there."));
}

#[actix_web::test]
async fn e2e_index_halts_when_root_cannot_be_created() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("blocker");
    fs::write(&blocker, b"file").unwrap();
    let root: PathBuf = blocker.join("Excel_templates");
    let app = test::init_service(App::new().app_data(state(&root)).configure(configure)).await;

    let resp = get!(app, "/");
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let html = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(html.contains("Failed to create directory"));
    assert!(!html.contains("<details"));
}

#[actix_web::test]
async fn e2e_download_root_and_category_files() {
    let dir = tempfile::tempdir().unwrap();
    reference_tree(dir.path());
    let app = test::init_service(App::new().app_data(state(dir.path())).configure(configure)).await;

    let resp = get!(app, "/download?file=x.xlsx");
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
    );
    let disposition = resp
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.starts_with("attachment"), "got {disposition}");
    assert!(disposition.contains("x.xlsx"), "got {disposition}");
    assert_eq!(test::read_body(resp).await.as_ref(), b"root workbook");

    let resp = get!(app, "/download?category=Sales&file=y.xls");
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/vnd.ms-excel"
    );
    let disposition = resp.headers().get(header::CONTENT_DISPOSITION).unwrap();
    assert!(
        !disposition.to_str().unwrap().contains("Sales"),
        "downloaded name must not carry the folder"
    );
    assert_eq!(test::read_body(resp).await.as_ref(), b"sales workbook");
}

#[actix_web::test]
async fn e2e_download_non_ascii_name_keeps_exact_filename() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("Información técnica.xlsx"), b"ficha").unwrap();
    let app = test::init_service(App::new().app_data(state(dir.path())).configure(configure)).await;

    let resp = get!(app, "/download?file=Informaci%C3%B3n%20t%C3%A9cnica.xlsx");
    assert_eq!(resp.status(), StatusCode::OK);
    let disposition = resp
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .unwrap()
        .to_str()
        .expect("header is plain ASCII")
        .to_string();
    assert!(disposition.starts_with("attachment"), "got {disposition}");
    assert!(
        disposition.contains("filename*=UTF-8''Informaci%C3%B3n%20t%C3%A9cnica.xlsx"),
        "got {disposition}"
    );
    assert_eq!(test::read_body(resp).await.as_ref(), b"ficha");
}

#[actix_web::test]
async fn e2e_vanished_file_is_404_and_others_still_work() {
    let dir = tempfile::tempdir().unwrap();
    reference_tree(dir.path());
    let app = test::init_service(App::new().app_data(state(dir.path())).configure(configure)).await;

    // Render first, then delete: the race between listing and download.
    assert_eq!(get!(app, "/").status(), StatusCode::OK);
    fs::remove_file(dir.path().join("Sales").join("y.xls")).unwrap();

    let resp = get!(app, "/download?category=Sales&file=y.xls");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(body.contains("not found"), "got {body}");

    assert_eq!(get!(app, "/download?file=x.xlsx").status(), StatusCode::OK);
}

#[actix_web::test]
async fn e2e_download_rejects_path_traversal() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("templates");
    fs::create_dir(&root).unwrap();
    fs::write(dir.path().join("secret.xlsx"), b"outside").unwrap();
    let app = test::init_service(App::new().app_data(state(&root)).configure(configure)).await;

    for uri in [
        "/download?file=..%2Fsecret.xlsx",
        "/download?category=..&file=secret.xlsx",
        "/download?file=",
    ] {
        let resp = get!(app, uri);
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{uri}");
    }
}

#[actix_web::test]
async fn e2e_api_lists_sorted_categories() {
    let dir = tempfile::tempdir().unwrap();
    reference_tree(dir.path());
    fs::create_dir(dir.path().join("Admin")).unwrap();
    fs::write(dir.path().join("Admin").join("a.xlsx"), b"").unwrap();
    let app = test::init_service(App::new().app_data(state(dir.path())).configure(configure)).await;

    let resp = get!(app, "/api/templates");
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = serde_json::from_slice(&test::read_body(resp).await).unwrap();
    let categories: Vec<serde_json::Value> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["category"].clone())
        .collect();
    assert_eq!(
        categories,
        vec![
            serde_json::Value::Null,
            serde_json::json!("Admin"),
            serde_json::json!("Sales"),
        ]
    );
    assert_eq!(body[0]["label"], "Files in Root Directory");
    assert_eq!(body[2]["files"], serde_json::json!(["y.xls"]));
}

#[actix_web::test]
async fn e2e_healthz() {
    let dir = tempfile::tempdir().unwrap();
    let app = test::init_service(App::new().app_data(state(dir.path())).configure(configure)).await;
    let resp = get!(app, "/healthz");
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(test::read_body(resp).await.as_ref(), b"ok");
}

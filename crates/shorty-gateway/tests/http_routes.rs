use axum::body::{to_bytes, Body};
use axum::http::header::{CONTENT_TYPE, HOST, LOCATION};
use axum::http::{Request, StatusCode};
use axum::response::Response;
use axum::Router;
use shorty_core::{ShortCode, Shortener};
use shorty_gateway::model::{CreateUrlResponse, GetUrlResponse, ListUrlsResponse};
use shorty_gateway::{App, AppState};
use shorty_generator::{Generator, RandomGenerator};
use shorty_shortener::ShortenerService;
use shorty_storage::{InMemoryRepository, SqliteRepository};
use std::sync::Arc;
use tower::ServiceExt;

type MemoryService = ShortenerService<InMemoryRepository, RandomGenerator>;

fn setup() -> (Router, MemoryService) {
    let service = ShortenerService::new(InMemoryRepository::new(), RandomGenerator::default());
    let shortener: Arc<dyn Shortener> = Arc::new(service.clone());
    (App::router(AppState::new(shortener)), service)
}

async fn send(app: &Router, request: Request<Body>) -> Response {
    app.clone().oneshot(request).await.unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(HOST, "sho.rt")
        .body(Body::empty())
        .unwrap()
}

fn post_form(encoded_url: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/")
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(format!("url={encoded_url}")))
        .unwrap()
}

fn post_json(uri: &str, json: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(HOST, "sho.rt")
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(json.to_string()))
        .unwrap()
}

async fn body_string(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn health_reports_ok() {
    let (app, _) = setup();

    let response = send(&app, get("/health")).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, r#"{"status":"ok"}"#);
}

#[tokio::test]
async fn form_post_creates_mapping_and_redirects_home() {
    let (app, service) = setup();

    let request = Request::builder()
        .method("POST")
        .uri("/")
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from("url=https%3A%2F%2Fexample.com%2Fa"))
        .unwrap();
    let response = send(&app, request).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[LOCATION], "/");

    let all = service.list_all().await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].original_url, "https://example.com/a");
}

#[tokio::test]
async fn form_post_with_malformed_url_is_rejected() {
    let (app, service) = setup();

    let request = Request::builder()
        .method("POST")
        .uri("/")
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from("url=not+a+url"))
        .unwrap();
    let response = send(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(response.headers()[CONTENT_TYPE]
        .to_str()
        .unwrap()
        .starts_with("text/plain"));
    assert!(service.list_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn form_post_with_non_http_scheme_is_rejected() {
    let (app, service) = setup();

    let response = send(&app, post_form("javascript%3Aalert(1)")).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(service.list_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn index_lists_links_against_request_host() {
    let (app, service) = setup();
    let code = service
        .create("http://example.com/a".to_string())
        .await
        .unwrap();

    let response = send(&app, get("/")).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains(&format!("href=\"/{code}\"")));
    assert!(body.contains(&format!("http://sho.rt/{code}")));
    assert!(body.contains("http://example.com/a"));
    assert!(!body.contains(">Previous</a>"));
    assert!(!body.contains(">Next</a>"));
}

#[tokio::test]
async fn index_links_follow_forwarded_proto() {
    let (app, service) = setup();
    let code = service
        .create("http://example.com/a".to_string())
        .await
        .unwrap();

    let request = Request::builder()
        .uri("/")
        .header(HOST, "sho.rt")
        .header("x-forwarded-proto", "https")
        .body(Body::empty())
        .unwrap();
    let body = body_string(send(&app, request).await).await;

    assert!(body.contains(&format!("https://sho.rt/{code}")));
}

#[tokio::test]
async fn index_paginates_ten_per_page() {
    let (app, service) = setup();
    for i in 0..15 {
        service
            .create(format!("https://example.com/{i}"))
            .await
            .unwrap();
    }

    let first = body_string(send(&app, get("/")).await).await;
    assert!(first.contains("https://example.com/9<"));
    assert!(!first.contains("https://example.com/10<"));
    assert!(first.contains("href=\"?page=2\""));
    assert!(!first.contains(">Previous</a>"));

    let second = body_string(send(&app, get("/?page=2")).await).await;
    assert!(second.contains("https://example.com/14<"));
    assert!(!second.contains("https://example.com/9<"));
    assert!(second.contains("href=\"?page=1\""));
    assert!(!second.contains(">Next</a>"));
}

#[tokio::test]
async fn index_page_beyond_data_is_empty_with_previous_link() {
    let (app, service) = setup();
    service
        .create("https://example.com/only".to_string())
        .await
        .unwrap();

    let response = send(&app, get("/?page=5")).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(!body.contains("https://example.com/only"));
    assert!(body.contains("href=\"?page=4\""));
}

#[tokio::test]
async fn index_rejects_page_zero() {
    let (app, _) = setup();

    let response = send(&app, get("/?page=0")).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn stored_urls_are_html_escaped() {
    let (app, service) = setup();
    service
        .create("https://example.com/?q=<script>alert(1)</script>".to_string())
        .await
        .unwrap();

    let body = body_string(send(&app, get("/list")).await).await;

    assert!(!body.contains("<script>"));
}

#[tokio::test]
async fn short_code_redirects_to_original_url() {
    let (app, service) = setup();
    let code = service
        .create("https://example.com/target".to_string())
        .await
        .unwrap();

    let response = send(&app, get(&format!("/{code}"))).await;

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(response.headers()[LOCATION], "https://example.com/target");
}

#[tokio::test]
async fn non_ascii_target_is_percent_encoded_in_location() {
    let (app, service) = setup();
    let code = service
        .create("https://caf\u{e9}.example/men\u{fc}".to_string())
        .await
        .unwrap();

    let response = send(&app, get(&format!("/{code}"))).await;

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(
        response.headers()[LOCATION],
        "https://xn--caf-dma.example/men%C3%BC"
    );
}

#[tokio::test]
async fn unknown_short_code_is_not_found() {
    let (app, _) = setup();

    let response = send(&app, get("/doesnotexist")).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_string(response).await, "Shortcode not found");
}

#[tokio::test]
async fn malformed_short_code_is_not_found() {
    let (app, _) = setup();

    let response = send(&app, get("/favicon.ico")).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn list_page_shows_every_link_in_creation_order() {
    let (app, service) = setup();
    for i in 0..12 {
        service
            .create(format!("https://example.com/{i}"))
            .await
            .unwrap();
    }

    let body = body_string(send(&app, get("/list")).await).await;

    let positions: Vec<_> = (0..12)
        .map(|i| body.find(&format!("https://example.com/{i}<")).unwrap())
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
    assert!(body.contains("href=\"/\""));
}

#[tokio::test]
async fn json_create_get_and_list() {
    let (app, _) = setup();

    let response = send(
        &app,
        post_json(
            "/v1/urls",
            serde_json::json!({ "original_url": "https://example.com/api" }),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created: CreateUrlResponse = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(created.short_code.len(), 6);
    assert_eq!(created.short_url, format!("http://sho.rt/{}", created.short_code));
    assert_eq!(created.original_url, "https://example.com/api");

    let response = send(&app, get(&format!("/v1/urls/{}", created.short_code))).await;
    assert_eq!(response.status(), StatusCode::OK);
    let got: GetUrlResponse = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(got.original_url, "https://example.com/api");

    let response = send(&app, get("/v1/urls?page=1&per_page=5")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let listed: ListUrlsResponse = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(listed.total, 1);
    assert_eq!(listed.per_page, 5);
    assert_eq!(listed.items[0].short_code, created.short_code);
    assert!(!listed.has_next);
    assert_eq!(listed.next_page, None);
}

#[tokio::test]
async fn json_list_reports_cursors() {
    let (app, service) = setup();
    for i in 0..25 {
        service
            .create(format!("https://example.com/{i}"))
            .await
            .unwrap();
    }

    let response = send(&app, get("/v1/urls?page=3")).await;
    let listed: ListUrlsResponse = serde_json::from_str(&body_string(response).await).unwrap();

    assert_eq!(listed.items.len(), 5);
    assert!(listed.has_prev);
    assert!(!listed.has_next);
    assert_eq!(listed.prev_page, Some(2));
    assert_eq!(listed.next_page, None);
}

#[tokio::test]
async fn json_get_unknown_code_is_not_found() {
    let (app, _) = setup();

    let response = send(&app, get("/v1/urls/doesnotexist")).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn json_create_rejects_malformed_url() {
    let (app, _) = setup();

    let response = send(
        &app,
        post_json("/v1/urls", serde_json::json!({ "original_url": "" })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

struct ConstantGenerator;

impl Generator for ConstantGenerator {
    type Output = ShortCode;

    fn generate(&self) -> ShortCode {
        ShortCode::new_unchecked("fixed1")
    }
}

#[tokio::test]
async fn sqlite_collision_is_a_conflict() {
    let dir = tempfile::tempdir().unwrap();
    let repository = SqliteRepository::connect(dir.path().join("urls.db"))
        .await
        .unwrap();
    let shortener: Arc<dyn Shortener> =
        Arc::new(ShortenerService::new(repository, ConstantGenerator));
    let app = App::router(AppState::new(shortener).with_base_url("https://sho.rt/"));

    let first = send(
        &app,
        post_json("/v1/urls", serde_json::json!({ "original_url": "https://one.example" })),
    )
    .await;
    assert_eq!(first.status(), StatusCode::CREATED);
    let created: CreateUrlResponse = serde_json::from_str(&body_string(first).await).unwrap();
    assert_eq!(created.short_url, "https://sho.rt/fixed1");

    let second = send(
        &app,
        post_json("/v1/urls", serde_json::json!({ "original_url": "https://two.example" })),
    )
    .await;
    assert_eq!(second.status(), StatusCode::CONFLICT);

    let response = send(&app, get("/fixed1")).await;
    assert_eq!(response.headers()[LOCATION], "https://one.example");
}

#[tokio::test]
async fn sqlite_collision_on_form_route_is_a_server_error_page() {
    let dir = tempfile::tempdir().unwrap();
    let repository = SqliteRepository::connect(dir.path().join("urls.db"))
        .await
        .unwrap();
    let shortener: Arc<dyn Shortener> =
        Arc::new(ShortenerService::new(repository, ConstantGenerator));
    let app = App::router(AppState::new(shortener));

    let first = send(&app, post_form("https%3A%2F%2Fone.example")).await;
    assert_eq!(first.status(), StatusCode::SEE_OTHER);
    assert_eq!(first.headers()[LOCATION], "/");

    let second = send(&app, post_form("https%3A%2F%2Ftwo.example")).await;
    assert_eq!(second.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(second.headers()[CONTENT_TYPE]
        .to_str()
        .unwrap()
        .starts_with("text/plain"));
    assert_eq!(body_string(second).await, "Internal Server Error");

    let response = send(&app, get("/fixed1")).await;
    assert_eq!(response.headers()[LOCATION], "https://one.example");
}

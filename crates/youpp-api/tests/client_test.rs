#![allow(clippy::unwrap_used)]
// Integration tests for `ApiClient` and `PublicClient` using wiremock.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use pretty_assertions::assert_eq;
use reqwest::header::{CONTENT_TYPE, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

use youpp_api::{
    ApiClient, Error, MemoryTokenStore, PublicClient, REFRESH_TOKEN_KEY, RequestOptions,
    TokenStore,
};

// ── Helpers ─────────────────────────────────────────────────────────

struct Harness {
    server: MockServer,
    client: ApiClient,
    tokens: Arc<MemoryTokenStore>,
    expired: Arc<AtomicUsize>,
}

async fn setup_with_store(tokens: MemoryTokenStore) -> Harness {
    let server = MockServer::start().await;
    let tokens = Arc::new(tokens);
    let expired = Arc::new(AtomicUsize::new(0));

    let counter = Arc::clone(&expired);
    let client = ApiClient::from_reqwest(
        Some(&server.uri()),
        reqwest::Client::new(),
        Arc::clone(&tokens) as Arc<dyn TokenStore>,
    )
    .unwrap()
    .with_session_hook(Arc::new(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    }));

    Harness {
        server,
        client,
        tokens,
        expired,
    }
}

async fn setup() -> Harness {
    setup_with_store(MemoryTokenStore::with_access_token("tok-123")).await
}

fn no_authorization(req: &Request) -> bool {
    !req.headers.contains_key("authorization")
}

// ── Header handling ─────────────────────────────────────────────────

#[tokio::test]
async fn test_bearer_token_attached() {
    let h = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/sites"))
        .and(header("authorization", "Bearer tok-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&h.server)
        .await;

    let sites = h.client.list_sites().await.unwrap();
    assert!(sites.is_empty());
}

#[tokio::test]
async fn test_authorization_omitted_without_token() {
    let h = setup_with_store(MemoryTokenStore::new()).await;

    Mock::given(method("GET"))
        .and(path("/api/sites"))
        .and(no_authorization)
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&h.server)
        .await;

    h.client.list_sites().await.unwrap();
}

#[tokio::test]
async fn test_json_content_type_defaulted_for_body() {
    let h = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/echo"))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .expect(1)
        .mount(&h.server)
        .await;

    let out: Option<serde_json::Value> = h
        .client
        .request("/api/echo", RequestOptions::post().body("{}"))
        .await
        .unwrap();
    assert_eq!(out, Some(json!({ "ok": true })));
}

#[tokio::test]
async fn test_explicit_content_type_preserved() {
    let h = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/echo"))
        .and(header("content-type", "text/plain"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&h.server)
        .await;

    h.client
        .request_empty(
            "/api/echo",
            RequestOptions::post()
                .header(CONTENT_TYPE, HeaderValue::from_static("text/plain"))
                .body("hello"),
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn test_no_content_type_without_body() {
    let h = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/sites/s1/publish"))
        .and(|req: &Request| !req.headers.contains_key("content-type"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&h.server)
        .await;

    h.client.publish_site("s1").await.unwrap();
}

#[tokio::test]
async fn test_trailing_slash_in_base_url_stripped() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/sites"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let base = format!("{}//", server.uri());
    let client = ApiClient::from_reqwest(
        Some(&base),
        reqwest::Client::new(),
        Arc::new(MemoryTokenStore::new()),
    )
    .unwrap();
    assert_eq!(client.base_url(), server.uri());
    client.list_sites().await.unwrap();
}

// ── Status handling ─────────────────────────────────────────────────

#[tokio::test]
async fn test_unauthorized_clears_tokens_and_fires_hook_once() {
    let h = setup().await;
    h.tokens
        .set(REFRESH_TOKEN_KEY, &SecretString::from("refresh".to_owned()))
        .unwrap();

    Mock::given(method("GET"))
        .and(path("/api/sites"))
        .respond_with(ResponseTemplate::new(401).set_body_string("token expired, please log in"))
        .expect(1)
        .mount(&h.server)
        .await;

    let err = h.client.list_sites().await.unwrap_err();

    assert!(matches!(err, Error::Unauthorized), "got: {err:?}");
    assert_eq!(err.to_string(), "Unauthorized");
    assert!(h.tokens.access_token().is_none());
    assert!(h.tokens.get(REFRESH_TOKEN_KEY).is_none());
    assert_eq!(h.expired.load(Ordering::SeqCst), 1);
    assert!(!h.client.has_session());
}

#[tokio::test]
async fn test_error_message_is_response_body() {
    let h = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/sites"))
        .respond_with(ResponseTemplate::new(409).set_body_string("Slug already in use"))
        .mount(&h.server)
        .await;

    let err = h.client.create_site("Acme", "acme").await.unwrap_err();

    assert!(
        matches!(err, Error::RequestFailed { status: 409, .. }),
        "got: {err:?}"
    );
    assert_eq!(err.to_string(), "Slug already in use");
    // Not an auth failure: tokens stay put.
    assert!(h.tokens.access_token().is_some());
    assert_eq!(h.expired.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_error_message_falls_back_to_status() {
    let h = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/sites"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&h.server)
        .await;

    let err = h.client.list_sites().await.unwrap_err();
    assert_eq!(err.to_string(), "Request failed with 500");
}

#[tokio::test]
async fn test_no_content_skips_json_parsing() {
    let h = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/thing"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&h.server)
        .await;

    #[derive(Debug, serde::Deserialize)]
    #[allow(dead_code)]
    struct Thing {
        id: String,
    }

    let out: Option<Thing> = h
        .client
        .request("/api/thing", RequestOptions::get())
        .await
        .unwrap();
    assert!(out.is_none());
}

#[tokio::test]
async fn test_invalid_json_is_deserialization_error() {
    let h = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/sites"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&h.server)
        .await;

    let err = h.client.list_sites().await.unwrap_err();
    match err {
        Error::Deserialization { body, .. } => assert_eq!(body, "<html>oops</html>"),
        other => panic!("expected Deserialization, got: {other:?}"),
    }
}

// ── Endpoints ───────────────────────────────────────────────────────

#[tokio::test]
async fn test_login_stores_tokens() {
    let h = setup_with_store(MemoryTokenStore::new()).await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_json(json!({ "email": "ada@example.com", "password": "hunter2" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "accessToken": "acc",
            "refreshToken": "ref"
        })))
        .expect(1)
        .mount(&h.server)
        .await;

    let pair = h
        .client
        .login("ada@example.com", &SecretString::from("hunter2".to_owned()))
        .await
        .unwrap();

    assert_eq!(pair.access_token.expose_secret(), "acc");
    assert_eq!(
        h.tokens.access_token().unwrap().expose_secret(),
        "acc"
    );
    assert_eq!(
        h.tokens.get(REFRESH_TOKEN_KEY).unwrap().expose_secret(),
        "ref"
    );

    h.client.logout().unwrap();
    assert!(h.tokens.access_token().is_none());
}

#[tokio::test]
async fn test_list_sites_preserves_order_and_optional_fields() {
    let h = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/sites"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "id": "s1",
                "name": "Acme",
                "slug": "acme",
                "status": "published",
                "content": { "sections": [{ "type": "hero", "data": { "title": "Hi" } }] }
            },
            { "id": "s2", "name": "Beta", "slug": "beta" }
        ])))
        .mount(&h.server)
        .await;

    let sites = h.client.list_sites().await.unwrap();

    assert_eq!(sites.len(), 2);
    assert_eq!(sites[0].id, "s1");
    assert_eq!(sites[0].status.as_deref(), Some("published"));
    let sections = sites[0]
        .content
        .as_ref()
        .and_then(|c| c.sections.as_ref())
        .unwrap();
    assert_eq!(sections.len(), 1);
    assert_eq!(sites[1].slug, "beta");
    assert!(sites[1].status.is_none());
    assert!(sites[1].content.is_none());
}

#[tokio::test]
async fn test_create_site_posts_name_and_slug() {
    let h = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/sites"))
        .and(body_json(json!({ "name": "My Studio", "slug": "my-studio" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "new-id",
            "name": "My Studio",
            "slug": "my-studio",
            "status": "draft"
        })))
        .expect(1)
        .mount(&h.server)
        .await;

    let site = h.client.create_site("My Studio", "my-studio").await.unwrap();
    assert_eq!(site.id, "new-id");
    assert_eq!(site.status.as_deref(), Some("draft"));
}

#[tokio::test]
async fn test_save_content_wraps_sections() {
    let h = setup().await;

    let sections = vec![
        json!({ "type": "hero", "data": { "title": "Hi" } }),
        json!({ "type": "cta", "data": { "title": "Go" } }),
    ];

    Mock::given(method("PUT"))
        .and(path("/api/sites/s1/content"))
        .and(body_json(json!({ "content": { "sections": sections } })))
        .respond_with(ResponseTemplate::new(200).set_body_string(""))
        .expect(1)
        .mount(&h.server)
        .await;

    h.client.save_content("s1", &sections).await.unwrap();
}

#[tokio::test]
async fn test_publish_and_unpublish() {
    let h = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/sites/s1/publish"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&h.server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/sites/s1/unpublish"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "draft" })))
        .expect(1)
        .mount(&h.server)
        .await;

    h.client.publish_site("s1").await.unwrap();
    h.client.unpublish_site("s1").await.unwrap();
}

// ── Public client ───────────────────────────────────────────────────

#[tokio::test]
async fn test_public_fetch_is_uncached() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/s/acme"))
        .and(header("cache-control", "no-store"))
        .and(no_authorization)
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "slug": "acme",
            "updated": "2026-10-01T12:00:00Z",
            "published": true,
            "content": { "sections": [] }
        })))
        .expect(2)
        .mount(&server)
        .await;

    let client = PublicClient::from_reqwest(Some(&server.uri()), reqwest::Client::new()).unwrap();

    let first = client.fetch_site("acme").await.unwrap().unwrap();
    let second = client.fetch_site("acme").await.unwrap().unwrap();
    assert_eq!(first, second);
    assert_eq!(first.published, Some(true));
}

#[tokio::test]
async fn test_public_fetch_not_found_is_none() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/s/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
        .mount(&server)
        .await;

    let client = PublicClient::from_reqwest(Some(&server.uri()), reqwest::Client::new()).unwrap();
    assert!(client.fetch_site("missing").await.unwrap().is_none());
}

#[tokio::test]
async fn test_public_fetch_encodes_slug() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/s/a%2Fb"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "slug": "a/b",
            "updated": "2026-10-01T12:00:00Z"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = PublicClient::from_reqwest(Some(&server.uri()), reqwest::Client::new()).unwrap();
    let site = client.fetch_site("a/b").await.unwrap().unwrap();
    assert_eq!(site.slug, "a/b");
    assert!(site.published.is_none());
}

#[test]
fn test_public_client_requires_base_url() {
    let result = PublicClient::from_reqwest(Some(""), reqwest::Client::new());
    assert!(matches!(result, Err(Error::MissingBaseUrl { .. })));
}

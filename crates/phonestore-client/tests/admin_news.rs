//! Integration tests for the admin news endpoints and `NewsManager`.

use std::time::Duration;

use phonestore_client::{ClientError, NewsManager, StorefrontClient};
use phonestore_core::{CoreError, NewsDraft, Session, Severity};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(server: &MockServer) -> StorefrontClient {
    StorefrontClient::with_base_url(&format!("{}/api", server.uri()), 5, "phonestore-test/0.1")
        .expect("failed to build test StorefrontClient")
}

fn admin() -> Session {
    Session::anonymous().with_admin("admin-token")
}

fn news_json(id: &str, title: &str) -> serde_json::Value {
    json!({
        "_id": id,
        "title": title,
        "sub_title": "Limited time",
        "link": "/promotions/sale",
        "image": "/uploads/news/sale.png",
        "createdAt": "2024-02-01T08:00:00Z"
    })
}

fn draft() -> NewsDraft {
    NewsDraft {
        title: " Summer sale ".to_string(),
        subtitle: "Up to 20% off".to_string(),
        link: "/promotions/summer".to_string(),
        ..NewsDraft::default()
    }
}

// ---------------------------------------------------------------------------
// StorefrontClient admin news endpoints
// ---------------------------------------------------------------------------

#[tokio::test]
async fn list_news_accepts_bare_array() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/admin/news"))
        .and(header("authorization", "Bearer admin-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            news_json("n1", "Tet sale"),
            news_json("n2", "New Galaxy")
        ])))
        .mount(&server)
        .await;

    let items = test_client(&server).list_news(&admin()).await.unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].id, "n1");
    assert_eq!(items[0].subtitle, "Limited time");
}

#[tokio::test]
async fn list_news_accepts_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/admin/news"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": [news_json("n1", "Tet sale")]
        })))
        .mount(&server)
        .await;

    let items = test_client(&server).list_news(&admin()).await.unwrap();
    assert_eq!(items.len(), 1);
}

#[tokio::test]
async fn list_news_without_admin_token_is_rejected_locally() {
    let server = MockServer::start().await;
    let session = Session::anonymous().with_user("user-token", "u1");
    let err = test_client(&server).list_news(&session).await.unwrap_err();
    assert!(matches!(
        err,
        ClientError::Core(CoreError::NotLoggedIn { .. })
    ));
}

#[tokio::test]
async fn create_news_posts_trimmed_draft() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/admin/news"))
        .and(body_partial_json(json!({
            "title": "Summer sale",
            "sub_title": "Up to 20% off",
            "link": "/promotions/summer",
            "type": "promotion",
            "status": "true"
        })))
        .and(|req: &wiremock::Request| {
            serde_json::from_slice::<serde_json::Value>(&req.body)
                .is_ok_and(|body| body["start_date"].is_string())
        })
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&server)
        .await;

    test_client(&server)
        .save_news(&admin(), &draft())
        .await
        .expect("create should succeed");
}

#[tokio::test]
async fn save_with_id_updates_existing_item() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/admin/news/n7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&server)
        .await;

    let mut d = draft();
    d.id = Some("n7".to_string());
    test_client(&server)
        .save_news(&admin(), &d)
        .await
        .expect("update should succeed");
}

#[tokio::test]
async fn incomplete_draft_is_never_sent() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/admin/news"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let mut d = draft();
    d.link = "  ".to_string();
    let err = test_client(&server).save_news(&admin(), &d).await.unwrap_err();
    assert!(matches!(err, ClientError::Core(CoreError::MissingField("link"))));
}

#[tokio::test]
async fn upload_news_image_returns_stored_path() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/admin/news/upload"))
        .and(header("authorization", "Bearer admin-token"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "imagePath": "/uploads/news/a.png" })),
        )
        .mount(&server)
        .await;

    let stored = test_client(&server)
        .upload_news_image(&admin(), "a.png", vec![0x89, 0x50, 0x4e, 0x47])
        .await
        .unwrap();
    assert_eq!(stored, "/uploads/news/a.png");
}

// ---------------------------------------------------------------------------
// NewsManager
// ---------------------------------------------------------------------------

#[tokio::test]
async fn declined_delete_sends_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let manager = NewsManager::new(test_client(&server), admin(), Duration::from_millis(10));
    let outcome = manager.delete("n1", |_| false).await;
    assert!(outcome.is_none());
}

#[tokio::test]
async fn confirmed_delete_removes_and_reloads() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/admin/news/n1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/admin/news"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([news_json("n2", "Left")])))
        .mount(&server)
        .await;

    let manager = NewsManager::new(test_client(&server), admin(), Duration::from_millis(10));
    let notice = manager.delete("n1", |id| id == "n1").await.unwrap();
    assert_eq!(notice.severity, Severity::Success);
    assert_eq!(manager.items().len(), 1);
    assert_eq!(manager.items()[0].id, "n2");
}

#[tokio::test]
async fn manager_save_reports_missing_field_without_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let manager = NewsManager::new(test_client(&server), admin(), Duration::from_millis(10));
    let mut d = draft();
    d.title = String::new();
    let notice = manager.save(&d).await;
    assert_eq!(notice.severity, Severity::Warn);
    assert!(notice.detail.contains("title"));
}

#[tokio::test]
async fn debounced_input_searches_once_with_last_text() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/admin/news/search"))
        .and(query_param("query", "galaxy"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": [news_json("n3", "New Galaxy")]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut manager = NewsManager::new(test_client(&server), admin(), Duration::from_millis(100));
    for text in ["g", "gal", "galaxy"] {
        manager.on_search_input(text);
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    assert!(manager.search_pending());

    tokio::time::sleep(Duration::from_millis(500)).await;
    assert_eq!(manager.query(), "galaxy");
    assert_eq!(manager.items()[0].id, "n3");
}

#[tokio::test]
async fn clearing_search_shows_loaded_list_without_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/admin/news"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            news_json("n1", "Tet sale"),
            news_json("n2", "New Galaxy")
        ])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/admin/news/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true, "data": [] })))
        .expect(0)
        .mount(&server)
        .await;

    let mut manager = NewsManager::new(test_client(&server), admin(), Duration::from_millis(50));
    manager.refresh().await;

    manager.on_search_input("gal");
    manager.on_search_input("   ");
    assert!(!manager.search_pending());
    assert_eq!(manager.items().len(), 2);

    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(manager.items().len(), 2);
    assert_eq!(manager.query(), "   ");
}

#[tokio::test]
async fn blank_search_now_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let manager = NewsManager::new(test_client(&server), admin(), Duration::from_millis(10));
    manager.search_now("  ").await;
    assert!(manager.items().is_empty());
    assert!(manager.last_notice().is_none());
}

#[tokio::test]
async fn superseded_search_response_is_discarded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/admin/news/search"))
        .and(query_param("query", "slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "success": true, "data": [news_json("old", "Stale")] }))
                .set_delay(Duration::from_millis(300)),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/admin/news/search"))
        .and(query_param("query", "fast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": [news_json("new", "Fresh")]
        })))
        .mount(&server)
        .await;

    let manager = NewsManager::new(test_client(&server), admin(), Duration::from_millis(10));
    tokio::join!(manager.search_now("slow"), async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        manager.search_now("fast").await;
    });

    let items = manager.items();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].id, "new");
    assert_eq!(manager.query(), "fast");
}

#[tokio::test]
async fn failed_search_clears_items_and_leaves_notice() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/admin/news/search"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let manager = NewsManager::new(test_client(&server), admin(), Duration::from_millis(10));
    manager.search_now("tet").await;
    assert!(manager.items().is_empty());
    assert_eq!(manager.last_notice().unwrap().severity, Severity::Error);
}

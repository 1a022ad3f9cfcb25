//! Integration tests for the EduConsult backend.

use std::sync::Arc;

use chrono::{Duration, Utc};
use reqwest::Client;
use serde_json::{json, Value};
use tempfile::TempDir;

use crate::auth::{mint_token, Role};
use crate::client::{draft::DocumentDraft, fallback, Session};
use crate::config::Config;
use crate::db::{init_database, Repository};
use crate::models::ContentDomain;
use crate::notify::Notifier;
use crate::{create_router, AppState};

const TEST_SECRET: &str = "test-secret";

/// Test fixture for integration tests.
struct TestFixture {
    client: Client,
    base_url: String,
    admin_token: String,
    staff_token: String,
    counselor_token: String,
    _temp_dir: TempDir,
}

impl TestFixture {
    async fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("test.sqlite");
        let uploads_path = temp_dir.path().join("uploads");

        let pool = init_database(&db_path).await.expect("Failed to init DB");
        let repo = Repository::new(pool);

        let config = Config {
            jwt_secret: Some(TEST_SECRET.to_string()),
            db_path,
            uploads_path,
            notify_webhook: None,
            bind_addr: "127.0.0.1:0".parse().unwrap(),
            log_level: "warn".to_string(),
            environment: "test".to_string(),
        };

        let state = AppState {
            repo,
            notifier: Notifier::new(None),
            config: Arc::new(config),
        };

        let app = create_router(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind");
        let addr = listener.local_addr().expect("Failed to get addr");
        let base_url = format!("http://{}", addr);

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

        TestFixture {
            client: Client::new(),
            base_url,
            admin_token: mint_token(TEST_SECRET, "admin-1", Role::Admin, 3600).unwrap(),
            staff_token: mint_token(TEST_SECRET, "staff-1", Role::Staff, 3600).unwrap(),
            counselor_token: mint_token(TEST_SECRET, "counselor-1", Role::Counselor, 3600).unwrap(),
            _temp_dir: temp_dir,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

fn future_date(days: i64) -> String {
    (Utc::now() + Duration::days(days))
        .format("%Y-%m-%d")
        .to_string()
}

fn valid_post_body(title: &str) -> Value {
    json!({
        "title": title,
        "content": "Choosing a destination is the first of many decisions an applicant makes.",
        "category": "study-abroad"
    })
}

#[tokio::test]
async fn test_health_check() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .get(fixture.url("/api/health"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["environment"], "test");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_mutation_requires_token() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .post(fixture.url("/api/blog"))
        .json(&valid_post_body("No Token"))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 401);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_wrong_role_is_forbidden() {
    let fixture = TestFixture::new().await;

    // A counselor may work bookings but not write blog posts
    let resp = fixture
        .client
        .post(fixture.url("/api/blog"))
        .bearer_auth(&fixture.counselor_token)
        .json(&valid_post_body("Wrong Role"))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 403);
}

#[tokio::test]
async fn test_validation_reports_every_field_and_persists_nothing() {
    let fixture = TestFixture::new().await;

    // Empty contact form: four required fields missing at once
    let resp = fixture
        .client
        .post(fixture.url("/api/contact"))
        .json(&json!({}))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], false);
    let errors = body["errors"].as_array().unwrap();
    let fields: Vec<&str> = errors.iter().map(|e| e["field"].as_str().unwrap()).collect();
    assert!(fields.contains(&"name"));
    assert!(fields.contains(&"email"));
    assert!(fields.contains(&"subject"));
    assert!(fields.contains(&"message"));

    // Nothing was stored
    let list_resp = fixture
        .client
        .get(fixture.url("/api/contact"))
        .bearer_auth(&fixture.staff_token)
        .send()
        .await
        .unwrap();
    let list_body: Value = list_resp.json().await.unwrap();
    assert_eq!(list_body["data"]["pagination"]["total"], 0);
}

#[tokio::test]
async fn test_blog_crud_round_trip() {
    let fixture = TestFixture::new().await;

    let create_resp = fixture
        .client
        .post(fixture.url("/api/blog"))
        .bearer_auth(&fixture.admin_token)
        .json(&json!({
            "title": "IELTS Writing Tips",
            "excerpt": "Five habits of band-9 essays",
            "content": "Plan before you write. Examiners reward structure over vocabulary.",
            "category": "test-prep",
            "tags": ["ielts", "writing"]
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(create_resp.status(), 201);
    let create_body: Value = create_resp.json().await.unwrap();
    assert_eq!(create_body["success"], true);
    let post_id = create_body["data"]["id"].as_str().unwrap().to_string();
    assert_eq!(create_body["data"]["slug"], "ielts-writing-tips");
    assert_eq!(create_body["data"]["status"], "draft");
    assert_eq!(create_body["data"]["readTime"], 1);
    // SEO fields derive from title and excerpt when absent
    assert_eq!(create_body["data"]["seoTitle"], "IELTS Writing Tips");
    assert!(create_body["data"]["publishedAt"].is_null());
    let created_at_stamp = create_body["data"]["updatedAt"].as_str().unwrap().to_string();

    // Partial update leaves other fields intact and advances updatedAt
    let update_resp = fixture
        .client
        .put(fixture.url(&format!("/api/blog/{}", post_id)))
        .bearer_auth(&fixture.admin_token)
        .json(&json!({ "excerpt": "Five habits, revisited" }))
        .send()
        .await
        .unwrap();

    assert_eq!(update_resp.status(), 200);
    let update_body: Value = update_resp.json().await.unwrap();
    assert_eq!(update_body["data"]["title"], "IELTS Writing Tips");
    assert_eq!(update_body["data"]["excerpt"], "Five habits, revisited");
    let before = chrono::DateTime::parse_from_rfc3339(&created_at_stamp).unwrap();
    let after = chrono::DateTime::parse_from_rfc3339(
        update_body["data"]["updatedAt"].as_str().unwrap(),
    )
    .unwrap();
    assert!(after > before, "updatedAt must strictly increase on update");

    // Fetch by slug resolves the same post
    let get_resp = fixture
        .client
        .get(fixture.url("/api/blog/ielts-writing-tips"))
        .bearer_auth(&fixture.admin_token)
        .send()
        .await
        .unwrap();
    assert_eq!(get_resp.status(), 200);
    let get_body: Value = get_resp.json().await.unwrap();
    assert_eq!(get_body["data"]["id"].as_str().unwrap(), post_id);

    // Delete, then deleting again reports not-found
    let delete_resp = fixture
        .client
        .delete(fixture.url(&format!("/api/blog/{}", post_id)))
        .bearer_auth(&fixture.admin_token)
        .send()
        .await
        .unwrap();
    assert_eq!(delete_resp.status(), 200);

    let second_delete = fixture
        .client
        .delete(fixture.url(&format!("/api/blog/{}", post_id)))
        .bearer_auth(&fixture.admin_token)
        .send()
        .await
        .unwrap();
    assert_eq!(second_delete.status(), 404);
}

#[tokio::test]
async fn test_blog_slug_conflict() {
    let fixture = TestFixture::new().await;

    let first = fixture
        .client
        .post(fixture.url("/api/blog"))
        .bearer_auth(&fixture.admin_token)
        .json(&valid_post_body("Hello World!"))
        .send()
        .await
        .unwrap();
    assert_eq!(first.status(), 201);
    let first_body: Value = first.json().await.unwrap();
    assert_eq!(first_body["data"]["slug"], "hello-world");

    // Same title slugifies to the same slug
    let second = fixture
        .client
        .post(fixture.url("/api/blog"))
        .bearer_auth(&fixture.admin_token)
        .json(&valid_post_body("Hello World!"))
        .send()
        .await
        .unwrap();
    assert_eq!(second.status(), 400);
    let second_body: Value = second.json().await.unwrap();
    assert_eq!(second_body["success"], false);
    assert_eq!(second_body["errors"][0]["field"], "slug");
}

#[tokio::test]
async fn test_publish_stamps_published_at_once() {
    let fixture = TestFixture::new().await;

    let create_body: Value = fixture
        .client
        .post(fixture.url("/api/blog"))
        .bearer_auth(&fixture.admin_token)
        .json(&valid_post_body("Lifecycle Post"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let post_id = create_body["data"]["id"].as_str().unwrap().to_string();

    // First publish stamps the timestamp
    let publish_body: Value = fixture
        .client
        .put(fixture.url(&format!("/api/blog/{}", post_id)))
        .bearer_auth(&fixture.admin_token)
        .json(&json!({ "status": "published" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let stamp = publish_body["data"]["publishedAt"]
        .as_str()
        .unwrap()
        .to_string();

    // Later edits never move it
    let edit_body: Value = fixture
        .client
        .put(fixture.url(&format!("/api/blog/{}", post_id)))
        .bearer_auth(&fixture.admin_token)
        .json(&json!({ "title": "Lifecycle Post (edited)" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(edit_body["data"]["publishedAt"].as_str().unwrap(), stamp);

    // published -> archived is allowed; archived is terminal
    let archive_resp = fixture
        .client
        .put(fixture.url(&format!("/api/blog/{}", post_id)))
        .bearer_auth(&fixture.admin_token)
        .json(&json!({ "status": "archived" }))
        .send()
        .await
        .unwrap();
    assert_eq!(archive_resp.status(), 200);

    let republish_resp = fixture
        .client
        .put(fixture.url(&format!("/api/blog/{}", post_id)))
        .bearer_auth(&fixture.admin_token)
        .json(&json!({ "status": "published" }))
        .send()
        .await
        .unwrap();
    assert_eq!(republish_resp.status(), 400);
    let republish_body: Value = republish_resp.json().await.unwrap();
    assert_eq!(republish_body["errors"][0]["field"], "status");
}

#[tokio::test]
async fn test_public_blog_visibility() {
    let fixture = TestFixture::new().await;

    let draft_body: Value = fixture
        .client
        .post(fixture.url("/api/blog"))
        .bearer_auth(&fixture.admin_token)
        .json(&valid_post_body("Hidden Draft"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let draft_id = draft_body["data"]["id"].as_str().unwrap().to_string();

    let mut published = valid_post_body("Visible Post");
    published["status"] = json!("published");
    fixture
        .client
        .post(fixture.url("/api/blog"))
        .bearer_auth(&fixture.admin_token)
        .json(&published)
        .send()
        .await
        .unwrap();

    // Anonymous list contains only the published post
    let public_list: Value = fixture
        .client
        .get(fixture.url("/api/blog"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let items = public_list["data"]["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["title"], "Visible Post");

    // Anonymous fetch of the draft is a 404, not a leak
    let public_get = fixture
        .client
        .get(fixture.url(&format!("/api/blog/{}", draft_id)))
        .send()
        .await
        .unwrap();
    assert_eq!(public_get.status(), 404);

    // The editing surface sees both
    let admin_list: Value = fixture
        .client
        .get(fixture.url("/api/blog"))
        .bearer_auth(&fixture.admin_token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(admin_list["data"]["pagination"]["total"], 2);
}

#[tokio::test]
async fn test_contact_urgent_promotion_and_triage() {
    let fixture = TestFixture::new().await;

    // Urgent submissions skip straight to in-progress
    let urgent_resp = fixture
        .client
        .post(fixture.url("/api/contact"))
        .json(&json!({
            "name": "Asha Patel",
            "email": "asha@example.com",
            "subject": "Visa interview next week",
            "message": "My interview was moved up and I need documents reviewed.",
            "urgency": "urgent"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(urgent_resp.status(), 201);
    let urgent_body: Value = urgent_resp.json().await.unwrap();
    assert_eq!(urgent_body["data"]["status"], "in-progress");
    let urgent_id = urgent_body["data"]["id"].as_str().unwrap().to_string();

    let normal_body: Value = fixture
        .client
        .post(fixture.url("/api/contact"))
        .json(&json!({
            "name": "Ben Okafor",
            "email": "ben@example.com",
            "subject": "Question about GRE courses",
            "message": "Do evening batches run on weekends too?"
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(normal_body["data"]["status"], "new");
    let normal_id = normal_body["data"]["id"].as_str().unwrap().to_string();

    // Staff resolves the urgent one
    let resolve_resp = fixture
        .client
        .put(fixture.url(&format!("/api/contact/{}", urgent_id)))
        .bearer_auth(&fixture.staff_token)
        .json(&json!({ "status": "resolved", "assignedTo": "staff-1" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resolve_resp.status(), 200);
    let resolve_body: Value = resolve_resp.json().await.unwrap();
    assert_eq!(resolve_body["data"]["assignedTo"], "staff-1");

    // new -> closed skips two states and is rejected
    let skip_resp = fixture
        .client
        .put(fixture.url(&format!("/api/contact/{}", normal_id)))
        .bearer_auth(&fixture.staff_token)
        .json(&json!({ "status": "closed" }))
        .send()
        .await
        .unwrap();
    assert_eq!(skip_resp.status(), 400);
    let skip_body: Value = skip_resp.json().await.unwrap();
    assert_eq!(skip_body["errors"][0]["field"], "status");

    // Only admins may delete
    let staff_delete = fixture
        .client
        .delete(fixture.url(&format!("/api/contact/{}", normal_id)))
        .bearer_auth(&fixture.staff_token)
        .send()
        .await
        .unwrap();
    assert_eq!(staff_delete.status(), 403);
}

#[tokio::test]
async fn test_consultation_booking_rules() {
    let fixture = TestFixture::new().await;

    // Past dates are rejected up front
    let past_resp = fixture
        .client
        .post(fixture.url("/api/consultations"))
        .json(&json!({
            "name": "Lin Wei",
            "email": "lin@example.com",
            "phone": "+1-555-0199",
            "serviceType": "study-abroad",
            "preferredDate": "2020-01-01"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(past_resp.status(), 400);
    let past_body: Value = past_resp.json().await.unwrap();
    assert_eq!(past_body["errors"][0]["field"], "preferredDate");

    // A valid booking defaults its duration from the service type
    let date = future_date(14);
    let create_resp = fixture
        .client
        .post(fixture.url("/api/consultations"))
        .json(&json!({
            "name": "Lin Wei",
            "email": "lin@example.com",
            "phone": "+1-555-0199",
            "serviceType": "study-abroad",
            "preferredDate": date,
            "preferredTime": "afternoon"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(create_resp.status(), 201);
    let create_body: Value = create_resp.json().await.unwrap();
    assert_eq!(create_body["data"]["status"], "pending");
    assert_eq!(create_body["data"]["durationMinutes"], 60);
    let booking_id = create_body["data"]["id"].as_str().unwrap().to_string();

    // Same email, same date: rejected while the first booking is live
    let dup_resp = fixture
        .client
        .post(fixture.url("/api/consultations"))
        .json(&json!({
            "name": "Lin Wei",
            "email": "lin@example.com",
            "phone": "+1-555-0199",
            "serviceType": "test-prep",
            "preferredDate": date
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(dup_resp.status(), 400);
    let dup_body: Value = dup_resp.json().await.unwrap();
    assert_eq!(dup_body["errors"][0]["field"], "preferredDate");

    // Counselors confirm bookings, then complete them
    let confirm_resp = fixture
        .client
        .put(fixture.url(&format!("/api/consultations/{}", booking_id)))
        .bearer_auth(&fixture.counselor_token)
        .json(&json!({ "status": "confirmed", "assignedTo": "counselor-1" }))
        .send()
        .await
        .unwrap();
    assert_eq!(confirm_resp.status(), 200);

    let complete_resp = fixture
        .client
        .put(fixture.url(&format!("/api/consultations/{}", booking_id)))
        .bearer_auth(&fixture.counselor_token)
        .json(&json!({ "status": "completed" }))
        .send()
        .await
        .unwrap();
    assert_eq!(complete_resp.status(), 200);

    // Completed is terminal
    let reopen_resp = fixture
        .client
        .put(fixture.url(&format!("/api/consultations/{}", booking_id)))
        .bearer_auth(&fixture.counselor_token)
        .json(&json!({ "status": "pending" }))
        .send()
        .await
        .unwrap();
    assert_eq!(reopen_resp.status(), 400);

    // A cancelled booking frees the email+date pair
    let date2 = future_date(21);
    let b1: Value = fixture
        .client
        .post(fixture.url("/api/consultations"))
        .json(&json!({
            "name": "Maya Ross",
            "email": "maya@example.com",
            "phone": "+1-555-0177",
            "serviceType": "visa-guidance",
            "preferredDate": date2
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let b1_id = b1["data"]["id"].as_str().unwrap().to_string();

    fixture
        .client
        .put(fixture.url(&format!("/api/consultations/{}", b1_id)))
        .bearer_auth(&fixture.counselor_token)
        .json(&json!({ "status": "cancelled" }))
        .send()
        .await
        .unwrap();

    let rebook = fixture
        .client
        .post(fixture.url("/api/consultations"))
        .json(&json!({
            "name": "Maya Ross",
            "email": "maya@example.com",
            "phone": "+1-555-0177",
            "serviceType": "visa-guidance",
            "preferredDate": date2
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(rebook.status(), 201);
}

#[tokio::test]
async fn test_service_toggles_and_visibility() {
    let fixture = TestFixture::new().await;

    let create_body: Value = fixture
        .client
        .post(fixture.url("/api/services"))
        .bearer_auth(&fixture.admin_token)
        .json(&json!({
            "title": "University Shortlisting",
            "description": "A curated list of universities matched to your profile.",
            "category": "study-abroad",
            "features": ["Profile review", "Ten-university shortlist"]
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(create_body["data"]["isActive"], true);
    let service_id = create_body["data"]["id"].as_str().unwrap().to_string();

    // Toggle off: gone from the public list, still on the admin list
    let toggled: Value = fixture
        .client
        .patch(fixture.url(&format!("/api/services/{}/toggle-active", service_id)))
        .bearer_auth(&fixture.admin_token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(toggled["data"]["isActive"], false);

    let public_list: Value = fixture
        .client
        .get(fixture.url("/api/services"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(public_list["data"]["items"].as_array().unwrap().len(), 0);
    assert_eq!(public_list["data"]["pagination"]["total"], 0);

    let admin_list: Value = fixture
        .client
        .get(fixture.url("/api/services"))
        .bearer_auth(&fixture.admin_token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(admin_list["data"]["items"].as_array().unwrap().len(), 1);
    assert_eq!(admin_list["data"]["pagination"]["total"], 1);

    // Toggle back on restores the original state
    let toggled_back: Value = fixture
        .client
        .patch(fixture.url(&format!("/api/services/{}/toggle-active", service_id)))
        .bearer_auth(&fixture.admin_token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(toggled_back["data"]["isActive"], true);
}

#[tokio::test]
async fn test_team_visibility_filtering() {
    let fixture = TestFixture::new().await;

    fixture
        .client
        .post(fixture.url("/api/team"))
        .bearer_auth(&fixture.admin_token)
        .json(&json!({
            "name": "Dana Kim",
            "roleTitle": "Senior Counselor",
            "department": "counseling"
        }))
        .send()
        .await
        .unwrap();

    fixture
        .client
        .post(fixture.url("/api/team"))
        .bearer_auth(&fixture.admin_token)
        .json(&json!({
            "name": "Sam Iqbal",
            "roleTitle": "Operations Lead",
            "department": "operations",
            "isVisible": false
        }))
        .send()
        .await
        .unwrap();

    let public_list: Value = fixture
        .client
        .get(fixture.url("/api/team"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let public_members = public_list["data"]["items"].as_array().unwrap();
    assert_eq!(public_members.len(), 1);
    assert_eq!(public_members[0]["name"], "Dana Kim");
    assert_eq!(public_list["data"]["pagination"]["total"], 1);

    let admin_list: Value = fixture
        .client
        .get(fixture.url("/api/team"))
        .bearer_auth(&fixture.admin_token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(admin_list["data"]["items"].as_array().unwrap().len(), 2);
    assert_eq!(admin_list["data"]["pagination"]["total"], 2);
}

#[tokio::test]
async fn test_page_content_upsert_and_fetch() {
    let fixture = TestFixture::new().await;

    // Nothing stored yet
    let empty_resp = fixture
        .client
        .get(fixture.url("/api/content/home"))
        .send()
        .await
        .unwrap();
    assert_eq!(empty_resp.status(), 404);

    // Missing hero.title fails validation
    let invalid_resp = fixture
        .client
        .put(fixture.url("/api/content/home"))
        .bearer_auth(&fixture.admin_token)
        .json(&json!({ "hero": { "subtitle": "no title" }, "stats": [{ "label": "x" }] }))
        .send()
        .await
        .unwrap();
    assert_eq!(invalid_resp.status(), 400);
    let invalid_body: Value = invalid_resp.json().await.unwrap();
    assert_eq!(invalid_body["errors"][0]["field"], "hero.title");

    let document = json!({
        "hero": { "title": "Start Your Journey", "subtitle": "Counseling that works" },
        "stats": [{ "label": "Students Placed", "value": "2000+" }]
    });
    let put_resp = fixture
        .client
        .put(fixture.url("/api/content/home"))
        .bearer_auth(&fixture.admin_token)
        .json(&document)
        .send()
        .await
        .unwrap();
    assert_eq!(put_resp.status(), 200);
    let put_body: Value = put_resp.json().await.unwrap();
    let first_id = put_body["data"]["id"].as_str().unwrap().to_string();

    // Round trip
    let get_body: Value = fixture
        .client
        .get(fixture.url("/api/content/home"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(get_body["data"]["body"], document);

    // Replacing keeps the identity
    let second_put: Value = fixture
        .client
        .put(fixture.url("/api/content/home"))
        .bearer_auth(&fixture.admin_token)
        .json(&json!({
            "hero": { "title": "Start Your Journey Today" },
            "stats": [{ "label": "Students Placed", "value": "2500+" }]
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(second_put["data"]["id"].as_str().unwrap(), first_id);

    // Unknown domains do not exist
    let unknown_resp = fixture
        .client
        .get(fixture.url("/api/content/pricing"))
        .send()
        .await
        .unwrap();
    assert_eq!(unknown_resp.status(), 404);
}

#[tokio::test]
async fn test_client_session_falls_back_then_renders_live_content() {
    let fixture = TestFixture::new().await;
    let session = Session::anonymous(&fixture.base_url);

    // Nothing saved: the rendering surface gets the fallback constant
    let body = session
        .fetch_page_content_or_default(ContentDomain::About)
        .await;
    assert_eq!(body, fallback::default_document(ContentDomain::About));

    // An admin edits via the draft binder and saves
    let editor = Session::with_token(&fixture.base_url, &fixture.admin_token);
    let draft = DocumentDraft::load(&editor, ContentDomain::About)
        .await
        .set("hero.title", json!("Who We Are"))
        .set("mission", json!("Open doors for every student."));
    let saved = draft.save(&editor).await.expect("save should succeed");
    assert_eq!(saved.body["hero"]["title"], "Who We Are");

    // The public fetch now returns live content instead of the fallback
    let live = session
        .fetch_page_content_or_default(ContentDomain::About)
        .await;
    assert_eq!(live["hero"]["title"], "Who We Are");
    assert_eq!(live["mission"], "Open doors for every student.");
}

#[tokio::test]
async fn test_upload_rejects_non_images() {
    let fixture = TestFixture::new().await;

    let form = reqwest::multipart::Form::new().part(
        "file",
        reqwest::multipart::Part::bytes(b"definitely not an image".to_vec()).file_name("evil.exe"),
    );

    let resp = fixture
        .client
        .post(fixture.url("/api/uploads"))
        .bearer_auth(&fixture.admin_token)
        .multipart(form)
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["errors"][0]["field"], "file");
}

#[tokio::test]
async fn test_upload_stores_png_and_serves_it() {
    let fixture = TestFixture::new().await;

    // Minimal PNG header is enough for the sniffer
    let png_bytes = vec![0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0];
    let form = reqwest::multipart::Form::new().part(
        "file",
        reqwest::multipart::Part::bytes(png_bytes.clone()).file_name("photo.png"),
    );

    let resp = fixture
        .client
        .post(fixture.url("/api/uploads"))
        .bearer_auth(&fixture.admin_token)
        .multipart(form)
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 201);
    let body: Value = resp.json().await.unwrap();
    let url = body["data"]["url"].as_str().unwrap().to_string();
    assert!(url.starts_with("/uploads/"));
    assert_eq!(body["data"]["mimeType"], "image/png");

    // Served back through the static mount
    let fetch_resp = fixture.client.get(fixture.url(&url)).send().await.unwrap();
    assert_eq!(fetch_resp.status(), 200);
    assert_eq!(fetch_resp.bytes().await.unwrap().to_vec(), png_bytes);
}

#[tokio::test]
async fn test_upload_accepts_large_images_up_to_the_cap() {
    let fixture = TestFixture::new().await;

    // 3MB body: over axum's default body limit, under the 5MB cap
    let mut png_bytes = vec![0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
    png_bytes.resize(3 * 1024 * 1024, 0);
    let form = reqwest::multipart::Form::new().part(
        "file",
        reqwest::multipart::Part::bytes(png_bytes).file_name("large.png"),
    );

    let resp = fixture
        .client
        .post(fixture.url("/api/uploads"))
        .bearer_auth(&fixture.admin_token)
        .multipart(form)
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 201);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["size"], 3 * 1024 * 1024);

    // Past the cap the handler's own size check rejects the file
    let mut oversize = vec![0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
    oversize.resize(5 * 1024 * 1024 + 1, 0);
    let form = reqwest::multipart::Form::new().part(
        "file",
        reqwest::multipart::Part::bytes(oversize).file_name("huge.png"),
    );

    let resp = fixture
        .client
        .post(fixture.url("/api/uploads"))
        .bearer_auth(&fixture.admin_token)
        .multipart(form)
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["errors"][0]["field"], "file");
}

//! Integration tests for lead submission against a live HTTP relay

use std::sync::{Arc, Mutex};

use aesthetic_tile::atile_app::config::init_config_dir;
use aesthetic_tile::atile_app::SubmitOutcome;
use aesthetic_tile::atile_core::{FieldSet, LeadField, SubmissionStatus};
use aesthetic_tile::Site;
use aesthetic_tile::atile_app::Viewport;
use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use tempfile::TempDir;
use tokio::net::TcpListener;

#[derive(Clone)]
struct RelayState {
    status: StatusCode,
    received: Arc<Mutex<Vec<serde_json::Value>>>,
}

async fn accept_lead(
    State(state): State<RelayState>,
    Json(body): Json<serde_json::Value>,
) -> StatusCode {
    state.received.lock().unwrap().push(body);
    state.status
}

/// Start a relay answering every lead with `status`
async fn spawn_relay(status: StatusCode) -> (String, Arc<Mutex<Vec<serde_json::Value>>>) {
    let received = Arc::new(Mutex::new(Vec::new()));
    let app = Router::new()
        .route("/f/leads", post(accept_lead))
        .with_state(RelayState {
            status,
            received: received.clone(),
        });

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    (format!("http://{addr}/f/leads"), received)
}

/// Site root whose config points the relay at `endpoint`
fn site_root(endpoint: &str) -> TempDir {
    let temp = tempfile::tempdir().unwrap();
    let atile_dir = temp.path().join(".atile");
    std::fs::create_dir_all(&atile_dir).unwrap();
    std::fs::write(
        atile_dir.join("config.toml"),
        format!(
            r#"
[relay]
endpoint = "{endpoint}"
subject = "Integration Inquiry"
"#
        ),
    )
    .unwrap();
    temp
}

#[tokio::test]
async fn test_contact_form_reaches_relay() {
    let (endpoint, received) = spawn_relay(StatusCode::OK).await;
    let root = site_root(&endpoint);
    let site = Site::load(root.path(), Viewport::default()).unwrap();

    let form = site.contact_form();
    form.edit(LeadField::Name, "  Jane Smith  ");
    form.edit(LeadField::Email, "jane@example.com");
    form.edit(LeadField::Message, "We need a new shower surround tiled.");

    assert_eq!(form.submit(), SubmitOutcome::Sent);
    assert_eq!(form.settled().await, SubmissionStatus::Success);

    let received = received.lock().unwrap();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0]["name"], "Jane Smith");
    assert_eq!(received[0]["_subject"], "Integration Inquiry");
    assert_eq!(received[0]["_gotcha"], "");
    assert!(received[0].get("phone").is_none());
    assert!(form.snapshot().draft.is_empty());
}

#[tokio::test]
async fn test_phone_form_sends_phone() {
    let (endpoint, received) = spawn_relay(StatusCode::OK).await;
    let root = site_root(&endpoint);
    let site = Site::load(root.path(), Viewport::default()).unwrap();

    let form = site.lead_form(FieldSet::BaseWithPhone, Some("Kitchen Backsplash Inquiry"));
    form.edit(LeadField::Name, "Jane Smith");
    form.edit(LeadField::Email, "jane@example.com");
    form.edit(LeadField::Phone, "(502) 650-7014");
    form.edit(LeadField::Message, "Subway tile backsplash, about 30 sq ft.");

    form.submit();
    assert_eq!(form.settled().await, SubmissionStatus::Success);

    let received = received.lock().unwrap();
    assert_eq!(received[0]["phone"], "(502) 650-7014");
    assert_eq!(received[0]["_subject"], "Kitchen Backsplash Inquiry");
}

#[tokio::test]
async fn test_relay_rejection_keeps_draft_for_resubmit() {
    let (endpoint, received) = spawn_relay(StatusCode::INTERNAL_SERVER_ERROR).await;
    let root = site_root(&endpoint);
    let site = Site::load(root.path(), Viewport::default()).unwrap();

    let form = site.contact_form();
    form.edit(LeadField::Name, "Jane Smith");
    form.edit(LeadField::Email, "jane@example.com");
    form.edit(LeadField::Message, "Fireplace surround in stacked stone.");

    form.submit();
    let status = form.settled().await;

    assert_eq!(status, SubmissionStatus::Error);
    assert_eq!(
        status.user_message(),
        Some("Sorry—something went wrong. Please try again or email us directly.")
    );
    assert_eq!(form.snapshot().draft.name, "Jane Smith");
    assert_eq!(received.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_invalid_lead_never_leaves_the_page() {
    let (endpoint, received) = spawn_relay(StatusCode::OK).await;
    let root = site_root(&endpoint);
    let site = Site::load(root.path(), Viewport::default()).unwrap();

    let form = site.contact_form();
    form.edit(LeadField::Name, "J");
    form.edit(LeadField::Email, "jane at example dot com");
    form.edit(LeadField::Message, "Hi");

    let SubmitOutcome::Invalid(errors) = form.submit() else {
        panic!("expected validation errors");
    };

    assert_eq!(errors.len(), 3);
    assert_eq!(form.status(), SubmissionStatus::Idle);
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    assert!(received.lock().unwrap().is_empty());
}

#[test]
fn test_generated_config_targets_production_relay() {
    let temp = tempfile::tempdir().unwrap();
    init_config_dir(temp.path()).unwrap();

    let site = Site::load(temp.path(), Viewport::default()).unwrap();

    assert_eq!(
        site.relay().endpoint().as_str(),
        "https://formspree.io/f/mzzjzbpk"
    );
    assert_eq!(site.settings().contact.phone_label, "(502) 650-7014");
}

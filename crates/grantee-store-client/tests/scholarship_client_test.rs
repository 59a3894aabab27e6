//! Contract tests for `ScholarshipClient`.
//!
//! | Method | Path | Test |
//! |--------|------|------|
//! | GET    | `/scholarship/{id}` | `get_scholarship_*` |
//! | POST   | `/scholarship` | `put_scholarship_*` |

use grantee_core::ScholarshipId;
use grantee_store_client::{
    ScholarshipContent, ScholarshipDocument, StoreClient, StoreConfig, StoreError,
};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(mock_server: &MockServer) -> StoreClient {
    let config = StoreConfig::from_parts(&mock_server.uri(), Some("5")).unwrap();
    StoreClient::new(config).unwrap()
}

fn stored_json(id: serde_json::Value) -> serde_json::Value {
    serde_json::json!({
        "scholarship": {
            "id": id,
            "title": "Open Source Fellowship",
            "description": "Funding for maintainers",
            "maxAmountPerApplicant": 1000,
            "deadline": "2026-12-31",
            "applicants": 4,
            "requirements": ["Public GitHub profile"]
        }
    })
}

// ── GET /scholarship/{id} ────────────────────────────────────────────

#[tokio::test]
async fn get_scholarship_unwraps_envelope() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/scholarship/3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(stored_json("3".into())))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let doc = client
        .scholarships()
        .get(ScholarshipId(3))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(doc.id, ScholarshipId(3));
    assert_eq!(doc.applicants, 4);
    assert_eq!(doc.content.title, "Open Source Fellowship");
    assert_eq!(doc.content.requirements, vec!["Public GitHub profile"]);
    assert!(doc.stored_at.is_none());
}

#[tokio::test]
async fn get_scholarship_returns_none_on_404() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/scholarship/9"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    assert!(client
        .scholarships()
        .get(ScholarshipId(9))
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn get_scholarship_returns_none_on_empty_envelope() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/scholarship/9"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"scholarship": null})),
        )
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    assert!(client
        .scholarships()
        .get(ScholarshipId(9))
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn get_scholarship_wrong_id_is_malformed() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/scholarship/3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(stored_json(8.into())))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let err = client
        .scholarships()
        .get(ScholarshipId(3))
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Malformed { .. }));
}

#[tokio::test]
async fn get_scholarship_500_is_api_error() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/scholarship/1"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    match client.scholarships().get(ScholarshipId(1)).await {
        Err(StoreError::ApiError { status, body, .. }) => {
            assert_eq!(status, 500);
            assert_eq!(body, "boom");
        }
        other => panic!("expected ApiError, got {other:?}"),
    }
}

#[tokio::test]
async fn get_scholarship_non_json_is_deserialization_error() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/scholarship/1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    assert!(matches!(
        client.scholarships().get(ScholarshipId(1)).await,
        Err(StoreError::Deserialization { .. })
    ));
}

#[tokio::test]
async fn get_scholarship_unreachable_is_http_error() {
    let config = StoreConfig::local(1).unwrap();
    let client = StoreClient::new(config).unwrap();
    assert!(matches!(
        client.scholarships().get(ScholarshipId(1)).await,
        Err(StoreError::Http { .. })
    ));
}

// ── POST /scholarship ────────────────────────────────────────────────

#[tokio::test]
async fn put_scholarship_sends_flat_document() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/scholarship"))
        .and(body_json(serde_json::json!({
            "id": "5",
            "title": "T",
            "description": "D",
            "maxAmountPerApplicant": 10,
            "deadline": "2026-06-01",
            "applicants": 0,
            "requirements": ["a", "b"]
        })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let doc = ScholarshipDocument {
        id: ScholarshipId(5),
        applicants: 0,
        stored_at: None,
        content: ScholarshipContent {
            title: "T".into(),
            description: "D".into(),
            max_amount_per_applicant: 10,
            deadline: "2026-06-01".into(),
            requirements: vec!["a".into(), "b".into()],
        },
    };
    client.scholarships().put(&doc).await.unwrap();
}

#[tokio::test]
async fn put_scholarship_is_not_retried() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/scholarship"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let doc = ScholarshipDocument {
        id: ScholarshipId(1),
        applicants: 0,
        stored_at: None,
        content: ScholarshipContent {
            title: "T".into(),
            description: "D".into(),
            max_amount_per_applicant: 1,
            deadline: "2026-06-01".into(),
            requirements: vec![],
        },
    };
    assert!(matches!(
        client.scholarships().put(&doc).await,
        Err(StoreError::ApiError { status: 503, .. })
    ));
}

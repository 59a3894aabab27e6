//! Signed profile reads and writes against a wiremock store.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use grantee_bridge::{
    BridgeError, LocalWallet, ProfileSync, SignatureAuthenticator, WalletAgent, WalletError,
};
use grantee_core::AccountAddress;
use grantee_crypto::{recover_address, WalletKey, WalletSignature};
use grantee_store_client::{StoreClient, StoreConfig, UserProfile};
use wiremock::matchers::{any, body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

fn key(b: u8) -> WalletKey {
    WalletKey::from_bytes(&[b; 32]).unwrap()
}

fn store(server: &MockServer) -> StoreClient {
    StoreClient::new(StoreConfig::from_parts(&server.uri(), None).unwrap()).unwrap()
}

fn sync(server: &MockServer, wallet: Arc<dyn WalletAgent>) -> ProfileSync {
    ProfileSync::new(SignatureAuthenticator::new(wallet), store(server))
}

fn profile() -> UserProfile {
    UserProfile {
        github: "octocat".into(),
        linked_in: "in/octocat".into(),
        google: "octocat@example.com".into(),
        twitter: "@octocat".into(),
    }
}

async fn forbid_all_requests(server: &MockServer) {
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(server)
        .await;
}

/// Holds every signing request open until the caller gives up.
struct PendingWallet {
    account: AccountAddress,
}

#[async_trait]
impl WalletAgent for PendingWallet {
    async fn current_account(&self) -> Option<AccountAddress> {
        Some(self.account)
    }

    async fn sign_message(
        &self,
        _account: AccountAddress,
        _message: &str,
    ) -> Result<WalletSignature, WalletError> {
        std::future::pending().await
    }
}

/// Refuses every signing request.
struct DecliningWallet {
    account: AccountAddress,
}

#[async_trait]
impl WalletAgent for DecliningWallet {
    async fn current_account(&self) -> Option<AccountAddress> {
        Some(self.account)
    }

    async fn sign_message(
        &self,
        _account: AccountAddress,
        _message: &str,
    ) -> Result<WalletSignature, WalletError> {
        Err(WalletError::Declined)
    }
}

// ── Pull ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn pull_sends_signed_lowercase_address() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/user/0x19e7e376e7c213b7e7e7e46cc70a5dd086daff2a"))
        .and(query_param(
            "signature",
            "0x62a995391e086fb0a7847277a8b2fc08bee4fb04ae3722b43a6e390741bc43505646c3e531a4c3cacc111b8e8dfd133a2554619b8d5b4ec1e9c897cdda21c6571b",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": {
                "github": "octocat",
                "linkedIn": "in/octocat",
                "google": "octocat@example.com",
                "twitter": "@octocat"
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let sync = sync(&server, Arc::new(LocalWallet::new(key(0x11))));
    assert_eq!(sync.pull().await.unwrap(), Some(profile()));
}

#[tokio::test]
async fn pull_without_profile_is_none() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let sync = sync(&server, Arc::new(LocalWallet::new(key(0x11))));
    assert_eq!(sync.pull().await.unwrap(), None);
}

#[tokio::test]
async fn pull_signature_is_identical_across_calls() {
    // The static challenge makes every pull credential the same.
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .expect(2)
        .mount(&server)
        .await;

    let sync = sync(&server, Arc::new(LocalWallet::new(key(0x22))));
    sync.pull().await.unwrap();
    sync.pull().await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].url.query(), requests[1].url.query());
}

#[tokio::test]
async fn pull_unauthenticated_makes_no_request() {
    let server = MockServer::start().await;
    forbid_all_requests(&server).await;

    let sync = sync(&server, Arc::new(LocalWallet::disconnected()));
    assert!(matches!(
        sync.pull().await,
        Err(BridgeError::Unauthenticated)
    ));
}

#[tokio::test]
async fn pull_declined_makes_no_request() {
    let server = MockServer::start().await;
    forbid_all_requests(&server).await;

    let sync = sync(
        &server,
        Arc::new(DecliningWallet {
            account: key(0x11).address(),
        }),
    );
    assert!(matches!(
        sync.pull().await,
        Err(BridgeError::Wallet(WalletError::Declined))
    ));
}

#[tokio::test]
async fn pull_rejected_signature_surfaces_store_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401).set_body_string("bad signature"))
        .expect(1)
        .mount(&server)
        .await;

    let sync = sync(&server, Arc::new(LocalWallet::new(key(0x11))));
    assert!(matches!(
        sync.pull().await,
        Err(BridgeError::StoreCallFailed(_))
    ));
}

// ── Push ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn push_sends_canonical_data_and_matching_signature() {
    let server = MockServer::start().await;
    let account = key(0x11).address();
    let expected_data =
        r#"{"github":"octocat","google":"octocat@example.com","linkedIn":"in/octocat","twitter":"@octocat"}"#;
    Mock::given(method("POST"))
        .and(path("/user"))
        .and(body_partial_json(serde_json::json!({
            "wallet_address": account.to_string(),
            "data": expected_data,
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let sync = sync(&server, Arc::new(LocalWallet::new(key(0x11))));
    sync.push(&profile()).await.unwrap();

    let requests: Vec<Request> = server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    let signature = WalletSignature::from_hex(body["signature"].as_str().unwrap()).unwrap();
    assert_eq!(recover_address(expected_data, &signature).unwrap(), account);
}

#[tokio::test]
async fn push_unauthenticated_makes_no_request() {
    let server = MockServer::start().await;
    forbid_all_requests(&server).await;

    let sync = sync(&server, Arc::new(LocalWallet::disconnected()));
    assert!(matches!(
        sync.push(&profile()).await,
        Err(BridgeError::Unauthenticated)
    ));
}

#[tokio::test]
async fn abandoned_push_never_writes() {
    let server = MockServer::start().await;
    forbid_all_requests(&server).await;

    let sync = sync(
        &server,
        Arc::new(PendingWallet {
            account: key(0x11).address(),
        }),
    );
    let outcome = tokio::time::timeout(Duration::from_millis(50), sync.push(&profile())).await;
    assert!(outcome.is_err(), "push should still be waiting on the wallet");
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn account_switch_between_pushes_changes_signer() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/user"))
        .respond_with(ResponseTemplate::new(200))
        .expect(2)
        .mount(&server)
        .await;

    let wallet = Arc::new(LocalWallet::new(key(0x11)));
    let sync = sync(&server, wallet.clone());
    sync.push(&profile()).await.unwrap();
    wallet.switch_to(Some(key(0x22)));
    sync.push(&profile()).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    let senders: Vec<String> = requests
        .iter()
        .map(|r| {
            let body: serde_json::Value = serde_json::from_slice(&r.body).unwrap();
            body["wallet_address"].as_str().unwrap().to_string()
        })
        .collect();
    assert_eq!(
        senders,
        vec![key(0x11).address().to_string(), key(0x22).address().to_string()]
    );
}

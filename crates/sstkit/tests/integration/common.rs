//! Shared helpers for the integration tests
//!
//! The SDK surface is process-wide, so every test takes the one mutex and
//! resets the stores it relies on at entry. Mock servers are per-test.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use sstkit::{Config, FixedDateProvider, MemoryStore};
use wiremock::matchers::{method, path, path_regex};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

static SDK: Mutex<()> = Mutex::new(());

/// Frozen instant used wherever a test wants reproducible timestamps.
pub const FIXED_MILLIS: i64 = 1_337_000;

pub fn acquire_sdk() -> MutexGuard<'static, ()> {
    SDK.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Point the stores at fresh in-memory state.
///
/// The first call installs a memory backend for the whole test binary;
/// later calls just clear it.
pub fn reset_stores() {
    sstkit::init_storage(Arc::new(MemoryStore::new()));
    sstkit::data_layer().clear();
    sstkit::cookies().clear();
    sstkit::local_storage().clear();
    sstkit::session_storage().clear();
    sstkit::clear_uuid();
}

/// Mock collection endpoint accepting every `/pc/...` POST with 200.
pub async fn collect_server() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path_regex(r"^/pc/.+"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    server
}

/// Mock diagnostic endpoint answering 200 on `/error/e/{account}`.
pub async fn nexus_server(account: &str) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("/error/e/{account}")))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    server
}

/// Config pointed at the mock collection server with a frozen clock. The
/// diagnostic host points at the same mock, so stray reports never leave
/// the test.
pub fn test_config(account: &str, collect: &MockServer) -> Config {
    Config::new(account)
        .with_domain(collect.uri())
        .with_nexus_host(collect.uri())
        .with_date_provider(FixedDateProvider::at_millis(FIXED_MILLIS))
}

/// Poll until `server` has received at least `n` requests, for sends that
/// happen on a spawned task.
pub async fn wait_for_requests(server: &MockServer, n: usize) -> Vec<Request> {
    for _ in 0..100 {
        let received = server.received_requests().await.unwrap();
        if received.len() >= n {
            return received;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    server.received_requests().await.unwrap()
}

//! Common test utilities and helpers

use std::path::Path;
use std::sync::{Arc, Mutex};

use gymdesk::{Client, MemoryStorage, Navigator, SessionStorage};

/// Token stored in sessions created by [`client_with_token`]
#[allow(dead_code)]
pub const TEST_TOKEN: &str = "9|test-token-0123456789";

/// Load a response fixture
#[allow(dead_code)]
pub fn load_response_fixture(name: &str) -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    let path = Path::new(manifest_dir)
        .join("tests")
        .join("fixtures")
        .join("responses")
        .join(format!("{}.json", name));

    std::fs::read_to_string(&path).unwrap_or_else(|e| {
        panic!(
            "Failed to load response fixture '{}' from {:?}: {}",
            name, path, e
        )
    })
}

/// Navigator that records every route it is sent to
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    routes: Mutex<Vec<String>>,
}

#[allow(dead_code)]
impl RecordingNavigator {
    pub fn routes(&self) -> Vec<String> {
        self.routes.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: &str) {
        self.routes.lock().unwrap().push(route.to_string());
    }
}

/// Client against `base_url` with a stored token and a recording navigator
#[allow(dead_code)]
pub fn client_with_token(base_url: &str) -> (Client, Arc<RecordingNavigator>) {
    let storage = Arc::new(MemoryStorage::new());
    storage.set("auth_token", TEST_TOKEN).unwrap();
    build_client(base_url, storage)
}

/// Client against `base_url` without a session
#[allow(dead_code)]
pub fn anonymous_client(base_url: &str) -> (Client, Arc<RecordingNavigator>) {
    build_client(base_url, Arc::new(MemoryStorage::new()))
}

fn build_client(
    base_url: &str,
    storage: Arc<MemoryStorage>,
) -> (Client, Arc<RecordingNavigator>) {
    let navigator = Arc::new(RecordingNavigator::default());
    let client = Client::builder()
        .base_url(base_url)
        .session_storage(storage)
        .navigator(navigator.clone())
        .build()
        .expect("Failed to build client");
    (client, navigator)
}

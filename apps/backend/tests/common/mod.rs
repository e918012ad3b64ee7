//! Common test utilities and fixtures for integration tests.
//!
//! The service has no external dependencies, so every test builds the real
//! router in-process and drives it through `axum_test::TestServer`.

pub mod fixtures;

use axum::Router;
use axum_test::TestServer;

use quiz_backend::config::Config;
use quiz_backend::{build_router, AppState};

/// Test context holding the router under test.
pub struct TestContext {
    app: Router,
}

impl TestContext {
    /// Create a context with default configuration.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Create a context with a custom configuration.
    pub fn with_config(config: Config) -> Self {
        Self {
            app: build_router(AppState::new(config)),
        }
    }

    /// Start a test server for this context.
    pub fn server(&self) -> TestServer {
        TestServer::new(self.app.clone()).unwrap()
    }
}

// SPDX-FileCopyrightText: 2026 Revlens Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for end-to-end integration testing.
//!
//! `TestHarness` assembles the full review stack: mock collaborators, a temp
//! SQLite database, the analyzer, and the HTTP router. Requests are driven
//! through the router with `tower::ServiceExt::oneshot`.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use tower::ServiceExt;

use revlens_analyzer::{AnalysisPolicy, ReviewAnalyzer};
use revlens_config::model::StorageConfig;
use revlens_core::{ReviewStore, RevlensError};
use revlens_gateway::{GatewayState, build_router};
use revlens_storage::SqliteReviewStore;

use crate::mock_classifier::MockClassifier;
use crate::mock_extractor::MockExtractor;

/// Builder for creating test environments with configurable options.
pub struct TestHarnessBuilder {
    classifier: MockClassifier,
    extractor: MockExtractor,
    policy: AnalysisPolicy,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        Self {
            classifier: MockClassifier::default(),
            extractor: MockExtractor::default(),
            policy: AnalysisPolicy::default(),
        }
    }

    /// Use `classifier` instead of the default (always positive).
    pub fn with_classifier(mut self, classifier: MockClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    /// Use `extractor` instead of the default (one fixed key point).
    pub fn with_extractor(mut self, extractor: MockExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    pub fn with_policy(mut self, policy: AnalysisPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Build the test harness, creating all required subsystems.
    pub async fn build(self) -> Result<TestHarness, RevlensError> {
        let temp_dir =
            tempfile::TempDir::new().map_err(|e| RevlensError::Storage { source: e.into() })?;
        let db_path = temp_dir.path().join("test.db");

        let store = SqliteReviewStore::new(StorageConfig {
            database_path: db_path.to_string_lossy().to_string(),
            wal_mode: true,
        });
        store.initialize().await?;
        let store: Arc<dyn ReviewStore> = Arc::new(store);

        let analyzer = Arc::new(ReviewAnalyzer::new(
            Arc::new(self.classifier.clone()),
            Arc::new(self.extractor.clone()),
            store.clone(),
            self.policy,
        ));
        let router = build_router(GatewayState::new(analyzer.clone()));

        Ok(TestHarness {
            classifier: self.classifier,
            extractor: self.extractor,
            store,
            analyzer,
            router,
            _temp_dir: temp_dir,
        })
    }
}

/// A complete test environment with mock collaborators and temp storage.
pub struct TestHarness {
    /// The mock classifier (shares its call log with the analyzer's copy).
    pub classifier: MockClassifier,
    /// The mock extractor (shares its call log with the analyzer's copy).
    pub extractor: MockExtractor,
    /// SQLite store (temp DB, cleaned up on drop).
    pub store: Arc<dyn ReviewStore>,
    pub analyzer: Arc<ReviewAnalyzer>,
    router: Router,
    /// Temp directory kept alive for cleanup on drop.
    _temp_dir: tempfile::TempDir,
}

impl TestHarness {
    /// Create a new builder for configuring the test harness.
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }

    /// A clone of the router, for tests that build their own requests.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Send `request` through the router and decode the JSON body.
    ///
    /// An empty body decodes as `Value::Null`.
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = match self.router().oneshot(request).await {
            Ok(response) => response,
            Err(never) => match never {},
        };
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap_or_default();
        let body = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
        };
        (status, body)
    }

    /// POST `body` as JSON to `uri`.
    pub async fn post_json(&self, uri: &str, body: serde_json::Value) -> (StatusCode, serde_json::Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()));
        match request {
            Ok(request) => self.send(request).await,
            Err(e) => panic!("invalid test request: {e}"),
        }
    }

    /// GET `uri`.
    pub async fn get(&self, uri: &str) -> (StatusCode, serde_json::Value) {
        match Request::builder().uri(uri).body(Body::empty()) {
            Ok(request) => self.send(request).await,
            Err(e) => panic!("invalid test request: {e}"),
        }
    }

    /// Submit a review through the HTTP boundary.
    pub async fn analyze(&self, review_text: &str) -> (StatusCode, serde_json::Value) {
        self.post_json(
            "/api/analyze-review",
            serde_json::json!({ "review_text": review_text }),
        )
        .await
    }
}

// SPDX-FileCopyrightText: 2026 Revlens Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Review analysis orchestration for Revlens.
//!
//! The [`ReviewAnalyzer`] is the central coordinator that:
//! - Validates submitted review text
//! - Runs the sentiment classifier and key-point extractor concurrently
//! - Substitutes fallbacks when either collaborator is unavailable
//! - Persists the analyzed review and serves the stored list back

pub mod policy;
pub mod shutdown;

use std::sync::Arc;

use revlens_core::RevlensError;
use revlens_core::keypoints::{FAILURE_PLACEHOLDER, UNCONFIGURED_PLACEHOLDER};
use revlens_core::traits::{KeyPointExtractor, ReviewStore, SentimentClassifier};
use revlens_core::types::{HealthStatus, NewReview, Review, Sentiment};
use serde::Serialize;
use tracing::{debug, info, warn};

pub use crate::policy::AnalysisPolicy;

/// Every stored review plus the list length.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewListing {
    pub reviews: Vec<Review>,
    pub count: usize,
}

/// Snapshot of each adapter's `health_check` for health reporting.
///
/// A check that errors is reported as [`HealthStatus::Unhealthy`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentHealth {
    pub database: HealthStatus,
    pub classifier: HealthStatus,
    pub extractor: HealthStatus,
}

/// Coordinates validation, the two model collaborators, and the store.
///
/// Shared across requests behind an `Arc`; holds no per-request state.
pub struct ReviewAnalyzer {
    classifier: Arc<dyn SentimentClassifier>,
    extractor: Arc<dyn KeyPointExtractor>,
    store: Arc<dyn ReviewStore>,
    policy: AnalysisPolicy,
}

impl ReviewAnalyzer {
    pub fn new(
        classifier: Arc<dyn SentimentClassifier>,
        extractor: Arc<dyn KeyPointExtractor>,
        store: Arc<dyn ReviewStore>,
        policy: AnalysisPolicy,
    ) -> Self {
        Self {
            classifier,
            extractor,
            store,
            policy,
        }
    }

    pub fn policy(&self) -> &AnalysisPolicy {
        &self.policy
    }

    pub fn store(&self) -> &Arc<dyn ReviewStore> {
        &self.store
    }

    /// Analyze and persist one review.
    ///
    /// Invalid input fails with [`RevlensError::Validation`] before any
    /// collaborator or store call. Collaborator failures never fail the
    /// request; a store failure does, and nothing is persisted.
    pub async fn analyze(&self, review_text: Option<&str>) -> Result<Review, RevlensError> {
        let text = self.policy.validate(review_text)?;
        let classifier_input = self.policy.classifier_input(text);

        let (sentiment, key_points) =
            tokio::join!(self.classify(classifier_input), self.extract(text));

        let review = self
            .store
            .insert_review(NewReview {
                review_text: text.to_string(),
                sentiment,
                key_points,
            })
            .await?;

        info!(
            id = review.id,
            sentiment = %review.sentiment,
            key_points = review.key_points.len(),
            "review analyzed"
        );
        Ok(review)
    }

    /// Every stored review, newest first.
    pub async fn list_reviews(&self) -> Result<ReviewListing, RevlensError> {
        let reviews = self.store.list_reviews().await?;
        debug!(count = reviews.len(), "reviews listed");
        Ok(ReviewListing {
            count: reviews.len(),
            reviews,
        })
    }

    pub async fn health(&self) -> ComponentHealth {
        let (database, classifier, extractor) = tokio::join!(
            self.store.health_check(),
            self.classifier.health_check(),
            self.extractor.health_check(),
        );
        ComponentHealth {
            database: status_or_unhealthy(database),
            classifier: status_or_unhealthy(classifier),
            extractor: status_or_unhealthy(extractor),
        }
    }

    /// Shut down the store and the collaborators. Errors are logged, not returned.
    pub async fn shutdown(&self) {
        if let Err(e) = self.store.shutdown().await {
            warn!(error = %e, adapter = self.store.name(), "review store shutdown failed");
        }
        if let Err(e) = self.classifier.shutdown().await {
            warn!(error = %e, adapter = self.classifier.name(), "classifier shutdown failed");
        }
        if let Err(e) = self.extractor.shutdown().await {
            warn!(error = %e, adapter = self.extractor.name(), "extractor shutdown failed");
        }
    }

    async fn classify(&self, text: &str) -> Sentiment {
        match self.classifier.classify(text).await {
            Ok(sentiment) => sentiment,
            Err(e) => {
                warn!(error = %e, adapter = self.classifier.name(), "sentiment unavailable, using neutral");
                Sentiment::Neutral
            }
        }
    }

    async fn extract(&self, text: &str) -> Vec<String> {
        let max = self.policy.max_key_points;
        match self.extractor.extract(text, max).await {
            Ok(points) => {
                let mut points = points.into_points();
                points.truncate(max);
                points
            }
            Err(RevlensError::Unconfigured { .. }) => {
                warn!(adapter = self.extractor.name(), "key-point extractor not configured");
                vec![UNCONFIGURED_PLACEHOLDER.to_string()]
            }
            Err(e) => {
                warn!(error = %e, adapter = self.extractor.name(), "key-point extraction failed");
                vec![FAILURE_PLACEHOLDER.to_string()]
            }
        }
    }
}

fn status_or_unhealthy(result: Result<HealthStatus, RevlensError>) -> HealthStatus {
    result.unwrap_or_else(|e| HealthStatus::Unhealthy(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use revlens_test_utils::{MockClassifier, MockExtractor, MockStore};
    use tracing_test::traced_test;

    struct Fixture {
        analyzer: ReviewAnalyzer,
        classifier: MockClassifier,
        extractor: MockExtractor,
        store: Arc<MockStore>,
    }

    fn fixture(classifier: MockClassifier, extractor: MockExtractor) -> Fixture {
        let store = Arc::new(MockStore::new());
        let analyzer = ReviewAnalyzer::new(
            Arc::new(classifier.clone()),
            Arc::new(extractor.clone()),
            store.clone(),
            AnalysisPolicy::default(),
        );
        Fixture {
            analyzer,
            classifier,
            extractor,
            store,
        }
    }

    #[tokio::test]
    async fn analyze_persists_trimmed_text_with_results() {
        let f = fixture(
            MockClassifier::returning(Sentiment::Positive),
            MockExtractor::returning(&["Battery life", "Screen"]),
        );

        let review = f
            .analyzer
            .analyze(Some("  Great battery life, sharp screen.  "))
            .await
            .unwrap();

        assert_eq!(review.review_text, "Great battery life, sharp screen.");
        assert_eq!(review.sentiment, Sentiment::Positive);
        assert_eq!(review.key_points, vec!["Battery life", "Screen"]);
        assert_eq!(f.store.count_reviews().await.unwrap(), 1);
        assert_eq!(
            f.extractor.calls().await,
            vec!["Great battery life, sharp screen."]
        );
    }

    #[tokio::test]
    async fn invalid_input_touches_nothing() {
        let f = fixture(MockClassifier::default(), MockExtractor::default());

        for input in [None, Some("   "), Some("short")] {
            let err = f.analyzer.analyze(input).await.unwrap_err();
            assert!(err.is_client_error());
        }

        assert!(f.classifier.calls().await.is_empty());
        assert!(f.extractor.calls().await.is_empty());
        assert_eq!(f.store.count_reviews().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn classifier_sees_at_most_512_chars() {
        let f = fixture(MockClassifier::default(), MockExtractor::default());
        let long = "é".repeat(700);

        let review = f.analyzer.analyze(Some(&long)).await.unwrap();

        let calls = f.classifier.calls().await;
        assert_eq!(calls[0].chars().count(), 512);
        // The extractor and the store get the full text.
        assert_eq!(f.extractor.calls().await[0].chars().count(), 700);
        assert_eq!(review.review_text.chars().count(), 700);
    }

    #[tokio::test]
    #[traced_test]
    async fn classifier_failure_falls_back_to_neutral() {
        let f = fixture(MockClassifier::failing("timeout"), MockExtractor::default());
        let review = f.analyzer.analyze(Some("Arrived on time, ok.")).await.unwrap();
        assert_eq!(review.sentiment, Sentiment::Neutral);
        assert_eq!(review.key_points, vec!["Mock key point"]);
        assert!(logs_contain("sentiment unavailable"));
    }

    #[tokio::test]
    async fn unconfigured_classifier_gives_neutral() {
        let f = fixture(MockClassifier::unconfigured(), MockExtractor::default());
        let review = f.analyzer.analyze(Some("Absolutely love it!")).await.unwrap();
        assert_eq!(review.sentiment, Sentiment::Neutral);
    }

    #[tokio::test]
    async fn extractor_failure_stores_failure_placeholder() {
        let f = fixture(
            MockClassifier::returning(Sentiment::Negative),
            MockExtractor::failing("503"),
        );
        let review = f.analyzer.analyze(Some("Broke in a week.")).await.unwrap();
        assert_eq!(review.sentiment, Sentiment::Negative);
        assert_eq!(review.key_points, vec![FAILURE_PLACEHOLDER]);
    }

    #[tokio::test]
    async fn unparsable_extractor_output_stores_failure_placeholder() {
        let f = fixture(
            MockClassifier::default(),
            MockExtractor::replying(r#"{"not": "a list"}"#),
        );
        let review = f.analyzer.analyze(Some("Broke in a week.")).await.unwrap();
        assert_eq!(review.key_points, vec![FAILURE_PLACEHOLDER]);
    }

    #[tokio::test]
    async fn unconfigured_extractor_stores_unconfigured_placeholder() {
        let f = fixture(MockClassifier::default(), MockExtractor::unconfigured());
        let review = f.analyzer.analyze(Some("Broke in a week.")).await.unwrap();
        assert_eq!(review.key_points, vec![UNCONFIGURED_PLACEHOLDER]);
    }

    #[tokio::test]
    async fn key_points_never_exceed_five() {
        let f = fixture(
            MockClassifier::default(),
            MockExtractor::replying("1. a\n2. b\n3. c\n4. d\n5. e\n6. f\n7. g"),
        );
        let review = f.analyzer.analyze(Some("Lots to say here.")).await.unwrap();
        assert_eq!(review.key_points, vec!["a", "b", "c", "d", "e"]);
    }

    #[tokio::test]
    async fn store_failure_is_returned() {
        let store = Arc::new(MockStore::broken());
        let analyzer = ReviewAnalyzer::new(
            Arc::new(MockClassifier::default()),
            Arc::new(MockExtractor::default()),
            store,
            AnalysisPolicy::default(),
        );

        let err = analyzer.analyze(Some("Perfectly valid text")).await.unwrap_err();
        assert!(matches!(err, RevlensError::Storage { .. }));
        assert!(analyzer.list_reviews().await.is_err());
    }

    #[tokio::test]
    async fn list_reviews_is_newest_first_with_count() {
        let f = fixture(MockClassifier::default(), MockExtractor::default());
        assert_eq!(
            f.analyzer.list_reviews().await.unwrap(),
            ReviewListing {
                reviews: vec![],
                count: 0
            }
        );

        for text in ["first review text", "second review text", "third review text"] {
            f.analyzer.analyze(Some(text)).await.unwrap();
        }

        let listing = f.analyzer.list_reviews().await.unwrap();
        assert_eq!(listing.count, 3);
        let texts: Vec<&str> = listing
            .reviews
            .iter()
            .map(|r| r.review_text.as_str())
            .collect();
        assert_eq!(
            texts,
            vec!["third review text", "second review text", "first review text"]
        );
        assert_eq!(f.analyzer.list_reviews().await.unwrap(), listing);
    }

    #[tokio::test]
    async fn health_comes_from_each_adapter_check() {
        let f = fixture(MockClassifier::unconfigured(), MockExtractor::default());
        let health = f.analyzer.health().await;
        assert_eq!(health.database, HealthStatus::Healthy);
        assert!(matches!(health.classifier, HealthStatus::Degraded(_)));
        assert_eq!(health.extractor, HealthStatus::Healthy);

        let f = fixture(MockClassifier::default(), MockExtractor::unconfigured());
        let health = f.analyzer.health().await;
        assert_eq!(health.classifier, HealthStatus::Healthy);
        assert!(matches!(health.extractor, HealthStatus::Degraded(_)));

        f.store.set_broken(true);
        assert!(matches!(
            f.analyzer.health().await.database,
            HealthStatus::Unhealthy(_)
        ));
    }

    #[tokio::test]
    async fn works_against_sqlite_store() {
        use revlens_config::model::StorageConfig;
        use revlens_storage::SqliteReviewStore;

        let dir = tempfile::tempdir().unwrap();
        let store = SqliteReviewStore::new(StorageConfig {
            database_path: dir.path().join("analyzer.db").to_string_lossy().into_owned(),
            wal_mode: true,
        });
        store.initialize().await.unwrap();

        let analyzer = ReviewAnalyzer::new(
            Arc::new(MockClassifier::returning(Sentiment::Positive)),
            Arc::new(MockExtractor::returning(&["a", "b"])),
            Arc::new(store),
            AnalysisPolicy::default(),
        );

        let stored = analyzer.analyze(Some("Great value for money")).await.unwrap();
        assert_eq!(stored.key_points, vec!["a", "b"]);
        let listing = analyzer.list_reviews().await.unwrap();
        assert_eq!(listing.reviews, vec![stored]);
        analyzer.shutdown().await;
    }
}

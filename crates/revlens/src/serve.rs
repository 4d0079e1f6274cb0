// SPDX-FileCopyrightText: 2026 Revlens Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `revlens serve` and `revlens init-db` command implementations.
//!
//! Serve wires the SQLite store, the Hugging Face classifier and the Gemini
//! extractor into a [`ReviewAnalyzer`], then runs the HTTP gateway until
//! SIGINT or SIGTERM.

use std::sync::Arc;

use revlens_analyzer::{AnalysisPolicy, ReviewAnalyzer, shutdown};
use revlens_config::model::RevlensConfig;
use revlens_core::{HealthStatus, PluginAdapter, ReviewStore, RevlensError};
use revlens_gateway::{GatewayState, ServerConfig, start_server};
use revlens_gemini::GeminiExtractor;
use revlens_huggingface::HuggingFaceClassifier;
use revlens_storage::SqliteReviewStore;
use tracing::{info, warn};

/// Runs the `revlens serve` command.
pub async fn run_serve(config: RevlensConfig) -> Result<(), RevlensError> {
    info!(version = env!("CARGO_PKG_VERSION"), "starting revlens serve");

    let store = open_store(&config).await?;

    let classifier = HuggingFaceClassifier::new(&config.sentiment)?;
    if ready(&classifier).await {
        info!(model = classifier.model(), "sentiment classifier configured");
    } else {
        warn!("no Hugging Face token configured, every review will be neutral");
    }

    let extractor = GeminiExtractor::new(&config.gemini)?;
    if ready(&extractor).await {
        info!(model = extractor.model(), "key-point extractor configured");
    } else {
        warn!("no Gemini API key configured, key points will be a placeholder");
    }

    let analyzer = Arc::new(ReviewAnalyzer::new(
        Arc::new(classifier),
        Arc::new(extractor),
        store,
        AnalysisPolicy::from(&config.analysis),
    ));

    let cancel = shutdown::install_signal_handler();
    let server_config = ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
    };
    let result = start_server(&server_config, GatewayState::new(analyzer.clone()), cancel).await;

    analyzer.shutdown().await;
    info!("revlens stopped");
    result
}

/// Runs the `revlens init-db` command: create the schema and exit.
pub async fn run_init_db(config: &RevlensConfig) -> Result<(), RevlensError> {
    let store = open_store(config).await?;
    let count = store.count_reviews().await?;
    info!(count, "database ready");
    println!("database ready ({count} reviews)");
    store.shutdown().await
}

async fn ready(adapter: &dyn PluginAdapter) -> bool {
    matches!(adapter.health_check().await, Ok(HealthStatus::Healthy))
}

async fn open_store(config: &RevlensConfig) -> Result<Arc<dyn ReviewStore>, RevlensError> {
    let store = SqliteReviewStore::new(config.storage.clone());
    store.initialize().await?;
    info!(path = %store.path(), "review store initialized");
    Ok(Arc::new(store))
}

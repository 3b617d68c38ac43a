use serde::Serialize;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

use super::error::LoadError;
use super::fallback::fallback_document;
use super::models::PredictionDocument;
use super::source::PredictionSource;

/// What to show when the predictions cannot be loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Render the built-in fallback document
    Fallback,
    /// Render nothing and mark every container with an error placeholder
    Placeholder,
}

/// Result of one load cycle. Never an unrecoverable error.
#[derive(Debug)]
pub enum LoadOutcome {
    Loaded(PredictionDocument),
    Fallback {
        document: PredictionDocument,
        cause: LoadError,
    },
    Failed(LoadError),
}

impl LoadOutcome {
    pub fn document(&self) -> Option<&PredictionDocument> {
        match self {
            LoadOutcome::Loaded(doc) => Some(doc),
            LoadOutcome::Fallback { document, .. } => Some(document),
            LoadOutcome::Failed(_) => None,
        }
    }

    pub fn error(&self) -> Option<&LoadError> {
        match self {
            LoadOutcome::Loaded(_) => None,
            LoadOutcome::Fallback { cause, .. } => Some(cause),
            LoadOutcome::Failed(e) => Some(e),
        }
    }

    /// "remote" | "fallback" | "unavailable"
    pub fn source_label(&self) -> &'static str {
        match self {
            LoadOutcome::Loaded(_) => "remote",
            LoadOutcome::Fallback { .. } => "fallback",
            LoadOutcome::Failed(_) => "unavailable",
        }
    }
}

/// Loads predictions from a source, applying the failure policy.
///
/// Loads through the same `Loader` (and its clones) never overlap: a second
/// caller waits for the in-flight load to finish before starting its own.
#[derive(Clone)]
pub struct Loader {
    source: Arc<dyn PredictionSource>,
    policy: FailurePolicy,
    in_flight: Arc<Mutex<()>>,
}

impl Loader {
    pub fn new(source: Arc<dyn PredictionSource>, policy: FailurePolicy) -> Self {
        Loader {
            source,
            policy,
            in_flight: Arc::new(Mutex::new(())),
        }
    }

    pub fn policy(&self) -> FailurePolicy {
        self.policy
    }

    pub async fn load(&self) -> LoadOutcome {
        let _guard = self.in_flight.lock().await;

        match self.fetch_document().await {
            Ok(doc) => {
                info!(
                    "Loaded {} {}-shaped predictions from {}",
                    doc.teams.len(),
                    doc.teams.shape(),
                    self.source.location()
                );
                if doc.teams.is_empty() {
                    warn!("Predictions document from {} lists no teams", self.source.location());
                }
                log_model_info(&doc);
                LoadOutcome::Loaded(doc)
            }
            Err(cause) => match self.policy {
                FailurePolicy::Fallback => {
                    warn!("Loading fallback predictions: {}", cause);
                    let document = fallback_document();
                    log_model_info(&document);
                    LoadOutcome::Fallback { document, cause }
                }
                FailurePolicy::Placeholder => {
                    error!("Failed to load predictions: {}", cause);
                    LoadOutcome::Failed(cause)
                }
            },
        }
    }

    async fn fetch_document(&self) -> Result<PredictionDocument, LoadError> {
        let body = self.source.fetch().await?;
        Ok(PredictionDocument::from_json(&body)?)
    }
}

fn log_model_info(doc: &PredictionDocument) {
    let Some(model) = &doc.model_info else {
        return;
    };
    info!(
        "Model: {} (accuracy {}), top features: [{}]",
        model.title().unwrap_or("unknown"),
        model
            .accuracy
            .map(|a| format!("{:.1}%", a * 100.0))
            .unwrap_or_else(|| "n/a".to_string()),
        model.feature_names().join(", ")
    );
}

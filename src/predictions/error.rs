use thiserror::Error;

use super::models::DocumentShape;

/// Why a load could not produce a prediction document.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Transport or filesystem failure: the resource could not be reached.
    #[error("failed to fetch {location}: {reason}")]
    Fetch { location: String, reason: String },

    /// The resource answered, but not with a 2xx status.
    #[error("{location} answered with status {status}")]
    BadStatus { location: String, status: u16 },

    /// The body was not a well-formed document of a recognized shape.
    #[error("could not parse predictions: {0}")]
    Parse(#[from] DocumentError),
}

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("document carries both conference lists and a `predictions` list")]
    Ambiguous,

    #[error("document carries no team list")]
    NoTeams,

    #[error("`schema` declares {declared} but the document carries the other shape's lists")]
    Mixed { declared: DocumentShape },
}

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use tracing::warn;

use super::error::DocumentError;

/// A predictions file as published by the model pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionDocument {
    /// ISO 8601 timestamp of the model run
    pub last_updated: Option<String>,
    pub model_info: Option<ModelInfo>,
    pub teams: TeamTable,
}

/// Which of the two accepted team-list layouts a document uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentShape {
    /// `eastern` / `western` lists, probability already 0.0–1.0
    Conference,
    /// a single `predictions` list tagged by division, probability 0–100
    Division,
}

impl fmt::Display for DocumentShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentShape::Conference => write!(f, "conference"),
            DocumentShape::Division => write!(f, "division"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TeamTable {
    Conference {
        eastern: Vec<ConferenceEntry>,
        western: Vec<ConferenceEntry>,
    },
    Division(Vec<DivisionEntry>),
}

impl TeamTable {
    pub fn shape(&self) -> DocumentShape {
        match self {
            TeamTable::Conference { .. } => DocumentShape::Conference,
            TeamTable::Division(_) => DocumentShape::Division,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            TeamTable::Conference { eastern, western } => eastern.len() + western.len(),
            TeamTable::Division(entries) => entries.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Metadata about the model that produced the predictions. Display only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelInfo {
    pub algorithm: Option<String>,
    pub name: Option<String>,
    /// Validation accuracy (0.0–1.0). Producers write either a ratio or a
    /// percentage string such as `"91.33%"`.
    #[serde(default, deserialize_with = "accuracy_ratio")]
    pub accuracy: Option<f64>,
    #[serde(default)]
    pub top_features: Vec<String>,
    #[serde(default)]
    pub features: Vec<String>,
    pub training_date: Option<String>,
    pub season: Option<String>,
    pub training_records: Option<u32>,
}

impl ModelInfo {
    /// Algorithm if given, otherwise the model's name.
    pub fn title(&self) -> Option<&str> {
        self.algorithm.as_deref().or(self.name.as_deref())
    }

    /// Ranked feature names, falling back to the raw feature list.
    pub fn feature_names(&self) -> &[String] {
        if self.top_features.is_empty() {
            &self.features
        } else {
            &self.top_features
        }
    }
}

fn accuracy_ratio<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(parse_accuracy))
}

fn parse_accuracy(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let s = s.trim();
            match s.strip_suffix('%') {
                Some(pct) => pct.trim().parse::<f64>().ok().map(|p| p / 100.0),
                None => s.parse().ok(),
            }
        }
        _ => None,
    };
    if parsed.is_none() {
        warn!("Ignoring unreadable model accuracy {}", value);
    }
    parsed
}

/// Entry of a conference-shaped document.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConferenceEntry {
    pub team: String,
    pub city: Option<String>,
    /// Playoff probability (0.0–1.0)
    pub probability: f64,
    pub wins: u32,
    pub losses: u32,
    pub predicted_seed: Option<u32>,
}

/// Entry of a division-shaped document.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DivisionEntry {
    pub team: String,
    pub city: Option<String>,
    /// e.g. "Atlantic"; unknown or missing tags are dropped during grouping
    pub division: Option<String>,
    pub conference: Option<String>,
    /// Playoff probability as a percentage (0–100)
    pub playoff_probability: f64,
    pub predicted_seed: Option<u32>,
    pub will_make_playoffs: Option<bool>,
    pub stats: TeamStats,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamStats {
    pub wins: u32,
    pub losses: u32,
    pub offensive_rating: Option<f64>,
    pub defensive_rating: Option<f64>,
    pub net_rating: Option<f64>,
}

/// Wire form of the document before its shape is resolved.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDocument {
    schema: Option<DocumentShape>,
    last_updated: Option<String>,
    /// Kept loose so a malformed block is dropped rather than failing the file
    model_info: Option<Value>,
    eastern: Option<Vec<ConferenceEntry>>,
    western: Option<Vec<ConferenceEntry>>,
    predictions: Option<Vec<DivisionEntry>>,
}

impl PredictionDocument {
    /// Parse a predictions file.
    ///
    /// The shape comes from the `schema` field when present; otherwise it is
    /// read off which team lists the document carries. A document carrying
    /// both layouts, or neither, is rejected.
    pub fn from_json(body: &str) -> Result<Self, DocumentError> {
        let raw: RawDocument = serde_json::from_str(body)?;

        let has_conference = raw.eastern.is_some() || raw.western.is_some();
        let has_division = raw.predictions.is_some();

        let shape = match (raw.schema, has_conference, has_division) {
            (Some(declared @ DocumentShape::Conference), _, true)
            | (Some(declared @ DocumentShape::Division), true, _) => {
                return Err(DocumentError::Mixed { declared })
            }
            (Some(declared), _, _) => declared,
            (None, true, true) => return Err(DocumentError::Ambiguous),
            (None, true, false) => DocumentShape::Conference,
            (None, false, true) => DocumentShape::Division,
            (None, false, false) => return Err(DocumentError::NoTeams),
        };

        let teams = match shape {
            DocumentShape::Conference => {
                if !has_conference {
                    return Err(DocumentError::NoTeams);
                }
                TeamTable::Conference {
                    eastern: raw.eastern.unwrap_or_default(),
                    western: raw.western.unwrap_or_default(),
                }
            }
            DocumentShape::Division => {
                TeamTable::Division(raw.predictions.ok_or(DocumentError::NoTeams)?)
            }
        };

        let model_info = raw.model_info.and_then(|value| {
            serde_json::from_value::<ModelInfo>(value)
                .map_err(|e| warn!("Ignoring unreadable modelInfo: {}", e))
                .ok()
        });

        Ok(PredictionDocument {
            last_updated: raw.last_updated,
            model_info,
            teams,
        })
    }
}

/// A team ready for grouping and display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamEntry {
    pub team: String,
    pub city: Option<String>,
    /// Playoff probability, always within 0.0–1.0
    pub probability: f64,
    pub wins: u32,
    pub losses: u32,
    pub predicted_seed: Option<u32>,
    pub net_rating: Option<f64>,
}

impl TeamEntry {
    /// `wins / (wins + losses)`, or `None` before any game is played.
    pub fn win_pct(&self) -> Option<f64> {
        let games = u64::from(self.wins) + u64::from(self.losses);
        if games == 0 {
            None
        } else {
            Some(self.wins as f64 / games as f64)
        }
    }
}

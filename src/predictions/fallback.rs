//! Built-in conference-shaped document served when the real predictions
//! cannot be loaded under [`FailurePolicy::Fallback`](super::FailurePolicy).

use super::models::{ConferenceEntry, ModelInfo, PredictionDocument, TeamTable};

const LAST_UPDATED: &str = "2026-02-19T12:00:00Z";

/// (team, city, probability, wins, losses)
type Row = (&'static str, &'static str, f64, u32, u32);

const EASTERN: [Row; 15] = [
    ("Boston Celtics", "Boston", 0.95, 48, 18),
    ("Milwaukee Bucks", "Milwaukee", 0.92, 46, 20),
    ("Philadelphia 76ers", "Philadelphia", 0.88, 44, 22),
    ("Cleveland Cavaliers", "Cleveland", 0.85, 42, 24),
    ("New York Knicks", "New York", 0.78, 40, 26),
    ("Miami Heat", "Miami", 0.72, 38, 28),
    ("Indiana Pacers", "Indiana", 0.65, 36, 30),
    ("Orlando Magic", "Orlando", 0.58, 34, 32),
    ("Atlanta Hawks", "Atlanta", 0.42, 32, 34),
    ("Chicago Bulls", "Chicago", 0.38, 30, 36),
    ("Brooklyn Nets", "Brooklyn", 0.28, 28, 38),
    ("Toronto Raptors", "Toronto", 0.22, 26, 40),
    ("Charlotte Hornets", "Charlotte", 0.15, 24, 42),
    ("Washington Wizards", "Washington", 0.08, 20, 46),
    ("Detroit Pistons", "Detroit", 0.05, 18, 48),
];

const WESTERN: [Row; 15] = [
    ("Denver Nuggets", "Denver", 0.96, 50, 16),
    ("Oklahoma City Thunder", "Oklahoma City", 0.94, 48, 18),
    ("LA Clippers", "Los Angeles", 0.90, 46, 20),
    ("Phoenix Suns", "Phoenix", 0.87, 44, 22),
    ("Sacramento Kings", "Sacramento", 0.81, 42, 24),
    ("Minnesota Timberwolves", "Minnesota", 0.75, 40, 26),
    ("Dallas Mavericks", "Dallas", 0.68, 38, 28),
    ("Golden State Warriors", "Golden State", 0.62, 36, 30),
    ("Los Angeles Lakers", "Los Angeles", 0.55, 34, 32),
    ("New Orleans Pelicans", "New Orleans", 0.45, 32, 34),
    ("Houston Rockets", "Houston", 0.35, 30, 36),
    ("Utah Jazz", "Utah", 0.25, 28, 38),
    ("Memphis Grizzlies", "Memphis", 0.18, 26, 40),
    ("Portland Trail Blazers", "Portland", 0.12, 22, 44),
    ("San Antonio Spurs", "San Antonio", 0.06, 18, 48),
];

fn entries(rows: &[Row]) -> Vec<ConferenceEntry> {
    rows.iter()
        .map(|&(team, city, probability, wins, losses)| ConferenceEntry {
            team: team.to_string(),
            city: Some(city.to_string()),
            probability,
            wins,
            losses,
            predicted_seed: None,
        })
        .collect()
}

pub fn fallback_document() -> PredictionDocument {
    PredictionDocument {
        last_updated: Some(LAST_UPDATED.to_string()),
        model_info: Some(ModelInfo {
            algorithm: Some("VotingEnsemble".to_string()),
            accuracy: Some(0.89),
            top_features: vec![
                "Defensive Rating".to_string(),
                "Three Point %".to_string(),
                "Win %".to_string(),
            ],
            ..Default::default()
        }),
        teams: TeamTable::Conference {
            eastern: entries(&EASTERN),
            western: entries(&WESTERN),
        },
    }
}

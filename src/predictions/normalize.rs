//! Turn a predictions document into per-group, probability-ordered team lists.
//!
//! Everything here is pure: no I/O and no logging. Entries that cannot be
//! placed in a group are returned in [`Normalized::dropped`] so the caller
//! decides how loudly to report them.

use serde::Serialize;
use std::collections::BTreeMap;

use super::group::Group;
use super::models::{ConferenceEntry, DivisionEntry, PredictionDocument, TeamEntry, TeamTable};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Normalized {
    /// Every group of the document's shape, each sorted by descending probability
    pub groups: BTreeMap<Group, Vec<TeamEntry>>,
    /// Entries whose division tag matched no known group
    pub dropped: Vec<DroppedEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DroppedEntry {
    pub team: String,
    pub division: Option<String>,
}

pub fn normalize(doc: &PredictionDocument) -> Normalized {
    let mut groups: BTreeMap<Group, Vec<TeamEntry>> = BTreeMap::new();
    let mut dropped = Vec::new();

    match &doc.teams {
        TeamTable::Conference { eastern, western } => {
            groups.insert(Group::Eastern, eastern.iter().map(from_conference).collect());
            groups.insert(Group::Western, western.iter().map(from_conference).collect());
        }
        TeamTable::Division(entries) => {
            for group in Group::DIVISIONS {
                groups.insert(group, Vec::new());
            }
            for entry in entries {
                match entry.division.as_deref().and_then(Group::from_division) {
                    Some(group) => groups.entry(group).or_default().push(from_division(entry)),
                    None => dropped.push(DroppedEntry {
                        team: entry.team.clone(),
                        division: entry.division.clone(),
                    }),
                }
            }
        }
    }

    for teams in groups.values_mut() {
        sort_by_probability(teams);
    }

    Normalized { groups, dropped }
}

/// Descending by probability; `sort_by` is stable so ties keep input order.
fn sort_by_probability(teams: &mut [TeamEntry]) {
    teams.sort_by(|a, b| b.probability.total_cmp(&a.probability));
}

fn clamp_probability(p: f64) -> f64 {
    if p.is_nan() {
        0.0
    } else {
        p.clamp(0.0, 1.0)
    }
}

fn from_conference(entry: &ConferenceEntry) -> TeamEntry {
    TeamEntry {
        team: entry.team.clone(),
        city: entry.city.clone(),
        probability: clamp_probability(entry.probability),
        wins: entry.wins,
        losses: entry.losses,
        predicted_seed: entry.predicted_seed,
        net_rating: None,
    }
}

fn from_division(entry: &DivisionEntry) -> TeamEntry {
    TeamEntry {
        team: entry.team.clone(),
        city: entry.city.clone(),
        probability: clamp_probability(entry.playoff_probability / 100.0),
        wins: entry.stats.wins,
        losses: entry.stats.losses,
        predicted_seed: entry.predicted_seed,
        net_rating: entry.stats.net_rating,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predictions::fallback::fallback_document;
    use crate::predictions::models::TeamStats;

    fn division_entry(team: &str, division: &str, pct: f64) -> DivisionEntry {
        DivisionEntry {
            team: team.into(),
            city: None,
            division: Some(division.into()),
            conference: None,
            playoff_probability: pct,
            predicted_seed: None,
            will_make_playoffs: None,
            stats: TeamStats {
                wins: 30,
                losses: 30,
                ..Default::default()
            },
        }
    }

    fn division_doc(entries: Vec<DivisionEntry>) -> PredictionDocument {
        PredictionDocument {
            last_updated: None,
            model_info: None,
            teams: TeamTable::Division(entries),
        }
    }

    fn assert_descending(groups: &BTreeMap<Group, Vec<TeamEntry>>) {
        for (group, teams) in groups {
            for pair in teams.windows(2) {
                assert!(
                    pair[0].probability >= pair[1].probability,
                    "{:?}: {} ({}) before {} ({})",
                    group,
                    pair[0].team,
                    pair[0].probability,
                    pair[1].team,
                    pair[1].probability
                );
            }
        }
    }

    #[test]
    fn test_division_partition_covers_recognized_entries() {
        let entries = vec![
            division_entry("Boston Celtics", "Atlantic", 95.0),
            division_entry("Cleveland Cavaliers", "Central", 90.0),
            division_entry("Mystery Team", "Midwest", 50.0),
            division_entry("Denver Nuggets", "northwest", 88.0),
            division_entry("New York Knicks", "Atlantic", 80.0),
            division_entry("Phoenix Suns", "Pacific Division", 70.0),
        ];
        let out = normalize(&division_doc(entries.clone()));

        assert_eq!(out.groups.len(), 6);
        let mut placed: Vec<&str> = out
            .groups
            .values()
            .flatten()
            .map(|t| t.team.as_str())
            .collect();
        placed.sort_unstable();
        let mut expected: Vec<&str> = entries
            .iter()
            .filter(|e| e.team != "Mystery Team")
            .map(|e| e.team.as_str())
            .collect();
        expected.sort_unstable();
        assert_eq!(placed, expected);

        assert_eq!(out.dropped.len(), 1);
        assert_eq!(out.dropped[0].team, "Mystery Team");
        assert_eq!(out.dropped[0].division.as_deref(), Some("Midwest"));
        assert_eq!(out.groups[&Group::Atlantic].len(), 2);
        assert!(out.groups[&Group::Southwest].is_empty());
    }

    #[test]
    fn test_missing_division_is_dropped() {
        let mut entry = division_entry("Nowhere FC", "Atlantic", 10.0);
        entry.division = None;
        let out = normalize(&division_doc(vec![entry]));
        assert_eq!(out.dropped.len(), 1);
        assert!(out.groups.values().all(Vec::is_empty));
    }

    #[test]
    fn test_groups_sorted_descending() {
        let entries = vec![
            division_entry("A", "Atlantic", 10.0),
            division_entry("B", "Atlantic", 90.0),
            division_entry("C", "Atlantic", 40.0),
            division_entry("D", "Pacific", 5.0),
            division_entry("E", "Pacific", 55.0),
        ];
        let out = normalize(&division_doc(entries));
        assert_descending(&out.groups);
        let order: Vec<&str> = out.groups[&Group::Atlantic]
            .iter()
            .map(|t| t.team.as_str())
            .collect();
        assert_eq!(order, ["B", "C", "A"]);

        assert_descending(&normalize(&fallback_document()).groups);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let entries = vec![
            division_entry("First", "Central", 60.0),
            division_entry("Top", "Central", 75.0),
            division_entry("Second", "Central", 60.0),
            division_entry("Third", "Central", 60.0),
        ];
        let out = normalize(&division_doc(entries));
        let order: Vec<&str> = out.groups[&Group::Central]
            .iter()
            .map(|t| t.team.as_str())
            .collect();
        assert_eq!(order, ["Top", "First", "Second", "Third"]);
    }

    #[test]
    fn test_probability_scales_agree_across_shapes() {
        let conference = PredictionDocument {
            last_updated: None,
            model_info: None,
            teams: TeamTable::Conference {
                eastern: vec![],
                western: vec![ConferenceEntry {
                    team: "Sacramento Kings".into(),
                    city: Some("Sacramento".into()),
                    probability: 0.81,
                    wins: 42,
                    losses: 24,
                    predicted_seed: None,
                }],
            },
        };
        let division = division_doc(vec![division_entry("Sacramento Kings", "Pacific", 81.0)]);

        let a = normalize(&conference).groups[&Group::Western][0].probability;
        let b = normalize(&division).groups[&Group::Pacific][0].probability;
        assert_eq!(a, b);
        assert_eq!(a, 0.81);
    }

    #[test]
    fn test_out_of_range_probabilities_are_clamped() {
        let out = normalize(&division_doc(vec![
            division_entry("Over", "Southeast", 140.0),
            division_entry("Under", "Southeast", -3.0),
        ]));
        let teams = &out.groups[&Group::Southeast];
        assert_eq!(teams[0].probability, 1.0);
        assert_eq!(teams[1].probability, 0.0);
    }

    #[test]
    fn test_conference_document_keeps_two_groups() {
        let out = normalize(&fallback_document());
        assert_eq!(
            out.groups.keys().copied().collect::<Vec<_>>(),
            Group::CONFERENCES.to_vec()
        );
        assert!(out.dropped.is_empty());
        assert_eq!(out.groups[&Group::Eastern].len(), 15);
        assert_eq!(out.groups[&Group::Western].len(), 15);
    }
}

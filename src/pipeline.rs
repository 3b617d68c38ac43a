use tracing::{info, warn};

use crate::predictions::{normalize, LoadOutcome, Loader, Normalized};
use crate::render::{
    format_timestamp, render, render_placeholder, FillAnimation, Page, PageMeta, RenderHook,
    Variant, LOAD_FAILED_MESSAGE,
};

/// Shown when the loaded document has no group this page can display.
pub const NO_MATCHING_GROUPS_MESSAGE: &str = "No predictions available for this view.";

/// One full load → normalize → render pass.
#[derive(Debug)]
pub struct Cycle {
    pub outcome: LoadOutcome,
    /// `None` when the load failed and placeholders were rendered
    pub normalized: Option<Normalized>,
    pub page: Page,
    pub meta: PageMeta,
}

impl Cycle {
    pub fn html(&self) -> String {
        self.page.to_html(&self.meta)
    }
}

pub async fn run(loader: &Loader, variant: Variant, animate: bool) -> Cycle {
    let outcome = loader.load().await;
    let mut page = Page::new(variant);
    let mut meta = PageMeta {
        source: outcome.source_label(),
        ..Default::default()
    };

    let normalized = match outcome.document() {
        Some(doc) => {
            let normalized = normalize(doc);
            for dropped in &normalized.dropped {
                warn!(
                    "Dropping {}: unknown division {:?}",
                    dropped.team,
                    dropped.division.as_deref().unwrap_or("<missing>")
                );
            }

            let fill = FillAnimation::default();
            let hooks: Vec<&dyn RenderHook> = if animate {
                vec![&fill as &dyn RenderHook]
            } else {
                Vec::new()
            };
            let rendered = render(&normalized.groups, &mut page.containers, &hooks);
            if rendered == 0 {
                warn!(
                    "{} document has no groups for the {:?} page",
                    doc.teams.shape(),
                    variant
                );
                render_placeholder(&mut page.containers, NO_MATCHING_GROUPS_MESSAGE);
            }

            if let Some(raw) = &doc.last_updated {
                match format_timestamp(raw) {
                    Some(ts) => {
                        info!("Predictions last updated: {}", ts);
                        meta.last_updated = Some(ts);
                    }
                    None => warn!("Ignoring unparsable lastUpdated {:?}", raw),
                }
            }
            meta.model = doc.model_info.clone();
            Some(normalized)
        }
        None => {
            render_placeholder(&mut page.containers, LOAD_FAILED_MESSAGE);
            None
        }
    };

    Cycle {
        outcome,
        normalized,
        page,
        meta,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predictions::{source_for, FailurePolicy, Group};
    use std::path::PathBuf;

    fn write_temp(name: &str, body: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "playoff-oracle-{}-{}.json",
            name,
            std::process::id()
        ));
        std::fs::write(&path, body).unwrap();
        path
    }

    fn loader_for(path: &PathBuf, policy: FailurePolicy) -> Loader {
        Loader::new(source_for(path.to_str().unwrap()).unwrap(), policy)
    }

    #[tokio::test]
    async fn test_malformed_file_renders_fallback() {
        let path = write_temp("malformed", "{ \"eastern\": [");
        let cycle = run(&loader_for(&path, FailurePolicy::Fallback), Variant::Conference, true).await;

        assert_eq!(cycle.meta.source, "fallback");
        let east = &cycle.page.containers[&Group::Eastern];
        assert_eq!(east.elements().len(), 15);
        assert_eq!(east.elements()[0].team, "Boston Celtics");
        assert!(east.placeholder().is_none());
        assert_eq!(
            cycle.meta.last_updated.as_deref(),
            Some("February 19, 2026, 12:00 PM")
        );
        let _ = std::fs::remove_file(path);
    }

    #[tokio::test]
    async fn test_malformed_file_renders_placeholders() {
        let path = write_temp("placeholder", "not json at all");
        let cycle = run(&loader_for(&path, FailurePolicy::Placeholder), Variant::Division, false).await;

        assert!(cycle.normalized.is_none());
        assert_eq!(cycle.page.containers.len(), 6);
        for container in cycle.page.containers.values() {
            assert!(container.elements().is_empty());
            assert_eq!(container.placeholder(), Some(LOAD_FAILED_MESSAGE));
        }
        let _ = std::fs::remove_file(path);
    }

    #[tokio::test]
    async fn test_division_file_renders_rows() {
        let path = write_temp("division", include_str!("../data/division_predictions.json"));
        let cycle = run(&loader_for(&path, FailurePolicy::Placeholder), Variant::Division, false).await;

        assert_eq!(cycle.meta.source, "remote");
        let normalized = cycle.normalized.as_ref().unwrap();
        assert!(normalized.dropped.is_empty());
        for group in Group::DIVISIONS {
            assert_eq!(cycle.page.containers[&group].elements().len(), 5, "{:?}", group);
        }
        let atlantic = cycle.page.containers[&Group::Atlantic].elements();
        assert_eq!(atlantic[0].team, "Boston Celtics");
        assert!(cycle.html().contains(r#"<tbody id="atlantic-division">"#));
        let _ = std::fs::remove_file(path);
    }

    #[tokio::test]
    async fn test_conference_document_on_division_page() {
        let path = write_temp("mismatch", "{ \"eastern\": [], \"western\": [] }");
        let cycle = run(&loader_for(&path, FailurePolicy::Fallback), Variant::Division, false).await;

        assert_eq!(cycle.meta.source, "remote");
        for container in cycle.page.containers.values() {
            assert_eq!(container.placeholder(), Some(NO_MATCHING_GROUPS_MESSAGE));
        }
        let _ = std::fs::remove_file(path);
    }
}

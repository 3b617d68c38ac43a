//! The host page: named containers plus the surrounding document.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Write;

use super::element::{Bar, TeamElement};
use super::Container;
use crate::predictions::models::ModelInfo;
use crate::predictions::{FailurePolicy, Group};

/// Which set of containers the page carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Two conference containers of team cards
    Conference,
    /// Six division containers of table rows
    Division,
}

impl Variant {
    pub fn groups(self) -> &'static [Group] {
        match self {
            Variant::Conference => &Group::CONFERENCES,
            Variant::Division => &Group::DIVISIONS,
        }
    }

    pub fn layout(self) -> Layout {
        match self {
            Variant::Conference => Layout::Cards,
            Variant::Division => Layout::Rows,
        }
    }

    /// Conference pages degrade to sample data, division pages to an error
    /// message.
    pub fn default_policy(self) -> FailurePolicy {
        match self {
            Variant::Conference => FailurePolicy::Fallback,
            Variant::Division => FailurePolicy::Placeholder,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    Cards,
    Rows,
}

/// Container backed by an HTML fragment with a fixed element id.
#[derive(Debug, Clone)]
pub struct HtmlContainer {
    group: Group,
    layout: Layout,
    elements: Vec<TeamElement>,
    placeholder: Option<String>,
}

impl HtmlContainer {
    pub fn new(group: Group, layout: Layout) -> Self {
        HtmlContainer {
            group,
            layout,
            elements: Vec::new(),
            placeholder: Some("Loading predictions…".to_string()),
        }
    }

    #[cfg(test)]
    pub fn elements(&self) -> &[TeamElement] {
        &self.elements
    }

    #[cfg(test)]
    pub fn placeholder(&self) -> Option<&str> {
        self.placeholder.as_deref()
    }

    pub fn to_html(&self) -> String {
        let id = self.group.container_id();
        let mut out = String::new();
        match self.layout {
            Layout::Cards => {
                let _ = writeln!(out, r#"<div class="team-grid" id="{}">"#, id);
                if let Some(msg) = &self.placeholder {
                    let _ = writeln!(out, r#"<p class="error-message">{}</p>"#, escape_html(msg));
                }
                for el in &self.elements {
                    out.push_str(&card_html(el));
                }
                out.push_str("</div>\n");
            }
            Layout::Rows => {
                out.push_str(concat!(
                    r#"<table class="division-table">"#,
                    "<thead><tr><th>#</th><th>Team</th><th>Record</th>",
                    "<th>Win %</th><th>Playoff Probability</th></tr></thead>\n"
                ));
                let _ = writeln!(out, r#"<tbody id="{}">"#, id);
                if let Some(msg) = &self.placeholder {
                    let _ = writeln!(
                        out,
                        r#"<tr><td colspan="5" class="error-message">{}</td></tr>"#,
                        escape_html(msg)
                    );
                }
                for (i, el) in self.elements.iter().enumerate() {
                    out.push_str(&row_html(el, i + 1));
                }
                out.push_str("</tbody></table>\n");
            }
        }
        out
    }
}

impl Container for HtmlContainer {
    fn clear(&mut self) {
        self.elements.clear();
        self.placeholder = None;
    }

    fn append(&mut self, element: TeamElement) {
        self.placeholder = None;
        self.elements.push(element);
    }

    fn show_placeholder(&mut self, message: &str) {
        self.elements.clear();
        self.placeholder = Some(message.to_string());
    }

    fn elements_mut(&mut self) -> &mut [TeamElement] {
        &mut self.elements
    }
}

fn bar_html(bar: &Bar) -> String {
    match bar.fill_delay_ms {
        Some(delay) => format!(
            r#"<div class="probability-bar"><div class="probability-fill" style="width: {:.1}%" data-target="{:.1}" data-delay="{}"></div></div>"#,
            bar.width, bar.target, delay
        ),
        None => format!(
            r#"<div class="probability-bar"><div class="probability-fill" style="width: {:.1}%"></div></div>"#,
            bar.width
        ),
    }
}

fn card_html(el: &TeamElement) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        r#"<div class="team-card {}" data-band="{}">"#,
        el.band.css_class(),
        el.band.as_str()
    );
    out.push_str(r#"  <div class="team-header">"#);
    let _ = write!(out, "<h3>{}</h3>", escape_html(&el.team));
    if let Some(city) = &el.city {
        let _ = write!(out, r#"<p class="team-info">{}</p>"#, escape_html(city));
    }
    out.push_str("</div>\n  ");
    out.push_str(&bar_html(&el.bar));
    let _ = writeln!(out, "\n  <p class=\"probability-text\">{}</p>", el.probability);
    let _ = writeln!(
        out,
        concat!(
            r#"  <div class="team-stats">"#,
            r#"<div class="stat-row"><span class="stat-label-small">Record:</span><span class="stat-value">{}</span></div>"#,
            r#"<div class="stat-row"><span class="stat-label-small">Win %:</span><span class="stat-value">{}</span></div>"#,
            "</div>"
        ),
        el.record, el.win_pct
    );
    out.push_str("</div>\n");
    out
}

fn row_html(el: &TeamElement, rank: usize) -> String {
    let seed = el.seed.map(|s| s as usize).unwrap_or(rank);
    format!(
        concat!(
            r#"<tr class="team-row {}" data-band="{}"><td class="seed">{}</td><td class="team-name">{}</td>"#,
            r#"<td>{}</td><td>{}</td><td class="probability-cell">{}"#,
            r#"<span class="probability-text">{}</span></td></tr>"#,
            "\n"
        ),
        el.band.css_class(),
        el.band.as_str(),
        seed,
        escape_html(&el.team),
        el.record,
        el.win_pct,
        bar_html(&el.bar),
        el.probability
    )
}

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// Document-level details shown around the containers.
#[derive(Debug, Clone, Default)]
pub struct PageMeta {
    /// Already formatted for display
    pub last_updated: Option<String>,
    pub model: Option<ModelInfo>,
    /// "remote" | "fallback" | "unavailable"
    pub source: &'static str,
}

/// A page registering one container per group of its variant.
#[derive(Debug, Clone)]
pub struct Page {
    variant: Variant,
    pub containers: BTreeMap<Group, HtmlContainer>,
}

impl Page {
    pub fn new(variant: Variant) -> Self {
        let layout = variant.layout();
        let containers = variant
            .groups()
            .iter()
            .map(|&g| (g, HtmlContainer::new(g, layout)))
            .collect();
        Page {
            variant,
            containers,
        }
    }

    #[cfg(test)]
    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn to_html(&self, meta: &PageMeta) -> String {
        let mut body = String::new();
        for conference in Group::CONFERENCES {
            let members: Vec<&HtmlContainer> = self
                .containers
                .iter()
                .filter(|(g, _)| g.conference() == conference)
                .map(|(_, c)| c)
                .collect();
            if members.is_empty() {
                continue;
            }
            let _ = writeln!(body, r#"<section class="conference" id="{}-section">"#, conference.container_id());
            let _ = writeln!(body, "<h2>{}</h2>", conference.label());
            for container in members {
                body.push_str(r#"<div class="panel">"#);
                if self.variant == Variant::Division {
                    let _ = write!(body, r#"<div class="panel-header">{}</div>"#, container.group.label());
                }
                body.push('\n');
                body.push_str(&container.to_html());
                body.push_str("</div>\n");
            }
            body.push_str("</section>\n");
        }

        PAGE_HTML
            .replace("{{STATUS}}", &status_html(meta))
            .replace("{{MODEL}}", &model_html(meta.model.as_ref()))
            .replace("{{CONTAINERS}}", &body)
    }
}

fn status_html(meta: &PageMeta) -> String {
    let mut out = String::new();
    match meta.source {
        "fallback" => out.push_str(r#"<span class="badge sample">Sample data</span>"#),
        "unavailable" => out.push_str(r#"<span class="badge offline">Unavailable</span>"#),
        _ => out.push_str(r#"<span class="badge live">Model output</span>"#),
    }
    if let Some(ts) = &meta.last_updated {
        let _ = write!(out, r#"<span class="updated">Last updated {}</span>"#, escape_html(ts));
    }
    out
}

fn model_html(model: Option<&ModelInfo>) -> String {
    let Some(model) = model else {
        return String::new();
    };
    let mut parts = Vec::new();
    if let Some(title) = model.title() {
        parts.push(format!("Model: <strong>{}</strong>", escape_html(title)));
    }
    if let Some(acc) = model.accuracy {
        parts.push(format!("Accuracy: <strong>{:.1}%</strong>", acc * 100.0));
    }
    if let Some(season) = &model.season {
        parts.push(format!("Season: {}", escape_html(season)));
    }
    let features = model.feature_names();
    if !features.is_empty() {
        let names: Vec<String> = features.iter().map(|f| escape_html(f)).collect();
        parts.push(format!("Top features: {}", names.join(", ")));
    }
    if parts.is_empty() {
        return String::new();
    }
    format!(r#"<p class="model-info">{}</p>"#, parts.join(" · "))
}

const PAGE_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>NBA Postseason Oracle</title>
<style>
  :root {
    --bg: #0f1117;
    --card: #1a1d27;
    --border: #2a2d3a;
    --accent: #6c63ff;
    --green: #00c896;
    --amber: #ff9800;
    --red: #ff4f6a;
    --text: #e0e0e0;
    --muted: #8888aa;
  }
  * { box-sizing: border-box; margin: 0; padding: 0; }
  body { background: var(--bg); color: var(--text); font-family: 'Segoe UI', system-ui, sans-serif; }
  header { display: flex; align-items: center; flex-wrap: wrap; gap: 1rem; padding: 1rem 2rem; border-bottom: 1px solid var(--border); }
  header h1 { font-size: 1.4rem; font-weight: 700; }
  .badge { padding: .2rem .6rem; border-radius: 4px; font-size: .75rem; font-weight: 700; text-transform: uppercase; }
  .badge.live { background: var(--green); color: #000; }
  .badge.sample { background: var(--amber); color: #000; }
  .badge.offline { background: var(--red); color: #000; }
  .updated { color: var(--muted); font-size: .8rem; margin-left: auto; }
  .model-info { color: var(--muted); font-size: .85rem; padding: .6rem 2rem; border-bottom: 1px solid var(--border); }
  main { padding: 1.5rem 2rem; display: grid; grid-template-columns: 1fr 1fr; gap: 1.5rem; }
  @media (max-width: 900px) { main { grid-template-columns: 1fr; } }
  .conference h2 { font-size: 1.1rem; margin-bottom: .8rem; }
  .panel { background: var(--card); border: 1px solid var(--border); border-radius: 10px; overflow: hidden; margin-bottom: 1rem; }
  .panel-header { padding: .9rem 1.2rem; border-bottom: 1px solid var(--border); font-weight: 600; }
  .team-grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(220px, 1fr)); gap: .8rem; padding: 1rem; }
  .team-card { border: 1px solid var(--border); border-left: 4px solid var(--muted); border-radius: 8px; padding: .9rem; }
  .team-card h3 { font-size: 1rem; }
  .team-info { color: var(--muted); font-size: .8rem; }
  .high-probability { border-left-color: var(--green); }
  .medium-probability { border-left-color: var(--amber); }
  .low-probability { border-left-color: var(--red); }
  .probability-bar { background: #11131a; border-radius: 4px; height: 8px; margin: .6rem 0 .3rem; overflow: hidden; min-width: 80px; }
  .probability-fill { background: var(--accent); height: 100%; transition: width 1s ease; }
  .high-probability .probability-fill { background: var(--green); }
  .medium-probability .probability-fill { background: var(--amber); }
  .low-probability .probability-fill { background: var(--red); }
  .probability-text { font-weight: 700; font-size: 1.1rem; }
  .stat-row { display: flex; justify-content: space-between; font-size: .8rem; }
  .stat-label-small { color: var(--muted); }
  table { width: 100%; border-collapse: collapse; }
  th { padding: .7rem 1rem; text-align: left; font-size: .75rem; text-transform: uppercase; color: var(--muted); border-bottom: 1px solid var(--border); }
  td { padding: .65rem 1rem; font-size: .88rem; border-bottom: 1px solid #1e2130; }
  tr:last-child td { border-bottom: none; }
  .team-row { border-left: 4px solid transparent; }
  .team-row .probability-text { font-size: .88rem; }
  .error-message { color: var(--red); text-align: center; padding: 2rem; font-size: .9rem; }
</style>
</head>
<body>
<header>
  <h1>🏀 NBA Postseason Oracle</h1>
  {{STATUS}}
</header>
{{MODEL}}
<main>
{{CONTAINERS}}
</main>
<script>
document.querySelectorAll('.probability-fill[data-delay]').forEach(el => {
  setTimeout(() => { el.style.width = el.dataset.target + '%'; }, Number(el.dataset.delay));
});
</script>
</body>
</html>"#;

//! Scripted replay of a page: markup, host answers and user steps in one
//! JSON file.
//!
//! ```json
//! {
//!   "today": "2025-01-15",
//!   "confirm": [true],
//!   "body": [{"tag": "div", "classes": ["todo-card"], "children": [...]}],
//!   "steps": [
//!     {"click": {"target": ".todo-card .delete-btn"}},
//!     {"wait": {"ms": 600}}
//!   ]
//! }
//! ```

use std::path::Path;
use std::time::Duration;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::adapters::{HeadlessBrowser, HostLog};
use crate::config::PageConfig;
use crate::controller::{InitSummary, PageController};
use crate::dom::{Document, El, NodeId};
use crate::error::{PageError, PageResult};
use crate::runtime::{driver, Key, Page};

fn default_true() -> bool {
    true
}

/// A replayable page session.
#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub config: PageConfig,
    /// Date the host reports as today; the local date when absent
    #[serde(default)]
    pub today: Option<NaiveDate>,
    /// Answers for confirm prompts, in order; later prompts are declined
    #[serde(default)]
    pub confirm: Vec<bool>,
    /// Whether the tooltip toolkit is present
    #[serde(default = "default_true")]
    pub tooltips: bool,
    /// Whether navigations and submissions leave the page, ending the run
    #[serde(default = "default_true")]
    pub navigation_commits: bool,
    /// Markup mounted under `<body>`
    pub body: Vec<El>,
    #[serde(default)]
    pub steps: Vec<Step>,
}

/// One user action or pause.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Click { target: String },
    Key { target: String, key: String },
    Input { target: String, value: String },
    Change { target: String, value: String },
    Submit { target: String },
    Wait { ms: u64 },
    Unload,
}

/// Outcome of a replay.
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioReport {
    pub summary: InitSummary,
    pub host: HostLog,
    /// Virtual milliseconds elapsed since load
    pub elapsed_ms: u64,
    pub pending_timers: usize,
    pub unloaded: bool,
    #[serde(skip)]
    pub html: String,
}

impl Scenario {
    pub fn from_json_str(json: &str) -> PageResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> PageResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }
}

/// How waits are carried out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pacing {
    /// Jump the virtual clock; instant.
    Virtual,
    /// Sleep through waits with the tokio driver.
    Realtime,
}

/// Replays a [`Scenario`] against a headless host.
#[derive(Debug)]
pub struct ScenarioRunner {
    pacing: Pacing,
}

impl ScenarioRunner {
    pub fn new(pacing: Pacing) -> Self {
        Self { pacing }
    }

    pub async fn run(&self, scenario: &Scenario) -> PageResult<ScenarioReport> {
        let mut doc = Document::new();
        for markup in &scenario.body {
            doc.mount(doc.body(), markup)?;
        }

        let browser = HeadlessBrowser::new(scenario.confirm.iter().copied(), scenario.today)
            .with_commits(scenario.navigation_commits);
        let mut controller = PageController::new(scenario.config.clone());
        if scenario.tooltips {
            controller = controller.with_tooltips(browser.tooltips());
        }
        let mut page = Page::new(doc, browser.clone());
        let summary = controller.initialize(&mut page)?;

        for (index, step) in scenario.steps.iter().enumerate() {
            let number = index + 1;
            if page.is_unloaded() {
                tracing::warn!("Step {} skipped: page unloaded", number);
                continue;
            }
            tracing::debug!("Step {}: {:?}", number, step);
            self.apply(&mut page, number, step).await?;
        }

        Ok(ScenarioReport {
            summary,
            host: browser.log(),
            elapsed_ms: u64::try_from(page.now().as_millis()).unwrap_or(u64::MAX),
            pending_timers: page.pending_timers(),
            unloaded: page.is_unloaded(),
            html: page.document().outer_html(page.document().root()),
        })
    }

    async fn apply(&self, page: &mut Page, number: usize, step: &Step) -> PageResult<()> {
        match step {
            Step::Click { target } => {
                let node = find(page, number, target)?;
                if page.click(node).is_none() {
                    tracing::info!("Step {}: '{}' is disabled; click ignored", number, target);
                }
            }
            Step::Key { target, key } => {
                let node = find(page, number, target)?;
                page.key_down(node, Key::from_name(key));
            }
            Step::Input { target, value } => {
                let node = find(page, number, target)?;
                page.type_text(node, value);
            }
            Step::Change { target, value } => {
                let node = find(page, number, target)?;
                page.select_value(node, value);
            }
            Step::Submit { target } => {
                let node = find(page, number, target)?;
                if page.document().tag(node) != Some("form") {
                    return Err(PageError::scenario(number, format!("'{target}' is not a form")));
                }
                page.request_submit(node, None);
            }
            Step::Wait { ms } => {
                let span = Duration::from_millis(*ms);
                match self.pacing {
                    Pacing::Virtual => page.advance(span),
                    Pacing::Realtime => driver::run_for(page, span).await,
                }
            }
            Step::Unload => page.unload(),
        }
        Ok(())
    }
}

fn find(page: &Page, number: usize, target: &str) -> PageResult<NodeId> {
    let doc = page.document();
    doc.select(doc.root(), target)?
        .ok_or_else(|| PageError::scenario(number, format!("no element matches '{target}'")))
}

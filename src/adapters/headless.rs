//! Headless host used by the scenario runner.
//!
//! Confirm prompts are answered from a script, and every host interaction is
//! logged and kept for the final report.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use chrono::{Local, NaiveDate};
use serde::Serialize;

use crate::dom::{Document, NodeId};
use crate::runtime::FormSubmission;
use crate::traits::{Browser, Navigation, TooltipProvider};

/// Everything the page asked the host to do.
#[derive(Debug, Clone, Default, Serialize)]
pub struct HostLog {
    pub prompts: Vec<PromptRecord>,
    pub navigations: Vec<String>,
    pub submissions: Vec<FormSubmission>,
    pub tooltips: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PromptRecord {
    pub message: String,
    pub answer: bool,
}

/// Browser without a window.
#[derive(Debug, Clone)]
pub struct HeadlessBrowser {
    answers: Rc<RefCell<VecDeque<bool>>>,
    today: Option<NaiveDate>,
    commits: bool,
    log: Rc<RefCell<HostLog>>,
}

impl HeadlessBrowser {
    /// `answers` are consumed by confirm prompts in order; once exhausted
    /// every prompt is declined. `today` defaults to the local date.
    pub fn new(answers: impl IntoIterator<Item = bool>, today: Option<NaiveDate>) -> Self {
        Self {
            answers: Rc::new(RefCell::new(answers.into_iter().collect())),
            today,
            commits: true,
            log: Rc::new(RefCell::new(HostLog::default())),
        }
    }

    /// Whether navigations and submissions leave the page. On by default,
    /// as in a real browser.
    pub fn with_commits(mut self, commits: bool) -> Self {
        self.commits = commits;
        self
    }

    fn outcome(&self) -> Navigation {
        if self.commits {
            Navigation::Committed
        } else {
            Navigation::Blocked
        }
    }

    /// Snapshot of the interactions so far.
    pub fn log(&self) -> HostLog {
        self.log.borrow().clone()
    }

    /// Tooltip provider that records into the same log.
    pub fn tooltips(&self) -> LoggingTooltips {
        LoggingTooltips {
            log: Rc::clone(&self.log),
        }
    }
}

impl Browser for HeadlessBrowser {
    fn confirm(&mut self, message: &str) -> bool {
        let answer = self.answers.borrow_mut().pop_front().unwrap_or(false);
        tracing::info!("confirm(\"{}\") -> {}", message, answer);
        self.log.borrow_mut().prompts.push(PromptRecord {
            message: message.to_string(),
            answer,
        });
        answer
    }

    fn navigate(&mut self, url: &str) -> Navigation {
        tracing::info!("navigate -> {}", url);
        self.log.borrow_mut().navigations.push(url.to_string());
        self.outcome()
    }

    fn submit_form(&mut self, submission: FormSubmission) -> Navigation {
        tracing::info!(
            "{} {} ({})",
            submission.method,
            if submission.action.is_empty() {
                "<current page>"
            } else {
                submission.action.as_str()
            },
            submission.encoded_body()
        );
        self.log.borrow_mut().submissions.push(submission);
        self.outcome()
    }

    fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }
}

/// Tooltip toolkit stand-in that logs each activation.
#[derive(Debug, Clone)]
pub struct LoggingTooltips {
    log: Rc<RefCell<HostLog>>,
}

impl TooltipProvider for LoggingTooltips {
    fn attach_tooltip(&mut self, document: &Document, element: NodeId) {
        let title = document
            .attr(element, "title")
            .or_else(|| document.attr(element, "data-bs-title"))
            .unwrap_or_default()
            .to_string();
        tracing::debug!("Tooltip attached to {} ('{}')", element, title);
        self.log.borrow_mut().tooltips.push(title);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_answers_then_decline() {
        let mut browser = HeadlessBrowser::new([true], None);
        assert!(browser.confirm("one"));
        assert!(!browser.confirm("two"));
        let log = browser.log();
        assert_eq!(log.prompts.len(), 2);
        assert!(log.prompts[0].answer);
    }

    #[test]
    fn test_fixed_today() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        let browser = HeadlessBrowser::new([], Some(date));
        assert_eq!(browser.today(), date);
    }

    #[test]
    fn test_commits_unless_told_otherwise() {
        let mut browser = HeadlessBrowser::new([], None);
        assert_eq!(browser.navigate("/"), Navigation::Committed);
        let mut held = HeadlessBrowser::new([], None).with_commits(false);
        assert_eq!(held.navigate("/"), Navigation::Blocked);
        assert_eq!(held.log().navigations, vec!["/".to_string()]);
    }
}

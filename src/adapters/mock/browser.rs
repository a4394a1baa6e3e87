//! Recording browser for testing.
//!
//! Answers confirm prompts from a scripted queue and records every
//! navigation and form submission, so tests can assert on what the page
//! asked the host to do.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use chrono::NaiveDate;

use crate::runtime::FormSubmission;
use crate::traits::{Browser, Navigation};

#[derive(Debug)]
struct BrowserState {
    answers: VecDeque<bool>,
    default_answer: bool,
    prompts: Vec<String>,
    navigations: Vec<String>,
    submissions: Vec<FormSubmission>,
    today: NaiveDate,
    commits: bool,
}

/// Mock browser with shared, inspectable state.
///
/// Clones share state: hand one clone to the page and keep another to
/// inspect.
///
/// # Example
///
/// ```ignore
/// use todo_page::adapters::mock::MockBrowser;
///
/// let browser = MockBrowser::new().with_confirm_answers([false, true]);
/// let page = Page::new(document, browser.clone());
/// // ... drive the page ...
/// assert_eq!(browser.prompts().len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct MockBrowser {
    state: Arc<Mutex<BrowserState>>,
}

/// Date reported by [`MockBrowser`] unless overridden.
pub fn default_today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 15).unwrap_or_default()
}

impl MockBrowser {
    /// Create a browser that declines every prompt.
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(BrowserState {
                answers: VecDeque::new(),
                default_answer: false,
                prompts: Vec::new(),
                navigations: Vec::new(),
                submissions: Vec::new(),
                today: default_today(),
                commits: false,
            })),
        }
    }

    /// Queue answers for upcoming confirm prompts.
    pub fn with_confirm_answers(self, answers: impl IntoIterator<Item = bool>) -> Self {
        self.state.lock().unwrap().answers.extend(answers);
        self
    }

    /// Answer used once the queue is exhausted.
    pub fn with_default_answer(self, answer: bool) -> Self {
        self.state.lock().unwrap().default_answer = answer;
        self
    }

    /// Let navigations and submissions commit, unloading the page. By
    /// default the page stays so tests can keep inspecting it.
    pub fn with_committed_navigation(self) -> Self {
        self.state.lock().unwrap().commits = true;
        self
    }

    pub fn with_today(self, today: NaiveDate) -> Self {
        self.state.lock().unwrap().today = today;
        self
    }

    /// Confirm messages shown so far.
    pub fn prompts(&self) -> Vec<String> {
        self.state.lock().unwrap().prompts.clone()
    }

    /// URLs navigated to so far.
    pub fn navigations(&self) -> Vec<String> {
        self.state.lock().unwrap().navigations.clone()
    }

    /// Forms submitted so far.
    pub fn submissions(&self) -> Vec<FormSubmission> {
        self.state.lock().unwrap().submissions.clone()
    }
}

impl Default for MockBrowser {
    fn default() -> Self {
        Self::new()
    }
}

fn outcome(commits: bool) -> Navigation {
    if commits {
        Navigation::Committed
    } else {
        Navigation::Blocked
    }
}

impl Browser for MockBrowser {
    fn confirm(&mut self, message: &str) -> bool {
        let mut state = self.state.lock().unwrap();
        state.prompts.push(message.to_string());
        let fallback = state.default_answer;
        state.answers.pop_front().unwrap_or(fallback)
    }

    fn navigate(&mut self, url: &str) -> Navigation {
        let mut state = self.state.lock().unwrap();
        state.navigations.push(url.to_string());
        outcome(state.commits)
    }

    fn submit_form(&mut self, submission: FormSubmission) -> Navigation {
        let mut state = self.state.lock().unwrap();
        state.submissions.push(submission);
        outcome(state.commits)
    }

    fn today(&self) -> NaiveDate {
        self.state.lock().unwrap().today
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_answers_then_default() {
        let mut browser = MockBrowser::new()
            .with_confirm_answers([true])
            .with_default_answer(false);
        assert!(browser.confirm("first"));
        assert!(!browser.confirm("second"));
        assert_eq!(browser.prompts(), vec!["first", "second"]);
    }

    #[test]
    fn test_clones_share_state() {
        let browser = MockBrowser::new();
        let mut handle = browser.clone();
        handle.navigate("/");
        assert_eq!(browser.navigations(), vec!["/"]);
    }

    #[test]
    fn test_navigation_outcome() {
        let mut staying = MockBrowser::new();
        assert_eq!(staying.navigate("/"), Navigation::Blocked);
        let mut leaving = MockBrowser::new().with_committed_navigation();
        assert_eq!(leaving.navigate("/"), Navigation::Committed);
    }
}

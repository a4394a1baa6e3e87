//! Host browser capabilities.
//!
//! The page never talks to the network itself: deleting, editing and
//! toggling todos all go through native form submission or anchor
//! navigation, which the host carries out.

use chrono::NaiveDate;

use crate::runtime::FormSubmission;

/// What became of a navigation or form submission handed to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// The host left the page; it must be unloaded.
    Committed,
    /// The page stays, e.g. the request failed or was held back.
    Blocked,
}

impl Navigation {
    pub fn is_committed(self) -> bool {
        self == Navigation::Committed
    }
}

/// Capabilities the embedding browser provides to a page.
///
/// # Example
///
/// ```ignore
/// use todo_page::traits::Browser;
///
/// fn delete_with_prompt<B: Browser>(browser: &mut B, title: &str, url: &str) {
///     if browser.confirm(&format!("Delete \"{}\"?", title)) {
///         browser.navigate(url);
///     }
/// }
/// ```
pub trait Browser {
    /// Show a blocking confirmation prompt and report the user's answer.
    fn confirm(&mut self, message: &str) -> bool;

    /// Navigate the page to `url` (HTTP GET).
    fn navigate(&mut self, url: &str) -> Navigation;

    /// Hand a form to the host for submission.
    fn submit_form(&mut self, submission: FormSubmission) -> Navigation;

    /// The user's current local date.
    fn today(&self) -> NaiveDate;
}

//! Common test utilities for integration tests.
//!
//! Page builders over the mock host, plus markup fixtures shaped like the
//! server-rendered todo templates.
//!
//! # Example
//!
//! ```ignore
//! use common::{todo_card, TestPageBuilder};
//!
//! let (mut page, browser) = TestPageBuilder::new()
//!     .with_body(todo_card(1, "Buy milk", false))
//!     .with_confirm_answers([true])
//!     .build();
//! ```

#![allow(dead_code)]

use std::time::Duration;

use todo_page::adapters::mock::{MockBrowser, RecordingTooltips};
use todo_page::{Document, El, InitSummary, NodeId, Page, PageConfig, PageController};

/// Shorthand for a millisecond duration.
pub fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

/// Builder for initialized test pages.
#[derive(Default)]
pub struct TestPageBuilder {
    body: Vec<El>,
    answers: Vec<bool>,
    config: Option<PageConfig>,
    tooltips: Option<RecordingTooltips>,
    commits: bool,
}

impl TestPageBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_body(mut self, markup: El) -> Self {
        self.body.push(markup);
        self
    }

    pub fn with_confirm_answers(mut self, answers: impl IntoIterator<Item = bool>) -> Self {
        self.answers.extend(answers);
        self
    }

    pub fn with_config(mut self, config: PageConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn with_tooltips(mut self, tooltips: RecordingTooltips) -> Self {
        self.tooltips = Some(tooltips);
        self
    }

    /// Let navigations and submissions leave the page.
    pub fn with_committed_navigation(mut self) -> Self {
        self.commits = true;
        self
    }

    /// Mount the markup and wire it, without running any timers.
    pub fn build(self) -> (Page, MockBrowser) {
        let (page, browser, _) = self.build_with_summary();
        (page, browser)
    }

    pub fn build_with_summary(self) -> (Page, MockBrowser, InitSummary) {
        let mut doc = Document::new();
        for markup in &self.body {
            doc.mount(doc.body(), markup).unwrap();
        }
        let mut browser = MockBrowser::new().with_confirm_answers(self.answers);
        if self.commits {
            browser = browser.with_committed_navigation();
        }
        let mut page = Page::new(doc, browser.clone());

        let mut controller = PageController::new(self.config.unwrap_or_default());
        if let Some(tooltips) = self.tooltips {
            controller = controller.with_tooltips(tooltips);
        }
        let summary = controller.initialize(&mut page).unwrap();
        (page, browser, summary)
    }
}

/// First element matching `selector`; panics if there is none.
pub fn find(page: &Page, selector: &str) -> NodeId {
    let doc = page.document();
    doc.select(doc.root(), selector)
        .unwrap()
        .unwrap_or_else(|| panic!("no element matches {selector}"))
}

pub fn find_all(page: &Page, selector: &str) -> Vec<NodeId> {
    let doc = page.document();
    doc.select_all(doc.root(), selector).unwrap()
}

// ----------------------------------------------------------------------
// Fixtures
// ----------------------------------------------------------------------

/// A todo card as rendered on the list page.
pub fn todo_card(id: u32, title: &str, completed: bool) -> El {
    let icon = if completed {
        "bi bi-check-circle-fill"
    } else {
        "bi bi-circle"
    };
    El::new("div")
        .class("card todo-card")
        .attr("data-todo-id", &id.to_string())
        .child(
            El::new("div")
                .class("card-body")
                .child(El::new("h5").class("todo-title").text(title))
                .child(
                    El::new("p")
                        .class("todo-description")
                        .text("Details about the task"),
                ),
        )
        .child(
            El::new("div")
                .class("todo-actions")
                .child(
                    El::new("form")
                        .attr("method", "post")
                        .attr("action", &format!("/todo/{id}/toggle/"))
                        .child(
                            El::new("button")
                                .class("btn btn-sm toggle-btn")
                                .attr("type", "submit")
                                .child(El::new("i").class(icon)),
                        ),
                )
                .child(
                    El::new("a")
                        .class("btn btn-sm btn-outline-danger delete-btn")
                        .attr("href", &format!("/todo/{id}/delete/"))
                        .child(El::new("i").class("bi bi-trash")),
                ),
        )
}

/// A card without a toggle control.
pub fn bare_card(title: &str) -> El {
    El::new("div")
        .class("card todo-card")
        .child(El::new("h5").class("todo-title").text(title))
}

/// The create/edit form.
pub fn todo_form() -> El {
    El::new("form")
        .class("todo-form")
        .attr("method", "post")
        .attr("action", "/todo/new/")
        .child(
            El::new("input")
                .attr("type", "hidden")
                .attr("name", "csrfmiddlewaretoken")
                .attr("value", "token"),
        )
        .child(
            El::new("div")
                .class("mb-3")
                .child(El::new("input").attr("type", "text").attr("name", "title")),
        )
        .child(
            El::new("div")
                .class("mb-3")
                .child(El::new("textarea").attr("name", "description")),
        )
        .child(
            El::new("div").class("mb-3 priority-group").child(
                El::new("select")
                    .attr("name", "priority")
                    .attr("value", "3")
                    .children((1..=5).map(|level: u8| {
                        El::new("option")
                            .attr("value", &level.to_string())
                            .text(&level.to_string())
                    })),
            ),
        )
        .child(
            El::new("div")
                .class("mb-3")
                .child(El::new("input").attr("type", "date").attr("name", "due_date")),
        )
        .child(
            El::new("button")
                .class("btn btn-primary")
                .attr("type", "submit")
                .text("Save Task"),
        )
}

/// The dedicated delete confirmation page.
pub fn delete_confirmation(id: u32, title: &str) -> El {
    El::new("div")
        .class("card delete-card")
        .child(El::new("h4").text(&format!("Delete \"{title}\"?")))
        .child(
            El::new("form")
                .attr("method", "post")
                .attr("action", &format!("/todo/{id}/delete/"))
                .child(
                    El::new("input")
                        .attr("type", "hidden")
                        .attr("name", "csrfmiddlewaretoken")
                        .attr("value", "token"),
                )
                .child(
                    El::new("div")
                        .class("delete-actions")
                        .child(
                            El::new("button")
                                .class("btn btn-danger")
                                .attr("type", "submit")
                                .text("Yes, Delete"),
                        )
                        .child(
                            El::new("a")
                                .class("btn btn-secondary")
                                .attr("href", "/")
                                .text("Cancel"),
                        ),
                ),
        )
}

/// A flash message with the given level tag.
pub fn message(tag: &str, text: &str) -> El {
    El::new("div")
        .class(&format!("alert message message-{tag}"))
        .text(text)
}

/// The priority filter bar with `active` highlighted.
pub fn filter_bar(active: u8) -> El {
    El::new("div")
        .class("priority-filters")
        .children((1..=5u8).map(|level| {
            let class = if level == active {
                "btn priority-btn active"
            } else {
                "btn priority-btn"
            };
            El::new("a")
                .class(class)
                .attr("href", &format!("?priority={level}"))
                .text(&level.to_string())
        }))
        .child(
            El::new("a")
                .class("btn btn-link clear-filter")
                .attr("href", "?")
                .text("Clear"),
        )
}

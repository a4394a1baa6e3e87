//! Page behaviour controller.
//!
//! One controller is constructed per page load and [`PageController::initialize`]
//! wires every component against the page's document:
//!
//! | Component | Module |
//! |-----------|--------|
//! | Tooltip toolkit | [`tooltips`] |
//! | Todo cards | [`cards`] |
//! | Todo forms | [`forms`] |
//! | Priority filters | [`filters`] |
//! | Entrance animations | [`entrance`] |
//! | Delete confirmation | [`confirm`] |
//! | Flash messages | [`messages`] |
//! | Feedback stylesheet | [`styles`] |
//!
//! Components are independent of each other; they share only the document.

pub mod cards;
pub mod confirm;
mod effects;
pub mod entrance;
pub mod filters;
pub mod forms;
pub mod messages;
pub mod styles;
pub mod tooltips;

use std::fmt;

use serde::Serialize;

use crate::config::PageConfig;
use crate::error::{PageError, PageResult};
use crate::runtime::Page;
use crate::traits::TooltipProvider;

pub use cards::{init_todo_interactions, TodoCard};
pub use confirm::{init_confirm_dialogs, ConfirmCounts, ConfirmState, SubmitState};
pub use entrance::init_entrance_animations;
pub use filters::init_priority_filters;
pub use forms::{init_form_enhancements, TodoForm};
pub use messages::init_auto_hide_messages;
pub use styles::{install_stylesheet, STYLESHEET};
pub use tooltips::attach_tooltips;

/// What [`PageController::initialize`] wired.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct InitSummary {
    pub stylesheet_installed: bool,
    pub tooltips: usize,
    pub cards: usize,
    pub forms: usize,
    pub filter_controls: usize,
    pub stat_cards: usize,
    pub confirmation_page_buttons: usize,
    pub inline_delete_buttons: usize,
    pub messages: usize,
}

/// Wires page behaviours onto a loaded page.
pub struct PageController {
    config: PageConfig,
    tooltips: Option<Box<dyn TooltipProvider>>,
    initialized: bool,
}

impl fmt::Debug for PageController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageController")
            .field("config", &self.config)
            .field("tooltips", &self.tooltips.is_some())
            .field("initialized", &self.initialized)
            .finish()
    }
}

impl PageController {
    /// Create a controller without a tooltip toolkit.
    pub fn new(config: PageConfig) -> Self {
        Self {
            config,
            tooltips: None,
            initialized: false,
        }
    }

    /// Provide the tooltip toolkit.
    pub fn with_tooltips(mut self, provider: impl TooltipProvider + 'static) -> Self {
        self.tooltips = Some(Box::new(provider));
        self
    }

    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Wire every component. Fails with [`PageError::AlreadyInitialized`]
    /// on a second call, since listeners would otherwise be doubled up.
    pub fn initialize(&mut self, page: &mut Page) -> PageResult<InitSummary> {
        if self.initialized {
            return Err(PageError::AlreadyInitialized);
        }
        if page.is_unloaded() {
            return Err(PageError::Unloaded);
        }
        self.initialized = true;

        let config = &self.config;
        let stylesheet_installed = install_stylesheet(page.document_mut());
        let tooltips = attach_tooltips(page.document(), self.tooltips.as_deref_mut())?;
        let cards = init_todo_interactions(page, config)?;
        let forms = init_form_enhancements(page, config)?;
        let filter_controls = init_priority_filters(page, config)?;
        let stat_cards = init_entrance_animations(page, config)?;
        let confirm = init_confirm_dialogs(page, config)?;
        let messages = init_auto_hide_messages(page, config)?;

        let summary = InitSummary {
            stylesheet_installed,
            tooltips,
            cards,
            forms,
            filter_controls,
            stat_cards,
            confirmation_page_buttons: confirm.confirmation_page,
            inline_delete_buttons: confirm.inline,
            messages,
        };
        tracing::info!("Page initialized: {:?}", summary);
        Ok(summary)
    }
}

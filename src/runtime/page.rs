//! The page: a document, its listeners, its event loop and its host.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use chrono::NaiveDate;

use super::events::{Event, EventKind, Key};
use super::submission::FormSubmission;
use super::timers::{TimerId, TimerQueue};
use crate::dom::{Document, NodeId};
use crate::traits::{Browser, Navigation};

/// An event listener. Listeners get the whole page so they can mutate the
/// document, schedule timers and reach the host.
pub type Listener = Rc<dyn Fn(&mut Page, &mut Event)>;

/// A loaded page.
///
/// Everything runs on one thread: dispatch calls listeners synchronously and
/// timers fire only when the clock is advanced, either directly with
/// [`Page::advance`] or in real time through [`crate::runtime::driver`].
pub struct Page {
    document: Document,
    timers: TimerQueue,
    listeners: HashMap<NodeId, Vec<(EventKind, Listener)>>,
    browser: Box<dyn Browser>,
    unloaded: bool,
}

impl fmt::Debug for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Page")
            .field("now", &self.timers.now())
            .field("pending_timers", &self.timers.len())
            .field("listeners", &self.listeners.len())
            .field("unloaded", &self.unloaded)
            .finish()
    }
}

impl Page {
    pub fn new(document: Document, browser: impl Browser + 'static) -> Self {
        Self::with_boxed_browser(document, Box::new(browser))
    }

    pub fn with_boxed_browser(document: Document, browser: Box<dyn Browser>) -> Self {
        Self {
            document,
            timers: TimerQueue::new(),
            listeners: HashMap::new(),
            browser,
            unloaded: false,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn is_unloaded(&self) -> bool {
        self.unloaded
    }

    // ------------------------------------------------------------------
    // Listeners and dispatch
    // ------------------------------------------------------------------

    pub fn add_listener<F>(&mut self, node: NodeId, kind: EventKind, listener: F)
    where
        F: Fn(&mut Page, &mut Event) + 'static,
    {
        if self.unloaded {
            return;
        }
        self.listeners
            .entry(node)
            .or_default()
            .push((kind, Rc::new(listener)));
    }

    /// Number of listeners registered on `node`.
    pub fn listener_count(&self, node: NodeId) -> usize {
        self.listeners.get(&node).map_or(0, Vec::len)
    }

    /// Deliver `event` to its target and each ancestor in turn, then run the
    /// default action unless a listener prevented it.
    pub fn dispatch(&mut self, mut event: Event) -> Event {
        if self.unloaded {
            return event;
        }
        let path: Vec<NodeId> = self.document.ancestors(event.target()).collect();
        for node in path {
            let matching: Vec<Listener> = match self.listeners.get(&node) {
                Some(list) => list
                    .iter()
                    .filter(|(kind, _)| *kind == event.kind())
                    .map(|(_, listener)| Rc::clone(listener))
                    .collect(),
                None => continue,
            };
            event.set_current_target(node);
            for listener in matching {
                listener(self, &mut event);
                if self.unloaded {
                    return event;
                }
            }
            if event.propagation_stopped() {
                break;
            }
        }

        if !event.default_prevented() {
            self.run_default_action(&event);
        }
        event
    }

    fn run_default_action(&mut self, event: &Event) {
        match event.kind() {
            EventKind::Click => {
                let doc = &self.document;
                let link = doc
                    .ancestors(event.target())
                    .find(|n| doc.tag(*n) == Some("a") && doc.has_attr(*n, "href"));
                if let Some(link) = link {
                    let href = doc.attr(link, "href").unwrap_or_default().to_string();
                    self.navigate(&href);
                    return;
                }
                let button = doc
                    .ancestors(event.target())
                    .find(|n| doc.tag(*n) == Some("button"));
                let Some(button) = button else {
                    return;
                };
                let is_submit = doc.attr(button, "type").unwrap_or("submit") == "submit";
                let form = doc.ancestors(button).find(|n| doc.tag(*n) == Some("form"));
                if let (true, Some(form)) = (is_submit && !doc.is_disabled(button), form) {
                    self.request_submit(form, Some(button));
                }
            }
            EventKind::Submit => {
                let submission =
                    FormSubmission::collect(&self.document, event.target(), event.submitter());
                tracing::debug!(
                    "Form {} submitted to '{}'",
                    event.target(),
                    submission.action
                );
                let outcome = self.browser.submit_form(submission);
                self.settle(outcome);
            }
            EventKind::KeyDown | EventKind::Input | EventKind::Change => {}
        }
    }

    fn is_inert(&self, node: NodeId) -> bool {
        let doc = &self.document;
        doc.ancestors(node).any(|n| {
            matches!(doc.tag(n), Some("button" | "input" | "select" | "textarea"))
                && doc.is_disabled(n)
        })
    }

    /// Click an element. Disabled controls swallow the click entirely, so
    /// this returns `None` for them (and for an unloaded page).
    pub fn click(&mut self, node: NodeId) -> Option<Event> {
        if self.unloaded || self.is_inert(node) {
            return None;
        }
        Some(self.dispatch(Event::new(EventKind::Click, node)))
    }

    pub fn key_down(&mut self, node: NodeId, key: Key) -> Event {
        self.dispatch(Event::key_down(node, key))
    }

    /// Replace a control's value and fire `input`.
    pub fn type_text(&mut self, node: NodeId, value: &str) -> Event {
        if !self.unloaded {
            self.document.set_value(node, value);
        }
        self.dispatch(Event::new(EventKind::Input, node))
    }

    /// Replace a control's value and fire `change`.
    pub fn select_value(&mut self, node: NodeId, value: &str) -> Event {
        if !self.unloaded {
            self.document.set_value(node, value);
        }
        self.dispatch(Event::new(EventKind::Change, node))
    }

    /// Interactive submission: fires `submit` on the form and hands it to
    /// the host unless a listener prevents it.
    pub fn request_submit(&mut self, form: NodeId, submitter: Option<NodeId>) -> Event {
        self.dispatch(Event::submit(form, submitter))
    }

    /// Programmatic submission, like `HTMLFormElement.submit()`: no `submit`
    /// event and no check on the submitter being disabled.
    pub fn submit_form(&mut self, form: NodeId) {
        if self.unloaded {
            return;
        }
        let submission = FormSubmission::collect(&self.document, form, None);
        tracing::debug!("Form {} force-submitted to '{}'", form, submission.action);
        let outcome = self.browser.submit_form(submission);
        self.settle(outcome);
    }

    // ------------------------------------------------------------------
    // Host
    // ------------------------------------------------------------------

    pub fn confirm(&mut self, message: &str) -> bool {
        !self.unloaded && self.browser.confirm(message)
    }

    pub fn navigate(&mut self, url: &str) {
        if self.unloaded {
            return;
        }
        tracing::debug!("Navigating to '{}'", url);
        let outcome = self.browser.navigate(url);
        self.settle(outcome);
    }

    /// A committed navigation takes the page down with it.
    fn settle(&mut self, outcome: Navigation) {
        if outcome.is_committed() {
            tracing::debug!("Navigation committed");
            self.unload();
        }
    }

    pub fn today(&self) -> NaiveDate {
        self.browser.today()
    }

    /// Tear the page down, as when a navigation commits: pending timers and
    /// listeners are dropped and later events are ignored.
    pub fn unload(&mut self) {
        if self.unloaded {
            return;
        }
        tracing::debug!(
            "Unloading page with {} pending timers",
            self.timers.len()
        );
        self.unloaded = true;
        self.timers.clear();
        self.listeners.clear();
    }

    // ------------------------------------------------------------------
    // Timers
    // ------------------------------------------------------------------

    /// Time since page load on the virtual clock.
    pub fn now(&self) -> Duration {
        self.timers.now()
    }

    /// Schedule `callback` after `delay`. An unloaded page hands back an
    /// id that is never pending.
    pub fn set_timeout<F>(&mut self, delay: Duration, callback: F) -> TimerId
    where
        F: FnOnce(&mut Page) + 'static,
    {
        if self.unloaded {
            return self.timers.spent_id();
        }
        self.timers.schedule(delay, Box::new(callback))
    }

    pub fn clear_timeout(&mut self, id: TimerId) -> bool {
        self.timers.cancel(id)
    }

    pub fn is_timer_pending(&self, id: TimerId) -> bool {
        self.timers.is_pending(id)
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    pub fn next_deadline(&mut self) -> Option<Duration> {
        self.timers.next_deadline()
    }

    /// Run every timer due up to `now() + span` and move the clock there.
    pub fn advance(&mut self, span: Duration) {
        let target = self.now() + span;
        self.advance_to(target);
    }

    /// Run every timer due up to `target`, in deadline order, and move the
    /// clock there. Timers scheduled by callbacks fire in the same pass when
    /// they fall due before `target`.
    pub fn advance_to(&mut self, target: Duration) {
        while let Some(callback) = self.timers.pop_due(target) {
            callback(self);
        }
        self.timers.set_now(target);
    }

    /// Advance until no timers remain or `limit` has elapsed. Returns true
    /// if the queue drained.
    pub fn run_until_idle(&mut self, limit: Duration) -> bool {
        let deadline = self.now() + limit;
        while let Some(next) = self.next_deadline() {
            if next > deadline {
                self.advance_to(deadline);
                return false;
            }
            self.advance_to(next);
        }
        true
    }
}

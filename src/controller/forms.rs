//! Todo form enhancements: title focus, due-date floor, description
//! counter, priority stars and the submit spinner.

use chrono::NaiveDate;

use crate::config::{css_seconds, ms, PageConfig};
use crate::dom::{Document, NodeId};
use crate::error::PageResult;
use crate::runtime::{EventKind, Page};

use super::effects::{build_spinner, restore_label, selector, show_spinner};

/// Counter colour at or below the warning threshold.
pub const COUNTER_NORMAL_COLOR: &str = "#6c757d";
/// Counter colour above the warning threshold.
pub const COUNTER_WARNING_COLOR: &str = "#fd7e14";

pub const FILLED_STAR: char = '★';
pub const EMPTY_STAR: char = '☆';

/// Minimum title length the server accepts.
pub const TITLE_MIN_CHARS: usize = 3;

/// Display label for a priority level.
pub fn priority_label(level: u8) -> &'static str {
    match level {
        1 => "Very Low",
        2 => "Low",
        3 => "Medium",
        4 => "High",
        _ => "Critical",
    }
}

/// Parse a priority selector value into 1..=5. Unparsable values give
/// `default`; out-of-range numbers are clamped.
pub fn parse_priority(value: &str, default: u8) -> u8 {
    match value.trim().parse::<i64>() {
        Ok(level) => level.clamp(1, 5) as u8,
        Err(_) => default.clamp(1, 5),
    }
}

/// Star glyphs for a priority level: filled stars then empty ones, five in
/// total.
pub fn priority_stars(level: u8) -> String {
    let filled = usize::from(level.min(5));
    std::iter::repeat(FILLED_STAR)
        .take(filled)
        .chain(std::iter::repeat(EMPTY_STAR).take(5 - filled))
        .collect()
}

/// Counter text for a description of `length` characters.
pub fn counter_text(length: usize, limit: usize) -> String {
    format!("{length}/{limit} characters")
}

/// A todo form and its optional fields, resolved once at wiring time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TodoForm {
    pub form: NodeId,
    pub title: Option<NodeId>,
    pub description: Option<NodeId>,
    pub priority: Option<NodeId>,
    pub due_date: Option<NodeId>,
    pub submit: Option<NodeId>,
}

impl TodoForm {
    pub fn resolve(doc: &Document, form: NodeId) -> PageResult<Self> {
        let field = |name: &str| -> PageResult<Option<NodeId>> {
            Ok(doc.query_selector(form, &selector(&format!("[name=\"{name}\"]"))?))
        };
        Ok(Self {
            form,
            title: field("title")?,
            description: field("description")?,
            priority: field("priority")?,
            due_date: field("due_date")?,
            submit: doc.query_selector(form, &selector("button[type=\"submit\"]")?),
        })
    }
}

/// Enhance every `form.todo-form`. Returns the number of forms enhanced.
pub fn init_form_enhancements(page: &mut Page, config: &PageConfig) -> PageResult<usize> {
    let doc = page.document();
    let forms: Vec<TodoForm> = doc
        .query_selector_all(doc.root(), &selector("form.todo-form")?)
        .into_iter()
        .map(|form| TodoForm::resolve(doc, form))
        .collect::<PageResult<_>>()?;

    for form in &forms {
        enhance_form(page, *form, config)?;
    }
    tracing::debug!("Enhanced {} todo forms", forms.len());
    Ok(forms.len())
}

fn enhance_form(page: &mut Page, form: TodoForm, config: &PageConfig) -> PageResult<()> {
    if let Some(title) = form.title {
        wire_title(page, title, config);
    }
    if let Some(due) = form.due_date {
        wire_due_date(page, due);
    }
    if let Some(description) = form.description {
        wire_counter(page, description, config);
    }
    if let Some(priority) = form.priority {
        wire_priority(page, priority, config)?;
    }
    wire_submit(page, form, config);
    Ok(())
}

fn wire_title(page: &mut Page, title: NodeId, config: &PageConfig) {
    let timings = config.timings;
    let pulse = format!("pulse {} ease-in-out", css_seconds(timings.title_pulse_ms));
    page.set_timeout(ms(timings.title_focus_delay_ms), move |page| {
        if !page.document_mut().focus(title) {
            return;
        }
        page.document_mut().set_style(title, "animation", &pulse);
        page.set_timeout(ms(timings.title_pulse_ms), move |page| {
            page.document_mut().remove_style(title, "animation");
        });
    });

    page.add_listener(title, EventKind::Input, |page, event| {
        let node = event.target();
        let length = page.document().value(node).trim().chars().count();
        let too_short = length > 0 && length < TITLE_MIN_CHARS;
        page.document_mut().toggle_class(node, "is-invalid", too_short);
    });
}

fn wire_due_date(page: &mut Page, due: NodeId) {
    let today = page.today();
    if page.document().value(due).is_empty() {
        let iso = today.format("%Y-%m-%d").to_string();
        page.document_mut().set_attr(due, "min", &iso);
    }

    page.add_listener(due, EventKind::Change, |page, event| {
        let node = event.target();
        let today = page.today();
        let in_past = NaiveDate::parse_from_str(&page.document().value(node), "%Y-%m-%d")
            .is_ok_and(|date| date < today);
        page.document_mut().toggle_class(node, "is-invalid", in_past);
    });
}

fn wire_counter(page: &mut Page, description: NodeId, config: &PageConfig) {
    let doc = page.document_mut();
    let counter = doc.create_element("small");
    doc.set_attr(counter, "class", "form-text char-counter");
    doc.insert_after(description, counter);

    let (limit, warning) = (config.description_limit, config.description_warning);
    update_counter(doc, description, counter, limit, warning);
    page.add_listener(description, EventKind::Input, move |page, _| {
        update_counter(page.document_mut(), description, counter, limit, warning);
    });
}

fn update_counter(doc: &mut Document, field: NodeId, counter: NodeId, limit: usize, warning: usize) {
    let length = doc.value(field).chars().count();
    doc.set_text(counter, &counter_text(length, limit));
    let color = if length > warning {
        COUNTER_WARNING_COLOR
    } else {
        COUNTER_NORMAL_COLOR
    };
    doc.set_style(counter, "color", color);
}

#[derive(Debug, Clone, Copy)]
struct PriorityIndicator {
    root: NodeId,
    stars: NodeId,
    label: NodeId,
}

fn wire_priority(page: &mut Page, priority: NodeId, config: &PageConfig) -> PageResult<()> {
    let indicator_sel = selector(".priority-indicator")?;
    let default = config.default_priority;

    let doc = page.document_mut();
    let Some(group) = doc.parent(priority) else {
        return Ok(());
    };
    for stale in doc.query_selector_all(group, &indicator_sel) {
        doc.remove(stale);
    }
    let indicator = build_indicator(doc);
    doc.append_child(group, indicator.root);

    render_priority(doc, priority, indicator, default);
    page.add_listener(priority, EventKind::Change, move |page, _| {
        render_priority(page.document_mut(), priority, indicator, default);
    });
    Ok(())
}

fn build_indicator(doc: &mut Document) -> PriorityIndicator {
    let root = doc.create_element("span");
    doc.set_attr(root, "class", "priority-indicator");
    let stars = doc.create_element("span");
    doc.set_attr(stars, "class", "priority-stars");
    let label = doc.create_element("small");
    doc.set_attr(label, "class", "priority-label");
    doc.append_child(root, stars);
    doc.append_child(root, label);
    PriorityIndicator { root, stars, label }
}

fn render_priority(doc: &mut Document, select: NodeId, indicator: PriorityIndicator, default: u8) {
    let level = parse_priority(&doc.value(select), default);
    doc.set_attr(indicator.root, "data-level", &level.to_string());
    doc.set_text(indicator.stars, &priority_stars(level));
    doc.set_text(indicator.label, priority_label(level));
}

fn wire_submit(page: &mut Page, form: TodoForm, config: &PageConfig) {
    let Some(button) = form.submit else {
        return;
    };
    let recovery = ms(config.timings.submit_recovery_ms);
    let busy = build_spinner(page.document_mut(), " Processing...");

    page.add_listener(form.form, EventKind::Submit, move |page, _| {
        if page.document().is_disabled(button) {
            return;
        }
        let label = show_spinner(page, button, &busy);
        let doc = page.document_mut();
        doc.set_disabled(button, true);
        doc.set_style(button, "opacity", "0.7");
        tracing::debug!("Form {}: submitting, recovery in {:?}", form.form, recovery);

        page.set_timeout(recovery, move |page| {
            restore_label(page, button, label);
            let doc = page.document_mut();
            doc.set_disabled(button, false);
            doc.remove_style(button, "opacity");
        });
    });
}

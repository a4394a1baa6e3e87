//! Page runtime: event dispatch, the timer-driven event loop and form
//! submission.

pub mod driver;
mod events;
mod page;
mod submission;
mod timers;

pub use events::{Event, EventKind, Key};
pub use page::{Listener, Page};
pub use submission::FormSubmission;
pub use timers::{TimerCallback, TimerId, TimerQueue};

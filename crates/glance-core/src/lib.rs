#![cfg_attr(not(test), no_std)]

//! Sentence-aware pagination of prose for line-oriented displays, plus the timed,
//! cancellable loop that shows the resulting screens.
//!
//! Paragraphs flow through [`text`] (sentence splitting, line wrapping, filtering),
//! then [`paginate`] groups lines into screens, and [`schedule`] walks the screens on
//! a [`line_canvas::LineCanvas`]. [`session`] arbitrates device control and chapters.

extern crate alloc;

pub mod config;
pub mod paginate;
pub mod schedule;
pub mod session;
pub mod text;

pub use config::{ConfigError, PaginationConfig, Preset, SessionConfig};
pub use paginate::{PaginateError, Screen, paginate};
pub use schedule::{
    CancelReason, CancelToken, DisplayScheduler, RunOutcome, RunState, RunStatus, SessionPhase,
    StatusHandle,
};
pub use session::{Chapter, DeviceControl, ReadingSession, SessionEvent};
pub use text::{Line, LineKind};

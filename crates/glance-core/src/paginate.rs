//! Paragraphs -> lines -> fixed-capacity screens.

use alloc::vec::Vec;
use core::fmt;

use log::debug;

use crate::{
    config::{ConfigError, PaginationConfig},
    text::{Line, LineWrapper, retain_lines, retain_parts},
};

/// Lines shown together before a dwell.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Screen {
    lines: Vec<Line>,
}

impl Screen {
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Pagination failure.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PaginateError {
    InvalidConfig(ConfigError),
}

impl From<ConfigError> for PaginateError {
    fn from(err: ConfigError) -> Self {
        Self::InvalidConfig(err)
    }
}

impl fmt::Display for PaginateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConfig(err) => write!(f, "invalid pagination config: {err}"),
        }
    }
}

/// Wraps every surviving part into one flat, ordered line sequence.
///
/// Each part starts on a fresh line.
pub fn wrap_parts<S: AsRef<str>>(
    parts: &[S],
    config: &PaginationConfig,
) -> Result<Vec<Line>, PaginateError> {
    config.validate()?;

    let kept = retain_parts(parts, config.min_fragment_chars);
    let mut lines = Vec::new();
    for (index, part) in kept.iter().enumerate() {
        let mut wrapper = LineWrapper::new(config.max_chars_per_line);
        wrapper.push_paragraph(part);
        let part_lines = wrapper.finish();
        debug!(
            "part {}/{} wrapped chars={} lines={}",
            index + 1,
            kept.len(),
            part.len(),
            part_lines.len()
        );
        lines.extend(part_lines);
    }
    retain_lines(&mut lines);
    Ok(lines)
}

/// Groups `lines` into consecutive screens of `max_lines_per_screen` lines.
///
/// Only the last screen may be partial. A zero capacity is treated as one.
pub fn group_screens(lines: Vec<Line>, max_lines_per_screen: usize) -> Vec<Screen> {
    let per_screen = max_lines_per_screen.max(1);
    let mut screens = Vec::with_capacity(lines.len().div_ceil(per_screen));
    let mut lines = lines.into_iter().peekable();
    while lines.peek().is_some() {
        screens.push(Screen {
            lines: lines.by_ref().take(per_screen).collect(),
        });
    }
    screens
}

/// Full pure pipeline. An empty result means nothing survived filtering.
pub fn paginate<S: AsRef<str>>(
    parts: &[S],
    config: &PaginationConfig,
) -> Result<Vec<Screen>, PaginateError> {
    let lines = wrap_parts(parts, config)?;
    let line_count = lines.len();
    let screens = group_screens(lines, config.max_lines_per_screen);
    debug!(
        "paginated parts={} lines={} screens={}",
        parts.len(),
        line_count,
        screens.len()
    );
    Ok(screens)
}

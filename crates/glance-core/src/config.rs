//! Pagination knobs, named presets, and session timing.

use core::fmt;

use line_canvas::layout::MAX_LINE_SLOTS;

/// Parts whose trimmed length is at most ten characters are treated as noise.
pub const DEFAULT_MIN_FRAGMENT_CHARS: usize = 11;
pub const DEFAULT_CHAPTER_PAUSE_MS: u64 = 2_000;
pub const DEFAULT_SETTLE_MS: u64 = 500;

/// Bounds for one pagination run.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PaginationConfig {
    /// Line budget, counted in `char`s.
    pub max_chars_per_line: usize,
    pub max_lines_per_screen: usize,
    pub min_fragment_chars: usize,
    /// Pause between two consecutive screens.
    pub screen_dwell_ms: u64,
}

impl PaginationConfig {
    /// 35 chars, 5 lines, 10 s.
    pub const COMPACT: Self = Self::new(35, 5, 10_000);
    /// 40 chars, 6 lines, 15 s.
    pub const STANDARD: Self = Self::new(40, 6, 15_000);
    /// 40 chars, 8 lines, 20 s.
    pub const TALL: Self = Self::new(40, 8, 20_000);

    pub const fn new(
        max_chars_per_line: usize,
        max_lines_per_screen: usize,
        screen_dwell_ms: u64,
    ) -> Self {
        Self {
            max_chars_per_line,
            max_lines_per_screen,
            min_fragment_chars: DEFAULT_MIN_FRAGMENT_CHARS,
            screen_dwell_ms,
        }
    }

    pub const fn with_min_fragment_chars(mut self, min_fragment_chars: usize) -> Self {
        self.min_fragment_chars = min_fragment_chars;
        self
    }

    pub const fn with_screen_dwell_ms(mut self, screen_dwell_ms: u64) -> Self {
        self.screen_dwell_ms = screen_dwell_ms;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_chars_per_line < 1 {
            return Err(ConfigError::ZeroLineBudget);
        }
        if self.max_lines_per_screen < 1 {
            return Err(ConfigError::ZeroScreenLines);
        }
        if self.max_lines_per_screen > MAX_LINE_SLOTS {
            return Err(ConfigError::TooManyScreenLines {
                requested: self.max_lines_per_screen,
                max: MAX_LINE_SLOTS,
            });
        }
        Ok(())
    }
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Rejected [`PaginationConfig`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ConfigError {
    /// `max_chars_per_line` is zero.
    ZeroLineBudget,
    /// `max_lines_per_screen` is zero.
    ZeroScreenLines,
    /// More lines per screen than the canvas has slots.
    TooManyScreenLines { requested: usize, max: usize },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroLineBudget => write!(f, "max_chars_per_line must be at least 1"),
            Self::ZeroScreenLines => write!(f, "max_lines_per_screen must be at least 1"),
            Self::TooManyScreenLines { requested, max } => write!(
                f,
                "max_lines_per_screen is {requested}, the canvas has only {max} slots"
            ),
        }
    }
}

/// Named configurations.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Preset {
    Compact,
    Standard,
    Tall,
}

impl Preset {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim() {
            n if n.eq_ignore_ascii_case("compact") => Some(Self::Compact),
            n if n.eq_ignore_ascii_case("standard") => Some(Self::Standard),
            n if n.eq_ignore_ascii_case("tall") => Some(Self::Tall),
            _ => None,
        }
    }

    pub const fn config(self) -> PaginationConfig {
        match self {
            Self::Compact => PaginationConfig::COMPACT,
            Self::Standard => PaginationConfig::STANDARD,
            Self::Tall => PaginationConfig::TALL,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Compact => "compact",
            Self::Standard => "standard",
            Self::Tall => "tall",
        }
    }
}

/// Timing around runs, outside a single screen sequence.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SessionConfig {
    /// Pause between two chapters of a playlist.
    pub chapter_pause_ms: u64,
    /// Pause after wiping the canvas, before the first screen.
    pub settle_ms: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            chapter_pause_ms: DEFAULT_CHAPTER_PAUSE_MS,
            settle_ms: DEFAULT_SETTLE_MS,
        }
    }
}

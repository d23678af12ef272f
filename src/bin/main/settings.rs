use std::{env, fmt};

use glance_core::{ConfigError, PaginationConfig, Preset};

const PRESET_VAR: &str = "GLANCE_PRESET";
const DWELL_VAR: &str = "GLANCE_DWELL_MS";
const CHARS_VAR: &str = "GLANCE_CHARS_PER_LINE";
const LINES_VAR: &str = "GLANCE_LINES_PER_SCREEN";

#[derive(Debug)]
pub(super) enum SettingsError {
    UnknownPreset(String),
    NotANumber { var: &'static str, value: String },
    OutOfRange { var: &'static str, value: u64 },
    Invalid(ConfigError),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownPreset(name) => write!(
                f,
                "{PRESET_VAR}={name:?} is not one of compact, standard, tall"
            ),
            Self::NotANumber { var, value } => write!(f, "{var}={value:?} is not a number"),
            Self::OutOfRange { var, value } => write!(f, "{var}={value} is too large"),
            Self::Invalid(err) => write!(f, "{err}"),
        }
    }
}

impl From<ConfigError> for SettingsError {
    fn from(err: ConfigError) -> Self {
        Self::Invalid(err)
    }
}

/// Resolves the pagination config from the process environment.
pub(super) fn from_env() -> Result<(Preset, PaginationConfig), SettingsError> {
    resolve(|var| env::var(var).ok())
}

fn resolve(
    lookup: impl Fn(&'static str) -> Option<String>,
) -> Result<(Preset, PaginationConfig), SettingsError> {
    let preset = match lookup(PRESET_VAR) {
        Some(name) => Preset::from_name(&name).ok_or(SettingsError::UnknownPreset(name))?,
        None => Preset::Standard,
    };

    let mut config = preset.config();
    if let Some(chars) = number(&lookup, CHARS_VAR)? {
        config.max_chars_per_line = to_usize(CHARS_VAR, chars)?;
    }
    if let Some(lines) = number(&lookup, LINES_VAR)? {
        config.max_lines_per_screen = to_usize(LINES_VAR, lines)?;
    }
    if let Some(dwell_ms) = number(&lookup, DWELL_VAR)? {
        config = config.with_screen_dwell_ms(dwell_ms);
    }

    config.validate()?;
    Ok((preset, config))
}

fn number(
    lookup: &impl Fn(&'static str) -> Option<String>,
    var: &'static str,
) -> Result<Option<u64>, SettingsError> {
    let Some(value) = lookup(var) else {
        return Ok(None);
    };
    value
        .trim()
        .parse()
        .map(Some)
        .map_err(|_| SettingsError::NotANumber { var, value })
}

fn to_usize(var: &'static str, value: u64) -> Result<usize, SettingsError> {
    usize::try_from(value).map_err(|_| SettingsError::OutOfRange { var, value })
}

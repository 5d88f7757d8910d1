//! Write modes and the legacy `overwrite` flag.
//!
//! Older servers only understand a boolean `overwrite` field; newer ones take a
//! `mode`. A request carries whichever the caller set. When both are set the
//! explicit mode wins.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CredHubError;

/// Policy applied when a credential with the same name already exists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WriteMode {
    /// Always write a new version
    Overwrite,
    /// Keep the existing version
    NoOverwrite,
    /// Write a new version only when the value or parameters differ
    Converge,
}

impl WriteMode {
    /// Get the wire representation of this mode
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Overwrite => "overwrite",
            Self::NoOverwrite => "no-overwrite",
            Self::Converge => "converge",
        }
    }

    /// Map the legacy `overwrite` flag onto a mode.
    pub fn from_overwrite(overwrite: bool) -> Self {
        if overwrite {
            Self::Overwrite
        } else {
            Self::NoOverwrite
        }
    }
}

impl From<bool> for WriteMode {
    fn from(overwrite: bool) -> Self {
        Self::from_overwrite(overwrite)
    }
}

impl FromStr for WriteMode {
    type Err = CredHubError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "overwrite" => Ok(Self::Overwrite),
            "no-overwrite" => Ok(Self::NoOverwrite),
            "converge" => Ok(Self::Converge),
            _ => Err(CredHubError::invalid_argument(format!("Unknown write mode: {}", s))),
        }
    }
}

impl fmt::Display for WriteMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The write policy recorded on a request, as the caller expressed it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WritePolicy {
    /// Neither a mode nor the legacy flag was set; the server default applies.
    #[default]
    Unset,
    /// An explicit mode.
    Mode(WriteMode),
    /// Only the legacy flag.
    LegacyOverwrite(bool),
}

impl WritePolicy {
    /// Reconcile an optional explicit mode with an optional legacy flag.
    ///
    /// The explicit mode wins when both are present.
    pub fn reconcile(mode: Option<WriteMode>, overwrite: Option<bool>) -> Self {
        match (mode, overwrite) {
            (Some(mode), Some(overwrite)) => {
                tracing::warn!(
                    mode = %mode,
                    overwrite,
                    "Both mode and legacy overwrite flag set, using explicit mode"
                );
                Self::Mode(mode)
            }
            (Some(mode), None) => Self::Mode(mode),
            (None, Some(overwrite)) => Self::LegacyOverwrite(overwrite),
            (None, None) => Self::Unset,
        }
    }

    /// The mode this policy resolves to, if any was set.
    pub fn effective_mode(&self) -> Option<WriteMode> {
        match self {
            Self::Unset => None,
            Self::Mode(mode) => Some(*mode),
            Self::LegacyOverwrite(overwrite) => Some(WriteMode::from_overwrite(*overwrite)),
        }
    }

    /// Value for the `mode` field, if emitted.
    pub fn mode_field(&self) -> Option<WriteMode> {
        match self {
            Self::Mode(mode) => Some(*mode),
            _ => None,
        }
    }

    /// Value for the `overwrite` field, if emitted.
    pub fn overwrite_field(&self) -> Option<bool> {
        match self {
            Self::LegacyOverwrite(overwrite) => Some(*overwrite),
            _ => None,
        }
    }
}

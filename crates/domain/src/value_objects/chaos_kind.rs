//! Built-in intervention kinds

use std::fmt;

use serde::{Deserialize, Serialize};

/// The built-in kinds chosen by weighted selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChaosKind {
    /// Suspend before passing the request on
    Delay,
    /// Answer with an HTTP error
    Error,
    /// Answer with a nonsense body
    Gibberish,
}

impl ChaosKind {
    /// Stable lowercase label
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Delay => "delay",
            Self::Error => "error",
            Self::Gibberish => "gibberish",
        }
    }
}

impl fmt::Display for ChaosKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shape of a gibberish body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GibberishFormat {
    /// Structured data (`application/json`)
    Json,
    /// Markup document (`text/html`)
    Html,
    /// Plain text (`text/plain`)
    Text,
}

impl GibberishFormat {
    /// All formats, in selection order
    pub const ALL: [Self; 3] = [Self::Json, Self::Html, Self::Text];

    /// Media type sent with the body
    #[must_use]
    pub const fn content_type(&self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::Html => "text/html",
            Self::Text => "text/plain",
        }
    }

    /// Stable lowercase label
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Html => "html",
            Self::Text => "text",
        }
    }
}

impl fmt::Display for GibberishFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

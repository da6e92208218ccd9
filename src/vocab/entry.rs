//! Vocabulary records.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

/// Stable identity of a vocabulary word.
///
/// Packs may use strings or integers for ids; both are normalised to text so
/// saved progress compares equal across reloads.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct WordId(String);

impl WordId {
    /// Create an id from text.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id as text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for WordId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for WordId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl<'de> Deserialize<'de> for WordId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Int(i64),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(s) => Self(s),
            Raw::Int(n) => Self(n.to_string()),
        })
    }
}

/// CEFR difficulty tier, ordered from easiest to hardest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum CefrLevel {
    /// Beginner.
    #[default]
    A1,
    /// Elementary.
    A2,
    /// Intermediate.
    B1,
    /// Upper intermediate.
    B2,
    /// Advanced.
    C1,
    /// Proficient.
    C2,
}

impl CefrLevel {
    /// All levels in ascending order.
    pub const ALL: [CefrLevel; 6] = [
        CefrLevel::A1,
        CefrLevel::A2,
        CefrLevel::B1,
        CefrLevel::B2,
        CefrLevel::C1,
        CefrLevel::C2,
    ];

    /// Canonical label, e.g. `"B1"`.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            CefrLevel::A1 => "A1",
            CefrLevel::A2 => "A2",
            CefrLevel::B1 => "B1",
            CefrLevel::B2 => "B2",
            CefrLevel::C1 => "C1",
            CefrLevel::C2 => "C2",
        }
    }
}

impl fmt::Display for CefrLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error parsing a CEFR label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseLevelError(String);

impl fmt::Display for ParseLevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown CEFR level {:?} (expected A1, A2, B1, B2, C1 or C2)", self.0)
    }
}

impl std::error::Error for ParseLevelError {}

impl FromStr for CefrLevel {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|level| level.label() == upper)
            .ok_or_else(|| ParseLevelError(s.to_string()))
    }
}

/// Unknown or missing levels count as A1.
fn lenient_level<'de, D: Deserializer<'de>>(deserializer: D) -> Result<CefrLevel, D::Error> {
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|s| s.parse().ok()).unwrap_or_default())
}

/// Language printed on a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    /// English side of a word pair.
    #[serde(rename = "en")]
    English,
    /// Turkish side of a word pair.
    #[serde(rename = "tr")]
    Turkish,
}

impl Language {
    /// ISO 639-1 code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Turkish => "tr",
        }
    }

    /// The other side of the pair.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Language::English => Language::Turkish,
            Language::Turkish => Language::English,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Language::English),
            "tr" => Ok(Language::Turkish),
            other => Err(format!("unsupported language {other:?} (expected en or tr)")),
        }
    }
}

/// One bilingual vocabulary record as stored in a data pack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordEntry {
    /// Stable identity.
    pub id: WordId,
    /// Difficulty tier.
    #[serde(default, deserialize_with = "lenient_level")]
    pub level: CefrLevel,
    /// English text.
    #[serde(rename = "en", alias = "text_a")]
    pub text_a: String,
    /// Turkish text.
    #[serde(rename = "tr", alias = "text_b")]
    pub text_b: String,
}

impl WordEntry {
    /// Create an entry.
    #[must_use]
    pub fn new(
        id: impl Into<WordId>,
        level: CefrLevel,
        text_a: impl Into<String>,
        text_b: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            level,
            text_a: text_a.into(),
            text_b: text_b.into(),
        }
    }

    /// Text of the given language side.
    #[must_use]
    pub fn text(&self, language: Language) -> &str {
        match language {
            Language::English => &self.text_a,
            Language::Turkish => &self.text_b,
        }
    }
}

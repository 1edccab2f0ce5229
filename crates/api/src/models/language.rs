use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Display language for schema names.
///
/// German names are primary in the schema; English names are merged in as
/// alternates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayLanguage {
    #[default]
    De,
    En,
}

impl DisplayLanguage {
    pub fn as_str(&self) -> &'static str {
        match self {
            DisplayLanguage::De => "de",
            DisplayLanguage::En => "en",
        }
    }

    pub fn other(&self) -> Self {
        match self {
            DisplayLanguage::De => DisplayLanguage::En,
            DisplayLanguage::En => DisplayLanguage::De,
        }
    }

    /// Pick the name to show for a primary/alternate pair.
    pub fn pick<'a>(&self, primary: &'a str, alternate: Option<&'a str>) -> &'a str {
        match self {
            DisplayLanguage::De => primary,
            DisplayLanguage::En => alternate.filter(|a| !a.is_empty()).unwrap_or(primary),
        }
    }
}

impl fmt::Display for DisplayLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DisplayLanguage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "de" | "german" | "deutsch" => Ok(DisplayLanguage::De),
            "en" | "english" | "englisch" => Ok(DisplayLanguage::En),
            other => Err(format!("unknown display language '{}'", other)),
        }
    }
}

/*!
 * Enumerated labels used by campaign requests.
 *
 * Languages, regions and industries are closed sets. Each label carries the
 * display name used in prompts and reports, parses case-insensitively, and
 * serializes as its display name.
 */

use anyhow::anyhow;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Target language of a campaign
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    Spanish,
    French,
    German,
    Japanese,
    Portuguese,
    Hindi,
}

impl Language {
    pub const ALL: [Language; 6] = [
        Language::Spanish,
        Language::French,
        Language::German,
        Language::Japanese,
        Language::Portuguese,
        Language::Hindi,
    ];

    // @returns: Name inserted into prompts
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Spanish => "Spanish",
            Self::French => "French",
            Self::German => "German",
            Self::Japanese => "Japanese",
            Self::Portuguese => "Portuguese",
            Self::Hindi => "Hindi",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for Language {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|l| l.display_name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| anyhow!("Invalid target language: {}", s))
    }
}

/// Target market region
///
/// `Eu` and `Usa` only have compliance rules in the reference knowledge; the
/// remaining regions are the markets offered for campaigns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Region {
    Spain,
    France,
    Germany,
    Japan,
    Brazil,
    India,
    #[serde(rename = "EU")]
    Eu,
    #[serde(rename = "USA")]
    Usa,
}

impl Region {
    pub const ALL: [Region; 8] = [
        Region::Spain,
        Region::France,
        Region::Germany,
        Region::Japan,
        Region::Brazil,
        Region::India,
        Region::Eu,
        Region::Usa,
    ];

    // @returns: Label used as the knowledge lookup key
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Spain => "Spain",
            Self::France => "France",
            Self::Germany => "Germany",
            Self::Japan => "Japan",
            Self::Brazil => "Brazil",
            Self::India => "India",
            Self::Eu => "EU",
            Self::Usa => "USA",
        }
    }

    /// Resolve a free-form label; unknown labels yield `None`.
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|r| r.display_name().eq_ignore_ascii_case(label))
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for Region {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s).ok_or_else(|| anyhow!("Invalid target region: {}", s))
    }
}

/// Industry of the advertised product
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Industry {
    Technology,
    Healthcare,
    Fashion,
    #[serde(rename = "Food & Beverage")]
    FoodAndBeverage,
    Finance,
    #[default]
    General,
}

impl Industry {
    pub const ALL: [Industry; 6] = [
        Industry::Technology,
        Industry::Healthcare,
        Industry::Fashion,
        Industry::FoodAndBeverage,
        Industry::Finance,
        Industry::General,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Technology => "Technology",
            Self::Healthcare => "Healthcare",
            Self::Fashion => "Fashion",
            Self::FoodAndBeverage => "Food & Beverage",
            Self::Finance => "Finance",
            Self::General => "General",
        }
    }

    /// Lowercase label passed to the compliance prompt (e.g. `food & beverage`).
    pub fn prompt_label(&self) -> String {
        self.display_name().to_lowercase()
    }
}

impl fmt::Display for Industry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for Industry {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("food-and-beverage") || s.eq_ignore_ascii_case("food_and_beverage") {
            return Ok(Self::FoodAndBeverage);
        }
        Self::ALL
            .iter()
            .copied()
            .find(|i| i.display_name().eq_ignore_ascii_case(s))
            .ok_or_else(|| anyhow!("Invalid industry: {}", s))
    }
}

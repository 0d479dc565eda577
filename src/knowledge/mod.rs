/*!
 * Knowledge lookup for cultural guidance and compliance rules.
 *
 * The pipeline only depends on the [`KnowledgeLookup`] contract. Two backends
 * are provided:
 * - `reference::ReferenceGuidelines`: fixed per-region guidance table
 * - `store::KnowledgeStore`: a collection of `KnowledgeEntry` documents keyed
 *   by region and tag
 *
 * A region without data is not an error: lookups fall back to
 * [`CULTURAL_FALLBACK`] and [`COMPLIANCE_FALLBACK`].
 */

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt::{self, Debug};

use crate::campaign::labels::{Industry, Region};

pub mod reference;
pub mod store;

pub use reference::ReferenceGuidelines;
pub use store::KnowledgeStore;

/// Returned by `cultural_context` for regions without guidance
pub const CULTURAL_FALLBACK: &str = "General international guidelines apply.";

/// Returned by `compliance_rules` for regions without rules
pub const COMPLIANCE_FALLBACK: &str = "Standard international advertising guidelines.";

/// Read-only source of regional context for the pipeline stages
///
/// Implementations must be pure: the same label always yields the same text.
/// Labels are matched case-insensitively against [`Region`] names; anything else
/// resolves to the fallback text.
pub trait KnowledgeLookup: Send + Sync + Debug {
    /// Cultural guidance for a region
    fn cultural_context(&self, region: &str) -> String;

    /// Compliance rules for a region
    fn compliance_rules(&self, region: &str) -> String;
}

/// Kind of knowledge document
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryTag {
    CulturalGuideline,
    ComplianceRule,
}

impl fmt::Display for EntryTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CulturalGuideline => write!(f, "cultural_guideline"),
            Self::ComplianceRule => write!(f, "compliance_rule"),
        }
    }
}

/// One immutable knowledge document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeEntry {
    pub id: String,
    pub region: Region,
    /// Only set on compliance entries
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry: Option<Industry>,
    pub content: String,
    pub tags: BTreeSet<EntryTag>,
}

impl KnowledgeEntry {
    /// Create a cultural guideline entry
    pub fn cultural(id: impl Into<String>, region: Region, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            region,
            industry: None,
            content: content.into(),
            tags: BTreeSet::from([EntryTag::CulturalGuideline]),
        }
    }

    /// Create a compliance rule entry for an industry
    pub fn compliance(
        id: impl Into<String>,
        region: Region,
        industry: Industry,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            region,
            industry: Some(industry),
            content: content.into(),
            tags: BTreeSet::from([EntryTag::ComplianceRule]),
        }
    }

    pub fn has_tag(&self, tag: EntryTag) -> bool {
        self.tags.contains(&tag)
    }
}

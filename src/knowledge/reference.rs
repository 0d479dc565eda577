/*!
 * Fixed guidance table keyed by region.
 */

use super::{KnowledgeLookup, COMPLIANCE_FALLBACK, CULTURAL_FALLBACK};
use crate::campaign::labels::Region;

/// Built-in cultural guidance and compliance rules
///
/// Every region is matched explicitly; regions without data fall through to
/// the fallback text.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReferenceGuidelines;

impl ReferenceGuidelines {
    pub fn new() -> Self {
        Self
    }

    /// Guidance for a known region, `None` when the table has no entry
    pub fn cultural_guidance(region: Region) -> Option<&'static str> {
        match region {
            Region::Japan => Some(
                "Emphasize quality, respect, harmony. Avoid direct confrontation. Use formal language.",
            ),
            Region::Brazil => Some(
                "Warm, family-oriented messaging. Vibrant colors. Personal relationships matter.",
            ),
            Region::Germany => Some(
                "Factual, precise information. Quality and efficiency focus. Conservative approach.",
            ),
            Region::India => Some(
                "Value-conscious messaging. Family and community focus. Respectful of traditions.",
            ),
            Region::Spain | Region::France | Region::Eu | Region::Usa => None,
        }
    }

    /// Rules for a known region, `None` when the table has no entry
    pub fn compliance_guidance(region: Region) -> Option<&'static str> {
        match region {
            Region::Eu => Some(
                "GDPR compliance required. Health claims need substantiation. Clear pricing display.",
            ),
            Region::Usa => Some(
                "FDA regulations for health products. FTC advertising guidelines. State-specific rules.",
            ),
            Region::Japan => Some(
                "Pharmaceutical advertising restrictions. Comparison advertising limitations.",
            ),
            Region::India => Some(
                "Foreign investment disclosure. Local language requirements in some states.",
            ),
            Region::Spain | Region::France | Region::Germany | Region::Brazil => None,
        }
    }
}

impl KnowledgeLookup for ReferenceGuidelines {
    fn cultural_context(&self, region: &str) -> String {
        Region::from_label(region)
            .and_then(Self::cultural_guidance)
            .unwrap_or(CULTURAL_FALLBACK)
            .to_string()
    }

    fn compliance_rules(&self, region: &str) -> String {
        Region::from_label(region)
            .and_then(Self::compliance_guidance)
            .unwrap_or(COMPLIANCE_FALLBACK)
            .to_string()
    }
}

/*!
 * In-memory collection of knowledge documents.
 */

use super::{EntryTag, KnowledgeEntry, KnowledgeLookup, COMPLIANCE_FALLBACK, CULTURAL_FALLBACK};
use crate::campaign::labels::{Industry, Region};

/// Immutable set of cultural guidelines and compliance rules
#[derive(Debug, Clone, Default)]
pub struct KnowledgeStore {
    entries: Vec<KnowledgeEntry>,
}

impl KnowledgeStore {
    pub fn new(entries: Vec<KnowledgeEntry>) -> Self {
        Self { entries }
    }

    /// Store holding the built-in reference documents
    pub fn reference() -> Self {
        Self::new(vec![
            KnowledgeEntry::cultural(
                "japan_general",
                Region::Japan,
                "Japanese culture values respect, harmony, and indirect communication. Marketing should emphasize quality, craftsmanship, and long-term relationships. Avoid aggressive sales tactics.",
            ),
            KnowledgeEntry::cultural(
                "brazil_general",
                Region::Brazil,
                "Brazilian culture is warm, family-oriented, and relationship-focused. Marketing should be vibrant, personal, and emphasize community values. Color and emotion are important.",
            ),
            KnowledgeEntry::cultural(
                "germany_general",
                Region::Germany,
                "German culture values precision, efficiency, and factual information. Marketing should be straightforward, detailed, and focus on product benefits and quality.",
            ),
            KnowledgeEntry::cultural(
                "india_general",
                Region::India,
                "Indian culture is diverse, value-conscious, and family-oriented. Marketing should respect cultural traditions, emphasize value for money, and consider regional differences.",
            ),
            KnowledgeEntry::compliance(
                "eu_gdpr",
                Region::Eu,
                Industry::General,
                "GDPR compliance required for data collection. Must include clear privacy policy links, explicit consent mechanisms, and right to data deletion options.",
            ),
            KnowledgeEntry::compliance(
                "usa_health",
                Region::Usa,
                Industry::Healthcare,
                "FDA regulations apply to health claims. Cannot make unsubstantiated medical claims. Dietary supplements require disclaimers. FTC truth in advertising standards apply.",
            ),
            KnowledgeEntry::compliance(
                "japan_pharma",
                Region::Japan,
                Industry::Healthcare,
                "Pharmaceutical advertising strictly regulated. Cannot show before/after comparisons. Medical claims require approval. Comparison advertising limited.",
            ),
            KnowledgeEntry::compliance(
                "india_foreign",
                Region::India,
                Industry::General,
                "Foreign investment disclosures required. Local language requirements in some states. Cultural sensitivity important for religious content.",
            ),
        ])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up an entry by id
    pub fn get(&self, id: &str) -> Option<&KnowledgeEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Entries for a region carrying a tag, in insertion order
    pub fn entries_for(&self, region: Region, tag: EntryTag) -> Vec<&KnowledgeEntry> {
        self.entries
            .iter()
            .filter(|e| e.region == region && e.has_tag(tag))
            .collect()
    }

    /// Compliance rules for a region narrowed to one industry
    ///
    /// Rules filed under `Industry::General` apply to every industry.
    pub fn compliance_rules_for_industry(&self, region: Region, industry: Industry) -> Vec<&KnowledgeEntry> {
        self.entries_for(region, EntryTag::ComplianceRule)
            .into_iter()
            .filter(|e| matches!(e.industry, Some(i) if i == industry || i == Industry::General))
            .collect()
    }

    fn joined_content(&self, region: &str, tag: EntryTag) -> Option<String> {
        let region = Region::from_label(region)?;
        let matches = self.entries_for(region, tag);
        if matches.is_empty() {
            return None;
        }
        Some(
            matches
                .iter()
                .map(|e| e.content.as_str())
                .collect::<Vec<_>>()
                .join(" "),
        )
    }
}

impl KnowledgeLookup for KnowledgeStore {
    fn cultural_context(&self, region: &str) -> String {
        self.joined_content(region, EntryTag::CulturalGuideline)
            .unwrap_or_else(|| CULTURAL_FALLBACK.to_string())
    }

    fn compliance_rules(&self, region: &str) -> String {
        self.joined_content(region, EntryTag::ComplianceRule)
            .unwrap_or_else(|| COMPLIANCE_FALLBACK.to_string())
    }
}

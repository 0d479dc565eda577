/*!
 * Tests for cultural guidance and compliance rule lookup
 */

use transcultura::campaign::{Industry, Region};
use transcultura::knowledge::store::KnowledgeStore;
use transcultura::knowledge::{
    EntryTag, KnowledgeLookup, ReferenceGuidelines, COMPLIANCE_FALLBACK, CULTURAL_FALLBACK,
};

#[test]
fn test_referenceGuidelines_culturalContext_forJapan_shouldBeStable() {
    let knowledge = ReferenceGuidelines::new();
    let first = knowledge.cultural_context("Japan");
    let second = knowledge.cultural_context("Japan");

    assert_eq!(first, second);
    assert!(first.contains("harmony"));
}

#[test]
fn test_referenceGuidelines_unknownRegion_shouldFallBack() {
    let knowledge = ReferenceGuidelines::new();
    assert_eq!(knowledge.cultural_context("Atlantis"), CULTURAL_FALLBACK);
    assert_eq!(knowledge.compliance_rules("Atlantis"), COMPLIANCE_FALLBACK);
}

#[test]
fn test_referenceGuidelines_knownRegionWithoutData_shouldFallBack() {
    let knowledge = ReferenceGuidelines::new();
    assert_eq!(knowledge.cultural_context("Spain"), CULTURAL_FALLBACK);
    assert_eq!(knowledge.compliance_rules("Germany"), COMPLIANCE_FALLBACK);
}

#[test]
fn test_referenceGuidelines_complianceRules_shouldCoverRuleRegions() {
    let knowledge = ReferenceGuidelines::new();
    assert!(knowledge.compliance_rules("EU").contains("GDPR"));
    assert!(knowledge.compliance_rules("USA").contains("FDA"));
    assert!(knowledge.compliance_rules("Japan").contains("Pharmaceutical"));
    assert!(knowledge.compliance_rules("India").contains("Foreign investment"));
}

#[test]
fn test_knowledgeStore_reference_shouldHoldEightEntries() {
    let store = KnowledgeStore::reference();
    assert_eq!(store.len(), 8);
    assert!(store.get("japan_pharma").is_some());
    assert!(store.get("missing").is_none());
}

#[test]
fn test_knowledgeStore_entriesFor_shouldFilterByTag() {
    let store = KnowledgeStore::reference();

    let cultural = store.entries_for(Region::Japan, EntryTag::CulturalGuideline);
    assert_eq!(cultural.len(), 1);
    assert!(cultural.iter().all(|e| e.has_tag(EntryTag::CulturalGuideline)));

    let compliance = store.entries_for(Region::Japan, EntryTag::ComplianceRule);
    assert_eq!(compliance.len(), 1);
    assert_eq!(compliance[0].industry, Some(Industry::Healthcare));
}

#[test]
fn test_knowledgeStore_industryRules_shouldIncludeGeneralEntries() {
    let store = KnowledgeStore::reference();

    let healthcare = store.compliance_rules_for_industry(Region::Usa, Industry::Healthcare);
    assert_eq!(healthcare.len(), 1);

    let fashion = store.compliance_rules_for_industry(Region::Usa, Industry::Fashion);
    assert!(fashion.is_empty());

    let eu_fashion = store.compliance_rules_for_industry(Region::Eu, Industry::Fashion);
    assert_eq!(eu_fashion.len(), 1);
}

#[test]
fn test_knowledgeStore_lookup_shouldFallBackForUnknownRegion() {
    let store = KnowledgeStore::reference();
    assert_eq!(store.cultural_context("Atlantis"), CULTURAL_FALLBACK);
    assert_eq!(store.compliance_rules("France"), COMPLIANCE_FALLBACK);
    assert!(!store.cultural_context("Brazil").is_empty());
}

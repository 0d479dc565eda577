/*!
 * Status classification for completed campaign runs.
 *
 * Classification is a case-insensitive substring scan over the raw text the
 * generator returned for the compliance and exception stages. The generator is
 * only asked to echo the uppercase tokens below; nothing validates that it did,
 * so a negated sentence such as "not NON-COMPLIANT" still matches.
 */

use anyhow::anyhow;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Token the exception stage emits when a human must review the campaign
pub const HUMAN_REVIEW_TOKEN: &str = "HUMAN_REVIEW_REQUIRED";

/// Token the exception stage emits when no review is needed
pub const AUTO_APPROVE_TOKEN: &str = "AUTO_APPROVE";

/// Token the compliance stage emits when the content violates a rule
pub const NON_COMPLIANT_TOKEN: &str = "NON-COMPLIANT";

/// Summary status of a campaign run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CampaignStatus {
    /// Safe to publish without review
    AutoApproved,
    /// The exception stage asked for a human review
    NeedsReview,
    /// The compliance stage reported a violation
    ComplianceIssue,
}

impl CampaignStatus {
    // @returns: Label shown in history tables
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::AutoApproved => "Auto-Approved",
            Self::NeedsReview => "Needs Review",
            Self::ComplianceIssue => "Compliance Issue",
        }
    }
}

impl fmt::Display for CampaignStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AutoApproved => write!(f, "auto_approved"),
            Self::NeedsReview => write!(f, "needs_review"),
            Self::ComplianceIssue => write!(f, "compliance_issue"),
        }
    }
}

impl std::str::FromStr for CampaignStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto_approved" => Ok(Self::AutoApproved),
            "needs_review" => Ok(Self::NeedsReview),
            "compliance_issue" => Ok(Self::ComplianceIssue),
            _ => Err(anyhow!("Invalid campaign status: {}", s)),
        }
    }
}

/// Review priority reported by the exception stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::High => write!(f, "HIGH"),
            Self::Medium => write!(f, "MEDIUM"),
            Self::Low => write!(f, "LOW"),
        }
    }
}

fn contains_token(text: &str, token: &str) -> bool {
    text.to_uppercase().contains(token)
}

/// Derive the run status from the compliance and exception texts.
///
/// Review requests win over compliance findings; anything else is approved.
pub fn classify_status(compliance_check: &str, exception_analysis: &str) -> CampaignStatus {
    if contains_token(exception_analysis, HUMAN_REVIEW_TOKEN) {
        CampaignStatus::NeedsReview
    } else if contains_token(compliance_check, NON_COMPLIANT_TOKEN) {
        CampaignStatus::ComplianceIssue
    } else {
        CampaignStatus::AutoApproved
    }
}

/// Scan the exception text for a priority, checking HIGH, then MEDIUM, then LOW.
pub fn extract_priority(exception_analysis: &str) -> Option<Priority> {
    let upper = exception_analysis.to_uppercase();
    if upper.contains("HIGH") {
        Some(Priority::High)
    } else if upper.contains("MEDIUM") {
        Some(Priority::Medium)
    } else if upper.contains("LOW") {
        Some(Priority::Low)
    } else {
        None
    }
}

/// Whether the exception text recommends auto-approval.
///
/// Used by the history metrics, which count the token itself rather than the
/// three-way status.
pub fn recommends_auto_approval(exception_analysis: &str) -> bool {
    contains_token(exception_analysis, AUTO_APPROVE_TOKEN)
}

/// Whether the compliance text reports a violation.
pub fn reports_non_compliance(compliance_check: &str) -> bool {
    contains_token(compliance_check, NON_COMPLIANT_TOKEN)
}

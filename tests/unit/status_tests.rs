/*!
 * Tests for campaign status and priority classification
 */

use transcultura::campaign::status::{recommends_auto_approval, reports_non_compliance};
use transcultura::campaign::{classify_status, extract_priority, CampaignStatus, Priority};

#[test]
fn test_classifyStatus_withReviewToken_shouldNeedReview() {
    assert_eq!(
        classify_status("NON-COMPLIANT: missing disclaimer", "HUMAN_REVIEW_REQUIRED, priority HIGH"),
        CampaignStatus::NeedsReview
    );
    assert_eq!(
        classify_status("COMPLIANT", "human_review_required"),
        CampaignStatus::NeedsReview
    );
}

#[test]
fn test_classifyStatus_withNonCompliantOnly_shouldBeComplianceIssue() {
    assert_eq!(
        classify_status("Result: non-compliant, unsubstantiated claim", "AUTO_APPROVE, LOW"),
        CampaignStatus::ComplianceIssue
    );
}

#[test]
fn test_classifyStatus_withNoTokens_shouldAutoApprove() {
    assert_eq!(classify_status("COMPLIANT", "AUTO_APPROVE"), CampaignStatus::AutoApproved);
    assert_eq!(classify_status("", ""), CampaignStatus::AutoApproved);
}

#[test]
fn test_classifyStatus_withInlineErrors_shouldAutoApprove() {
    assert_eq!(
        classify_status("Error: 500", "Connection error: connection refused"),
        CampaignStatus::AutoApproved
    );
}

#[test]
fn test_classifyStatus_withNegatedToken_shouldStillMatch() {
    assert_eq!(
        classify_status("The content is not NON-COMPLIANT", "no review needed"),
        CampaignStatus::ComplianceIssue
    );
}

#[test]
fn test_extractPriority_shouldPreferHighThenMediumThenLow() {
    assert_eq!(extract_priority("priority: low, but HIGH risk"), Some(Priority::High));
    assert_eq!(extract_priority("Medium priority, low impact"), Some(Priority::Medium));
    assert_eq!(extract_priority("AUTO_APPROVE, low"), Some(Priority::Low));
    assert_eq!(extract_priority("AUTO_APPROVE"), None);
}

#[test]
fn test_extractPriority_shouldMatchInsideWords() {
    assert_eq!(extract_priority("Highlights look fine"), Some(Priority::High));
    assert_eq!(extract_priority("Follow local rules"), Some(Priority::Low));
}

#[test]
fn test_tokenHelpers_shouldBeCaseInsensitive() {
    assert!(recommends_auto_approval("auto_approve"));
    assert!(!recommends_auto_approval("HUMAN_REVIEW_REQUIRED"));
    assert!(reports_non_compliance("Non-Compliant"));
    assert!(!reports_non_compliance("COMPLIANT"));
}

#[test]
fn test_campaignStatus_displayAndParse_shouldAgree() {
    for status in [
        CampaignStatus::AutoApproved,
        CampaignStatus::NeedsReview,
        CampaignStatus::ComplianceIssue,
    ] {
        assert_eq!(status.to_string().parse::<CampaignStatus>().unwrap(), status);
    }
    assert_eq!(CampaignStatus::AutoApproved.display_name(), "Auto-Approved");
    assert_eq!(Priority::Medium.to_string(), "MEDIUM");
}

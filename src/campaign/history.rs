/*!
 * Caller-owned campaign history.
 *
 * The pipeline never keeps results. Callers append each `CampaignResult` to a
 * `CampaignHistory` they own, and may persist it through the database
 * repository.
 */

use serde::Serialize;

use super::model::CampaignResult;
use super::status::recommends_auto_approval;

/// Append-only log of campaign results
#[derive(Debug, Clone, Default)]
pub struct CampaignHistory {
    results: Vec<CampaignResult>,
}

/// One line of the history table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryRow {
    pub campaign_id: String,
    pub timestamp: String,
    pub target: String,
    pub industry: String,
    pub status: String,
}

/// Dashboard counters over a history
///
/// `auto_approved` counts exception texts containing `AUTO_APPROVE`, and
/// `needs_review` is everything else. This is not the same partition as
/// `CampaignStatus`: a compliance issue without a review request counts as
/// auto-approved here if the exception text said so.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HistorySummary {
    pub total: usize,
    pub auto_approved: usize,
    pub needs_review: usize,
    /// Percentage of auto-approved campaigns (0.0 when empty)
    pub automation_rate: f64,
}

impl CampaignHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a history from results already in chronological order.
    pub fn from_results(results: Vec<CampaignResult>) -> Self {
        Self { results }
    }

    /// Append a result at the end of the log.
    pub fn append(&mut self, result: CampaignResult) {
        self.results.push(result);
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Most recent result
    pub fn latest(&self) -> Option<&CampaignResult> {
        self.results.last()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CampaignResult> {
        self.results.iter()
    }

    /// History table rows, oldest first
    pub fn rows(&self) -> Vec<HistoryRow> {
        self.results.iter().map(HistoryRow::from_result).collect()
    }

    /// Compute dashboard counters
    pub fn summary(&self) -> HistorySummary {
        let total = self.results.len();
        let auto_approved = self
            .results
            .iter()
            .filter(|r| recommends_auto_approval(&r.exception_analysis().text))
            .count();

        let automation_rate = if total > 0 {
            (auto_approved as f64 / total as f64) * 100.0
        } else {
            0.0
        };

        HistorySummary {
            total,
            auto_approved,
            needs_review: total - auto_approved,
            automation_rate,
        }
    }
}

impl HistoryRow {
    pub fn from_result(result: &CampaignResult) -> Self {
        let request = result.request();
        Self {
            campaign_id: result.short_id().to_string(),
            timestamp: result.created_at().format("%Y-%m-%d %H:%M:%S").to_string(),
            target: format!("{} / {}", request.target_language(), request.target_region()),
            industry: request.industry().to_string(),
            status: result.status().display_name().to_string(),
        }
    }
}

impl HistorySummary {
    /// One-line description for logs and the CLI
    pub fn describe(&self) -> String {
        format!(
            "Total campaigns: {} | Auto-approved: {} | Needs review: {} | Automation rate: {:.1}%",
            self.total, self.auto_approved, self.needs_review, self.automation_rate
        )
    }
}

impl IntoIterator for CampaignHistory {
    type Item = CampaignResult;
    type IntoIter = std::vec::IntoIter<CampaignResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.into_iter()
    }
}

/*!
 * Campaign data model.
 *
 * - `labels`: enumerated languages, regions and industries
 * - `model`: `CampaignRequest`, `StageOutput`, `CampaignResult`
 * - `status`: deterministic status and priority classification
 * - `history`: caller-owned result log and dashboard metrics
 * - `samples`: built-in sample campaigns
 */

pub mod history;
pub mod labels;
pub mod model;
pub mod samples;
pub mod status;

pub use history::{CampaignHistory, HistoryRow, HistorySummary};
pub use labels::{Industry, Language, Region};
pub use model::{CampaignRequest, CampaignResult, StageName, StageOutput};
pub use status::{classify_status, extract_priority, CampaignStatus, Priority};

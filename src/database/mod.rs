/*!
 * Database module for persistent campaign history.
 *
 * This module provides SQLite-based persistence for processed campaigns so
 * the history log and its metrics survive between CLI runs.
 */

pub mod connection;
pub mod models;
pub mod repository;
pub mod schema;

pub use connection::DatabaseConnection;
pub use models::CampaignRecord;
pub use repository::Repository;

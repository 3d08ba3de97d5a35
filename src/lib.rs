pub mod config;
pub mod domain;
pub mod errors;
pub mod ingest;
pub mod scoring;
pub mod services;
pub mod stats;

pub use config::ScoringSettings;
pub use domain::{Match, RawRow};
pub use errors::RankingError;
pub use scoring::{DailyHighlights, DailySnapshot, Movement};
pub use services::StandingsService;
pub use stats::HeadToHeadRecord;

pub mod config;
pub mod report;

pub use config::{DetectConfig, CONFIG_ENV};
pub use report::{DetectionReport, FlaggedEntry, PageFailure, StatisticEntry};

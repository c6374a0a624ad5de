pub mod config;
pub mod error;
pub mod labels;
pub mod platform;
pub mod reconcile;
pub mod report;
pub mod workflow;

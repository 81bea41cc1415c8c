//! Risk register client core.
//!
//! Scoring and aggregation are pure functions. The preview synchronizer, stats reporter
//! and record operations talk to the host page only through the traits in [`surface`],
//! and to the remote register only through [`client::RiskApi`].

pub mod aggregate;
pub mod classifier;
pub mod client;
pub mod domain;
pub mod import;
pub mod operations;
pub mod preview;
pub mod recommendations;
pub mod router;
pub mod stats;
pub mod surface;

mod page;

#[cfg(test)]
mod tests;

pub use aggregate::{aggregate, inconsistent_records, LevelShare, RiskCounts};
pub use classifier::{classify, Classification};
pub use client::{ApiError, HttpRiskApi, RiskApi};
pub use domain::{RiskId, RiskLevel, RiskRecord, RiskStatus, RiskSubmission, SubmissionError};
pub use import::{ImportError, RiskCsvImporter};
pub use operations::{CreateError, DeleteOutcome, RecordOperations};
pub use page::{init_page, PageSession};
pub use preview::{
    HtmlPreviewRenderer, InputEvent, PreviewInput, PreviewRenderer, PreviewSynchronizer,
    PreviewView, SyncState, TextPreviewRenderer,
};
pub use recommendations::RecommendationSet;
pub use router::register_router;
pub use stats::{StatsOutcome, StatsReporter};
pub use surface::{
    DisplaySurface, FormSurface, Navigator, Notice, PageBindings, RegionContent,
    UserInteraction, View,
};

/// Placeholder shown wherever a risk has no title.
pub const UNTITLED_PLACEHOLDER: &str = "Untitled";

pub mod analysis;
pub mod config;
pub mod review;
pub mod signals;

pub use analysis::{AnalysisReport, Verdict};
pub use config::{Config, LocaleIndicators};
pub use review::{NewReview, ReviewRecord, ReviewStatus};
pub use signals::*;

pub mod analysis;
pub mod cache;
pub mod classifier;

pub use analysis::AnalysisService;
pub use cache::AnalysisCache;
pub use classifier::FakeReviewClassifier;

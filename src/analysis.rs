// ! Sheet exploration: bounded samples, column summaries and pattern heuristics

pub mod explorer;
pub mod patterns;
pub mod summary;

// Re-export commonly used items
pub use explorer::{
    explore_workbook, render_insights, ExploreOptions, Insights, SheetAnalysis, INSIGHTS_END,
    INSIGHTS_START,
};
pub use patterns::{identify_patterns, PatternReport, Sample, SampleColumn};
pub use summary::{build_sample, SheetSummary};

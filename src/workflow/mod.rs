pub mod collect;
pub mod report;
pub mod summarize;

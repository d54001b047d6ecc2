pub mod git;
pub mod llm;
pub mod slack;

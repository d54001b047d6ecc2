pub mod language_model;
pub mod notifier;
pub mod version_control;

pub use language_model::LanguageModelService;
pub use notifier::NotifierService;
pub use version_control::{CommitDetails, VersionControlService};

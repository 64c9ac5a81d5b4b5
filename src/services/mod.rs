pub mod version_control;

pub use version_control::{VersionControlService, git_arguments};

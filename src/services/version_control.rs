use async_trait::async_trait;

use crate::domain::branch::BranchName;
use crate::domain::message::CommitMessage;
use crate::domain::remote::Remote;
use crate::domain::step::{PublishStep, StepStatus};
use crate::error::AppResult;

/// Argument vector passed to `git` for a step.
pub fn git_arguments(step: &PublishStep) -> Vec<String> {
    match step {
        PublishStep::StageAll => vec!["add".to_string(), ".".to_string()],
        PublishStep::Commit(message) => vec![
            "commit".to_string(),
            "-m".to_string(),
            message.as_str().to_string(),
        ],
        PublishStep::Push { remote, branch } => vec![
            "push".to_string(),
            remote.url.clone(),
            branch.as_str().to_string(),
        ],
    }
}

/// Errors are reserved for failing to run git at all; a git command that
/// runs and fails is reported through its [`StepStatus`].
#[async_trait]
pub trait VersionControlService: Send + Sync {
    async fn stage_all(&self) -> AppResult<StepStatus>;
    async fn commit(&self, message: &CommitMessage) -> AppResult<StepStatus>;
    async fn push(&self, remote: &Remote, branch: &BranchName) -> AppResult<StepStatus>;

    async fn run_step(&self, step: &PublishStep) -> AppResult<StepStatus> {
        match step {
            PublishStep::StageAll => self.stage_all().await,
            PublishStep::Commit(message) => self.commit(message).await,
            PublishStep::Push { remote, branch } => self.push(remote, branch).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::domain::remote::RemoteKind;

    #[test]
    fn stage_all_adds_current_directory() {
        assert_eq!(git_arguments(&PublishStep::StageAll), vec!["add", "."]);
    }

    #[test]
    fn commit_passes_message_as_single_argument() {
        let now = NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_opt(14, 30, 5)
            .unwrap();
        let message = CommitMessage::resolve("fix \"typo\"; rm -rf /", now);
        assert_eq!(
            git_arguments(&PublishStep::Commit(message)),
            vec!["commit", "-m", "fix \"typo\"; rm -rf /"]
        );
    }

    #[test]
    fn push_targets_url_and_branch() {
        let step = PublishStep::Push {
            remote: Remote::new(RemoteKind::Gitee, "https://gitee.com/a/b.git"),
            branch: BranchName::default(),
        };
        assert_eq!(
            git_arguments(&step),
            vec!["push", "https://gitee.com/a/b.git", "master"]
        );
    }
}

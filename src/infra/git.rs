use std::path::PathBuf;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, instrument};

use crate::domain::branch::BranchName;
use crate::domain::message::CommitMessage;
use crate::domain::remote::Remote;
use crate::domain::step::{PublishStep, StepStatus};
use crate::error::{AppError, AppResult};
use crate::services::{VersionControlService, git_arguments};

/// Runs the system `git` binary inside the workspace. Output, credential
/// prompts and diagnostics go straight to the user's terminal.
pub struct GitCli {
    workspace_root: PathBuf,
}

impl GitCli {
    pub fn new(workspace_root: PathBuf) -> Self {
        Self { workspace_root }
    }

    #[instrument(skip(self), fields(workspace = %self.workspace_root.display()))]
    async fn execute(&self, args: Vec<String>) -> AppResult<StepStatus> {
        debug!("spawning git");

        let mut cmd = Command::new("git");
        cmd.args(&args)
            .current_dir(&self.workspace_root)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        let status = cmd.status().await.map_err(|err| {
            let subcommand = args.first().map(String::as_str).unwrap_or_default();
            AppError::VersionControl(format!("failed to run git {subcommand}: {err}"))
        })?;

        let status = match status.code() {
            Some(code) => StepStatus::Exited(code),
            None => StepStatus::Terminated,
        };
        debug!(%status, "git finished");
        Ok(status)
    }
}

#[async_trait]
impl VersionControlService for GitCli {
    async fn stage_all(&self) -> AppResult<StepStatus> {
        self.execute(git_arguments(&PublishStep::StageAll)).await
    }

    async fn commit(&self, message: &CommitMessage) -> AppResult<StepStatus> {
        self.execute(git_arguments(&PublishStep::Commit(message.clone())))
            .await
    }

    async fn push(&self, remote: &Remote, branch: &BranchName) -> AppResult<StepStatus> {
        let step = PublishStep::Push {
            remote: remote.clone(),
            branch: branch.clone(),
        };
        self.execute(git_arguments(&step)).await
    }
}

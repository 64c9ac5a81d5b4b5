use std::path::PathBuf;

use async_trait::async_trait;
use tracing::info;

use crate::domain::branch::BranchName;
use crate::domain::message::CommitMessage;
use crate::domain::remote::Remote;
use crate::domain::step::{PublishStep, StepStatus};
use crate::error::AppResult;
use crate::services::{VersionControlService, git_arguments};

/// Prints the git commands a publish would run and reports each as successful.
pub struct DryRunGit {
    workspace_root: PathBuf,
}

impl DryRunGit {
    pub fn new(workspace_root: PathBuf) -> Self {
        Self { workspace_root }
    }

    fn show(&self, step: &PublishStep) -> AppResult<StepStatus> {
        let command = render_command(&git_arguments(step));
        info!(workspace = %self.workspace_root.display(), %command, "dry run");
        println!("[dry-run] {command}");
        Ok(StepStatus::Exited(0))
    }
}

/// Renders `git <args>` with POSIX single quoting where an argument needs it.
pub fn render_command(args: &[String]) -> String {
    let mut rendered = String::from("git");
    for arg in args {
        rendered.push(' ');
        rendered.push_str(&quote(arg));
    }
    rendered
}

fn quote(arg: &str) -> String {
    let plain = !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./:@+=,".contains(c));
    if plain {
        arg.to_string()
    } else {
        format!("'{}'", arg.replace('\'', r"'\''"))
    }
}

#[async_trait]
impl VersionControlService for DryRunGit {
    async fn stage_all(&self) -> AppResult<StepStatus> {
        self.show(&PublishStep::StageAll)
    }

    async fn commit(&self, message: &CommitMessage) -> AppResult<StepStatus> {
        self.show(&PublishStep::Commit(message.clone()))
    }

    async fn push(&self, remote: &Remote, branch: &BranchName) -> AppResult<StepStatus> {
        self.show(&PublishStep::Push {
            remote: remote.clone(),
            branch: branch.clone(),
        })
    }
}

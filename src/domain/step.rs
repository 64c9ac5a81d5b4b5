use std::fmt;

use crate::domain::branch::BranchName;
use crate::domain::message::CommitMessage;
use crate::domain::remote::{Remote, RemotePair};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishStep {
    StageAll,
    Commit(CommitMessage),
    Push { remote: Remote, branch: BranchName },
}

impl PublishStep {
    pub fn describe(&self) -> String {
        match self {
            PublishStep::StageAll => "Staging all changes".to_string(),
            PublishStep::Commit(message) => format!("Committing with message: {message}"),
            PublishStep::Push { remote, branch } => {
                format!("Pushing to {remote}, branch {branch}")
            }
        }
    }
}

/// Builds the fixed four-step sequence: stage, commit, push first, push second.
pub fn plan(message: CommitMessage, remotes: &RemotePair, branch: &BranchName) -> Vec<PublishStep> {
    let mut steps = vec![PublishStep::StageAll, PublishStep::Commit(message)];
    steps.extend(remotes.iter().map(|remote| PublishStep::Push {
        remote: remote.clone(),
        branch: branch.clone(),
    }));
    steps
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepStatus {
    Exited(i32),
    Terminated,
    LaunchFailed(String),
}

impl StepStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, StepStatus::Exited(0))
    }
}

impl fmt::Display for StepStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepStatus::Exited(code) => write!(f, "exit code {code}"),
            StepStatus::Terminated => f.write_str("terminated by signal"),
            StepStatus::LaunchFailed(reason) => write!(f, "could not run git: {reason}"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct StepOutcome {
    pub step: PublishStep,
    pub status: StepStatus,
}

#[derive(Debug, Clone, Default)]
pub struct PublishReport {
    pub outcomes: Vec<StepOutcome>,
}

impl PublishReport {
    pub fn failures(&self) -> impl Iterator<Item = &StepOutcome> {
        self.outcomes
            .iter()
            .filter(|outcome| !outcome.status.is_success())
    }

    pub fn all_succeeded(&self) -> bool {
        self.failures().next().is_none()
    }

    /// One line describing how many steps failed, or `None` if all succeeded.
    pub fn failure_summary(&self) -> Option<String> {
        if self.all_succeeded() {
            return None;
        }
        let failed = self.failures().count();
        Some(format!("{failed} of {} steps failed", self.outcomes.len()))
    }
}

use std::io::Write;

use tracing::{info, warn};

use crate::context::AppContext;
use crate::domain::message::CommitMessage;
use crate::domain::step::{self, PublishReport, StepOutcome, StepStatus};
use crate::error::AppResult;

pub const DONE_BANNER: &str = "==> Done!";

/// Runs stage, commit and both pushes in order. A failing step is recorded
/// and logged but never stops the remaining steps.
pub async fn publish_changes<W: Write>(
    ctx: &AppContext,
    message: CommitMessage,
    out: &mut W,
) -> AppResult<PublishReport> {
    let remotes = ctx.config.remotes()?;
    let steps = step::plan(message, &remotes, &ctx.config.branch);
    let total = steps.len();
    let mut report = PublishReport::default();

    for (index, step) in steps.into_iter().enumerate() {
        writeln!(out, "==> [{}/{}] {}", index + 1, total, step.describe())?;
        out.flush()?;

        let status = match ctx.version_control.run_step(&step).await {
            Ok(status) => status,
            Err(err) => StepStatus::LaunchFailed(err.to_string()),
        };

        if status.is_success() {
            info!(step = %step.describe(), "step completed");
        } else {
            warn!(step = %step.describe(), %status, "step failed; continuing");
        }
        report.outcomes.push(StepOutcome { step, status });
    }

    writeln!(out, "{DONE_BANNER}")?;
    out.flush()?;
    Ok(report)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use chrono::NaiveDate;

    use super::*;
    use crate::config::AppConfig;
    use crate::domain::branch::BranchName;
    use crate::domain::remote::Remote;
    use crate::error::AppError;
    use crate::services::VersionControlService;

    #[derive(Default)]
    struct RecordingGit {
        calls: Mutex<Vec<String>>,
        fail_commit: bool,
        unreachable_push: bool,
    }

    impl RecordingGit {
        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        fn record(&self, call: String) {
            self.calls.lock().unwrap().push(call);
        }
    }

    #[async_trait]
    impl VersionControlService for RecordingGit {
        async fn stage_all(&self) -> AppResult<StepStatus> {
            self.record("add".to_string());
            Ok(StepStatus::Exited(0))
        }

        async fn commit(&self, message: &CommitMessage) -> AppResult<StepStatus> {
            self.record(format!("commit {message}"));
            if self.fail_commit {
                Ok(StepStatus::Exited(1))
            } else {
                Ok(StepStatus::Exited(0))
            }
        }

        async fn push(&self, remote: &Remote, branch: &BranchName) -> AppResult<StepStatus> {
            self.record(format!("push {} {branch}", remote.url));
            if self.unreachable_push {
                Err(AppError::VersionControl("git not found".to_string()))
            } else {
                Ok(StepStatus::Exited(0))
            }
        }
    }

    fn config(gitee: Option<&str>, github: Option<&str>) -> AppConfig {
        AppConfig {
            gitee_url: gitee.map(str::to_string),
            github_url: github.map(str::to_string),
            branch: BranchName::default(),
            workspace_root: PathBuf::from("."),
        }
    }

    fn context(git: Arc<RecordingGit>) -> AppContext {
        AppContext::new(
            config(Some("https://gitee.com/a/b.git"), Some("https://github.com/a/b.git")),
            git,
        )
    }

    fn message(text: &str) -> CommitMessage {
        let now = NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_opt(14, 30, 5)
            .unwrap();
        CommitMessage::resolve(text, now)
    }

    #[tokio::test]
    async fn runs_all_steps_in_order() {
        let git = Arc::new(RecordingGit::default());
        let ctx = context(git.clone());
        let mut out = Vec::<u8>::new();

        let report = publish_changes(&ctx, message("fix typo"), &mut out)
            .await
            .unwrap();

        assert_eq!(
            git.calls(),
            vec![
                "add",
                "commit fix typo",
                "push https://gitee.com/a/b.git master",
                "push https://github.com/a/b.git master",
            ]
        );
        assert!(report.all_succeeded());
        assert_eq!(report.outcomes.len(), 4);
    }

    #[tokio::test]
    async fn prints_a_banner_per_step_and_done() {
        let ctx = context(Arc::new(RecordingGit::default()));
        let mut out = Vec::<u8>::new();

        publish_changes(&ctx, message(""), &mut out).await.unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "==> [1/4] Staging all changes",
                "==> [2/4] Committing with message: Auto commit: 2024-01-15 14:30:05",
                "==> [3/4] Pushing to Gitee (https://gitee.com/a/b.git), branch master",
                "==> [4/4] Pushing to GitHub (https://github.com/a/b.git), branch master",
                "==> Done!",
            ]
        );
    }

    #[tokio::test]
    async fn keeps_going_after_failures() {
        let git = Arc::new(RecordingGit {
            fail_commit: true,
            unreachable_push: true,
            ..RecordingGit::default()
        });
        let ctx = context(git.clone());
        let mut out = Vec::<u8>::new();

        let report = publish_changes(&ctx, message("wip"), &mut out)
            .await
            .unwrap();

        assert_eq!(git.calls().len(), 4);
        assert_eq!(report.failures().count(), 3);
        assert_eq!(report.outcomes[1].status, StepStatus::Exited(1));
        assert!(matches!(
            report.outcomes[3].status,
            StepStatus::LaunchFailed(_)
        ));
        assert!(String::from_utf8(out).unwrap().ends_with("==> Done!\n"));
    }

    #[tokio::test]
    async fn missing_remote_stops_before_any_git_command() {
        let git = Arc::new(RecordingGit::default());
        let ctx = AppContext::new(config(Some("https://gitee.com/a/b.git"), None), git.clone());
        let mut out = Vec::<u8>::new();

        let result = publish_changes(&ctx, message("wip"), &mut out).await;

        assert!(matches!(result, Err(AppError::Configuration(_))));
        assert!(git.calls().is_empty());
        assert!(out.is_empty());
    }
}

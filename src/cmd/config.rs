use std::io::{self, BufRead, Write};

use clap::{Args, Subcommand};

use crate::config::{StoredConfig, config_file_path};
use crate::domain::branch::{BranchName, DEFAULT_BRANCH};
use crate::error::AppResult;

#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommand {
    /// Run the interactive configuration wizard.
    Init,
    /// Show the stored configuration (credentials in URLs masked).
    Show,
}

pub fn run(command: ConfigCommand) -> AppResult<()> {
    match command {
        ConfigCommand::Init => run_init(),
        ConfigCommand::Show => run_show(),
    }
}

fn run_init() -> AppResult<()> {
    let mut cfg = StoredConfig::load()?;
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();

    println!("Configuring dualpush.");
    println!("Press Enter to keep the current value, '-' to clear it.");
    println!();

    apply_prompt(
        &mut input,
        &mut output,
        "Gitee remote URL (e.g., https://gitee.com/user/repo.git)",
        &mut cfg.gitee_url,
    )?;
    apply_prompt(
        &mut input,
        &mut output,
        "GitHub remote URL (e.g., https://github.com/user/repo.git)",
        &mut cfg.github_url,
    )?;
    apply_prompt(
        &mut input,
        &mut output,
        &format!("Branch to push (default {DEFAULT_BRANCH})"),
        &mut cfg.branch,
    )?;

    if let Some(branch) = &cfg.branch {
        BranchName::parse(branch)?;
    }

    cfg.save()?;

    let path = config_file_path()?;
    println!("\nConfiguration saved to {}", path.display());
    Ok(())
}

fn run_show() -> AppResult<()> {
    let cfg = StoredConfig::load()?;
    let path = config_file_path()?;

    println!("Configuration file: {}", path.display());
    println!("Gitee remote URL: {}", display_url(&cfg.gitee_url));
    println!("GitHub remote URL: {}", display_url(&cfg.github_url));
    println!(
        "Branch: {}",
        cfg.branch.as_deref().unwrap_or(DEFAULT_BRANCH)
    );

    Ok(())
}

fn apply_prompt<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    field: &str,
    target: &mut Option<String>,
) -> AppResult<()> {
    match prompt(input, output, field, target.as_deref())? {
        PromptAction::Keep => {}
        PromptAction::Clear => *target = None,
        PromptAction::Set(value) => *target = Some(value),
    }
    Ok(())
}

fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    field: &str,
    current: Option<&str>,
) -> AppResult<PromptAction> {
    match current {
        Some(value) => write!(
            output,
            "{field} [{}] (Enter to keep, '-' to clear): ",
            redact_url(value)
        )?,
        None => write!(output, "{field} (Enter to skip): ")?,
    }
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    let trimmed = line.trim();

    if trimmed.is_empty() {
        Ok(PromptAction::Keep)
    } else if trimmed == "-" {
        Ok(PromptAction::Clear)
    } else {
        Ok(PromptAction::Set(trimmed.to_string()))
    }
}

fn display_url(value: &Option<String>) -> String {
    value
        .as_deref()
        .filter(|v| !v.is_empty())
        .map(redact_url)
        .unwrap_or_else(|| "<not set>".to_string())
}

/// Masks `user:token@` credentials embedded in an http(s) remote URL.
fn redact_url(url: &str) -> String {
    let Some((scheme, rest)) = url.split_once("://") else {
        return url.to_string();
    };
    let authority_end = rest.find('/').unwrap_or(rest.len());
    match rest[..authority_end].rfind('@') {
        Some(at) => format!("{scheme}://***{}", &rest[at..]),
        None => url.to_string(),
    }
}

#[derive(Debug, PartialEq, Eq)]
enum PromptAction {
    Keep,
    Clear,
    Set(String),
}

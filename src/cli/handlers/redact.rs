//! Redaction and preview handlers for histscrub CLI

use crate::cli::CliApp;
use crate::cli::args::*;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::history::ShellHistory;
use crate::shell;
use std::fs;
use std::path::{Path, PathBuf};

pub fn handle_redact(app: &CliApp, args: &RedactArgs) -> Result<()> {
    let history = load_history(app, args.shell, args.file.as_deref())?;

    let stats = history.stats();
    app.verbose_println(&format!(
        "Kept {} of {} records ({} dropped)",
        stats.records_kept, stats.records_read, stats.records_dropped
    ));

    let output = serde_json::to_string_pretty(&history)?;
    if let Some(output_file) = &args.output {
        fs::write(output_file, output)?;
        if !app.quiet {
            println!(
                "Wrote {} redacted commands to {}",
                history.len(),
                output_file.display()
            );
        }
    } else {
        println!("{}", output);
    }

    Ok(())
}

pub fn handle_preview(app: &CliApp, args: &PreviewArgs) -> Result<()> {
    let history = load_history(app, args.shell, args.file.as_deref())?;
    let lines = args.lines.unwrap_or(app.config.preview.lines);

    println!(
        "Here's a preview of your shell history file ({} {} total commands) with options and arguments stripped:\n",
        history.file_name,
        history.len()
    );
    println!("{}", history.preview_range(args.start, lines));

    Ok(())
}

fn load_history(
    app: &CliApp,
    shell_arg: Option<ShellType>,
    file: Option<&Path>,
) -> Result<ShellHistory> {
    let env_shell = std::env::var("SHELL").ok();
    let shell = resolve_shell(shell_arg, file, env_shell.as_deref())?;

    let path = match file {
        Some(path) => path.to_path_buf(),
        None => locate_history_file(&app.config, shell)?,
    };
    app.verbose_println(&format!(
        "Redacting {} as {} history",
        path.display(),
        shell
    ));

    app.history.redact_file(&path, shell)?.ok_or_else(|| {
        Error::invalid_arguments(format!(
            "{} does not look like a {} history file",
            path.display(),
            shell
        ))
    })
}

/// Pick the dialect: explicit flag, then the file name, then `$SHELL`
pub fn resolve_shell(
    shell_arg: Option<ShellType>,
    file: Option<&Path>,
    env_shell: Option<&str>,
) -> Result<shell::ShellType> {
    if let Some(shell) = shell_arg {
        return Ok(shell.into());
    }

    let from_file = file
        .map(|path| shell::ShellType::classify(&path.to_string_lossy()))
        .filter(|shell| *shell != shell::ShellType::Unknown);
    let from_env = env_shell
        .map(shell::ShellType::from_shell_path)
        .filter(|shell| *shell != shell::ShellType::Unknown);

    from_file
        .or(from_env)
        .ok_or_else(|| Error::invalid_arguments("cannot tell the shell type, pass --shell"))
}

/// Find a history file for `shell`.
///
/// The configured default path wins if it exists. Otherwise the search
/// directories are scanned for a file whose name contains `history` and
/// classifies as `shell`.
pub fn locate_history_file(config: &Config, shell: shell::ShellType) -> Result<PathBuf> {
    if let Some(path) = config.history_path_for(shell) {
        if path.is_file() {
            return Ok(path.clone());
        }
    }

    for dir in &config.import.search_dirs {
        let Ok(entries) = fs::read_dir(dir) else {
            tracing::debug!("Cannot search {} for history files", dir.display());
            continue;
        };
        let mut names: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().is_file())
            .map(|entry| entry.file_name().to_string_lossy().to_string())
            .filter(|name| name.contains("history") && shell::ShellType::classify(name) == shell)
            .collect();
        names.sort();
        if let Some(name) = names.into_iter().next() {
            return Ok(dir.join(name));
        }
    }

    Err(Error::HistoryFileNotFound {
        path: config
            .history_path_for(shell)
            .cloned()
            .unwrap_or_else(|| PathBuf::from(format!("{}_history", shell.as_str()))),
    })
}

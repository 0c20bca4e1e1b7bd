//! History file processing for histscrub
//!
//! Reads a shell history file, groups its physical lines into one record per
//! issued command according to the file's dialect, pulls out the timestamp
//! and command text, and redacts every record that parses. Records that do
//! not parse are dropped; only I/O failures abort the file.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::redaction::{CommandRedactor, RedactedCommand};
use crate::shell::ShellType;
use chrono::{DateTime, Utc};
use regex::Regex;
use serde::Serialize;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::LazyLock;
use tracing::{debug, info, warn};

/// Zsh extended history line: `: <start>:<elapsed>;<command>`
pub static ZSH_HISTORY_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^: (\d+):\d+;(.*)$").expect("zsh history regex compiles"));

const FISH_CMD_PREFIX: &str = "- cmd:";
const FISH_WHEN_PREFIX: &str = "when:";

/// The redacted model of one shell history file
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ShellHistory {
    pub file_name: String,
    pub shell_type: ShellType,
    pub redacted_lines: Vec<RedactedCommand>,
    #[serde(skip)]
    records_read: usize,
}

/// Counts gathered while processing a history file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HistoryStats {
    /// Records assembled from the file
    pub records_read: usize,
    /// Records that produced a redacted command
    pub records_kept: usize,
    /// Records dropped because they did not parse
    pub records_dropped: usize,
}

impl ShellHistory {
    fn new(file_name: String, shell_type: ShellType) -> Self {
        Self {
            file_name,
            shell_type,
            redacted_lines: Vec::new(),
            records_read: 0,
        }
    }

    /// Summary of how many records were kept and dropped
    pub fn stats(&self) -> HistoryStats {
        HistoryStats {
            records_read: self.records_read,
            records_kept: self.redacted_lines.len(),
            records_dropped: self.records_read - self.redacted_lines.len(),
        }
    }

    pub fn len(&self) -> usize {
        self.redacted_lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.redacted_lines.is_empty()
    }

    /// Render previews of up to `count` commands starting at `start`,
    /// followed by how many commands remain after them
    pub fn preview_range(&self, start: usize, count: usize) -> String {
        let end = start.saturating_add(count).min(self.redacted_lines.len());
        let start = start.min(end);

        let mut out = String::new();
        for cmd in &self.redacted_lines[start..end] {
            out.push_str(&cmd.preview());
            out.push('\n');
        }
        out.push_str(&format!(
            "... plus {} other redacted commands.\n",
            self.redacted_lines.len() - end
        ));
        out
    }
}

/// The 1 or 2 trimmed physical lines that make up one command record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    pub lines: Vec<String>,
}

/// Line source with one line of lookahead
struct LineReader<R> {
    reader: R,
    peeked: Option<Option<String>>,
}

impl<R: BufRead> LineReader<R> {
    fn new(reader: R) -> Self {
        Self {
            reader,
            peeked: None,
        }
    }

    /// Next trimmed line, or `None` at end of stream
    fn next_line(&mut self) -> Result<Option<String>> {
        match self.peeked.take() {
            Some(line) => Ok(line),
            None => self.read_line(),
        }
    }

    fn peek_line(&mut self) -> Result<Option<&str>> {
        if self.peeked.is_none() {
            self.peeked = Some(self.read_line()?);
        }
        Ok(self.peeked.as_ref().and_then(|line| line.as_deref()))
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        let mut buf = Vec::new();
        if self.reader.read_until(b'\n', &mut buf)? == 0 {
            return Ok(None);
        }
        // Zsh metafies non-ASCII bytes, so history files are not always UTF-8
        Ok(Some(String::from_utf8_lossy(&buf).trim().to_string()))
    }
}

/// Groups physical lines into [`RawRecord`]s for one dialect
///
/// Fish records start at a `- cmd:` line and take the `when:` line after
/// it when there is one; `paths:` blocks and any other lines between entries
/// are skipped. A `- cmd:` line at end of stream ends the stream. Bash
/// records are two lines when the first is a `#<epoch>` header and one line
/// otherwise, decided per record. A header directly followed by another
/// header has no command of its own and is skipped instead of consuming
/// that header as its command. Every other dialect is one line per record.
pub struct RecordAssembler<R> {
    lines: LineReader<R>,
    shell: ShellType,
    failed: bool,
}

impl<R: BufRead> RecordAssembler<R> {
    pub fn new(reader: R, shell: ShellType) -> Self {
        Self {
            lines: LineReader::new(reader),
            shell,
            failed: false,
        }
    }

    fn next_record(&mut self) -> Result<Option<RawRecord>> {
        loop {
            let Some(first) = self.lines.next_line()? else {
                return Ok(None);
            };

            match self.shell {
                ShellType::Fish => {
                    if !first.starts_with(FISH_CMD_PREFIX) {
                        debug!("Skipping fish history line outside a cmd entry");
                        continue;
                    }
                    let has_when = match self.lines.peek_line()? {
                        None => return Ok(None),
                        Some(next) => next.starts_with(FISH_WHEN_PREFIX),
                    };
                    let mut lines = vec![first];
                    if has_when {
                        lines.extend(self.lines.next_line()?);
                    }
                    return Ok(Some(RawRecord { lines }));
                }
                ShellType::Bash if is_bash_timestamp_header(&first) => {
                    match self.lines.peek_line()? {
                        None => return Ok(None),
                        Some(next) if is_bash_timestamp_header(next) => {
                            debug!("Skipping bash timestamp header with no command");
                            continue;
                        }
                        Some(_) => {}
                    }
                    let Some(command) = self.lines.next_line()? else {
                        return Ok(None);
                    };
                    return Ok(Some(RawRecord {
                        lines: vec![first, command],
                    }));
                }
                _ => return Ok(Some(RawRecord { lines: vec![first] })),
            }
        }
    }
}

impl<R: BufRead> Iterator for RecordAssembler<R> {
    type Item = Result<RawRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match self.next_record() {
            Ok(record) => record.map(Ok),
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}

/// Whether a trimmed bash history line is a `#<integer>` timestamp header
pub fn is_bash_timestamp_header(line: &str) -> bool {
    line.strip_prefix('#')
        .is_some_and(|rest| rest.parse::<i64>().is_ok())
}

fn parse_epoch(digits: &str) -> Result<DateTime<Utc>> {
    digits
        .parse::<i64>()
        .ok()
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .ok_or_else(|| Error::InvalidTimestamp {
            timestamp: digits.to_string(),
        })
}

/// Extract the timestamp and command text from a record's trimmed lines
pub fn parse_lines(shell: ShellType, lines: &[String]) -> Result<(Option<DateTime<Utc>>, String)> {
    let first = lines.first().ok_or(Error::EmptyCommand)?;

    match shell {
        ShellType::Zsh => match ZSH_HISTORY_LINE.captures(first) {
            Some(caps) => {
                let timestamp = parse_epoch(&caps[1])?;
                Ok((Some(timestamp), caps[2].to_string()))
            }
            // Plain zsh history without the extended marker
            None => Ok((None, first.clone())),
        },
        ShellType::Bash => match lines.get(1) {
            Some(command) => {
                let digits = first.strip_prefix('#').unwrap_or(first.as_str());
                let timestamp = parse_epoch(digits)?;
                Ok((Some(timestamp), command.clone()))
            }
            None => Ok((None, first.clone())),
        },
        ShellType::Fish => {
            let command = first
                .strip_prefix(FISH_CMD_PREFIX)
                .map(str::trim_start)
                .ok_or_else(|| Error::InvalidRecord {
                    reason: "fish entry does not start with `- cmd:`".to_string(),
                })?;
            let timestamp = lines
                .get(1)
                .and_then(|line| line.strip_prefix(FISH_WHEN_PREFIX))
                .and_then(|digits| parse_epoch(digits.trim()).ok());
            Ok((timestamp, command.to_string()))
        }
        ShellType::Unknown => Ok((None, first.clone())),
    }
}

/// Redacts whole history files
#[derive(Debug, Clone, Default)]
pub struct HistoryRedactor {
    redactor: CommandRedactor,
}

impl HistoryRedactor {
    /// Create a history redactor with the given configuration
    pub fn new(config: &Config) -> Self {
        Self {
            redactor: CommandRedactor::from_config(&config.redaction),
        }
    }

    /// Create a history redactor around an existing command redactor
    pub fn with_redactor(redactor: CommandRedactor) -> Self {
        Self { redactor }
    }

    /// Redact the history file at `path`.
    ///
    /// Returns `Ok(None)` when the file name does not classify as
    /// `target`. Open and read failures are errors for the whole file.
    pub fn redact_file(&self, path: &Path, target: ShellType) -> Result<Option<ShellHistory>> {
        if !path.exists() {
            return Err(Error::HistoryFileNotFound {
                path: path.to_path_buf(),
            });
        }

        info!("Reading history file {}", path.display());
        let file = File::open(path)?;

        let file_name = path.to_string_lossy().to_string();
        let shell = ShellType::classify(&file_name);
        if shell != target {
            debug!(
                "History file {} looks like {}, not {}",
                file_name, shell, target
            );
            return Ok(None);
        }

        self.redact_reader(BufReader::new(file), file_name, shell)
            .map(Some)
    }

    /// Redact history read from any buffered source
    pub fn redact_reader<R: BufRead>(
        &self,
        reader: R,
        file_name: String,
        shell: ShellType,
    ) -> Result<ShellHistory> {
        let mut history = ShellHistory::new(file_name, shell);

        for record in RecordAssembler::new(reader, shell) {
            let record = record.inspect_err(|e| {
                warn!("Error reading history file {}: {}", history.file_name, e);
            })?;
            history.records_read += 1;
            if let Some(redacted) = self.redact_record(shell, &record.lines) {
                history.redacted_lines.push(redacted);
            }
        }

        Ok(history)
    }

    /// Redact a single record, or `None` if any part of it fails to parse
    pub fn redact_record(&self, shell: ShellType, lines: &[String]) -> Option<RedactedCommand> {
        let result = parse_lines(shell, lines)
            .and_then(|(timestamp, command)| self.redactor.redact_line(&command, timestamp));

        match result {
            Ok(redacted) => Some(redacted),
            Err(e) => {
                debug!(category = e.category(), "Dropping history record: {}", e);
                None
            }
        }
    }
}

//! Problem-definition files.
//!
//! A problem file is plain text with up to three sections, each introduced by
//! a marker line that must match exactly:
//!
//! ```text
//! PROBLEM:
//! Statement, possibly hard-wrapped.
//!
//! CASES:
//! 1, 2
//! expected output for `script 1 2`
//! ```
//!
//! `ANSWER:` may be used instead of `CASES:` when the script takes no parameters.

use std::path::{Path, PathBuf};

use serde::Serialize;

pub const PROBLEM_MARKER: &str = "PROBLEM:";
pub const ANSWER_MARKER: &str = "ANSWER:";
pub const CASES_MARKER: &str = "CASES:";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Case {
    pub params: Vec<String>,
    pub expected: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProblemSpec {
    pub statement: String,
    pub bare_answer: String,
    pub cases: Vec<Case>,
    pub source_path: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Idle,
    InStatement,
    AwaitingAnswer,
    InCases,
}

impl ProblemSpec {
    pub fn from_file(path: impl AsRef<Path>) -> fsutil::Result<Self> {
        let path = path.as_ref();
        let text = fsutil::read_to_string(path)?;
        Ok(Self::parse(&text, path))
    }

    /// A spec with nothing to compare against. Scripts are still run once.
    pub fn informational(source_path: impl Into<PathBuf>) -> Self {
        Self {
            statement: String::new(),
            bare_answer: String::new(),
            cases: Vec::new(),
            source_path: source_path.into(),
        }
    }

    /// Never fails: anything not understood is skipped.
    pub fn parse(text: &str, source_path: impl Into<PathBuf>) -> Self {
        use ScanState::*;

        let mut state = Idle;
        let mut statement_lines: Vec<&str> = Vec::new();
        let mut bare_answer = String::new();
        let mut blocks: Vec<Vec<&str>> = Vec::new();
        let mut block: Vec<&str> = Vec::new();

        for line in text.lines() {
            let next_state = match line {
                PROBLEM_MARKER => Some(InStatement),
                ANSWER_MARKER => Some(AwaitingAnswer),
                CASES_MARKER => Some(InCases),
                _ => None,
            };
            if let Some(next_state) = next_state {
                if !block.is_empty() {
                    blocks.push(std::mem::take(&mut block));
                }
                state = next_state;
                continue;
            }

            match state {
                Idle => (),
                InStatement => statement_lines.push(line),
                AwaitingAnswer => {
                    bare_answer = line.to_owned();
                    state = Idle;
                }
                InCases if line.is_empty() => {
                    if !block.is_empty() {
                        blocks.push(std::mem::take(&mut block));
                    }
                }
                InCases => block.push(line),
            }
        }
        if !block.is_empty() {
            blocks.push(block);
        }

        // Case blocks always win over a bare answer found in the same file.
        let cases = if blocks.is_empty() && !bare_answer.is_empty() {
            Vec::new()
        } else {
            bare_answer.clear();
            blocks.iter().filter_map(|b| parse_case_block(b)).collect()
        };

        Self {
            statement: clean_paragraph(statement_lines),
            bare_answer,
            cases,
            source_path: source_path.into(),
        }
    }

    pub fn has_expectation(&self) -> bool {
        !self.bare_answer.is_empty() || !self.cases.is_empty()
    }

    /// The statement, or a title derived from the file path when there is none.
    pub fn introduction(&self) -> String {
        if self.statement.is_empty() {
            self.file_intro()
        } else {
            self.statement.clone()
        }
    }

    pub fn file_intro(&self) -> String {
        file_intro(&self.source_path.to_string_lossy())
    }
}

/// `"problems/euler/001.txt"` => `"problems euler 001"`
pub fn file_intro(path: &str) -> String {
    let mut parts: Vec<&str> = path.split('/').collect();
    if let Some(last) = parts.last_mut() {
        if let Some((stem, _ext)) = last.rsplit_once('.') {
            *last = stem;
        }
    }
    parts.join(" ")
}

/// Joins hard-wrapped lines into one line per paragraph.
/// Lines starting with whitespace are kept as they are.
pub fn clean_paragraph<S: AsRef<str>>(lines: Vec<S>) -> String {
    let mut lines: Vec<String> = lines.iter().map(|s| s.as_ref().to_owned()).collect();

    for i in (0..lines.len().saturating_sub(1)).rev() {
        let next = &lines[i + 1];
        let indented = next.starts_with(char::is_whitespace);
        if !lines[i].is_empty() && !next.is_empty() && !indented {
            let next = lines.remove(i + 1);
            lines[i].push(' ');
            lines[i].push_str(&next);
        }
    }
    lines.join("\n").trim().to_owned()
}

/// `"the quick, brown, fox"` => `["the quick", "brown", "fox"]`
pub fn parse_params(line: &str) -> Vec<String> {
    if line.trim().is_empty() {
        return Vec::new();
    }
    line.split(',').map(|p| p.trim().to_owned()).collect()
}

fn parse_case_block(block: &[&str]) -> Option<Case> {
    let [params, answer @ ..] = block else {
        return None;
    };
    if answer.is_empty() {
        log::debug!("Skipping case block without answer: {:?}", params);
        return None;
    }
    Some(Case {
        params: parse_params(params),
        expected: answer.join("\n"),
    })
}

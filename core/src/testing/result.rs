use std::time::Duration;

use super::diff::{line_diff, LineDiff};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutput {
    pub status: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum Verdict {
    #[strum(serialize = "PASS")]
    Pass,
    #[strum(serialize = "FAIL")]
    Fail,
    #[strum(serialize = "ERR")]
    Error,
    #[strum(serialize = "TLE")]
    Timeout,
    /// Ran fine, but there was no expected answer to compare with.
    #[strum(serialize = "INFO")]
    Unjudged,
}

#[derive(Debug, Clone)]
pub struct CaseResult {
    pub verdict: Verdict,
    /// Trimmed stdout. Empty on timeout.
    pub actual_output: String,
    pub expected: Option<String>,
    /// Absent when the process had to be killed.
    pub output: Option<ProcessOutput>,
    pub duration: Duration,
    pub process_error: Option<String>,
}

impl CaseResult {
    pub(crate) fn timed_out_after(duration: Duration, expected: Option<String>) -> Self {
        Self {
            verdict: Verdict::Timeout,
            actual_output: String::new(),
            expected,
            output: None,
            duration,
            process_error: None,
        }
    }

    pub(crate) fn errored(
        output: ProcessOutput,
        duration: Duration,
        expected: Option<String>,
        process_error: String,
    ) -> Self {
        Self {
            verdict: Verdict::Error,
            actual_output: output.stdout.trim().to_owned(),
            expected,
            output: Some(output),
            duration,
            process_error: Some(process_error),
        }
    }

    pub(crate) fn judged(output: ProcessOutput, duration: Duration, expected: Option<String>) -> Self {
        let actual_output = output.stdout.trim().to_owned();
        let verdict = match &expected {
            None => Verdict::Unjudged,
            Some(want) if want.trim() == actual_output => Verdict::Pass,
            Some(_) => Verdict::Fail,
        };
        Self {
            verdict,
            actual_output,
            expected,
            output: Some(output),
            duration,
            process_error: None,
        }
    }

    pub fn matched(&self) -> bool {
        self.verdict == Verdict::Pass
    }

    pub fn timed_out(&self) -> bool {
        self.verdict == Verdict::Timeout
    }

    /// Only a wrong answer has a diff.
    pub fn diff(&self) -> Option<LineDiff<'_>> {
        match (&self.verdict, &self.expected) {
            (Verdict::Fail, Some(want)) => Some(line_diff(want.trim(), &self.actual_output)),
            _ => None,
        }
    }
}

use super::{result::CaseResult, testcase::Testcase};
use crate::problem::ProblemSpec;

/// Receives harness progress. Implementations decide how (or whether) to show it.
pub trait Reporter {
    fn run_started(&mut self, _spec: &ProblemSpec) {}

    fn case_started(&mut self, _testcase: &Testcase, _argv: &[String]) {}

    fn case_finished(&mut self, testcase: &Testcase, result: &CaseResult);
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentReporter;

impl Reporter for SilentReporter {
    fn case_finished(&mut self, _testcase: &Testcase, _result: &CaseResult) {}
}

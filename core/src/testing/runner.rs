use std::{
    fmt,
    path::PathBuf,
    process::Stdio,
    time::Duration,
};

use anyhow::Context as _;
use tokio::{io::AsyncReadExt as _, process::Command, time::Instant};

use super::{reporter::Reporter, result::*, testcase::Testcase};
use crate::problem::ProblemSpec;

/// How to run a script: a program plus fixed leading arguments, e.g. `go run`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    program: String,
    leading_args: Vec<String>,
}

impl Invocation {
    pub fn new(
        program: impl Into<String>,
        leading_args: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            program: program.into(),
            leading_args: leading_args.into_iter().map(Into::into).collect(),
        }
    }

    /// `None` if `argv` is empty.
    pub fn from_argv<S: Into<String>>(argv: impl IntoIterator<Item = S>) -> Option<Self> {
        let mut argv = argv.into_iter().map(Into::into);
        let program: String = argv.next()?;
        Some(Self {
            program,
            leading_args: argv.collect(),
        })
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn leading_args(&self) -> &[String] {
        &self.leading_args
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.leading_args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct Harness {
    invocation: Invocation,
    script: PathBuf,
    timeout: Duration,
}

impl Harness {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

    pub fn new(invocation: Invocation, script: impl Into<PathBuf>) -> Self {
        Self {
            invocation,
            script: script.into(),
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    pub fn timeout(mut self, limit: Duration) -> Self {
        self.timeout = limit;
        self
    }

    pub fn get_timeout(&self) -> Duration {
        self.timeout
    }

    pub fn get_invocation(&self) -> &Invocation {
        &self.invocation
    }

    /// invocation ++ script ++ params
    pub fn argv(&self, params: &[String]) -> Vec<String> {
        let mut argv = Vec::with_capacity(2 + self.invocation.leading_args.len() + params.len());
        argv.push(self.invocation.program.clone());
        argv.extend(self.invocation.leading_args.iter().cloned());
        argv.push(self.script.to_string_lossy().into_owned());
        argv.extend(params.iter().cloned());
        argv
    }

    /// Runs every testcase of `spec` in order.
    /// Stops at the first error that leaves the harness unable to observe the script.
    pub async fn run_all<R>(
        &self,
        spec: &ProblemSpec,
        reporter: &mut R,
    ) -> anyhow::Result<Vec<CaseResult>>
    where
        R: Reporter + ?Sized,
    {
        reporter.run_started(spec);
        let testcases = Testcase::enumerate(spec);
        let mut results = Vec::with_capacity(testcases.len());
        for t in &testcases {
            reporter.case_started(t, &self.argv(&t.params));
            let res = self
                .run(t)
                .await
                .with_context(|| format!("Aborted at {}", t.name))?;
            reporter.case_finished(t, &res);
            results.push(res);
        }
        Ok(results)
    }

    pub async fn run(&self, testcase: &Testcase) -> anyhow::Result<CaseResult> {
        let mut cmd = Command::new(self.invocation.program());
        cmd.args(self.invocation.leading_args())
            .arg(&self.script)
            .args(&testcase.params)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let start_at = Instant::now();
        let mut proc = cmd
            .spawn()
            .with_context(|| format!("Failed to spawn '{}'", self.argv(&testcase.params).join(" ")))?;
        let mut stdout = proc.stdout.take().context("Failed to open stdout")?;
        let mut stderr = proc.stderr.take().context("Failed to open stderr")?;

        let mut stdout_buf = Vec::new();
        let mut stderr_buf = Vec::new();

        // Both pipes are drained together so that the child never blocks on a full pipe.
        // Dropping this future on timeout also drops the readers.
        let res = tokio::time::timeout(self.timeout, async {
            let (stdout_res, stderr_res) = tokio::join!(
                stdout.read_to_end(&mut stdout_buf),
                stderr.read_to_end(&mut stderr_buf),
            );
            stdout_res.context("Failed to read stdout of the script")?;
            if let Err(e) = stderr_res {
                log::debug!("Ignored error on reading stderr: {}", e);
            }
            anyhow::Ok(proc.wait().await)
        })
        .await;

        let duration = start_at.elapsed();
        let expected = testcase.expected.clone();

        let wait_res = match res {
            Err(_) => {
                proc.kill()
                    .await
                    .unwrap_or_else(|e| log::warn!("Failed to kill timed-out process: {:#}", e));
                log::debug!(
                    "Killed {} after {}ms",
                    testcase.name,
                    self.timeout.as_millis()
                );
                return Ok(CaseResult::timed_out_after(duration, expected));
            }
            Ok(Err(e)) => return Err(e),
            Ok(Ok(wait_res)) => wait_res,
        };

        let output = |status: Option<i32>| ProcessOutput {
            status,
            stdout: String::from_utf8_lossy(&stdout_buf).into_owned(),
            stderr: String::from_utf8_lossy(&stderr_buf).into_owned(),
        };

        let result = match wait_res {
            Err(e) => CaseResult::errored(
                output(None),
                duration,
                expected,
                format!("Failed to wait for the process: {}", e),
            ),
            Ok(status) if !status.success() => CaseResult::errored(
                output(status.code()),
                duration,
                expected,
                format!("Process done with error ({})", status),
            ),
            Ok(status) => CaseResult::judged(output(status.code()), duration, expected),
        };
        Ok(result)
    }
}

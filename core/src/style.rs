use std::collections::HashMap;
use std::time::Duration;

use colored::{Color, ColoredString, Colorize};
use crossterm::terminal;
use indicatif::{ProgressBar, ProgressStyle};

use crate::problem::ProblemSpec;
use crate::testing::{CaseResult, DiffLine, LineDiff, Reporter, Testcase, Verdict};

#[macro_export]
macro_rules! print_success {
    ($fmt:literal, $($e:tt)*) => {{
        use ::colored::Colorize as _;
        println!("{}", format!($fmt, $($e)*).green())
    }};
}

/// Command lines and parameter lists longer than this are cut off.
pub const MAX_ECHO_CHARS: usize = 300;

pub fn is_truecolor_supported() -> bool {
    let Ok(v) = std::env::var("COLORTERM") else {
        return false
    };
    matches!(v.as_str(), "truecolor" | "24bit")
}

pub trait ColorTheme {
    fn color(&self) -> Color;
}

impl ColorTheme for log::Level {
    fn color(&self) -> Color {
        use log::Level::*;
        match self {
            Error => Color::BrightRed,
            Warn => Color::BrightYellow,
            Info => Color::Cyan,
            Debug => Color::Magenta,
            Trace => Color::Blue,
        }
    }
}

impl ColorTheme for Verdict {
    fn color(&self) -> Color {
        use Verdict::*;
        if !self::is_truecolor_supported() {
            return match self {
                Pass => Color::Green,
                Fail => Color::Red,
                Error => Color::Magenta,
                Timeout => Color::Red,
                Unjudged => Color::Yellow,
            };
        }

        match self {
            Pass => Color::TrueColor {
                r: 30,
                g: 180,
                b: 40,
            },
            Fail => Color::TrueColor {
                r: 220,
                g: 42,
                b: 42,
            },
            Error => Color::TrueColor {
                r: 171,
                g: 40,
                b: 200,
            },
            Timeout => Color::TrueColor {
                r: 230,
                g: 90,
                b: 20,
            },
            Unjudged => Color::TrueColor {
                r: 210,
                g: 138,
                b: 4,
            },
        }
    }
}

pub fn verdict_icon(verdict: Verdict) -> ColoredString {
    let fg = if is_truecolor_supported() {
        Color::TrueColor {
            r: 255,
            g: 255,
            b: 255,
        }
    } else {
        Color::BrightBlack
    };
    format!(" {:<4} ", verdict.to_string())
        .on_color(verdict.color())
        .bold()
        .color(fg)
}

/// Cuts `s` to `max_chars` characters, marking the cut with `...`.
pub fn truncate(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((i, _)) => format!("{}...", &s[..i]),
        None => s.to_owned(),
    }
}

pub fn print_intro(spec: &ProblemSpec) {
    let title = spec.file_intro();
    let intro = spec.introduction();
    print!("\n\n");
    println!("{}", title.yellow());
    println!("{}", "-".repeat(title.chars().count()));
    if intro != title {
        println!("{}", intro.yellow());
    }
    println!();
}

pub fn print_diff(diff: &LineDiff) {
    for line in diff.lines() {
        let s = line.to_string();
        match line {
            DiffLine::Both(_) => println!("{}", s.dimmed()),
            DiffLine::Missing(_) => println!("{}", s.red()),
            DiffLine::Unexpected(_) => println!("{}", s.green()),
        }
    }
}

/// Prints each case as it runs, with a spinner while the script is busy.
pub struct ConsoleReporter {
    timeout: Duration,
    spinner: Option<ProgressBar>,
}

impl ConsoleReporter {
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            spinner: None,
        }
    }

    fn print_answer(&self, res: &CaseResult) {
        let answer = &res.actual_output;
        match res.verdict {
            Verdict::Pass => println!("{}", format!("Answer: {} ✔", answer).green()),
            Verdict::Fail => {
                println!("{}", format!("Answer: {} ✘", answer).red());
                if let Some(diff) = res.diff() {
                    print_diff(&diff);
                }
            }
            _ => println!("{}", answer.yellow()),
        }
        println!("Duration: {:?}", res.duration);
        println!();
    }

    fn print_error(&self, testcase: &Testcase, res: &CaseResult) {
        let (cols, _) = terminal::size().unwrap_or((40, 40));
        let thin_bar = "─".repeat(cols as usize).bright_black();

        println!(
            "{} {} {}",
            verdict_icon(res.verdict),
            testcase.name.bright_yellow().bold(),
            res.process_error.as_deref().unwrap_or_default().bright_red(),
        );
        if let Some(output) = &res.output {
            if !output.stdout.trim().is_empty() {
                println!("{}", output.stdout.trim());
            }
            if !output.stderr.is_empty() {
                println!("{}", thin_bar);
                print!("{}", output.stderr);
            }
        }
        println!();
    }
}

impl Reporter for ConsoleReporter {
    fn run_started(&mut self, spec: &ProblemSpec) {
        print_intro(spec);
    }

    fn case_started(&mut self, testcase: &Testcase, argv: &[String]) {
        println!("{}", truncate(&argv.join(" "), MAX_ECHO_CHARS).magenta());
        println!();
        if !testcase.params.is_empty() {
            let given = truncate(&testcase.params.join(", "), MAX_ECHO_CHARS);
            println!("{}", format!("Given: {}", given).yellow());
        }

        let bar = ProgressBar::new_spinner()
            .with_style(
                ProgressStyle::default_spinner()
                    .template("{spinner} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            )
            .with_message(format!("Running {} ...", testcase.name));
        bar.enable_steady_tick(Duration::from_millis(80));
        self.spinner = Some(bar);
    }

    fn case_finished(&mut self, testcase: &Testcase, res: &CaseResult) {
        if let Some(bar) = self.spinner.take() {
            bar.finish_and_clear();
        }
        match res.verdict {
            Verdict::Timeout => {
                log::warn!(
                    "Process killed. Program ran for more than {} seconds",
                    self.timeout.as_secs_f64()
                );
                println!();
            }
            Verdict::Error => self.print_error(testcase, res),
            Verdict::Pass | Verdict::Fail | Verdict::Unjudged => self.print_answer(res),
        }
    }
}

impl Drop for ConsoleReporter {
    fn drop(&mut self) {
        // A run that failed mid-case leaves its spinner behind.
        if let Some(bar) = self.spinner.take() {
            bar.finish_and_clear();
        }
    }
}

/// Unjudged results are left out. Prints nothing if no result was judged.
pub fn print_summary(results: &[CaseResult]) {
    let judged: Vec<_> = results
        .iter()
        .filter(|r| r.verdict != Verdict::Unjudged)
        .collect();
    if judged.is_empty() {
        return;
    }

    let bar = "-".repeat(5);
    print!("{} ", bar);

    let count: HashMap<Verdict, usize> = judged.iter().fold(HashMap::new(), |mut count, r| {
        *count.entry(r.verdict).or_default() += 1;
        count
    });

    let num_total = judged.len();
    let num_passed = *count.get(&Verdict::Pass).unwrap_or(&0);
    let num_failed = num_total - num_passed;

    if num_passed == num_total {
        let msg = format!("All {} cases passed ✨", num_total);
        print!("{}", msg.green());
    } else {
        let summary_msg = if num_passed > 0 {
            format!("{}/{} cases failed 💣", num_failed, num_total)
        } else {
            format!("All {} cases failed 💀", num_total)
        };

        let mut failures: Vec<_> = count
            .iter()
            .filter(|(&verdict, _)| verdict != Verdict::Pass)
            .collect();
        failures.sort_by_key(|(&verdict, _)| verdict as u8);

        let detail_msg = failures
            .into_iter()
            .map(|(&verdict, &cnt)| {
                format!(
                    "{}{}{}",
                    self::verdict_icon(verdict),
                    "x".dimmed(),
                    cnt.to_string().bold().bright_white(),
                )
            })
            .collect::<Vec<String>>()
            .join(", ");

        print!("{} ({})", summary_msg.bright_red(), detail_msg);
    }

    println!(" {}", bar);
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn truncate_long_text() {
        assert_eq!(truncate("abc", 3), "abc");
        assert_eq!(truncate("abcd", 3), "abc...");
        assert_eq!(truncate("αβγδ", 2), "αβ...");
        assert_eq!(truncate("", 0), "");
    }

    #[test]
    fn dropping_reporter_clears_pending_spinner() {
        let mut reporter = ConsoleReporter::new(Duration::from_secs(1));
        let bar = ProgressBar::hidden();
        reporter.spinner = Some(bar.clone());
        drop(reporter);
        assert!(bar.is_finished());
    }

    #[test]
    fn verdict_icon_is_padded() {
        colored::control::set_override(false);
        assert_eq!(verdict_icon(Verdict::Pass).to_string(), " PASS ");
        assert_eq!(verdict_icon(Verdict::Timeout).to_string(), " TLE  ");
    }
}

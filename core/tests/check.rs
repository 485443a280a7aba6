use std::path::{Path, PathBuf};

use kata_core::action;
use kata_core::testing::{CaseResult, Reporter, Testcase, Verdict};
use kata_core::{Config, ProblemSpec};

const CONFIG: &str = r#"
[layout]
solutions_dir = "solutions"
problems_dir = "problems"

[check]
timeout = "500ms"
watch_include = "*.sh"

[[check.runner]]
pattern = "*.sh"
command = ["sh"]
"#;

#[derive(Default)]
struct Collect {
    intro: Option<String>,
    started: Vec<Vec<String>>,
    finished: Vec<(String, Verdict)>,
}

impl Reporter for Collect {
    fn run_started(&mut self, spec: &ProblemSpec) {
        self.intro = Some(spec.introduction());
    }

    fn case_started(&mut self, _testcase: &Testcase, argv: &[String]) {
        self.started.push(argv.to_vec());
    }

    fn case_finished(&mut self, testcase: &Testcase, result: &CaseResult) {
        self.finished.push((testcase.name.clone(), result.verdict));
    }
}

struct Repo {
    dir: tempfile::TempDir,
    cfg: Config,
}

impl Repo {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let cfg_path = dir.path().join(Config::FILENAME);
        fsutil::write(&cfg_path, CONFIG).unwrap();
        let cfg = Config::from_toml_file(cfg_path).unwrap();
        Self { dir, cfg }
    }

    fn file(&self, rel: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(rel);
        fsutil::write_with_mkdir(&path, contents).unwrap();
        path
    }

    fn root(&self) -> &Path {
        self.dir.path()
    }
}

#[tokio::test]
async fn check_cases_in_order() {
    let repo = Repo::new();
    repo.file(
        "problems/basics/join.txt",
        "PROBLEM:\nJoin the arguments\nwith dashes.\n\nCASES:\n1, 2\n1-2\n\nthe quick, fox\nthe quick-fox\n\n3\nwrong\n",
    );
    let script = repo.file("solutions/basics/alice/join_v1.sh", "IFS=-; echo \"$*\"\n");

    let mut reporter = Collect::default();
    let (spec, results) = action::check_with_reporter(&script, &repo.cfg, &mut reporter)
        .await
        .unwrap();

    assert_eq!(spec.cases.len(), 3);
    assert_eq!(reporter.intro.as_deref(), Some("Join the arguments with dashes."));
    assert_eq!(
        reporter.finished,
        vec![
            ("case 1".to_owned(), Verdict::Pass),
            ("case 2".to_owned(), Verdict::Pass),
            ("case 3".to_owned(), Verdict::Fail),
        ]
    );
    assert_eq!(
        reporter.started[1],
        vec![
            "sh".to_owned(),
            script.to_string_lossy().into_owned(),
            "the quick".to_owned(),
            "fox".to_owned()
        ]
    );
    let diff = results[2].diff().unwrap().to_string();
    assert_eq!(diff, "- wrong\n+ 3");
}

#[tokio::test]
async fn check_bare_answer_runs_once_without_params() {
    let repo = Repo::new();
    repo.file("problems/basics/count.txt", "PROBLEM:\nCount.\n\nANSWER:\n0\n");
    let script = repo.file("solutions/basics/bob/count.sh", "echo $#\n");

    let mut reporter = Collect::default();
    let (_, results) = action::check_with_reporter(&script, &repo.cfg, &mut reporter)
        .await
        .unwrap();

    assert_eq!(results.len(), 1);
    assert!(results[0].matched());
    assert_eq!(reporter.started[0].len(), 2);
}

#[tokio::test]
async fn check_without_problem_file_is_informational() {
    let repo = Repo::new();
    let script = repo.file("solutions/misc/bob/hello.sh", "echo hello\n");

    let mut reporter = Collect::default();
    let (spec, results) = action::check_with_reporter(&script, &repo.cfg, &mut reporter)
        .await
        .unwrap();

    assert!(!spec.has_expectation());
    assert_eq!(reporter.intro.as_deref(), Some("problems misc hello"));
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].verdict, Verdict::Unjudged);
    assert_eq!(results[0].actual_output, "hello");
}

#[tokio::test]
async fn check_continues_after_crash_and_timeout() {
    let repo = Repo::new();
    repo.file(
        "problems/misc/moody.txt",
        "CASES:\ncrash\nx\n\nsleep\nx\n\nok\nfine\n",
    );
    let script = repo.file(
        "solutions/misc/carol/moody.sh",
        "case \"$1\" in\n  crash) echo boom >&2; exit 1 ;;\n  sleep) sleep 5 ;;\n  *) echo fine ;;\nesac\n",
    );

    let mut reporter = Collect::default();
    let (_, results) = action::check_with_reporter(&script, &repo.cfg, &mut reporter)
        .await
        .unwrap();

    let verdicts: Vec<_> = results.iter().map(|r| r.verdict).collect();
    assert_eq!(verdicts, vec![Verdict::Error, Verdict::Timeout, Verdict::Pass]);
    assert_eq!(results[0].output.as_ref().unwrap().stderr, "boom\n");
    assert!(results[0].process_error.is_some());
    assert!(results[1].timed_out());
}

#[tokio::test]
async fn check_rejects_unknown_scripts() {
    let repo = Repo::new();
    let unconfigured = repo.file("solutions/misc/dave/hello.py", "print('hi')\n");
    let outside = repo.file("scratch/hello.sh", "echo hi\n");
    let bad_layout = repo.file("solutions/hello.sh", "echo hi\n");

    let mut reporter = Collect::default();
    for script in [unconfigured, outside, bad_layout] {
        let res = action::check_with_reporter(&script, &repo.cfg, &mut reporter).await;
        assert!(res.is_err(), "{:?} should be rejected", script);
    }
    assert!(reporter.started.is_empty());
    assert!(repo.root().join("kata.toml").is_file());
}

#[test]
fn init_refuses_nested_repository() {
    let repo = Repo::new();
    let nested = repo.root().join("sub");
    assert!(action::init_kata_repository(&nested).is_err());

    let fresh = tempfile::tempdir().unwrap();
    let path = action::init_kata_repository(fresh.path()).unwrap();
    assert!(Config::from_toml_file(path).is_ok());
}

use std::path::{Path, PathBuf};

use lazy_regex::{lazy_regex, Lazy, Regex};

use crate::config::Config;

/// `<topic...>/<author>/<name>[_suffix...].<ext>`, relative to the solutions dir.
static RE_SOLUTION_PATH: Lazy<Regex> = lazy_regex!(r"^((?:[\w-]+/)+)\w+/([^/_]+)(?:_\w+)*\.\w+$");

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LocateError {
    #[error("'{0}' is not under the solutions dir '{1}'")]
    OutsideSolutionsDir(PathBuf, PathBuf),

    #[error("Don't know which problem '{0}' solves (expected <topic>/<author>/<name>.<ext>)")]
    UnrecognizedLayout(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProblemLocation {
    /// Where the problem file is (or would be).
    pub path: PathBuf,
    /// The same file as written relative to the config root, e.g. `problems/euler/001.txt`.
    pub display_path: PathBuf,
}

impl ProblemLocation {
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }
}

pub fn locate_problem_file(
    script: impl AsRef<Path>,
    cfg: &Config,
) -> Result<ProblemLocation, LocateError> {
    let script = script.as_ref();
    let solutions_dir = cfg.solutions_dir();

    let rel = fsutil::strip_base(script, &solutions_dir).ok_or_else(|| {
        LocateError::OutsideSolutionsDir(script.to_owned(), solutions_dir.clone())
    })?;
    let rel = rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/");

    let Some(caps) = RE_SOLUTION_PATH.captures(&rel) else {
        return Err(LocateError::UnrecognizedLayout(script.to_owned()));
    };
    let problem_rel = PathBuf::from(&caps[1]).join(format!("{}.txt", &caps[2]));
    log::debug!("{:?} solves {:?}", rel, problem_rel);

    Ok(ProblemLocation {
        path: cfg.problems_dir().join(&problem_rel),
        display_path: fsutil::normalize_path(cfg.layout.problems_dir.join(&problem_rel)),
    })
}

#[cfg(test)]
mod test {
    use super::*;

    fn locate(script: &str) -> Result<ProblemLocation, LocateError> {
        locate_problem_file(script, &Config::builtin("/katas"))
    }

    #[test]
    fn locate_ok() {
        let loc = locate("/katas/solutions/euler/bob/001.py").unwrap();
        assert_eq!(loc.path, Path::new("/katas/problems/euler/001.txt"));
        assert_eq!(loc.display_path, Path::new("problems/euler/001.txt"));

        let loc = locate("/katas/solutions/strings/easy/alice/reverse_v2_fast.rb").unwrap();
        assert_eq!(loc.path, Path::new("/katas/problems/strings/easy/reverse.txt"));

        let loc = locate("/katas/solutions/my-topic/alice/fizz-buzz.js").unwrap();
        assert_eq!(loc.display_path, Path::new("problems/my-topic/fizz-buzz.txt"));
    }

    #[test]
    fn locate_ng() {
        assert!(matches!(
            locate("/elsewhere/euler/bob/001.py"),
            Err(LocateError::OutsideSolutionsDir(..))
        ));
        // missing author dir
        assert!(matches!(
            locate("/katas/solutions/euler/001.py"),
            Err(LocateError::UnrecognizedLayout(_))
        ));
        // no extension
        assert!(matches!(
            locate("/katas/solutions/euler/bob/001"),
            Err(LocateError::UnrecognizedLayout(_))
        ));
    }

    #[test]
    fn missing_problem_file_is_located_but_absent() {
        let loc = locate("/katas/solutions/euler/bob/001.py").unwrap();
        assert!(!loc.exists());
    }
}

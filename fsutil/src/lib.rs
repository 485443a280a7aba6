use std::{
    fs,
    path::{Path, PathBuf},
};

pub mod error {
    use std::{io, path::PathBuf};

    pub type Result<T> = std::result::Result<T, self::Error>;

    type Msg = &'static str;

    #[derive(Debug, thiserror::Error)]
    pub enum Error {
        #[error("{0} ({1}): {2}")]
        SingleIO(Msg, PathBuf, #[source] io::Error),

        #[error("Failed to canonicalize path '{0}': {1}")]
        CanonicalizePath(PathBuf, #[source] io::Error),

        #[error("Not a regular file: '{0}'")]
        NotAFile(PathBuf),
    }
}
pub use error::{Error, Result};

#[must_use]
pub fn mkdir_all(path: impl AsRef<Path>) -> Result<()> {
    let dir = path.as_ref();
    fs::create_dir_all(dir).map_err(|e| Error::SingleIO("Cannot create dir", dir.to_owned(), e))
}

#[must_use]
pub fn write<P, C>(filepath: P, contents: C) -> Result<()>
where
    P: AsRef<Path>,
    C: AsRef<[u8]>,
{
    fs::write(&filepath, contents)
        .map_err(|e| Error::SingleIO("Cannot write file", filepath.as_ref().to_owned(), e))
}

#[must_use]
pub fn write_with_mkdir<P, C>(filepath: P, contents: C) -> Result<()>
where
    P: AsRef<Path>,
    C: AsRef<[u8]>,
{
    if let Some(dir) = filepath.as_ref().parent() {
        self::mkdir_all(dir)?;
    }
    self::write(filepath, contents)
}

#[must_use]
pub fn read_to_string(filepath: impl AsRef<Path>) -> Result<String> {
    fs::read_to_string(&filepath)
        .map_err(|e| Error::SingleIO("Cannot read file", filepath.as_ref().to_owned(), e))
}

/// Fails unless `path` exists and is not a directory.
/// Saved scripts are often replaced by editors, so a vanished path is reported as I/O error.
pub fn ensure_regular_file(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let meta = fs::metadata(path)
        .map_err(|e| Error::SingleIO("Cannot stat file", path.to_owned(), e))?;
    if meta.is_dir() {
        return Err(Error::NotAFile(path.to_owned()));
    }
    Ok(())
}

pub fn canonicalize_path(path: impl AsRef<Path>) -> Result<PathBuf> {
    let path = path.as_ref();
    path.canonicalize()
        .map_err(|e| Error::CanonicalizePath(path.to_owned(), e))
}

/// Normalize the path
/// ```
/// use fsutil::normalize_path;
/// use std::path::Path;
///
/// assert_eq!(normalize_path("./solutions/./euler/bob/001.py"), Path::new("solutions/euler/bob/001.py"));
/// assert_eq!(normalize_path("problems/euler/../strings/x.txt"), Path::new("problems/strings/x.txt"));
/// assert_eq!(normalize_path("../foo/../hello"), Path::new("../hello"));
/// assert_eq!(normalize_path("/"), Path::new("/"));
/// assert_eq!(normalize_path("./foo/"), Path::new("foo"));
/// assert_eq!(normalize_path("./././."), Path::new("."));
/// ```
pub fn normalize_path(path: impl AsRef<Path>) -> PathBuf {
    use ::std::path::Component;
    let components = path.as_ref().components();
    let mut stack = Vec::with_capacity(components.size_hint().1.unwrap_or(4));
    for c in components {
        match c {
            Component::CurDir => (),
            Component::ParentDir if matches!(stack.last(), Some(Component::Normal(_))) => {
                stack.pop();
            }
            _ => {
                stack.push(c);
            }
        }
    }
    if stack.is_empty() {
        stack.push(Component::CurDir);
    }
    stack.iter().collect()
}

/// Express `path` relative to `base`, resolving symlinks of both when they exist.
/// Returns `None` when `path` is not located under `base`.
pub fn strip_base(path: impl AsRef<Path>, base: impl AsRef<Path>) -> Option<PathBuf> {
    let (path, base) = (path.as_ref(), base.as_ref());
    let resolve = |p: &Path| canonicalize_path(p).unwrap_or_else(|_| normalize_path(p));

    let (path, base) = (resolve(path), resolve(base));
    let rel = path.strip_prefix(&base).ok()?;
    log::trace!("strip_base: {:?} under {:?} => {:?}", path, base, rel);
    Some(rel.to_owned())
}

use std::{fmt, ops::Deref};

use ::glob::{Pattern, PatternError};
use ::serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// A glob pattern which can be written as a plain string in config files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobPattern(Pattern);

impl GlobPattern {
    pub fn parse(pattern: &str) -> Result<Self, PatternError> {
        Pattern::new(pattern).map(Self)
    }

    /// Matches against the final component of `path` only.
    pub fn matches_file_name(&self, path: &std::path::Path) -> bool {
        path.file_name()
            .map(|name| self.0.matches(&name.to_string_lossy()))
            .unwrap_or(false)
    }
}

impl Deref for GlobPattern {
    type Target = Pattern;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl fmt::Display for GlobPattern {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}

impl Serialize for GlobPattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.0.as_str())
    }
}

impl<'de> Deserialize<'de> for GlobPattern {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::path::Path;

    #[test]
    fn deserialize_from_toml_string() {
        #[derive(Deserialize)]
        struct Entry {
            pattern: GlobPattern,
        }
        let e: Entry = toml::from_str(r#"pattern = "*.py""#).unwrap();
        assert_eq!(e.pattern.as_str(), "*.py");
        assert!(e.pattern.matches("fizzbuzz.py"));
        assert!(!e.pattern.matches("fizzbuzz.rb"));
    }

    #[test]
    fn serialize_as_plain_string() {
        let pat = GlobPattern::parse("*.[jt]s").unwrap();
        assert_eq!(serde_json::to_string(&pat).unwrap(), r#""*.[jt]s""#);
    }

    #[test]
    fn reject_broken_pattern() {
        let res: Result<GlobPattern, _> = serde_json::from_str(r#""[a""#);
        assert!(res.is_err());
    }

    #[test]
    fn match_only_file_name() {
        let pat = GlobPattern::parse("*.go").unwrap();
        assert!(pat.matches_file_name(Path::new("solutions/euler/bob/001.go")));
        assert!(!pat.matches_file_name(Path::new("solutions/go/bob/001.py")));
        assert!(!pat.matches_file_name(Path::new("/")));
    }
}

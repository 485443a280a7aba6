use std::{fmt, str::FromStr, time::Duration};

use ::serde::{
    de::{self, Visitor},
    Deserialize, Deserializer,
};

/// A duration written by humans: `"60s"`, `"1500ms"`, `"2m"` or a bare number of seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DurationSpec(Duration);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DurationSpecError {
    #[error("Empty duration")]
    Empty,

    #[error("Invalid number in duration '{0}'")]
    InvalidNumber(String),

    #[error("Unknown duration unit '{1}' in '{0}' (expected one of ms, s, m)")]
    UnknownUnit(String, String),
}

impl DurationSpec {
    pub const fn from_secs(secs: u64) -> Self {
        Self(Duration::from_secs(secs))
    }

    pub fn as_duration(&self) -> Duration {
        self.0
    }
}

impl From<Duration> for DurationSpec {
    fn from(d: Duration) -> Self {
        Self(d)
    }
}

impl FromStr for DurationSpec {
    type Err = DurationSpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(DurationSpecError::Empty);
        }
        let split_at = s
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(s.len());
        let (num, unit) = s.split_at(split_at);
        let n: u64 = num
            .parse()
            .map_err(|_| DurationSpecError::InvalidNumber(s.to_owned()))?;

        let d = match unit.trim() {
            "" | "s" => Duration::from_secs(n),
            "ms" => Duration::from_millis(n),
            "m" => n
                .checked_mul(60)
                .map(Duration::from_secs)
                .ok_or_else(|| DurationSpecError::InvalidNumber(s.to_owned()))?,
            u => return Err(DurationSpecError::UnknownUnit(s.to_owned(), u.to_owned())),
        };
        Ok(Self(d))
    }
}

impl fmt::Display for DurationSpec {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let ms = self.0.as_millis();
        if ms % 1000 == 0 {
            write!(f, "{}s", ms / 1000)
        } else {
            write!(f, "{}ms", ms)
        }
    }
}

impl<'de> Deserialize<'de> for DurationSpec {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct DurationSpecVisitor;

        impl<'de> Visitor<'de> for DurationSpecVisitor {
            type Value = DurationSpec;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, "a duration such as \"60s\", \"1500ms\" or a number of seconds")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                v.parse().map_err(de::Error::custom)
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
                Ok(DurationSpec::from_secs(v))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
                u64::try_from(v)
                    .map(DurationSpec::from_secs)
                    .map_err(|_| de::Error::custom("duration must not be negative"))
            }
        }

        deserializer.deserialize_any(DurationSpecVisitor)
    }
}

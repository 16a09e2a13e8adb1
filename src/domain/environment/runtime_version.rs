use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::domain::AppError;

/// Python version pinned through pyenv, as a `major.minor.patch` triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RuntimeVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl RuntimeVersion {
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self { major, minor, patch }
    }
}

impl Default for RuntimeVersion {
    fn default() -> Self {
        Self::new(3, 11, 0)
    }
}

impl fmt::Display for RuntimeVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for RuntimeVersion {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || AppError::InvalidRuntimeVersion(s.to_string());
        let parts: Vec<&str> = s.trim().split('.').collect();
        let [major, minor, patch] = parts.as_slice() else {
            return Err(invalid());
        };
        let parse = |part: &str| part.parse::<u32>().map_err(|_| invalid());
        Ok(Self::new(parse(*major)?, parse(*minor)?, parse(*patch)?))
    }
}

impl Serialize for RuntimeVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for RuntimeVersion {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_python_3_11_0() {
        assert_eq!(RuntimeVersion::default().to_string(), "3.11.0");
    }

    #[test]
    fn parses_triple() {
        assert_eq!("3.12.4".parse::<RuntimeVersion>().unwrap(), RuntimeVersion::new(3, 12, 4));
    }

    #[test]
    fn rejects_partial_versions() {
        for raw in ["3.12", "3", "3.12.4.1", "3.x.0", ""] {
            assert!(
                matches!(raw.parse::<RuntimeVersion>(), Err(AppError::InvalidRuntimeVersion(_))),
                "{raw} should be rejected"
            );
        }
    }
}

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::domain::AppError;

/// Supported Linux base images.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BaseImage {
    #[default]
    Ubuntu2204,
}

impl BaseImage {
    pub const ALL: [BaseImage; 1] = [BaseImage::Ubuntu2204];

    /// Image reference used in `FROM`.
    pub fn reference(&self) -> &'static str {
        match self {
            BaseImage::Ubuntu2204 => "ubuntu:22.04",
        }
    }

    fn supported_list() -> String {
        Self::ALL.iter().map(|image| image.reference()).collect::<Vec<_>>().join(", ")
    }
}

impl fmt::Display for BaseImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.reference())
    }
}

impl FromStr for BaseImage {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(AppError::config_error("base_image must not be empty"));
        }
        Self::ALL.into_iter().find(|image| image.reference() == trimmed).ok_or_else(|| {
            AppError::UnsupportedBaseImage {
                name: trimmed.to_string(),
                supported: Self::supported_list(),
            }
        })
    }
}

impl Serialize for BaseImage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.reference())
    }
}

impl<'de> Deserialize<'de> for BaseImage {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

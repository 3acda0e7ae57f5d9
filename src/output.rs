//! Output formats for validation results.
//!
//! Two of the standard formats are supported: `flag`, which only tells whether the instance is
//! valid, and `basic`, a flat list of errors.
use crate::{error::ErrorUnit, keywords::ValidationResult, paths::Location, SchemaError};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::{fmt, str::FromStr};

/// Shape of [`OutputUnit`] produced by [`crate::Validator::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Flag,
    Basic,
}

impl OutputFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Flag => "flag",
            OutputFormat::Basic => "basic",
        }
    }

    /// Collapse a validation result into this format.
    pub fn format(self, result: ValidationResult) -> OutputUnit {
        match self {
            OutputFormat::Flag => OutputUnit::Flag {
                valid: result.is_valid(),
            },
            OutputFormat::Basic => OutputUnit::Basic {
                valid: result.is_valid(),
                errors: result
                    .into_errors()
                    .into_iter()
                    .map(BasicError::from)
                    .collect(),
            },
        }
    }
}

impl FromStr for OutputFormat {
    type Err = SchemaError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value.eq_ignore_ascii_case("flag") {
            Ok(OutputFormat::Flag)
        } else if value.eq_ignore_ascii_case("basic") {
            Ok(OutputFormat::Basic)
        } else {
            Err(SchemaError::UnsupportedOutputFormat {
                format: value.to_string(),
            })
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<OutputFormat> for String {
    fn from(format: OutputFormat) -> Self {
        format.as_str().to_string()
    }
}

/// A single entry of the `basic` output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicError {
    instance_location: Location,
    keyword_location: Location,
    error: String,
}

impl BasicError {
    pub fn instance_location(&self) -> &Location {
        &self.instance_location
    }
    pub fn keyword_location(&self) -> &Location {
        &self.keyword_location
    }
    pub fn error(&self) -> &str {
        &self.error
    }
}

impl From<ErrorUnit> for BasicError {
    fn from(error: ErrorUnit) -> Self {
        BasicError {
            instance_location: error.instance_location().clone(),
            keyword_location: error.keyword_location().clone(),
            error: error.message().to_string(),
        }
    }
}

/// Public result of [`crate::Validator::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputUnit {
    Flag { valid: bool },
    Basic { valid: bool, errors: Vec<BasicError> },
}

impl OutputUnit {
    pub fn is_valid(&self) -> bool {
        match self {
            OutputUnit::Flag { valid } | OutputUnit::Basic { valid, .. } => *valid,
        }
    }

    /// Errors of the `basic` format. Always empty for `flag`.
    pub fn errors(&self) -> &[BasicError] {
        match self {
            OutputUnit::Flag { .. } => &[],
            OutputUnit::Basic { errors, .. } => errors,
        }
    }
}

impl Serialize for BasicError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map_ser = serializer.serialize_map(Some(3))?;
        map_ser.serialize_entry("instance_location", &self.instance_location)?;
        map_ser.serialize_entry("keyword_location", &self.keyword_location)?;
        map_ser.serialize_entry("error", &self.error)?;
        map_ser.end()
    }
}

impl Serialize for OutputUnit {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            OutputUnit::Flag { valid } => {
                let mut map_ser = serializer.serialize_map(Some(1))?;
                map_ser.serialize_entry("valid", valid)?;
                map_ser.end()
            }
            OutputUnit::Basic { valid, errors } => {
                let mut map_ser = serializer.serialize_map(Some(2))?;
                map_ser.serialize_entry("valid", valid)?;
                map_ser.serialize_entry("errors", errors)?;
                map_ser.end()
            }
        }
    }
}

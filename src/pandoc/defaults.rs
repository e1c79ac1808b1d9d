//! Pandoc defaults files.
//!
//! A defaults file is the YAML form of Pandoc's command line. Only the keys
//! that decide whether the reader can use the file are read; everything else
//! is passed through to Pandoc untouched.
//!
//! ```yaml
//! reader: markdown+citations
//! writer: html5
//! citeproc: true
//! table-of-contents: true
//! ```

use super::{CITATIONS_EXTENSION, VALID_INPUT_FORMATS, VALID_OUTPUT_FORMATS};
use serde::Deserialize;
use serde_yaml::Value;
use std::{
    fs, io,
    path::{Path, PathBuf},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DefaultsError {
    #[error("IO error when reading `{}`", .0.display())]
    Io(PathBuf, #[source] io::Error),

    #[error("invalid YAML in `{}`: {}", .0.display(), .1)]
    Yaml(PathBuf, serde_yaml::Error),

    #[error("The default {0} should be set to false.")]
    Unsupported(&'static str),

    #[error("No input format specified.")]
    NoInputFormat,

    #[error("Specifying both from and reader is not supported. Please specify just one.")]
    BothInputFormats,

    #[error("Input type has to be a markdown variant.")]
    InvalidInputFormat,

    #[error("Specifying both to and writer is not supported. Please specify just one.")]
    BothOutputFormats,

    #[error("Output format type must be either html or html5.")]
    InvalidOutputFormat,
}

/// Features a defaults file turns on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DefaultsFlags {
    pub citations: bool,
    pub toc: bool,
}

impl std::ops::BitOrAssign for DefaultsFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.citations |= rhs.citations;
        self.toc |= rhs.toc;
    }
}

/// The settings of one defaults file that the reader cares about.
///
/// Unknown keys are ignored. Empty strings count as absent.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PandocDefaults {
    pub standalone: Option<Value>,
    #[serde(rename = "self-contained")]
    pub self_contained: Option<Value>,
    pub reader: Option<String>,
    pub from: Option<String>,
    pub writer: Option<String>,
    pub to: Option<String>,
    pub citeproc: Option<Value>,
    #[serde(rename = "table-of-contents", alias = "toc")]
    pub table_of_contents: Option<Value>,
}

impl PandocDefaults {
    /// Read and parse a defaults file.
    pub fn load(path: &Path) -> Result<Self, DefaultsError> {
        let content =
            fs::read_to_string(path).map_err(|err| DefaultsError::Io(path.to_path_buf(), err))?;
        Self::parse(&content).map_err(|err| DefaultsError::Yaml(path.to_path_buf(), err))
    }

    /// Parse defaults from YAML text. An empty document yields no settings.
    pub fn parse(content: &str) -> Result<Self, serde_yaml::Error> {
        let value: Value = serde_yaml::from_str(content)?;
        if value.is_null() {
            return Ok(Self::default());
        }
        serde_yaml::from_value(value)
    }

    /// Check the file is usable and report which features it requests.
    ///
    /// Rules apply in order and the first violation is returned.
    pub fn validate(&self) -> Result<DefaultsFlags, DefaultsError> {
        if truthy(self.standalone.as_ref()) {
            return Err(DefaultsError::Unsupported("standalone"));
        }
        if truthy(self.self_contained.as_ref()) {
            return Err(DefaultsError::Unsupported("self-contained"));
        }

        let input = self.input_format()?;
        self.check_output_format()?;

        Ok(DefaultsFlags {
            citations: truthy(self.citeproc.as_ref()) && input.contains(CITATIONS_EXTENSION),
            toc: truthy(self.table_of_contents.as_ref()),
        })
    }

    fn input_format(&self) -> Result<&str, DefaultsError> {
        let input = match (present(&self.reader), present(&self.from)) {
            (None, None) => return Err(DefaultsError::NoInputFormat),
            (Some(_), Some(_)) => return Err(DefaultsError::BothInputFormats),
            (Some(format), None) | (None, Some(format)) => format,
        };

        // `markdown+smart-raw_html` -> `markdown`
        let base = input.split(['+', '-']).next().unwrap_or_default();
        if VALID_INPUT_FORMATS.iter().any(|v| base.starts_with(v)) {
            Ok(input)
        } else {
            Err(DefaultsError::InvalidInputFormat)
        }
    }

    fn check_output_format(&self) -> Result<(), DefaultsError> {
        let output = match (present(&self.writer), present(&self.to)) {
            (Some(_), Some(_)) => return Err(DefaultsError::BothOutputFormats),
            (Some(format), None) | (None, Some(format)) => Some(format),
            (None, None) => None,
        };

        match output {
            Some(format) if VALID_OUTPUT_FORMATS.contains(&format) => Ok(()),
            _ => Err(DefaultsError::InvalidOutputFormat),
        }
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// YAML truthiness: `false`, `0`, `null`, `""` and empty collections are false.
fn truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|n| n != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Sequence(seq)) => !seq.is_empty(),
        Some(Value::Mapping(map)) => !map.is_empty(),
        Some(Value::Tagged(tagged)) => truthy(Some(&tagged.value)),
    }
}

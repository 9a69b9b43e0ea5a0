use serde::{Deserialize, Serialize};
use std::{fs::File, io::BufReader, path::Path};

use crate::{EngineResult, Error};

/// Session settings.
///
/// Both knobs are off by default, in which case a parse matches any prefix of the
/// input and recursion is bounded only by the call stack.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParserConfig {
    /// Maximum expression nesting depth before the parse is aborted.
    #[serde(default)]
    pub max_depth: Option<usize>,

    /// Treat a root match that leaves input unconsumed as a failure.
    #[serde(default)]
    pub require_full_match: bool,
}

impl ParserConfig {
    pub fn with_max_depth(mut self, limit: usize) -> Self {
        self.max_depth = Some(limit);
        self
    }

    pub fn with_full_match(mut self, required: bool) -> Self {
        self.require_full_match = required;
        self
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        from_file(path)
    }

    pub fn from_json(s: &str) -> EngineResult<Self> {
        from_str(s)
    }
}

pub fn from_file<T: for<'de> Deserialize<'de>, P: AsRef<Path>>(path: P) -> EngineResult<T> {
    let file = File::open(path.as_ref()).map_err(|e| {
        Error::config(format!(
            "Failed to open config file {}: {}",
            path.as_ref().display(),
            e
        ))
    })?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader)
        .map_err(|e| Error::config(format!("Failed to parse config file: {}", e)))
}

pub fn from_str<T: for<'de> Deserialize<'de>>(s: &str) -> EngineResult<T> {
    serde_json::from_str(s).map_err(|e| Error::config(format!("Failed to parse config: {}", e)))
}

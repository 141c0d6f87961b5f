//! Interpretation guides printed alongside diagnostic plots.
//!
//! Guide text is opaque to the checkers; a [`GuideSource`] looks it up by
//! assumption.

use crate::core::Assumption;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Failure to obtain a guide.
#[derive(Debug, Error)]
pub enum GuideError {
    #[error("failed to read guide {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no interpretation guide for {0}")]
    Missing(Assumption),
}

/// Looks up interpretation-guide text for an assumption.
pub trait GuideSource {
    fn load(&self, assumption: Assumption) -> Result<String, GuideError>;
}

/// File name of the guide for `assumption`, e.g.
/// `homplot_interpretation_guide.txt`.
pub fn guide_file_name(assumption: Assumption) -> String {
    let prefix = match assumption {
        Assumption::Linearity => "lin",
        Assumption::Homoscedasticity => "hom",
        Assumption::Normality => "norm",
        Assumption::Independence => "indep",
    };
    format!("{prefix}plot_interpretation_guide.txt")
}

/// Read a guide file verbatim.
pub fn load_guide(path: impl AsRef<Path>) -> Result<String, GuideError> {
    let path = path.as_ref();
    fs::read_to_string(path).map_err(|source| GuideError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Guides stored as text files in one directory.
#[derive(Debug, Clone)]
pub struct DirectoryGuides {
    dir: PathBuf,
}

impl DirectoryGuides {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Full path of the guide for `assumption`.
    pub fn path_for(&self, assumption: Assumption) -> PathBuf {
        self.dir.join(guide_file_name(assumption))
    }
}

impl GuideSource for DirectoryGuides {
    fn load(&self, assumption: Assumption) -> Result<String, GuideError> {
        load_guide(self.path_for(assumption))
    }
}

/// Guides held in memory.
#[derive(Debug, Clone, Default)]
pub struct StaticGuides {
    guides: HashMap<Assumption, String>,
}

impl StaticGuides {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the guide for `assumption`.
    pub fn with(mut self, assumption: Assumption, text: impl Into<String>) -> Self {
        self.guides.insert(assumption, text.into());
        self
    }
}

impl GuideSource for StaticGuides {
    fn load(&self, assumption: Assumption) -> Result<String, GuideError> {
        self.guides
            .get(&assumption)
            .cloned()
            .ok_or(GuideError::Missing(assumption))
    }
}

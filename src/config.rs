use serde::Deserialize;

use std::fs;

use crate::errors::*;

/// How primer pairs are searched for in reads.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// One combined pattern of exact primer occurrences.
    Exact,
    /// Each oligo searched separately within an edit distance budget.
    Approx,
}

/// How IUPAC ambiguity codes in primers are compared against read bases.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DegenerateMode {
    /// An ambiguity code only matches the same code in the read.
    Literal,
    /// An ambiguity code matches any base it stands for.
    Expand,
}

/// Columns of the annotation report.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Schema {
    /// Read name, primer parts, and UMI.
    Basic,
    /// Also reference name, position, read strand, and the full sequence.
    Sam,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScanConfig {
    pub strategy: Strategy,
    pub schema: Schema,
    pub degenerate: DegenerateMode,
    /// Edit distance allowed for each oligo, regardless of its length.
    pub max_edits: usize,
    pub umi_len: usize,
    /// Report progress every this many lines; 0 disables progress reports.
    pub progress_interval: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::Exact,
            schema: Schema::Sam,
            degenerate: DegenerateMode::Literal,
            max_edits: 2,
            umi_len: 5,
            progress_interval: 1000,
        }
    }
}

impl ScanConfig {
    pub fn from_yaml(yaml: &[u8]) -> std::result::Result<Self, serde_yaml::Error> {
        serde_yaml::from_slice(yaml)
    }

    pub fn from_file(file: impl AsRef<str>) -> Result<Self> {
        let file = file.as_ref();
        let bytes = fs::read(file).map_err(|e| Error::FileIo {
            file: file.to_owned(),
            source: Box::new(e),
        })?;

        Self::from_yaml(&bytes).map_err(|source| Error::Config {
            file: file.to_owned(),
            source,
        })
    }
}

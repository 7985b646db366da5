use thiserror;

use std::fmt;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Error reading or writing \"{file}\": {source}")]
    FileIo {
        file: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Error writing report: {0}")]
    Output(#[source] std::io::Error),

    #[error("Invalid primer definition on line {line} in {origin}: {reason}")]
    PrimerFile {
        origin: Origin,
        line: usize,
        reason: String,
    },

    #[error("Unknown nucleotide '{base}' in {context}")]
    UnknownBase { base: char, context: String },

    #[error("Error parsing record on line {line} in {origin}: {reason}")]
    ParseRecord {
        origin: Origin,
        line: usize,
        reason: String,
    },

    #[error("Error parsing config \"{file}\": {source}")]
    Config {
        file: String,
        source: serde_yaml::Error,
    },

    #[error("Error compiling primer pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Where a primer or read line came from.
#[derive(Debug, Clone, PartialEq)]
pub enum Origin {
    File(String),
    Stdin,
    Bytes,
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use Origin::*;
        match self {
            File(file) => write!(f, "file: \"{}\"", file),
            Stdin => write!(f, "standard input"),
            Bytes => write!(f, "bytes"),
        }
    }
}

pub fn utf8(b: &[u8]) -> String {
    String::from_utf8_lossy(b).into_owned()
}

#[derive(thiserror::Error, Debug, PartialEq)]
#[error("Unknown nucleotide: '{}'", show_base(.0))]
pub struct UnknownBaseError(pub u8);

impl UnknownBaseError {
    pub fn with_context(self, context: impl Into<String>) -> Error {
        Error::UnknownBase {
            base: char::from(self.0),
            context: context.into(),
        }
    }
}

fn show_base(b: &u8) -> char {
    char::from(*b)
}

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::errors::*;
use crate::revcomp::*;

/// Two oligos as listed on one line of a primer file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimerPair {
    pub first: Vec<u8>,
    pub second: Vec<u8>,
}

impl PrimerPair {
    pub fn new(first: impl Into<Vec<u8>>, second: impl Into<Vec<u8>>) -> Self {
        Self {
            first: first.into(),
            second: second.into(),
        }
    }

    /// Reverse complement both oligos, keeping their listing positions.
    pub fn revcomp(&self) -> std::result::Result<Self, UnknownBaseError> {
        Ok(Self {
            first: revcomp(&self.first)?,
            second: revcomp(&self.second)?,
        })
    }
}

/// Ordered primer pairs and their reverse complements.
///
/// The position of a pair is its primer id. `revcomp()[i]` is always the
/// reverse complement of `pairs()[i]`.
#[derive(Debug, Clone)]
pub struct PrimerCatalog {
    pairs: Vec<PrimerPair>,
    revcomp_pairs: Vec<PrimerPair>,
}

impl PrimerCatalog {
    /// Build a catalog from pairs in primer id order.
    pub fn new(pairs: Vec<PrimerPair>) -> Result<Self> {
        let numbered = pairs.into_iter().enumerate().map(|(i, p)| (i + 1, p));
        Self::build(numbered, Origin::Bytes)
    }

    /// Load primer pairs from a file with two whitespace-separated oligos per line.
    pub fn from_file(file: impl AsRef<Path>) -> Result<Self> {
        let name = file.as_ref().display().to_string();
        let f = File::open(file.as_ref()).map_err(|e| Error::FileIo {
            file: name.clone(),
            source: Box::new(e),
        })?;

        Self::from_reader(BufReader::new(f), Origin::File(name))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::from_reader(bytes, Origin::Bytes)
    }

    pub fn from_reader(reader: impl BufRead, origin: Origin) -> Result<Self> {
        let mut pairs = Vec::new();

        for (i, line) in reader.split(b'\n').enumerate() {
            let line = line.map_err(|e| Error::FileIo {
                file: origin.to_string(),
                source: Box::new(e),
            })?;
            let tokens = line
                .split(|c| c.is_ascii_whitespace())
                .filter(|t| !t.is_empty())
                .collect::<Vec<_>>();

            match tokens.as_slice() {
                [] => continue,
                [first, second] => pairs.push((i + 1, PrimerPair::new(*first, *second))),
                _ => {
                    return Err(Error::PrimerFile {
                        origin,
                        line: i + 1,
                        reason: format!(
                            "expected 2 whitespace-separated oligos, found {}",
                            tokens.len()
                        ),
                    })
                }
            }
        }

        Self::build(pairs, origin)
    }

    /// Upper case each pair and derive its reverse complement. Each pair comes
    /// with the line it was listed on, for error messages.
    fn build(pairs: impl IntoIterator<Item = (usize, PrimerPair)>, origin: Origin) -> Result<Self> {
        let mut forward = Vec::new();
        let mut revcomp_pairs = Vec::new();

        for (line, pair) in pairs {
            let pair = PrimerPair::new(
                pair.first.to_ascii_uppercase(),
                pair.second.to_ascii_uppercase(),
            );
            let rc = pair
                .revcomp()
                .map_err(|e| e.with_context(format!("primer on line {} in {}", line, origin)))?;

            forward.push(pair);
            revcomp_pairs.push(rc);
        }

        if forward.is_empty() {
            return Err(Error::PrimerFile {
                origin,
                line: 0,
                reason: "no primer pairs".to_owned(),
            });
        }

        Ok(Self {
            pairs: forward,
            revcomp_pairs,
        })
    }

    pub fn pairs(&self) -> &[PrimerPair] {
        &self.pairs
    }

    pub fn revcomp(&self) -> &[PrimerPair] {
        &self.revcomp_pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

//! Locating primer pairs in read sequences.

use std::fmt;
use std::ops::Range;

use crate::config::*;
use crate::errors::*;
use crate::primers::*;
use crate::revcomp::*;

pub mod regex_matcher;
pub use regex_matcher::*;

pub mod dist_matcher;
pub use dist_matcher::*;

/// Whether a primer pair was found as listed or reverse complemented.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Orientation {
    Forward,
    Reverse,
}

impl Orientation {
    pub fn is_reverse(&self) -> bool {
        *self == Orientation::Reverse
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Orientation::Forward => write!(f, "+"),
            Orientation::Reverse => write!(f, "-"),
        }
    }
}

/// A read split around one primer pair.
///
/// The five parts concatenate back to the read (or its reverse complement,
/// for reoriented matches) unless the two primer hits overlap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimerMatch {
    pub primer_index: usize,
    pub orientation: Orientation,
    pub pre: Vec<u8>,
    pub left: Vec<u8>,
    pub insert: Vec<u8>,
    pub right: Vec<u8>,
    pub post: Vec<u8>,
    /// Set when the parts read along the listed primers instead of the read.
    pub reoriented: bool,
}

impl PrimerMatch {
    /// Split `seq` around two primer hits, in whichever order they occur.
    ///
    /// Hits are ordered by start, then by end.
    pub fn from_spans(
        primer_index: usize,
        orientation: Orientation,
        seq: &[u8],
        a: Range<usize>,
        b: Range<usize>,
    ) -> Self {
        let (left, right) = if (a.start, a.end) <= (b.start, b.end) {
            (a, b)
        } else {
            (b, a)
        };
        let insert: &[u8] = if left.end < right.start {
            &seq[left.end..right.start]
        } else {
            &[]
        };

        Self {
            primer_index,
            orientation,
            pre: seq[..left.start].to_owned(),
            left: seq[left.clone()].to_owned(),
            insert: insert.to_owned(),
            right: seq[right.clone()].to_owned(),
            post: seq[right.end..].to_owned(),
            reoriented: false,
        }
    }

    /// Reverse complement every part and swap the flanks, so the parts read in
    /// the direction of the listed primers.
    pub fn reoriented(self) -> std::result::Result<Self, UnknownBaseError> {
        Ok(Self {
            primer_index: self.primer_index,
            orientation: self.orientation,
            pre: revcomp(&self.post)?,
            left: revcomp(&self.right)?,
            insert: revcomp(&self.insert)?,
            right: revcomp(&self.left)?,
            post: revcomp(&self.pre)?,
            reoriented: !self.reoriented,
        })
    }
}

/// Finds the first primer pair present in a read sequence.
pub trait PrimerMatcher {
    /// Returns `None` if no primer pair matches.
    fn find(&self, seq: &[u8]) -> Result<Option<PrimerMatch>>;
}

impl<M: PrimerMatcher + ?Sized> PrimerMatcher for Box<M> {
    fn find(&self, seq: &[u8]) -> Result<Option<PrimerMatch>> {
        (**self).find(seq)
    }
}

/// Build the matcher selected by `config`.
pub fn build_matcher(
    catalog: &PrimerCatalog,
    config: &ScanConfig,
) -> Result<Box<dyn PrimerMatcher>> {
    match config.strategy {
        Strategy::Exact => Ok(Box::new(RegexMatcher::new(catalog, config.degenerate)?)),
        Strategy::Approx => Ok(Box::new(DistMatcher::new(
            catalog,
            config.max_edits,
            config.degenerate,
        ))),
    }
}

//! Rust library for classifying amplicon reads by the PCR primer pair they carry.
//!
//! # Overview
//! PRIMERSCAN scans read sequences from tab-separated alignment text (for example
//! `samtools view` output) for a set of primer pairs, and reports for each matching
//! read which pair it matched, in which orientation, and the pieces of the read
//! around the primers.
//!
//! This is useful for:
//! * Assigning amplicon reads to the primer pair they came from
//! * Stripping primer and UMI sequence before downstream analysis
//! * Checking how many reads of a run carry the expected primers
//!
//! ## Primers
//! Primer pairs are read from a text file with two whitespace-separated oligos per
//! line. The 0-based line order of the pairs is the primer id:
//! ```text
//! ACGTTGCAAC GGATCCTTAG
//! TTAGGCAMTC GATTACAGGA
//! ```
//! Oligos may contain IUPAC ambiguity codes. Each pair is also kept reverse
//! complemented, see [`PrimerCatalog`].
//!
//! ## Matching strategies
//! * [`Strategy::Exact`]: all pairs are compiled into one combined pattern. A pair
//!   `(p1, p2)` matches a read that contains `p2`, then a non-empty insert, then `p1`,
//!   or the reverse complement of that. See [`RegexMatcher`].
//! * [`Strategy::Approx`]: both oligos of a pair are searched for separately, each
//!   allowing a fixed number of substitutions, insertions, and deletions. See
//!   [`DistMatcher`].
//!
//! Either way, the first pair that matches wins and reads without a match are not
//! reported.
//!
//! ## Matched reads
//! A match splits the read into five parts:
//! ```text
//! pre     GG
//! left      CCCC
//! insert        TTTT
//! right             AAAA
//! post                  GG
//! str     GGCCCCTTTTAAAAGG
//! ```
//! The UMI is taken from the bases just outside the primers, see [`extract_umi`].
//!
//! ## Running
//! [`Annotator::run`] streams records from a [`SamReader`] and writes one report row
//! per matched read, reporting progress to a [`ScanObserver`].

pub mod annotate;
pub mod config;
pub mod errors;
pub mod matcher;
pub mod primers;
pub mod report;
pub mod revcomp;
pub mod sam;

// commonly used functions and types

pub use crate::annotate::*;
pub use crate::config::*;
pub use crate::errors::{Error, Origin, Result};
pub use crate::matcher::*;
pub use crate::primers::*;
pub use crate::sam::*;

use std::io::{self, Write};

use crate::config::*;
use crate::errors::*;
use crate::matcher::*;
use crate::report::*;
use crate::revcomp::COMPLEMENT;
use crate::sam::*;

/// A read annotated with the primer pair it matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    pub primer_index: usize,
    pub orientation: Orientation,
    pub pre: Vec<u8>,
    pub primer_left: Vec<u8>,
    pub insert: Vec<u8>,
    pub primer_right: Vec<u8>,
    pub post: Vec<u8>,
    pub umi: Vec<u8>,
}

impl MatchResult {
    pub fn new(m: PrimerMatch, umi_len: usize) -> Self {
        let umi = extract_umi(&m, umi_len);

        Self {
            primer_index: m.primer_index,
            orientation: m.orientation,
            pre: m.pre,
            primer_left: m.left,
            insert: m.insert,
            primer_right: m.right,
            post: m.post,
            umi,
        }
    }

    pub fn is_reverse(&self) -> bool {
        self.orientation.is_reverse()
    }
}

/// The `umi_len` bases just outside the primer pair, as they appear in the read.
///
/// Reverse matches take the start of the post flank, forward matches the end
/// of the pre flank. Reoriented reverse matches hold that post flank reverse
/// complemented in `pre`. Short flanks give a short UMI.
pub fn extract_umi(m: &PrimerMatch, umi_len: usize) -> Vec<u8> {
    let tail = &m.pre[m.pre.len().saturating_sub(umi_len)..];

    match (m.orientation, m.reoriented) {
        (Orientation::Forward, _) => tail.to_vec(),
        (Orientation::Reverse, false) => m.post[..umi_len.min(m.post.len())].to_vec(),
        // reoriented parts only hold valid codes
        (Orientation::Reverse, true) => tail
            .iter()
            .rev()
            .map(|&b| COMPLEMENT[b as usize])
            .collect(),
    }
}

/// Counts for one run over a read stream.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanStats {
    pub lines: usize,
    pub records: usize,
    pub forward: usize,
    pub reverse: usize,
}

impl ScanStats {
    pub fn matched(&self) -> usize {
        self.forward + self.reverse
    }

    pub fn unmatched(&self) -> usize {
        self.records - self.matched()
    }
}

/// Receives progress from a running [`Annotator`].
pub trait ScanObserver {
    /// Called every `progress_interval` records.
    fn progress(&self, _records: usize) {}

    /// Called when the report consumer has gone away.
    fn broken_pipe(&self) {}

    fn finish(&self, _stats: &ScanStats) {}
}

/// Forwards progress to the `log` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogObserver;

impl ScanObserver for LogObserver {
    fn progress(&self, records: usize) {
        log::debug!("Processed {} lines", records);
    }

    fn broken_pipe(&self) {
        log::debug!("Broken pipe");
    }

    fn finish(&self, stats: &ScanStats) {
        log::info!(
            "Processed {} reads: {} matched ({} forward, {} reverse), {} without a primer pair",
            stats.records,
            stats.matched(),
            stats.forward,
            stats.reverse,
            stats.unmatched()
        );
    }
}

/// Ignores all progress.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl ScanObserver for NoopObserver {}

/// Annotates reads with the primer pair they match and writes the report.
pub struct Annotator<M: PrimerMatcher> {
    matcher: M,
    schema: Schema,
    umi_len: usize,
    progress_interval: usize,
}

impl<M: PrimerMatcher> Annotator<M> {
    pub fn new(matcher: M, config: &ScanConfig) -> Self {
        Self {
            matcher,
            schema: config.schema,
            umi_len: config.umi_len,
            progress_interval: config.progress_interval,
        }
    }

    pub fn schema(&self) -> Schema {
        self.schema
    }

    /// Returns `None` if the sequence matches no primer pair.
    pub fn annotate(&self, seq: &[u8]) -> Result<Option<MatchResult>> {
        Ok(self
            .matcher
            .find(seq)?
            .map(|m| MatchResult::new(m, self.umi_len)))
    }

    /// Write the header and one row per matched read, in input order.
    ///
    /// Stops early without an error if the writer reports a broken pipe.
    pub fn run(
        &self,
        reads: &mut SamReader,
        writer: &mut impl Write,
        observer: &dyn ScanObserver,
    ) -> Result<ScanStats> {
        let mut stats = ScanStats::default();

        match self.run_inner(reads, writer, observer, &mut stats) {
            Err(Error::Output(e)) if e.kind() == io::ErrorKind::BrokenPipe => {
                observer.broken_pipe();
            }
            res => res?,
        }

        stats.lines = reads.lines();
        observer.finish(&stats);
        Ok(stats)
    }

    fn run_inner(
        &self,
        reads: &mut SamReader,
        writer: &mut impl Write,
        observer: &dyn ScanObserver,
        stats: &mut ScanStats,
    ) -> Result<()> {
        write_header(writer, self.schema).map_err(Error::Output)?;

        while let Some(record) = reads.next_record()? {
            stats.records += 1;

            if let Some(res) = self.annotate(&record.seq)? {
                match res.orientation {
                    Orientation::Forward => stats.forward += 1,
                    Orientation::Reverse => stats.reverse += 1,
                }
                write_row(writer, self.schema, &record, &res).map_err(Error::Output)?;
            }

            if self.progress_interval > 0 && stats.records % self.progress_interval == 0 {
                observer.progress(stats.records);
            }
        }

        writer.flush().map_err(Error::Output)
    }
}

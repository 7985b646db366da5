use std::ops::Range;

use bio::pattern_matching::myers::{long, MyersBuilder};

use crate::matcher::*;

/// Approximate matching of each oligo separately, within an edit distance.
///
/// Pairs are tried in catalog order, first as listed and then all reverse
/// complemented. For each pair the second oligo is searched first, then the
/// first oligo, and the first pair with both oligos found wins. Matches are
/// reported in read orientation.
pub struct DistMatcher {
    pairs: Vec<OligoPair>,
    revcomp_pairs: Vec<OligoPair>,
    max_edits: usize,
}

struct OligoPair {
    first: Oligo,
    second: Oligo,
}

impl OligoPair {
    fn new(pair: &PrimerPair, degenerate: DegenerateMode) -> Self {
        Self {
            first: Oligo::new(&pair.first, degenerate),
            second: Oligo::new(&pair.second, degenerate),
        }
    }
}

impl DistMatcher {
    pub fn new(catalog: &PrimerCatalog, max_edits: usize, degenerate: DegenerateMode) -> Self {
        let compile = |pairs: &[PrimerPair]| {
            pairs
                .iter()
                .map(|p| OligoPair::new(p, degenerate))
                .collect::<Vec<_>>()
        };

        Self {
            pairs: compile(catalog.pairs()),
            revcomp_pairs: compile(catalog.revcomp()),
            max_edits,
        }
    }

    fn find_pair(&self, seq: &[u8], pair: &OligoPair) -> Option<(Range<usize>, Range<usize>)> {
        let second = pair.second.search(seq, self.max_edits)?;
        let first = pair.first.search(seq, self.max_edits)?;
        Some((second.range, first.range))
    }
}

impl PrimerMatcher for DistMatcher {
    fn find(&self, seq: &[u8]) -> Result<Option<PrimerMatch>> {
        let orientations = [
            (Orientation::Forward, &self.pairs),
            (Orientation::Reverse, &self.revcomp_pairs),
        ];

        for (orientation, pairs) in orientations {
            for (i, pair) in pairs.iter().enumerate() {
                if let Some((a, b)) = self.find_pair(seq, pair) {
                    return Ok(Some(PrimerMatch::from_spans(i, orientation, seq, a, b)));
                }
            }
        }

        Ok(None)
    }
}

/// An approximate occurrence of a pattern in a text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistMatch {
    pub range: Range<usize>,
    pub dist: usize,
}

/// One oligo compiled for bit-parallel edit distance search.
struct Oligo {
    myers: Option<long::Myers<u64>>,
}

impl Oligo {
    fn new(pattern: &[u8], degenerate: DegenerateMode) -> Self {
        if pattern.is_empty() {
            return Self { myers: None };
        }

        let mut builder = MyersBuilder::new();

        if degenerate == DegenerateMode::Expand {
            let mut codes = pattern.to_vec();
            codes.sort_unstable();
            codes.dedup();

            for code in codes {
                builder.ambig(code, covered_codes(code));
            }
        }

        Self {
            myers: Some(builder.build_long_64(pattern)),
        }
    }

    /// Consecutive end positions that are all within the budget are one
    /// occurrence. The first such run is taken and its lowest-distance end
    /// (earliest on ties) is reported, with the start recovered by traceback.
    fn search(&self, text: &[u8], max_edits: usize) -> Option<DistMatch> {
        let Some(myers) = &self.myers else {
            return Some(DistMatch { range: 0..0, dist: 0 });
        };

        let mut myers = myers.clone();
        let mut matches = myers.find_all_lazy(text, max_edits);
        let mut best: Option<(usize, usize)> = None;
        let mut last_end: Option<usize> = None;

        for (end, dist) in matches.by_ref() {
            if last_end.map_or(false, |e| end != e + 1) {
                break;
            }
            last_end = Some(end);

            if best.map_or(true, |(_, d)| dist < d) {
                best = Some((end, dist));
            }
        }

        let (end, _) = best?;
        let (start, dist) = matches.hit_at(end)?;

        Some(DistMatch {
            range: start..end + 1,
            dist,
        })
    }
}

/// Find the leftmost occurrence of `pattern` in `text` within `max_edits`
/// substitutions, insertions, and deletions.
///
/// With [`DegenerateMode::Expand`], a primer code also matches every read
/// code it covers.
pub fn search(
    pattern: &[u8],
    text: &[u8],
    max_edits: usize,
    degenerate: DegenerateMode,
) -> Option<DistMatch> {
    Oligo::new(pattern, degenerate).search(text, max_edits)
}

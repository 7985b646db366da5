use regex::bytes::{Regex, RegexBuilder, RegexSet, RegexSetBuilder};

use crate::matcher::*;

const SIZE_LIMIT: usize = 1 << 28;

struct Alternative {
    primer_index: usize,
    orientation: Orientation,
    regex: Regex,
}

/// Exact matching of all primer pairs with one combined pattern.
///
/// Each primer pair contributes two alternatives, in this order across the
/// whole catalog: every pair as listed, then every pair reverse complemented.
/// A listed pair `(p1, p2)` matches reads of the form
/// `<prefix><p2><insert><p1><suffix>` with a non-empty insert, and the
/// reverse complemented pair matches `<prefix><rc(p1)><insert><rc(p2)><suffix>`.
///
/// The first alternative that matches anywhere in the read wins. Reverse
/// matches are reported reoriented to the listed primers.
pub struct RegexMatcher {
    set: RegexSet,
    alternatives: Vec<Alternative>,
}

impl RegexMatcher {
    pub fn new(catalog: &PrimerCatalog, degenerate: DegenerateMode) -> Result<Self> {
        let forward = catalog
            .pairs()
            .iter()
            .enumerate()
            .map(|(i, p)| (i, Orientation::Forward, &p.second, &p.first));
        let reverse = catalog
            .revcomp()
            .iter()
            .enumerate()
            .map(|(i, p)| (i, Orientation::Reverse, &p.first, &p.second));

        let mut patterns = Vec::with_capacity(catalog.len() * 2);
        let mut alternatives = Vec::with_capacity(catalog.len() * 2);

        for (primer_index, orientation, left, right) in forward.chain(reverse) {
            let pattern = format!(
                "(?s-u)(.*)({})(.+)({})(.*)",
                primer_pattern(left, degenerate),
                primer_pattern(right, degenerate)
            );
            let regex = RegexBuilder::new(&pattern).size_limit(SIZE_LIMIT).build()?;

            patterns.push(pattern);
            alternatives.push(Alternative {
                primer_index,
                orientation,
                regex,
            });
        }

        let set = RegexSetBuilder::new(&patterns)
            .size_limit(SIZE_LIMIT)
            .build()?;

        Ok(Self { set, alternatives })
    }

    /// Number of alternatives in the combined pattern.
    pub fn len(&self) -> usize {
        self.alternatives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alternatives.is_empty()
    }
}

impl PrimerMatcher for RegexMatcher {
    fn find(&self, seq: &[u8]) -> Result<Option<PrimerMatch>> {
        let Some(idx) = self.set.matches(seq).iter().next() else {
            return Ok(None);
        };
        let alt = &self.alternatives[idx];

        let Some(caps) = alt.regex.captures(seq) else {
            return Ok(None);
        };
        let (Some(left), Some(right)) = (caps.get(2), caps.get(4)) else {
            return Ok(None);
        };

        let m = PrimerMatch::from_spans(
            alt.primer_index,
            alt.orientation,
            seq,
            left.range(),
            right.range(),
        );

        match alt.orientation {
            Orientation::Forward => Ok(Some(m)),
            Orientation::Reverse => m
                .reoriented()
                .map(Some)
                .map_err(|e| e.with_context(format!("read sequence \"{}\"", utf8(seq)))),
        }
    }
}

/// Pattern for one primer. Expanded ambiguity codes become character classes.
fn primer_pattern(primer: &[u8], degenerate: DegenerateMode) -> String {
    let mut res = String::with_capacity(primer.len());

    for &b in primer {
        match degenerate {
            DegenerateMode::Literal => res.push_str(&regex::escape(&char::from(b).to_string())),
            DegenerateMode::Expand => {
                let codes = covered_codes(b).map(char::from).collect::<String>();

                match codes.len() {
                    0 => res.push_str(&regex::escape(&char::from(b).to_string())),
                    1 => res.push_str(&codes),
                    _ => {
                        res.push('[');
                        res.push_str(&codes);
                        res.push(']');
                    }
                }
            }
        }
    }

    res
}

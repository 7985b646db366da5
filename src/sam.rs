use flate2::read::MultiGzDecoder;
use memchr::memchr_iter;

use std::fs::File;
use std::io::{self, BufRead, BufReader};

use crate::errors::*;

const NAME_COL: usize = 0;
const FLAG_COL: usize = 1;
const CHROM_COL: usize = 2;
const POS_COL: usize = 3;
const SEQ_COL: usize = 9;

/// Flag bit for a read mapped to the reverse strand.
pub const FLAG_REVERSE: u16 = 16;

/// Which columns of each line must be parsed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Columns {
    /// Read name and sequence.
    NameSeq,
    /// Also flag, reference name, and position.
    Full,
}

/// One tab-separated alignment line.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SamRecord {
    pub name: Vec<u8>,
    pub flag: u16,
    pub chrom: Vec<u8>,
    pub pos: Vec<u8>,
    pub seq: Vec<u8>,
}

impl SamRecord {
    pub fn is_reverse(&self) -> bool {
        self.flag & FLAG_REVERSE != 0
    }

    /// Parse the required columns of a line, without its line terminator.
    pub fn parse(line: &[u8], columns: Columns) -> std::result::Result<Self, String> {
        let mut fields = [&line[..0]; SEQ_COL + 1];
        let mut found = 0;
        let mut start = 0;

        for end in memchr_iter(b'\t', line).chain(std::iter::once(line.len())) {
            fields[found] = &line[start..end];
            found += 1;
            start = end + 1;

            if found == fields.len() {
                break;
            }
        }

        if found <= SEQ_COL {
            return Err(format!(
                "expected at least {} tab-separated fields, found {}",
                SEQ_COL + 1,
                found
            ));
        }

        let mut record = Self {
            name: fields[NAME_COL].to_owned(),
            seq: fields[SEQ_COL].to_owned(),
            ..Default::default()
        };

        if columns == Columns::Full {
            let flag = fields[FLAG_COL];
            record.flag = std::str::from_utf8(flag)
                .ok()
                .and_then(|f| f.parse().ok())
                .ok_or_else(|| format!("invalid flag \"{}\"", utf8(flag)))?;
            record.chrom = fields[CHROM_COL].to_owned();
            record.pos = fields[POS_COL].to_owned();
        }

        Ok(record)
    }
}

/// Streams records from tab-separated alignment text.
///
/// Header lines starting with `@` and blank lines are skipped.
pub struct SamReader<'reader> {
    reader: Box<dyn BufRead + 'reader>,
    origin: Origin,
    columns: Columns,
    line: usize,
    buf: Vec<u8>,
}

impl<'reader> SamReader<'reader> {
    pub fn new(reader: impl BufRead + 'reader, origin: Origin, columns: Columns) -> Self {
        Self {
            reader: Box::new(reader),
            origin,
            columns,
            line: 0,
            buf: Vec::new(),
        }
    }

    /// Read from a file, or from stdin if there is no file or it is `-`.
    ///
    /// Files ending in `.gz` are decompressed.
    pub fn open(file: Option<&str>, columns: Columns) -> Result<SamReader<'static>> {
        match file {
            None | Some("-") => Ok(SamReader::new(
                BufReader::new(io::stdin()),
                Origin::Stdin,
                columns,
            )),
            Some(file) => {
                let f = File::open(file).map_err(|e| Error::FileIo {
                    file: file.to_owned(),
                    source: Box::new(e),
                })?;
                let origin = Origin::File(file.to_owned());

                if file.ends_with(".gz") {
                    Ok(SamReader::new(
                        BufReader::new(MultiGzDecoder::new(f)),
                        origin,
                        columns,
                    ))
                } else {
                    Ok(SamReader::new(BufReader::new(f), origin, columns))
                }
            }
        }
    }

    pub fn from_bytes(bytes: &'reader [u8], columns: Columns) -> Self {
        Self::new(bytes, Origin::Bytes, columns)
    }

    /// Number of lines read so far, including skipped lines.
    pub fn lines(&self) -> usize {
        self.line
    }

    pub fn next_record(&mut self) -> Result<Option<SamRecord>> {
        loop {
            self.buf.clear();
            let n = self
                .reader
                .read_until(b'\n', &mut self.buf)
                .map_err(|e| Error::FileIo {
                    file: self.origin.to_string(),
                    source: Box::new(e),
                })?;

            if n == 0 {
                return Ok(None);
            }
            self.line += 1;

            let mut line = self.buf.as_slice();
            while let [rest @ .., b'\n' | b'\r'] = line {
                line = rest;
            }

            if line.is_empty() || line[0] == b'@' {
                continue;
            }

            return SamRecord::parse(line, self.columns)
                .map(Some)
                .map_err(|reason| Error::ParseRecord {
                    origin: self.origin.clone(),
                    line: self.line,
                    reason,
                });
        }
    }
}

impl<'reader> Iterator for SamReader<'reader> {
    type Item = Result<SamRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_record().transpose()
    }
}

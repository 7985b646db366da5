use std::io::{self, Write};

use crate::annotate::MatchResult;
use crate::config::Schema;
use crate::sam::{Columns, SamRecord};

const BASIC_HEADER: &[&str] = &[
    "READ",
    "PRIMERID",
    "PRELEFT",
    "LEFTPRIMER",
    "SEQUENCE",
    "RIGHTPRIMER",
    "POSTRIGHT",
    "UMI",
    "PRIMER.ORIENTATION",
];

const SAM_HEADER: &[&str] = &[
    "READ",
    "CHROM",
    "POS",
    "PRIMERID",
    "PRELEFT",
    "LEFTPRIMER",
    "SEQUENCE",
    "RIGHTPRIMER",
    "POSTRIGHT",
    "UMI",
    "PRIMER.ORIENTATION",
    "READ.ORIENTATION",
    "SEQ",
];

impl Schema {
    pub fn header(&self) -> &'static [&'static str] {
        match self {
            Schema::Basic => BASIC_HEADER,
            Schema::Sam => SAM_HEADER,
        }
    }

    /// Input columns needed to fill this schema.
    pub fn columns(&self) -> Columns {
        match self {
            Schema::Basic => Columns::NameSeq,
            Schema::Sam => Columns::Full,
        }
    }
}

pub fn write_header(writer: &mut impl Write, schema: Schema) -> io::Result<()> {
    writer.write_all(schema.header().join("\t").as_bytes())?;
    writer.write_all(b"\n")
}

pub fn write_row(
    writer: &mut impl Write,
    schema: Schema,
    record: &SamRecord,
    res: &MatchResult,
) -> io::Result<()> {
    let primer_id = res.primer_index.to_string();
    let primer_orientation = res.orientation.to_string();
    let read_orientation: &[u8] = if record.is_reverse() { b"-" } else { b"+" };

    let parts: &[&[u8]] = &[
        &res.pre,
        &res.primer_left,
        &res.insert,
        &res.primer_right,
        &res.post,
        &res.umi,
        primer_orientation.as_bytes(),
    ];

    let mut fields: Vec<&[u8]> = Vec::with_capacity(SAM_HEADER.len());
    fields.push(&record.name);

    if schema == Schema::Sam {
        fields.push(&record.chrom);
        fields.push(&record.pos);
    }

    fields.push(primer_id.as_bytes());
    fields.extend_from_slice(parts);

    if schema == Schema::Sam {
        fields.push(read_orientation);
        fields.push(&record.seq);
    }

    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            writer.write_all(b"\t")?;
        }
        writer.write_all(field)?;
    }

    writer.write_all(b"\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::Orientation;

    fn result() -> MatchResult {
        MatchResult {
            primer_index: 4,
            orientation: Orientation::Reverse,
            pre: b"GG".to_vec(),
            primer_left: b"CCCC".to_vec(),
            insert: b"TTTT".to_vec(),
            primer_right: b"AAAA".to_vec(),
            post: b"GGA".to_vec(),
            umi: b"GGA".to_vec(),
        }
    }

    fn record() -> SamRecord {
        SamRecord {
            name: b"r1".to_vec(),
            flag: 16,
            chrom: b"chr1".to_vec(),
            pos: b"100".to_vec(),
            seq: b"ACGT".to_vec(),
        }
    }

    #[test]
    fn test_basic_row() {
        let mut out = Vec::new();
        write_header(&mut out, Schema::Basic).unwrap();
        write_row(&mut out, Schema::Basic, &record(), &result()).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "READ\tPRIMERID\tPRELEFT\tLEFTPRIMER\tSEQUENCE\tRIGHTPRIMER\tPOSTRIGHT\tUMI\tPRIMER.ORIENTATION\n\
             r1\t4\tGG\tCCCC\tTTTT\tAAAA\tGGA\tGGA\t-\n"
        );
    }

    #[test]
    fn test_sam_row() {
        let mut out = Vec::new();
        write_row(&mut out, Schema::Sam, &record(), &result()).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "r1\tchr1\t100\t4\tGG\tCCCC\tTTTT\tAAAA\tGGA\tGGA\t-\t-\tACGT\n"
        );
        assert_eq!(Schema::Sam.header().len(), 13);
    }
}

//! Record input (FASTA/FASTQ, optionally gzipped) and match reports.
//!
//! Reports come in two flavours:
//! - TSV: `start<TAB>len` per match with **1-based** starts; a leading record
//!   id column is added when more than one record is written, or when forced
//!   with [`ReportWriter::record_ids`].
//! - JSON: array of `{id, len, matches: [{start, len}]}` with 0-based starts.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use bio::io::{fasta, fastq};
use flate2::read::MultiGzDecoder;
use serde::Serialize;

use crate::builder::RecordHits;
use crate::locate::{PalindromeMatch, flatten};

/// A decoded input sequence (upper-cased).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SequenceRecord {
    pub id: String,
    pub seq: Vec<u8>,
}

impl SequenceRecord {
    pub fn new(id: impl Into<String>, seq: impl AsRef<[u8]>) -> Self {
        Self {
            id: id.into(),
            seq: seq.as_ref().to_ascii_uppercase(),
        }
    }
}

/// Report layout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ReportFormat {
    /// Tab-separated, 1-based starts.
    #[default]
    Tsv,
    /// JSON document, 0-based starts.
    Json,
}

/// Helper: map any error to `std::io::Error` with kind=Other.
fn io_other<E: std::fmt::Display>(e: E) -> std::io::Error {
    std::io::Error::other(format!("{e}"))
}

fn ext_is(path: &Path, exts: &[&str]) -> bool {
    path.extension()
        .is_some_and(|e| exts.iter().any(|x| e.eq_ignore_ascii_case(x)))
}

fn is_gzip(path: &Path) -> bool {
    ext_is(path, &["gz"])
}

/// `.fq`/`.fastq`, also underneath a trailing `.gz`.
fn is_fastq(path: &Path) -> bool {
    const FASTQ: &[&str] = &["fq", "fastq"];
    if is_gzip(path) {
        path.file_stem()
            .is_some_and(|stem| ext_is(Path::new(stem), FASTQ))
    } else {
        ext_is(path, FASTQ)
    }
}

fn open_buf(path: &Path) -> std::io::Result<Box<dyn BufRead>> {
    let file = File::open(path)?;
    if is_gzip(path) {
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Read every record of a FASTA or FASTQ file (`.fq`/`.fastq`, `.gz` allowed).
pub fn read_records(path: &Path) -> std::io::Result<Vec<SequenceRecord>> {
    let reader = open_buf(path)?;
    let mut out = Vec::new();
    if is_fastq(path) {
        for rec in fastq::Reader::new(reader).records() {
            let rec = rec.map_err(io_other)?;
            out.push(SequenceRecord::new(rec.id(), rec.seq()));
        }
    } else {
        for rec in fasta::Reader::new(reader).records() {
            let rec = rec?;
            out.push(SequenceRecord::new(rec.id(), rec.seq()));
        }
    }
    Ok(out)
}

#[derive(Serialize)]
struct JsonRecord<'a> {
    id: &'a str,
    len: usize,
    matches: Vec<PalindromeMatch>,
}

/// Writer that renders scan results as a TSV or JSON report.
pub struct ReportWriter<'a> {
    results: &'a [RecordHits],
    format: ReportFormat,
    record_ids: Option<bool>,
}

impl<'a> ReportWriter<'a> {
    pub fn new(results: &'a [RecordHits]) -> Self {
        Self {
            results,
            format: ReportFormat::Tsv,
            record_ids: None,
        }
    }

    pub fn format(mut self, format: ReportFormat) -> Self {
        self.format = format;
        self
    }

    /// Force the TSV id column on or off.
    ///
    /// Unset, the column appears only when more than one result is written.
    /// Callers that skipped records pass the input record count instead.
    pub fn record_ids(mut self, on: bool) -> Self {
        self.record_ids = Some(on);
        self
    }

    /// Render into any writer.
    pub fn write<W: Write>(&self, w: &mut W) -> std::io::Result<()> {
        match self.format {
            ReportFormat::Tsv => self.write_tsv(w),
            ReportFormat::Json => self.write_json(w),
        }
    }

    /// Render into a file (created or truncated).
    pub fn write_to(&self, path: &Path) -> std::io::Result<()> {
        let mut w = BufWriter::new(File::create(path)?);
        self.write(&mut w)?;
        w.flush()
    }

    fn write_tsv<W: Write>(&self, w: &mut W) -> std::io::Result<()> {
        let with_id = self.record_ids.unwrap_or(self.results.len() > 1);
        for rec in self.results {
            for (&start, lens) in &rec.hits {
                for len in lens {
                    if with_id {
                        write!(w, "{}\t", rec.id)?;
                    }
                    writeln!(w, "{}\t{}", start + 1, len)?;
                }
            }
        }
        Ok(())
    }

    fn write_json<W: Write>(&self, w: &mut W) -> std::io::Result<()> {
        let doc: Vec<JsonRecord<'_>> = self
            .results
            .iter()
            .map(|r| JsonRecord {
                id: &r.id,
                len: r.len,
                matches: flatten(&r.hits),
            })
            .collect();
        serde_json::to_writer_pretty(&mut *w, &doc).map_err(io_other)?;
        writeln!(w)
    }
}

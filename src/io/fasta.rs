use std::io::BufRead;

use crate::error::Result;
use crate::sequence::Sequence;
use crate::util::dna;

#[derive(Debug, Clone)]
pub struct FastaRecord {
    pub id: String,
    pub desc: Option<String>,
    /// Raw sequence bytes, whitespace removed, otherwise untouched
    pub seq: Vec<u8>,
}

impl FastaRecord {
    /// Normalize (uppercase, drop non-ACGT) and validate into a [`Sequence`].
    pub fn to_sequence(&self) -> Result<Sequence> {
        Sequence::new(dna::normalize_seq(&self.seq))
    }
}

/// Streaming FASTA reader. Lines before the first header are treated as an
/// anonymous record so plain-text sequence files are accepted as well.
pub struct FastaReader<R: BufRead> {
    reader: R,
    buf: String,
    done: bool,
    peek_header: Option<String>,
    anonymous_id: String,
}

impl<R: BufRead> FastaReader<R> {
    pub fn new(reader: R) -> Self {
        Self::with_anonymous_id(reader, "seq")
    }

    pub fn with_anonymous_id(reader: R, id: &str) -> Self {
        Self {
            reader,
            buf: String::new(),
            done: false,
            peek_header: None,
            anonymous_id: id.to_string(),
        }
    }

    pub fn next_record(&mut self) -> Result<Option<FastaRecord>> {
        if self.done {
            return Ok(None);
        }

        let mut seq: Vec<u8> = Vec::new();
        let header = match self.peek_header.take() {
            Some(h) => Some(h),
            None => loop {
                self.buf.clear();
                if self.reader.read_line(&mut self.buf)? == 0 {
                    self.done = true;
                    break None;
                }
                if let Some(rest) = self.buf.strip_prefix('>') {
                    break Some(rest.trim().to_string());
                }
                push_bases(&mut seq, &self.buf);
            },
        };

        let Some(header) = header else {
            // headerless input: whatever was read is the only record
            if seq.is_empty() {
                return Ok(None);
            }
            return Ok(Some(FastaRecord { id: self.anonymous_id.clone(), desc: None, seq }));
        };
        if !seq.is_empty() {
            // text preceding the first header forms its own record
            self.peek_header = Some(header);
            return Ok(Some(FastaRecord { id: self.anonymous_id.clone(), desc: None, seq }));
        }

        let mut parts = header.splitn(2, char::is_whitespace);
        let id = parts.next().unwrap_or("").to_string();
        let desc = parts
            .next()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        loop {
            self.buf.clear();
            if self.reader.read_line(&mut self.buf)? == 0 {
                self.done = true;
                break;
            }
            if let Some(rest) = self.buf.strip_prefix('>') {
                self.peek_header = Some(rest.trim().to_string());
                break;
            }
            push_bases(&mut seq, &self.buf);
        }

        Ok(Some(FastaRecord { id, desc, seq }))
    }

    /// Drain the reader.
    pub fn records(mut self) -> Result<Vec<FastaRecord>> {
        let mut out = Vec::new();
        while let Some(rec) = self.next_record()? {
            out.push(rec);
        }
        Ok(out)
    }
}

fn push_bases(seq: &mut Vec<u8>, line: &str) {
    seq.extend(line.bytes().filter(|b| !b.is_ascii_whitespace()));
}

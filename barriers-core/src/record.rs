//! Sorted `(configuration, energy)` records and a line-oriented reader.

use std::{
    io::{BufRead, Lines},
    sync::Arc,
};

use crate::{Result, error::BarrierError};

/// One input record.
///
/// # Examples
/// ```
/// use barriers_core::Record;
///
/// let record = Record::new("((..))", -1.5);
/// assert_eq!(record.configuration(), "((..))");
/// assert_eq!(record.energy(), -1.5);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Record {
    configuration: String,
    energy: f64,
    line: usize,
}

impl Record {
    /// Creates a record that did not come from a text source.
    #[must_use]
    pub fn new(configuration: impl Into<String>, energy: f64) -> Self {
        Self {
            configuration: configuration.into(),
            energy,
            line: 0,
        }
    }

    /// Configuration in its unpacked textual form.
    #[must_use]
    pub fn configuration(&self) -> &str {
        &self.configuration
    }

    /// Energy of the configuration.
    #[must_use]
    pub fn energy(&self) -> f64 {
        self.energy
    }

    /// One-based source line, `0` for records built in memory.
    #[must_use]
    pub fn line(&self) -> usize {
        self.line
    }
}

/// Reads records from a text stream.
///
/// The first non-empty line is a header whose first token is the reference
/// configuration (for RNA landscapes, the sequence); its length fixes the
/// length of every configuration that follows. Each further non-empty line
/// holds `<configuration> <energy>` followed by optional ignored columns.
///
/// # Examples
/// ```
/// use barriers_core::RecordReader;
///
/// let input = "GGGAAACCC -1.20\n(((...))) -1.20 3\n.........  0.00\n";
/// let reader = RecordReader::new(input.as_bytes())?;
/// assert_eq!(reader.reference(), "GGGAAACCC");
/// let records = reader.collect::<Result<Vec<_>, _>>()?;
/// assert_eq!(records.len(), 2);
/// assert_eq!(records[1].line(), 3);
/// # Ok::<(), barriers_core::BarrierError>(())
/// ```
#[derive(Debug)]
pub struct RecordReader<R> {
    lines: Lines<R>,
    line: usize,
    reference: String,
    length: usize,
}

impl<R: BufRead> RecordReader<R> {
    /// Consumes the header line.
    ///
    /// # Errors
    /// Returns [`BarrierError::EmptyInput`] when the stream holds no header and
    /// [`BarrierError::Io`] when reading fails.
    pub fn new(reader: R) -> Result<Self> {
        let mut lines = reader.lines();
        let mut line = 0;
        let reference = loop {
            let text = lines
                .next()
                .ok_or(BarrierError::EmptyInput)?
                .map_err(|error| BarrierError::io("reading the record header", &error))?;
            line += 1;
            if let Some(token) = text.split_whitespace().next() {
                break token.to_owned();
            }
        };
        let length = reference.chars().count();
        Ok(Self {
            lines,
            line,
            reference,
            length,
        })
    }

    /// Reference configuration from the header.
    #[must_use]
    pub fn reference(&self) -> &str {
        &self.reference
    }

    /// Configuration length fixed by the header.
    #[must_use]
    pub fn length(&self) -> usize {
        self.length
    }

    fn parse(&self, text: &str) -> Option<Result<Record>> {
        let mut fields = text.split_whitespace();
        let configuration = fields.next()?;
        Some(self.parse_fields(configuration, fields.next()))
    }

    fn parse_fields(&self, configuration: &str, energy: Option<&str>) -> Result<Record> {
        let actual = configuration.chars().count();
        if actual != self.length {
            return Err(BarrierError::LengthMismatch {
                line: self.line,
                expected: self.length,
                actual,
            });
        }
        let raw = energy.ok_or_else(|| self.malformed("missing energy column"))?;
        let energy: f64 = raw
            .parse()
            .map_err(|_| self.malformed(&format!("energy `{raw}` is not a number")))?;
        if !energy.is_finite() {
            return Err(self.malformed(&format!("energy `{raw}` is not finite")));
        }
        Ok(Record {
            configuration: configuration.to_owned(),
            energy,
            line: self.line,
        })
    }

    fn malformed(&self, reason: &str) -> BarrierError {
        BarrierError::MalformedRecord {
            line: self.line,
            reason: Arc::from(reason),
        }
    }
}

impl<R: BufRead> Iterator for RecordReader<R> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let text = match self.lines.next()? {
                Ok(text) => text,
                Err(error) => return Some(Err(BarrierError::io("reading records", &error))),
            };
            self.line += 1;
            if let Some(parsed) = self.parse(&text) {
                return Some(parsed);
            }
        }
    }
}

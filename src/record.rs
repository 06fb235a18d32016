use crate::map::MapArray;
use crate::sampler::Pair;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// One generated problem instance, stored as a single JSON line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemRecord {
    /// Problem id, e.g. `p000123`
    pub problem: String,
    /// Row-major map, 0 = crossable, 1 = obstacle
    pub map: MapArray,
    pub source_destination: Pair,
}

/// Problem id for a running index, zero-padded to 6 digits
pub fn problem_id(index: usize) -> String {
    format!("p{:06}", index)
}

impl ProblemRecord {
    pub fn new(index: usize, map: MapArray, pair: Pair) -> Self {
        ProblemRecord {
            problem: problem_id(index),
            map,
            source_destination: pair,
        }
    }

    pub fn to_json_line(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Buffered writer for newline-delimited problem records
pub struct RecordWriter {
    writer: BufWriter<File>,
    written: usize,
}

impl RecordWriter {
    /// Create (or truncate) the records file
    pub fn create(path: &Path) -> io::Result<Self> {
        let file = File::create(path)?;
        Ok(RecordWriter {
            writer: BufWriter::new(file),
            written: 0,
        })
    }

    /// Open the records file for appending
    pub fn append(path: &Path) -> io::Result<Self> {
        let file = fs::OpenOptions::new().create(true).append(true).open(path)?;
        Ok(RecordWriter {
            writer: BufWriter::new(file),
            written: 0,
        })
    }

    pub fn write(&mut self, record: &ProblemRecord) -> io::Result<()> {
        serde_json::to_writer(&mut self.writer, record)?;
        self.writer.write_all(b"\n")?;
        self.written += 1;
        Ok(())
    }

    pub fn written(&self) -> usize {
        self.written
    }

    /// Flush buffered records to disk
    pub fn finish(mut self) -> io::Result<usize> {
        self.writer.flush()?;
        Ok(self.written)
    }
}

/// Read every record from a JSONL file, skipping blank lines
pub fn read_records(path: &Path) -> Result<Vec<ProblemRecord>, Box<dyn std::error::Error>> {
    let contents = fs::read_to_string(path)?;
    let mut records = Vec::new();
    for (line_no, line) in contents.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let record: ProblemRecord = serde_json::from_str(line)
            .map_err(|e| format!("Failed to parse record on line {}: {}", line_no + 1, e))?;
        records.push(record);
    }
    Ok(records)
}

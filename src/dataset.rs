use anyhow::{anyhow, Result};
use csv::{ByteRecord, ReaderBuilder, Trim};
use ndarray::Array2;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::trace;

/// Points read from comma separated text, one row per point
#[derive(Debug, Clone)]
pub struct DataSet {
    pub data: Array2<f64>,
    /// Rows dropped because they did not match the detected dimension
    pub skipped: usize,
}

impl DataSet {
    /// Read a CSV file into a DataSet
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(&path)
            .map_err(|e| anyhow!("Failed to open {:?}: {}", path.as_ref(), e))?;
        Self::from_reader(file)
    }

    /// Read headerless comma separated rows.
    ///
    /// Blank lines are ignored. The first remaining row fixes the dimension,
    /// even when all of its fields are empty. Any row with a different number
    /// of fields, or with a field that is not a UTF-8 number, is dropped
    /// without error.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = ReaderBuilder::new()
            .delimiter(b',')
            .has_headers(false)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(reader);

        let mut dim = 0;
        let mut nrows = 0;
        let mut skipped = 0;
        let mut flat: Vec<f64> = Vec::new();

        for (i, result) in rdr.byte_records().enumerate() {
            let record = result.map_err(|e| anyhow!("Error reading record {}: {}", i, e))?;
            if record.len() <= 1 && record.iter().all(|field| field.is_empty()) {
                continue;
            }
            if dim == 0 {
                dim = record.len();
            }

            match parse_row(&record, dim) {
                Some(row) => {
                    flat.extend(row);
                    nrows += 1;
                }
                None => {
                    trace!(record = i, fields = record.len(), dim, "dropping malformed row");
                    skipped += 1;
                }
            }
        }

        let data = Array2::from_shape_vec((nrows, dim), flat)?;
        Ok(Self { data, skipped })
    }

    /// Number of points
    pub fn len(&self) -> usize {
        self.data.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.data.nrows() == 0
    }

    /// Coordinates per point (0 for an empty input)
    pub fn dim(&self) -> usize {
        self.data.ncols()
    }
}

fn parse_row(record: &ByteRecord, dim: usize) -> Option<Vec<f64>> {
    if record.len() != dim {
        return None;
    }
    record
        .iter()
        .map(|x| std::str::from_utf8(x).ok()?.parse::<f64>().ok())
        .collect()
}

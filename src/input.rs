//! Reading points from delimited text files
//!
//! Each row carries at least two numeric columns. The columns used as
//! coordinates are configurable; every other field is kept verbatim so it
//! can be written back next to the cluster label.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;
use tracing::{debug, warn};

use crate::cluster::{Point, PointList};
use crate::error::{Error, Result};

/// CSV records type alias for readability
pub type CsvRecords = Vec<Vec<String>>;

/// How to read coordinates from the input rows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputOptions {
    /// Field delimiter, `b','` for CSV or `b' '` for space separated rows
    pub delimiter: u8,
    /// Column holding x (latitude for the great-circle metric)
    pub x_column: usize,
    /// Column holding y (longitude for the great-circle metric)
    pub y_column: usize,
    /// Fail on rows without usable coordinates instead of skipping them
    pub strict: bool,
}

impl Default for InputOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            x_column: 0,
            y_column: 1,
            strict: false,
        }
    }
}

impl InputOptions {
    pub fn validate(&self) -> Result<()> {
        if self.x_column == self.y_column {
            return Err(Error::invalid_parameter(
                "y_column",
                format!("must differ from x_column ({})", self.x_column),
            ));
        }
        Ok(())
    }
}

/// Points read from an input file together with their raw rows
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointRecords {
    /// Header row, if the first row was not numeric
    pub header: Option<Vec<String>>,
    /// Parsed points
    pub points: PointList,
    /// Raw rows, `records[i]` is the row `points[i]` was read from
    pub records: CsvRecords,
}

/// Reads points and their rows from a file
pub fn read_points(path: &Path, options: &InputOptions) -> Result<PointRecords> {
    let file = File::open(path)?;
    let result = read_points_from(file, options)?;
    debug!(
        "Read {} points from {}",
        result.points.len(),
        path.display()
    );
    Ok(result)
}

/// Reads points and their rows from any reader
///
/// Expected format: `x,y[,extra...]` by default (header row is optional)
pub fn read_points_from<R: Read>(reader: R, options: &InputOptions) -> Result<PointRecords> {
    options.validate()?;

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(options.delimiter)
        .from_reader(reader);

    let mut result = PointRecords::default();
    let mut skipped = 0usize;

    for (row, record) in reader.records().enumerate() {
        let record = record?;
        let line = record.position().map_or(row as u64 + 1, |pos| pos.line());
        let fields: Vec<String> = record.iter().map(|s| s.to_string()).collect();

        // Determine if first row is header
        if row == 0 && is_header(&fields, options.x_column) {
            result.header = Some(fields);
            continue;
        }

        match parse_point(&fields, options) {
            Ok(point) => {
                result.points.push(point);
                result.records.push(fields);
            }
            Err(reason) if options.strict => {
                return Err(Error::InvalidRecord { line, reason });
            }
            Err(reason) => {
                warn!("Skipping line {}: {}", line, reason);
                skipped += 1;
            }
        }
    }

    if skipped > 0 {
        warn!("Skipped {} rows without usable coordinates", skipped);
    }

    Ok(result)
}

fn is_header(fields: &[String], x_column: usize) -> bool {
    fields
        .get(x_column)
        .is_some_and(|field| field.trim().parse::<f64>().is_err())
}

fn parse_point(fields: &[String], options: &InputOptions) -> std::result::Result<Point, String> {
    let x = parse_coordinate(fields, options.x_column)?;
    let y = parse_coordinate(fields, options.y_column)?;
    Ok(Point::new(x, y))
}

fn parse_coordinate(fields: &[String], column: usize) -> std::result::Result<f64, String> {
    let field = fields
        .get(column)
        .ok_or_else(|| format!("missing column {} ({} fields)", column, fields.len()))?;
    let value = field
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("column {}: {:?} is not a number ({})", column, field, e))?;
    if !value.is_finite() {
        return Err(format!("column {}: {} is not finite", column, value));
    }
    Ok(value)
}

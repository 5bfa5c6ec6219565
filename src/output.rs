//! Writing cluster labels and hull polygons

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use csv::WriterBuilder;

use crate::cluster::{ClusterHull, Clustering};
use crate::error::Result;
use crate::input::PointRecords;

/// Name of the column appended to a header row
pub const LABEL_COLUMN: &str = "cluster";

/// Header of the hull output
pub const HULL_HEADER: [&str; 4] = ["cluster", "vertex", "x", "y"];

/// Writes labeled points to a file, or to stdout when `path` is `None`
pub fn write_labeled_points(
    path: Option<&Path>,
    input: &PointRecords,
    clustering: &Clustering,
) -> Result<()> {
    match path {
        Some(path) => write_labeled_points_to(File::create(path)?, input, clustering),
        None => write_labeled_points_to(io::stdout().lock(), input, clustering),
    }
}

/// Writes every input row followed by its label code (0 for noise)
///
/// A header row, if present, gets a `cluster` column appended.
pub fn write_labeled_points_to<W: Write>(
    writer: W,
    input: &PointRecords,
    clustering: &Clustering,
) -> Result<()> {
    let mut writer = WriterBuilder::new().flexible(true).from_writer(writer);

    if let Some(header) = &input.header {
        let mut row = header.clone();
        row.push(LABEL_COLUMN.to_string());
        writer.write_record(&row)?;
    }

    for (record, code) in input.records.iter().zip(clustering.label_codes()) {
        let mut row = record.clone();
        row.push(code.to_string());
        writer.write_record(&row)?;
    }

    writer.flush()?;
    Ok(())
}

/// Writes hull polygons to a file, or to stdout when `path` is `None`
pub fn write_hulls(path: Option<&Path>, hulls: &[ClusterHull]) -> Result<()> {
    match path {
        Some(path) => write_hulls_to(File::create(path)?, hulls),
        None => write_hulls_to(io::stdout().lock(), hulls),
    }
}

/// Writes one `cluster,vertex,x,y` row per hull vertex
pub fn write_hulls_to<W: Write>(writer: W, hulls: &[ClusterHull]) -> Result<()> {
    let mut writer = WriterBuilder::new().from_writer(writer);
    writer.write_record(HULL_HEADER)?;

    for hull in hulls {
        for (vertex, point) in hull.vertices.iter().enumerate() {
            writer.write_record([
                hull.c.to_string(),
                vertex.to_string(),
                point.x().to_string(),
                point.y().to_string(),
            ])?;
        }
    }

    writer.flush()?;
    Ok(())
}

//! DBSCAN point clustering tool
//!
//! Reads points from a delimited text file, applies DBSCAN clustering, writes
//! every point with its cluster label and the convex hull of each cluster.

use std::path::PathBuf;

use clap::Parser;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use dbscan_hull::Result;
use dbscan_hull::cluster::{DEFAULT_MAX_POINTS, DbscanParams, Metric, db_scan};
use dbscan_hull::input::{InputOptions, read_points};
use dbscan_hull::output::{write_hulls, write_labeled_points};

#[derive(Parser)]
#[command(name = "dbscan_hull")]
#[command(about = "DBSCAN point clustering with convex hull boundaries", long_about = None)]
struct Args {
    /// Input file with x,y (latitude,longitude) columns
    #[arg(short, long, default_value = "points.csv")]
    input: PathBuf,

    /// Output CSV file with labeled points (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output CSV file with cluster hulls (default: log only)
    #[arg(long)]
    hulls: Option<PathBuf>,

    /// DBSCAN epsilon parameter (meters for great-circle, coordinate unit for planar)
    #[arg(short, long, default_value_t = 300.0)]
    eps: f64,

    /// DBSCAN minPoints parameter (neighbourhood size of a core point, itself included)
    #[arg(short = 'm', long, default_value_t = 3)]
    min_points: usize,

    /// Distance metric matching the coordinates
    #[arg(long, value_enum, default_value_t = Metric::GreatCircle)]
    metric: Metric,

    /// Refuse inputs with more points than this (0 = no limit)
    #[arg(long, default_value_t = DEFAULT_MAX_POINTS)]
    max_points: usize,

    /// Field delimiter of the input file
    #[arg(long, default_value_t = ',')]
    delimiter: char,

    /// Zero-based column of x (latitude)
    #[arg(long, default_value_t = 0)]
    x_column: usize,

    /// Zero-based column of y (longitude)
    #[arg(long, default_value_t = 1)]
    y_column: usize,

    /// Fail on rows without usable coordinates instead of skipping them
    #[arg(long)]
    strict: bool,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,
}

fn main() {
    let args = Args::parse();

    let directive = if args.debug {
        "dbscan_hull=debug"
    } else {
        "dbscan_hull=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(&args) {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    let options = InputOptions {
        delimiter: delimiter_byte(args.delimiter)?,
        x_column: args.x_column,
        y_column: args.y_column,
        strict: args.strict,
    };
    let input = read_points(&args.input, &options)?;

    if input.points.is_empty() {
        info!("No points found in {}", args.input.display());
    }

    let max_points = (args.max_points > 0).then_some(args.max_points);
    let params = DbscanParams::new(args.eps, args.min_points, args.metric)
        .with_max_points(max_points);
    info!(
        "Running DBSCAN on {} points with eps={}, minPoints={}, metric={:?}",
        input.points.len(),
        params.eps,
        params.min_points,
        params.metric
    );

    let clustering = db_scan(&input.points, &params)?;
    info!(
        "Found {} clusters and {} noise points",
        clustering.cluster_count(),
        clustering.noise().len()
    );

    for cluster in clustering.clusters() {
        if let Some((center, min, max)) = cluster.centroid_and_bounds(&input.points) {
            debug!(
                "Cluster {}: {} points, center {:?}, bounds {:?}..{:?}",
                cluster.c,
                cluster.points.len(),
                center.0,
                min.0,
                max.0
            );
        }
    }

    let hulls = clustering.hulls(&input.points);

    write_labeled_points(args.output.as_deref(), &input, &clustering)?;

    match &args.hulls {
        Some(path) => {
            write_hulls(Some(path.as_path()), &hulls)?;
            debug!("Hulls written to {}", path.display());
        }
        None => {
            for hull in &hulls {
                let vertices: Vec<[f64; 2]> = hull.vertices.iter().map(|p| p.0).collect();
                info!("Cluster {} hull: {:?}", hull.c, vertices);
            }
        }
    }

    Ok(())
}

fn delimiter_byte(delimiter: char) -> Result<u8> {
    if delimiter.is_ascii() {
        Ok(delimiter as u8)
    } else {
        Err(dbscan_hull::Error::InvalidParameter {
            name: "delimiter",
            reason: format!("must be a single ASCII character, got {:?}", delimiter),
        })
    }
}

//main.rs
use anyhow::{Context, Result};
use clap::Parser;
use lloyd_kmeans::output::{write_assignments, write_centroids};
use lloyd_kmeans::{DataSet, KMeans, KMeansConfig, KMeansError, DEFAULT_MAX_ITER};
use std::fs::File;
use std::io::{self, BufWriter, IsTerminal, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

/// Cluster comma separated points read from stdin and print the centroids
#[derive(Parser)]
#[clap(version, author = "Stefan L. <stefan.lang@med.lu.se>")]
struct Opts {
    /// Number of clusters (greater than 1, less than the number of points)
    k: usize,

    /// Maximum number of iterations (2 to 999)
    #[clap(default_value_t = DEFAULT_MAX_ITER)]
    max_iter: usize,

    /// Read points from this file instead of stdin
    #[clap(short, long)]
    file: Option<PathBuf>,

    /// Also write the cluster index of every point to this file
    #[clap(short, long)]
    assignments: Option<PathBuf>,

    /// Verbosity level (-v, -vv, -vvv)
    #[clap(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let opts = match Opts::try_parse() {
        Ok(opts) => opts,
        Err(e) => {
            // --help and --version land here too; if even this print fails
            // there is no channel left to report on, so only the exit code counts.
            e.print().ok();
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    let filter = match opts.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(io::stderr().is_terminal())
        .with_writer(io::stderr)
        .init();

    match run(&opts) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let message = err
                .downcast_ref::<KMeansError>()
                .map(KMeansError::user_message)
                .unwrap_or("An Error Has Occurred");
            eprintln!("{}", message);
            error!("{:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(opts: &Opts) -> Result<()> {
    let config = KMeansConfig::validated(opts.k, opts.max_iter)?;

    let ds = match &opts.file {
        Some(path) => DataSet::from_path(path)?,
        None => DataSet::from_reader(io::stdin().lock()).context("Failed to read stdin")?,
    };
    info!(
        points = ds.len(),
        dim = ds.dim(),
        skipped = ds.skipped,
        "loaded points"
    );

    config.check_points(ds.len())?;

    let result = KMeans::new(config).fit(&ds.data.view())?;
    info!(
        iterations = result.iterations,
        converged = result.converged,
        "clustering finished"
    );

    if let Some(path) = &opts.assignments {
        let file = File::create(path)
            .with_context(|| format!("Failed to create {:?}", path))?;
        let mut out = BufWriter::new(file);
        write_assignments(&mut out, &result.assignments)?;
        out.flush()?;
    }

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    write_centroids(&mut out, &result.centroids.view())?;
    out.flush()?;

    Ok(())
}

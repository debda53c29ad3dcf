//! Command implementations and argument parsing for the barriers CLI.

use std::{
    fs::File,
    io::{self, BufReader, BufWriter, Write},
    path::{Path, PathBuf},
    str::FromStr,
};

use barriers_core::{
    BarrierBuilder, BarrierError, BarrierTree, Landscape, LandscapeError, RecordReader,
    Renumbering,
};
use barriers_providers_moves::{Graph, GraphError};
use clap::{Args, Parser, Subcommand};
use thiserror::Error;
use tracing::{Span, debug, field, info, instrument};

use super::report::render_path;

/// Gas constant in kcal/(mol K).
const GAS_CONSTANT: f64 = 0.001_987_17;
const ZERO_CELSIUS: f64 = 273.15;
const DEFAULT_RNA_TEMPERATURE: f64 = 37.0;

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "barriers",
    about = "Compute barrier trees of discrete energy landscapes."
)]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Flood a sorted energy listing and report its basins.
    Run(RunCommand),
}

/// Options accepted by the `run` command.
#[derive(Debug, Args, Clone)]
pub struct RunCommand {
    /// Listing with a reference header followed by `<configuration> <energy>`
    /// lines sorted by energy.
    pub input: PathBuf,

    /// Landscape: `RNA[-noLP]`, `Q2`, `Q<n>[,<alphabet>]`, `P` or `X`.
    #[arg(long, default_value = "RNA")]
    pub graph: String,

    /// Move-set modifier: `noShift` for RNA, `c` for `Q2`, `T`/`C`/`R` for `P`.
    #[arg(long, default_value = "")]
    pub moveset: String,

    /// Barriers below this height mark false minima.
    #[arg(long, default_value_t = 0.0)]
    pub minh: f64,

    /// Report at most this many basins, `0` for all.
    #[arg(long = "max", default_value_t = 0)]
    pub max: usize,

    /// Skip pool sizes and partition sums.
    #[arg(long)]
    pub no_pools: bool,

    /// Write the saddle log to this file.
    #[arg(long)]
    pub saddle_file: Option<PathBuf>,

    /// Temperature in degrees Celsius for RNA, otherwise kT directly.
    #[arg(long)]
    pub temperature: Option<f64>,

    /// Reconstruct the path between two reported basins, e.g. `1=3`.
    #[arg(long = "path", value_name = "A=B")]
    pub paths: Vec<BasinPair>,

    /// Directory receiving `path.AAA.BBB.txt` files.
    #[arg(long, default_value = ".")]
    pub path_dir: PathBuf,

    /// Omit the saddle structure column from the report.
    #[arg(long)]
    pub no_saddles: bool,
}

/// Two renumbered basins whose connecting path is requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BasinPair {
    /// Basin the path leaves.
    pub from: usize,
    /// Basin the path reaches.
    pub to: usize,
}

impl BasinPair {
    /// File name of the path between the two basins.
    ///
    /// # Examples
    /// ```
    /// use barriers_cli::cli::BasinPair;
    ///
    /// let pair: BasinPair = "1=12".parse()?;
    /// assert_eq!(pair.file_name(), "path.001.012.txt");
    /// # Ok::<(), String>(())
    /// ```
    #[must_use]
    pub fn file_name(&self) -> String {
        format!("path.{:03}.{:03}.txt", self.from, self.to)
    }
}

impl FromStr for BasinPair {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let (from, to) = raw
            .split_once('=')
            .ok_or_else(|| format!("`{raw}` is not of the form A=B"))?;
        let basin = |text: &str| match text.trim().parse::<usize>() {
            Ok(0) | Err(_) => Err(format!("`{text}` is not a basin number")),
            Ok(id) => Ok(id),
        };
        Ok(Self {
            from: basin(from)?,
            to: basin(to)?,
        })
    }
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Opening or creating a file failed.
    #[error("failed to access `{path}`: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// Writing report output failed.
    #[error("failed to write output: {source}")]
    Write {
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// The graph or move set could not be selected.
    #[error(transparent)]
    Graph(#[from] GraphError),
    /// A stored structure could not be restored for output.
    #[error(transparent)]
    Landscape(#[from] LandscapeError),
    /// The analysis itself failed.
    #[error(transparent)]
    Core(#[from] BarrierError),
}

/// Outcome of a `run` command.
#[derive(Debug)]
pub struct ExecutionSummary {
    /// Landscape the listing was flooded through.
    pub landscape: Graph,
    /// Reference configuration from the listing header.
    pub reference: String,
    /// Finished barrier tree.
    pub tree: BarrierTree,
    /// Reported basins.
    pub renumbering: Renumbering,
    /// Whether the report lists saddle structures.
    pub print_saddles: bool,
    /// Whether the report lists pools and free energies.
    pub pool_accounting: bool,
    /// Path files written, in request order.
    pub path_files: Vec<PathBuf>,
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when reading the listing, selecting the landscape,
/// flooding or writing outputs fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use barriers_cli::cli::{Cli, Command, RunCommand, run_cli};
/// # use tempfile::NamedTempFile;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let file = NamedTempFile::new()?;
/// std::fs::write(file.path(), "++\n++ 0.0\n-- 0.5\n+- 1.0\n-+ 2.0\n")?;
/// let cli = Cli {
///     command: Command::Run(RunCommand {
///         input: file.path().to_path_buf(),
///         graph: "Q2".into(),
///         moveset: String::new(),
///         minh: 0.0,
///         max: 0,
///         no_pools: false,
///         saddle_file: None,
///         temperature: None,
///         paths: Vec::new(),
///         path_dir: ".".into(),
///         no_saddles: false,
///     }),
/// };
/// let summary = run_cli(cli)?;
/// assert_eq!(summary.renumbering.len(), 2);
/// # Ok(())
/// # }
/// ```
#[instrument(name = "cli.run", err, skip(cli), fields(command = field::Empty))]
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    match cli.command {
        Command::Run(run) => {
            Span::current().record("command", field::display("run"));
            run_command(run)
        }
    }
}

#[instrument(
    name = "cli.execute",
    err,
    skip(command),
    fields(input = field::Empty, graph = field::Empty, moveset = field::Empty),
)]
pub(super) fn run_command(command: RunCommand) -> Result<ExecutionSummary, CliError> {
    let span = Span::current();
    span.record("input", field::display(command.input.display()));
    span.record("graph", field::display(&command.graph));
    span.record("moveset", field::display(&command.moveset));

    let reader = RecordReader::new(open_input(&command.input)?)?;
    let reference = reader.reference().to_owned();
    let landscape = Graph::parse(&command.graph, &command.moveset, &reference)?;
    let kt = thermal_energy(landscape.is_rna(), command.temperature);
    info!(landscape = %landscape, length = reader.length(), kt, "selected landscape");

    let pool_accounting = !command.no_pools;
    let barriers = BarrierBuilder::new()
        .with_minh(command.minh)
        .with_max_print(command.max)
        .with_pool_accounting(pool_accounting)
        .with_kt(kt)
        .build()?;
    let tree = match &command.saddle_file {
        Some(path) => {
            let file = File::create(path).map_err(|source| CliError::Io {
                path: path.clone(),
                source,
            })?;
            barriers.run_with_saddle_log(&landscape, reader, &mut BufWriter::new(file))?
        }
        None => barriers.run(&landscape, reader)?,
    };

    let renumbering = tree.renumber();
    let mut summary = ExecutionSummary {
        landscape,
        reference,
        tree,
        renumbering,
        print_saddles: !command.no_saddles,
        pool_accounting,
        path_files: Vec::new(),
    };
    summary.path_files = write_paths(&summary, &command.paths, &command.path_dir)?;

    let totals = summary.tree.summary();
    info!(
        records = totals.records,
        saddles = totals.saddles,
        structures = totals.structures,
        reported = summary.renumbering.len(),
        "command completed"
    );
    Ok(summary)
}

#[instrument(name = "cli.open_input", err, fields(path = field::Empty))]
pub(super) fn open_input(path: &Path) -> Result<BufReader<File>, CliError> {
    Span::current().record("path", field::display(path.display()));
    let file = File::open(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(BufReader::new(file))
}

#[instrument(
    name = "cli.write_paths",
    err,
    skip(summary, pairs),
    fields(paths = pairs.len(), dir = %dir.display()),
)]
fn write_paths(
    summary: &ExecutionSummary,
    pairs: &[BasinPair],
    dir: &Path,
) -> Result<Vec<PathBuf>, CliError> {
    pairs
        .iter()
        .map(|pair| {
            let steps = summary
                .tree
                .reconstruct_path(pair.from, pair.to, &summary.renumbering)?;
            let path = dir.join(pair.file_name());
            let io_error = |source| CliError::Io {
                path: path.clone(),
                source,
            };
            let mut writer = BufWriter::new(File::create(&path).map_err(io_error)?);
            render_path(summary, &steps, &mut writer)?;
            writer.flush().map_err(io_error)?;
            debug!(path = %path.display(), steps = steps.len(), "wrote path");
            Ok(path)
        })
        .collect()
}

/// Thermal energy for the Boltzmann weights.
///
/// RNA energies are kcal/mol, so the temperature is read in degrees Celsius
/// (37 by default); other landscapes take the temperature as kT directly.
pub(super) fn thermal_energy(is_rna: bool, temperature: Option<f64>) -> f64 {
    if is_rna {
        GAS_CONSTANT * (ZERO_CELSIUS + temperature.unwrap_or(DEFAULT_RNA_TEMPERATURE))
    } else {
        temperature.unwrap_or(1.0)
    }
}

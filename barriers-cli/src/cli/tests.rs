//! Unit tests for the CLI commands and report rendering.

use super::commands::{open_input, run_command, thermal_energy};
use super::{BasinPair, Cli, CliError, Command, RunCommand, render_report, run_cli};

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use barriers_core::BarrierError;
use barriers_providers_moves::GraphError;
use barriers_test_support::recording::RecordingLayer;
use clap::Parser;
use rstest::rstest;
use tempfile::TempDir;
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;

type TestResult = Result<(), Box<dyn std::error::Error>>;

/// Two spins: `++` and `--` are minima joined through `+-`.
const TWO_SPINS: &str = "++\n++ 0.0\n-- 0.5\n+- 1.0\n-+ 2.0\n";

#[test]
fn arguments_parse_into_a_run_command() -> TestResult {
    let cli = Cli::try_parse_from([
        "barriers",
        "run",
        "listing.txt",
        "--graph",
        "Q2",
        "--minh",
        "0.5",
        "--max",
        "10",
        "--path",
        "1=2",
        "--path",
        "3=1",
        "--no-pools",
    ])?;
    let Command::Run(run) = cli.command;
    assert_eq!(run.input, PathBuf::from("listing.txt"));
    assert_eq!(run.graph, "Q2");
    assert_eq!(run.moveset, "");
    assert_eq!(run.minh, 0.5);
    assert_eq!(run.max, 10);
    assert!(run.no_pools);
    assert!(!run.no_saddles);
    assert_eq!(
        run.paths,
        [BasinPair { from: 1, to: 2 }, BasinPair { from: 3, to: 1 }]
    );
    assert_eq!(run.path_dir, PathBuf::from("."));
    Ok(())
}

#[rstest]
#[case("1-2")]
#[case("0=2")]
#[case("a=b")]
#[case("=3")]
fn malformed_path_pairs_are_rejected(#[case] raw: &str) {
    assert!(raw.parse::<BasinPair>().is_err());
    assert!(Cli::try_parse_from(["barriers", "run", "listing.txt", "--path", raw]).is_err());
}

#[rstest]
#[case(true, None, 0.001_987_17 * 310.15)]
#[case(true, Some(0.0), 0.001_987_17 * 273.15)]
#[case(false, None, 1.0)]
#[case(false, Some(2.5), 2.5)]
fn thermal_energy_follows_the_landscape(
    #[case] is_rna: bool,
    #[case] temperature: Option<f64>,
    #[case] expected: f64,
) {
    assert!((thermal_energy(is_rna, temperature) - expected).abs() < 1e-12);
}

#[test]
fn report_lists_basins_fathers_and_saddles() -> TestResult {
    let dir = temp_dir();
    let input = create_text_file(&dir, "spins.txt", TWO_SPINS)?;
    let mut command = run_args(input, "Q2");
    command.no_pools = true;
    let summary = run_command(command)?;

    let mut buffer = Vec::new();
    render_report(&summary, &mut buffer)?;
    assert_eq!(
        String::from_utf8(buffer)?,
        concat!(
            "     ++\n",
            "   1 ++       0.00000    0       2.00000 ~~\n",
            "   2 --       0.50000    1       0.50000 +-\n",
        )
    );
    Ok(())
}

#[test]
fn pool_columns_follow_the_saddle() -> TestResult {
    let dir = temp_dir();
    let input = create_text_file(&dir, "spins.txt", TWO_SPINS)?;
    let mut command = run_args(input, "Q2");
    command.no_saddles = true;
    let summary = run_command(command)?;

    let mut buffer = Vec::new();
    render_report(&summary, &mut buffer)?;
    let report = String::from_utf8(buffer)?;
    let second: Vec<&str> = report
        .lines()
        .nth(2)
        .ok_or("second basin missing")?
        .split_whitespace()
        .collect();
    assert_eq!(second.len(), 10);
    assert_eq!(&second[..7], ["2", "--", "0.50000", "1", "0.50000", "1", "1"]);
    assert_eq!(second[7], "0.500");
    assert_eq!(second[8], "1");
    Ok(())
}

#[test]
fn saddle_file_receives_the_merge_log() -> TestResult {
    let dir = temp_dir();
    let input = create_text_file(&dir, "spins.txt", TWO_SPINS)?;
    let saddles = dir.path().join("saddles.txt");
    let mut command = run_args(input, "Q2");
    command.saddle_file = Some(saddles.clone());
    run_command(command)?;

    assert_eq!(fs::read_to_string(saddles)?, "      1.00000    1 +-  1  2\n");
    Ok(())
}

#[test]
fn requested_paths_are_written_per_pair() -> TestResult {
    let dir = temp_dir();
    let input = create_text_file(&dir, "spins.txt", TWO_SPINS)?;
    let mut command = run_args(input, "Q2");
    command.paths = vec![BasinPair { from: 1, to: 2 }];
    command.path_dir = dir.path().to_path_buf();
    let summary = run_command(command)?;

    let expected = dir.path().join("path.001.002.txt");
    assert_eq!(summary.path_files, [expected.clone()]);
    assert_eq!(
        fs::read_to_string(expected)?,
        "-- (  0.50) L0002\n+- (  1.00) S    \n++ (  0.00) L0001\n"
    );
    Ok(())
}

#[test]
fn rna_listings_use_rna_formatting() -> TestResult {
    let dir = temp_dir();
    let listing = "GGGAAACCC\n(((...))) -1.20\n.((...)). -0.40\n";
    let input = create_text_file(&dir, "hairpin.txt", listing)?;
    let mut command = run_args(input, "RNA");
    command.no_pools = true;
    let summary = run_command(command)?;

    let mut buffer = Vec::new();
    render_report(&summary, &mut buffer)?;
    assert_eq!(
        String::from_utf8(buffer)?,
        "     GGGAAACCC\n   1 (((...)))  -1.20    0   0.80 ~~~~~~~~~\n"
    );
    Ok(())
}

#[test]
fn missing_input_reports_the_path() {
    let cli = Cli {
        command: Command::Run(run_args(PathBuf::from("/definitely/missing.txt"), "Q2")),
    };
    let err = run_cli_expecting_error(cli, "missing input must fail");
    match err {
        CliError::Io { path, .. } => assert_eq!(path, Path::new("/definitely/missing.txt")),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn unsupported_graphs_are_rejected() -> TestResult {
    let dir = temp_dir();
    let input = create_text_file(&dir, "trees.txt", "((A,B),C)\n")?;
    let err = run_command_expecting_error(run_args(input, "T"), "trees are unsupported");
    assert!(matches!(
        err,
        CliError::Graph(GraphError::UnsupportedGraph { .. })
    ));
    Ok(())
}

#[test]
fn unsorted_listings_fail_in_the_core() -> TestResult {
    let dir = temp_dir();
    let input = create_text_file(&dir, "spins.txt", "++\n++ 1.0\n-- 0.5\n")?;
    let err = run_command_expecting_error(run_args(input, "Q2"), "unsorted input must fail");
    assert!(matches!(
        err,
        CliError::Core(BarrierError::InputOrderViolation { .. })
    ));
    Ok(())
}

#[test]
fn paths_to_unreported_basins_fail() -> TestResult {
    let dir = temp_dir();
    let input = create_text_file(&dir, "spins.txt", TWO_SPINS)?;
    let mut command = run_args(input, "Q2");
    command.paths = vec![BasinPair { from: 1, to: 7 }];
    command.path_dir = dir.path().to_path_buf();
    let err = run_command_expecting_error(command, "basin 7 is not reported");
    assert!(matches!(
        err,
        CliError::Core(BarrierError::UnknownBasin { basin: 7, bound: 2 })
    ));
    Ok(())
}

#[test]
fn spans_record_the_selected_landscape() -> TestResult {
    let dir = temp_dir();
    let input = create_text_file(&dir, "spins.txt", TWO_SPINS)?;
    let layer = RecordingLayer::default();
    let subscriber = tracing_subscriber::registry().with(layer.clone());
    let cli = Cli {
        command: Command::Run(run_args(input, "Q2")),
    };
    tracing::subscriber::with_default(subscriber, || run_cli(cli))?;

    let execute = layer.span("cli.execute").ok_or("execute span missing")?;
    assert_eq!(execute.field("graph"), Some("Q2"));
    let open = layer.span("cli.open_input").ok_or("open span missing")?;
    assert!(open.field("path").is_some_and(|path| path.ends_with("spins.txt")));
    assert_eq!(
        layer.span("cli.run").and_then(|span| span.field("command").map(str::to_owned)),
        Some("run".to_owned())
    );

    let selected = layer.events_with_message("selected landscape");
    assert_eq!(selected.len(), 1);
    assert_eq!(selected[0].field("landscape"), Some("Q2"));
    let completed = layer.events_with_message("command completed");
    assert_eq!(completed.len(), 1);
    assert_eq!(completed[0].level, Level::INFO);
    assert_eq!(completed[0].field("reported"), Some("2"));
    Ok(())
}

#[test]
fn open_input_failure_is_recorded_on_its_span() {
    let layer = RecordingLayer::default();
    let subscriber = tracing_subscriber::registry().with(layer.clone());
    let result = tracing::subscriber::with_default(subscriber, || {
        open_input(Path::new("/definitely/missing.txt"))
    });

    assert!(matches!(result, Err(CliError::Io { .. })));
    let errors: Vec<_> = layer
        .events()
        .into_iter()
        .filter(|event| event.level == Level::ERROR)
        .collect();
    assert_eq!(errors.len(), 1);
}

fn run_args(input: PathBuf, graph: &str) -> RunCommand {
    RunCommand {
        input,
        graph: graph.to_owned(),
        moveset: String::new(),
        minh: 0.0,
        max: 0,
        no_pools: false,
        saddle_file: None,
        temperature: None,
        paths: Vec::new(),
        path_dir: PathBuf::from("."),
        no_saddles: false,
    }
}

fn temp_dir() -> TempDir {
    match TempDir::new() {
        Ok(dir) => dir,
        Err(err) => panic!("failed to create temp dir: {err}"),
    }
}

fn create_text_file(dir: &TempDir, name: &str, contents: &str) -> io::Result<PathBuf> {
    let path = dir.path().join(name);
    let mut file = File::create(&path)?;
    file.write_all(contents.as_bytes())?;
    Ok(path)
}

/// Runs the CLI and expects an error, panicking with `panic_msg` otherwise.
fn run_cli_expecting_error(cli: Cli, panic_msg: &str) -> CliError {
    match run_cli(cli) {
        Ok(_) => panic!("{panic_msg}"),
        Err(err) => err,
    }
}

/// Runs a command and expects an error, panicking with `panic_msg` otherwise.
fn run_command_expecting_error(cmd: RunCommand, panic_msg: &str) -> CliError {
    match run_command(cmd) {
        Ok(_) => panic!("{panic_msg}"),
        Err(err) => err,
    }
}

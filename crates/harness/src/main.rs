use annotest_engine::{AnalysisScope, CommandEngine};
use annotest_harness::{Harness, HarnessConfig, Reporter, SystemCopy, SystemDiff};
use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "annotest")]
#[command(about = "Annotation-driven golden tests for code analysis engines", long_about = None)]
#[command(version)]
struct Cli {
    /// Fixture source files containing @verb id "pattern" annotations
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Overwrite mismatching golden files with freshly captured output
    #[arg(long)]
    update: bool,

    /// External analysis engine binary, invoked once per query
    #[arg(long)]
    engine: PathBuf,

    /// Fixed argument passed to the engine before the verb (repeatable)
    #[arg(long = "engine-arg")]
    engine_args: Vec<String>,

    /// Root directory the engine resolves imports and dependencies against
    #[arg(long, default_value = "testdata")]
    root: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    let engine = CommandEngine::new(&cli.engine).args(cli.engine_args.clone());
    let diff = SystemDiff::default();
    let copy = SystemCopy::default();
    let config = HarnessConfig {
        update: cli.update,
        scope: AnalysisScope::new(&cli.root),
    };

    let harness = Harness::new(&engine, &diff, &copy, config);
    let mut reporter = Reporter::new();
    harness.run(&cli.files, &mut reporter);

    for failure in reporter.failures() {
        eprintln!("FAIL {failure}");
    }
    if reporter.has_failures() {
        eprintln!("FAIL: {}", reporter.summary());
        Ok(ExitCode::FAILURE)
    } else {
        println!("ok: {} file(s)", cli.files.len());
        Ok(ExitCode::SUCCESS)
    }
}

//! ><> command-line interpreter.
//!
//! Usage:
//!   fish <file.fish>       Run a file
//!   fish -e <code>         Run a string
//!   fish --project <dir>   Run a fish.toml project
//!   fish                   Read from stdin
//!
//! `-v N` may be repeated: `fish -v 3 -v 4 prog.fish`.

use std::{
    fs,
    io::{self, Read, Write},
    path::PathBuf,
    process::ExitCode,
};

use clap::{ArgAction, Parser};
use fish::{RunOutcome, Session, SessionConfig, SessionError, render_output};
use fish_project::{LoadError, Project, strip_trailing_newline};
use log::debug;
use thiserror::Error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "fish")]
#[command(about = "Run ><> programs")]
struct Cli {
    /// Source file to run (`-` or nothing reads stdin)
    file: Option<PathBuf>,

    /// Run CODE instead of a file
    #[arg(short = 'e', long = "eval", value_name = "CODE", conflicts_with_all = ["file", "project"])]
    eval: Option<String>,

    /// Run the project in DIR described by its fish.toml
    #[arg(long, value_name = "DIR", conflicts_with = "file")]
    project: Option<PathBuf>,

    /// Push a number onto the initial stack (repeatable)
    #[arg(short = 'v', long = "value", value_name = "N", action = ArgAction::Append, allow_negative_numbers = true)]
    values: Vec<f64>,

    /// Push the code points of TEXT onto the initial stack
    #[arg(short = 's', long = "string", value_name = "TEXT")]
    string: Option<String>,

    /// Text queued as input for `i`
    #[arg(short = 'i', long, value_name = "TEXT")]
    input: Option<String>,

    /// Stop after N steps (0 = no limit)
    #[arg(long, value_name = "N")]
    max_steps: Option<u64>,

    /// Seed for the random direction of `x`
    #[arg(long, value_name = "N")]
    seed: Option<u64>,

    /// Log every executed instruction
    #[arg(long)]
    trace: bool,
}

#[derive(Debug, Error)]
enum CliError {
    #[error("error reading {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("error reading stdin: {0}")]
    Stdin(#[source] io::Error),

    #[error(transparent)]
    Project(#[from] LoadError),

    #[error(transparent)]
    Session(#[from] SessionError),
}

/// Source plus the settings it came with.
struct Job {
    source: String,
    initial_stack: Vec<f64>,
    input: String,
    max_steps: Option<u64>,
    seed: Option<u64>,
}

impl Job {
    fn plain(source: String) -> Self {
        Self {
            source,
            initial_stack: Vec::new(),
            input: String::new(),
            max_steps: None,
            seed: None,
        }
    }
}

fn read_stdin() -> Result<String, CliError> {
    let mut buf = String::new();
    io::stdin()
        .read_to_string(&mut buf)
        .map_err(CliError::Stdin)?;
    Ok(strip_trailing_newline(&buf).to_string())
}

fn load(cli: &Cli) -> Result<Job, CliError> {
    let mut job = if let Some(code) = &cli.eval {
        Job::plain(code.clone())
    } else if let Some(dir) = &cli.project {
        let project = Project::load(dir)?;
        let source = project.source;
        Job {
            source: source.source,
            initial_stack: source.initial_stack,
            input: source.input,
            max_steps: source.max_steps,
            seed: source.seed,
        }
    } else {
        match &cli.file {
            Some(path) if path.as_os_str() != "-" => {
                let text = fs::read_to_string(path).map_err(|e| CliError::Read {
                    path: path.clone(),
                    source: e,
                })?;
                Job::plain(strip_trailing_newline(&text).to_string())
            }
            _ => Job::plain(read_stdin()?),
        }
    };

    job.initial_stack.extend_from_slice(&cli.values);
    if let Some(text) = &cli.string {
        job.initial_stack
            .extend(text.chars().map(|c| u32::from(c) as f64));
    }
    if let Some(input) = &cli.input {
        job.input = input.clone();
    }
    if cli.max_steps.is_some() {
        job.max_steps = cli.max_steps;
    }
    if cli.seed.is_some() {
        job.seed = cli.seed;
    }
    Ok(job)
}

fn run(cli: &Cli) -> Result<ExitCode, CliError> {
    let job = load(cli)?;
    let config = SessionConfig {
        max_steps: match job.max_steps {
            Some(0) => None,
            Some(n) => Some(n),
            None => SessionConfig::default().max_steps,
        },
        seed: job.seed,
    };
    debug!("running with {config:?}");

    let mut session = Session::new(&job.source, &job.initial_stack, config).with_input(&job.input);
    let outcome = session.run(None)?;

    let mut stdout = io::stdout().lock();
    let _ = stdout.write_all(render_output(outcome.output()).as_bytes());
    let _ = stdout.flush();

    match outcome {
        RunOutcome::Completed { .. } => Ok(ExitCode::SUCCESS),
        RunOutcome::Failed { error, steps, .. } => {
            eprintln!("error: {error} (after {steps} steps)");
            Ok(ExitCode::FAILURE)
        }
        RunOutcome::StepLimit { steps, .. } => {
            eprintln!("step limit reached after {steps} steps");
            Ok(ExitCode::FAILURE)
        }
        RunOutcome::Debug { .. } => Ok(ExitCode::SUCCESS),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_filter = if cli.trace {
        "fish=trace,fish_vm=trace"
    } else {
        "fish=warn,fish_vm=warn"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

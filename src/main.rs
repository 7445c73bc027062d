use std::{
    collections::HashSet,
    io::{self, BufWriter},
    process::ExitCode,
    time::Instant,
};

use anyhow::Context;
use clap::{Parser, ValueEnum};
use colored::Colorize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use dementia::{
    Command, EofPolicy, IrBuilder, IrInterpreter, Lexer, Optimizations, Runtime, RuntimeConfig,
    TokenInterpreter, TokenStream, DEFAULT_TAPE_SIZE,
};

/// Optimizing interpreter for the eight-command tape language
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// The file to operate on
    #[arg()]
    file: String,

    /// What to do with the program, runs it through the IR interpreter by default.
    /// Both interpreters can only run together when the program never reads input
    #[arg(value_enum)]
    commands: Vec<Commands>,

    /// Only apply these optimizations
    #[arg(short, long, value_enum)]
    optimizations: Vec<Optimization>,

    /// Apply every optimization, including the ones off by default
    #[arg(short, long)]
    all_optimizations: bool,

    /// Build the IR one instruction per command
    #[arg(short, long, conflicts_with_all = ["optimizations", "all_optimizations"])]
    no_optimizations: bool,

    /// Number of cells on the tape
    #[arg(short, long, default_value_t = DEFAULT_TAPE_SIZE)]
    tape_size: usize,

    /// What `,` stores once the input runs out
    #[arg(short, long, value_enum, default_value_t = EofPolicy::Zero)]
    eof: EofPolicy,

    /// Print each stage and how long it took to stderr
    #[arg(short, long)]
    verbose: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, Hash, PartialEq, Eq)]
enum Optimization {
    /// Fold runs of `+-` and `<>`
    RunFolding,
    /// Turn `[-]` into a single store
    ClearLoops,
    /// Turn `[->+<]` style loops into a single transfer
    TransferLoops,
    /// Drop loops at the very start of the program
    CommentBlock,
}

impl Optimization {
    fn flag(self) -> Optimizations {
        match self {
            Optimization::RunFolding => Optimizations::RUN_FOLDING,
            Optimization::ClearLoops => Optimizations::CLEAR_LOOPS,
            Optimization::TransferLoops => Optimizations::TRANSFER_LOOPS,
            Optimization::CommentBlock => Optimizations::COMMENT_BLOCK,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Hash, PartialEq, Eq)]
enum Commands {
    /// Output the validated tokens
    Tokens,
    /// Output the (optimized) IR
    Ir,

    /// Run the tokens as is
    TokenInterpreter,
    /// Run the IR interpreter
    IrInterpreter,
}

impl Args {
    fn selected_optimizations(&self) -> Optimizations {
        if self.no_optimizations {
            Optimizations::empty()
        } else if self.all_optimizations {
            Optimizations::all()
        } else if self.optimizations.is_empty() {
            Optimizations::default()
        } else {
            self.optimizations
                .iter()
                .fold(Optimizations::empty(), |acc, o| acc | o.flag())
        }
    }
}

/// Stage banners go to stderr so they never mix with the program's output
struct Stages {
    verbose: bool,
}

impl Stages {
    fn start(&self, name: &str) -> Instant {
        if self.verbose {
            eprintln!("{} {}", "Starting".blue(), name.blue());
        }
        Instant::now()
    }

    fn finish(&self, name: &str, started: Instant) {
        if self.verbose {
            eprintln!(
                "{} {} {} {:.2?}",
                "Finished".green(),
                name.green(),
                "in".green(),
                started.elapsed()
            );
        }
    }
}

/// Both interpreters would read from the same stdin, the second one only
/// seeing what the first left behind
fn shares_stdin(commands: &HashSet<Commands>, stream: &TokenStream) -> bool {
    commands.contains(&Commands::TokenInterpreter)
        && commands.contains(&Commands::IrInterpreter)
        && stream
            .tokens()
            .iter()
            .any(|token| token.command == Command::Input)
}

fn init_logging() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(io::stderr),
        )
        .init();
}

fn run(args: Args) -> anyhow::Result<()> {
    let mut commands: HashSet<Commands> = HashSet::from_iter(args.commands.iter().cloned());
    if commands.is_empty() {
        commands.insert(Commands::IrInterpreter);
    }
    let optimizations = args.selected_optimizations();
    let config = RuntimeConfig {
        tape_size: args.tape_size,
        eof: args.eof,
    };
    let stages = Stages {
        verbose: args.verbose,
    };

    let text = std::fs::read_to_string(&args.file)
        .with_context(|| format!("failed to read {}", args.file))?;

    let now = stages.start("lexing");
    let stream = Lexer::new(&text)
        .tokenize()
        .with_context(|| format!("{} is not a valid program", args.file))?;
    stages.finish("lexing", now);

    if shares_stdin(&commands, &stream) {
        anyhow::bail!(
            "{} reads input, run token-interpreter and ir-interpreter separately",
            args.file
        );
    }

    if commands.contains(&Commands::Tokens) {
        println!("{}", stream);
    }

    let stdin = io::stdin();
    let stdout = io::stdout();

    if commands.contains(&Commands::TokenInterpreter) {
        let now = stages.start("token-interpreter");
        let mut runtime = Runtime::new(config, stdin.lock(), BufWriter::new(stdout.lock()));
        let result = TokenInterpreter::new().run(&mut runtime, &stream);
        runtime.flush()?;
        result.context("token-interpreter failed")?;
        stages.finish("token-interpreter", now);
    }

    let now = stages.start("IR building");
    let program = IrBuilder::new(&stream, optimizations).build_program();
    stages.finish("IR building", now);
    if args.verbose {
        eprintln!(
            "{} {:?}, {} instructions",
            "Optimizations".blue(),
            optimizations,
            program.instruction_count()
        );
    }

    if commands.contains(&Commands::Ir) {
        print!("{}", program);
    }

    if commands.contains(&Commands::IrInterpreter) {
        let now = stages.start("ir-interpreter");
        let mut runtime = Runtime::new(config, stdin.lock(), BufWriter::new(stdout.lock()));
        let result = IrInterpreter::new().interpret(&mut runtime, &program);
        runtime.flush()?;
        result.context("ir-interpreter failed")?;
        stages.finish("ir-interpreter", now);
    }

    Ok(())
}

fn main() -> ExitCode {
    init_logging();
    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{0:}: {1:#}", "Error".red(), e);
            ExitCode::FAILURE
        }
    }
}

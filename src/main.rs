use std::fs::File;
use std::io::{self, BufRead, BufReader, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser as ClapParser, Subcommand};
use env_logger::Builder;
use log::{debug, info};

use sprig_interpreter as sprig;

use sprig::ast::Stmt;
use sprig::ast_printer::AstPrinter;
use sprig::error::SprigError;
use sprig::interpreter::{Interpreter, InterpreterConfig, DEFAULT_MAX_CALL_DEPTH};
use sprig::scanner::Scanner;
use sprig::token::Token;

/// Exit code for malformed input (lex or parse error).
const EXIT_DATA_ERR: i32 = 65;

/// Exit code for a failed run.
const EXIT_SOFTWARE: i32 = 70;

#[derive(ClapParser, Debug)]
#[command(version, about = "Sprig language interpreter", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    commands: Commands,

    /// Enable logging to app.log
    #[arg(long, global = true)]
    log: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Tokenizes input from a file, printing each token
    Tokenize {
        filename: PathBuf,

        /// Print the tokens as a JSON array
        #[arg(long)]
        json: bool,
    },

    /// Parses input from a file and prints its AST
    Parse { filename: PathBuf },

    /// Runs input from a file as a Sprig program
    Run {
        filename: PathBuf,

        #[command(flatten)]
        limits: Limits,
    },

    /// Starts an interactive session
    Repl {
        #[command(flatten)]
        limits: Limits,
    },
}

#[derive(Args, Debug, Clone, Copy)]
struct Limits {
    /// Abort after this many executed statements
    #[arg(long)]
    max_steps: Option<u64>,

    /// Maximum nesting of function calls
    #[arg(long, default_value_t = DEFAULT_MAX_CALL_DEPTH)]
    max_depth: usize,
}

impl From<Limits> for InterpreterConfig {
    fn from(limits: Limits) -> Self {
        InterpreterConfig {
            step_limit: limits.max_steps,
            max_call_depth: limits.max_depth,
        }
    }
}

/// Reads the contents of a file into a String
fn read_file(filename: &Path) -> Result<String> {
    info!("Reading file: {:?}", filename);
    let file = File::open(filename).context(format!("Failed to open file {:?}", filename))?;
    let mut reader = BufReader::new(file);
    let mut buf = String::new();

    let bytes = reader
        .read_to_string(&mut buf)
        .context(format!("Failed to read file {:?} as UTF-8", filename))?;

    info!("Read {} bytes from {:?}", bytes, filename);

    Ok(buf)
}

fn init_logger() -> Result<()> {
    // Create or open the log file
    let log_file = File::create("app.log").context("Failed to create app.log")?;

    Builder::new()
        .format(|buf, record| {
            let module = record
                .module_path()
                .unwrap_or("<unnamed>")
                .strip_prefix("sprig_interpreter::")
                .unwrap_or(record.module_path().unwrap_or("<unnamed>"));
            writeln!(
                buf,
                "{} [{}:{}] {} - {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                module,
                record.line().unwrap_or(0),
                record.level(),
                record.args()
            )
        })
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .filter(None, log::LevelFilter::Debug) // Default to Debug, override with RUST_LOG
        .parse_default_env()
        .init();

    info!("Logger initialized, writing to app.log");
    Ok(())
}

/// Map a language error to its process exit code.
fn exit_code(error: &SprigError) -> i32 {
    if error.is_lex() || error.is_parse() {
        EXIT_DATA_ERR
    } else {
        EXIT_SOFTWARE
    }
}

fn fail(error: &SprigError) -> ! {
    debug!("Exiting on error: {}", error);
    eprintln!("{}", error);
    std::process::exit(exit_code(error));
}

fn tokenize(filename: &Path, json: bool) -> Result<()> {
    let source = read_file(filename)?;
    let mut tokens: Vec<Token<'_>> = Vec::new();
    let mut failure: Option<SprigError> = None;

    for token in Scanner::new(&source) {
        match token {
            Ok(token) => {
                if !json {
                    println!("{}", token);
                }
                tokens.push(token);
            }
            Err(e) => failure = Some(e),
        }
    }

    if json {
        let rendered = serde_json::to_string_pretty(&tokens).context("Failed to encode tokens")?;
        println!("{}", rendered);
    }

    if let Some(e) = failure {
        fail(&e);
    }

    info!("Tokenization completed successfully");
    Ok(())
}

fn parse(filename: &Path) -> Result<()> {
    let source = read_file(filename)?;

    match sprig::parse_source(&source) {
        Ok(program) => {
            info!("Program parsed successfully");
            println!("{}", AstPrinter::print_program(&program));
        }
        Err(e) => fail(&e),
    }

    Ok(())
}

fn run(filename: &Path, limits: Limits) -> Result<()> {
    let source = read_file(filename)?;
    info!("Provided input:\n {}", source);

    let program: Vec<Stmt> = match sprig::parse_source(&source) {
        Ok(program) => program,
        Err(e) => fail(&e),
    };

    info!("Parsed {} statements", program.len());

    let mut interpreter = Interpreter::with_config(io::stdout(), limits.into());

    if let Err(e) = interpreter.interpret(&program) {
        fail(&e);
    }

    info!("Program executed successfully");
    Ok(())
}

/// Line-at-a-time session over one persistent global scope. A line ending in
/// `:` opens a block that runs once an empty line is entered.
fn repl(limits: Limits) -> Result<()> {
    let mut interpreter = Interpreter::with_config(io::stdout(), limits.into());
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut entry = String::new();

    loop {
        print!("{}", if entry.is_empty() { "> " } else { "... " });
        io::stdout().flush().context("Failed to flush prompt")?;

        let Some(line) = lines.next() else {
            println!();
            break;
        };
        let line = line.context("Failed to read from stdin")?;

        let continuing = !entry.is_empty();

        if line.trim().is_empty() {
            if !continuing {
                continue;
            }
        } else {
            entry.push_str(&line);
            entry.push('\n');

            if continuing || line.trim_end().ends_with(':') {
                continue;
            }
        }

        debug!("REPL entry:\n{}", entry);

        let result = sprig::parse_source(&entry).and_then(|program| interpreter.interpret(&program));

        if let Err(e) = result {
            eprintln!("{}", e);
        }

        entry.clear();
    }

    info!("REPL session ended");
    Ok(())
}

fn main() -> Result<()> {
    let args: Cli = Cli::parse();

    // Initialize logger only if --log flag is provided
    if args.log {
        init_logger()?;
    } else {
        // Initialize a minimal logger to avoid "no logger" errors
        env_logger::Builder::new()
            .filter_level(log::LevelFilter::Off)
            .init();
    }

    info!("CLI arguments: {:?}", args);

    let outcome: Result<()> = sprig::with_interpreter_stack(|| match &args.commands {
        Commands::Tokenize { filename, json } => tokenize(filename, *json),
        Commands::Parse { filename } => parse(filename),
        Commands::Run { filename, limits } => run(filename, *limits),
        Commands::Repl { limits } => repl(*limits),
    })
    .context("Failed to start the interpreter thread")?;

    outcome
}

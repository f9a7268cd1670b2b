use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use clap::error::ErrorKind;
use colored::Colorize;
use thiserror::Error;

use jamc::backends::BackendType;
use jamc::error::{CompileError, EmitError};
use jamc::format;
use jamc::parser::{lexer, parser as syntax};

#[derive(Parser, Debug)]
#[command(name = "jamc")]
#[command(about = "Parses Jam source files into a syntax tree", version)]
struct Cli {
    /// Source file
    #[arg(required_unless_present = "list_formats")]
    input: Option<PathBuf>,

    /// Print the token table before parsing
    #[arg(long)]
    tokens: bool,

    /// Also print the serialized tree to stdout
    #[arg(long)]
    print: bool,

    /// Output format
    #[arg(short, long, default_value = "json")]
    format: String,

    /// Output file (default: ast.json / ast.txt in the working directory)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// List supported output formats
    #[arg(long)]
    list_formats: bool,
}

#[derive(Error, Debug)]
enum DriverError {
    #[error("{0}")]
    Usage(String),

    #[error("input file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("cannot read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error(transparent)]
    Compile(#[from] CompileError),

    #[error(transparent)]
    Emit(#[from] EmitError),

    #[error("cannot write {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },
}

impl DriverError {
    fn exit_code(&self) -> u8 {
        match self {
            DriverError::Usage(_) => 64,
            DriverError::NotFound { .. } => 65,
            DriverError::Read { .. } => 66,
            DriverError::Compile(_) => 1,
            DriverError::Emit(_) => 70,
            DriverError::Write { .. } => 74,
        }
    }

    fn message(&self) -> String {
        match self {
            DriverError::Compile(err) => escape_message(&err.to_string()),
            other => other.to_string(),
        }
    }
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // --help / --version land here too
            if let Err(io_err) = err.print() {
                eprintln!("{} {io_err}", "error:".red().bold());
                return ExitCode::from(74);
            }
            return ExitCode::from(usage_exit_code(err.kind()));
        }
    };

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {}", "error:".red().bold(), err.message());
            ExitCode::from(err.exit_code())
        }
    }
}

fn run(cli: Cli) -> Result<(), DriverError> {
    if cli.list_formats {
        println!("Supported formats:");
        for backend in BackendType::all() {
            println!("  {:6} - {}", backend.name(), backend.description());
        }
        return Ok(());
    }

    let backend_type = BackendType::from_name(&cli.format)
        .ok_or_else(|| DriverError::Usage(format!("unknown format '{}'", cli.format)))?;
    let input = cli
        .input
        .ok_or_else(|| DriverError::Usage("missing input file".to_string()))?;

    let source = read_source(&input)?;
    println!("{} {}", "Parsing".green().bold(), input.display());

    let tokens = lexer::tokenize(&source)?;
    if cli.tokens {
        println!("{}", format::format_tokens(&tokens));
    }

    let program = syntax::parse_tokens(lexer::without_newlines(&tokens))?;
    let rendered = backend_type.create().emit(&program)?;

    if cli.print {
        println!("{}", rendered);
    }

    let output = cli
        .output
        .unwrap_or_else(|| PathBuf::from(backend_type.default_output()));
    fs::write(&output, &rendered).map_err(|source| DriverError::Write {
        path: output.clone(),
        source,
    })?;

    println!(
        "{} {} ({} top-level items)",
        "Wrote".green().bold(),
        output.display(),
        program.items.len()
    );
    Ok(())
}

fn read_source(path: &Path) -> Result<String, DriverError> {
    fs::read_to_string(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => DriverError::NotFound {
            path: path.to_path_buf(),
        },
        _ => DriverError::Read {
            path: path.to_path_buf(),
            source,
        },
    })
}

fn usage_exit_code(kind: ErrorKind) -> u8 {
    match kind {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
        _ => 64,
    }
}

/// Makes a message safe for single-line display.
fn escape_message(message: &str) -> String {
    let mut out = String::with_capacity(message.len());
    for ch in message.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_control_characters() {
        assert_eq!(escape_message("a\\b\nc\rd\te"), "a\\\\b\\nc\\rd\\te");
        assert_eq!(escape_message("plain"), "plain");
    }

    #[test]
    fn wrong_argument_count_is_usage_error() {
        let err = Cli::try_parse_from(["jamc"]).unwrap_err();
        assert_eq!(usage_exit_code(err.kind()), 64);

        let err = Cli::try_parse_from(["jamc", "a.jam", "b.jam"]).unwrap_err();
        assert_eq!(usage_exit_code(err.kind()), 64);

        let err = Cli::try_parse_from(["jamc", "--help"]).unwrap_err();
        assert_eq!(usage_exit_code(err.kind()), 0);
    }

    #[test]
    fn list_formats_needs_no_input() {
        let cli = Cli::try_parse_from(["jamc", "--list-formats"]).unwrap();
        assert!(cli.list_formats);
        assert!(cli.input.is_none());
    }

    #[test]
    fn missing_file_maps_to_65() {
        let err = read_source(Path::new("definitely/not/here.jam")).unwrap_err();
        assert!(matches!(err, DriverError::NotFound { .. }));
        assert_eq!(err.exit_code(), 65);
    }

    #[test]
    fn directory_input_is_read_failure() {
        let err = read_source(&std::env::temp_dir()).unwrap_err();
        assert_eq!(err.exit_code(), 66);
    }

    #[test]
    fn unknown_format_is_usage_error() {
        let cli = Cli::try_parse_from(["jamc", "x.jam", "--format", "yaml"]).unwrap();
        let err = run(cli).unwrap_err();
        assert_eq!(err.exit_code(), 64);
    }

    #[test]
    fn compile_errors_exit_with_one() {
        let err: DriverError = jamc::parser::parse("int 7bad = 1;").unwrap_err().into();
        assert_eq!(err.exit_code(), 1);
        assert!(!err.message().contains('\n'));
    }
}

use std::cell::RefCell;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use flagtrie_core::{Declaration, Occurrence};
use flagtrie_help::{DEFAULT_INDENT, DEFAULT_WIDTH, HelpLayout, render_help, render_usage};
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

const DEFAULT_PROGRAM: &str = "prog";

/// Output format for parse reports.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum CliOutputFormat {
    Json,
    Yaml,
}

#[derive(Debug, Parser)]
#[command(name = "flagtrie")]
#[command(about = "Parse command lines against declarative parameter registries")]
#[command(version)]
#[command(disable_help_subcommand = true)]
struct Cli {
    /// Log every parser decision to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Parse a token vector and print the matched parameters.
    Parse(ParseArgs),
    /// Print usage and help text for a declaration.
    Help(HelpArgs),
    /// Build the registry from a declaration and report problems.
    Check(CheckArgs),
}

#[derive(Debug, Args)]
struct ParseArgs {
    /// Declaration file (YAML, or JSON with a .json extension).
    #[arg(long)]
    decl: PathBuf,
    /// Output format.
    #[arg(long, default_value = "json")]
    format: CliOutputFormat,
    /// Program name placed at index 0 (default: the declared program).
    #[arg(long)]
    program: Option<String>,
    /// Tokens to parse, after `--`.
    #[arg(last = true)]
    tokens: Vec<String>,
}

#[derive(Debug, Args)]
struct HelpArgs {
    /// Declaration file (YAML, or JSON with a .json extension).
    #[arg(long)]
    decl: PathBuf,
    /// Description wrap width.
    #[arg(long, default_value_t = DEFAULT_WIDTH)]
    width: usize,
    /// Column where descriptions start.
    #[arg(long, default_value_t = DEFAULT_INDENT)]
    indent: usize,
}

#[derive(Debug, Args)]
struct CheckArgs {
    /// Declaration file (YAML, or JSON with a .json extension).
    #[arg(long)]
    decl: PathBuf,
}

/// What `parse` prints on success.
#[derive(Debug, Serialize)]
struct ParseReport<'r> {
    program: &'r str,
    parameters: Vec<&'r Occurrence>,
    positionals: Vec<String>,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Command::Parse(args) => run_parse(args),
        Command::Help(args) => run_help(args),
        Command::Check(args) => run_check(args),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_declaration(path: &Path) -> Result<Declaration, String> {
    let declaration = Declaration::load(path)
        .map_err(|err| format!("Failed to load '{}': {err}", path.display()))?;
    debug!(
        path = %path.display(),
        parameters = declaration.parameters.len(),
        "Loaded declaration"
    );
    Ok(declaration)
}

fn run_parse(args: ParseArgs) -> Result<(), String> {
    let declaration = load_declaration(&args.decl)?;
    let program = args
        .program
        .as_deref()
        .unwrap_or_else(|| declaration.program_or(DEFAULT_PROGRAM));

    let positionals = RefCell::new(Vec::new());
    let mut parser = declaration.build().map_err(|err| err.to_string())?;
    parser.set_positional_callback(|_, token| positionals.borrow_mut().push(token.to_string()));

    let mut tokens = Vec::with_capacity(args.tokens.len() + 1);
    tokens.push(program.to_string());
    tokens.extend(args.tokens);

    if let Err(err) = parser.parse(&tokens) {
        return Err(format!("{err}\n{}", render_usage(program, &parser)));
    }

    let result = parser
        .take_last_result()
        .ok_or_else(|| "Parser produced no result".to_string())?;
    drop(parser);

    let report = ParseReport {
        program,
        parameters: result.present().collect(),
        positionals: positionals.into_inner(),
    };
    print!("{}", format_report(&report, args.format)?);
    Ok(())
}

fn format_report(report: &ParseReport<'_>, format: CliOutputFormat) -> Result<String, String> {
    match format {
        CliOutputFormat::Json => serde_json::to_string_pretty(report)
            .map(|raw| format!("{raw}\n"))
            .map_err(|err| format!("Failed to serialize report: {err}")),
        CliOutputFormat::Yaml => serde_yaml::to_string(report)
            .map_err(|err| format!("Failed to serialize report: {err}")),
    }
}

fn run_help(args: HelpArgs) -> Result<(), String> {
    let declaration = load_declaration(&args.decl)?;
    let parser = declaration.build().map_err(|err| err.to_string())?;
    let layout = HelpLayout::new(args.width, args.indent);

    println!("{}", render_usage(declaration.program_or(DEFAULT_PROGRAM), &parser));
    if let Some(description) = &declaration.description {
        println!();
        println!("{description}");
    }
    let help = render_help(&parser, &layout);
    if !help.is_empty() {
        println!();
        print!("{help}");
    }
    Ok(())
}

fn run_check(args: CheckArgs) -> Result<(), String> {
    let declaration = load_declaration(&args.decl)?;
    let parser = declaration.build().map_err(|err| err.to_string())?;
    let bounds = parser.positional();

    println!(
        "Declaration '{}' is valid: {} parameter(s), {}..{} positional argument(s).",
        args.decl.display(),
        parser.len(),
        bounds.min,
        bounds.max
    );
    Ok(())
}

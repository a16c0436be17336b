use clap::Parser as _;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tinyes::{Error, Node, Parser, Token, evaluate, tokenize};
use tracing::debug;

/// Run a `console.log` script, dumping its tokens and syntax tree first
#[derive(clap::Parser, Debug)]
#[command(name = "tinyes")]
#[command(about = "Run a console.log script", long_about = None)]
struct Args {
    /// Only print the program output (skip the token and AST dumps)
    #[arg(short, long)]
    quiet: bool,

    /// Script file to execute
    file: PathBuf,
}

fn main() -> ExitCode {
    let args = Args::parse();
    tinyes::logging::init();

    let source = match fs::read_to_string(&args.file) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error: could not read {}: {}", args.file.display(), e);
            return ExitCode::FAILURE;
        }
    };
    debug!(file = %args.file.display(), bytes = source.len(), "loaded script");

    let name = args.file.display().to_string();
    let stdout = io::stdout();
    match execute(&source, args.quiet, &mut stdout.lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if e.pretty_print(&name, &source).is_err() {
                eprintln!("Error: {}", e);
            }
            ExitCode::FAILURE
        }
    }
}

/// Runs the script, writing the token and tree dumps (unless `quiet`) and
/// then the program output to `out`.
fn execute<W: Write>(source: &str, quiet: bool, out: &mut W) -> Result<(), Error> {
    let tokens = tokenize(source)?;
    if !quiet {
        dump_tokens(out, &tokens)?;
    }

    let nodes = Parser::new(tokens).parse()?;
    if !quiet {
        dump_tree(out, &nodes)?;
        writeln!(out, "\nOutput:")?;
    }

    evaluate(&nodes, out)?;
    Ok(())
}

fn dump_tokens<W: Write>(out: &mut W, tokens: &[Token]) -> io::Result<()> {
    writeln!(out, "Tokens:")?;
    for token in tokens {
        writeln!(out, "Type: {}, Literal: {}", token.kind, token.literal)?;
    }
    Ok(())
}

fn dump_tree<W: Write>(out: &mut W, nodes: &[Node]) -> io::Result<()> {
    writeln!(out, "\nAbstract Syntax Tree:")?;
    for node in nodes {
        writeln!(out, "{}: {}", node.kind.name(), node)?;
    }
    Ok(())
}

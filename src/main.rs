mod ast;
mod builtins;
mod env;
mod error;
mod eval;
mod lexer;
mod parser;
mod value;

use clap::Parser as ClapParser;
use lexer::Lexer;
use parser::Parser as DjerbaParser;
use std::path::PathBuf;
use std::process::ExitCode;

/// Interpreter for Djerba, a small imperative scripting language.
#[derive(ClapParser, Debug)]
#[command(name = "djerba")]
#[command(version)]
#[command(about = "An interpreter for the Djerba scripting language")]
struct CliArgs {
    /// Script file to execute
    #[arg(value_name = "FILE")]
    script: PathBuf,

    /// Print floats using the host's raw Display formatting instead of
    /// shortening whole numbers to integer form.
    #[arg(long = "raw-floats")]
    raw_floats: bool,
}

fn main() -> ExitCode {
    let args = match CliArgs::try_parse() {
        Ok(args) => args,
        Err(e) => {
            use clap::error::ErrorKind;
            match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => e.exit(),
                _ => {
                    println!("Usage: djerba <file.djerba>");
                    return ExitCode::FAILURE;
                }
            }
        }
    };
    match run_script(&args.script, args.raw_floats) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{}", message);
            ExitCode::FAILURE
        }
    }
}

fn run_script(path: &PathBuf, raw_floats: bool) -> Result<(), String> {
    let source = std::fs::read_to_string(path)
        .map_err(|e| format!("djerba: could not read {}: {}", path.display(), e))?;

    let tokens = Lexer::new(&source)
        .tokenize()
        .map_err(|e| format!("djerba: {}", e))?;
    let program = DjerbaParser::new(tokens)
        .parse()
        .map_err(|e| format!("djerba: {}", e))?;
    eval::run_program(&program, raw_floats).map_err(|e| format!("djerba: {}", e))
}

//! Command-line converter between JSON and ZON.
//!
//! `zon encode` reads JSON and writes ZON; `zon decode` reads ZON and writes
//! JSON. Either reads a file path or stdin when the path is omitted or `-`.
//!
//! Exit codes: 0 success, 2 usage error, 3 decode error, 4 encode error,
//! 5 I/O error.

use clap::{Parser, Subcommand};
use serde_zon::{DecodeOptions, EncodeOptions};
use std::io::{Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

const EXIT_DECODE: u8 = 3;
const EXIT_ENCODE: u8 = 4;
const EXIT_IO: u8 = 5;

/// Convert between JSON and ZON (Zero Overhead Notation)
#[derive(Parser, Debug)]
#[command(name = "zon", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Read JSON and write ZON to stdout
    Encode {
        /// Input path; stdin when omitted or "-"
        path: Option<PathBuf>,

        /// Terminate the output with a newline
        #[arg(long)]
        trailing_newline: bool,
    },
    /// Read ZON and write JSON to stdout
    Decode {
        /// Input path; stdin when omitted or "-"
        path: Option<PathBuf>,

        /// Repair row/field count mismatches instead of failing
        #[arg(long)]
        no_strict: bool,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
}

fn main() -> ExitCode {
    // clap handles usage errors itself with exit code 2
    let cli = Cli::parse();
    match cli.command {
        Command::Encode { path, trailing_newline } => run_encode(path, trailing_newline),
        Command::Decode { path, no_strict, pretty } => run_decode(path, no_strict, pretty),
    }
}

fn run_encode(path: Option<PathBuf>, trailing_newline: bool) -> ExitCode {
    let input = match read_input(&path) {
        Ok(text) => text,
        Err(err) => return fail_io(&err),
    };
    let json: serde_json::Value = match serde_json::from_str(&input) {
        Ok(value) => value,
        Err(err) => {
            eprintln!("zon: invalid JSON input: {err}");
            return ExitCode::from(EXIT_ENCODE);
        }
    };
    let options = EncodeOptions::default().with_trailing_newline(trailing_newline);
    match serde_zon::to_string_with_options(&json, &options) {
        // The encoder already honors the trailing-newline option; emit the
        // canonical bytes untouched.
        Ok(text) => write_output(&text, false),
        Err(err) => {
            eprintln!("zon: encode error[{}]: {err}", err.code());
            ExitCode::from(EXIT_ENCODE)
        }
    }
}

fn run_decode(path: Option<PathBuf>, no_strict: bool, pretty: bool) -> ExitCode {
    let input = match read_input(&path) {
        Ok(text) => text,
        Err(err) => return fail_io(&err),
    };
    let options = DecodeOptions::default().with_strict(!no_strict);
    let json: serde_json::Value = match serde_zon::from_str_with_options(&input, &options) {
        Ok(value) => value,
        Err(err) => {
            match err.line() {
                Some(line) => eprintln!("zon: decode error[{}] at line {line}: {err}", err.code()),
                None => eprintln!("zon: decode error[{}]: {err}", err.code()),
            }
            return ExitCode::from(EXIT_DECODE);
        }
    };
    let rendered = if pretty {
        serde_json::to_string_pretty(&json)
    } else {
        serde_json::to_string(&json)
    };
    match rendered {
        Ok(text) => write_output(&text, true),
        Err(err) => {
            eprintln!("zon: cannot render JSON: {err}");
            ExitCode::from(EXIT_ENCODE)
        }
    }
}

fn read_input(path: &Option<PathBuf>) -> std::io::Result<String> {
    match path {
        Some(p) if p.as_os_str() != "-" => std::fs::read_to_string(p),
        _ => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

fn write_output(text: &str, add_newline: bool) -> ExitCode {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    let result = if add_newline {
        writeln!(handle, "{text}")
    } else {
        write!(handle, "{text}")
    };
    match result.and_then(|_| handle.flush()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("zon: cannot write output: {err}");
            ExitCode::from(EXIT_IO)
        }
    }
}

fn fail_io(err: &std::io::Error) -> ExitCode {
    eprintln!("zon: cannot read input: {err}");
    ExitCode::from(EXIT_IO)
}

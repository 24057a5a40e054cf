//! flexproto CLI - C++ header generator for flex-encoded messages
//!
//! `flexproto [OPTIONS] [SCHEMA]` reads a TOML schema and writes one header
//! with the struct layouts, enums and encode/decode functions it describes.
//! Without a schema argument the usage text is printed.

use std::path::PathBuf;

use clap::{ArgAction, CommandFactory, Parser};

mod generate;
mod logging;

#[derive(Parser)]
#[command(name = "flexproto")]
#[command(author, version, about = "Generate C++ flex codec headers from schema files", long_about = None)]
struct Cli {
    /// Schema file (TOML)
    schema: Option<PathBuf>,

    /// Output header (default: schema file name with `.` replaced by `_`, plus `.h`)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Runtime header to include, overriding the schema's `[generator]` table
    #[arg(long)]
    runtime_header: Option<String>,

    /// Load the schema and generate the header without writing it
    #[arg(long)]
    check: bool,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let Some(schema) = cli.schema else {
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    logging::init(cli.verbose, cli.quiet);

    generate::run(&generate::GenerateArgs {
        schema,
        output: cli.output,
        runtime_header: cli.runtime_header,
        check: cli.check,
        quiet: cli.quiet,
    })
}

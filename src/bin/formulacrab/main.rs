use std::fs;
use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use formulacrab::{table, ReferenceTable};

mod cli;
mod periodic;
mod report;

fn main() -> ExitCode {
    let cli = cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            print_error(&e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &cli::Cli) -> Result<()> {
    let table = load_table(cli)?;

    let compound = if cli.strict {
        table.parse_exact(&cli.formula)
    } else {
        table.parse(&cli.formula)
    }
    .with_context(|| format!("Failed to parse formula {:?}", cli.formula))?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if cli.json {
        serde_json::to_writer_pretty(&mut out, &compound).context("Failed to encode JSON")?;
        writeln!(out)?;
        return Ok(());
    }

    writeln!(out)?;
    if cli.table {
        periodic::print_periodic_table(&mut out, &table, &compound)?;
        writeln!(out)?;
    }

    report::print_report(&mut out, &table, &cli.formula, &compound)?;

    if cli.electrons {
        writeln!(out)?;
        report::print_electrons(&mut out, &compound)?;
    }

    Ok(())
}

fn load_table(cli: &cli::Cli) -> Result<ReferenceTable> {
    let elements = match &cli.elements {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read element table {}", path.display()))?,
        None => table::BUILTIN_ELEMENTS_CSV.to_string(),
    };
    let compounds = match &cli.compounds {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read compound table {}", path.display()))?,
        None => table::BUILTIN_COMPOUNDS_CSV.to_string(),
    };
    ReferenceTable::from_csv(&elements, &compounds).context("Failed to load reference tables")
}

fn print_error(err: &anyhow::Error) {
    let mut stderr = io::stderr().lock();
    let _ = writeln!(stderr, "error: {err}");
    let mut source = err.source();
    while let Some(cause) = source {
        let _ = writeln!(stderr, "  caused by: {cause}");
        source = cause.source();
    }
}

use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "formulacrab",
    about = "Parse chemical formulas and show element data",
    version,
    author
)]
pub struct Cli {
    /// Chemical formula, e.g. `Ca(OH)2` or `[Fe(CN)6]-3`. Use `--` before a
    /// formula that starts with `-` and is not a bare number.
    #[arg(value_name = "FORMULA", allow_negative_numbers = true)]
    pub formula: String,

    /// Draw the periodic table with the formula's elements highlighted
    #[arg(short = 't', long = "table")]
    pub table: bool,

    /// Show the electron configuration of each element
    #[arg(short, long)]
    pub electrons: bool,

    /// Print the parsed compound as JSON
    #[arg(long)]
    pub json: bool,

    /// Reject formulas with trailing unparsed input
    #[arg(long)]
    pub strict: bool,

    /// Element table CSV replacing the built-in one
    #[arg(long, value_name = "FILE", help_heading = "Reference Data")]
    pub elements: Option<PathBuf>,

    /// Compound table CSV replacing the built-in one
    #[arg(long, value_name = "FILE", help_heading = "Reference Data")]
    pub compounds: Option<PathBuf>,
}

pub fn parse() -> Cli {
    Cli::parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn negative_charge_formula_is_positional() {
        let cli = Cli::try_parse_from(["formulacrab", "-2"]).unwrap();
        assert_eq!(cli.formula, "-2");
    }

    #[test]
    fn hyphen_formula_after_separator() {
        let cli = Cli::try_parse_from(["formulacrab", "--json", "--", "-"]).unwrap();
        assert_eq!(cli.formula, "-");
        assert!(cli.json);
    }

    #[test]
    fn flags() {
        let cli = Cli::try_parse_from(["formulacrab", "-t", "-e", "--strict", "H2O"]).unwrap();
        assert!(cli.table && cli.electrons && cli.strict && !cli.json);
        assert_eq!(cli.formula, "H2O");
    }
}

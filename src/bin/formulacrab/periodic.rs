use std::collections::HashSet;
use std::io::{self, Write};

use crossterm::style::Stylize;
use formulacrab::{Compound, ReferenceTable};

const PERIODS: usize = 7;
const GROUPS: usize = 18;
const SERIES_LEN: usize = 15;
const LANTHANUM: u8 = 57;
const ACTINIUM: u8 = 89;
const CELL: usize = 4;

/// Symbols laid out on the 7 x 18 grid, with the f-block split out.
#[derive(Debug, Default)]
struct Layout<'a> {
    main: [[Option<&'a str>; GROUPS]; PERIODS],
    lanthanides: [Option<&'a str>; SERIES_LEN],
    actinides: [Option<&'a str>; SERIES_LEN],
}

impl<'a> Layout<'a> {
    fn new(table: &'a ReferenceTable) -> Self {
        let mut layout = Layout::default();
        for e in table.elements() {
            let symbol = Some(e.symbol.as_str());
            let series = |start: u8| e.number.checked_sub(start).map(usize::from);
            match (series(LANTHANUM), series(ACTINIUM)) {
                (_, Some(i)) if i < SERIES_LEN => layout.actinides[i] = symbol,
                (Some(i), _) if i < SERIES_LEN => layout.lanthanides[i] = symbol,
                _ => {
                    let (period, group) = (e.period as usize, e.group as usize);
                    if (1..=PERIODS).contains(&period) && (1..=GROUPS).contains(&group) {
                        layout.main[period - 1][group - 1] = symbol;
                    }
                }
            }
        }
        layout
    }
}

pub fn print_periodic_table(
    out: &mut impl Write,
    table: &ReferenceTable,
    compound: &Compound,
) -> io::Result<()> {
    let highlighted: HashSet<&str> = compound.elements().map(|e| e.symbol.as_str()).collect();
    let layout = Layout::new(table);

    for row in &layout.main {
        print_row(out, row, &highlighted)?;
    }

    writeln!(out)?;
    for series in [&layout.lanthanides, &layout.actinides] {
        write!(out, "{:width$}", "", width = 2 * CELL)?;
        print_row(out, series, &highlighted)?;
    }
    Ok(())
}

fn print_row(
    out: &mut impl Write,
    cells: &[Option<&str>],
    highlighted: &HashSet<&str>,
) -> io::Result<()> {
    for cell in cells {
        match cell {
            Some(symbol) if highlighted.contains(symbol) => {
                write!(out, "{}", format!("{symbol:>CELL$}").green())?
            }
            Some(symbol) => write!(out, "{symbol:>CELL$}")?,
            None => write!(out, "{:CELL$}", "")?,
        }
    }
    writeln!(out)
}

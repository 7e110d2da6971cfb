use std::collections::HashSet;
use std::io::{self, Write};

use formulacrab::{Compound, ReferenceTable};

const INDENT: &str = "  ";
const KEY_WIDTH: usize = 9;

pub fn print_report(
    out: &mut impl Write,
    table: &ReferenceTable,
    formula: &str,
    compound: &Compound,
) -> io::Result<()> {
    // A formula that is exactly an element symbol reports that element.
    let element = table.element(formula.trim());

    let name = match element {
        Some(e) => e.name.clone(),
        None => compound.display_name(),
    };

    let mut rows = vec![
        ("Molecule", compound.to_string()),
        ("Expanded", compound.to_molecule().expanded_symbols()),
        ("Hill", compound.hill_formula()),
        ("Name", name),
    ];
    if let Some(state) = &compound.state {
        rows.push(("State", state.clone()));
    }
    rows.push(("Mass", format!("{:.6}", compound.mass())));
    rows.push(("Charge", compound.charge_total().to_string()));
    if let Some(e) = element {
        rows.push(("Number", e.number.to_string()));
        rows.push(("Category", e.category.clone()));
        rows.push(("Fact", e.fact.clone()));
    }

    print_kv(out, &rows)
}

fn print_kv(out: &mut impl Write, rows: &[(&str, String)]) -> io::Result<()> {
    for (key, value) in rows {
        writeln!(out, "{INDENT}{key:<KEY_WIDTH$}: {value}")?;
    }
    Ok(())
}

/// One line per distinct element, in order of first appearance.
pub fn print_electrons(out: &mut impl Write, compound: &Compound) -> io::Result<()> {
    let mut seen = HashSet::new();
    for e in compound.elements() {
        if !seen.insert(e.symbol.as_str()) {
            continue;
        }
        writeln!(
            out,
            "{INDENT}{}({}): {}",
            e.symbol,
            e.number,
            e.electron_configuration()
        )?;
    }
    Ok(())
}

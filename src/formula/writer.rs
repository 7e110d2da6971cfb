//! Canonical string rendering of parsed formulas.
//!
//! Rendering is a single left-to-right fold that keeps only the pending
//! run. Adjacent equal units are coalesced; nothing is sorted, so `HOH`
//! stays `HOH`.

use std::fmt::{self, Write};

use crate::compound::Compound;
use crate::element::Element;
use crate::molecule::Molecule;

/// Canonical string of a compound.
pub fn format(compound: &Compound) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_compound(&mut out, compound);
    out
}

/// Canonical string of a single molecule.
pub fn format_molecule(molecule: &Molecule) -> String {
    let mut out = String::new();
    let _ = write_molecule(&mut out, molecule);
    out
}

/// Write a charge suffix: `+`, `-`, `+n` or `-n`. Zero writes nothing.
pub(crate) fn write_charge<W: Write>(out: &mut W, charge: i32) -> fmt::Result {
    match charge {
        0 => Ok(()),
        1 => out.write_char('+'),
        -1 => out.write_char('-'),
        c if c > 0 => write!(out, "+{c}"),
        c => write!(out, "-{}", c.unsigned_abs()),
    }
}

/// A run of identical element occurrences is written symbol, count,
/// charge, so `Fe2+` round-trips as two singly charged irons.
fn write_element_run<W: Write>(out: &mut W, element: &Element, count: usize) -> fmt::Result {
    out.write_str(&element.symbol)?;
    if count > 1 {
        write!(out, "{count}")?;
    }
    write_charge(out, element.charge)
}

/// Element runs of a molecule, without the molecule's own charge.
fn write_elements<W: Write>(out: &mut W, molecule: &Molecule) -> fmt::Result {
    let mut pending: Option<(&Element, usize)> = None;
    for element in &molecule.elements {
        pending = match pending {
            Some((prev, count)) if prev.same_species(element) => Some((prev, count + 1)),
            Some((prev, count)) => {
                write_element_run(out, prev, count)?;
                Some((element, 1))
            }
            None => Some((element, 1)),
        };
    }
    match pending {
        Some((prev, count)) => write_element_run(out, prev, count),
        None => Ok(()),
    }
}

fn render_elements(molecule: &Molecule) -> String {
    let mut out = String::new();
    let _ = write_elements(&mut out, molecule);
    out
}

/// How the output written so far ends.
#[derive(Debug, Clone, Copy, Default)]
struct Tail {
    /// Ends in a molecule written without parentheses; another bare
    /// molecule after it would be parsed as part of the same molecule.
    bare: bool,
    /// Ends in a charge suffix.
    charged: bool,
}

/// Write `count` copies of `molecule`, whose element runs render as
/// `inner`. A charged or repeated molecule is parenthesized so the charge
/// re-parses onto the molecule rather than its last element run, and so is
/// one that follows a bare molecule.
fn write_molecule_run<W: Write>(
    out: &mut W,
    molecule: &Molecule,
    inner: &str,
    count: usize,
    after: Tail,
) -> Result<Tail, fmt::Error> {
    if molecule.charge == 0 && count == 1 && !after.bare {
        out.write_str(inner)?;
        return Ok(Tail {
            bare: true,
            charged: molecule.elements.last().is_some_and(|e| e.charge != 0),
        });
    }
    write!(out, "({inner})")?;
    if count > 1 {
        write!(out, "{count}")?;
    }
    write_charge(out, molecule.charge)?;
    Ok(Tail {
        bare: false,
        charged: molecule.charge != 0,
    })
}

pub(crate) fn write_molecule<W: Write>(out: &mut W, molecule: &Molecule) -> fmt::Result {
    write_molecule_run(out, molecule, &render_elements(molecule), 1, Tail::default()).map(|_| ())
}

pub(crate) fn write_compound<W: Write>(out: &mut W, compound: &Compound) -> fmt::Result {
    let mut tail = Tail::default();
    let mut pending: Option<(&Molecule, String, usize)> = None;
    for molecule in &compound.molecules {
        let inner = render_elements(molecule);
        pending = match pending {
            Some((prev, prev_inner, count))
                if prev.charge == molecule.charge && prev_inner == inner =>
            {
                Some((prev, prev_inner, count + 1))
            }
            Some((prev, prev_inner, count)) => {
                tail = write_molecule_run(out, prev, &prev_inner, count, tail)?;
                Some((molecule, inner, 1))
            }
            None => Some((molecule, inner, 1)),
        };
    }
    if let Some((prev, prev_inner, count)) = pending {
        tail = write_molecule_run(out, prev, &prev_inner, count, tail)?;
    }

    // An uncharged tail would take the compound charge as its own; an
    // explicit zero charge closes it off.
    if compound.charge != 0 && !compound.molecules.is_empty() && !tail.charged {
        out.write_str("+0")?;
    }
    write_charge(out, compound.charge)
}

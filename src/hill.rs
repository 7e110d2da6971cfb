//! Hill system formulas.
//!
//! [`hill_formula`] collapses a compound's structure into the element
//! counts databases index by: C first, then H, then the remaining
//! elements alphabetically.

use std::collections::BTreeMap;
use std::fmt::Write;

use crate::compound::Compound;

/// Compute the molecular formula as a Hill system string.
///
/// Compounds without carbon list every element alphabetically, hydrogen
/// included. The total charge (compound, molecule and element charges
/// together) is appended as `+`, `2+`, `-`, `2-`, etc.
pub fn hill_formula(compound: &Compound) -> String {
    let mut counts: BTreeMap<&str, usize> = compound.element_counts();
    let net_charge = compound.charge_total();

    let mut result = String::new();

    if let Some(c) = counts.remove("C") {
        append_element(&mut result, "C", c);
        if let Some(h) = counts.remove("H") {
            append_element(&mut result, "H", h);
        }
    }

    for (sym, count) in &counts {
        append_element(&mut result, sym, *count);
    }

    match net_charge {
        0 => {}
        1 => result.push('+'),
        -1 => result.push('-'),
        c if c > 0 => {
            let _ = write!(result, "{c}+");
        }
        c => {
            let _ = write!(result, "{}-", c.unsigned_abs());
        }
    }

    result
}

fn append_element(buf: &mut String, symbol: &str, count: usize) {
    buf.push_str(symbol);
    if count > 1 {
        let _ = write!(buf, "{count}");
    }
}

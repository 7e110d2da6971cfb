//! Property-based round-trip tests for formula parsing and formatting.
//!
//! Formulas are generated as small syntax trees and rendered to text, so
//! every generated input is accepted by the parser and its element counts
//! are known up front.

use std::collections::BTreeMap;

use formulacrab::formula::{self, tokenizer};
use formulacrab::{Compound, ReferenceTable};
use proptest::prelude::*;

// ============================================================================
// FORMULA SYNTAX TREES
// ============================================================================

#[derive(Debug, Clone)]
enum Unit {
    Run {
        symbol: &'static str,
        count: Option<u32>,
        charge: Option<i32>,
    },
    Group {
        square: bool,
        units: Vec<Unit>,
        count: Option<u32>,
        charge: Option<i32>,
    },
}

#[derive(Debug, Clone)]
struct Formula {
    units: Vec<Unit>,
    charge: Option<i32>,
}

fn render_suffix(out: &mut String, count: Option<u32>, charge: Option<i32>) {
    if let Some(n) = count {
        out.push_str(&n.to_string());
    }
    if let Some(c) = charge {
        out.push(if c < 0 { '-' } else { '+' });
        if c.abs() != 1 {
            out.push_str(&c.unsigned_abs().to_string());
        }
    }
}

fn render_unit(out: &mut String, unit: &Unit) {
    match unit {
        Unit::Run {
            symbol,
            count,
            charge,
        } => {
            out.push_str(symbol);
            render_suffix(out, *count, *charge);
        }
        Unit::Group {
            square,
            units,
            count,
            charge,
        } => {
            out.push(if *square { '[' } else { '(' });
            for u in units {
                render_unit(out, u);
            }
            out.push(if *square { ']' } else { ')' });
            render_suffix(out, *count, *charge);
        }
    }
}

impl Formula {
    fn render(&self) -> String {
        let mut out = String::new();
        for u in &self.units {
            render_unit(&mut out, u);
        }
        render_suffix(&mut out, None, self.charge);
        out
    }

    fn expected_counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        count_units(&self.units, 1, &mut counts);
        counts
    }
}

fn count_units(units: &[Unit], multiplier: usize, counts: &mut BTreeMap<String, usize>) {
    for unit in units {
        match unit {
            Unit::Run { symbol, count, .. } => {
                let n = multiplier * count.unwrap_or(1) as usize;
                if n > 0 {
                    *counts.entry(symbol.to_string()).or_default() += n;
                }
            }
            Unit::Group { units, count, .. } => {
                count_units(units, multiplier * count.unwrap_or(1) as usize, counts);
            }
        }
    }
}

fn owned_counts(c: &Compound) -> BTreeMap<String, usize> {
    c.element_counts()
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
}

// ============================================================================
// PROPTEST STRATEGIES
// ============================================================================

/// Known symbols plus one the table does not have.
fn arb_symbol() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec!["H", "C", "N", "O", "S", "Fe", "Ca", "Cl", "Xx"])
}

fn arb_count() -> impl Strategy<Value = Option<u32>> {
    prop::option::weighted(0.5, 0u32..4)
}

fn arb_charge() -> impl Strategy<Value = Option<i32>> {
    prop::option::weighted(0.3, -3i32..=3)
}

fn arb_unit() -> impl Strategy<Value = Unit> {
    let leaf = (arb_symbol(), arb_count(), arb_charge()).prop_map(|(symbol, count, charge)| {
        Unit::Run {
            symbol,
            count,
            charge,
        }
    });
    leaf.prop_recursive(3, 24, 4, |inner| {
        (
            any::<bool>(),
            prop::collection::vec(inner, 0..4),
            arb_count(),
            arb_charge(),
        )
            .prop_map(|(square, units, count, charge)| Unit::Group {
                square,
                units,
                count,
                charge,
            })
    })
}

fn arb_formula() -> impl Strategy<Value = Formula> {
    (prop::collection::vec(arb_unit(), 0..5), arb_charge())
        .prop_map(|(units, charge)| Formula { units, charge })
}

fn table() -> ReferenceTable {
    ReferenceTable::builtin().unwrap()
}

// ============================================================================
// PROPERTIES
// ============================================================================

proptest! {
    #[test]
    fn generated_formulas_parse_completely(f in arb_formula()) {
        let text = f.render();
        let compound = formula::parse_exact(&text, &table());
        prop_assert!(compound.is_ok(), "{text:?}: {compound:?}");
    }

    #[test]
    fn element_counts_follow_subscripts(f in arb_formula()) {
        let text = f.render();
        let compound = formula::parse(&text, &table()).unwrap();
        prop_assert_eq!(owned_counts(&compound), f.expected_counts(), "{}", text);
    }

    #[test]
    fn mass_is_sum_of_flattened_elements(f in arb_formula()) {
        let compound = formula::parse(&f.render(), &table()).unwrap();
        let flat: f64 = compound.elements().map(|e| e.amu).sum();
        prop_assert!((compound.mass() - flat).abs() < 1e-9);
    }

    #[test]
    fn no_empty_molecules(f in arb_formula()) {
        let compound = formula::parse(&f.render(), &table()).unwrap();
        prop_assert!(compound.molecules.iter().all(|m| !m.is_empty()));
    }

    #[test]
    fn canonical_form_is_idempotent(f in arb_formula()) {
        let table = table();
        let once = formula::format(&formula::parse(&f.render(), &table).unwrap());
        let twice = formula::format(&formula::parse(&once, &table).unwrap());
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn canonical_form_preserves_composition(f in arb_formula()) {
        let table = table();
        let first = formula::parse(&f.render(), &table).unwrap();
        let canonical = formula::format(&first);
        let second = formula::parse_exact(&canonical, &table).unwrap();
        prop_assert_eq!(owned_counts(&first), owned_counts(&second), "{}", canonical);
        prop_assert_eq!(first.charge_total(), second.charge_total(), "{}", canonical);
    }

    #[test]
    fn canonical_form_preserves_molecules(f in arb_formula()) {
        let table = table();
        let first = formula::parse(&f.render(), &table).unwrap();
        let canonical = formula::format(&first);
        let second = formula::parse_exact(&canonical, &table).unwrap();
        prop_assert_eq!(first.molecules, second.molecules, "{}", canonical);
    }

    #[test]
    fn tokenizer_errors_point_inside_input(s in "\\PC{0,24}") {
        if let Err(e) = tokenizer::tokenize(&s) {
            prop_assert!(e.position() < s.chars().count());
        }
    }

    #[test]
    fn parser_never_panics(s in "[A-Za-z0-9()\\[\\]+\\- ]{0,24}") {
        let _ = formula::parse(&s, &table());
        let _ = formula::parse_exact(&s, &table());
    }

    #[test]
    fn expansion_stays_within_limit(s in "[HO()\\[\\]0-9]{0,24}") {
        if let Ok(c) = formula::parse(&s, &table()) {
            prop_assert!(c.elements().count() <= formula::MAX_ELEMENTS);
        }
    }

    #[test]
    fn deep_nesting_is_an_error_not_a_crash(depth in 0usize..400) {
        let text = format!("{}H{}", "(".repeat(depth), ")".repeat(depth));
        match formula::parse_exact(&text, &table()) {
            Ok(c) => prop_assert!(depth <= formula::MAX_NESTING && c.molecules.len() == 1),
            Err(e) => {
                prop_assert!(depth > formula::MAX_NESTING);
                prop_assert_eq!(e.position(), formula::MAX_NESTING);
            }
        }
    }
}

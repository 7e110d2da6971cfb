use std::fmt;

use serde::{Deserialize, Serialize};

use crate::compound::Compound;
use crate::element::Element;

/// A contiguous run of element occurrences from one formula segment.
///
/// This is not necessarily a chemically meaningful molecule: `Ca(OH)2`
/// parses into three of them, `Ca`, `OH` and `OH`. Element order follows
/// the input and drives the canonical rendering.
///
/// `charge` is the charge attached to a whole group (`(SO4)-2`), separate
/// from and additive with the charges on the elements. `name` and `state`
/// are filled in only when the molecule matches a reference compound.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Molecule {
    pub elements: Vec<Element>,
    #[serde(default)]
    pub charge: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
}

impl Molecule {
    pub fn new(elements: Vec<Element>) -> Self {
        Self {
            elements,
            ..Self::default()
        }
    }

    pub fn with_charge(mut self, charge: i32) -> Self {
        self.charge = charge;
        self
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Sum of the elements' relative atomic masses.
    pub fn mass(&self) -> f64 {
        self.elements.iter().map(|e| e.amu).sum()
    }

    /// Molecule charge plus every element charge, summed in `i64` so that
    /// many large charges cannot overflow.
    pub fn charge_total(&self) -> i64 {
        let elements: i64 = self.elements.iter().map(|e| i64::from(e.charge)).sum();
        i64::from(self.charge) + elements
    }

    /// Every symbol written out once per occurrence, with no counts or
    /// charges: `H2O` gives `HHO`.
    pub fn expanded_symbols(&self) -> String {
        self.elements.iter().map(|e| e.symbol.as_str()).collect()
    }

    /// Wrap this molecule in a compound of its own. The charge stays on the
    /// molecule, so both report the same total; the compound takes over the
    /// molecule's state.
    pub fn to_compound(&self) -> Compound {
        Compound {
            molecules: vec![self.clone()],
            charge: 0,
            name: None,
            state: self.state.clone(),
        }
    }
}

impl fmt::Display for Molecule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        crate::formula::writer::write_molecule(f, self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn el(symbol: &str, amu: f64) -> Element {
        Element {
            symbol: symbol.into(),
            amu,
            number: 1,
            ..Element::default()
        }
    }

    fn water() -> Molecule {
        Molecule::new(vec![el("H", 1.008), el("H", 1.008), el("O", 15.999)])
    }

    #[test]
    fn mass_sums_elements() {
        assert!((water().mass() - 18.015).abs() < 1e-9);
        assert_eq!(Molecule::default().mass(), 0.0);
    }

    #[test]
    fn charge_total_adds_element_charges() {
        let mut m = water().with_charge(-2);
        m.elements[2].charge = 1;
        assert_eq!(m.charge_total(), -1);
    }

    #[test]
    fn charge_total_does_not_overflow_i32() {
        let mut m = water().with_charge(i32::MAX);
        for e in &mut m.elements {
            e.charge = i32::MAX;
        }
        assert_eq!(m.charge_total(), 4 * i64::from(i32::MAX));
    }

    #[test]
    fn expanded_symbols() {
        assert_eq!(water().expanded_symbols(), "HHO");
    }

    #[test]
    fn display_is_canonical() {
        assert_eq!(water().to_string(), "H2O");
        assert_eq!(water().with_charge(1).to_string(), "(H2O)+");
    }

    #[test]
    fn to_compound_wraps_single_molecule() {
        let mut m = water().with_charge(-1);
        m.state = Some("liquid".into());
        let c = m.to_compound();
        assert_eq!(c.molecules.len(), 1);
        assert_eq!(c.charge, 0);
        assert_eq!(c.charge_total(), m.charge_total());
        assert_eq!(c.to_string(), "(H2O)-");
        assert_eq!(c.state.as_deref(), Some("liquid"));
        assert_eq!(c.name, None);
    }

    #[test]
    fn len_and_is_empty() {
        assert_eq!(water().len(), 3);
        assert!(Molecule::default().is_empty());
    }
}

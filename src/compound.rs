use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::element::Element;
use crate::molecule::Molecule;

/// The full parsed structure of one formula.
///
/// A repeated group is stored as repeated molecules: `Ca(OH)2` holds
/// `[Ca, OH, OH]`, and the canonical rendering folds the two identical
/// neighbours back into `(OH)2`.
///
/// # Examples
///
/// ```
/// use formulacrab::{formula, ReferenceTable};
///
/// let table = ReferenceTable::builtin().unwrap();
/// let lime = formula::parse("Ca(OH)2", &table).unwrap();
/// assert_eq!(lime.molecules.len(), 3);
/// assert_eq!(lime.to_string(), "Ca(OH)2");
/// assert!((lime.mass() - 74.092).abs() < 0.01);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Compound {
    pub molecules: Vec<Molecule>,
    /// Charge written after the whole formula.
    #[serde(default)]
    pub charge: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
}

impl Compound {
    pub fn new(molecules: Vec<Molecule>, charge: i32) -> Self {
        Self {
            molecules,
            charge,
            name: None,
            state: None,
        }
    }

    /// Every element occurrence, molecule by molecule, in input order.
    pub fn elements(&self) -> impl Iterator<Item = &Element> + '_ {
        self.molecules.iter().flat_map(|m| m.elements.iter())
    }

    /// All element occurrences collected into a single uncharged molecule.
    pub fn to_molecule(&self) -> Molecule {
        Molecule::new(self.elements().cloned().collect())
    }

    pub fn mass(&self) -> f64 {
        self.molecules.iter().map(Molecule::mass).sum()
    }

    /// Compound charge plus every molecule and element charge.
    pub fn charge_total(&self) -> i64 {
        i64::from(self.charge) + self.molecules.iter().map(Molecule::charge_total).sum::<i64>()
    }

    /// Number of occurrences of each symbol.
    pub fn element_counts(&self) -> BTreeMap<&str, usize> {
        let mut counts = BTreeMap::new();
        for e in self.elements() {
            *counts.entry(e.symbol.as_str()).or_default() += 1;
        }
        counts
    }

    /// Compound name followed by the names of matched molecules.
    pub fn display_name(&self) -> String {
        self.name
            .iter()
            .chain(self.molecules.iter().filter_map(|m| m.name.as_ref()))
            .filter(|n| !n.is_empty())
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn hill_formula(&self) -> String {
        crate::hill::hill_formula(self)
    }
}

impl fmt::Display for Compound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        crate::formula::writer::write_compound(f, self)
    }
}

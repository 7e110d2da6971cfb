use std::fmt;

use serde::{Deserialize, Serialize};

use crate::electron::{ElectronConfiguration, ElectronError, QuantumNumbers};

/// One occurrence of a chemical element inside a parsed formula.
///
/// The physical attributes are copied from the reference table the formula
/// was parsed against. `charge` belongs to this occurrence only: in `Fe2+O`
/// both iron occurrences carry `+1` while the oxygen carries nothing.
///
/// Symbols missing from the reference table produce a *placeholder*: an
/// `Element` with the symbol set and every other attribute zero or empty.
///
/// # Examples
///
/// ```
/// use formulacrab::Element;
///
/// let unknown = Element::placeholder("Xx");
/// assert!(unknown.is_placeholder());
/// assert_eq!(unknown.amu, 0.0);
/// assert_eq!(unknown.with_charge(-2).to_string(), "Xx-2");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Element {
    /// Element symbol (`"Fe"`). Key into the reference table.
    pub symbol: String,
    /// Chemical series, e.g. `"transition metal"`.
    pub category: String,
    /// Atomic number. `0` for placeholders.
    pub number: u8,
    /// Periodic table group, 1..=18.
    pub group: u8,
    /// Periodic table period, 1..=7.
    pub period: u8,
    /// Relative atomic mass.
    pub amu: f64,
    /// Phase at standard conditions.
    pub phase: String,
    pub fact: String,
    /// Display name (`"Iron"`).
    pub name: String,
    /// Display colour as a hex RGB string.
    pub colour: String,
    /// Charge of this occurrence.
    #[serde(default)]
    pub charge: i32,
}

impl Element {
    pub fn placeholder(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            ..Self::default()
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.number == 0
    }

    pub fn with_charge(mut self, charge: i32) -> Self {
        self.charge = charge;
        self
    }

    /// Two occurrences render identically when symbol and charge agree.
    pub fn same_species(&self, other: &Element) -> bool {
        self.symbol == other.symbol && self.charge == other.charge
    }

    /// Ground-state electron configuration of the neutral atom.
    pub fn electron_configuration(&self) -> ElectronConfiguration {
        ElectronConfiguration::for_atomic_number(self.number)
    }

    /// Quantum numbers of the electron at `index` (zero-based, filling order).
    pub fn quantum_numbers(&self, index: usize) -> Result<QuantumNumbers, ElectronError> {
        self.electron_configuration().quantum_numbers(index)
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.symbol)?;
        crate::formula::writer::write_charge(f, self.charge)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iron() -> Element {
        Element {
            symbol: "Fe".into(),
            category: "transition metal".into(),
            number: 26,
            group: 8,
            period: 4,
            amu: 55.845,
            phase: "solid".into(),
            name: "Iron".into(),
            ..Element::default()
        }
    }

    #[test]
    fn placeholder_has_only_symbol() {
        let e = Element::placeholder("Qq");
        assert_eq!(e.symbol, "Qq");
        assert_eq!(e.number, 0);
        assert_eq!(e.amu, 0.0);
        assert_eq!(e.charge, 0);
        assert!(e.name.is_empty());
        assert!(e.is_placeholder());
    }

    #[test]
    fn table_element_is_not_placeholder() {
        assert!(!iron().is_placeholder());
    }

    #[test]
    fn display_with_charges() {
        assert_eq!(iron().to_string(), "Fe");
        assert_eq!(iron().with_charge(1).to_string(), "Fe+");
        assert_eq!(iron().with_charge(-1).to_string(), "Fe-");
        assert_eq!(iron().with_charge(3).to_string(), "Fe+3");
        assert_eq!(iron().with_charge(-2).to_string(), "Fe-2");
    }

    #[test]
    fn same_species_ignores_attributes() {
        let a = iron().with_charge(2);
        let b = Element::placeholder("Fe").with_charge(2);
        assert!(a.same_species(&b));
        assert!(!a.same_species(&iron()));
    }

    #[test]
    fn electron_configuration_of_iron() {
        assert_eq!(
            iron().electron_configuration().to_string(),
            "1s2 2s2 2p6 3s2 3p6 4s2 3d6"
        );
    }

    #[test]
    fn placeholder_has_no_electrons() {
        let e = Element::placeholder("Xx");
        assert_eq!(e.electron_configuration().electron_count(), 0);
        assert!(e.quantum_numbers(0).is_err());
    }

    #[test]
    fn serde_round_trip() {
        let e = iron().with_charge(2);
        let json = serde_json::to_string(&e).unwrap();
        let back: Element = serde_json::from_str(&json).unwrap();
        assert_eq!(back, e);
    }
}

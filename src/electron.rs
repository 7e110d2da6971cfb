//! Ground-state electron configurations and per-electron quantum numbers.
//!
//! Configurations follow the Aufbau (Madelung) filling order, corrected by
//! a table of the anomalous ground states observed for transition metals,
//! lanthanides and actinides.

use std::fmt;

use thiserror::Error;

/// Orbital shape of a subshell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SubshellKind {
    S,
    P,
    D,
    F,
}

impl SubshellKind {
    /// Azimuthal quantum number `l`.
    pub const fn azimuthal(self) -> u8 {
        match self {
            Self::S => 0,
            Self::P => 1,
            Self::D => 2,
            Self::F => 3,
        }
    }

    /// Number of orbitals, `2l + 1`.
    pub const fn orbitals(self) -> u8 {
        2 * self.azimuthal() + 1
    }

    /// Maximum number of electrons the subshell holds.
    pub const fn capacity(self) -> u8 {
        2 * self.orbitals()
    }

    pub const fn letter(self) -> char {
        match self {
            Self::S => 's',
            Self::P => 'p',
            Self::D => 'd',
            Self::F => 'f',
        }
    }
}

impl fmt::Display for SubshellKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// One occupied subshell, displayed as e.g. `3d5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subshell {
    pub n: u8,
    pub kind: SubshellKind,
    pub electrons: u8,
}

impl fmt::Display for Subshell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.n, self.kind, self.electrons)
    }
}

use SubshellKind::{D, F, P, S};

/// Madelung filling order. Full occupancy of every entry is 118 electrons.
const FILLING_ORDER: [(u8, SubshellKind); 19] = [
    (1, S),
    (2, S),
    (2, P),
    (3, S),
    (3, P),
    (4, S),
    (3, D),
    (4, P),
    (5, S),
    (4, D),
    (5, P),
    (6, S),
    (4, F),
    (5, D),
    (6, P),
    (7, S),
    (5, F),
    (6, D),
    (7, P),
];

/// Ground states that deviate from the filling order, as subshell
/// occupancies that replace the Aufbau values.
const EXCEPTIONS: &[(u8, &[(u8, SubshellKind, u8)])] = &[
    (24, &[(4, S, 1), (3, D, 5)]),   // Cr
    (29, &[(4, S, 1), (3, D, 10)]),  // Cu
    (41, &[(5, S, 1), (4, D, 4)]),   // Nb
    (42, &[(5, S, 1), (4, D, 5)]),   // Mo
    (44, &[(5, S, 1), (4, D, 7)]),   // Ru
    (45, &[(5, S, 1), (4, D, 8)]),   // Rh
    (46, &[(5, S, 0), (4, D, 10)]),  // Pd
    (47, &[(5, S, 1), (4, D, 10)]),  // Ag
    (57, &[(4, F, 0), (5, D, 1)]),   // La
    (58, &[(4, F, 1), (5, D, 1)]),   // Ce
    (64, &[(4, F, 7), (5, D, 1)]),   // Gd
    (78, &[(6, S, 1), (5, D, 9)]),   // Pt
    (79, &[(6, S, 1), (5, D, 10)]),  // Au
    (89, &[(5, F, 0), (6, D, 1)]),   // Ac
    (90, &[(5, F, 0), (6, D, 2)]),   // Th
    (91, &[(5, F, 2), (6, D, 1)]),   // Pa
    (92, &[(5, F, 3), (6, D, 1)]),   // U
    (93, &[(5, F, 4), (6, D, 1)]),   // Np
    (96, &[(5, F, 7), (6, D, 1)]),   // Cm
    (103, &[(6, D, 0), (7, P, 1)]),  // Lr
];

/// Subshell occupancies of a neutral atom, in filling order.
///
/// # Examples
///
/// ```
/// use formulacrab::ElectronConfiguration;
///
/// let copper = ElectronConfiguration::for_atomic_number(29);
/// assert_eq!(copper.to_string(), "1s2 2s2 2p6 3s2 3p6 4s1 3d10");
/// assert_eq!(copper.electron_count(), 29);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElectronConfiguration {
    subshells: Vec<Subshell>,
}

impl ElectronConfiguration {
    /// Ground-state configuration for atomic number `z`. Electrons beyond
    /// the 118 the filling order accommodates are not placed.
    pub fn for_atomic_number(z: u8) -> Self {
        let mut remaining = z;
        let mut subshells: Vec<Subshell> = FILLING_ORDER
            .iter()
            .map(|&(n, kind)| {
                let electrons = remaining.min(kind.capacity());
                remaining -= electrons;
                Subshell { n, kind, electrons }
            })
            .collect();

        if let Some((_, overrides)) = EXCEPTIONS.iter().find(|(number, _)| *number == z) {
            for &(n, kind, electrons) in overrides.iter() {
                if let Some(s) = subshells.iter_mut().find(|s| s.n == n && s.kind == kind) {
                    s.electrons = electrons;
                }
            }
        }

        subshells.retain(|s| s.electrons > 0);
        Self { subshells }
    }

    pub fn subshells(&self) -> &[Subshell] {
        &self.subshells
    }

    pub fn electron_count(&self) -> usize {
        self.subshells.iter().map(|s| s.electrons as usize).sum()
    }

    /// Quantum numbers of the electron at `index`, counting in filling order.
    ///
    /// Inside a subshell electrons take orbitals `ml = -l..=l` singly with
    /// spin up, then pair up with spin down.
    pub fn quantum_numbers(&self, index: usize) -> Result<QuantumNumbers, ElectronError> {
        let mut offset = index;
        for s in &self.subshells {
            let electrons = s.electrons as usize;
            if offset < electrons {
                let orbitals = s.kind.orbitals() as usize;
                let l = s.kind.azimuthal();
                let ms = if offset < orbitals { Spin::Up } else { Spin::Down };
                let ml = (offset % orbitals) as i8 - l as i8;
                return Ok(QuantumNumbers { n: s.n, l, ml, ms });
            }
            offset -= electrons;
        }
        Err(ElectronError::IndexOutOfRange {
            index,
            electrons: self.electron_count(),
        })
    }
}

impl fmt::Display for ElectronConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, s) in self.subshells.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{s}")?;
        }
        Ok(())
    }
}

/// Spin projection of an electron.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Spin {
    Up,
    Down,
}

impl Spin {
    pub fn value(self) -> f64 {
        match self {
            Self::Up => 0.5,
            Self::Down => -0.5,
        }
    }
}

impl fmt::Display for Spin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Up => f.write_str("+1/2"),
            Self::Down => f.write_str("-1/2"),
        }
    }
}

/// The four quantum numbers of one electron.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuantumNumbers {
    /// Principal.
    pub n: u8,
    /// Azimuthal.
    pub l: u8,
    /// Magnetic.
    pub ml: i8,
    pub ms: Spin,
}

impl fmt::Display for QuantumNumbers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={}, l={}, ml={}, ms={}", self.n, self.l, self.ml, self.ms)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ElectronError {
    #[error("electron index {index} out of range for {electrons} electrons")]
    IndexOutOfRange { index: usize, electrons: usize },
}

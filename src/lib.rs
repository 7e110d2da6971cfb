pub mod compound;
pub mod electron;
pub mod element;
pub mod formula;
pub mod hill;
pub mod molecule;
pub mod table;
pub mod traits;

pub use compound::Compound;
pub use electron::{ElectronConfiguration, ElectronError, QuantumNumbers, Spin, Subshell, SubshellKind};
pub use element::Element;
pub use formula::{format, parse, parse_exact, FormulaError};
pub use hill::hill_formula;
pub use molecule::Molecule;
pub use table::{ReferenceTable, TableError};
pub use traits::{CompoundLookup, ElementLookup};

//! Element and compound reference data.
//!
//! A [`ReferenceTable`] is the context object formulas are parsed against.
//! It maps element symbols to their attributes and canonical formula
//! strings to named compounds, and is immutable once loaded. The crate
//! bundles a table of all 118 elements and a set of common compounds; see
//! [`ReferenceTable::builtin`].

mod csv;

use std::collections::HashMap;

use thiserror::Error;
use tracing::{debug, trace};

use crate::compound::Compound;
use crate::element::Element;
use crate::formula::{self, FormulaError};
use crate::traits::{CompoundLookup, ElementLookup};

use self::csv::{parse_records, Record};

/// Bundled element table, one row per element.
pub const BUILTIN_ELEMENTS_CSV: &str = include_str!("../../data/elements.csv");

/// Bundled compound table.
pub const BUILTIN_COMPOUNDS_CSV: &str = include_str!("../../data/compounds.csv");

const ELEMENT_COLUMNS: usize = 10;
const COMPOUND_COLUMNS: usize = 3;

/// Errors produced when loading reference CSV data.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TableError {
    #[error("line {line}: expected {expected} columns, found {found}")]
    MissingColumns {
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("line {line}: invalid {column} value {value:?}")]
    InvalidNumber {
        line: usize,
        column: &'static str,
        value: String,
    },
    #[error("line {line}: unterminated quoted field")]
    UnterminatedQuote { line: usize },
    #[error("line {line}: cannot parse compound formula {formula:?}")]
    Formula {
        line: usize,
        formula: String,
        #[source]
        source: FormulaError,
    },
}

/// Element attributes by symbol and named compounds by canonical formula.
///
/// # Examples
///
/// ```
/// use formulacrab::ReferenceTable;
///
/// let table = ReferenceTable::builtin().unwrap();
/// let water = table.parse("H2O").unwrap();
/// assert_eq!(water.name.as_deref(), Some("Water"));
/// assert_eq!(water.state.as_deref(), Some("liquid"));
/// assert_eq!(table.element("Fe").unwrap().name, "Iron");
/// ```
#[derive(Debug, Clone, Default)]
pub struct ReferenceTable {
    elements: HashMap<String, Element>,
    compounds: HashMap<String, Compound>,
}

impl ReferenceTable {
    /// An empty table. Every symbol parses to a placeholder element.
    pub fn new() -> Self {
        Self::default()
    }

    /// The bundled element and compound tables.
    pub fn builtin() -> Result<Self, TableError> {
        Self::from_csv(BUILTIN_ELEMENTS_CSV, BUILTIN_COMPOUNDS_CSV)
    }

    /// Load elements first, then compounds parsed against those elements.
    pub fn from_csv(elements_csv: &str, compounds_csv: &str) -> Result<Self, TableError> {
        let mut table = Self::new();
        table.load_elements(elements_csv)?;
        table.load_compounds(compounds_csv)?;
        Ok(table)
    }

    /// Add element rows: `Symbol,Category,Number,Group,Amu,Fact,Period,Phase,Name,Colour`.
    ///
    /// The first row is a header and is skipped. Empty numeric fields read
    /// as zero. A symbol seen again replaces the earlier row.
    pub fn load_elements(&mut self, csv: &str) -> Result<(), TableError> {
        let records = parse_records(csv)?;
        let mut loaded = 0;
        for record in records.iter().skip(1) {
            require_columns(record, ELEMENT_COLUMNS)?;
            let element = Element {
                symbol: record.field(0).to_string(),
                category: record.field(1).to_string(),
                number: parse_number(record, 2, "Number")?,
                group: parse_number(record, 3, "Group")?,
                amu: parse_number(record, 4, "Amu")?,
                fact: record.field(5).to_string(),
                period: parse_number(record, 6, "Period")?,
                phase: record.field(7).to_string(),
                name: record.field(8).to_string(),
                colour: record.field(9).to_string(),
                charge: 0,
            };
            trace!(symbol = %element.symbol, number = element.number, "loaded element");
            self.elements.insert(element.symbol.clone(), element);
            loaded += 1;
        }
        debug!(loaded, total = self.elements.len(), "loaded element table");
        Ok(())
    }

    /// Add compound rows: `Formula,Name,State`.
    ///
    /// Each formula is parsed with the elements already loaded and keyed by
    /// its canonical string, so `CH3COOH` is found again as `CH3CO2H`.
    pub fn load_compounds(&mut self, csv: &str) -> Result<(), TableError> {
        let records = parse_records(csv)?;
        let mut loaded = 0;
        for record in records.iter().skip(1) {
            require_columns(record, COMPOUND_COLUMNS)?;
            let source = record.field(0);
            let mut compound =
                formula::parse_exact(source, &self.elements).map_err(|e| TableError::Formula {
                    line: record.line,
                    formula: source.to_string(),
                    source: e,
                })?;
            compound.name = non_empty(record.field(1));
            compound.state = non_empty(record.field(2));

            let key = formula::format(&compound);
            trace!(formula = source, key = %key, "loaded compound");
            self.compounds.insert(key, compound);
            loaded += 1;
        }
        debug!(loaded, total = self.compounds.len(), "loaded compound table");
        Ok(())
    }

    pub fn element(&self, symbol: &str) -> Option<&Element> {
        self.elements.get(symbol)
    }

    /// Named compound whose canonical formula is `canonical`.
    pub fn compound(&self, canonical: &str) -> Option<&Compound> {
        self.compounds.get(canonical)
    }

    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    pub fn compound_count(&self) -> usize {
        self.compounds.len()
    }

    /// Every element, ordered by atomic number.
    pub fn elements(&self) -> impl Iterator<Item = &Element> + '_ {
        let mut all: Vec<&Element> = self.elements.values().collect();
        all.sort_by(|a, b| a.number.cmp(&b.number).then_with(|| a.symbol.cmp(&b.symbol)));
        all.into_iter()
    }

    /// Parse a formula and attach compound names from this table.
    pub fn parse(&self, formula: &str) -> Result<Compound, FormulaError> {
        let mut compound = formula::parse(formula, self)?;
        enrich(&mut compound, self);
        Ok(compound)
    }

    /// Like [`parse`](Self::parse), rejecting unconsumed input.
    pub fn parse_exact(&self, formula: &str) -> Result<Compound, FormulaError> {
        let mut compound = formula::parse_exact(formula, self)?;
        enrich(&mut compound, self);
        Ok(compound)
    }
}

impl ElementLookup for ReferenceTable {
    fn lookup(&self, symbol: &str) -> Option<Element> {
        self.elements.get(symbol).cloned()
    }
}

impl CompoundLookup for ReferenceTable {
    fn lookup_compound(&self, canonical: &str) -> Option<&Compound> {
        self.compounds.get(canonical)
    }
}

/// Copy names and states from `table` onto a parsed compound.
///
/// When the whole compound is a known compound it takes that name and
/// state. Otherwise each molecule that is itself a known compound takes
/// its name and state.
pub fn enrich<C: CompoundLookup + ?Sized>(compound: &mut Compound, table: &C) {
    if let Some(known) = table.lookup_compound(&formula::format(compound)) {
        compound.name = known.name.clone();
        compound.state = known.state.clone();
        return;
    }
    for molecule in &mut compound.molecules {
        if let Some(known) = table.lookup_compound(&formula::format_molecule(molecule)) {
            molecule.name = known.name.clone();
            molecule.state = known.state.clone();
        }
    }
}

fn require_columns(record: &Record, expected: usize) -> Result<(), TableError> {
    if record.fields.len() < expected {
        return Err(TableError::MissingColumns {
            line: record.line,
            expected,
            found: record.fields.len(),
        });
    }
    Ok(())
}

fn parse_number<T>(record: &Record, index: usize, column: &'static str) -> Result<T, TableError>
where
    T: std::str::FromStr + Default,
{
    let value = record.field(index);
    if value.is_empty() {
        return Ok(T::default());
    }
    value.parse().map_err(|_| TableError::InvalidNumber {
        line: record.line,
        column,
        value: value.to_string(),
    })
}

fn non_empty(s: &str) -> Option<String> {
    (!s.is_empty()).then(|| s.to_string())
}

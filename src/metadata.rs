//! Result-container metadata touched by aggregation
//!
//! This module provides the small descriptive-metadata record that an
//! aggregator may adjust after a collapse: a name, a units string, and the
//! history of cell methods (which statistic was applied over which
//! coordinates). The surrounding cube container owns everything else.

use std::fmt;

/// Record of one statistic applied over one or more coordinates
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellMethod {
    /// Statistic name, e.g. "mean"
    pub method: String,
    /// Names of the coordinates the statistic was applied over
    pub coords: Vec<String>,
}

impl CellMethod {
    /// Create a new cell method record
    #[must_use]
    pub fn new(method: impl Into<String>, coords: &[String]) -> Self {
        Self {
            method: method.into(),
            coords: coords.to_vec(),
        }
    }
}

impl fmt::Display for CellMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.method, self.coords.join(", "))
    }
}

/// Descriptive metadata for an aggregation result container
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CubeMetadata {
    /// Quantity name, e.g. "air_temperature"
    pub name: Option<String>,
    /// Units string, e.g. "K"
    pub units: Option<String>,
    /// Cell methods accumulated across collapses, oldest first
    pub cell_methods: Vec<CellMethod>,
}

impl CubeMetadata {
    /// Empty metadata
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Metadata with a quantity name
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            units: None,
            cell_methods: Vec::new(),
        }
    }

    /// Builder-style setter for units
    #[must_use]
    pub fn with_units(mut self, units: impl Into<String>) -> Self {
        self.units = Some(units.into());
        self
    }

    /// Append a cell method record
    pub fn add_cell_method(&mut self, cell_method: CellMethod) {
        self.cell_methods.push(cell_method);
    }
}

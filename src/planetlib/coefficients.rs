//! Pre-parsed orbital series coefficient tables
//!
//! A table is indexed `[dimension][power][term]`, each term being
//! `[amplitude, phase, frequency]`. The power index is the exponent of
//! the time argument, so index 0 holds the constant-in-time terms. A
//! dimension may list fewer than [`MAX_POWERS`] powers.
//!
//! Tables serialize as the bare nested array, which is what an external
//! loader produces:
//!
//! ```rust
//! use ephemeris::planetlib::CoefficientTable;
//!
//! let json = "[[[[1.0, 0.0, 0.0]]], [], [[[0.5, 0.0, 0.0]]]]";
//! let table: CoefficientTable = serde_json::from_str(json).unwrap();
//! assert_eq!(table.term_count(), 2);
//! ```

use crate::{EphemerisError, Result};
use serde::{Deserialize, Serialize};

/// Spatial dimensions per table
pub const DIMENSIONS: usize = 3;
/// Highest supported number of time powers (t^0 .. t^5)
pub const MAX_POWERS: usize = 6;

/// One periodic term: `amplitude * cos(phase + frequency * t)`
pub type Term = [f64; 3];

type RawTable = Vec<Vec<Vec<Term>>>;

/// Validated, immutable coefficient table for one body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTable", into = "RawTable")]
pub struct CoefficientTable {
    dimensions: RawTable,
}

impl CoefficientTable {
    /// Validate and wrap a raw nested table
    ///
    /// Fails with [`EphemerisError::InvalidArgument`] unless there are
    /// exactly three dimensions, at most six powers each, and every value is
    /// finite.
    pub fn new(dimensions: RawTable) -> Result<Self> {
        if dimensions.len() != DIMENSIONS {
            return Err(EphemerisError::InvalidArgument(format!(
                "coefficient table has {} dimensions, expected {}",
                dimensions.len(),
                DIMENSIONS
            )));
        }
        for (dim, powers) in dimensions.iter().enumerate() {
            if powers.len() > MAX_POWERS {
                return Err(EphemerisError::InvalidArgument(format!(
                    "dimension {} has {} powers of time, at most {} are supported",
                    dim,
                    powers.len(),
                    MAX_POWERS
                )));
            }
            for (power, terms) in powers.iter().enumerate() {
                if let Some(index) = terms
                    .iter()
                    .position(|term| term.iter().any(|v| !v.is_finite()))
                {
                    return Err(EphemerisError::InvalidArgument(format!(
                        "non-finite coefficient at [{}][{}][{}]",
                        dim, power, index
                    )));
                }
            }
        }
        Ok(Self { dimensions })
    }

    /// Terms of `dimension`, one slice per power of time
    pub fn powers(&self, dimension: usize) -> &[Vec<Term>] {
        self.dimensions
            .get(dimension)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Total number of periodic terms across all dimensions and powers
    pub fn term_count(&self) -> usize {
        self.dimensions
            .iter()
            .flat_map(|powers| powers.iter())
            .map(Vec::len)
            .sum()
    }
}

impl TryFrom<RawTable> for CoefficientTable {
    type Error = EphemerisError;

    fn try_from(raw: RawTable) -> Result<Self> {
        CoefficientTable::new(raw)
    }
}

impl From<CoefficientTable> for RawTable {
    fn from(table: CoefficientTable) -> Self {
        table.dimensions
    }
}

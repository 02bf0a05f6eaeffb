// Chemical element identity used to index the cross-section tables.

use serde::{Deserialize, Serialize};

use crate::data;

/// Dense 0-based index over the distinct elements of the active material set.
///
/// Assigned by [`crate::material::Materials`] in order of first appearance;
/// the cross-section store keeps one grid per `ElementId` in the same order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementId(pub usize);

/// A chemical element present in the material configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub atomic_number: u32,
    pub symbol: String,
}

impl Element {
    /// Build from an atomic number in the tabulated range [1, 99].
    pub fn from_atomic_number(
        atomic_number: u32,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let symbol = data::atomic_symbol(atomic_number).ok_or_else(|| {
            format!(
                "atomic number {} is outside the tabulated range 1-{}",
                atomic_number,
                data::MAX_TABULATED_Z
            )
        })?;
        Ok(Element {
            atomic_number,
            symbol: symbol.to_string(),
        })
    }
}

// Cross-section store: builds the shared arena of per-element DCS grids and
// freezes it into mirrored host/device forms.

use crate::arena::{Arena, GridHandle, MemSpace};
use crate::element::ElementId;
use crate::reader::RawElementTable;

/// Mutable builder for the cross-section store.
///
/// Tables are appended in dense element id order; the handle recorded for the
/// n-th appended table belongs to `ElementId(n)`. Once every element is in,
/// [`XsTableBuilder::freeze`] produces the immutable mirrored forms and the
/// builder is consumed.
#[derive(Debug, Default)]
pub struct XsTableBuilder {
    arena: Arena,
    grids: Vec<GridHandle>,
}

impl XsTableBuilder {
    pub fn new() -> Self {
        XsTableBuilder {
            arena: Arena::new(),
            grids: Vec::new(),
        }
    }

    /// Append one element's raw table, preserving its row-major value layout.
    pub fn append_table(
        &mut self,
        table: &RawElementTable,
    ) -> Result<(), Box<dyn std::error::Error>> {
        table.validate()?;

        let x = self.arena.push_slice(&table.x);
        let y = self.arena.push_slice(&table.y);
        let values = self.arena.push_slice(&table.value);

        let handle = GridHandle { x, y, values };
        debug_assert!(handle.is_consistent(self.arena.len()));
        self.grids.push(handle);
        Ok(())
    }

    /// Number of tables appended so far.
    pub fn num_tables(&self) -> usize {
        self.grids.len()
    }

    /// Freeze into the immutable host + device pair.
    ///
    /// An empty builder is a configuration error: a model with no element
    /// tables cannot sample anything.
    pub fn freeze(self) -> Result<MirroredXsTables, Box<dyn std::error::Error>> {
        if self.grids.is_empty() {
            return Err("cross-section store built with no element tables".into());
        }

        let host = XsTables {
            space: MemSpace::Host,
            reals: self.arena.into_reals(),
            grids: self.grids,
        };
        // Deep copy: the device form owns its own storage, so the two frozen
        // forms can never alias even when both live in host memory here.
        let device = host.copy_to(MemSpace::Device);

        Ok(MirroredXsTables { host, device })
    }
}

/// A frozen, immutable set of per-element DCS grids in one memory space.
///
/// Handle encoding is identical in every space, so lookup code written
/// against an [`XsTablesView`] runs unchanged wherever the arena physically
/// resides.
#[derive(Debug, Clone, PartialEq)]
pub struct XsTables {
    space: MemSpace,
    reals: Vec<f64>,
    grids: Vec<GridHandle>,
}

impl XsTables {
    pub fn space(&self) -> MemSpace {
        self.space
    }

    /// Borrow a non-owning read-only view.
    pub fn as_view(&self) -> XsTablesView<'_> {
        XsTablesView {
            reals: &self.reals,
            grids: &self.grids,
        }
    }

    fn copy_to(&self, space: MemSpace) -> XsTables {
        XsTables {
            space,
            reals: self.reals.clone(),
            grids: self.grids.clone(),
        }
    }
}

/// Borrowed read-only view of a frozen table set.
///
/// This is the form the sampling code consumes; it is `Copy` and holds no
/// ownership, so any number of concurrent tasks can carry one.
#[derive(Debug, Clone, Copy)]
pub struct XsTablesView<'a> {
    pub reals: &'a [f64],
    pub grids: &'a [GridHandle],
}

impl<'a> XsTablesView<'a> {
    pub fn num_elements(&self) -> usize {
        self.grids.len()
    }

    pub fn grid(&self, element: ElementId) -> &'a GridHandle {
        &self.grids[element.0]
    }

    /// Log incident-energy axis for an element.
    pub fn x(&self, element: ElementId) -> &'a [f64] {
        self.grids[element.0].x.slice(self.reals)
    }

    /// Reduced photon energy ratio axis for an element.
    pub fn y(&self, element: ElementId) -> &'a [f64] {
        self.grids[element.0].y.slice(self.reals)
    }

    /// Row-major scaled DCS matrix for an element.
    pub fn values(&self, element: ElementId) -> &'a [f64] {
        self.grids[element.0].values.slice(self.reals)
    }
}

/// Host + device pair produced by freezing the builder.
///
/// Both forms hold identical numeric content and identical handle encodings;
/// mirroring is a deep copy, never a view.
#[derive(Debug, Clone)]
pub struct MirroredXsTables {
    host: XsTables,
    device: XsTables,
}

impl MirroredXsTables {
    pub fn host(&self) -> XsTablesView<'_> {
        self.host.as_view()
    }

    pub fn device(&self) -> XsTablesView<'_> {
        self.device.as_view()
    }

    pub fn host_tables(&self) -> &XsTables {
        &self.host
    }

    pub fn device_tables(&self) -> &XsTables {
        &self.device
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(nx: usize, ny: usize, scale: f64) -> RawElementTable {
        RawElementTable {
            x: (0..nx).map(|i| i as f64).collect(),
            y: (1..=ny).map(|j| j as f64 / ny as f64).collect(),
            value: (0..nx * ny).map(|k| scale * (k + 1) as f64).collect(),
        }
    }

    #[test]
    fn test_handle_count_and_value_lengths() {
        let tables = [table(3, 4, 1.0), table(2, 5, 2.0), table(4, 2, 0.5)];

        let mut builder = XsTableBuilder::new();
        for t in &tables {
            builder.append_table(t).unwrap();
        }
        assert_eq!(builder.num_tables(), 3);

        let mirrored = builder.freeze().unwrap();
        let view = mirrored.host();
        assert_eq!(view.num_elements(), 3);

        for (i, t) in tables.iter().enumerate() {
            let handle = view.grid(ElementId(i));
            assert_eq!(handle.values.len, t.x.len() * t.y.len());
            assert_eq!(view.x(ElementId(i)), t.x.as_slice());
            assert_eq!(view.y(ElementId(i)), t.y.as_slice());
            assert_eq!(view.values(ElementId(i)), t.value.as_slice());
        }
    }

    #[test]
    fn test_mirroring_is_deep_and_identical() {
        let mut builder = XsTableBuilder::new();
        builder.append_table(&table(3, 3, 1.5)).unwrap();
        let mirrored = builder.freeze().unwrap();

        assert_eq!(mirrored.host_tables().space(), MemSpace::Host);
        assert_eq!(mirrored.device_tables().space(), MemSpace::Device);

        // Identical numeric content and handle encoding in both spaces.
        assert_eq!(mirrored.host().reals, mirrored.device().reals);
        assert_eq!(mirrored.host().grids, mirrored.device().grids);

        // Deep copy: the two arenas are distinct allocations.
        assert_ne!(
            mirrored.host().reals.as_ptr(),
            mirrored.device().reals.as_ptr()
        );
    }

    #[test]
    fn test_empty_builder_is_fatal() {
        assert!(XsTableBuilder::new().freeze().is_err());
    }

    #[test]
    fn test_malformed_table_is_fatal() {
        let mut bad = table(3, 3, 1.0);
        bad.value.pop();
        let mut builder = XsTableBuilder::new();
        assert!(builder.append_table(&bad).is_err());
    }
}

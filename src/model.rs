// Bremsstrahlung model context: resolved particle ids, electron mass, and
// the frozen cross-section store. Built once per configuration, then shared
// read-only by every sampling task.

use crate::material::Materials;
use crate::particle::{pdg, ParticleId, ParticleRegistry};
use crate::reader::RawElementTable;
use crate::store::{MirroredXsTables, XsTableBuilder, XsTablesView};

/// Kinetic energy range this model applies to, in MeV. The surrounding
/// dispatch layer uses these to decide whether a track is handled here; the
/// sampler itself does not re-check them.
pub const MIN_APPLICABLE_ENERGY_MEV: f64 = 1.0;
pub const MAX_APPLICABLE_ENERGY_MEV: f64 = 1.0e5;

/// Upper end of the tabulated incident-energy range, MeV.
pub const MAX_TABLE_ENERGY_MEV: f64 = 1.0e5;

/// Identifier of a physics model within the surrounding dispatch layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ModelId(pub u32);

/// The particle species this model needs, resolved against the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BremsParticleIds {
    pub electron: ParticleId,
    pub positron: ParticleId,
    pub gamma: ParticleId,
}

/// One (species, kinetic energy range) pair the model is applicable to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Applicability {
    pub particle: ParticleId,
    /// Lower kinetic energy bound in MeV
    pub lower: f64,
    /// Upper kinetic energy bound in MeV
    pub upper: f64,
}

/// Immutable context shared by all bremsstrahlung sampling tasks.
#[derive(Debug)]
pub struct BremsModel {
    model_id: ModelId,
    ids: BremsParticleIds,
    electron_mass: f64,
    tables: MirroredXsTables,
}

impl BremsModel {
    /// Build the full context from the registries and a table loader.
    ///
    /// `load_table` is invoked exactly once per distinct element of the
    /// material set, in dense element id order; its results populate the
    /// cross-section store in the same order.
    pub fn new<F>(
        model_id: ModelId,
        particles: &ParticleRegistry,
        materials: &Materials,
        mut load_table: F,
    ) -> Result<Self, Box<dyn std::error::Error>>
    where
        F: FnMut(u32) -> Result<RawElementTable, Box<dyn std::error::Error>>,
    {
        let ids = BremsParticleIds {
            electron: particles.find(pdg::ELECTRON).ok_or(
                "electron, positron and gamma must all be enabled to use the \
                 bremsstrahlung model (electron is missing)",
            )?,
            positron: particles.find(pdg::POSITRON).ok_or(
                "electron, positron and gamma must all be enabled to use the \
                 bremsstrahlung model (positron is missing)",
            )?,
            gamma: particles.find(pdg::GAMMA).ok_or(
                "electron, positron and gamma must all be enabled to use the \
                 bremsstrahlung model (gamma is missing)",
            )?,
        };
        let electron_mass = particles.get(ids.electron).mass;
        if electron_mass <= 0.0 {
            return Err(
                format!("electron rest mass must be positive, got {}", electron_mass).into(),
            );
        }

        let mut builder = XsTableBuilder::new();
        for element in materials.iter_elements() {
            let table = load_table(element.atomic_number).map_err(|err| {
                format!(
                    "loading DCS table for {} (Z={}): {}",
                    element.symbol, element.atomic_number, err
                )
            })?;
            builder.append_table(&table).map_err(|err| {
                format!(
                    "DCS table for {} (Z={}): {}",
                    element.symbol, element.atomic_number, err
                )
            })?;
        }
        let tables = builder.freeze()?;
        debug_assert_eq!(tables.host().num_elements(), materials.num_elements());

        Ok(BremsModel {
            model_id,
            ids,
            electron_mass,
            tables,
        })
    }

    pub fn model_id(&self) -> ModelId {
        self.model_id
    }

    pub fn ids(&self) -> BremsParticleIds {
        self.ids
    }

    /// Electron rest-mass energy in MeV.
    pub fn electron_mass(&self) -> f64 {
        self.electron_mass
    }

    /// Table view for sampling on the host.
    pub fn host_tables(&self) -> XsTablesView<'_> {
        self.tables.host()
    }

    /// Table view staged for a device execution context.
    pub fn device_tables(&self) -> XsTablesView<'_> {
        self.tables.device()
    }

    /// Species and kinetic energy ranges this model handles.
    pub fn applicability(&self) -> [Applicability; 2] {
        [
            Applicability {
                particle: self.ids.electron,
                lower: MIN_APPLICABLE_ENERGY_MEV,
                upper: MAX_APPLICABLE_ENERGY_MEV,
            },
            Applicability {
                particle: self.ids.positron,
                lower: MIN_APPLICABLE_ENERGY_MEV,
                upper: MAX_APPLICABLE_ENERGY_MEV,
            },
        ]
    }
}

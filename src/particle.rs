// Particle definitions and the registry the model resolves species from.

use serde::{Deserialize, Serialize};

/// Electron rest-mass energy in MeV (CODATA).
pub const ELECTRON_REST_MASS_MEV: f64 = 0.510_998_946_1;

/// PDG Monte Carlo numbering for the species this model cares about.
pub mod pdg {
    pub const ELECTRON: i32 = 11;
    pub const POSITRON: i32 = -11;
    pub const GAMMA: i32 = 22;
}

/// Dense index of a particle species within a [`ParticleRegistry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParticleId(pub usize);

/// Definition of a single particle species.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticleDef {
    pub name: String,
    /// PDG Monte Carlo particle number
    pub pdg: i32,
    /// Rest-mass energy in MeV
    pub mass: f64,
    /// Charge in units of the elementary charge
    pub charge: f64,
}

/// Registry of the particle species enabled for a simulation.
///
/// Species are stored in insertion order; their positions are the dense
/// [`ParticleId`] values used everywhere else in the crate.
#[derive(Debug, Clone, Default)]
pub struct ParticleRegistry {
    defs: Vec<ParticleDef>,
}

impl ParticleRegistry {
    pub fn new(defs: Vec<ParticleDef>) -> Self {
        Self { defs }
    }

    /// Registry with electron, positron and gamma — the species every
    /// electromagnetic physics configuration enables.
    pub fn standard() -> Self {
        Self::new(vec![
            ParticleDef {
                name: "electron".to_string(),
                pdg: pdg::ELECTRON,
                mass: ELECTRON_REST_MASS_MEV,
                charge: -1.0,
            },
            ParticleDef {
                name: "positron".to_string(),
                pdg: pdg::POSITRON,
                mass: ELECTRON_REST_MASS_MEV,
                charge: 1.0,
            },
            ParticleDef {
                name: "gamma".to_string(),
                pdg: pdg::GAMMA,
                mass: 0.0,
                charge: 0.0,
            },
        ])
    }

    /// Find a species by its PDG number.
    pub fn find(&self, pdg_number: i32) -> Option<ParticleId> {
        self.defs
            .iter()
            .position(|def| def.pdg == pdg_number)
            .map(ParticleId)
    }

    pub fn get(&self, id: ParticleId) -> &ParticleDef {
        &self.defs[id.0]
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }
}

/// A secondary particle produced by an interaction.
///
/// Secondaries are written into caller-supplied bank slots; the sampler never
/// owns their storage beyond the call that fills them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Secondary {
    pub particle: ParticleId,
    /// Kinetic energy in MeV
    pub energy: f64,
    /// Unit direction of travel
    pub direction: [f64; 3],
}

impl Secondary {
    /// Placeholder value a bank slot holds between reservation and fill.
    pub fn unassigned() -> Self {
        Secondary {
            particle: ParticleId(usize::MAX),
            energy: 0.0,
            direction: [0.0, 0.0, 0.0],
        }
    }
}

// Material composition and the registry that assigns dense element ids.

use serde::{Deserialize, Serialize};

use crate::element::{Element, ElementId};

/// A homogeneous material described by its element composition.
///
/// Composition is a list of `(atomic number, atom fraction)` pairs. Fractions
/// are relative weights and need not sum to one; they are normalized where a
/// per-atom average is taken. The gamma production cut is the minimum photon
/// energy tracked as a discrete secondary in this material.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Material {
    pub name: Option<String>,
    pub material_id: Option<u32>,
    /// Composition as (atomic number, atom fraction) pairs
    pub elements: Vec<(u32, f64)>,
    /// Atom number density in atoms/cm^3
    pub atom_density: f64,
    /// Gamma production cut energy in MeV
    pub gamma_cut_energy: f64,
}

impl Material {
    pub fn new() -> Self {
        Material {
            name: None,
            material_id: None,
            elements: Vec::new(),
            atom_density: 0.0,
            gamma_cut_energy: 1e-3,
        }
    }

    /// Add an element to the composition with the given atom fraction.
    pub fn add_element(&mut self, atomic_number: u32, fraction: f64) {
        self.elements.push((atomic_number, fraction));
    }

    pub fn set_atom_density(&mut self, atoms_per_cm3: f64) {
        self.atom_density = atoms_per_cm3;
    }

    pub fn set_gamma_cut_energy(&mut self, cut_mev: f64) {
        self.gamma_cut_energy = cut_mev;
    }

    /// Electron number density in electrons/cm^3, assuming neutral atoms.
    pub fn electron_density(&self) -> f64 {
        let total_fraction: f64 = self.elements.iter().map(|&(_, f)| f).sum();
        if total_fraction <= 0.0 {
            return 0.0;
        }
        let z_per_atom: f64 = self
            .elements
            .iter()
            .map(|&(z, f)| z as f64 * f)
            .sum::<f64>()
            / total_fraction;
        self.atom_density * z_per_atom
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::new()
    }
}

/// Container for the materials of a simulation plus the dense element index
/// derived from them.
///
/// The distinct atomic numbers across all materials, in order of first
/// appearance, define the [`ElementId`] assignment. The cross-section store
/// is built in exactly this order so an `ElementId` doubles as the index of
/// an element's grid.
#[derive(Debug, Clone)]
pub struct Materials {
    materials: Vec<Material>,
    elements: Vec<Element>,
}

impl Materials {
    /// Build the registry, validating every material's composition.
    pub fn new(materials: Vec<Material>) -> Result<Self, Box<dyn std::error::Error>> {
        if materials.is_empty() {
            return Err("material set is empty".into());
        }

        let mut elements: Vec<Element> = Vec::new();
        for (index, material) in materials.iter().enumerate() {
            if material.elements.is_empty() {
                return Err(
                    format!("material {} has no elements", describe(material, index)).into(),
                );
            }
            if material.gamma_cut_energy <= 0.0 {
                return Err(format!(
                    "material {} has non-positive gamma cut energy {}",
                    describe(material, index),
                    material.gamma_cut_energy
                )
                .into());
            }
            for &(z, fraction) in &material.elements {
                if fraction <= 0.0 {
                    return Err(format!(
                        "material {} has non-positive fraction {} for Z={}",
                        describe(material, index),
                        fraction,
                        z
                    )
                    .into());
                }
                if !elements.iter().any(|el| el.atomic_number == z) {
                    elements.push(Element::from_atomic_number(z)?);
                }
            }
        }

        Ok(Materials {
            materials,
            elements,
        })
    }

    /// Number of distinct elements across all materials.
    pub fn num_elements(&self) -> usize {
        self.elements.len()
    }

    pub fn element(&self, id: ElementId) -> &Element {
        &self.elements[id.0]
    }

    /// Dense id for an atomic number, if it appears in any material.
    pub fn element_id(&self, atomic_number: u32) -> Option<ElementId> {
        self.elements
            .iter()
            .position(|el| el.atomic_number == atomic_number)
            .map(ElementId)
    }

    /// Iterate over the distinct elements in dense id order.
    pub fn iter_elements(&self) -> impl Iterator<Item = &Element> {
        self.elements.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Material> {
        self.materials.get(index)
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Material> {
        self.materials.iter()
    }
}

fn describe(material: &Material, index: usize) -> String {
    match &material.name {
        Some(name) => format!("'{}'", name),
        None => format!("#{}", index),
    }
}

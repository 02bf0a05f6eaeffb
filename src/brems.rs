// Bremsstrahlung interaction sampling from the tabulated scaled DCS.
//
// One call samples one emitted photon for an electron or positron track
// step. The incident particle's own post-interaction update (energy loss,
// possible demotion to a new track) belongs to the surrounding tracking
// loop, not to this sampler.

use rand::Rng;

use crate::angular;
use crate::bank::SecondaryBank;
use crate::element::ElementId;
use crate::grid;
use crate::material::Material;
use crate::model::{BremsModel, MAX_TABLE_ENERGY_MEV};
use crate::particle::{ParticleId, Secondary};

/// Classical electron radius in cm.
const CLASSICAL_ELECTRON_RADIUS_CM: f64 = 2.817_940_326_2e-13;
/// Reduced Compton wavelength of the electron in cm.
const REDUCED_COMPTON_WAVELENGTH_CM: f64 = 3.861_592_679_6e-11;
/// Migdal constant, 4 pi r_e lambdabar_C^2, in cm^3. Scales the dielectric
/// suppression of soft photon emission with the medium's electron density.
const MIGDAL_CONSTANT_CM3: f64 = 4.0
    * std::f64::consts::PI
    * CLASSICAL_ELECTRON_RADIUS_CM
    * REDUCED_COMPTON_WAVELENGTH_CM
    * REDUCED_COMPTON_WAVELENGTH_CM;

/// Outcome of one interaction call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Interaction {
    /// One photon was banked; the record is a copy of the filled slot.
    Spawned(Secondary),
    /// The bank had no capacity. Expected under resource pressure; the
    /// caller re-drives this track in a later pass.
    Failed,
}

impl Interaction {
    pub fn succeeded(&self) -> bool {
        matches!(self, Interaction::Spawned(_))
    }
}

/// Sample one bremsstrahlung emission for an electron or positron.
///
/// The incident species must be the model's electron or positron and its
/// kinetic energy must be positive with `direction` a unit vector; the
/// dispatch layer guarantees both, so violations are contract failures, not
/// recoverable errors. On bank exhaustion the call returns
/// [`Interaction::Failed`] before drawing any random numbers, so the RNG
/// stream of a failed call is untouched.
pub fn sample_bremsstrahlung<R: Rng>(
    model: &BremsModel,
    incident: ParticleId,
    kinetic_energy: f64,
    direction: &[f64; 3],
    element: ElementId,
    material: &Material,
    bank: &mut SecondaryBank,
    rng: &mut R,
) -> Interaction {
    let ids = model.ids();
    debug_assert!(
        incident == ids.electron || incident == ids.positron,
        "bremsstrahlung sampled for a species that is not electron or positron"
    );
    debug_assert!(kinetic_energy > 0.0);
    debug_assert!({
        let norm_sq: f64 = direction.iter().map(|c| c * c).sum();
        (norm_sq - 1.0).abs() < 1e-6
    });

    // Reserve the photon's slot first; without capacity there is nothing to
    // do and no side effect is allowed.
    let slot = match bank.try_reserve() {
        Some(slot) => slot,
        None => return Interaction::Failed,
    };

    // Effective sampling window. The dispatch layer never invokes this model
    // below threshold, so a degenerate window is a logic error here.
    let kinetic_energy_min = material.gamma_cut_energy.min(kinetic_energy);
    let kinetic_energy_max = MAX_TABLE_ENERGY_MEV.min(kinetic_energy);
    assert!(
        kinetic_energy_min > 0.0 && kinetic_energy_min < kinetic_energy_max,
        "degenerate sampling window [{}, {}] for incident energy {}",
        kinetic_energy_min,
        kinetic_energy_max,
        kinetic_energy
    );

    let gamma_energy = sample_energy_transfer(
        model,
        element,
        material,
        kinetic_energy,
        kinetic_energy_min,
        kinetic_energy_max,
        rng,
    );
    debug_assert!(gamma_energy.is_finite() && gamma_energy > 0.0);
    debug_assert!(gamma_energy <= kinetic_energy_max);

    let gamma_direction =
        angular::sample_photon_direction(model.electron_mass(), kinetic_energy, direction, rng);

    *slot = Secondary {
        particle: ids.gamma,
        energy: gamma_energy,
        direction: gamma_direction,
    };
    Interaction::Spawned(*slot)
}

/// Sample the emitted photon energy from the element's scaled DCS restricted
/// to `[kinetic_energy_min, kinetic_energy_max]`.
///
/// The transformed variable `u = ln(k^2 + d)` is drawn uniformly over the
/// window (d is the Migdal density correction, which suppresses soft photons
/// in dense media), then the candidate is accepted against the tabulated
/// scaled DCS with a rejection envelope that bounds the bilinear surface
/// over the allowed ratio span. Two canonical samples per attempt; the
/// envelope guarantees termination with probability 1.
fn sample_energy_transfer<R: Rng>(
    model: &BremsModel,
    element: ElementId,
    material: &Material,
    kinetic_energy: f64,
    kinetic_energy_min: f64,
    kinetic_energy_max: f64,
    rng: &mut R,
) -> f64 {
    let tables = model.host_tables();
    let handle = tables.grid(element);

    let total_energy = kinetic_energy + model.electron_mass();
    let density_correction =
        MIGDAL_CONSTANT_CM3 * material.electron_density() * total_energy * total_energy;

    let log_energy = kinetic_energy.ln();
    let u_min = (kinetic_energy_min * kinetic_energy_min + density_correction).ln();
    let u_range =
        (kinetic_energy_max * kinetic_energy_max + density_correction).ln() - u_min;

    let envelope = grid::max_over_y_span(
        handle,
        tables.reals,
        log_energy,
        kinetic_energy_min / kinetic_energy,
        kinetic_energy_max / kinetic_energy,
    );
    debug_assert!(envelope.is_finite() && envelope >= 0.0);

    loop {
        let u = u_min + rng.gen::<f64>() * u_range;
        let k_sq = u.exp() - density_correction;
        let k = k_sq
            .max(0.0)
            .sqrt()
            .clamp(kinetic_energy_min, kinetic_energy_max);

        let dcs = grid::interpolate_bilinear(handle, tables.reals, log_energy, k / kinetic_energy);
        if dcs >= rng.gen::<f64>() * envelope {
            return k;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::{Material, Materials};
    use crate::model::ModelId;
    use crate::particle::ParticleRegistry;
    use crate::reader::RawElementTable;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    // Scaled DCS falling off with the photon energy ratio, flat in energy.
    fn synthetic_table() -> RawElementTable {
        let x: Vec<f64> = vec![-6.907755, -2.302585, 0.0, 2.302585, 6.907755, 11.512925];
        let y: Vec<f64> = vec![0.025, 0.1, 0.3, 0.5, 0.7, 0.9, 1.0];
        let mut value = Vec::with_capacity(x.len() * y.len());
        for _ in 0..x.len() {
            for &ratio in &y {
                value.push(10.0 - 8.0 * ratio);
            }
        }
        RawElementTable { x, y, value }
    }

    fn copper_material() -> Material {
        let mut mat = Material::new();
        mat.name = Some("Cu".to_string());
        mat.add_element(29, 1.0);
        mat.set_atom_density(8.49e22);
        mat.set_gamma_cut_energy(0.01);
        mat
    }

    fn test_model() -> (BremsModel, Materials) {
        let particles = ParticleRegistry::standard();
        let materials = Materials::new(vec![copper_material()]).unwrap();
        let model = BremsModel::new(ModelId(0), &particles, &materials, |_| {
            Ok(synthetic_table())
        })
        .unwrap();
        (model, materials)
    }

    #[test]
    fn test_spawned_photon_within_window() {
        let (model, materials) = test_model();
        let material = materials.get(0).unwrap();
        let element = materials.element_id(29).unwrap();
        let mut rng = StdRng::seed_from_u64(42);

        for seed_round in 0..50 {
            let mut bank = SecondaryBank::with_capacity(1);
            let outcome = sample_bremsstrahlung(
                &model,
                model.ids().electron,
                10.0,
                &[0.0, 0.0, 1.0],
                element,
                material,
                &mut bank,
                &mut rng,
            );
            let secondary = match outcome {
                Interaction::Spawned(s) => s,
                Interaction::Failed => panic!("round {}: bank had capacity", seed_round),
            };

            assert_eq!(secondary.particle, model.ids().gamma);
            assert!(secondary.energy > 0.0 && secondary.energy <= 10.0);
            assert!(secondary.energy >= material.gamma_cut_energy.min(10.0));
            let norm: f64 = secondary
                .direction
                .iter()
                .map(|c| c * c)
                .sum::<f64>()
                .sqrt();
            assert!((norm - 1.0).abs() < 1e-9);
            assert_eq!(bank.len(), 1);
            assert_eq!(bank.pop().unwrap(), secondary);
        }
    }

    #[test]
    fn test_positron_is_accepted() {
        let (model, materials) = test_model();
        let material = materials.get(0).unwrap();
        let element = materials.element_id(29).unwrap();
        let mut bank = SecondaryBank::with_capacity(1);
        let mut rng = StdRng::seed_from_u64(9);

        let outcome = sample_bremsstrahlung(
            &model,
            model.ids().positron,
            5.0,
            &[1.0, 0.0, 0.0],
            element,
            material,
            &mut bank,
            &mut rng,
        );
        assert!(outcome.succeeded());
    }

    #[test]
    fn test_exhausted_bank_fails_without_consuming_rng() {
        let (model, materials) = test_model();
        let material = materials.get(0).unwrap();
        let element = materials.element_id(29).unwrap();
        let mut bank = SecondaryBank::with_capacity(0);

        let mut rng = StdRng::seed_from_u64(123);
        let mut untouched = StdRng::seed_from_u64(123);

        let outcome = sample_bremsstrahlung(
            &model,
            model.ids().electron,
            10.0,
            &[0.0, 0.0, 1.0],
            element,
            material,
            &mut bank,
            &mut rng,
        );

        assert_eq!(outcome, Interaction::Failed);
        assert!(bank.is_empty());
        // The failed call drew nothing from the stream.
        assert_eq!(rng.gen::<f64>(), untouched.gen::<f64>());
    }

    #[test]
    fn test_energy_transfer_respects_window() {
        let (model, materials) = test_model();
        let material = materials.get(0).unwrap();
        let element = materials.element_id(29).unwrap();
        let mut rng = StdRng::seed_from_u64(77);

        let kinetic_energy = 10.0;
        let kmin = material.gamma_cut_energy.min(kinetic_energy);
        let kmax = MAX_TABLE_ENERGY_MEV.min(kinetic_energy);
        for _ in 0..500 {
            let k = sample_energy_transfer(
                &model,
                element,
                material,
                kinetic_energy,
                kmin,
                kmax,
                &mut rng,
            );
            assert!(k.is_finite());
            assert!(k >= kmin && k <= kmax, "k = {}", k);
        }
    }

    #[test]
    fn test_energy_transfer_favors_soft_photons() {
        // The synthetic DCS falls with the ratio and the 1/k weighting of the
        // transformed draw strongly favors low k, so the sampled median must
        // sit well below the midpoint of the window.
        let (model, materials) = test_model();
        let material = materials.get(0).unwrap();
        let element = materials.element_id(29).unwrap();
        let mut rng = StdRng::seed_from_u64(2024);

        let mut samples: Vec<f64> = (0..2000)
            .map(|_| {
                sample_energy_transfer(&model, element, material, 10.0, 0.01, 10.0, &mut rng)
            })
            .collect();
        samples.sort_by(|a, b| a.partial_cmp(b).unwrap());
        let median = samples[samples.len() / 2];
        assert!(median < 1.0, "median = {}", median);
    }

    #[test]
    #[should_panic]
    fn test_degenerate_window_panics() {
        let (model, materials) = test_model();
        let material = materials.get(0).unwrap();
        let element = materials.element_id(29).unwrap();
        let mut bank = SecondaryBank::with_capacity(1);
        let mut rng = StdRng::seed_from_u64(5);

        // Incident energy below the production cut: window collapses.
        sample_bremsstrahlung(
            &model,
            model.ids().electron,
            0.005,
            &[0.0, 0.0, 1.0],
            element,
            material,
            &mut bank,
            &mut rng,
        );
    }
}

// Angular distribution sampling for bremsstrahlung photons.
//
// Tsai-type distribution (Rev Mod Phys 49, 421 (1977)) with the two-mode
// rejection mixture suggested by L. Urban (Geant3 manual (1993) Phys211).

use nalgebra::Vector3;
use rand::Rng;

/// Sample an emission direction for a bremsstrahlung photon.
///
/// `inc_mass` is the incident particle's rest-mass energy and `inc_energy`
/// its kinetic energy, both in MeV. The polar angle is sampled relative to
/// `inc_direction`; the azimuth is uniform. Consumes three canonical samples
/// per rejection attempt plus one for the azimuth.
pub fn sample_photon_direction<R: Rng>(
    inc_mass: f64,
    inc_energy: f64,
    inc_direction: &[f64; 3],
    rng: &mut R,
) -> [f64; 3] {
    assert!(
        inc_mass > 0.0 && inc_energy > 0.0,
        "angular sampler needs positive mass and kinetic energy, got mass={} energy={}",
        inc_mass,
        inc_energy
    );

    let umax = 2.0 * inc_energy / inc_mass;
    let mut u;
    loop {
        u = -(rng.gen::<f64>() * rng.gen::<f64>()).ln();
        u /= if rng.gen::<f64>() < 0.25 { 0.625 } else { 1.875 };
        if u <= umax {
            break;
        }
    }

    let cos_theta = 1.0 - 2.0 * (u / umax).powi(2);
    let phi = 2.0 * std::f64::consts::PI * rng.gen::<f64>();

    let dir = Vector3::from_row_slice(inc_direction);
    let rotated = rotate_to_polar_axis(&dir, cos_theta, phi);
    [rotated.x, rotated.y, rotated.z]
}

/// Rotate the local direction (sin θ cos φ, sin θ sin φ, cos θ) into the
/// frame whose polar axis is `axis`.
fn rotate_to_polar_axis(axis: &Vector3<f64>, cos_theta: f64, phi: f64) -> Vector3<f64> {
    let sin_theta = (1.0 - cos_theta * cos_theta).max(0.0).sqrt();

    // Build an orthonormal basis around the axis.
    let perp = if axis.x.abs() < 0.99 {
        Vector3::new(1.0, 0.0, 0.0).cross(axis).normalize()
    } else {
        Vector3::new(0.0, 1.0, 0.0).cross(axis).normalize()
    };
    let ortho = axis.cross(&perp);

    cos_theta * axis + sin_theta * phi.cos() * perp + sin_theta * phi.sin() * ortho
}

use crate::lattice::parameters::d2q9::{DIRECTION, Q};
use crate::lattice::Lattice;
use crate::linear_algebra::VectorOps;
use crate::node::Distribution;

use itertools::izip;
use rayon::prelude::*;

/// Reverse every directional link of a solid node in place.
pub fn bounce_back(distribution: &mut Distribution) {
    for link in 1..=Q / 2 {
        distribution.swap(link, link + Q / 2);
    }
}

/// Relax a liquid node towards equilibrium and add the external force.
///
/// `force_coefficient` is `dt / (6 e)`, the forcing term of link `i` being
/// `force_coefficient · (dir_i · force)`.
pub fn relax(
    distribution: &mut Distribution,
    equilibrium: &Distribution,
    inverse_relaxation: f32,
    force_coefficient: f32,
    force: &[f32; 2],
) {
    for (link, (f, f_eq)) in distribution.iter_mut().zip(equilibrium).enumerate() {
        *f -= inverse_relaxation * (*f - f_eq);
        if link > 0 {
            *f += force_coefficient * DIRECTION[link].dot_product(force);
        }
    }
}

/// Collide every node of the current arena in place.
pub fn collide(
    lattice: &Lattice,
    solid: &[bool],
    equilibrium: &[Distribution],
    inverse_relaxation: &[f32],
    force: &[[f32; 2]],
    distributions: &mut [Distribution],
) {
    let width = lattice.width();
    let force_coefficient = lattice.step_time() / (6.0 * lattice.e());
    (
        distributions.par_chunks_mut(width),
        solid.par_chunks(width),
        equilibrium.par_chunks(width),
        inverse_relaxation.par_chunks(width),
        force.par_chunks(width),
    )
        .into_par_iter()
        .for_each(|(distributions, solid, equilibrium, inverse_relaxation, force)| {
            for (f, solid, f_eq, omega, force) in
                izip!(distributions, solid, equilibrium, inverse_relaxation, force)
            {
                match solid {
                    true => bounce_back(f),
                    false => relax(f, f_eq, *omega, force_coefficient, force),
                }
            }
        });
}

//! Smagorinsky sub-grid closure.
//!
//! The non-equilibrium part of the distribution gives the momentum flux tensor
//! `Π = Σ (f_i − f_i^eq) c_i ⊗ c_i`, whose magnitude raises the local relaxation time:
//! `τ = ½ (τ0 + sqrt(τ0² + 18 Cs² |Π| / (e² h)))`.

use crate::lattice::parameters::d2q9::Q;
use crate::lattice::Lattice;
use crate::node::Distribution;

use itertools::izip;
use rayon::prelude::*;

#[derive(Clone, Copy, Debug)]
pub struct RelaxationParameters {
    /// Base relaxation time τ0.
    pub relaxation_time: f32,
    pub smagorinsky_constant: f32,
    /// Use the Smagorinsky adjusted relaxation time instead of τ0.
    pub apply_eddy_relaxation: bool,
}

/// Inverse of the eddy adjusted relaxation time of a liquid node.
pub fn inverse_eddy_relaxation_time(
    lattice: &Lattice,
    parameters: &RelaxationParameters,
    distribution: &Distribution,
    equilibrium: &Distribution,
    height: f32,
) -> f32 {
    let tau = parameters.relaxation_time;

    // the rest link has no non-equilibrium momentum flux
    let mut flux = [0.0f32; 4];
    for link in 1..Q {
        let non_equilibrium = distribution[link] - equilibrium[link];
        let [cx, cy] = lattice.link_vector(link);
        for (flux, cc) in izip!(&mut flux, [cx * cx, cx * cy, cy * cx, cy * cy]) {
            *flux += non_equilibrium * cc;
        }
    }
    let magnitude = flux.iter().map(|val| val * val).sum::<f32>().sqrt();

    let e = lattice.e();
    let cs = parameters.smagorinsky_constant;
    let turbulent = 18.0 * cs * cs * magnitude / (e * e * height);
    1.0 / (0.5 * (tau + (tau * tau + turbulent).sqrt()))
}

/// Per-node inverse relaxation time, zero on solid nodes.
pub fn compute_inverse_relaxation(
    lattice: &Lattice,
    parameters: &RelaxationParameters,
    solid: &[bool],
    distributions: &[Distribution],
    equilibrium: &[Distribution],
    height: &[f32],
    inverse_relaxation: &mut [f32],
) {
    let width = lattice.width();
    let base = 1.0 / parameters.relaxation_time;
    (
        inverse_relaxation.par_chunks_mut(width),
        solid.par_chunks(width),
        distributions.par_chunks(width),
        equilibrium.par_chunks(width),
        height.par_chunks(width),
    )
        .into_par_iter()
        .for_each(|(inverse_relaxation, solid, distributions, equilibrium, height)| {
            for (omega, solid, f, f_eq, h) in
                izip!(inverse_relaxation, solid, distributions, equilibrium, height)
            {
                *omega = match (solid, parameters.apply_eddy_relaxation) {
                    (true, _) => 0.0,
                    (false, false) => base,
                    (false, true) => inverse_eddy_relaxation_time(lattice, parameters, f, f_eq, *h),
                };
            }
        });
}

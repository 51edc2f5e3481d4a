use crate::lattice::{Lattice, FROUDE_LIMIT, GRAVITY, MIN_HEIGHT};
use crate::linear_algebra::VectorOps;
use crate::node::Distribution;

use itertools::izip;
use rayon::prelude::*;

/// Height and velocity of a liquid node from its streamed distributions.
///
/// * heights below [`MIN_HEIGHT`] are raised to it and the node is brought to rest,
/// * heights above the lattice maximum are capped by scaling the distributions (and
///   with them the momentum) down,
/// * velocities above the Froude limit are scaled back onto it.
pub fn recover_moments(lattice: &Lattice, distribution: &mut Distribution) -> (f32, [f32; 2]) {
    let mut height: f32 = distribution.iter().sum();
    let mut momentum = [0.0f32; 2];
    for (link, f) in distribution.iter().enumerate() {
        let c = lattice.link_vector(link);
        momentum[0] += f * c[0];
        momentum[1] += f * c[1];
    }

    if height < MIN_HEIGHT {
        return (MIN_HEIGHT, [0.0; 2]);
    }

    let max_height = lattice.max_height();
    if height > max_height {
        let scale = max_height / height;
        distribution.iter_mut().for_each(|f| *f *= scale);
        momentum = momentum.scale(scale);
        height = max_height;
    }

    let velocity = momentum.scale(1.0 / height);
    let speed = velocity.length();
    let wave_speed = (GRAVITY * height).sqrt();
    if speed / wave_speed >= FROUDE_LIMIT {
        return (height, velocity.scale(FROUDE_LIMIT * wave_speed / speed));
    }
    (height, velocity)
}

/// Recover the moments of every node from the staging arena. Solid nodes read as
/// empty and at rest.
pub fn recover(
    lattice: &Lattice,
    solid: &[bool],
    staging: &mut [Distribution],
    height: &mut [f32],
    velocity: &mut [[f32; 2]],
) {
    let width = lattice.width();
    (
        staging.par_chunks_mut(width),
        height.par_chunks_mut(width),
        velocity.par_chunks_mut(width),
        solid.par_chunks(width),
    )
        .into_par_iter()
        .for_each(|(staging, height, velocity, solid)| {
            for (f, h, u, solid) in izip!(staging, height, velocity, solid) {
                (*h, *u) = match solid {
                    true => (0.0, [0.0; 2]),
                    false => recover_moments(lattice, f),
                };
            }
        });
}

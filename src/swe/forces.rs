use crate::lattice::{Lattice, GRAVITY};
use crate::linear_algebra::VectorOps;

use itertools::izip;
use rayon::prelude::*;

/// Manning roughness of the channel bed
/// ([table](https://www.engineeringtoolbox.com/mannings-roughness-d_799.html)).
pub const BED_MANNING_COEFFICIENT: f32 = 0.025;

/// External force per unit area acting on a liquid node.
///
/// Gravity pulls the water down the bed slope. With `apply_shear_forces` a quadratic
/// bed friction term (Chezy coefficient from Manning's roughness) opposes the flow.
pub fn node_force(height: f32, velocity: &[f32; 2], bed_slope: &[f32; 2], apply_shear_forces: bool) -> [f32; 2] {
    let gravity = bed_slope.scale(-GRAVITY * height);
    if !apply_shear_forces {
        return gravity;
    }

    let chezy = height.powf(1.0 / 6.0) / BED_MANNING_COEFFICIENT;
    let bed_friction = GRAVITY / (chezy * chezy);
    let shear = velocity.scale(velocity.length() * bed_friction);
    [gravity[0] - shear[0], gravity[1] - shear[1]]
}

/// Recompute the force of every node, zero on solid nodes.
pub fn update_forces(
    lattice: &Lattice,
    bed_slope: &[f32; 2],
    apply_shear_forces: bool,
    solid: &[bool],
    height: &[f32],
    velocity: &[[f32; 2]],
    force: &mut [[f32; 2]],
) {
    let width = lattice.width();
    (
        force.par_chunks_mut(width),
        solid.par_chunks(width),
        height.par_chunks(width),
        velocity.par_chunks(width),
    )
        .into_par_iter()
        .for_each(|(force, solid, height, velocity)| {
            for (force, solid, h, u) in izip!(force, solid, height, velocity) {
                *force = match solid {
                    true => [0.0; 2],
                    false => node_force(*h, u, bed_slope, apply_shear_forces),
                };
            }
        });
}

use crate::lattice::parameters::d2q9::{self, Q};
use crate::lattice::{Lattice, GRAVITY};
use crate::linear_algebra::VectorOps;
use crate::node::Distribution;

use itertools::izip;
use rayon::prelude::*;

/// Coefficients of the `g h²/e²`, `h (c·u)/e²`, `h (c·u)²/e⁴` and `h |u|²/e²` terms
/// for axis aligned links.
const AXIS_COEFFICIENTS: [f32; 4] = [1.0 / 6.0, 1.0 / 3.0, 1.0 / 2.0, 1.0 / 6.0];

/// Same as [`AXIS_COEFFICIENTS`] for diagonal links.
const DIAGONAL_COEFFICIENTS: [f32; 4] = [1.0 / 24.0, 1.0 / 12.0, 1.0 / 8.0, 1.0 / 24.0];

/// Shallow water equilibrium distribution for a node of height `height` moving with
/// `velocity`.
pub fn equilibrium_distribution(lattice: &Lattice, height: f32, velocity: &[f32; 2]) -> Distribution {
    let e = lattice.e();
    let inverse_e_sq = 1.0 / (e * e);
    let inverse_e_qd = inverse_e_sq * inverse_e_sq;

    let gravity_height_sq = GRAVITY * height * height;
    let u_dot_u = velocity.dot_product(velocity);

    let mut result = [0.0; Q];
    result[0] = height
        - (5.0 / 6.0) * inverse_e_sq * gravity_height_sq
        - (2.0 / 3.0) * inverse_e_sq * height * u_dot_u;

    for (link, val) in result.iter_mut().enumerate().skip(1) {
        let c_dot_u = lattice.link_vector(link).dot_product(velocity);
        let [a, b, c, d] = match d2q9::is_axis_aligned(link) {
            true => AXIS_COEFFICIENTS,
            false => DIAGONAL_COEFFICIENTS,
        };
        *val = a * inverse_e_sq * gravity_height_sq + b * inverse_e_sq * height * c_dot_u
            + c * inverse_e_qd * height * c_dot_u * c_dot_u
            - d * inverse_e_sq * height * u_dot_u;
    }
    result
}

/// Recompute the equilibrium distribution of every liquid node. Solid nodes keep
/// whatever value they had.
pub fn compute_equilibrium(
    lattice: &Lattice,
    solid: &[bool],
    height: &[f32],
    velocity: &[[f32; 2]],
    equilibrium: &mut [Distribution],
) {
    let width = lattice.width();
    (
        equilibrium.par_chunks_mut(width),
        solid.par_chunks(width),
        height.par_chunks(width),
        velocity.par_chunks(width),
    )
        .into_par_iter()
        .for_each(|(equilibrium, solid, height, velocity)| {
            for (f_eq, solid, h, u) in izip!(equilibrium, solid, height, velocity) {
                if !solid {
                    *f_eq = equilibrium_distribution(lattice, *h, u);
                }
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::{assert_relative_eq, relative_eq};

    fn lattice() -> Lattice {
        Lattice::new(4, 4, 0.05, 0.016)
    }

    #[test]
    fn test_equilibrium_sums_to_height() {
        let lattice = lattice();
        for (h, u) in [
            (0.1, [0.0, 0.0]),
            (0.1, [0.5, 0.0]),
            (0.35, [-0.3, 0.2]),
            (0.9, [0.1, -0.7]),
        ] {
            let f_eq = equilibrium_distribution(&lattice, h, &u);
            let sum: f32 = f_eq.iter().sum();
            assert!(
                relative_eq!(sum, h, epsilon = 1e-5),
                "sum {sum} != height {h} for velocity {u:?}"
            );
        }
    }

    #[test]
    fn test_equilibrium_momentum_matches_velocity() {
        let lattice = lattice();
        let (h, u) = (0.2, [0.4, -0.25]);
        let f_eq = equilibrium_distribution(&lattice, h, &u);

        let mut momentum = [0.0f32; 2];
        for (link, f) in f_eq.iter().enumerate() {
            let c = lattice.link_vector(link);
            momentum[0] += f * c[0];
            momentum[1] += f * c[1];
        }
        assert_relative_eq!(momentum[0], h * u[0], epsilon = 1e-5);
        assert_relative_eq!(momentum[1], h * u[1], epsilon = 1e-5);
    }

    #[test]
    fn test_equilibrium_at_rest_is_isotropic() {
        let lattice = lattice();
        let f_eq = equilibrium_distribution(&lattice, 0.1, &[0.0, 0.0]);
        for link in [3, 5, 7] {
            assert_relative_eq!(f_eq[link], f_eq[1], epsilon = 1e-7);
        }
        for link in [4, 6, 8] {
            assert_relative_eq!(f_eq[link], f_eq[2], epsilon = 1e-7);
        }
        assert_relative_eq!(f_eq[1], 4.0 * f_eq[2], epsilon = 1e-7);
    }

    #[test]
    fn test_compute_equilibrium_skips_solid_nodes() {
        let lattice = lattice();
        let len = lattice.len();
        let mut solid = vec![false; len];
        solid[5] = true;
        let height = vec![0.1; len];
        let velocity = vec![[0.2, 0.0]; len];
        let mut equilibrium = vec![[-1.0; Q]; len];

        compute_equilibrium(&lattice, &solid, &height, &velocity, &mut equilibrium);

        assert_eq!(equilibrium[5], [-1.0; Q]);
        let expected = equilibrium_distribution(&lattice, 0.1, &[0.2, 0.0]);
        assert_eq!(equilibrium[0], expected);
        assert_eq!(equilibrium[len - 1], expected);
    }
}

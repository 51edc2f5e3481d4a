use crate::lattice::Lattice;
use crate::node::Distribution;

use rayon::prelude::*;

/// Pull every link from its upstream node in `current` into `staging`.
///
/// Slots whose upstream node lies outside a bounded lattice are left untouched. The
/// arena rotation clears them beforehand, and the boundary stage fills the ones that
/// matter.
pub fn stream(lattice: &Lattice, periodic: bool, current: &[Distribution], staging: &mut [Distribution]) {
    staging
        .par_chunks_mut(lattice.width())
        .enumerate()
        .for_each(|(row, staging)| {
            for (col, f) in staging.iter_mut().enumerate() {
                for (link, val) in f.iter_mut().enumerate() {
                    if let Some(source) = lattice.upstream(row, col, link, periodic) {
                        *val = current[source][link];
                    }
                }
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::lattice::parameters::d2q9::{OFFSET, Q};

    use approx::assert_relative_eq;

    #[test]
    fn test_links_move_one_node() {
        let lattice = Lattice::new(5, 5, 1.0, 1.0);
        let len = lattice.len();
        let center = lattice.index(2, 2);
        let mut current = vec![[0.0; Q]; len];
        current[center] = [1.0; Q];
        let mut staging = vec![[0.0; Q]; len];

        stream(&lattice, false, &current, &mut staging);

        for (link, [dx, dy]) in OFFSET.iter().enumerate() {
            let row = (2 + dy) as usize;
            let col = (2 + dx) as usize;
            assert_eq!(staging[lattice.index(row, col)][link], 1.0, "link {link}");
        }
        let total: f32 = staging.iter().flatten().sum();
        assert_eq!(total, Q as f32);
    }

    #[test]
    fn test_periodic_streaming_conserves_mass() {
        let lattice = Lattice::new(4, 3, 1.0, 1.0);
        let current: Vec<Distribution> = (0..lattice.len())
            .map(|i| std::array::from_fn(|link| (i * Q + link) as f32 * 0.01))
            .collect();
        let mut staging = vec![[0.0; Q]; lattice.len()];

        stream(&lattice, true, &current, &mut staging);

        let before: f32 = current.iter().flatten().sum();
        let after: f32 = staging.iter().flatten().sum();
        assert_relative_eq!(before, after, epsilon = 1e-3);
        // west edge pulls the east link from the east edge
        assert_eq!(staging[lattice.index(1, 0)][1], current[lattice.index(1, 3)][1]);
    }

    #[test]
    fn test_bounded_edges_leave_missing_links() {
        let lattice = Lattice::new(3, 3, 1.0, 1.0);
        let current = vec![[1.0; Q]; lattice.len()];
        let mut staging = vec![[0.0; Q]; lattice.len()];

        stream(&lattice, false, &current, &mut staging);

        let corner = staging[lattice.index(0, 0)];
        // links 1, 2, 3, 4 and 8 come from outside the lattice at the bottom-left corner
        assert_eq!(corner, [1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 0.0]);
        assert_eq!(staging[lattice.index(1, 1)], [1.0; Q]);
    }
}

use crate::lattice::parameters::d2q9::Q;
use crate::lattice::Lattice;

use rayon::prelude::*;

/// Height given to solid nodes with no liquid neighbor.
pub const DRY_SOLID_HEIGHT: f32 = -5.0;

/// Give every interior solid node the mean height of its liquid neighbors so renderers
/// see a continuous surface. Reads the heights as they were before the fill.
pub fn flood_solid_heights(lattice: &Lattice, solid: &[bool], height: &mut [f32]) {
    let source = height.to_vec();
    let rows = lattice.height();
    let cols = lattice.width();

    height
        .par_chunks_mut(cols)
        .enumerate()
        .filter(|(row, _)| *row > 0 && *row + 1 < rows)
        .for_each(|(row, height)| {
            for (col, h) in height.iter_mut().enumerate().take(cols - 1).skip(1) {
                if !solid[lattice.index(row, col)] {
                    continue;
                }
                let (sum, count) = (1..Q)
                    .filter_map(|link| lattice.neighbor(row, col, link, false))
                    .filter(|&neighbor| !solid[neighbor])
                    .fold((0.0, 0), |(sum, count), neighbor| (sum + source[neighbor], count + 1));
                *h = match count {
                    0 => DRY_SOLID_HEIGHT,
                    count => sum / count as f32,
                };
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn test_solid_node_takes_mean_of_liquid_neighbors() {
        let lattice = Lattice::new(4, 4, 1.0, 1.0);
        let mut solid = vec![false; lattice.len()];
        let center = lattice.index(1, 1);
        solid[center] = true;
        solid[lattice.index(2, 2)] = true;
        let mut height: Vec<f32> = (0..lattice.len()).map(|i| i as f32 * 0.01).collect();
        height[center] = 0.0;
        height[lattice.index(2, 2)] = 0.0;

        flood_solid_heights(&lattice, &solid, &mut height);

        // liquid neighbors of (1, 1) are 0, 1, 2, 4, 6, 8 and 9
        let mean = |indices: &[usize]| {
            indices.iter().map(|&i| i as f32 * 0.01).sum::<f32>() / indices.len() as f32
        };
        assert_relative_eq!(height[center], mean(&[0, 1, 2, 4, 6, 8, 9]), epsilon = 1e-6);
        assert_relative_eq!(
            height[lattice.index(2, 2)],
            mean(&[6, 7, 9, 11, 13, 14, 15]),
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_enclosed_solid_node_gets_sentinel() {
        let lattice = Lattice::new(5, 5, 1.0, 1.0);
        let mut solid = vec![false; lattice.len()];
        for row in 1..4 {
            for col in 1..4 {
                solid[lattice.index(row, col)] = true;
            }
        }
        let mut height = vec![0.1; lattice.len()];

        flood_solid_heights(&lattice, &solid, &mut height);

        assert_eq!(height[lattice.index(2, 2)], DRY_SOLID_HEIGHT);
        assert_relative_eq!(height[lattice.index(1, 1)], 0.1, epsilon = 1e-6);
    }

    #[test]
    fn test_edge_nodes_untouched() {
        let lattice = Lattice::new(3, 3, 1.0, 1.0);
        let solid = vec![true; lattice.len()];
        let mut height = vec![0.0; lattice.len()];

        flood_solid_heights(&lattice, &solid, &mut height);

        assert_eq!(height[lattice.index(1, 1)], DRY_SOLID_HEIGHT);
        assert_eq!(height[0], 0.0);
        assert_eq!(height[lattice.len() - 1], 0.0);
    }
}

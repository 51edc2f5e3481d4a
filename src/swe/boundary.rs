//! Inlet (column 0) and outlet (last column) boundary conditions.
//!
//! Streaming leaves the links pointing into the lattice unset on these columns. The
//! schemes below fill them in after moment recovery, then pin the macroscopic state of
//! the boundary node. Solid nodes are never touched.

use crate::config::BoundaryScheme;
use crate::lattice::Lattice;
use crate::node::Distribution;
use crate::swe::equilibrium::equilibrium_distribution;

/// Prescribed inlet state.
#[derive(Clone, Copy, Debug)]
pub struct Inlet {
    pub height: f32,
    pub velocity: [f32; 2],
}

/// Mutable node state the boundary stage operates on.
pub struct BoundaryNodes<'a> {
    pub solid: &'a [bool],
    pub distributions: &'a mut [Distribution],
    pub height: &'a mut [f32],
    pub velocity: &'a mut [[f32; 2]],
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Edge {
    Bottom,
    Interior,
    Top,
}

impl Edge {
    fn of(lattice: &Lattice, row: usize) -> Self {
        match row {
            0 => Edge::Bottom,
            row if row + 1 == lattice.height() => Edge::Top,
            _ => Edge::Interior,
        }
    }

    /// Row of the node the boundary reads from.
    fn source_row(self, row: usize) -> usize {
        match self {
            Edge::Bottom => row + 1,
            Edge::Interior => row,
            Edge::Top => row - 1,
        }
    }
}

/// Links copied by the zero gradient inlet.
fn zero_gradient_inflow_links(edge: Edge) -> &'static [usize] {
    match edge {
        Edge::Bottom => &[1, 2, 3, 4, 8],
        Edge::Interior => &[1, 2, 8],
        Edge::Top => &[1, 2, 6, 7, 8],
    }
}

/// Links copied by the zero gradient outlet.
fn zero_gradient_outflow_links(edge: Edge) -> &'static [usize] {
    match edge {
        Edge::Bottom => &[2, 3, 4, 5, 6],
        Edge::Interior => &[4, 5, 6],
        Edge::Top => &[4, 5, 6, 7, 8],
    }
}

/// Apply the inlet scheme to column 0.
pub fn apply_inflow(lattice: &Lattice, scheme: BoundaryScheme, inlet: &Inlet, nodes: &mut BoundaryNodes) {
    if scheme.is_periodic() {
        return;
    }
    for row in 0..lattice.height() {
        let index = lattice.index(row, 0);
        if nodes.solid[index] {
            continue;
        }
        let edge = Edge::of(lattice, row);
        let source = lattice.index(edge.source_row(row), 1);

        match scheme {
            BoundaryScheme::ZeroGradient => {
                if nodes.solid[source] {
                    continue;
                }
                for &link in zero_gradient_inflow_links(edge) {
                    nodes.distributions[index][link] = nodes.distributions[source][link];
                }
                nodes.height[index] = inlet.height;
                nodes.velocity[index] = inlet.velocity;
            }
            BoundaryScheme::ZouHe => {
                let f = &mut nodes.distributions[index];
                match edge {
                    Edge::Interior => {
                        zou_he_inflow(lattice, f, inlet);
                        nodes.velocity[index] = [inlet.velocity[0], 0.0];
                    }
                    corner => {
                        let target = match nodes.solid[source] {
                            true => inlet.height,
                            false => nodes.height[source],
                        };
                        zou_he_inflow_corner(f, corner, target);
                        nodes.velocity[index] = [0.0; 2];
                    }
                }
                nodes.height[index] = inlet.height;
            }
            BoundaryScheme::Periodic => {}
        }
    }
}

/// Apply the outlet scheme to the last column.
pub fn apply_outflow(lattice: &Lattice, scheme: BoundaryScheme, nodes: &mut BoundaryNodes) {
    if scheme.is_periodic() {
        return;
    }
    let last = lattice.width() - 1;
    for row in 0..lattice.height() {
        let index = lattice.index(row, last);
        let edge = Edge::of(lattice, row);
        let source = lattice.index(edge.source_row(row), last - 1);
        if nodes.solid[index] {
            continue;
        }
        // a node shadowed by an obstacle extrapolates from its own recovered state
        let shadowed = nodes.solid[source];
        let (source_height, source_velocity) = match shadowed {
            true => (nodes.height[index], nodes.velocity[index]),
            false => (nodes.height[source], nodes.velocity[source]),
        };

        match scheme {
            BoundaryScheme::ZeroGradient => {
                let fallback = shadowed
                    .then(|| equilibrium_distribution(lattice, source_height, &source_velocity));
                for &link in zero_gradient_outflow_links(edge) {
                    nodes.distributions[index][link] = match fallback {
                        Some(f_eq) => f_eq[link],
                        None => nodes.distributions[source][link],
                    };
                }
                nodes.height[index] = source_height;
                nodes.velocity[index] = source_velocity;
            }
            BoundaryScheme::ZouHe => {
                let f = &mut nodes.distributions[index];
                match edge {
                    Edge::Interior => {
                        zou_he_outflow(lattice, f, source_height, source_velocity[0]);
                        nodes.velocity[index] = [source_velocity[0], 0.0];
                    }
                    corner => {
                        zou_he_outflow_corner(f, corner, source_height);
                        nodes.velocity[index] = [0.0; 2];
                    }
                }
                nodes.height[index] = source_height;
            }
            BoundaryScheme::Periodic => {}
        }
    }
}

/// Solve the east-pointing links from the prescribed inlet flux.
fn zou_he_inflow(lattice: &Lattice, f: &mut Distribution, inlet: &Inlet) {
    let flux = inlet.height * inlet.velocity[0] / lattice.e();
    let transverse = 0.5 * (f[7] - f[3]);
    f[1] = f[5] + (2.0 / 3.0) * flux;
    f[2] = f[6] + (1.0 / 6.0) * flux + transverse;
    f[8] = f[4] + (1.0 / 6.0) * flux - transverse;
}

/// Solve the west-pointing links from the outgoing flux of the interior neighbor.
fn zou_he_outflow(lattice: &Lattice, f: &mut Distribution, height: f32, velocity: f32) {
    let flux = height * velocity / lattice.e();
    let transverse = 0.5 * (f[7] - f[3]);
    f[5] = f[1] - (2.0 / 3.0) * flux;
    f[4] = f[8] - (1.0 / 6.0) * flux + transverse;
    f[6] = f[2] - (1.0 / 6.0) * flux - transverse;
}

/// Bounce the known links back and split the remaining mass between the two
/// unresolved diagonals so the node holds `target` height at rest.
fn zou_he_inflow_corner(f: &mut Distribution, edge: Edge, target: f32) {
    match edge {
        Edge::Bottom => {
            f[1] = f[5];
            f[2] = f[6];
            f[3] = f[7];
            split_diagonals(f, [4, 8], target);
        }
        Edge::Top => {
            f[1] = f[5];
            f[7] = f[3];
            f[8] = f[4];
            split_diagonals(f, [2, 6], target);
        }
        Edge::Interior => {}
    }
}

fn zou_he_outflow_corner(f: &mut Distribution, edge: Edge, target: f32) {
    match edge {
        Edge::Bottom => {
            f[3] = f[7];
            f[4] = f[8];
            f[5] = f[1];
            split_diagonals(f, [2, 6], target);
        }
        Edge::Top => {
            f[5] = f[1];
            f[6] = f[2];
            f[7] = f[3];
            split_diagonals(f, [4, 8], target);
        }
        Edge::Interior => {}
    }
}

fn split_diagonals(f: &mut Distribution, links: [usize; 2], target: f32) {
    let known: f32 = f
        .iter()
        .enumerate()
        .filter(|(link, _)| !links.contains(link))
        .map(|(_, val)| val)
        .sum();
    let share = 0.5 * (target - known);
    for link in links {
        f[link] = share;
    }
}

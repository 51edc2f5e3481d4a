//! Lattice Boltzmann shallow water solver on a D2Q9 lattice.
//!
//! One [`Swe::iterate`] advances the state by a single step:
//!
//! 1. eddy adjusted inverse relaxation time (per node),
//! 2. collision with bed forcing, bounce-back on solid nodes,
//! 3. streaming into the staging arena,
//! 4. moment recovery with height and Froude clamps,
//! 5. inlet then outlet boundary conditions,
//! 6. optional flood fill of solid heights,
//! 7. equilibrium and forces for the next step, in parallel with the arena rotation.

pub mod boundary;
pub mod collision;
pub mod eddy;
pub mod equilibrium;
pub mod flood;
pub mod forces;
pub mod moments;
pub mod streaming;

use crate::config::{BoundaryScheme, Config};
use crate::error::Result;
use crate::lattice::Lattice;
use crate::node::{copy_buffer, NodeBuffers};

use boundary::{BoundaryNodes, Inlet};
use eddy::RelaxationParameters;

use itertools::izip;

/// Immutable per-simulation parameters derived from a [`Config`].
#[derive(Clone, Copy, Debug)]
pub struct Parameters {
    pub relaxation: RelaxationParameters,
    pub bed_slope: [f32; 2],
    pub apply_shear_forces: bool,
    pub boundary: BoundaryScheme,
    pub inlet: Inlet,
    pub flood_solid_heights: bool,
}

impl Parameters {
    pub fn new(config: &Config, lattice: &Lattice) -> Self {
        Self {
            relaxation: RelaxationParameters {
                relaxation_time: config.relaxation_time,
                smagorinsky_constant: config.smagorinsky_constant,
                apply_eddy_relaxation: config.apply_eddy_relaxation,
            },
            bed_slope: config.bed_slope,
            apply_shear_forces: config.apply_shear_forces,
            boundary: config.boundary,
            inlet: Inlet {
                height: config.initial_height(lattice),
                velocity: config.initial_velocity(lattice),
            },
            flood_solid_heights: config.flood_solid_heights,
        }
    }
}

/// Solver state: lattice, parameters and every per-node buffer.
pub struct Swe {
    lattice: Lattice,
    parameters: Parameters,
    nodes: NodeBuffers,
}

impl Swe {
    /// Create a solver with every liquid node at the inlet state and in equilibrium.
    pub fn new(config: &Config) -> Result<Self> {
        config.validate()?;
        let lattice = config.lattice();
        let parameters = Parameters::new(config, &lattice);
        let mut nodes = NodeBuffers::new(lattice.len());

        if config.solid_rails {
            let last = lattice.height() - 1;
            for col in 0..lattice.width() {
                nodes.solid[lattice.index(0, col)] = true;
                nodes.solid[lattice.index(last, col)] = true;
            }
        }
        for (solid, h, u) in izip!(&nodes.solid, &mut nodes.height, &mut nodes.velocity) {
            if !solid {
                *h = parameters.inlet.height;
                *u = parameters.inlet.velocity;
            }
        }

        let mut swe = Self {
            lattice,
            parameters,
            nodes,
        };
        swe.update_equilibrium_and_forces();
        let NodeBuffers {
            distributions,
            equilibrium,
            ..
        } = &mut swe.nodes;
        copy_buffer(equilibrium.as_slice(), distributions.current_mut())?;
        Ok(swe)
    }

    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    pub fn nodes(&self) -> &NodeBuffers {
        &self.nodes
    }

    /// Mark every node set in `mask` solid. Returns the number of newly solid nodes.
    pub fn apply_solid_mask(&mut self, mask: &[bool]) -> usize {
        let mut added = 0;
        for (index, &solid) in mask.iter().enumerate().take(self.nodes.len()) {
            if solid && !self.nodes.solid[index] {
                self.nodes.make_solid(index);
                added += 1;
            }
        }
        added
    }

    /// Advance the state by one step.
    pub fn iterate(&mut self) {
        let Self {
            lattice,
            parameters,
            nodes,
        } = self;
        let NodeBuffers {
            solid,
            distributions,
            equilibrium,
            inverse_relaxation,
            height,
            velocity,
            force,
        } = nodes;

        eddy::compute_inverse_relaxation(
            lattice,
            &parameters.relaxation,
            solid,
            distributions.current(),
            equilibrium,
            height,
            inverse_relaxation,
        );
        collision::collide(
            lattice,
            solid,
            equilibrium,
            inverse_relaxation,
            force,
            distributions.current_mut(),
        );
        {
            let (current, staging) = distributions.split_mut();
            streaming::stream(lattice, parameters.boundary.is_periodic(), current, staging);
        }
        moments::recover(lattice, solid, distributions.staging_mut(), height, velocity);

        let mut boundary_nodes = BoundaryNodes {
            solid,
            distributions: distributions.staging_mut(),
            height,
            velocity,
        };
        boundary::apply_inflow(
            lattice,
            parameters.boundary,
            &parameters.inlet,
            &mut boundary_nodes,
        );
        boundary::apply_outflow(lattice, parameters.boundary, &mut boundary_nodes);

        if parameters.flood_solid_heights {
            flood::flood_solid_heights(lattice, solid, height);
        }

        let (lattice, parameters) = (&*lattice, &*parameters);
        let (solid, height, velocity) = (&*solid, &*height, &*velocity);
        rayon::join(
            || {
                equilibrium::compute_equilibrium(lattice, solid, height, velocity, equilibrium);
                forces::update_forces(
                    lattice,
                    &parameters.bed_slope,
                    parameters.apply_shear_forces,
                    solid,
                    height,
                    velocity,
                    force,
                );
            },
            || distributions.rotate(),
        );
    }

    fn update_equilibrium_and_forces(&mut self) {
        let NodeBuffers {
            solid,
            equilibrium,
            height,
            velocity,
            force,
            ..
        } = &mut self.nodes;
        equilibrium::compute_equilibrium(&self.lattice, solid, height, velocity, equilibrium);
        forces::update_forces(
            &self.lattice,
            &self.parameters.bed_slope,
            self.parameters.apply_shear_forces,
            solid,
            height,
            velocity,
            force,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config {
            width: 8,
            height: 6,
            ..Config::default()
        }
    }

    #[test]
    fn test_new_paints_rails_and_starts_in_equilibrium() {
        let swe = Swe::new(&config()).expect("valid configuration");
        let lattice = *swe.lattice();
        let nodes = swe.nodes();

        for col in 0..lattice.width() {
            assert!(nodes.solid[lattice.index(0, col)]);
            assert!(nodes.solid[lattice.index(lattice.height() - 1, col)]);
            assert_eq!(nodes.height[lattice.index(0, col)], 0.0);
        }
        let index = lattice.index(2, 3);
        assert!(!nodes.solid[index]);
        assert_eq!(nodes.height[index], 0.1);
        assert_eq!(nodes.distributions.current()[index], nodes.equilibrium[index]);
        assert!(nodes.force[index][0] > 0.0, "bed slope drives the flow east");
    }

    #[test]
    fn test_new_rejects_invalid_configuration() {
        let config = Config {
            height: 1,
            ..config()
        };
        assert!(Swe::new(&config).is_err());
    }

    #[test]
    fn test_iterate_rotates_arenas_and_keeps_rails() {
        let mut swe = Swe::new(&config()).expect("valid configuration");
        swe.iterate();
        let lattice = *swe.lattice();
        let nodes = swe.nodes();

        assert_eq!(nodes.distributions.generation(), 1);
        assert!(nodes.distributions.staging().iter().flatten().all(|&f| f == 0.0));
        for col in 0..lattice.width() {
            assert_eq!(nodes.height[lattice.index(0, col)], 0.0);
        }
        for &h in nodes.height[lattice.width()..lattice.len() - lattice.width()].iter() {
            assert!(h.is_finite() && h > 0.0);
        }
    }

    #[test]
    fn test_apply_solid_mask_counts_new_nodes() {
        let mut swe = Swe::new(&config()).expect("valid configuration");
        let mut mask = swe.nodes().solid.clone();
        let index = swe.lattice().index(2, 2);
        mask[index] = true;

        assert_eq!(swe.apply_solid_mask(&mask), 1);
        assert_eq!(swe.apply_solid_mask(&mask), 0);
        assert!(swe.nodes().solid[index]);
        assert_eq!(swe.nodes().height[index], 0.0);
    }
}

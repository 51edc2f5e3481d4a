//! Simulation configuration.
//!
//! A `Config` is an immutable value handed to [`crate::Simulation::new`]. The defaults
//! reproduce a 65 × 193 channel with a gentle bed slope feeding a Zou-He inlet.

use crate::error::ConfigError;
use crate::lattice::{Lattice, FROUDE_LIMIT, GRAVITY};

use serde::{Deserialize, Serialize};

/// Boundary schemes for the inlet (column 0) and the outlet (last column).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoundaryScheme {
    /// Streaming wraps around both axes, no inlet or outlet.
    Periodic,
    /// Missing distributions are copied from the adjacent interior column.
    ZeroGradient,
    /// Missing distributions are solved from local mass and momentum balance.
    #[default]
    #[serde(alias = "ZhouHe")]
    ZouHe,
}

impl BoundaryScheme {
    pub fn is_periodic(&self) -> bool {
        matches!(self, BoundaryScheme::Periodic)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Nodes per row.
    pub width: usize,
    /// Rows.
    pub height: usize,
    /// Lattice spacing (m).
    pub spacing: f32,
    /// Simulation step time (s).
    pub step_time: f32,
    /// Base BGK relaxation time τ0.
    pub relaxation_time: f32,
    /// Adjust the relaxation time per node with the Smagorinsky closure.
    pub apply_eddy_relaxation: bool,
    /// Smagorinsky constant Cs.
    pub smagorinsky_constant: f32,
    /// Bed slope (dz/dx, dz/dy).
    pub bed_slope: [f32; 2],
    /// Add Manning bed friction to the forcing term.
    pub apply_shear_forces: bool,
    pub boundary: BoundaryScheme,
    /// Starting water height, also the inlet height.
    pub initial_height: f32,
    /// Starting velocity, also the inlet velocity. Derived from the lattice when `None`.
    pub initial_velocity: Option<[f32; 2]>,
    /// Make the top and bottom rows solid.
    pub solid_rails: bool,
    /// Fill solid node heights with the mean of their liquid neighbors after each tick.
    /// Visualization only.
    pub flood_solid_heights: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: 65,
            height: 193,
            spacing: 0.05,
            step_time: 0.016,
            relaxation_time: 0.51,
            apply_eddy_relaxation: true,
            smagorinsky_constant: 0.18,
            bed_slope: [-0.005, 0.0],
            apply_shear_forces: false,
            boundary: BoundaryScheme::ZouHe,
            initial_height: 0.1,
            initial_velocity: None,
            solid_rails: true,
            flood_solid_heights: false,
        }
    }
}

impl Config {
    /// Parse a configuration from JSON. Missing fields take their default value.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the configuration for mistakes that would make the simulation meaningless.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width < 3 || self.height < 3 {
            return Err(ConfigError::LatticeTooSmall {
                width: self.width,
                height: self.height,
            });
        }
        for (name, value) in [
            ("spacing", self.spacing),
            ("step_time", self.step_time),
            ("initial_height", self.initial_height),
        ] {
            if !(value > 0.0) {
                return Err(ConfigError::NonPositive(name));
            }
        }
        if !(self.relaxation_time > 0.5) {
            return Err(ConfigError::RelaxationTimeTooSmall(self.relaxation_time));
        }
        if self.smagorinsky_constant < 0.0 {
            return Err(ConfigError::Negative("smagorinsky_constant"));
        }
        if let (BoundaryScheme::ZouHe, Some([_, uy])) = (self.boundary, self.initial_velocity) {
            if uy != 0.0 {
                return Err(ConfigError::TangentialInletVelocity(uy));
            }
        }

        let lattice = self.lattice();
        let [ux, uy] = self.initial_velocity(&lattice);
        let speed = ux.hypot(uy);
        if !(speed < lattice.max_speed()) {
            return Err(ConfigError::InletTooFast {
                speed,
                max_speed: lattice.max_speed(),
            });
        }
        let froude = speed / (GRAVITY * self.initial_height(&lattice)).sqrt();
        if !(froude < FROUDE_LIMIT) {
            return Err(ConfigError::SupercriticalInlet(froude));
        }
        Ok(())
    }

    /// Lattice described by this configuration.
    pub fn lattice(&self) -> Lattice {
        Lattice::new(self.width, self.height, self.spacing, self.step_time)
    }

    /// Starting height, capped to the lattice's maximum height.
    pub fn initial_height(&self, lattice: &Lattice) -> f32 {
        self.initial_height.min(lattice.max_height())
    }

    /// Starting velocity. Without an explicit value the flow starts at a fraction of
    /// the maximum speed proportional to how full the lattice is.
    pub fn initial_velocity(&self, lattice: &Lattice) -> [f32; 2] {
        self.initial_velocity.unwrap_or_else(|| {
            [
                (self.initial_height(lattice) / lattice.max_height()) * lattice.max_speed()
                    / std::f32::consts::SQRT_2,
                0.0,
            ]
        })
    }
}

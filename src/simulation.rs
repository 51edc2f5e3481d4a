//! Step scheduling, deferred obstacle edits and snapshot publication.
//!
//! A tick is split in two phases so a caller can overlap the solver with its own work:
//! [`Simulation::begin_tick`] hands the solver state to a rayon worker and returns at
//! once, [`Simulation::complete_tick`] waits for it and publishes a [`Snapshot`].
//! Obstacle edits made while a tick is in flight are buffered and merged before the
//! next tick starts, so a running tick never sees a half-applied edit.

use crate::config::Config;
use crate::error::{Result, SimulationError};
use crate::lattice::Lattice;
use crate::object::{Object, PLUS_BRUSH};
use crate::sampling;
use crate::snapshot::Snapshot;
use crate::swe::Swe;

use itertools::iproduct;
use log::{debug, info, trace};

use std::sync::mpsc::{self, Receiver};

type Listener = Box<dyn FnMut(&Snapshot) + Send>;

pub struct Simulation {
    config: Config,
    lattice: Lattice,
    /// Solver state, `None` while a tick is in flight.
    state: Option<Swe>,
    in_flight: Option<Receiver<Swe>>,
    /// Solid mask the next tick starts from.
    pending_solid: Vec<bool>,
    pending_edits: usize,
    generation: u64,
    snapshot: Snapshot,
    listener: Option<Listener>,
}

impl Simulation {
    /// Build the lattice, paint the rails, put every liquid node in equilibrium at the
    /// inlet state and publish generation 0.
    pub fn new(config: Config) -> Result<Self> {
        let state = Swe::new(&config)?;
        let lattice = *state.lattice();
        let mut snapshot = Snapshot::new(&lattice);
        snapshot.publish(state.nodes(), 0)?;

        let inlet = state.parameters().inlet;
        info!(
            "shallow water lattice {}x{}, e = {:.3}, max height {:.3}, max speed {:.3}, {:?} boundaries, inlet height {:.3} velocity {:?}",
            lattice.width(),
            lattice.height(),
            lattice.e(),
            lattice.max_height(),
            lattice.max_speed(),
            config.boundary,
            inlet.height,
            inlet.velocity,
        );

        Ok(Self {
            pending_solid: state.nodes().solid.clone(),
            config,
            lattice,
            state: Some(state),
            in_flight: None,
            pending_edits: 0,
            generation: 0,
            snapshot,
            listener: None,
        })
    }

    /// Create a simulation from a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self> {
        Self::new(Config::from_json(json)?)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    /// Number of completed ticks.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_tick_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Latest published snapshot.
    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// Call `listener` with every snapshot published from now on.
    pub fn set_listener(&mut self, listener: impl FnMut(&Snapshot) + Send + 'static) {
        self.listener = Some(Box::new(listener));
    }

    /// Start a tick on the rayon pool. Completes the tick in flight first, if any.
    pub fn begin_tick(&mut self) -> Result<()> {
        if self.in_flight.is_some() {
            self.complete_tick()?;
        }
        let mut state = self.state.take().ok_or(SimulationError::TickWorkerLost)?;
        self.merge_pending_edits(&mut state);

        let (sender, receiver) = mpsc::channel();
        rayon::spawn(move || {
            state.iterate();
            // the receiver is gone only when the simulation was dropped mid-tick
            let _ = sender.send(state);
        });
        self.in_flight = Some(receiver);
        Ok(())
    }

    /// Wait for the tick in flight and publish its snapshot. Without a tick in flight
    /// this returns the latest snapshot.
    pub fn complete_tick(&mut self) -> Result<&Snapshot> {
        if let Some(receiver) = self.in_flight.take() {
            let state = receiver
                .recv()
                .map_err(|_| SimulationError::TickWorkerLost)?;
            self.state = Some(state);
            self.generation += 1;
            self.publish()?;
        }
        Ok(&self.snapshot)
    }

    /// Complete the tick in flight and start the next one, returning the snapshot of
    /// the completed tick.
    pub fn tick(&mut self) -> Result<&Snapshot> {
        self.complete_tick()?;
        self.begin_tick()?;
        Ok(&self.snapshot)
    }

    /// Run one tick on the calling thread.
    pub fn step(&mut self) -> Result<&Snapshot> {
        self.complete_tick()?;
        let mut state = self.state.take().ok_or(SimulationError::TickWorkerLost)?;
        self.merge_pending_edits(&mut state);
        state.iterate();
        self.state = Some(state);
        self.generation += 1;
        self.publish()?;
        Ok(&self.snapshot)
    }

    /// Mark a node solid from the next tick on. Positions outside the lattice are
    /// clamped onto its edge.
    pub fn set_solid(&mut self, row: usize, col: usize) {
        let row = row.min(self.lattice.height() - 1);
        let col = col.min(self.lattice.width() - 1);
        let index = self.lattice.index(row, col);
        self.pending_solid[index] = true;
        self.pending_edits += 1;
    }

    /// Mark a node and its four axis aligned neighbors solid.
    pub fn set_solid_cluster(&mut self, row: usize, col: usize) {
        for [dx, dy] in PLUS_BRUSH {
            let row = row.saturating_add_signed(dy);
            let col = col.saturating_add_signed(dx);
            self.set_solid(row, col);
        }
    }

    /// [`Simulation::set_solid`] at the node nearest to `uv`.
    pub fn set_solid_uv(&mut self, uv: [f32; 2]) {
        let (row, col) = sampling::nearest_node(uv, self.dimensions());
        self.set_solid(row, col);
    }

    /// [`Simulation::set_solid_cluster`] around the node nearest to `uv`.
    pub fn set_solid_cluster_uv(&mut self, uv: [f32; 2]) {
        let (row, col) = sampling::nearest_node(uv, self.dimensions());
        self.set_solid_cluster(row, col);
    }

    /// Mark every node whose center lies inside `object` solid.
    pub fn add_object(&mut self, object: &impl Object<2>) {
        for (row, col) in iproduct!(0..self.lattice.height(), 0..self.lattice.width()) {
            if object.contains(&[col as f32, row as f32]) {
                self.set_solid(row, col);
            }
        }
    }

    fn dimensions(&self) -> [usize; 2] {
        [self.lattice.width(), self.lattice.height()]
    }

    fn merge_pending_edits(&mut self, state: &mut Swe) {
        if self.pending_edits == 0 {
            return;
        }
        let added = state.apply_solid_mask(&self.pending_solid);
        debug!(
            "merged {} obstacle edits, {} new solid nodes",
            self.pending_edits, added
        );
        self.pending_edits = 0;
    }

    fn publish(&mut self) -> Result<()> {
        let state = self.state.as_ref().ok_or(SimulationError::TickWorkerLost)?;
        self.snapshot.publish(state.nodes(), self.generation)?;
        trace!("published generation {}", self.generation);
        if let Some(listener) = self.listener.as_mut() {
            listener(&self.snapshot);
        }
        Ok(())
    }
}

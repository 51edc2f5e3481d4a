//! JavaScript bindings.

use crate::simulation::Simulation;

use js_sys::{Float32Array, Uint8Array};
use log::{Level, LevelFilter, Log, Metadata, Record};
use wasm_bindgen::prelude::*;

/// Forwards `log` records to the browser console.
struct ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let message = JsValue::from_str(&format!("[{}] {}", record.target(), record.args()));
        match record.level() {
            Level::Error => web_sys::console::error_1(&message),
            Level::Warn => web_sys::console::warn_1(&message),
            Level::Info => web_sys::console::info_1(&message),
            Level::Debug | Level::Trace => web_sys::console::debug_1(&message),
        }
    }

    fn flush(&self) {}
}

static LOGGER: ConsoleLogger = ConsoleLogger;

/// Entry point of the module.
#[wasm_bindgen(start)]
pub fn start() {
    // a second module instance finds the logger already installed
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(LevelFilter::Info);
    }
}

fn to_js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// A shallow water simulation driven from JavaScript, one synchronous step per call.
#[wasm_bindgen]
pub struct ShallowWater {
    simulation: Simulation,
}

#[wasm_bindgen]
impl ShallowWater {
    /// Create a simulation from a JSON configuration. Missing fields take their default
    /// value.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str) -> Result<ShallowWater, JsValue> {
        let simulation = Simulation::from_json(config_json).map_err(to_js_error)?;
        Ok(Self { simulation })
    }

    /// Advance the simulation by one tick and return the new generation.
    pub fn step(&mut self) -> Result<f64, JsValue> {
        let snapshot = self.simulation.step().map_err(to_js_error)?;
        Ok(snapshot.generation() as f64)
    }

    pub fn width(&self) -> usize {
        self.simulation.snapshot().width()
    }

    pub fn height(&self) -> usize {
        self.simulation.snapshot().height()
    }

    #[wasm_bindgen(js_name = maxHeight)]
    pub fn max_height(&self) -> f32 {
        self.simulation.snapshot().max_height()
    }

    #[wasm_bindgen(js_name = maxSpeed)]
    pub fn max_speed(&self) -> f32 {
        self.simulation.snapshot().max_speed()
    }

    #[wasm_bindgen(js_name = setSolidUv)]
    pub fn set_solid_uv(&mut self, u: f32, v: f32) {
        self.simulation.set_solid_uv([u, v]);
    }

    #[wasm_bindgen(js_name = setSolidClusterUv)]
    pub fn set_solid_cluster_uv(&mut self, u: f32, v: f32) {
        self.simulation.set_solid_cluster_uv([u, v]);
    }

    #[wasm_bindgen(js_name = sampleHeight)]
    pub fn sample_height(&self, u: f32, v: f32) -> f32 {
        self.simulation.snapshot().sample_height([u, v])
    }

    /// Magnitude of the interpolated velocity.
    #[wasm_bindgen(js_name = sampleSpeed)]
    pub fn sample_speed(&self, u: f32, v: f32) -> f32 {
        let [x, y] = self.simulation.snapshot().sample_velocity([u, v]);
        x.hypot(y)
    }

    /// Solid fraction around `(u, v)`, 1 inside an obstacle.
    #[wasm_bindgen(js_name = sampleSolid)]
    pub fn sample_solid(&self, u: f32, v: f32) -> f32 {
        self.simulation.snapshot().sample_solid([u, v])
    }

    /// Node heights, row major.
    pub fn heights(&self) -> Float32Array {
        Float32Array::from(self.simulation.snapshot().heights())
    }

    /// Node velocities, row major and interleaved `x, y`.
    pub fn velocities(&self) -> Float32Array {
        let flat: Vec<f32> = self
            .simulation
            .snapshot()
            .velocities()
            .iter()
            .flatten()
            .copied()
            .collect();
        Float32Array::from(flat.as_slice())
    }

    /// Solid mask, one byte per node.
    pub fn solids(&self) -> Uint8Array {
        let bytes: Vec<u8> = self
            .simulation
            .snapshot()
            .solids()
            .iter()
            .map(|&solid| solid as u8)
            .collect();
        Uint8Array::from(bytes.as_slice())
    }
}

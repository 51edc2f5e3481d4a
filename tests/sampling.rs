use wasm_lbm_swe::sampling::{half_texel, linear_blend, linear_sample_coords};
use wasm_lbm_swe::{BoundaryScheme, Config, Simulation};

use approx::assert_relative_eq;

#[test]
fn test_sampler_on_uniform_flow() {
    let config = Config {
        width: 10,
        height: 7,
        boundary: BoundaryScheme::Periodic,
        solid_rails: false,
        bed_slope: [0.0, 0.0],
        initial_velocity: Some([0.2, 0.0]),
        ..Config::default()
    };
    let mut simulation = Simulation::new(config).expect("valid configuration");
    let snapshot = simulation.step().expect("step");

    for uv in [[0.0, 0.0], [0.33, 0.71], [1.0, 1.0], [-2.0, 5.0]] {
        assert_relative_eq!(snapshot.sample_height(uv), 0.1, epsilon = 1e-5);
        let [ux, uy] = snapshot.sample_velocity(uv);
        assert_relative_eq!(ux, 0.2, epsilon = 1e-4);
        assert_relative_eq!(uy, 0.0, epsilon = 1e-5);
        assert_eq!(snapshot.sample_solid(uv), 0.0);
    }
}

#[test]
fn test_sampler_interpolates_between_rows() {
    let dimensions = [3, 3];
    let field: Vec<f32> = (0..9).map(|i| (i / 3) as f32).collect();

    // halfway between the first and second row, on the middle column
    let coords = linear_sample_coords([0.5, 0.5 - 1.0 / 6.0], dimensions, half_texel(dimensions));
    let value = linear_blend(
        field[coords.upper_left],
        field[coords.lower_left],
        field[coords.upper_right],
        field[coords.lower_right],
        coords.weights,
    );
    assert_relative_eq!(value, 0.5, epsilon = 1e-5);
}

#[test]
fn test_sample_solid_follows_obstacles() {
    let config = Config {
        width: 9,
        height: 9,
        ..Config::default()
    };
    let mut simulation = Simulation::new(config).expect("valid configuration");
    simulation.set_solid_uv([0.5, 0.5]);
    let snapshot = simulation.step().expect("step");

    assert!(snapshot.sample_solid([0.5, 0.5]) > 0.99);
    assert_relative_eq!(snapshot.sample_solid([0.2, 0.0]), 1.0);
    assert!(snapshot.sample_solid([0.25, 0.5]) < 0.01);
}

pub mod demo_data;
pub mod error;
pub mod genetic_algorithm;
pub mod location;
pub mod route_optimizer;
pub mod visualization;

pub use error::SolverError;
pub use genetic_algorithm::{Algorithm, Best, Chromosome, Evaluator, Meta, Optimizer};
pub use location::{distance, path_cost, Location};
pub use route_optimizer::{
    GenerationBudget, GenerationDriver, Route, RouteAlgorithm, RouteConfig,
};

use rand::rngs::StdRng;
use rand::SeedableRng;

/// The best visiting order found, as location ids, with its total travel
/// distance. A run with a zero generation budget yields an empty path and
/// an infinite cost.
#[derive(Clone, Debug, PartialEq)]
pub struct Solution {
    pub path: Vec<u32>,
    pub cost: f64,
}

/// Runs the genetic search over `locations` and returns the best route
/// found after `num_generations` generations.
///
/// Arguments are validated before any randomness is drawn. Pass a `seed`
/// for a reproducible run; `None` seeds from entropy. The call performs no
/// I/O or timing; callers own the clock.
pub fn solve(
    locations: &[Location],
    num_generations: u32,
    population_size: usize,
    seed: Option<u64>,
) -> Result<Solution, SolverError> {
    if locations.len() < 2 {
        return Err(SolverError::TooFewLocations(locations.len()));
    }
    // Reproduction draws two distinct parents from the survivor half, so
    // the population must be at least 4.
    if population_size < 4 {
        return Err(SolverError::PopulationTooSmall(population_size));
    }

    let rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut driver = GenerationDriver {
        algorithm: RouteAlgorithm {
            config: RouteConfig {
                num_locations: locations.len(),
                population_size,
            },
            locations,
        },
        rng,
    };

    let mut budget = GenerationBudget {
        limit: num_generations,
    };
    let best = driver.optimize(&mut budget);

    // Resolve indices to location ids once, here at the boundary.
    let path = best
        .chromosome
        .map(|route| route.genes.iter().map(|&i| locations[i].id).collect())
        .unwrap_or_default();

    Ok(Solution {
        path,
        cost: best.cost,
    })
}

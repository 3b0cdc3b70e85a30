use chrono::Local;
use colored::Colorize;
use csv::{Reader, Writer};
use itertools::iproduct;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use std::env;
use std::error::Error;
use std::fs::OpenOptions;
use std::iter::Sum;
use std::time::Instant;
use tsp_ga::demo_data::clustered_locations;
use tsp_ga::genetic_algorithm::{Evaluator, Optimizer};
use tsp_ga::route_optimizer::{GenerationDriver, Route, RouteAlgorithm, RouteConfig};
use tsp_ga::visualization::visualize_route;
use tsp_ga::{solve, Location};

#[derive(Debug)]
pub struct TestSchema {
    num_locations: Vec<usize>,
    num_generations: Vec<u32>,
    population_size: Vec<usize>,
}

#[derive(Debug, Serialize)]
pub struct ScenarioResult {
    pub num_locations: usize,
    pub num_generations: u32,
    pub population_size: usize,
    pub repetitions: i32,
    pub mean_cost: f64,
    pub var_cost: f64,
    pub mean_runtime: f64,
    pub var_runtime: f64,
}

#[derive(Debug)]
struct RunResult {
    runtime: f64,
    cost: f64,
}

const REPETITIONS: i32 = 5;

fn mean_variance<T: Copy + Into<f64> + Sum<T>>(values: &[T]) -> (f64, f64) {
    if values.is_empty() {
        return (0.0, 0.0);
    }

    let n = values.len() as f64;
    let sum: f64 = values.iter().map(|&v| v.into()).sum();
    let mean = sum / n;

    let variance = values
        .iter()
        .map(|&v| {
            let diff = v.into() - mean;
            diff * diff
        })
        .sum::<f64>()
        / n;

    (mean, variance)
}

/// Reads `id,x,y` rows from a CSV file.
fn load_locations(path: &str) -> Result<Vec<Location>, Box<dyn Error>> {
    let mut reader = Reader::from_path(path)?;
    let mut locations = Vec::new();
    for record in reader.deserialize() {
        locations.push(record?);
    }
    Ok(locations)
}

// Prints the front of every generation while counting down a fixed
// generation budget.
#[derive(Debug)]
struct ProgressEvaluator {
    limit: u32,
}

impl Evaluator<Route> for ProgressEvaluator {
    fn can_terminate(&mut self, ranked: &[Route], generation: u32) -> bool {
        if let Some(front) = ranked.first() {
            println!(
                "{} - best cost: {:.2}",
                format!("Generation {:3}", generation).bold().red(),
                front.cost,
            );
        }

        generation >= self.limit
    }
}

fn showcase_run(
    locations: &[Location],
    num_generations: u32,
    population_size: usize,
) -> Result<(), Box<dyn Error>> {
    let mut driver = GenerationDriver {
        algorithm: RouteAlgorithm {
            config: RouteConfig {
                num_locations: locations.len(),
                population_size,
            },
            locations,
        },
        rng: StdRng::from_entropy(),
    };

    let start = Instant::now();
    let best = driver.optimize(&mut ProgressEvaluator {
        limit: num_generations,
    });
    let runtime = start.elapsed().as_secs_f64();

    match best.chromosome {
        Some(route) => {
            let ids: Vec<String> = route
                .genes
                .iter()
                .map(|&i| locations[i].id.to_string())
                .collect();
            println!(
                "{} cost {:.2} in {:.2}s: {}",
                "Best route".bold().green(),
                best.cost,
                runtime,
                ids.join(" -> "),
            );
            visualize_route(locations, &route.genes, best.cost, "route.png")?;
            println!("Route plot saved to route.png");
        }
        None => println!("No route found (zero generation budget)"),
    }

    Ok(())
}

fn collect_benchmarks(schemas: &[TestSchema], file_path: &str) -> Result<(), Box<dyn Error>> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(file_path)?;
    let mut writer = Writer::from_writer(file);

    for schema in schemas {
        for (&num_locations, &num_generations, &population_size) in iproduct!(
            &schema.num_locations,
            &schema.num_generations,
            &schema.population_size
        ) {
            println!(
                "Scenario: {} locations, {} generations, population {}",
                num_locations, num_generations, population_size
            );

            let locations = clustered_locations(num_locations, 4, 100.0);

            let mut runs = Vec::with_capacity(REPETITIONS as usize);
            for _ in 0..REPETITIONS {
                let start = Instant::now();
                let solution = solve(&locations, num_generations, population_size, None)?;
                runs.push(RunResult {
                    runtime: start.elapsed().as_secs_f64(),
                    cost: solution.cost,
                });
            }

            let cost_values: Vec<f64> = runs.iter().map(|r| r.cost).collect();
            let runtime_values: Vec<f64> = runs.iter().map(|r| r.runtime).collect();

            let (mean_cost, var_cost) = mean_variance(&cost_values);
            let (mean_runtime, var_runtime) = mean_variance(&runtime_values);

            writer.serialize(ScenarioResult {
                num_locations,
                num_generations,
                population_size,
                repetitions: REPETITIONS,
                mean_cost,
                var_cost,
                mean_runtime,
                var_runtime,
            })?;
            writer.flush()?;
        }
    }

    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    // With a CSV path argument, solve that instance; otherwise sweep the
    // benchmark grid over generated instances.
    if let Some(path) = env::args().nth(1) {
        let locations = load_locations(&path)?;
        return showcase_run(&locations, 500, 100);
    }

    let schemas = vec![
        TestSchema {
            num_locations: vec![20, 50],
            num_generations: vec![100, 500],
            population_size: vec![50, 100],
        },
        TestSchema {
            num_locations: vec![100, 200],
            num_generations: vec![500, 1000],
            population_size: vec![100, 200],
        },
    ];

    let now = Local::now();
    let date_str = now.format("%Y-%m-%d_%H-%M-%S").to_string();
    let filename = format!("benchmark_results_{}.csv", date_str);

    collect_benchmarks(&schemas, &filename)?;

    let locations = clustered_locations(50, 4, 100.0);
    showcase_run(&locations, 500, 100)
}

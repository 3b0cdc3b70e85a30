use crate::genetic_algorithm::{Algorithm, Best, Chromosome, Evaluator, Meta, Optimizer};
use crate::location::{path_cost, Location};
use rand::prelude::*;
use rand::rngs::StdRng;
use rayon::prelude::*;
use std::cmp::Ordering;

#[derive(Clone, Debug, Default)]
pub struct RouteConfig {
    pub num_locations: usize,
    pub population_size: usize,
}

impl Meta for RouteConfig {
    fn population_size(&self) -> usize {
        self.population_size
    }

    // Floor division: an odd population shrinks by one after the first
    // generation (survivors + equally many children). Kept as-is.
    fn survivor_count(&self) -> usize {
        self.population_size / 2
    }
}

/// A visiting order over all locations: a permutation of the 0-based
/// location indices. `cost` is filled in by ranking.
#[derive(Clone, Debug, Default)]
pub struct Route {
    pub genes: Vec<usize>,
    pub cost: f64,
}

impl Chromosome for Route {
    fn cost(&self) -> f64 {
        self.cost
    }
}

#[derive(Debug)]
pub struct RouteAlgorithm<'a> {
    pub config: RouteConfig,
    pub locations: &'a [Location],
}

impl Algorithm<RouteConfig, Route> for RouteAlgorithm<'_> {
    fn meta(&self) -> &RouteConfig {
        &self.config
    }

    fn generate(&self, rng: &mut StdRng) -> Vec<Route> {
        (0..self.config.population_size)
            .map(|_| {
                let mut genes: Vec<usize> = (0..self.config.num_locations).collect();
                genes.shuffle(rng);
                Route {
                    genes,
                    ..Default::default()
                }
            })
            .collect()
    }

    fn rank(&self, mut population: Vec<Route>) -> Vec<Route> {
        population.par_iter_mut().for_each(|route| {
            route.cost = path_cost(&route.genes, self.locations);
        });

        // Stable sort keeps equal-cost routes in population order, so a
        // fixed seed always yields the same ranking.
        population.sort_by(|a, b| a.cost().partial_cmp(&b.cost()).unwrap_or(Ordering::Equal));

        population
    }

    fn select<'a>(&self, ranked: &'a [Route]) -> &'a [Route] {
        &ranked[..std::cmp::min(self.config.survivor_count(), ranked.len())]
    }

    fn reproduce(&self, survivors: &[Route], rng: &mut StdRng) -> Route {
        let picks = rand::seq::index::sample(rng, survivors.len(), 2);
        let parent_1 = &survivors[picks.index(0)];
        let parent_2 = &survivors[picks.index(1)];

        let path_len = self.config.num_locations;
        let mut genes = if path_len < 3 {
            // No valid cut point exists for a 2-location path; copy a
            // parent and rely on mutation alone.
            parent_1.genes.clone()
        } else {
            let cut = rng.gen_range(1..=path_len - 2);
            ordered_crossover(&parent_1.genes, &parent_2.genes, cut)
        };

        swap_mutation(&mut genes, rng);

        Route {
            genes,
            ..Default::default()
        }
    }
}

/// Ordered crossover: the child takes `parent_1`'s prefix up to `cut`,
/// then `parent_2`'s remaining genes in their original relative order.
/// Both parents must be permutations of the same index set, which makes
/// the child one too.
pub fn ordered_crossover(parent_1: &[usize], parent_2: &[usize], cut: usize) -> Vec<usize> {
    let mut in_prefix = vec![false; parent_1.len()];
    for &gene in &parent_1[..cut] {
        in_prefix[gene] = true;
    }

    let mut genes = Vec::with_capacity(parent_1.len());
    genes.extend_from_slice(&parent_1[..cut]);
    genes.extend(parent_2.iter().filter(|&&gene| !in_prefix[gene]));

    debug_assert_eq!(genes.len(), parent_1.len());
    genes
}

/// Swaps two distinct randomly chosen positions. Applied to every child,
/// unconditionally; there is no mutation-rate knob.
pub fn swap_mutation(genes: &mut [usize], rng: &mut StdRng) {
    let picks = rand::seq::index::sample(rng, genes.len(), 2);
    genes.swap(picks.index(0), picks.index(1));
}

/// Terminates after a fixed number of generations. A zero budget stops
/// the search before any generation is scored.
#[derive(Debug)]
pub struct GenerationBudget {
    pub limit: u32,
}

impl<C: Chromosome> Evaluator<C> for GenerationBudget {
    fn can_terminate(&mut self, _ranked: &[C], generation: u32) -> bool {
        generation >= self.limit
    }
}

#[derive(Debug)]
pub struct GenerationDriver<'a> {
    pub algorithm: RouteAlgorithm<'a>,
    pub rng: StdRng,
}

impl Optimizer<Route> for GenerationDriver<'_> {
    fn optimize(&mut self, eval: &mut dyn Evaluator<Route>) -> Best<Route> {
        let mut best = Best::default();
        let mut generation = 0;
        let mut population = self.algorithm.generate(&mut self.rng);

        loop {
            population = self.algorithm.rank(population);

            if eval.can_terminate(&population, generation) {
                break;
            }

            if let Some(front) = population.first() {
                best.observe(front);
            }

            let survivors = self.algorithm.select(&population).to_vec();
            let children: Vec<Route> = (0..self.algorithm.meta().survivor_count())
                .map(|_| self.algorithm.reproduce(&survivors, &mut self.rng))
                .collect();

            population = survivors;
            population.extend(children);

            generation += 1;
        }

        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::Location;
    use rand::SeedableRng;

    fn unit_square() -> Vec<Location> {
        vec![
            Location::new(1, 0.0, 0.0),
            Location::new(2, 0.0, 1.0),
            Location::new(3, 1.0, 1.0),
            Location::new(4, 1.0, 0.0),
        ]
    }

    fn algorithm(locations: &[Location], population_size: usize) -> RouteAlgorithm<'_> {
        RouteAlgorithm {
            config: RouteConfig {
                num_locations: locations.len(),
                population_size,
            },
            locations,
        }
    }

    fn is_permutation(genes: &[usize], len: usize) -> bool {
        let mut seen = vec![false; len];
        genes.len() == len
            && genes.iter().all(|&g| {
                if g >= len || seen[g] {
                    return false;
                }
                seen[g] = true;
                true
            })
    }

    #[test]
    fn generate_produces_exactly_size_permutations() {
        let locations = unit_square();
        let algorithm = algorithm(&locations, 7);
        let mut rng = StdRng::seed_from_u64(1);

        let population = algorithm.generate(&mut rng);

        assert_eq!(population.len(), 7);
        for route in &population {
            assert!(is_permutation(&route.genes, 4));
        }
    }

    #[test]
    fn rank_sorts_ascending_by_cost() {
        let locations = unit_square();
        let algorithm = algorithm(&locations, 3);

        let population = vec![
            Route {
                genes: vec![0, 2, 1, 3], // two diagonal hops
                ..Default::default()
            },
            Route {
                genes: vec![0, 1, 2, 3], // three unit edges
                ..Default::default()
            },
        ];

        let ranked = algorithm.rank(population);
        assert_eq!(ranked[0].genes, vec![0, 1, 2, 3]);
        assert!((ranked[0].cost - 3.0).abs() < 1e-12);
        assert!(ranked[0].cost <= ranked[1].cost);
    }

    #[test]
    fn rank_keeps_population_order_on_ties() {
        let locations = unit_square();
        let algorithm = algorithm(&locations, 2);

        // A route and its reverse cover the same segments, so they tie.
        let population = vec![
            Route {
                genes: vec![2, 0, 3, 1],
                ..Default::default()
            },
            Route {
                genes: vec![1, 3, 0, 2],
                ..Default::default()
            },
        ];

        let ranked = algorithm.rank(population);
        assert_eq!(ranked[0].genes, vec![2, 0, 3, 1]);
        assert_eq!(ranked[1].genes, vec![1, 3, 0, 2]);
    }

    #[test]
    fn ordered_crossover_preserves_the_permutation_invariant() {
        let parent_1 = [3, 0, 4, 2, 1, 5];
        let parent_2 = [5, 4, 3, 2, 1, 0];

        for cut in 1..=parent_1.len() - 2 {
            let child = ordered_crossover(&parent_1, &parent_2, cut);
            assert!(is_permutation(&child, parent_1.len()), "cut {}", cut);
            assert_eq!(&child[..cut], &parent_1[..cut]);
        }
    }

    #[test]
    fn ordered_crossover_keeps_second_parent_relative_order() {
        let parent_1 = [0, 1, 2, 3, 4];
        let parent_2 = [4, 2, 0, 3, 1];

        let child = ordered_crossover(&parent_1, &parent_2, 2);
        // Prefix [0, 1] from parent 1, then parent 2 minus {0, 1}.
        assert_eq!(child, vec![0, 1, 4, 2, 3]);
    }

    #[test]
    fn swap_mutation_changes_exactly_two_positions() {
        let mut rng = StdRng::seed_from_u64(9);

        for _ in 0..50 {
            let original: Vec<usize> = (0..6).collect();
            let mut mutated = original.clone();
            swap_mutation(&mut mutated, &mut rng);

            let differing = original
                .iter()
                .zip(&mutated)
                .filter(|(a, b)| a != b)
                .count();
            assert_eq!(differing, 2);
            assert!(is_permutation(&mutated, 6));
        }
    }

    #[test]
    fn reproduce_yields_valid_children() {
        let locations = unit_square();
        let algorithm = algorithm(&locations, 4);
        let mut rng = StdRng::seed_from_u64(3);

        let survivors = algorithm.rank(algorithm.generate(&mut rng));
        for _ in 0..100 {
            let child = algorithm.reproduce(&survivors, &mut rng);
            assert!(is_permutation(&child.genes, 4));
        }
    }

    #[test]
    fn reproduce_handles_two_location_instances() {
        let locations = vec![Location::new(1, 0.0, 0.0), Location::new(2, 5.0, 0.0)];
        let algorithm = algorithm(&locations, 2);
        let mut rng = StdRng::seed_from_u64(4);

        let survivors = algorithm.generate(&mut rng);
        let child = algorithm.reproduce(&survivors, &mut rng);
        assert!(is_permutation(&child.genes, 2));
    }

    #[test]
    fn zero_generation_budget_returns_the_empty_best() {
        let locations = unit_square();
        let mut driver = GenerationDriver {
            algorithm: algorithm(&locations, 4),
            rng: StdRng::seed_from_u64(11),
        };

        let best = driver.optimize(&mut GenerationBudget { limit: 0 });
        assert!(best.chromosome.is_none());
        assert_eq!(best.cost, f64::INFINITY);
    }

    /// Records the front cost of every ranked generation.
    #[derive(Debug, Default)]
    struct FrontRecorder {
        limit: u32,
        fronts: Vec<f64>,
    }

    impl Evaluator<Route> for FrontRecorder {
        fn can_terminate(&mut self, ranked: &[Route], generation: u32) -> bool {
            if generation >= self.limit {
                return true;
            }
            self.fronts.push(ranked[0].cost);
            false
        }
    }

    #[test]
    fn best_equals_minimum_front_cost_over_all_generations() {
        let locations = unit_square();
        let mut driver = GenerationDriver {
            algorithm: algorithm(&locations, 8),
            rng: StdRng::seed_from_u64(17),
        };

        let mut recorder = FrontRecorder {
            limit: 25,
            ..Default::default()
        };
        let best = driver.optimize(&mut recorder);

        assert_eq!(recorder.fronts.len(), 25);
        let min_front = recorder.fronts.iter().cloned().fold(f64::INFINITY, f64::min);
        assert_eq!(best.cost, min_front);
        assert!(best.chromosome.is_some());
    }

    #[test]
    fn odd_population_size_drifts_down_by_one() {
        let locations = unit_square();
        let algorithm = algorithm(&locations, 5);
        let mut rng = StdRng::seed_from_u64(23);

        let ranked = algorithm.rank(algorithm.generate(&mut rng));
        let survivors = algorithm.select(&ranked).to_vec();
        assert_eq!(survivors.len(), 2);

        let children: Vec<Route> = (0..algorithm.meta().survivor_count())
            .map(|_| algorithm.reproduce(&survivors, &mut rng))
            .collect();
        assert_eq!(survivors.len() + children.len(), 4);
    }
}

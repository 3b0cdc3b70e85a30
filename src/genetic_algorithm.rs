use rand::rngs::StdRng;
use std::fmt::Debug;

// This trait represents a chromosome - a single candidate solution to
// the problem we're minimizing over
pub trait Chromosome: Send + Sync + Debug + Clone {
    fn cost(&self) -> f64;
}

// This trait represents a configuration of the algorithm
pub trait Meta: Send + Sync + Debug + Clone {
    fn population_size(&self) -> usize;
    fn survivor_count(&self) -> usize;
}

// This trait represents the stopping condition of the algorithm. It
// observes the ranked population once per generation, so callers may
// also use it to report progress.
pub trait Evaluator<C: Chromosome>: Send + Debug {
    fn can_terminate(&mut self, ranked: &[C], generation: u32) -> bool;
}

// This trait encapsulates the optimizer logic
pub trait Optimizer<C: Chromosome>: Send + Debug {
    fn optimize(&mut self, eval: &mut dyn Evaluator<C>) -> Best<C>;
}

// This trait encapsulates the underlying genetic algorithm used by the
// optimizer to find the solution. All randomness flows through the
// caller-supplied generator so that seeded runs are reproducible.
pub trait Algorithm<M: Meta, C: Chromosome>: Send + Sync + Debug {
    fn meta(&self) -> &M;
    fn generate(&self, rng: &mut StdRng) -> Vec<C>;
    fn rank(&self, population: Vec<C>) -> Vec<C>;
    fn select<'a>(&self, ranked: &'a [C]) -> &'a [C];
    fn reproduce(&self, survivors: &[C], rng: &mut StdRng) -> C;
}

/// The lowest-cost chromosome observed so far, together with its cost.
/// Starts out empty with an infinite cost; only a strictly lower cost
/// replaces it.
#[derive(Clone, Debug)]
pub struct Best<C> {
    pub chromosome: Option<C>,
    pub cost: f64,
}

impl<C> Default for Best<C> {
    fn default() -> Self {
        Self {
            chromosome: None,
            cost: f64::INFINITY,
        }
    }
}

impl<C: Chromosome> Best<C> {
    /// Records `candidate` if it strictly improves on the tracked cost.
    pub fn observe(&mut self, candidate: &C) {
        if candidate.cost() < self.cost {
            self.cost = candidate.cost();
            self.chromosome = Some(candidate.clone());
        }
    }
}

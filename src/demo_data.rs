use crate::location::Location;
use rand::{thread_rng, Rng};
use rand_distr::{Distribution, Normal};

/// Locations spread uniformly over a square of the given side length.
pub fn uniform_locations(count: usize, side: f64) -> Vec<Location> {
    let mut rng = thread_rng();
    (0..count)
        .map(|i| {
            Location::new(
                i as u32 + 1,
                rng.gen_range(0.0..=side),
                rng.gen_range(0.0..=side),
            )
        })
        .collect()
}

/// Locations grouped around random cluster centers, which gives the
/// search a more structured instance than a uniform scatter.
pub fn clustered_locations(count: usize, clusters: usize, side: f64) -> Vec<Location> {
    let mut rng = thread_rng();
    let spread = side / clusters.max(1) as f64;

    let centers: Vec<Normal<f64>> = (0..clusters.max(1))
        .flat_map(|_| {
            let cx = rng.gen_range(0.0..=side);
            let cy = rng.gen_range(0.0..=side);
            [
                Normal::new(cx, spread / 4.0).unwrap(),
                Normal::new(cy, spread / 4.0).unwrap(),
            ]
        })
        .collect();

    (0..count)
        .map(|i| {
            let cluster = rng.gen_range(0..clusters.max(1));
            let x = centers[cluster * 2].sample(&mut rng).clamp(0.0, side);
            let y = centers[cluster * 2 + 1].sample(&mut rng).clamp(0.0, side);
            Location::new(i as u32 + 1, x, y)
        })
        .collect()
}

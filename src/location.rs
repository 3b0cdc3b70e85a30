use serde::{Deserialize, Serialize};

/// A labeled point on the delivery plane. Loaded once per run and only
/// ever handed to the solver by shared reference.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: u32,
    pub x: f64,
    pub y: f64,
}

impl Location {
    pub fn new(id: u32, x: f64, y: f64) -> Self {
        Self { id, x, y }
    }
}

/// Straight-line Euclidean distance between two locations.
pub fn distance(a: &Location, b: &Location) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    (dx * dx + dy * dy).sqrt()
}

/// Total travel distance along `path`, an ordered sequence of 0-based
/// indices into `locations`. The path is open: no return-to-start edge.
///
/// An out-of-range index is a contract violation and panics; the search
/// never produces one.
pub fn path_cost(path: &[usize], locations: &[Location]) -> f64 {
    path.windows(2)
        .map(|pair| distance(&locations[pair[0]], &locations[pair[1]]))
        .sum()
}

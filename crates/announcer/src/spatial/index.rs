//! R-tree nodes for spatial indexing of stops.
//!
//! Distances inside the tree are the same planar Euclidean distances used by
//! the segment locator, so nearest-stop queries agree with the matcher.

use std::sync::Arc;

use rstar::{PointDistance, RTreeObject, AABB};

use crate::models::types::{Coordinates, Stop};

#[derive(Clone, Debug)]
pub struct StopNode {
    pub stop: Arc<Stop>,
    point: [f64; 2],
}

impl StopNode {
    pub fn new(stop: Arc<Stop>) -> Self {
        let point = to_point(stop.coordinates);
        Self { stop, point }
    }
}

/// Tree key for a coordinate (x = longitude, y = latitude)
pub fn to_point(coordinates: Coordinates) -> [f64; 2] {
    [coordinates.longitude, coordinates.latitude]
}

impl RTreeObject for StopNode {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for StopNode {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;
    use rstar::RTree;

    #[test]
    fn test_nearest_stop_node() {
        let stops = [
            Stop::new("A", Coordinates::new(45.6, 123.4), TimeDelta::zero()),
            Stop::new("B", Coordinates::new(45.8, 124.0), TimeDelta::zero()),
            Stop::new("C", Coordinates::new(46.3, 123.4), TimeDelta::zero()),
        ];
        let tree = RTree::bulk_load(stops.into_iter().map(|s| StopNode::new(Arc::new(s))).collect());

        let nearest = tree
            .nearest_neighbor(&to_point(Coordinates::new(45.75, 123.9)))
            .unwrap();
        assert_eq!(&*nearest.stop.name, "B");
    }
}

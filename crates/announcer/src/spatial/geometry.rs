//! Planar distance primitives.
//!
//! Coordinates are treated as points on a flat plane, no geodesic correction
//! is applied. This holds up over the few kilometres a single route spans.

use geo::{EuclideanDistance, Point};

use crate::models::types::Coordinates;

/// Euclidean distance between two coordinates, in degrees
pub fn distance(a: Coordinates, b: Coordinates) -> f64 {
    Point::from(a).euclidean_distance(&Point::from(b))
}

/// Whether the line through `a` and `b` collapses to a single point
pub fn is_degenerate(a: Coordinates, b: Coordinates) -> bool {
    a == b
}

/// Distance from `point` to the infinite line through `line_start` and `line_end`.
///
/// The line is not clamped to the segment between the two coordinates, so a
/// point beyond either end measures against the extension of the line.
/// A degenerate line (both ends equal) has distance `0.0` to every point.
pub fn perpendicular_distance(line_start: Coordinates, line_end: Coordinates, point: Coordinates) -> f64 {
    let length = distance(line_start, line_end);
    if length == 0.0 {
        return 0.0;
    }

    let (x1, y1) = (line_start.latitude, line_start.longitude);
    let (x2, y2) = (line_end.latitude, line_end.longitude);
    let (x0, y0) = (point.latitude, point.longitude);

    let cross = (x2 - x1) * (y1 - y0) - (x1 - x0) * (y2 - y1);
    cross.abs() / length
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_distance() {
        let a = Coordinates::new(0.0, 0.0);
        let b = Coordinates::new(3.0, 4.0);

        assert_abs_diff_eq!(distance(a, b), 5.0, epsilon = 1e-12);
        assert_abs_diff_eq!(distance(b, a), 5.0, epsilon = 1e-12);
        assert_eq!(distance(a, a), 0.0);
    }

    #[test]
    fn test_distance_triangle_inequality() {
        let a = Coordinates::new(45.6, 123.4);
        let b = Coordinates::new(45.8, 124.0);
        let c = Coordinates::new(46.3, 123.4);

        assert!(distance(a, c) <= distance(a, b) + distance(b, c));
    }

    #[test]
    fn test_perpendicular_distance() {
        let start = Coordinates::new(45.6, 123.4);
        let end = Coordinates::new(45.8, 124.0);
        let point = Coordinates::new(45.7, 123.4);

        // |0.2 * 0.0 - 0.1 * 0.6| / sqrt(0.2^2 + 0.6^2)
        assert_abs_diff_eq!(
            perpendicular_distance(start, end, point),
            0.06 / 0.4_f64.sqrt(),
            epsilon = 1e-9
        );

        // Point on the line
        assert_abs_diff_eq!(
            perpendicular_distance(start, end, Coordinates::new(45.7, 123.7)),
            0.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_perpendicular_distance_uses_infinite_line() {
        let start = Coordinates::new(0.0, 0.0);
        let end = Coordinates::new(1.0, 0.0);

        // Beyond the end of the segment but on its extension
        assert_abs_diff_eq!(perpendicular_distance(start, end, Coordinates::new(5.0, 0.0)), 0.0);
        assert_abs_diff_eq!(
            perpendicular_distance(start, end, Coordinates::new(5.0, 2.0)),
            2.0,
            epsilon = 1e-12
        );
        assert_abs_diff_eq!(
            perpendicular_distance(start, end, Coordinates::new(-3.0, -1.5)),
            1.5,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_degenerate_line() {
        let same = Coordinates::new(45.6, 123.4);

        assert!(is_degenerate(same, same));
        assert_eq!(perpendicular_distance(same, same, Coordinates::new(50.0, 100.0)), 0.0);
    }
}

use descent_core::Point3;

/// The path a run has taken, oldest point first.
///
/// Always holds at least its starting point.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Trajectory {
    start: Point3,
    steps: Vec<Point3>,
}

impl Trajectory {
    /// Creates a trajectory holding only `start`.
    #[must_use]
    pub fn new(start: Point3) -> Self {
        Self {
            start,
            steps: Vec::new(),
        }
    }

    pub fn push(&mut self, point: Point3) {
        self.steps.push(point);
    }

    /// Discards every point and starts over from `start`.
    pub fn restart(&mut self, start: Point3) {
        self.start = start;
        self.steps.clear();
    }

    #[must_use]
    pub fn start(&self) -> Point3 {
        self.start
    }

    /// The most recent point.
    #[must_use]
    pub fn last(&self) -> Point3 {
        self.steps.last().copied().unwrap_or(self.start)
    }

    /// Number of points, including the start. Never zero.
    #[must_use]
    pub fn point_count(&self) -> usize {
        self.steps.len() + 1
    }

    /// Iterates all points, oldest first.
    pub fn points(&self) -> impl Iterator<Item = Point3> + '_ {
        std::iter::once(self.start).chain(self.steps.iter().copied())
    }

    /// The 3-D length of each segment between consecutive points.
    ///
    /// Useful for colouring the path by speed.
    #[must_use]
    pub fn segment_lengths(&self) -> Vec<f64> {
        self.points()
            .zip(self.steps.iter())
            .map(|(from, to)| from.distance_to(to))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use descent_core::{Domain, Surface};

    struct Plane;

    impl Surface for Plane {
        fn value(&self, _x: f64, _y: f64) -> f64 {
            0.0
        }

        fn domain(&self) -> Domain {
            Domain::symmetric(1.0).unwrap()
        }
    }

    #[test]
    fn never_empty() {
        let mut trajectory = Trajectory::new(Point3::on(&Plane, 1.0, 1.0));
        assert_eq!(trajectory.point_count(), 1);
        assert_eq!(trajectory.last(), trajectory.start());

        trajectory.push(Point3::on(&Plane, 0.5, 0.5));
        trajectory.restart(Point3::on(&Plane, 0.0, 0.0));
        assert_eq!(trajectory.point_count(), 1);
        assert_eq!(trajectory.last().x(), 0.0);
    }

    #[test]
    fn segment_lengths_follow_the_path() {
        let mut trajectory = Trajectory::new(Point3::on(&Plane, 0.0, 0.0));
        trajectory.push(Point3::on(&Plane, 3.0, 4.0));
        trajectory.push(Point3::on(&Plane, 3.0, 5.0));

        let lengths = trajectory.segment_lengths();
        assert_eq!(lengths.len(), 2);
        assert_relative_eq!(lengths[0], 5.0);
        assert_relative_eq!(lengths[1], 1.0);

        let xs: Vec<_> = trajectory.points().map(|p| p.x()).collect();
        assert_eq!(xs, vec![0.0, 3.0, 3.0]);
    }
}

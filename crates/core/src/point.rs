use crate::Surface;

/// A point on a surface.
///
/// Construct with [`Point3::on`] so that `z` always equals `f(x, y)`.
/// There is no way to move `x` or `y` without recomputing `z`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point3 {
    x: f64,
    y: f64,
    z: f64,
}

impl Point3 {
    /// Creates the point `(x, y, f(x, y))` on `surface`.
    #[must_use]
    pub fn on<S: Surface + ?Sized>(surface: &S, x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            z: surface.value(x, y),
        }
    }

    #[must_use]
    pub fn x(&self) -> f64 {
        self.x
    }

    #[must_use]
    pub fn y(&self) -> f64 {
        self.y
    }

    #[must_use]
    pub fn z(&self) -> f64 {
        self.z
    }

    /// Returns the point as `[x, y, z]`.
    #[must_use]
    pub fn to_array(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    /// Euclidean distance between two points in 3-D.
    #[must_use]
    pub fn distance_to(&self, other: &Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}

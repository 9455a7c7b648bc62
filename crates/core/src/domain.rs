use thiserror::Error;

/// The square domain `[min, max]²` a surface is defined over.
///
/// The same range applies to both `x` and `y`. Deserialized bounds are
/// checked like [`Domain::new`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RawDomain")
)]
pub struct Domain {
    min: f64,
    max: f64,
}

/// Errors that can occur when constructing a [`Domain`].
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DomainError {
    #[error("domain bounds must be finite")]
    NotFinite,

    #[error("domain min must be less than max")]
    Empty,
}

impl Domain {
    /// Creates a domain from its bounds.
    ///
    /// # Errors
    ///
    /// Returns an error if either bound is non-finite or `min >= max`.
    pub fn new(min: f64, max: f64) -> Result<Self, DomainError> {
        if !min.is_finite() || !max.is_finite() {
            return Err(DomainError::NotFinite);
        }
        if min >= max {
            return Err(DomainError::Empty);
        }
        Ok(Self { min, max })
    }

    /// Creates the domain `[-half_width, half_width]`.
    ///
    /// # Errors
    ///
    /// Returns an error if `half_width` is non-finite or not positive.
    pub fn symmetric(half_width: f64) -> Result<Self, DomainError> {
        Self::new(-half_width, half_width)
    }

    /// Returns the lower bound.
    #[must_use]
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Returns the upper bound.
    #[must_use]
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Returns the width `max - min`.
    #[must_use]
    pub fn span(&self) -> f64 {
        self.max - self.min
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawDomain {
    min: f64,
    max: f64,
}

#[cfg(feature = "serde")]
impl TryFrom<RawDomain> for Domain {
    type Error = DomainError;

    fn try_from(raw: RawDomain) -> Result<Self, Self::Error> {
        Self::new(raw.min, raw.max)
    }
}

//! Surface discretization for rendering.
//!
//! [`generate`] samples a function on a regular `(n + 1) × (n + 1)` grid and
//! emits a [`MeshData`] ready to upload as vertex and index buffers.
//!
//! The function value occupies the "up" axis: grid point `(x, y)` becomes the
//! vertex `(x, f(x, y), y)`. Vertices are laid out row by row, with `y`
//! varying across rows and `x` along each row.

mod normals;


use descent_core::{Domain, Surface};
use thiserror::Error;

/// A triangulated surface with per-vertex normals.
///
/// All arrays are flat: three `f32`s per vertex in `positions` and
/// `normals`, three `u32` vertex indices per triangle in `indices`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MeshData {
    pub positions: Vec<f32>,
    pub normals: Vec<f32>,
    pub indices: Vec<u32>,
}

/// Errors that can occur when generating a mesh.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MeshError {
    #[error("resolution must be at least 1")]
    ZeroResolution,

    #[error("resolution {0} needs more vertices than a u32 index can address")]
    TooFine(u32),
}

impl MeshData {
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// The position of vertex `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    #[must_use]
    pub fn position(&self, index: usize) -> [f32; 3] {
        let p = &self.positions[3 * index..3 * index + 3];
        [p[0], p[1], p[2]]
    }

    /// The unit normal of vertex `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    #[must_use]
    pub fn normal(&self, index: usize) -> [f32; 3] {
        let n = &self.normals[3 * index..3 * index + 3];
        [n[0], n[1], n[2]]
    }

    /// Iterates triangles as vertex index triples.
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }
}

/// Samples `f` over `domain × domain` at the given resolution.
///
/// Produces `(resolution + 1)²` vertices and `2 · resolution²` triangles.
/// Each grid cell with corners `a = (i, j)`, `b = (i, j + 1)`,
/// `c = (i + 1, j)`, `d = (i + 1, j + 1)` is split into the triangles
/// `(a, b, d)` and `(a, d, c)`.
///
/// The output depends only on the inputs, so repeated calls are
/// bit-for-bit identical.
///
/// # Errors
///
/// Returns an error if `resolution` is zero or too large to index.
pub fn generate<F>(f: F, domain: Domain, resolution: u32) -> Result<MeshData, MeshError>
where
    F: Fn(f64, f64) -> f64,
{
    if resolution == 0 {
        return Err(MeshError::ZeroResolution);
    }
    let side = resolution
        .checked_add(1)
        .filter(|side| side.checked_mul(*side).is_some())
        .ok_or(MeshError::TooFine(resolution))?;

    let positions = sample(&f, domain, resolution);
    let indices = triangulate(resolution, side);
    let normals = normals::area_weighted(&positions, &indices);

    Ok(MeshData {
        positions,
        normals,
        indices,
    })
}

/// Samples a [`Surface`] over its own domain.
///
/// # Errors
///
/// Returns an error if `resolution` is zero or too large to index.
pub fn generate_surface<S: Surface + ?Sized>(
    surface: &S,
    resolution: u32,
) -> Result<MeshData, MeshError> {
    generate(|x, y| surface.value(x, y), surface.domain(), resolution)
}

#[allow(clippy::cast_possible_truncation)]
fn sample<F: Fn(f64, f64) -> f64>(f: &F, domain: Domain, resolution: u32) -> Vec<f32> {
    let n = f64::from(resolution);
    let step = domain.span() / n;
    let side = resolution as usize + 1;

    let mut positions = Vec::with_capacity(side * side * 3);
    for i in 0..=resolution {
        let y = domain.min() + f64::from(i) * step;
        for j in 0..=resolution {
            let x = domain.min() + f64::from(j) * step;
            positions.extend([x as f32, f(x, y) as f32, y as f32]);
        }
    }
    positions
}

fn triangulate(resolution: u32, side: u32) -> Vec<u32> {
    let cells = resolution as usize * resolution as usize;
    let mut indices = Vec::with_capacity(cells * 6);
    for i in 0..resolution {
        for j in 0..resolution {
            let a = i * side + j;
            let b = a + 1;
            let c = a + side;
            let d = c + 1;
            indices.extend([a, b, d, a, d, c]);
        }
    }
    indices
}

//! Vertex normals from triangle faces.

type Vec3 = [f32; 3];

/// Computes unit vertex normals as the area-weighted sum of the normals of
/// every triangle touching each vertex.
///
/// For a triangle `(a, b, c)` the face normal is `(c - b) × (a - b)`, whose
/// length is twice the triangle's area, so summing raw cross products weights
/// each face by its area. Vertices with a zero sum keep a zero normal.
pub(crate) fn area_weighted(positions: &[f32], indices: &[u32]) -> Vec<f32> {
    let mut sums = vec![[0.0_f32; 3]; positions.len() / 3];

    for tri in indices.chunks_exact(3) {
        let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| i as usize);
        let [pa, pb, pc] = [a, b, c].map(|i| vertex(positions, i));
        let face = cross(sub(pc, pb), sub(pa, pb));
        for i in [a, b, c] {
            for axis in 0..3 {
                sums[i][axis] += face[axis];
            }
        }
    }

    sums.into_iter().flat_map(normalize).collect()
}

fn vertex(positions: &[f32], index: usize) -> Vec3 {
    let p = &positions[3 * index..3 * index + 3];
    [p[0], p[1], p[2]]
}

fn sub(u: Vec3, v: Vec3) -> Vec3 {
    [u[0] - v[0], u[1] - v[1], u[2] - v[2]]
}

fn cross(u: Vec3, v: Vec3) -> Vec3 {
    [
        u[1] * v[2] - u[2] * v[1],
        u[2] * v[0] - u[0] * v[2],
        u[0] * v[1] - u[1] * v[0],
    ]
}

fn normalize(v: Vec3) -> Vec3 {
    let len = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
    if len > 0.0 { v.map(|c| c / len) } else { v }
}

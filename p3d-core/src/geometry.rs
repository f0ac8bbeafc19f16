//! The static pyramid mesh.

/// Corner positions of the pyramid: three base corners and the apex.
pub const PYRAMID_VERTICES: [[f32; 3]; 4] = [
    [-1.0, -1.0, 0.0],
    [0.0, -1.0, 1.0],
    [1.0, -1.0, 0.0],
    [0.0, 1.0, 0.0],
];

/// Four triangular faces, three sides meeting at the apex plus the base.
#[rustfmt::skip]
pub const PYRAMID_INDICES: [u32; 12] = [
    0, 3, 1,
    1, 3, 2,
    2, 3, 0,
    0, 1, 2,
];

/// Number of leading vertices drawn by the non-indexed overlay pass.
pub const OVERLAY_VERTEX_COUNT: usize = 3;

//! Two small OpenGL programs sharing one set of building blocks: a `triangle`
//! binary drawing a single triangle and a `quad` binary drawing two triangles
//! from the same vertex stream.

/// Positions in NDC, one x-y-z triple per vertex.
#[rustfmt::skip]
pub const TRIANGLE: [f32; 9] = [
    -0.5, -0.5, 0.0,
     0.5, -0.5, 0.0,
     0.0,  0.5, 0.0,
];

/// The same quad as two counter-clockwise triangles, no index buffer.
#[rustfmt::skip]
pub const QUAD: [f32; 18] = [
     0.5,  0.5, 0.0,
    -0.5,  0.5, 0.0,
     0.5, -0.5, 0.0,
     0.5, -0.5, 0.0,
    -0.5,  0.5, 0.0,
    -0.5, -0.5, 0.0,
];

pub mod app;
pub mod args;
pub mod geometry;
pub mod renderer;
pub mod shader;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_streams_hold_whole_positions() {
        assert_eq!(TRIANGLE.len(), 9);
        assert_eq!(QUAD.len(), 18);
        assert_eq!(TRIANGLE.len() % 3, 0);
        assert_eq!(QUAD.len() % 3, 0);
    }

    #[test]
    fn vertex_streams_stay_inside_ndc() {
        for v in TRIANGLE.iter().chain(QUAD.iter()) {
            assert!((-1.0..=1.0).contains(v));
        }
    }
}

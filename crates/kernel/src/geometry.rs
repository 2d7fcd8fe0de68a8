use glam::{Vec3, Vec4};
use meshview_common::{MeshData, Topology, UsageHint, Vertex};

/// Lines per side of the origin for the floor grid.
pub const GRID_HALF_EXTENT: u32 = 20;
/// Distance between neighbouring grid lines.
pub const GRID_SPACING: f32 = 20.0;
pub const GRID_COLOR: Vec4 = Vec4::new(0.7, 0.7, 0.7, 1.0);

/// Floor grid on the Y=0 plane: `2n+1` lines along each axis, `spacing` apart.
///
/// For every offset `i` in `-n..=n` a line parallel to Z is emitted, then one
/// parallel to X. Indices pair up consecutive vertices.
pub fn grid_mesh(half_extent: u32, spacing: f32) -> MeshData {
    let n = half_extent as i32;
    let extent = n as f32 * spacing;
    let mut vertices = Vec::with_capacity(4 * (2 * half_extent as usize + 1));

    for i in -n..=n {
        let offset = i as f32 * spacing;
        // Parallel to Z
        vertices.push(Vertex::new(Vec3::new(offset, 0.0, -extent), GRID_COLOR));
        vertices.push(Vertex::new(Vec3::new(offset, 0.0, extent), GRID_COLOR));
        // Parallel to X
        vertices.push(Vertex::new(Vec3::new(-extent, 0.0, offset), GRID_COLOR));
        vertices.push(Vertex::new(Vec3::new(extent, 0.0, offset), GRID_COLOR));
    }

    let indices = (0..vertices.len() as u32).step_by(2).flat_map(|i| [i, i + 1]).collect();

    MeshData {
        vertices,
        indices,
        topology: Topology::LineList,
        usage: UsageHint::Static,
    }
}

/// Five-vertex pyramid: apex plus four base corners, each a distinct colour.
pub fn pyramid_mesh() -> MeshData {
    #[rustfmt::skip]
    let vertices = vec![
        Vertex::new(Vec3::new(   0.0,  180.0,    0.0), Vec4::new(1.0, 0.0, 0.0, 1.0)), // apex
        Vertex::new(Vec3::new(-100.0, -100.0, -100.0), Vec4::new(0.0, 1.0, 0.0, 1.0)),
        Vertex::new(Vec3::new( 100.0, -100.0, -100.0), Vec4::new(0.0, 0.0, 1.0, 1.0)),
        Vertex::new(Vec3::new( 100.0, -100.0,  100.0), Vec4::new(1.0, 1.0, 0.0, 1.0)),
        Vertex::new(Vec3::new(-100.0, -100.0,  100.0), Vec4::new(0.0, 1.0, 1.0, 1.0)),
    ];
    #[rustfmt::skip]
    let indices = vec![
        0, 1, 2, // front
        0, 2, 3, // right
        0, 3, 4, // back
        0, 4, 1, // left
        1, 2, 3, // base
        1, 3, 4,
    ];

    MeshData {
        vertices,
        indices,
        topology: Topology::TriangleList,
        usage: UsageHint::Dynamic,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_counts_follow_extent() {
        for n in [0, 1, 5, GRID_HALF_EXTENT] {
            let grid = grid_mesh(n, GRID_SPACING);
            let expected = 4 * (2 * n as usize + 1);
            assert_eq!(grid.vertices.len(), expected);
            assert_eq!(grid.indices.len(), expected);
            assert!(grid.validate().is_ok());
        }
    }

    #[test]
    fn default_grid_has_164_vertices() {
        let grid = grid_mesh(GRID_HALF_EXTENT, GRID_SPACING);
        assert_eq!(grid.vertex_count(), 164);
        assert_eq!(grid.index_count(), 164);
        assert_eq!(grid.topology, Topology::LineList);
        assert_eq!(grid.usage, UsageHint::Static);
    }

    #[test]
    fn grid_indices_pair_consecutive_vertices() {
        let grid = grid_mesh(2, 1.0);
        for (k, pair) in grid.indices.chunks(2).enumerate() {
            assert_eq!(pair, [2 * k as u32, 2 * k as u32 + 1]);
        }
    }

    #[test]
    fn grid_lines_span_full_extent_on_floor() {
        let grid = grid_mesh(GRID_HALF_EXTENT, GRID_SPACING);
        let extent = GRID_HALF_EXTENT as f32 * GRID_SPACING;
        for v in &grid.vertices {
            assert_eq!(v.position[1], 0.0);
            assert!(v.position[0].abs() <= extent && v.position[2].abs() <= extent);
            assert_eq!(v.color, GRID_COLOR.to_array());
        }
        // First line runs parallel to Z at x = -extent.
        assert_eq!(grid.vertices[0].position, [-extent, 0.0, -extent]);
        assert_eq!(grid.vertices[1].position, [-extent, 0.0, extent]);
        // Second line runs parallel to X at z = -extent.
        assert_eq!(grid.vertices[2].position, [-extent, 0.0, -extent]);
        assert_eq!(grid.vertices[3].position, [extent, 0.0, -extent]);
    }

    #[test]
    fn pyramid_shape() {
        let pyramid = pyramid_mesh();
        assert_eq!(pyramid.vertices.len(), 5);
        assert_eq!(pyramid.indices.len(), 18);
        assert!(pyramid.validate().is_ok());
        assert_eq!(pyramid.topology, Topology::TriangleList);
        assert_eq!(pyramid.usage, UsageHint::Dynamic);
    }

    #[test]
    fn pyramid_vertices_have_distinct_colors() {
        let pyramid = pyramid_mesh();
        for (i, a) in pyramid.vertices.iter().enumerate() {
            for b in &pyramid.vertices[i + 1..] {
                assert_ne!(a.color, b.color);
            }
        }
    }
}

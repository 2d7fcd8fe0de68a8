use glam::Mat4;
use meshview_kernel::ObjectKind;
use meshview_render::FrameMatrices;

/// Format a matrix as four fixed-width rows, `[ a b c d ]` per row.
pub fn matrix_rows(m: &Mat4) -> [String; 4] {
    std::array::from_fn(|r| {
        let row = m.row(r);
        format!(
            "[ {:8.3} {:8.3} {:8.3} {:8.3} ]",
            row.x, row.y, row.z, row.w
        )
    })
}

/// Heading and rows for one object's model matrix, with its overlay position.
#[derive(Debug, Clone, PartialEq)]
pub struct MatrixReadout {
    pub title: String,
    /// Top-left of the title in logical pixels.
    pub origin: [f32; 2],
    pub rows: [String; 4],
}

impl MatrixReadout {
    /// Vertical offset from the title to the first row.
    pub const ROWS_OFFSET: f32 = 30.0;
}

/// Model-matrix readouts for the overlay, pyramid first.
pub fn model_matrix_readouts(matrices: &FrameMatrices) -> [MatrixReadout; 2] {
    let readout = |kind: ObjectKind, y: f32| MatrixReadout {
        title: format!("{} - Model Matrix:", kind.label()),
        origin: [10.0, y],
        rows: matrix_rows(&matrices.model(kind)),
    };
    [
        readout(ObjectKind::Pyramid, 0.0),
        readout(ObjectKind::Grid, 100.0),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use meshview_kernel::Scene;

    #[test]
    fn identity_rows() {
        let rows = matrix_rows(&Mat4::IDENTITY);
        assert_eq!(rows[0], "[    1.000    0.000    0.000    0.000 ]");
        assert_eq!(rows[3], "[    0.000    0.000    0.000    1.000 ]");
    }

    #[test]
    fn translation_shows_in_last_column() {
        let rows = matrix_rows(&Mat4::from_translation(Vec3::new(12.5, -3.0, 100.0)));
        assert!(rows[0].ends_with("  12.500 ]"));
        assert!(rows[1].ends_with("  -3.000 ]"));
        assert!(rows[2].ends_with(" 100.000 ]"));
    }

    #[test]
    fn readouts_follow_overlay_layout() {
        let scene = Scene::new();
        let readouts = model_matrix_readouts(&FrameMatrices::compute(&scene, 1.0));
        assert_eq!(readouts[0].title, "Pyramid - Model Matrix:");
        assert_eq!(readouts[0].origin, [10.0, 0.0]);
        assert_eq!(readouts[1].title, "Grid - Model Matrix:");
        assert_eq!(readouts[1].origin, [10.0, 100.0]);
        assert_eq!(readouts[1].rows, matrix_rows(&Mat4::IDENTITY));
    }
}

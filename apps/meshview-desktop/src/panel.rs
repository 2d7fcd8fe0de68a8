use egui::{Align2, Color32, FontId, Id, LayerId, Order, Ui};
use glam::Vec3;
use meshview_common::{Transform, Vertex};
use meshview_kernel::{Camera, Scene};
use meshview_render::FrameMatrices;
use meshview_tools::{MatrixReadout, model_matrix_readouts};

const OVERLAY_FONT_SIZE: f32 = 14.0;

/// Control panel bound directly to the live scene. Edits apply next frame.
pub fn control_panel(ctx: &egui::Context, scene: &mut Scene) {
    egui::Window::new("Controls")
        .default_pos([10.0, 220.0])
        .resizable(false)
        .show(ctx, |ui| {
            transform_section(ui, "Pyramid Transform", &mut scene.pyramid.transform);
            transform_section(ui, "Grid Transform", &mut scene.grid.transform);
            camera_section(ui, &mut scene.camera);
            animation_section(ui, scene);
            vertices_section(ui, &mut scene.pyramid.mesh.vertices);
        });
}

/// Both model matrices as foreground text.
pub fn matrix_overlay(ctx: &egui::Context, matrices: &FrameMatrices) {
    let painter = ctx.layer_painter(LayerId::new(Order::Foreground, Id::new("matrix_overlay")));
    let font = FontId::monospace(OVERLAY_FONT_SIZE);

    for MatrixReadout {
        title,
        origin: [x, y],
        rows,
    } in model_matrix_readouts(matrices)
    {
        painter.text(
            egui::pos2(x, y),
            Align2::LEFT_TOP,
            title,
            font.clone(),
            Color32::WHITE,
        );
        for (i, row) in rows.into_iter().enumerate() {
            let row_y = y + MatrixReadout::ROWS_OFFSET + i as f32 * OVERLAY_FONT_SIZE;
            painter.text(
                egui::pos2(x, row_y),
                Align2::LEFT_TOP,
                row,
                font.clone(),
                Color32::WHITE,
            );
        }
    }
}

fn drag_vec3(ui: &mut Ui, label: &str, v: &mut Vec3, speed: f32) {
    ui.horizontal(|ui| {
        ui.add(egui::DragValue::new(&mut v.x).speed(speed).prefix("X: "));
        ui.add(egui::DragValue::new(&mut v.y).speed(speed).prefix("Y: "));
        ui.add(egui::DragValue::new(&mut v.z).speed(speed).prefix("Z: "));
        ui.label(label);
    });
}

fn transform_section(ui: &mut Ui, title: &str, transform: &mut Transform) {
    egui::CollapsingHeader::new(title)
        .default_open(true)
        .show(ui, |ui| {
            drag_vec3(ui, "Translate", &mut transform.translate, 1.0);
            drag_vec3(ui, "Rotation", &mut transform.rotation, 1.0);
            drag_vec3(ui, "Scale", &mut transform.scale, 0.1);
        });
}

fn camera_section(ui: &mut Ui, camera: &mut Camera) {
    egui::CollapsingHeader::new("Camera")
        .default_open(true)
        .show(ui, |ui| {
            drag_vec3(ui, "Position", &mut camera.position, 1.0);
            drag_vec3(ui, "Target", &mut camera.target, 1.0);
            drag_vec3(ui, "Up", &mut camera.up, 1.0);
            ui.add(egui::Slider::new(&mut camera.fov, 10.0..=120.0).text("FOV"));
            ui.add(egui::Slider::new(&mut camera.z_near, 0.1..=1.0).text("Z-Near"));
            // Lower bound stays above the largest Z-Near.
            ui.add(egui::Slider::new(&mut camera.z_far, 1.1..=10000.0).text("Z-Far"));
        });
}

fn animation_section(ui: &mut Ui, scene: &mut Scene) {
    egui::CollapsingHeader::new("Animation")
        .default_open(true)
        .show(ui, |ui| {
            ui.checkbox(&mut scene.pyramid.animate, "Pyramid Animation");
            ui.checkbox(&mut scene.grid.animate, "Grid Animation");
            let anim = &mut scene.animation;
            ui.checkbox(&mut anim.rotate_x, "Rotation X");
            ui.checkbox(&mut anim.rotate_y, "Rotation Y");
            ui.checkbox(&mut anim.rotate_z, "Rotation Z");
            ui.add(egui::Slider::new(&mut anim.speed, 1.0..=20.0).text("Animation Speed"));
        });
}

fn vertices_section(ui: &mut Ui, vertices: &mut [Vertex]) {
    egui::CollapsingHeader::new("Pyramid Vertices")
        .default_open(false)
        .show(ui, |ui| {
            for (i, vertex) in vertices.iter_mut().enumerate() {
                let mut position = Vec3::from_array(vertex.position);
                drag_vec3(ui, &format!("Vertex {i}"), &mut position, 1.0);
                vertex.position = position.to_array();
            }
        });
}

//! Image canvas: paints the preview texture, converts pointer input into
//! selection actions, and draws the dashed in-progress outline.

use eframe::egui;

use sl_app::selection;

/// Minimum canvas size when no image is shown yet.
pub const MIN_CANVAS: egui::Vec2 = egui::Vec2::new(640.0, 480.0);

/// Show the canvas and translate this frame's pointer input into selection
/// actions for the core model.
pub fn show(
    ui: &mut egui::Ui,
    texture: Option<(&egui::TextureHandle, egui::Vec2)>,
    model: &selection::Model,
) -> Vec<selection::Action> {
    let desired = texture.map(|(_, size)| size).unwrap_or(MIN_CANVAS);
    let (rect, response) = ui.allocate_exact_size(desired, egui::Sense::click_and_drag());

    match texture {
        Some((handle, _)) => {
            ui.painter().image(
                handle.id(),
                rect,
                egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                egui::Color32::WHITE,
            );
        }
        None => {
            ui.painter()
                .rect_filled(rect, 0.0, egui::Color32::from_gray(40));
        }
    }

    let mut actions = Vec::new();
    let to_image = |pos: egui::Pos2| ((pos.x - rect.min.x) as i32, (pos.y - rect.min.y) as i32);
    let pointer = response
        .interact_pointer_pos()
        .or_else(|| ui.input(|i| i.pointer.latest_pos()));

    if let Some(pos) = pointer {
        let (x, y) = to_image(pos);
        if response.drag_started() {
            actions.push(selection::Action::MouseDown { x, y });
        } else if response.dragged() {
            actions.push(selection::Action::MouseMove { x, y });
        } else if response.drag_stopped() {
            actions.push(selection::Action::MouseUp { x, y });
        }
    }

    // Dashed feedback outline while the gesture is in progress.
    if let Some(outline) = model.provisional() {
        let outline_rect = egui::Rect::from_min_size(
            rect.min + egui::vec2(outline.x as f32, outline.y as f32),
            egui::vec2(outline.width as f32, outline.height as f32),
        );
        paint_dashed_rect(ui.painter(), outline_rect);
    }

    actions
}

fn paint_dashed_rect(painter: &egui::Painter, rect: egui::Rect) {
    let stroke = egui::Stroke::new(2.0, egui::Color32::RED);
    let corners = [
        rect.left_top(),
        rect.right_top(),
        rect.right_bottom(),
        rect.left_bottom(),
        rect.left_top(),
    ];
    for edge in corners.windows(2) {
        painter.extend(egui::Shape::dashed_line(edge, stroke, 6.0, 4.0));
    }
}

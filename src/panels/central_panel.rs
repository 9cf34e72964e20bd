use egui::{Pos2, Rect, Sense, Vec2};

use super::PaletteDrag;
use crate::animation::{AnimationFrame, AnimationPlayer};
use crate::command::Command;
use crate::document::Document;
use crate::element::ElementId;
use crate::renderer::{Renderer, UNPLACED_POSITION, element_rect};
use crate::settings::BuilderSettings;

/// A canvas drag in progress: begin, any number of updates, then end
#[derive(Debug, Clone, Copy, PartialEq)]
struct CanvasDrag {
    id: ElementId,
    start: Pos2,
    offset: Vec2,
}

/// The preview canvas.
///
/// While dragging, the element is only drawn at its preview offset. The
/// document sees a single transient move on release, and nothing at all when
/// the pointer is released outside the canvas.
#[derive(Debug, Default)]
pub struct CanvasPanel {
    drag: Option<CanvasDrag>,
}

impl CanvasPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        document: &Document,
        settings: &BuilderSettings,
        player: &AnimationPlayer,
        now: f64,
    ) -> Vec<Command> {
        let mut commands = Vec::new();
        let renderer = Renderer::new(settings.theme);

        let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::click_and_drag());
        let canvas = canvas_rect(response.rect, settings.device.viewport_width());
        let painter = painter.with_clip_rect(canvas);

        let grid = settings.show_grid.then_some(settings.grid_size);
        renderer.draw_background(&painter, canvas, grid);

        // back to front
        for element in document.display_order().into_iter().rev() {
            if !element.visible {
                continue;
            }
            let mut rect = element_rect(element, canvas.min);
            if let Some(drag) = self.drag.filter(|drag| drag.id == element.id) {
                rect = rect.translate(drag.offset);
            }
            let frame = if self.drag.is_some() {
                AnimationFrame::IDENTITY
            } else {
                player.sample(&element.animation_binding(), now)
            };
            let selected = document.active() == Some(element.id);
            renderer.draw_element(&painter, element, rect, frame, selected);
        }

        let pointer = ui.ctx().pointer_latest_pos();

        if response.drag_started() {
            let hit = response
                .interact_pointer_pos()
                .and_then(|pos| hit_test(document, canvas, pos));
            if let Some(element) = hit.and_then(|id| document.element(id)) {
                commands.push(Command::Select(Some(element.id)));
                if !element.locked {
                    self.drag = Some(CanvasDrag {
                        id: element.id,
                        start: element.position.unwrap_or(UNPLACED_POSITION),
                        offset: Vec2::ZERO,
                    });
                }
            }
        }

        if response.dragged() {
            if let Some(drag) = &mut self.drag {
                drag.offset += response.drag_delta();
            }
        }

        if response.drag_stopped() {
            if let Some(drag) = self.drag.take() {
                let dropped_inside = pointer.is_some_and(|pos| canvas.contains(pos));
                if dropped_inside && drag.offset != Vec2::ZERO {
                    let position = (drag.start + drag.offset).max(Pos2::ZERO);
                    commands.push(Command::MoveElement { id: drag.id, position });
                } else if !dropped_inside {
                    log::debug!("Drag of {} cancelled outside the canvas", drag.id);
                }
            }
        }

        // a drag whose element vanished (undo, delete) ends silently
        if self.drag.is_some_and(|drag| !document.contains(drag.id)) {
            self.drag = None;
        }

        if response.clicked() {
            let hit = response
                .interact_pointer_pos()
                .and_then(|pos| hit_test(document, canvas, pos));
            commands.push(Command::Select(hit));
        }

        if let Some(payload) = response.dnd_release_payload::<PaletteDrag>() {
            if let Some(pos) = pointer.filter(|pos| canvas.contains(*pos)) {
                let size = payload.0.default_size();
                let position = (pos - canvas.min - size / 2.0).to_pos2().max(Pos2::ZERO);
                commands.push(Command::AddElement {
                    kind: payload.0,
                    position: Some(position),
                });
            }
        }

        if player.is_playing(now, document.elements()) {
            ui.ctx().request_repaint();
        }

        commands
    }
}

/// Centers a device-width viewport inside the available area
fn canvas_rect(available: Rect, viewport_width: Option<f32>) -> Rect {
    match viewport_width {
        Some(width) if width < available.width() => {
            Rect::from_center_size(available.center(), Vec2::new(width, available.height()))
        }
        _ => available,
    }
}

/// Front-most visible element under `pos`
fn hit_test(document: &Document, canvas: Rect, pos: Pos2) -> Option<ElementId> {
    if !canvas.contains(pos) {
        return None;
    }
    document
        .display_order()
        .into_iter()
        .filter(|element| element.visible)
        .find(|element| element_rect(element, canvas.min).contains(pos))
        .map(|element| element.id)
}

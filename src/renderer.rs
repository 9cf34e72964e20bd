use egui::{Align2, Color32, FontId, Painter, Pos2, Rect, Stroke, Vec2};

use crate::animation::AnimationFrame;
use crate::element::{Element, ElementKind};
use crate::settings::{Palette, Theme};

/// Where an element without a position is drawn, relative to the canvas
pub const UNPLACED_POSITION: Pos2 = Pos2::new(24.0, 24.0);

const PADDING: f32 = 8.0;

/// Canvas-space rectangle of an element whose canvas starts at `origin`
pub fn element_rect(element: &Element, origin: Pos2) -> Rect {
    let position = element.position.unwrap_or(UNPLACED_POSITION);
    Rect::from_min_size(origin + position.to_vec2(), element.kind.default_size())
}

/// Draws the builder canvas and its elements with the active theme
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    palette: Palette,
}

impl Renderer {
    pub fn new(theme: Theme) -> Self {
        Self {
            palette: theme.palette(),
        }
    }

    pub fn palette(&self) -> Palette {
        self.palette
    }

    /// Fills the canvas and optionally draws the placement grid
    pub fn draw_background(&self, painter: &Painter, rect: Rect, grid_size: Option<f32>) {
        painter.rect_filled(rect, 4.0, self.palette.background);

        if let Some(step) = grid_size.filter(|step| *step >= 4.0) {
            let stroke = Stroke::new(1.0, self.palette.grid);
            let mut x = rect.min.x + step;
            while x < rect.max.x {
                painter.line_segment([Pos2::new(x, rect.min.y), Pos2::new(x, rect.max.y)], stroke);
                x += step;
            }
            let mut y = rect.min.y + step;
            while y < rect.max.y {
                painter.line_segment([Pos2::new(rect.min.x, y), Pos2::new(rect.max.x, y)], stroke);
                y += step;
            }
        }
    }

    /// Draws one element at `rect`, posed by an animation frame
    pub fn draw_element(&self, painter: &Painter, element: &Element, rect: Rect, frame: AnimationFrame, selected: bool) {
        let rect = Rect::from_center_size(rect.center() + frame.offset, rect.size() * frame.scale);
        let fade = |color: Color32| color.gamma_multiply(frame.opacity.clamp(0.0, 1.0));
        let palette = self.palette;
        let content = element.content.as_deref().unwrap_or_default();

        match element.kind {
            ElementKind::Heading => {
                self.wrapped_text(painter, rect, content, 24.0, fade(palette.text));
            }
            ElementKind::Paragraph => {
                self.wrapped_text(painter, rect, content, 14.0, fade(palette.text));
            }
            ElementKind::Button => {
                painter.rect_filled(rect, 6.0, fade(palette.accent));
                painter.text(
                    rect.center(),
                    Align2::CENTER_CENTER,
                    content,
                    FontId::proportional(15.0),
                    fade(Color32::WHITE),
                );
            }
            ElementKind::Hero | ElementKind::Parallax => {
                painter.rect_filled(rect, 8.0, fade(palette.accent.gamma_multiply(0.25)));
                painter.text(
                    rect.center(),
                    Align2::CENTER_CENTER,
                    content,
                    FontId::proportional(28.0),
                    fade(palette.text),
                );
            }
            ElementKind::Divider => {
                painter.line_segment([rect.left_center(), rect.right_center()], Stroke::new(2.0, fade(palette.grid)));
            }
            ElementKind::Spacer => {
                painter.rect_stroke(rect, 0.0, Stroke::new(1.0, fade(palette.grid)));
                painter.text(
                    rect.center(),
                    Align2::CENTER_CENTER,
                    element.kind.icon(),
                    FontId::proportional(12.0),
                    fade(palette.grid),
                );
            }
            _ => {
                painter.rect_filled(rect, 6.0, fade(palette.surface));
                painter.rect_stroke(rect, 6.0, Stroke::new(1.0, fade(palette.grid)));
                painter.text(
                    rect.left_top() + Vec2::splat(PADDING),
                    Align2::LEFT_TOP,
                    element.kind.icon(),
                    FontId::proportional(18.0),
                    fade(palette.accent),
                );
                painter.text(
                    rect.center(),
                    Align2::CENTER_CENTER,
                    content,
                    FontId::proportional(14.0),
                    fade(palette.text),
                );
            }
        }

        if element.locked {
            painter.text(
                rect.right_top() + Vec2::new(-PADDING, PADDING),
                Align2::RIGHT_TOP,
                "🔒",
                FontId::proportional(12.0),
                palette.text,
            );
        }
        if selected {
            painter.rect_stroke(rect.expand(3.0), 4.0, Stroke::new(2.0, palette.accent));
        }
    }

    fn wrapped_text(&self, painter: &Painter, rect: Rect, text: &str, size: f32, color: Color32) {
        let galley = painter.layout(text.to_owned(), FontId::proportional(size), color, rect.width());
        painter.galley(rect.left_top(), galley, color);
    }
}

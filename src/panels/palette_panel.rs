use crate::command::Command;
use crate::element::ElementKind;

/// Drag-and-drop payload carried from the palette to the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteDrag(pub ElementKind);

/// Element palette: click to add, or drag an entry onto the canvas.
///
/// The palette knows nothing about positions or z-order; the document
/// assigns both.
pub fn palette_panel(ui: &mut egui::Ui) -> Vec<Command> {
    let mut commands = Vec::new();

    ui.heading("Elements");
    ui.label("Click to add, or drag onto the canvas");
    ui.separator();

    egui::ScrollArea::vertical().show(ui, |ui| {
        for kind in ElementKind::ALL {
            let button = egui::Button::new(format!("{}  {}", kind.icon(), kind.label()))
                .min_size(egui::vec2(ui.available_width(), 28.0))
                .sense(egui::Sense::click_and_drag());
            let response = ui.add(button);

            if response.clicked() {
                log::info!("Palette add: {}", kind.id());
                commands.push(Command::AddElement { kind, position: None });
            }
            response.dnd_set_drag_payload(PaletteDrag(kind));
        }
    });

    commands
}

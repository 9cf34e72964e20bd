use crate::command::Command;
use crate::document::Document;
use crate::element::{Element, ElementId};

/// Drag-and-drop payload for reordering rows in the layers list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayerDrag(pub ElementId);

/// Layers list, front-most element first
#[derive(Debug, Default)]
pub struct LayersPanel {
    /// Element being renamed and the edit buffer
    renaming: Option<(ElementId, String)>,
    /// Focus the rename field on its first frame only
    focus_rename: bool,
}

impl LayersPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&mut self, ui: &mut egui::Ui, document: &Document) -> Vec<Command> {
        let mut commands = Vec::new();

        ui.heading("Layers");
        ui.label(format!("{} elements", document.len()));
        ui.separator();

        // a rename buffer for a deleted element is stale
        if self.renaming.as_ref().is_some_and(|(id, _)| !document.contains(*id)) {
            self.renaming = None;
        }

        egui::ScrollArea::vertical()
            .id_salt("layers_scroll")
            .max_height(ui.available_height() * 0.5)
            .show(ui, |ui| {
                for element in document.display_order() {
                    let z = document.z_index(element.id).unwrap_or_default();
                    let selected = document.active() == Some(element.id);
                    self.row(ui, element, z, selected, &mut commands);
                }
            });

        commands
    }

    fn row(&mut self, ui: &mut egui::Ui, element: &Element, z: i32, selected: bool, commands: &mut Vec<Command>) {
        let id = element.id;
        let row = ui.horizontal(|ui| {
            let handle = ui.add(egui::Label::new("☰").sense(egui::Sense::drag()));
            handle.dnd_set_drag_payload(LayerDrag(id));

            let eye = if element.visible { "👁" } else { "◌" };
            if ui.small_button(eye).on_hover_text("Toggle visibility").clicked() {
                commands.push(Command::ToggleVisibility { id });
            }
            let lock = if element.locked { "🔒" } else { "🔓" };
            if ui.small_button(lock).on_hover_text("Toggle lock").clicked() {
                commands.push(Command::ToggleLock { id });
            }

            match &mut self.renaming {
                Some((renaming_id, buffer)) if *renaming_id == id => {
                    let edit = ui.add(egui::TextEdit::singleline(buffer).desired_width(110.0));
                    if std::mem::take(&mut self.focus_rename) {
                        edit.request_focus();
                    }
                    if edit.lost_focus() {
                        let label = buffer.trim().to_string();
                        if !label.is_empty() && element.content.as_deref() != Some(label.as_str()) {
                            commands.push(Command::RenameElement { id, label });
                        }
                        self.renaming = None;
                    }
                }
                _ => {
                    let name = format!("{} {}", element.kind.icon(), element.display_name());
                    let label = ui.selectable_label(selected, name).on_hover_text("Double-click to rename");
                    if label.clicked() {
                        commands.push(Command::Select(Some(id)));
                    }
                    if label.double_clicked() {
                        self.renaming = Some((id, element.content.clone().unwrap_or_default()));
                        self.focus_rename = true;
                    }
                }
            }

            ui.weak(format!("z{z}"));
        });

        if selected {
            ui.horizontal(|ui| {
                ui.add_space(18.0);
                if ui.small_button("⏶ Top").clicked() {
                    commands.push(Command::MoveToTop { id });
                }
                if ui.small_button("⏷ Bottom").clicked() {
                    commands.push(Command::MoveToBottom { id });
                }
                if ui.small_button("⧉").on_hover_text("Duplicate").clicked() {
                    commands.push(Command::DuplicateElement { id });
                }
                if ui.small_button("🗑").on_hover_text("Delete").clicked() {
                    commands.push(Command::DeleteElement { id });
                }
            });
        }

        let response = row.response;
        if let Some(dragged) = response.dnd_hover_payload::<LayerDrag>() {
            if dragged.0 != id {
                ui.painter().hline(
                    response.rect.x_range(),
                    response.rect.top(),
                    egui::Stroke::new(2.0, ui.visuals().selection.bg_fill),
                );
            }
        }
        if let Some(dragged) = response.dnd_release_payload::<LayerDrag>() {
            if dragged.0 != id {
                commands.push(Command::ReorderLayer { dragged: dragged.0, target: id });
            }
        }
    }
}

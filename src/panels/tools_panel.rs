use crate::command::Command;
use crate::document::Document;
use crate::settings::{BuilderSettings, DevicePreview, Theme};
use crate::template::TemplateId;

/// Top toolbar: history, template, theme and device controls
pub fn tools_panel(
    ui: &mut egui::Ui,
    document: &Document,
    settings: &mut BuilderSettings,
    show_code: &mut bool,
) -> Vec<Command> {
    let mut commands = Vec::new();

    ui.horizontal(|ui| {
        ui.strong("Website Builder");
        ui.separator();

        // Undo/Redo section
        if ui
            .add_enabled(document.can_undo(), egui::Button::new("⟲ Undo"))
            .on_hover_text("Ctrl+Z")
            .clicked()
        {
            commands.push(Command::Undo);
        }
        if ui
            .add_enabled(document.can_redo(), egui::Button::new("⟳ Redo"))
            .on_hover_text("Ctrl+Shift+Z")
            .clicked()
        {
            commands.push(Command::Redo);
        }
        let history = document.history();
        ui.weak(format!("{}/{}", history.cursor() + 1, history.len()));
        ui.separator();

        let mut template = document.template();
        egui::ComboBox::from_label("Template")
            .selected_text(template.label())
            .show_ui(ui, |ui| {
                for option in TemplateId::ALL {
                    ui.selectable_value(&mut template, option, option.label());
                }
            });
        if template != document.template() {
            log::info!("Template selected from UI: {}", template.id());
            commands.push(Command::LoadTemplate(template));
        }

        egui::ComboBox::from_label("Theme")
            .selected_text(settings.theme.label())
            .show_ui(ui, |ui| {
                for option in Theme::ALL {
                    ui.selectable_value(&mut settings.theme, option, option.label());
                }
            });
        ui.separator();

        for device in DevicePreview::ALL {
            if ui.selectable_label(settings.device == device, device.label()).clicked() {
                settings.device = device;
            }
        }
        ui.separator();

        ui.checkbox(&mut settings.show_grid, "Grid");
        if ui.button("</> Generate code").clicked() {
            *show_code = true;
        }
    });

    commands
}

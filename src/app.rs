use crate::animation::AnimationPlayer;
use crate::clock::PreviewClock;
use crate::codegen;
use crate::command::Command;
use crate::document::Document;
use crate::panels::{AnimationPanel, CanvasPanel, LayersPanel, palette_panel, tools_panel};
use crate::settings::BuilderSettings;

/// Which export the code window shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum CodeFormat {
    #[default]
    Html,
    Json,
}

/// The interactive website builder.
///
/// Owns the one [`Document`]; every panel gets it by reference and hands
/// back commands that are executed here, once per frame.
pub struct BuilderApp {
    settings: BuilderSettings,
    document: Document,
    player: AnimationPlayer,
    clock: PreviewClock,
    canvas: CanvasPanel,
    layers: LayersPanel,
    animation: AnimationPanel,
    show_code: bool,
    code_format: CodeFormat,
}

impl Default for BuilderApp {
    fn default() -> Self {
        Self::with_settings(BuilderSettings::default())
    }
}

impl BuilderApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        // Only preferences are restored; the draft layout always starts fresh
        let settings: BuilderSettings = cc
            .storage
            .and_then(|storage| eframe::get_value(storage, eframe::APP_KEY))
            .unwrap_or_default();
        Self::with_settings(settings)
    }

    pub fn with_settings(settings: BuilderSettings) -> Self {
        log::info!("Starting builder with template '{}'", settings.start_template.id());
        Self {
            document: Document::new(settings.start_template),
            settings,
            player: AnimationPlayer::new(),
            clock: PreviewClock::new(),
            canvas: CanvasPanel::new(),
            layers: LayersPanel::new(),
            animation: AnimationPanel::new(),
            show_code: false,
            code_format: CodeFormat::default(),
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn settings(&self) -> &BuilderSettings {
        &self.settings
    }

    /// Runs commands in order. Failures are stale ids or locked elements and
    /// only get logged.
    pub fn execute(&mut self, commands: impl IntoIterator<Item = Command>) {
        for command in commands {
            log::debug!("Executing {}", command.name());
            if matches!(command, Command::LoadTemplate(_)) {
                self.player.reset();
            }
            if let Err(err) = command.execute(&mut self.document) {
                log::debug!("Ignored {}: {err}", command.name());
            }
        }
    }

    fn shortcuts(&self, ctx: &egui::Context) -> Vec<Command> {
        if ctx.wants_keyboard_input() {
            return Vec::new();
        }
        ctx.input_mut(|input| {
            let mut commands = Vec::new();
            // redo first: the undo shortcut also matches with shift held
            if input.consume_key(egui::Modifiers::COMMAND | egui::Modifiers::SHIFT, egui::Key::Z)
                || input.consume_key(egui::Modifiers::COMMAND, egui::Key::Y)
            {
                commands.push(Command::Redo);
            }
            if input.consume_key(egui::Modifiers::COMMAND, egui::Key::Z) {
                commands.push(Command::Undo);
            }
            if input.consume_key(egui::Modifiers::NONE, egui::Key::Delete) {
                if let Some(id) = self.document.active() {
                    commands.push(Command::DeleteElement { id });
                }
            }
            if input.consume_key(egui::Modifiers::NONE, egui::Key::Escape) {
                commands.push(Command::Select(None));
            }
            commands
        })
    }

    fn code_window(&mut self, ctx: &egui::Context) {
        let snapshot = self.document.snapshot();
        let code_format = &mut self.code_format;

        egui::Window::new("Generated code")
            .open(&mut self.show_code)
            .default_size([560.0, 420.0])
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.selectable_value(code_format, CodeFormat::Html, "HTML");
                    ui.selectable_value(code_format, CodeFormat::Json, "JSON");
                });

                let code = match code_format {
                    CodeFormat::Html => codegen::generate_markup(&snapshot),
                    CodeFormat::Json => codegen::export_json(&snapshot).unwrap_or_else(|err| {
                        log::warn!("Failed to export snapshot: {err}");
                        format!("// export failed: {err}")
                    }),
                };

                if ui.button("📋 Copy").clicked() {
                    ui.ctx().copy_text(code.clone());
                }
                ui.separator();
                egui::ScrollArea::both().show(ui, |ui| {
                    ui.add(
                        egui::TextEdit::multiline(&mut code.as_str())
                            .code_editor()
                            .desired_width(f32::INFINITY),
                    );
                });
            });
    }
}

impl eframe::App for BuilderApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, &self.settings);
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = self.clock.now();
        let mut commands = self.shortcuts(ctx);

        egui::TopBottomPanel::top("tools_panel").show(ctx, |ui| {
            commands.extend(tools_panel(ui, &self.document, &mut self.settings, &mut self.show_code));
        });

        egui::SidePanel::left("palette_panel")
            .resizable(true)
            .default_width(200.0)
            .show(ctx, |ui| {
                commands.extend(palette_panel(ui));
            });

        egui::SidePanel::right("inspector_panel")
            .resizable(true)
            .default_width(280.0)
            .show(ctx, |ui| {
                commands.extend(self.layers.show(ui, &self.document));
                ui.separator();
                commands.extend(self.animation.show(
                    ui,
                    &self.document,
                    &mut self.player,
                    self.settings.delay_step,
                    now,
                ));
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            commands.extend(self.canvas.show(ui, &self.document, &self.settings, &self.player, now));
        });

        if self.show_code {
            self.code_window(ctx);
        }

        self.execute(commands);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{ElementId, ElementKind};

    #[test]
    fn test_app_starts_from_configured_template() {
        let settings = BuilderSettings {
            start_template: crate::template::TemplateId::Landing,
            ..Default::default()
        };
        let app = BuilderApp::with_settings(settings);
        assert_eq!(app.document().len(), 6);
        assert_eq!(app.document().history().len(), 1);
    }

    #[test]
    fn test_execute_ignores_stale_ids() {
        let mut app = BuilderApp::default();
        app.execute([
            Command::AddElement {
                kind: ElementKind::Video,
                position: None,
            },
            Command::DeleteElement { id: ElementId::new() },
            Command::MoveToTop { id: ElementId::new() },
        ]);
        assert_eq!(app.document().len(), 4);
        assert_eq!(app.document().history().len(), 2);
    }

    #[test]
    fn test_frame_runs_without_input() {
        let app = BuilderApp::default();
        let ctx = egui::Context::default();
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            let commands = app.shortcuts(ctx);
            assert!(commands.is_empty());
        });
    }
}

use crate::animation::{AnimationPlayer, AnimationPreset};
use crate::command::Command;
use crate::document::Document;
use crate::element::ElementId;

/// Upper bound offered by the delay editor, in seconds
const MAX_DELAY: f32 = 10.0;

/// Animation binding editor for the active element, plus preview controls
#[derive(Debug, Default)]
pub struct AnimationPanel {
    /// Delay being dragged; committed once the edit finishes
    pending_delay: Option<(ElementId, f32)>,
}

impl AnimationPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        document: &Document,
        player: &mut AnimationPlayer,
        delay_step: f32,
        now: f64,
    ) -> Vec<Command> {
        let mut commands = Vec::new();

        ui.heading("Animation");
        ui.horizontal(|ui| {
            if ui.button("▶ Preview").on_hover_text("Play every animation on the canvas").clicked() {
                player.play(now);
            }
            if ui
                .add_enabled(player.is_active(), egui::Button::new("⟲ Reset"))
                .on_hover_text("Show elements at rest")
                .clicked()
            {
                player.reset();
            }
        });
        let animated = document.elements().iter().filter(|element| element.animation.is_some()).count();
        ui.weak(format!("{animated} animated elements"));
        ui.separator();

        let Some(binding) = document.active().and_then(|id| document.animation_binding(id)) else {
            ui.label("Select an element to animate it");
            return commands;
        };
        let id = binding.element_id;

        let mut preset = binding.preset;
        egui::ComboBox::from_label("Preset")
            .selected_text(preset.map_or("None", AnimationPreset::label))
            .show_ui(ui, |ui| {
                ui.selectable_value(&mut preset, None, "None");
                for option in AnimationPreset::ALL {
                    ui.selectable_value(&mut preset, Some(option), option.label());
                }
            });
        if preset != binding.preset {
            commands.push(Command::ApplyAnimation { id, preset });
        }

        let mut delay = match self.pending_delay {
            Some((pending_id, seconds)) if pending_id == id => seconds,
            _ => binding.delay,
        };
        let response = ui
            .add_enabled_ui(binding.preset.is_some(), |ui| {
                ui.horizontal(|ui| {
                    ui.label("Delay");
                    ui.add(
                        egui::DragValue::new(&mut delay)
                            .speed(delay_step)
                            .range(0.0..=MAX_DELAY)
                            .fixed_decimals(2)
                            .suffix(" s"),
                    )
                })
                .inner
            })
            .inner;

        if response.changed() {
            self.pending_delay = Some((id, delay));
        }
        let finished = response.drag_stopped()
            || response.lost_focus()
            || (response.changed() && !response.dragged() && !response.has_focus());
        if finished {
            if let Some((pending_id, seconds)) = self.pending_delay.take() {
                if pending_id == id && seconds != binding.delay {
                    commands.push(Command::SetAnimationDelay { id, seconds });
                }
            }
        }

        commands
    }
}

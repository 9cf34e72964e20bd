use egui::Pos2;

use super::CommandResult;
use crate::animation::AnimationPreset;
use crate::document::Document;
use crate::element::{ElementId, ElementKind, ElementPatch};
use crate::template::TemplateId;

/// Requests a panel can make against the document
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Place a new element; the palette never picks a z-order itself
    AddElement {
        kind: ElementKind,
        position: Option<Pos2>,
    },
    /// Merge fields into an element (position-only patches are transient)
    UpdateElement {
        id: ElementId,
        patch: ElementPatch,
    },
    /// Move an element on the canvas without recording history
    MoveElement {
        id: ElementId,
        position: Pos2,
    },
    RenameElement {
        id: ElementId,
        label: String,
    },
    DeleteElement {
        id: ElementId,
    },
    DuplicateElement {
        id: ElementId,
    },
    ToggleVisibility {
        id: ElementId,
    },
    ToggleLock {
        id: ElementId,
    },
    Select(Option<ElementId>),

    SetZIndex {
        id: ElementId,
        z: i32,
    },
    MoveToTop {
        id: ElementId,
    },
    MoveToBottom {
        id: ElementId,
    },
    /// Drop `dragged` onto `target` in the layers list
    ReorderLayer {
        dragged: ElementId,
        target: ElementId,
    },

    ApplyAnimation {
        id: ElementId,
        preset: Option<AnimationPreset>,
    },
    SetAnimationDelay {
        id: ElementId,
        seconds: f32,
    },

    LoadTemplate(TemplateId),
    Undo,
    Redo,
}

impl Command {
    /// Execute the command against the document
    pub fn execute(&self, document: &mut Document) -> CommandResult {
        match self {
            Command::AddElement { kind, position } => {
                document.add_element(*kind, *position);
            }
            Command::UpdateElement { id, patch } => document.update_element(*id, patch.clone())?,
            Command::MoveElement { id, position } => {
                document.apply_transient(*id, ElementPatch::position(*position))?
            }
            Command::RenameElement { id, label } => document.rename_element(*id, label.clone())?,
            Command::DeleteElement { id } => document.delete_element(*id)?,
            Command::DuplicateElement { id } => {
                document.duplicate_element(*id)?;
            }
            Command::ToggleVisibility { id } => document.toggle_visibility(*id)?,
            Command::ToggleLock { id } => document.toggle_lock(*id)?,
            Command::Select(id) => document.select(*id),
            Command::SetZIndex { id, z } => document.set_z_index(*id, *z)?,
            Command::MoveToTop { id } => document.move_to_top(*id)?,
            Command::MoveToBottom { id } => document.move_to_bottom(*id)?,
            Command::ReorderLayer { dragged, target } => document.reorder_layer(*dragged, *target)?,
            Command::ApplyAnimation { id, preset } => document.apply_animation(*id, *preset)?,
            Command::SetAnimationDelay { id, seconds } => {
                document.update_animation_delay(*id, *seconds)?
            }
            Command::LoadTemplate(template) => document.load_template(*template),
            Command::Undo => {
                document.undo();
            }
            Command::Redo => {
                document.redo();
            }
        }
        Ok(())
    }

    /// Short name used in logs
    pub fn name(&self) -> &'static str {
        match self {
            Command::AddElement { .. } => "AddElement",
            Command::UpdateElement { .. } => "UpdateElement",
            Command::MoveElement { .. } => "MoveElement",
            Command::RenameElement { .. } => "RenameElement",
            Command::DeleteElement { .. } => "DeleteElement",
            Command::DuplicateElement { .. } => "DuplicateElement",
            Command::ToggleVisibility { .. } => "ToggleVisibility",
            Command::ToggleLock { .. } => "ToggleLock",
            Command::Select(_) => "Select",
            Command::SetZIndex { .. } => "SetZIndex",
            Command::MoveToTop { .. } => "MoveToTop",
            Command::MoveToBottom { .. } => "MoveToBottom",
            Command::ReorderLayer { .. } => "ReorderLayer",
            Command::ApplyAnimation { .. } => "ApplyAnimation",
            Command::SetAnimationDelay { .. } => "SetAnimationDelay",
            Command::LoadTemplate(_) => "LoadTemplate",
            Command::Undo => "Undo",
            Command::Redo => "Redo",
        }
    }
}

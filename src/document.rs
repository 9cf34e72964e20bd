use egui::{Pos2, Vec2};
use serde::Serialize;

use crate::animation::{AnimationBinding, AnimationPreset};
use crate::command::History;
use crate::element::{Element, ElementId, ElementKind, ElementPatch};
use crate::error::{DocumentError, DocumentResult};
use crate::layer::LayerIndex;
use crate::template::TemplateId;

/// Offset applied to a duplicated element so it does not hide its source
const DUPLICATE_OFFSET: Vec2 = Vec2::new(20.0, 20.0);

/// A full, immutable copy of the document content at one point in time
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Snapshot {
    pub elements: Vec<Element>,
    pub layers: LayerIndex,
}

impl Snapshot {
    /// Elements front to back
    pub fn display_order(&self) -> Vec<&Element> {
        self.layers
            .display_order()
            .into_iter()
            .filter_map(|id| self.elements.iter().find(|element| element.id == id))
            .collect()
    }
}

/// The visitor's draft layout.
///
/// A single owned value: panels read it through `&Document` and change it
/// only by issuing [`crate::Command`]s, which call the methods below.
///
/// Edits come in two tiers:
/// - committed edits (`apply_committed`, add, delete, toggles, layer and
///   animation changes) record a snapshot in the history;
/// - transient edits (`apply_transient`, canvas drags) amend the current
///   snapshot and never grow the history.
#[derive(Debug, Clone)]
pub struct Document {
    elements: Vec<Element>,
    layers: LayerIndex,
    history: History<Snapshot>,
    active: Option<ElementId>,
    template: TemplateId,
}

impl Default for Document {
    fn default() -> Self {
        Self::new(TemplateId::default())
    }
}

impl Document {
    /// Creates a document initialised from `template`
    pub fn new(template: TemplateId) -> Self {
        let mut document = Self {
            elements: Vec::new(),
            layers: LayerIndex::new(),
            history: History::new(Snapshot::default()),
            active: None,
            template,
        };
        document.load_template(template);
        document
    }

    /// Replaces every element with the template's and resets the history
    pub fn load_template(&mut self, template: TemplateId) {
        self.elements = template.instantiate();
        self.layers = self
            .elements
            .iter()
            .zip(1..)
            .map(|(element, z)| (element.id, z))
            .collect();
        self.active = None;
        self.template = template;
        self.history.reset(self.snapshot());
        log::info!(
            "Loaded template '{}' with {} elements",
            template.id(),
            self.elements.len()
        );
    }

    // Queries

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.iter().find(|element| element.id == id)
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.element(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn layers(&self) -> &LayerIndex {
        &self.layers
    }

    pub fn z_index(&self, id: ElementId) -> Option<i32> {
        self.layers.get(id)
    }

    /// Elements front to back, as listed in the layers panel
    pub fn display_order(&self) -> Vec<&Element> {
        self.layers
            .display_order()
            .into_iter()
            .filter_map(|id| self.element(id))
            .collect()
    }

    pub fn active(&self) -> Option<ElementId> {
        self.active
    }

    pub fn active_element(&self) -> Option<&Element> {
        self.active.and_then(|id| self.element(id))
    }

    pub fn template(&self) -> TemplateId {
        self.template
    }

    pub fn animation_binding(&self, id: ElementId) -> Option<AnimationBinding> {
        self.element(id).map(Element::animation_binding)
    }

    /// A consistent copy of the current content
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            elements: self.elements.clone(),
            layers: self.layers.clone(),
        }
    }

    pub fn history(&self) -> &History<Snapshot> {
        &self.history
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    // Selection

    /// Selects an element. Unknown ids clear the selection.
    pub fn select(&mut self, id: Option<ElementId>) {
        self.active = id.filter(|id| self.contains(*id));
    }

    // Element store

    /// Places a new element of `kind` above everything else and selects it
    pub fn add_element(&mut self, kind: ElementKind, position: Option<Pos2>) -> ElementId {
        let mut element = Element::new(kind);
        element.position = position;
        let id = element.id;

        self.elements.push(element);
        let z = self.layers.insert_top(id);
        self.active = Some(id);
        self.commit();
        log::debug!("Added {kind} element {id} at z {z}");
        id
    }

    /// Merges `patch` into an element.
    ///
    /// Position-only patches are transient; everything else is committed.
    pub fn update_element(&mut self, id: ElementId, patch: ElementPatch) -> DocumentResult<()> {
        if patch.is_position_only() {
            self.apply_transient(id, patch)
        } else {
            self.apply_committed(id, patch)
        }
    }

    /// Applies `patch` without recording history.
    ///
    /// Locked elements refuse position changes.
    pub fn apply_transient(&mut self, id: ElementId, patch: ElementPatch) -> DocumentResult<()> {
        self.merge_patch(id, &patch)?;
        let snapshot = self.snapshot();
        self.history.amend(snapshot);
        Ok(())
    }

    /// Applies `patch` and records the result in history.
    ///
    /// Locked elements refuse position changes here too.
    pub fn apply_committed(&mut self, id: ElementId, patch: ElementPatch) -> DocumentResult<()> {
        self.merge_patch(id, &patch)?;
        self.commit();
        Ok(())
    }

    /// Relabels an element from the layers panel
    pub fn rename_element(&mut self, id: ElementId, label: impl Into<String>) -> DocumentResult<()> {
        self.apply_committed(id, ElementPatch::content(label))
    }

    /// Shows or hides an element. Recorded, so undo reverts just the toggle.
    pub fn toggle_visibility(&mut self, id: ElementId) -> DocumentResult<()> {
        let visible = self.element(id).ok_or(DocumentError::ElementNotFound(id))?.visible;
        self.apply_committed(
            id,
            ElementPatch {
                visible: Some(!visible),
                ..Default::default()
            },
        )
    }

    /// Locks or unlocks an element. Recorded like visibility.
    pub fn toggle_lock(&mut self, id: ElementId) -> DocumentResult<()> {
        let locked = self.element(id).ok_or(DocumentError::ElementNotFound(id))?.locked;
        self.apply_committed(
            id,
            ElementPatch {
                locked: Some(!locked),
                ..Default::default()
            },
        )
    }

    /// Removes an element and its layer entry
    pub fn delete_element(&mut self, id: ElementId) -> DocumentResult<()> {
        let index = self
            .elements
            .iter()
            .position(|element| element.id == id)
            .ok_or(DocumentError::ElementNotFound(id))?;
        self.elements.remove(index);
        self.layers.remove(id);
        if self.active == Some(id) {
            self.active = None;
        }
        self.commit();
        log::debug!("Deleted element {id}");
        Ok(())
    }

    /// Copies an element to a fresh id, slightly offset and on top
    pub fn duplicate_element(&mut self, id: ElementId) -> DocumentResult<ElementId> {
        let source = self.element(id).ok_or(DocumentError::ElementNotFound(id))?;
        let mut copy = source.clone();
        copy.id = ElementId::new();
        copy.position = source.position.map(|pos| pos + DUPLICATE_OFFSET);
        copy.locked = false;
        let copy_id = copy.id;

        self.elements.push(copy);
        self.layers.insert_top(copy_id);
        self.active = Some(copy_id);
        self.commit();
        Ok(copy_id)
    }

    // Layer index

    pub fn set_z_index(&mut self, id: ElementId, z: i32) -> DocumentResult<()> {
        self.layer_edit(id, |layers| layers.set(id, z))
    }

    pub fn move_to_top(&mut self, id: ElementId) -> DocumentResult<()> {
        self.layer_edit(id, |layers| layers.move_to_top(id))
    }

    pub fn move_to_bottom(&mut self, id: ElementId) -> DocumentResult<()> {
        self.layer_edit(id, |layers| layers.move_to_bottom(id))
    }

    /// Drops `dragged` onto `target` in the layers list.
    ///
    /// A drop onto self or onto a stale target changes nothing and records
    /// nothing.
    pub fn reorder_layer(&mut self, dragged: ElementId, target: ElementId) -> DocumentResult<()> {
        if !self.contains(dragged) {
            return Err(DocumentError::ElementNotFound(dragged));
        }
        if self.layers.reorder(dragged, target) {
            self.commit();
        }
        Ok(())
    }

    // Animation binding

    /// Assigns (or clears) an element's animation. Does not play it.
    pub fn apply_animation(&mut self, id: ElementId, preset: Option<AnimationPreset>) -> DocumentResult<()> {
        self.apply_committed(id, ElementPatch::animation(preset))
    }

    /// Sets the start delay, clamped to zero and rounded to hundredths
    pub fn update_animation_delay(&mut self, id: ElementId, seconds: f32) -> DocumentResult<()> {
        self.apply_committed(id, ElementPatch::animation_delay(seconds))
    }

    // History

    /// Restores the previous snapshot. Returns false at the start of history.
    pub fn undo(&mut self) -> bool {
        let Some(snapshot) = self.history.undo().cloned() else {
            return false;
        };
        self.restore(snapshot);
        log::debug!("Undo to history entry {}", self.history.cursor());
        true
    }

    /// Restores the next snapshot. Returns false at the end of history.
    pub fn redo(&mut self) -> bool {
        let Some(snapshot) = self.history.redo().cloned() else {
            return false;
        };
        self.restore(snapshot);
        log::debug!("Redo to history entry {}", self.history.cursor());
        true
    }

    fn restore(&mut self, snapshot: Snapshot) {
        self.elements = snapshot.elements;
        self.layers = snapshot.layers;
        if self.active.is_some_and(|id| !self.contains(id)) {
            self.active = None;
        }
    }

    fn commit(&mut self) {
        let snapshot = self.snapshot();
        self.history.record(snapshot);
    }

    fn merge_patch(&mut self, id: ElementId, patch: &ElementPatch) -> DocumentResult<()> {
        let element = self.element_mut(id)?;
        if element.locked && patch.position.is_some() {
            return Err(DocumentError::ElementLocked(id));
        }
        element.merge(patch);
        Ok(())
    }

    fn element_mut(&mut self, id: ElementId) -> DocumentResult<&mut Element> {
        self.elements
            .iter_mut()
            .find(|element| element.id == id)
            .ok_or(DocumentError::ElementNotFound(id))
    }

    fn layer_edit(&mut self, id: ElementId, edit: impl FnOnce(&mut LayerIndex) -> bool) -> DocumentResult<()> {
        if !self.contains(id) || !edit(&mut self.layers) {
            return Err(DocumentError::ElementNotFound(id));
        }
        self.commit();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_document_has_single_history_entry() {
        let doc = Document::new(TemplateId::Minimal);
        assert_eq!(doc.len(), 3);
        assert_eq!(doc.history().len(), 1);
        assert_eq!(doc.history().cursor(), 0);
        assert_eq!(doc.layers().len(), 3);
        assert_eq!(doc.active(), None);
    }

    #[test]
    fn test_template_layers_follow_definition_order() {
        let doc = Document::new(TemplateId::Minimal);
        let zs: Vec<i32> = doc
            .elements()
            .iter()
            .filter_map(|element| doc.z_index(element.id))
            .collect();
        assert_eq!(zs, vec![1, 2, 3]);
    }

    #[test]
    fn test_select_unknown_clears() {
        let mut doc = Document::new(TemplateId::Minimal);
        let id = doc.elements()[0].id;
        doc.select(Some(id));
        assert_eq!(doc.active(), Some(id));
        doc.select(Some(ElementId::new()));
        assert_eq!(doc.active(), None);
    }

    #[test]
    fn test_locked_element_rejects_moves() {
        let mut doc = Document::new(TemplateId::Minimal);
        let id = doc.elements()[0].id;
        doc.toggle_lock(id).unwrap();

        let result = doc.update_element(id, ElementPatch::position(Pos2::new(1.0, 1.0)));
        assert_eq!(result, Err(DocumentError::ElementLocked(id)));
        assert_eq!(doc.element(id).unwrap().position, Some(Pos2::new(40.0, 40.0)));
    }

    #[test]
    fn test_locked_element_rejects_mixed_patch() {
        let mut doc = Document::new(TemplateId::Minimal);
        let id = doc.elements()[0].id;
        doc.toggle_lock(id).unwrap();
        let len = doc.history().len();

        let patch = ElementPatch::content("Moved").with_position(Pos2::new(300.0, 300.0));
        assert_eq!(doc.update_element(id, patch), Err(DocumentError::ElementLocked(id)));

        let element = doc.element(id).unwrap();
        assert_eq!(element.position, Some(Pos2::new(40.0, 40.0)));
        assert_eq!(element.content.as_deref(), Some("Clean & Simple"));
        assert_eq!(doc.history().len(), len);
    }

    #[test]
    fn test_toggle_undo_keeps_previous_edit() {
        let mut doc = Document::new(TemplateId::Blank);
        let id = doc.add_element(ElementKind::Heading, None);
        let len = doc.history().len();

        doc.toggle_visibility(id).unwrap();
        assert_eq!(doc.history().len(), len + 1);
        assert!(doc.undo());

        assert!(doc.element(id).is_some_and(|element| element.visible));
        assert_eq!(doc.len(), 1);
    }

    #[test]
    fn test_undo_clears_stale_selection() {
        let mut doc = Document::new(TemplateId::Blank);
        let id = doc.add_element(ElementKind::Image, None);
        assert_eq!(doc.active(), Some(id));
        assert!(doc.undo());
        assert_eq!(doc.active(), None);
    }

    #[test]
    fn test_duplicate_offsets_and_tops() {
        let mut doc = Document::new(TemplateId::Minimal);
        let source = doc.elements()[0].id;
        let copy = doc.duplicate_element(source).unwrap();

        let source_pos = doc.element(source).unwrap().position.unwrap();
        assert_eq!(doc.element(copy).unwrap().position, Some(source_pos + DUPLICATE_OFFSET));
        assert_eq!(doc.display_order()[0].id, copy);
        assert_eq!(doc.history().len(), 2);
    }
}

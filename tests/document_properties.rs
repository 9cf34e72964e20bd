use std::collections::HashSet;

use egui::Pos2;
use proptest::prelude::*;
use site_builder::{Document, ElementId, ElementKind, ElementPatch, TemplateId};

/// Edits picked by index into the current element list
#[derive(Debug, Clone)]
enum Op {
    Add(usize),
    Move(usize, f32, f32),
    Content(usize),
    Delete(usize),
    Duplicate(usize),
    Top(usize),
    Bottom(usize),
    Reorder(usize, usize),
    SetZ(usize, i32),
    Undo,
    Redo,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..ElementKind::ALL.len()).prop_map(Op::Add),
        (any::<usize>(), 0.0f32..800.0, 0.0f32..600.0).prop_map(|(i, x, y)| Op::Move(i, x, y)),
        any::<usize>().prop_map(Op::Content),
        any::<usize>().prop_map(Op::Delete),
        any::<usize>().prop_map(Op::Duplicate),
        any::<usize>().prop_map(Op::Top),
        any::<usize>().prop_map(Op::Bottom),
        (any::<usize>(), any::<usize>()).prop_map(|(a, b)| Op::Reorder(a, b)),
        (any::<usize>(), z_strategy()).prop_map(|(i, z)| Op::SetZ(i, z)),
        Just(Op::Undo),
        Just(Op::Redo),
    ]
}

// extremes show up often enough to hit the overflow edges
fn z_strategy() -> impl Strategy<Value = i32> {
    prop_oneof![
        Just(i32::MAX),
        Just(i32::MIN),
        Just(i32::MAX - 1),
        Just(i32::MIN + 1),
        any::<i32>(),
    ]
}

fn pick(doc: &Document, index: usize) -> Option<ElementId> {
    let elements = doc.elements();
    (!elements.is_empty()).then(|| elements[index % elements.len()].id)
}

fn apply(doc: &mut Document, op: &Op) {
    match *op {
        Op::Add(kind) => {
            doc.add_element(ElementKind::ALL[kind], None);
        }
        Op::Move(i, x, y) => {
            if let Some(id) = pick(doc, i) {
                doc.update_element(id, ElementPatch::position(Pos2::new(x, y))).unwrap();
            }
        }
        Op::Content(i) => {
            if let Some(id) = pick(doc, i) {
                doc.update_element(id, ElementPatch::content(format!("text {i}"))).unwrap();
            }
        }
        Op::Delete(i) => {
            if let Some(id) = pick(doc, i) {
                doc.delete_element(id).unwrap();
            }
        }
        Op::Duplicate(i) => {
            if let Some(id) = pick(doc, i) {
                doc.duplicate_element(id).unwrap();
            }
        }
        Op::Top(i) => {
            if let Some(id) = pick(doc, i) {
                doc.move_to_top(id).unwrap();
            }
        }
        Op::Bottom(i) => {
            if let Some(id) = pick(doc, i) {
                doc.move_to_bottom(id).unwrap();
            }
        }
        Op::Reorder(a, b) => {
            if let (Some(dragged), Some(target)) = (pick(doc, a), pick(doc, b)) {
                doc.reorder_layer(dragged, target).unwrap();
            }
        }
        Op::SetZ(i, z) => {
            if let Some(id) = pick(doc, i) {
                doc.set_z_index(id, z).unwrap();
            }
        }
        Op::Undo => {
            doc.undo();
        }
        Op::Redo => {
            doc.redo();
        }
    }
}

fn assert_consistent(doc: &Document) {
    let ids: HashSet<ElementId> = doc.elements().iter().map(|e| e.id).collect();
    assert_eq!(ids.len(), doc.len(), "element ids must be unique");
    assert_eq!(doc.layers().len(), doc.len());
    for id in &ids {
        assert!(doc.layers().contains(*id));
    }
    assert!(doc.history().cursor() < doc.history().len());
    if let Some(active) = doc.active() {
        assert!(doc.contains(active));
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn document_stays_consistent(ops in prop::collection::vec(op_strategy(), 0..40)) {
        let mut doc = Document::new(TemplateId::Landing);
        for op in &ops {
            apply(&mut doc, op);
            assert_consistent(&doc);
        }
    }

    #[test]
    fn added_elements_land_on_top(kinds in prop::collection::vec(0..ElementKind::ALL.len(), 1..20)) {
        let mut doc = Document::new(TemplateId::Agency);
        let mut last_top = doc.layers().max().unwrap_or(0);
        for kind in kinds {
            let id = doc.add_element(ElementKind::ALL[kind], None);
            let z = doc.z_index(id).unwrap();
            prop_assert!(z > last_top);
            prop_assert_eq!(doc.display_order()[0].id, id);
            last_top = z;
        }
    }

    #[test]
    fn undo_then_redo_restores_snapshot(ops in prop::collection::vec(op_strategy(), 1..30)) {
        let mut doc = Document::new(TemplateId::Minimal);
        for op in &ops {
            apply(&mut doc, op);
        }
        let before = doc.snapshot();
        if doc.undo() {
            prop_assert!(doc.redo());
            prop_assert_eq!(doc.snapshot(), before);
        }
    }

    #[test]
    fn move_to_top_wins_display_order(ops in prop::collection::vec(op_strategy(), 0..30), pick_index in any::<usize>()) {
        let mut doc = Document::new(TemplateId::Portfolio);
        for op in &ops {
            apply(&mut doc, op);
        }
        if let Some(id) = pick(&doc, pick_index) {
            doc.move_to_top(id).unwrap();
            prop_assert_eq!(doc.display_order()[0].id, id);
        }
    }

    #[test]
    fn top_and_bottom_survive_extreme_z(pick_index in any::<usize>(), z in z_strategy(), top in any::<bool>()) {
        let mut doc = Document::new(TemplateId::Landing);
        let id = pick(&doc, pick_index).unwrap();
        doc.set_z_index(id, z).unwrap();

        let added = doc.add_element(ElementKind::Button, None);
        prop_assert_eq!(doc.display_order()[0].id, added);

        if top {
            doc.move_to_top(id).unwrap();
            prop_assert_eq!(doc.display_order()[0].id, id);
        } else {
            doc.move_to_bottom(id).unwrap();
            prop_assert_eq!(doc.display_order().last().map(|e| e.id), Some(id));
        }
        assert_consistent(&doc);
    }

    #[test]
    fn position_updates_never_grow_history(moves in prop::collection::vec((0.0f32..800.0, 0.0f32..600.0), 1..50)) {
        let mut doc = Document::new(TemplateId::Minimal);
        let id = doc.elements()[0].id;
        let len = doc.history().len();
        for (x, y) in moves {
            doc.update_element(id, ElementPatch::position(Pos2::new(x, y))).unwrap();
        }
        prop_assert_eq!(doc.history().len(), len);
    }

    #[test]
    fn edit_after_undo_truncates_redo(extra in 1usize..6, undos in 1usize..6) {
        let mut doc = Document::new(TemplateId::Blank);
        for _ in 0..extra {
            doc.add_element(ElementKind::Paragraph, None);
        }
        for _ in 0..undos {
            doc.undo();
        }
        let cursor = doc.history().cursor();
        doc.add_element(ElementKind::Button, None);
        prop_assert_eq!(doc.history().len(), cursor + 2);
        prop_assert!(!doc.can_redo());
    }
}

use std::collections::BTreeMap;

use serde::Serialize;

use crate::element::ElementId;

/// Stacking order for every live element.
///
/// Each element id has exactly one z value. Higher values are drawn in front
/// and listed first in the layers panel. Values need not be contiguous and
/// duplicates are allowed; ties resolve by ascending id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LayerIndex {
    z_orders: BTreeMap<ElementId, i32>,
}

impl LayerIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.z_orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.z_orders.is_empty()
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.z_orders.contains_key(&id)
    }

    pub fn get(&self, id: ElementId) -> Option<i32> {
        self.z_orders.get(&id).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ElementId, i32)> + '_ {
        self.z_orders.iter().map(|(id, z)| (*id, *z))
    }

    pub fn max(&self) -> Option<i32> {
        self.z_orders.values().copied().max()
    }

    pub fn min(&self) -> Option<i32> {
        self.z_orders.values().copied().min()
    }

    /// Adds `id` above everything else and returns its z value
    pub fn insert_top(&mut self, id: ElementId) -> i32 {
        let z = self.next_top();
        self.z_orders.insert(id, z);
        z
    }

    pub fn remove(&mut self, id: ElementId) -> Option<i32> {
        self.z_orders.remove(&id)
    }

    /// Overwrites the z value of `id`. Returns false if `id` is unknown.
    pub fn set(&mut self, id: ElementId, z: i32) -> bool {
        match self.z_orders.get_mut(&id) {
            Some(slot) => {
                *slot = z;
                true
            }
            None => false,
        }
    }

    pub fn move_to_top(&mut self, id: ElementId) -> bool {
        if !self.contains(id) {
            return false;
        }
        let z = self.next_top();
        self.set(id, z)
    }

    pub fn move_to_bottom(&mut self, id: ElementId) -> bool {
        if !self.contains(id) {
            return false;
        }
        let z = self.next_bottom();
        self.set(id, z)
    }

    /// One above the current maximum. Compacts the index first when the
    /// maximum already sits at `i32::MAX`.
    fn next_top(&mut self) -> i32 {
        if self.max() == Some(i32::MAX) {
            log::debug!("Layer index reached i32::MAX, renormalizing");
            self.renormalize();
        }
        self.max().map_or(1, |max| max + 1)
    }

    /// One below the current minimum, compacting at `i32::MIN`
    fn next_bottom(&mut self) -> i32 {
        if self.min() == Some(i32::MIN) {
            log::debug!("Layer index reached i32::MIN, renormalizing");
            self.renormalize();
        }
        self.min().map_or(0, |min| min - 1)
    }

    /// Ids front to back: z descending, ties by ascending id
    pub fn display_order(&self) -> Vec<ElementId> {
        let mut ids: Vec<(ElementId, i32)> = self.iter().collect();
        ids.sort_by(|(a_id, a_z), (b_id, b_z)| b_z.cmp(a_z).then(a_id.cmp(b_id)));
        ids.into_iter().map(|(id, _)| id).collect()
    }

    /// Drag-to-reorder in the layers list.
    ///
    /// `dragged` takes the former z of `target`; everything from `target` up
    /// to (not including) `dragged` shifts one step toward the slot `dragged`
    /// left. Dropping onto self or onto an unknown element changes nothing.
    /// Returns whether the index changed.
    pub fn reorder(&mut self, dragged: ElementId, target: ElementId) -> bool {
        if dragged == target || !self.contains(dragged) || !self.contains(target) {
            return false;
        }
        if self.has_ties() {
            self.renormalize();
        }

        let (Some(from), Some(to)) = (self.get(dragged), self.get(target)) else {
            return false;
        };

        for (id, z) in self.z_orders.iter_mut() {
            if *id == dragged {
                continue;
            }
            let current = *z;
            if from > to && (to..from).contains(&current) {
                *z += 1;
            } else if from < to && (from + 1..=to).contains(&current) {
                *z -= 1;
            }
        }
        self.set(dragged, to)
    }

    fn has_ties(&self) -> bool {
        let mut values: Vec<i32> = self.z_orders.values().copied().collect();
        values.sort_unstable();
        values.windows(2).any(|pair| pair[0] == pair[1])
    }

    /// Reassigns distinct values `1..=n` following the resolved order
    fn renormalize(&mut self) {
        let back_to_front: Vec<ElementId> = self.display_order().into_iter().rev().collect();
        for (z, id) in (1..).zip(back_to_front) {
            self.z_orders.insert(id, z);
        }
    }
}

impl FromIterator<(ElementId, i32)> for LayerIndex {
    fn from_iter<I: IntoIterator<Item = (ElementId, i32)>>(iter: I) -> Self {
        Self {
            z_orders: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(n: usize) -> Vec<ElementId> {
        let mut ids: Vec<ElementId> = (0..n).map(|_| ElementId::new()).collect();
        ids.sort();
        ids
    }

    #[test]
    fn test_insert_top_keeps_increasing() {
        let mut index = LayerIndex::new();
        let ids = ids(3);
        let zs: Vec<i32> = ids.iter().map(|id| index.insert_top(*id)).collect();
        assert_eq!(zs, vec![1, 2, 3]);
        assert_eq!(index.display_order(), vec![ids[2], ids[1], ids[0]]);
    }

    #[test]
    fn test_move_to_bottom() {
        let ids = ids(2);
        let (a, b) = (ids[0], ids[1]);
        let mut index: LayerIndex = [(a, 1), (b, 2)].into_iter().collect();

        assert!(index.move_to_bottom(b));
        assert_eq!(index.get(b), Some(0));
        assert_eq!(index.display_order(), vec![a, b]);
    }

    #[test]
    fn test_ties_break_by_id() {
        let ids = ids(3);
        let index: LayerIndex = ids.iter().map(|id| (*id, 5)).collect();
        assert_eq!(index.display_order(), ids);
    }

    #[test]
    fn test_reorder_moves_down_and_shifts_between() {
        let ids = ids(4);
        let mut index: LayerIndex = ids.iter().zip([10, 20, 30, 40]).map(|(id, z)| (*id, z)).collect();

        // drag the front element onto the second from the back
        assert!(index.reorder(ids[3], ids[1]));
        assert_eq!(index.get(ids[3]), Some(20));
        assert_eq!(index.get(ids[1]), Some(21));
        assert_eq!(index.get(ids[2]), Some(31));
        assert_eq!(index.get(ids[0]), Some(10));
        assert_eq!(index.display_order(), vec![ids[2], ids[1], ids[3], ids[0]]);
    }

    #[test]
    fn test_reorder_moves_up() {
        let ids = ids(3);
        let mut index: LayerIndex = ids.iter().zip([1, 2, 3]).map(|(id, z)| (*id, z)).collect();

        assert!(index.reorder(ids[0], ids[2]));
        assert_eq!(index.display_order(), vec![ids[0], ids[2], ids[1]]);
        assert_eq!(index.get(ids[0]), Some(3));
    }

    #[test]
    fn test_reorder_onto_self_is_noop() {
        let ids = ids(3);
        let mut index: LayerIndex = ids.iter().map(|id| (*id, 7)).collect();
        let before = index.clone();
        assert!(!index.reorder(ids[1], ids[1]));
        assert_eq!(index, before);
    }

    #[test]
    fn test_top_at_i32_max_compacts_instead_of_overflowing() {
        let ids = ids(3);
        let (a, b, c) = (ids[0], ids[1], ids[2]);
        let mut index: LayerIndex = [(a, 5), (b, i32::MAX)].into_iter().collect();

        let z = index.insert_top(c);
        assert_eq!(z, 3);
        assert_eq!(index.display_order(), vec![c, b, a]);

        index.set(a, i32::MAX);
        assert!(index.move_to_top(b));
        assert_eq!(index.display_order()[0], b);
        assert_eq!(index.display_order(), vec![b, a, c]);
    }

    #[test]
    fn test_bottom_at_i32_min_compacts_instead_of_overflowing() {
        let ids = ids(2);
        let (a, b) = (ids[0], ids[1]);
        let mut index: LayerIndex = [(a, i32::MIN), (b, 3)].into_iter().collect();

        assert!(index.move_to_bottom(b));
        assert_eq!(index.get(b), Some(0));
        assert_eq!(index.display_order(), vec![a, b]);
    }

    #[test]
    fn test_reorder_with_ties_renormalizes_first() {
        let ids = ids(3);
        let mut index: LayerIndex = ids.iter().map(|id| (*id, 0)).collect();
        // resolved order front to back is ids[0], ids[1], ids[2]
        assert!(index.reorder(ids[2], ids[0]));
        assert_eq!(index.display_order(), vec![ids[2], ids[0], ids[1]]);
    }
}

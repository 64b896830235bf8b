// Ordered stack of visages + the current selection.
// Visual: index 0 is drawn first (back-most), the last entry is on top.

use crate::visage::Visage;

#[derive(Default, Debug)]
pub struct VisageCollection {
    visages: Vec<Visage>,
    selected: Option<usize>,
}

impl VisageCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.visages.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.visages.is_empty()
    }

    /// Back-to-front iteration (draw order).
    pub fn iter(&self) -> impl Iterator<Item = &Visage> {
        self.visages.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Visage> {
        self.visages.get(index)
    }

    #[cfg(test)]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Visage> {
        self.visages.get_mut(index)
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected(&self) -> Option<&Visage> {
        self.selected.and_then(|i| self.visages.get(i))
    }

    pub fn selected_mut(&mut self) -> Option<&mut Visage> {
        self.selected.and_then(|i| self.visages.get_mut(i))
    }

    /// Select an index; out-of-range requests are ignored.
    pub fn select(&mut self, index: usize) {
        if index < self.visages.len() {
            self.selected = Some(index);
        }
    }

    pub fn deselect(&mut self) {
        self.selected = None;
    }

    /// Put a visage on top of the stack and return its index.
    /// Visual: the new picture covers everything below it.
    pub fn insert_front(&mut self, visage: Visage) -> usize {
        self.visages.push(visage);
        self.visages.len() - 1
    }

    /// Remove one visage. The selection snaps to the new top-most one,
    /// or clears when nothing is left.
    pub fn remove_at(&mut self, index: usize) -> Option<Visage> {
        if index >= self.visages.len() {
            return None;
        }
        let removed = self.visages.remove(index);
        self.selected = self.visages.len().checked_sub(1);
        Some(removed)
    }

    /// Drop everything and deselect.
    pub fn clear(&mut self) {
        self.visages.clear();
        self.selected = None;
    }

    /// Move a visage to the top of the stack; the selection follows it.
    pub fn move_to_front(&mut self, index: usize) {
        if index >= self.visages.len() {
            return;
        }
        let v = self.visages.remove(index);
        self.visages.push(v);
        self.follow_move(index, self.visages.len() - 1);
    }

    /// Move a visage to the bottom of the stack; the selection follows it.
    pub fn move_to_back(&mut self, index: usize) {
        if index >= self.visages.len() {
            return;
        }
        let v = self.visages.remove(index);
        self.visages.insert(0, v);
        self.follow_move(index, 0);
    }

    // Keep `selected` pointing at the same visage after a re-splice.
    fn follow_move(&mut self, from: usize, to: usize) {
        if let Some(sel) = self.selected {
            self.selected = Some(if sel == from {
                to
            } else if from < to && sel > from && sel <= to {
                sel - 1
            } else if to < from && sel >= to && sel < from {
                sel + 1
            } else {
                sel
            });
        }
    }

    /// Front-most visage under the point.
    /// Visual: clicking where two pictures overlap picks the one drawn on top.
    pub fn hit_test(&self, x: i32, y: i32) -> Option<usize> {
        self.visages.iter().rposition(|v| v.contains(x, y))
    }

    /// Translate the whole scene. Visual: everything slides with the pointer.
    pub fn pan_all(&mut self, dx: i32, dy: i32) {
        for v in &mut self.visages {
            v.x += dx;
            v.y += dy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::PixelSurface;

    fn at(x: i32, y: i32, w: u32, h: u32) -> Visage {
        Visage::new(x, y, PixelSurface::filled(w, h, [1, 2, 3, 255]))
    }

    fn xs(c: &VisageCollection) -> Vec<i32> {
        c.iter().map(|v| v.x).collect()
    }

    #[test]
    fn hit_test_prefers_front_most() {
        let mut c = VisageCollection::new();
        c.insert_front(at(0, 0, 100, 100));
        c.insert_front(at(50, 50, 100, 100));
        assert_eq!(c.hit_test(75, 75), Some(1));
        assert_eq!(c.hit_test(10, 10), Some(0));
        assert_eq!(c.hit_test(500, 500), None);
    }

    #[test]
    fn removing_last_one_clears_selection() {
        let mut c = VisageCollection::new();
        c.insert_front(at(0, 0, 10, 10));
        c.select(0);
        assert!(c.remove_at(0).is_some());
        assert!(c.is_empty());
        assert_eq!(c.selected_index(), None);
    }

    #[test]
    fn removing_one_of_many_selects_new_front() {
        let mut c = VisageCollection::new();
        for x in [1, 2, 3] {
            c.insert_front(at(x, 0, 10, 10));
        }
        c.select(0);
        c.remove_at(0);
        assert_eq!(xs(&c), vec![2, 3]);
        assert_eq!(c.selected_index(), Some(1));
        assert!(c.remove_at(7).is_none());
    }

    #[test]
    fn reorder_moves_selection_with_the_element() {
        let mut c = VisageCollection::new();
        for x in [1, 2, 3, 4] {
            c.insert_front(at(x, 0, 10, 10));
        }
        c.select(1);
        c.move_to_front(1);
        assert_eq!(xs(&c), vec![1, 3, 4, 2]);
        assert_eq!(c.selected_index(), Some(3));

        c.move_to_back(3);
        assert_eq!(xs(&c), vec![2, 1, 3, 4]);
        assert_eq!(c.selected_index(), Some(0));
    }

    #[test]
    fn reorder_of_other_element_keeps_selected_visage() {
        let mut c = VisageCollection::new();
        for x in [1, 2, 3] {
            c.insert_front(at(x, 0, 10, 10));
        }
        c.select(2);
        c.move_to_back(1);
        assert_eq!(c.selected().map(|v| v.x), Some(3));
        c.move_to_front(0);
        assert_eq!(c.selected().map(|v| v.x), Some(3));
    }

    #[test]
    fn select_ignores_out_of_range() {
        let mut c = VisageCollection::new();
        c.select(0);
        assert_eq!(c.selected_index(), None);
    }

    #[test]
    fn pan_moves_every_visage() {
        let mut c = VisageCollection::new();
        c.insert_front(at(0, 0, 10, 10));
        c.insert_front(at(5, 5, 10, 10));
        c.pan_all(3, -2);
        let pos: Vec<_> = c.iter().map(|v| (v.x, v.y)).collect();
        assert_eq!(pos, vec![(3, -2), (8, 3)]);
    }
}

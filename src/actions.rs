// The six edits reachable from the toolbar and the keyboard.
// Visual: each one changes the selected visage (or the stack order) in one step.

use minifb::Key;
use tracing::info;

use crate::collection::VisageCollection;

/// Offset of a duplicate relative to its original. Visual: the copy appears down-right.
pub const DUPLICATE_OFFSET: i32 = 30;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ToolAction {
    /// Send the top-most selection to the back, anything else to the front.
    Reorder,
    /// Mirror the picture left↔right.
    Flip,
    /// Rotate 90° clockwise.
    Rotate,
    /// Toggle the eraser tool.
    Erase,
    Delete,
    Duplicate,
}

/// Hotkey table: one key per action.
pub const KEY_BINDINGS: [(Key, ToolAction); 6] = [
    (Key::W, ToolAction::Reorder),
    (Key::F, ToolAction::Flip),
    (Key::R, ToolAction::Rotate),
    (Key::E, ToolAction::Erase),
    (Key::D, ToolAction::Delete),
    (Key::C, ToolAction::Duplicate),
];

impl ToolAction {
    /// Toolbar order, top to bottom.
    pub const ALL: [ToolAction; 6] = [
        ToolAction::Reorder,
        ToolAction::Flip,
        ToolAction::Rotate,
        ToolAction::Erase,
        ToolAction::Delete,
        ToolAction::Duplicate,
    ];

    /// Structural edits are locked while the eraser is on; flip, rotate and the
    /// eraser toggle itself stay usable.
    pub fn blocked_while_erasing(self) -> bool {
        matches!(self, ToolAction::Reorder | ToolAction::Delete | ToolAction::Duplicate)
    }

    #[cfg(test)]
    pub fn hotkey(self) -> Key {
        KEY_BINDINGS
            .iter()
            .find(|(_, a)| *a == self)
            .map(|(k, _)| *k)
            .unwrap_or(Key::Unknown)
    }

    #[cfg(test)]
    pub fn from_key(key: Key) -> Option<Self> {
        KEY_BINDINGS.iter().find(|(k, _)| *k == key).map(|(_, a)| *a)
    }

    /// Letter drawn on the toolbar button (same as the hotkey).
    pub fn label(self) -> char {
        match self {
            ToolAction::Reorder => 'W',
            ToolAction::Flip => 'F',
            ToolAction::Rotate => 'R',
            ToolAction::Erase => 'E',
            ToolAction::Delete => 'D',
            ToolAction::Duplicate => 'C',
        }
    }
}

/// Run one action against the stack. `erasing` is the sticky eraser toggle.
/// Returns true when anything changed.
pub fn apply(action: ToolAction, visages: &mut VisageCollection, erasing: &mut bool) -> bool {
    let Some(index) = visages.selected_index() else {
        // Nothing selected: the only thing left to do is switch a stale eraser off.
        if action == ToolAction::Erase && *erasing {
            *erasing = false;
            return true;
        }
        return false;
    };
    if *erasing && action.blocked_while_erasing() {
        return false;
    }

    match action {
        ToolAction::Reorder => {
            if index + 1 == visages.len() {
                visages.move_to_back(index);
            } else {
                visages.move_to_front(index);
            }
        }
        ToolAction::Flip => {
            if let Some(v) = visages.selected_mut() {
                v.surface = v.surface.flipped_horizontal();
            }
        }
        ToolAction::Rotate => {
            if let Some(v) = visages.selected_mut() {
                v.surface = v.surface.rotated_cw();
                v.w = v.surface.width() as i32;
                v.h = v.surface.height() as i32;
            }
        }
        ToolAction::Erase => {
            *erasing = !*erasing;
            info!(erasing = *erasing, "eraser toggled");
        }
        ToolAction::Delete => {
            if visages.len() <= 1 {
                visages.clear();
            } else {
                visages.remove_at(index);
            }
            *erasing = false;
        }
        ToolAction::Duplicate => {
            let Some(original) = visages.selected() else {
                return false;
            };
            let mut copy = original.clone();
            copy.x += DUPLICATE_OFFSET;
            copy.y += DUPLICATE_OFFSET;
            let new_index = visages.insert_front(copy);
            visages.select(new_index);
        }
    }
    info!(?action, selected = ?visages.selected_index(), "action applied");
    true
}

#[cfg(test)]
#[path = "actions_test.rs"]
mod tests;

use std::collections::VecDeque;

use image::RgbaImage;

use crate::surface::Surface;

/// Whole-canvas snapshot history with undo/redo and preview restore.
///
/// Every [`commit`](Self::commit) stores a full copy of the buffer. With the
/// default unbounded depth memory grows by one canvas per gesture for the
/// whole session; `with_max_depth` trades old undo steps for a ceiling.
#[derive(Debug, Default)]
pub struct RasterHistory {
    /// Past states, most recent at the back
    undo_stack: VecDeque<RgbaImage>,
    /// Undone states, most recent last
    redo_stack: Vec<RgbaImage>,
    max_depth: Option<usize>,
    /// Snapshot pushed out by the latest commit, returned if that commit
    /// is discarded
    evicted: Option<RgbaImage>,
}

impl RasterHistory {
    /// Creates a new empty history
    pub fn new() -> Self {
        Self::default()
    }

    /// Caps the undo stack at `max_depth` snapshots, evicting the oldest.
    pub fn with_max_depth(max_depth: Option<usize>) -> Self {
        Self {
            max_depth: max_depth.filter(|depth| *depth > 0),
            ..Self::default()
        }
    }

    /// Snapshot the current buffer before a destructive edit.
    pub fn commit<S: Surface + ?Sized>(&mut self, surface: &S) {
        self.undo_stack.push_back(surface.image_data());
        self.redo_stack.clear();
        self.evicted = None;

        if let Some(max) = self.max_depth {
            while self.undo_stack.len() > max {
                self.evicted = self.undo_stack.pop_front();
                log::debug!("history depth {max} reached, evicted oldest snapshot");
            }
        }
        log::debug!("commit: {} undo / 0 redo", self.undo_stack.len());
    }

    /// Step back one edit. Returns false when there is nothing to undo.
    pub fn undo<S: Surface + ?Sized>(&mut self, surface: &mut S) -> bool {
        let Some(previous) = self.undo_stack.pop_back() else {
            return false;
        };
        self.evicted = None;
        self.redo_stack.push(surface.image_data());
        restore(surface, &previous);
        log::debug!(
            "undo: {} undo / {} redo",
            self.undo_stack.len(),
            self.redo_stack.len()
        );
        true
    }

    /// Re-apply the last undone edit. Returns false when there is nothing to redo.
    pub fn redo<S: Surface + ?Sized>(&mut self, surface: &mut S) -> bool {
        let Some(next) = self.redo_stack.pop() else {
            return false;
        };
        self.evicted = None;
        self.undo_stack.push_back(surface.image_data());
        restore(surface, &next);
        log::debug!(
            "redo: {} undo / {} redo",
            self.undo_stack.len(),
            self.redo_stack.len()
        );
        true
    }

    /// Puts the last committed snapshot back on the surface without touching
    /// either stack. Never resizes the surface; the snapshot is clipped.
    pub fn preview_restore<S: Surface + ?Sized>(&self, surface: &mut S) -> bool {
        match self.undo_stack.back() {
            Some(snapshot) => {
                surface.put_image_data(snapshot);
                true
            }
            None => false,
        }
    }

    /// Drops the most recent commit without restoring it. A snapshot that
    /// commit evicted under the depth cap goes back to the bottom.
    pub fn discard_pending_commit(&mut self) -> bool {
        let discarded = self.undo_stack.pop_back().is_some();
        if discarded {
            if let Some(oldest) = self.evicted.take() {
                self.undo_stack.push_front(oldest);
            }
            log::debug!("discarded pending commit, {} undo left", self.undo_stack.len());
        }
        discarded
    }

    /// Returns true if there are edits that can be undone
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Returns true if there are edits that can be redone
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    /// Bytes of pixel data held across both stacks
    pub fn memory_bytes(&self) -> usize {
        self.undo_stack
            .iter()
            .chain(self.redo_stack.iter())
            .map(|snapshot| snapshot.as_raw().len())
            .sum()
    }
}

/// Makes `snapshot` the live buffer, adopting its dimensions if they differ.
fn restore<S: Surface + ?Sized>(surface: &mut S, snapshot: &RgbaImage) {
    if (surface.width(), surface.height()) != snapshot.dimensions() {
        surface.set_size(snapshot.width(), snapshot.height());
    }
    surface.put_image_data(snapshot);
}

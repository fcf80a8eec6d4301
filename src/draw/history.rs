//! Snapshot history with a cursor for undo/redo.

use std::collections::VecDeque;
use std::fmt;

/// Immutable by-value copy of the surface pixels at one instant.
///
/// Pixels are Cairo ARGB32: one native-endian `u32` per pixel, premultiplied
/// alpha, rows `stride` bytes apart.
#[derive(Clone, PartialEq, Eq)]
pub struct Snapshot {
    width: i32,
    height: i32,
    stride: i32,
    pixels: Box<[u8]>,
}

impl fmt::Debug for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Snapshot")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("stride", &self.stride)
            .field("bytes", &self.pixels.len())
            .finish()
    }
}

impl Snapshot {
    pub(crate) fn new(width: i32, height: i32, stride: i32, pixels: Vec<u8>) -> Self {
        Self {
            width,
            height,
            stride,
            pixels: pixels.into_boxed_slice(),
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn stride(&self) -> i32 {
        self.stride
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    /// Returns the raw ARGB32 value at (x, y), or `None` outside the surface.
    pub fn pixel(&self, x: i32, y: i32) -> Option<u32> {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return None;
        }
        let offset = (y * self.stride + x * 4) as usize;
        let bytes: [u8; 4] = self.pixels.get(offset..offset + 4)?.try_into().ok()?;
        Some(u32::from_ne_bytes(bytes))
    }

    /// Alpha channel (0-255) at (x, y).
    pub fn alpha(&self, x: i32, y: i32) -> Option<u8> {
        self.pixel(x, y).map(|argb| (argb >> 24) as u8)
    }

    /// True when every pixel is fully transparent.
    pub fn is_blank(&self) -> bool {
        self.pixels.iter().all(|byte| *byte == 0)
    }
}

/// Linear edit history: an ordered list of snapshots plus a cursor.
///
/// The list is never empty. Pushing after an undo discards everything past
/// the cursor first, so history never branches. With a non-zero capacity the
/// oldest snapshot is dropped once the list would grow beyond it.
#[derive(Debug)]
pub struct History {
    snapshots: VecDeque<Snapshot>,
    cursor: usize,
    capacity: usize,
}

impl History {
    /// Creates a history holding only `initial`. `capacity` of 0 means unlimited.
    ///
    /// A capacity of 1 would evict every commit, so it is raised to 2.
    pub fn new(initial: Snapshot, capacity: usize) -> Self {
        let capacity = if capacity == 1 {
            log::warn!("History capacity 1 leaves nothing to undo, raising to 2");
            2
        } else {
            capacity
        };

        let mut snapshots = VecDeque::new();
        snapshots.push_back(initial);
        Self {
            snapshots,
            cursor: 0,
            capacity,
        }
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Always false; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// The snapshot currently shown on the surface.
    pub fn current(&self) -> &Snapshot {
        &self.snapshots[self.cursor]
    }

    pub fn get(&self, index: usize) -> Option<&Snapshot> {
        self.snapshots.get(index)
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.snapshots.len()
    }

    /// Appends a snapshot after the cursor, discarding any redo branch.
    ///
    /// Returns the number of snapshots discarded from the redo branch.
    pub fn push(&mut self, snapshot: Snapshot) -> usize {
        let discarded = self.snapshots.len() - (self.cursor + 1);
        self.snapshots.truncate(self.cursor + 1);
        self.snapshots.push_back(snapshot);

        if self.capacity > 0 && self.snapshots.len() > self.capacity {
            self.snapshots.pop_front();
        }

        self.cursor = self.snapshots.len() - 1;
        discarded
    }

    /// Steps the cursor back and returns the snapshot to display.
    pub fn undo(&mut self) -> Option<&Snapshot> {
        if !self.can_undo() {
            return None;
        }
        self.cursor -= 1;
        Some(&self.snapshots[self.cursor])
    }

    /// Steps the cursor forward and returns the snapshot to display.
    pub fn redo(&mut self) -> Option<&Snapshot> {
        if !self.can_redo() {
            return None;
        }
        self.cursor += 1;
        Some(&self.snapshots[self.cursor])
    }
}

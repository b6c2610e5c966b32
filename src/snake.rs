//! Snake body: a capacity-bounded segment buffer with filler growth.

use heapless::Vec;

use crate::direction::Direction;

/// Default segment capacity of a [`SnakeBody`].
pub const DEFAULT_CAPACITY: usize = 200;

/// One occupied playfield cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "board", derive(defmt::Format))]
pub struct Segment {
    pub x: i32,
    pub y: i32,
}

impl Segment {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The neighbouring cell one step in `direction`.
    #[must_use]
    pub const fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

impl From<Segment> for embedded_graphics::prelude::Point {
    fn from(segment: Segment) -> Self {
        Self::new(segment.x, segment.y)
    }
}

/// The snake, stored tail first: index 0 is the tail, the last element is the head.
///
/// The vector length is the logical length `L`. It never exceeds `C - 1` and
/// never drops below one, so there is always a head.
#[derive(Debug, Clone)]
pub struct SnakeBody<const C: usize = DEFAULT_CAPACITY> {
    cells: Vec<Segment, C>,
    /// Segments directly behind the head that still sit on the head cell
    /// because they were appended by [`grow`](Self::grow) since the last
    /// [`advance`](Self::advance).
    fillers: usize,
}

impl<const C: usize> SnakeBody<C> {
    /// Longest logical length the buffer accepts.
    pub const MAX_LEN: usize = C - 1;

    /// A snake of `length` segments all stacked on `head`.
    ///
    /// `length` is clamped to `1..=C - 1`. `C` must be at least 2.
    pub fn new(head: Segment, length: usize) -> Self {
        let mut body = Self {
            cells: Vec::new(),
            fillers: 0,
        };
        body.reset(head, length);
        body
    }

    /// Restore the initial configuration: `length` segments stacked on `head`.
    pub fn reset(&mut self, head: Segment, length: usize) {
        const { assert!(C >= 2, "a snake body needs room for at least two segments") };
        let length = length.clamp(1, Self::MAX_LEN);
        self.cells.clear();
        // `length` is at most `C - 1`, so the buffer has room for it.
        let _ = self.cells.resize(length, head);
        // The stacked start is filler: it unrolls over the first ticks.
        self.fillers = length - 1;
    }

    pub fn head(&self) -> Segment {
        self.cells[self.cells.len() - 1]
    }

    /// Logical length `L`.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false: the body keeps at least its head.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub const fn capacity(&self) -> usize {
        C
    }

    /// Move one cell in `direction`.
    ///
    /// Every non-head segment takes the position of the segment in front of
    /// it, then the head steps. The logical length is unchanged.
    pub fn advance(&mut self, direction: Direction) -> Segment {
        let head = self.head().step(direction);
        let len = self.cells.len();
        self.cells.copy_within(1..len, 0);
        self.cells[len - 1] = head;
        self.fillers = 0;
        head
    }

    /// Append `n` segments on the head cell, up to the `C - 1` cap.
    ///
    /// The new segments coincide with the head until the next advance and are
    /// ignored by [`head_collides_with_body`](Self::head_collides_with_body)
    /// until then.
    pub fn grow(&mut self, n: usize) {
        let head = self.head();
        let target = self.len().saturating_add(n).min(Self::MAX_LEN);
        let added = target - self.len();
        let _ = self.cells.resize(target, head);
        self.fillers = (self.fillers + added).min(target - 1);
    }

    /// True when a non-head segment occupies the head cell.
    ///
    /// Fillers appended since the last advance are not counted.
    pub fn head_collides_with_body(&self) -> bool {
        let head = self.head();
        let settled = self.len() - 1 - self.fillers;
        self.cells[..settled].iter().any(|segment| *segment == head)
    }

    /// True when the head left `[0, width] × [0, height]`.
    ///
    /// Both bounds are inclusive: a head on `(width, height)` is still inside.
    pub fn is_out_of_bounds(&self, width: i32, height: i32) -> bool {
        let head = self.head();
        !(0..=width).contains(&head.x) || !(0..=height).contains(&head.y)
    }

    /// Active segments, tail to head.
    pub fn segments(&self) -> impl Iterator<Item = Segment> + Clone + '_ {
        self.cells.iter().copied()
    }
}

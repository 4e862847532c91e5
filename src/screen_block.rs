use std::iter::FusedIterator;
use std::num::NonZeroU32;

use crate::geometry::{ScreenPoint, ScreenSize};

/// Axis aligned block of pixels; `min` inclusive, `max` exclusive.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ScreenBlock {
    pub min: ScreenPoint,
    pub max: ScreenPoint,
}

impl ScreenBlock {
    pub fn new(min: ScreenPoint, max: ScreenPoint) -> ScreenBlock {
        ScreenBlock { min, max }
    }

    pub fn from_size(size: ScreenSize) -> ScreenBlock {
        ScreenBlock {
            min: ScreenPoint::origin(),
            max: ScreenPoint::origin() + size,
        }
    }

    pub fn width(&self) -> u32 {
        self.max.x.saturating_sub(self.min.x)
    }

    pub fn height(&self) -> u32 {
        self.max.y.saturating_sub(self.min.y)
    }

    pub fn area(&self) -> u32 {
        self.width() * self.height()
    }

    pub fn is_empty(&self) -> bool {
        self.min.x >= self.max.x || self.min.y >= self.max.y
    }

    pub fn contains(&self, point: ScreenPoint) -> bool {
        (self.min.x..self.max.x).contains(&point.x) && (self.min.y..self.max.y).contains(&point.y)
    }

    /// Iterator over pixel coordinates inside the block, in C order
    /// (x changes first, then y).
    pub fn internal_points(&self) -> InternalPoints {
        if self.is_empty() {
            InternalPoints::empty()
        } else {
            InternalPoints {
                min_x: self.min.x,
                max: self.max,
                cursor: self.min,
            }
        }
    }

    /// Splits the block into `tile_size` × `tile_size` tiles (clipped at the
    /// bottom and right edges) and orders them in a spiral starting near the
    /// center, so the visually interesting part of the picture appears
    /// first.
    pub fn tile_ordering(&self, tile_size: NonZeroU32) -> Vec<ScreenBlock> {
        if self.is_empty() {
            return Vec::new();
        }

        let tile_size = tile_size.get();
        let tiles_x = self.width().div_ceil(tile_size) as i64;
        let tiles_y = self.height().div_ceil(tile_size) as i64;
        let total = (tiles_x * tiles_y) as usize;

        let mut ordering = Vec::with_capacity(total);
        let mut cursor = (tiles_x / 2, tiles_y / 2);
        let mut direction = (1i64, 0i64);
        let mut leg_length = 1i64;

        // Walk an unbounded grid spiral, keeping only cells that fall inside
        // the tile grid. Cells outside get revisited by ever larger legs, so
        // the loop always terminates with every tile collected exactly once.
        loop {
            for _ in 0..2 {
                for _ in 0..leg_length {
                    let (x, y) = cursor;
                    if (0..tiles_x).contains(&x) && (0..tiles_y).contains(&y) {
                        ordering.push(self.tile_at(x as u32, y as u32, tile_size));
                        if ordering.len() == total {
                            return ordering;
                        }
                    }
                    cursor = (cursor.0 + direction.0, cursor.1 + direction.1);
                }
                direction = (-direction.1, direction.0);
            }
            leg_length += 1;
        }
    }

    fn tile_at(&self, tile_x: u32, tile_y: u32, tile_size: u32) -> ScreenBlock {
        let min = ScreenPoint::new(
            self.min.x + tile_x * tile_size,
            self.min.y + tile_y * tile_size,
        );
        let max = ScreenPoint::new(
            (min.x + tile_size).min(self.max.x),
            (min.y + tile_size).min(self.max.y),
        );
        ScreenBlock { min, max }
    }
}

#[derive(Copy, Clone, Debug)]
pub struct InternalPoints {
    min_x: u32,
    max: ScreenPoint,
    cursor: ScreenPoint,
}

impl InternalPoints {
    /// Iterator that returns no points.
    fn empty() -> Self {
        InternalPoints {
            min_x: 1,
            max: ScreenPoint::origin(),
            cursor: ScreenPoint::origin(),
        }
    }
}

impl Iterator for InternalPoints {
    type Item = ScreenPoint;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor.y >= self.max.y {
            return None;
        }

        let ret = self.cursor;

        debug_assert!(self.cursor.x < self.max.x);
        self.cursor.x += 1;
        if self.cursor.x >= self.max.x {
            self.cursor.x = self.min_x;
            self.cursor.y += 1;
        }

        Some(ret)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.len();
        (len, Some(len))
    }
}

impl ExactSizeIterator for InternalPoints {
    fn len(&self) -> usize {
        if self.cursor.y >= self.max.y {
            0
        } else {
            let row_width = (self.max.x - self.min_x) as usize;
            let full_rows = (self.max.y - self.cursor.y - 1) as usize;
            let current_row = (self.max.x - self.cursor.x) as usize;
            full_rows * row_width + current_row
        }
    }
}

impl FusedIterator for InternalPoints {}

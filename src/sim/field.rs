//! Toroidal play field
//!
//! Positions live in `[0, width) × [0, height)`. Leaving one edge re-enters on
//! the opposite edge, so distances must be measured the short way around.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::{wrap_coord, wrapped_offset};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub width: f32,
    pub height: f32,
}

impl Field {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width * 0.5, self.height * 0.5)
    }

    /// Wrap a position back into the field
    #[inline]
    pub fn wrap(&self, pos: Vec2) -> Vec2 {
        Vec2::new(wrap_coord(pos.x, self.width), wrap_coord(pos.y, self.height))
    }

    #[inline]
    pub fn contains(&self, pos: Vec2) -> bool {
        (0.0..self.width).contains(&pos.x) && (0.0..self.height).contains(&pos.y)
    }

    /// Shortest displacement from `from` to `to`, considering wraparound
    #[inline]
    pub fn delta(&self, from: Vec2, to: Vec2) -> Vec2 {
        Vec2::new(
            wrapped_offset(from.x, to.x, self.width),
            wrapped_offset(from.y, to.y, self.height),
        )
    }

    #[inline]
    pub fn distance(&self, a: Vec2, b: Vec2) -> f32 {
        self.delta(a, b).length()
    }

    /// Circle-circle overlap in wrapped space (strict: touching is not overlap)
    #[inline]
    pub fn circles_overlap(&self, a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
        let reach = ra + rb;
        self.delta(a, b).length_squared() < reach * reach
    }
}

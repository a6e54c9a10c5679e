//! Rolling ball motion state
//!
//! A ball is either resting (`direction == None`) or moving. While moving it
//! accumulates sub-cell progress; the level snaps whole cells out of it.

use glam::{IVec2, Vec2};

use crate::consts::BALL_SPEED;
use crate::geom::Direction;

#[derive(Debug, Clone, PartialEq)]
pub struct Ball {
    /// Partial progress towards the next cell, each axis in (-1, 1) between steps
    offset: Vec2,
    /// Speed in cells per second
    speed: f32,
    direction: Direction,
}

impl Default for Ball {
    fn default() -> Self {
        Self::new(BALL_SPEED)
    }
}

impl Ball {
    pub fn new(speed: f32) -> Self {
        Self {
            offset: Vec2::ZERO,
            speed,
            direction: Direction::None,
        }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn is_moving(&self) -> bool {
        !self.direction.is_none()
    }

    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
    }

    pub(crate) fn start(&mut self, direction: Direction) {
        self.direction = direction;
    }

    /// Switch travel direction mid-slide, carrying any overshoot onto the new axis
    pub(crate) fn redirect(&mut self, direction: Direction) {
        let progress = self.offset.abs().max_element();
        self.offset = direction.vec2() * progress;
        self.direction = direction;
    }

    pub(crate) fn halt(&mut self) {
        self.direction = Direction::None;
        self.offset = Vec2::ZERO;
    }

    pub(crate) fn accumulate(&mut self, dt: f32) {
        self.offset += self.direction.vec2() * self.speed * dt;
    }

    /// Take one whole cell out of the accumulated offset, if available
    pub(crate) fn take_step(&mut self) -> Option<IVec2> {
        let mut step = IVec2::ZERO;
        if self.offset.x.abs() >= 1.0 {
            let sign = self.offset.x.signum();
            step.x = sign as i32;
            self.offset.x -= sign;
        }
        if self.offset.y.abs() >= 1.0 {
            let sign = self.offset.y.signum();
            step.y = sign as i32;
            self.offset.y -= sign;
        }
        (step != IVec2::ZERO).then_some(step)
    }
}

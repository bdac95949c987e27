//! Bounded position history used to draw a satellite's path
//!
//! `Trail` is a fixed-capacity ring buffer over `VecDeque`: appending to a
//! full trail evicts the oldest point, so both operations are O(1).

use std::collections::VecDeque;

use super::states::NVec2;

const INITIAL_RESERVE: usize = 1024;

#[derive(Debug, Clone, PartialEq)]
pub struct Trail {
    points: VecDeque<NVec2>,
    cap: usize,
}

impl Trail {
    /// Empty trail that will never hold more than `cap` points.
    /// Storage grows on demand; only a small prefix is reserved up front.
    pub fn with_capacity(cap: usize) -> Self {
        Self {
            points: VecDeque::with_capacity(cap.min(INITIAL_RESERVE)),
            cap,
        }
    }

    /// Append the newest point, evicting the oldest one when full
    pub fn push(&mut self, p: NVec2) {
        if self.cap == 0 {
            return;
        }
        if self.points.len() == self.cap {
            self.points.pop_front();
        }
        self.points.push_back(p);
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.cap
    }

    pub fn oldest(&self) -> Option<&NVec2> {
        self.points.front()
    }

    pub fn newest(&self) -> Option<&NVec2> {
        self.points.back()
    }

    /// Points in simulation-time order, oldest first
    pub fn iter(&self) -> impl Iterator<Item = &NVec2> + '_ {
        self.points.iter()
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }
}

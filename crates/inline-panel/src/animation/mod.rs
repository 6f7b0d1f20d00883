//! Cosmetic animations for the inline panel.
//!
//! Two effects exist: the collapse played when a record is deleted, and the
//! swap played when two records trade places. Neither is authoritative. A
//! swap is started after the logical move has already been applied; a
//! collapse only defers the refresh of labels and buttons until the record
//! has visually gone, so counts never flash stale values mid-transition.
//!
//! Animations are advanced by the host calling
//! [`InlinePanel::tick`](crate::InlinePanel::tick) (or `tick_at` with an
//! explicit clock), typically once per frame.

mod easing;
mod transition;

use std::time::{Duration, Instant};

use inline_panel_core::logging::targets;

pub use easing::{Easing, ease, lerp_eased};
pub use transition::{Animation, AnimationKind, SwapEffect};

use crate::record::RecordId;

/// What a record is currently doing on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimationState {
    /// Not animating.
    Idle,
    /// Sliding shut after a delete.
    Collapsing {
        /// Eased progress from 0.0 to 1.0.
        progress: f32,
    },
    /// Sliding between visible slots.
    Swapping {
        /// Displayed slot, fractional while moving.
        slot: f32,
    },
}

/// The set of running animations.
#[derive(Debug, Default)]
pub struct AnimationQueue {
    running: Vec<Animation>,
}

impl AnimationQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start an animation at `now`.
    pub fn start(&mut self, kind: AnimationKind, duration: Duration, now: Instant) {
        tracing::trace!(target: targets::ANIMATION, ?kind, ?duration, "animation started");
        self.running.push(Animation::new(kind, duration, now));
    }

    /// Whether any animation is running.
    pub fn is_idle(&self) -> bool {
        self.running.is_empty()
    }

    /// Number of running animations.
    pub fn len(&self) -> usize {
        self.running.len()
    }

    /// Whether the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.running.is_empty()
    }

    /// Remove and return every animation finished at `now`, in start order.
    pub fn advance(&mut self, now: Instant) -> Vec<AnimationKind> {
        let mut finished = Vec::new();
        self.running.retain(|animation| {
            if animation.is_finished_at(now) {
                finished.push(animation.kind());
                false
            } else {
                true
            }
        });
        finished
    }

    /// Remove and return every running animation, in start order.
    pub fn finish_all(&mut self) -> Vec<AnimationKind> {
        self.running.drain(..).map(|animation| animation.kind()).collect()
    }

    /// The on-screen state of `id` at `now`. The most recent animation
    /// involving the record wins.
    pub fn state_at(&self, id: RecordId, now: Instant) -> AnimationState {
        let Some(animation) = self.running.iter().rev().find(|a| a.kind().involves(id)) else {
            return AnimationState::Idle;
        };
        match animation.kind() {
            AnimationKind::Collapse(_) => AnimationState::Collapsing {
                progress: animation.progress_at(now),
            },
            AnimationKind::Swap(effect) => AnimationState::Swapping {
                slot: effect
                    .offset(id, Easing::Linear, animation.progress_at(now))
                    .unwrap_or(effect.to as f32),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    #[test]
    fn test_advance_returns_finished_in_order() {
        let mut map: SlotMap<RecordId, ()> = SlotMap::with_key();
        let (a, b) = (map.insert(()), map.insert(()));
        let start = Instant::now();

        let mut queue = AnimationQueue::new();
        queue.start(AnimationKind::Collapse(a), Duration::from_millis(400), start);
        queue.start(AnimationKind::Collapse(b), Duration::from_millis(100), start);

        assert!(queue.advance(start).is_empty());
        assert_eq!(
            queue.advance(start + Duration::from_millis(150)),
            vec![AnimationKind::Collapse(b)]
        );
        assert_eq!(queue.len(), 1);
        assert!(matches!(
            queue.state_at(a, start + Duration::from_millis(150)),
            AnimationState::Collapsing { .. }
        ));
        assert_eq!(queue.state_at(b, start), AnimationState::Idle);

        assert_eq!(queue.finish_all(), vec![AnimationKind::Collapse(a)]);
        assert!(queue.is_idle());
    }
}

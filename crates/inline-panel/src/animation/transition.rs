//! Timed animations.

use std::time::{Duration, Instant};

use super::easing::{Easing, ease, lerp_eased};
use crate::record::RecordId;

/// The before/after positions of a swap, handed to the presentation layer.
///
/// Positions are visible slots (indices among active records). The moved
/// record slides from `from` to `to` while its neighbour slides the other way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapEffect {
    /// The record that was moved.
    pub record: RecordId,
    /// The neighbour it traded places with.
    pub neighbor: RecordId,
    /// Slot of `record` before the move (and of `neighbor` after it).
    pub from: usize,
    /// Slot of `record` after the move (and of `neighbor` before it).
    pub to: usize,
}

impl SwapEffect {
    /// Displayed slot of `id` at the given eased progress, or `None` if `id`
    /// takes no part in this swap.
    pub fn offset(&self, id: RecordId, easing: Easing, progress: f32) -> Option<f32> {
        let (from, to) = if id == self.record {
            (self.from, self.to)
        } else if id == self.neighbor {
            (self.to, self.from)
        } else {
            return None;
        };
        Some(lerp_eased(easing, from as f32, to as f32, progress))
    }
}

/// What an animation animates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationKind {
    /// A deleted record sliding shut.
    Collapse(RecordId),
    /// Two records trading places.
    Swap(SwapEffect),
}

impl AnimationKind {
    /// Whether this animation involves `id`.
    pub fn involves(&self, id: RecordId) -> bool {
        match self {
            AnimationKind::Collapse(record) => *record == id,
            AnimationKind::Swap(effect) => effect.record == id || effect.neighbor == id,
        }
    }
}

/// A single running animation.
#[derive(Debug, Clone)]
pub struct Animation {
    kind: AnimationKind,
    easing: Easing,
    started: Instant,
    duration: Duration,
}

impl Animation {
    /// Start an animation at `now`.
    pub fn new(kind: AnimationKind, duration: Duration, now: Instant) -> Self {
        Self {
            kind,
            easing: Easing::default(),
            started: now,
            duration,
        }
    }

    /// Set the easing using builder pattern.
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// What is being animated.
    #[inline]
    pub fn kind(&self) -> AnimationKind {
        self.kind
    }

    /// The easing curve.
    #[inline]
    pub fn easing(&self) -> Easing {
        self.easing
    }

    /// Raw progress in `0.0..=1.0` at `now`.
    pub fn raw_progress_at(&self, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.started);
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }

    /// Eased progress at `now`.
    pub fn progress_at(&self, now: Instant) -> f32 {
        ease(self.easing, self.raw_progress_at(now))
    }

    /// Whether the animation has run its course at `now`.
    pub fn is_finished_at(&self, now: Instant) -> bool {
        self.raw_progress_at(now) >= 1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    fn two_ids() -> (RecordId, RecordId) {
        let mut map: SlotMap<RecordId, ()> = SlotMap::with_key();
        (map.insert(()), map.insert(()))
    }

    #[test]
    fn test_progress() {
        let (a, _) = two_ids();
        let start = Instant::now();
        let anim = Animation::new(AnimationKind::Collapse(a), Duration::from_millis(100), start)
            .with_easing(Easing::Linear);

        assert_eq!(anim.progress_at(start), 0.0);
        assert!((anim.progress_at(start + Duration::from_millis(50)) - 0.5).abs() < 1e-3);
        assert!(!anim.is_finished_at(start + Duration::from_millis(99)));
        assert!(anim.is_finished_at(start + Duration::from_millis(100)));
    }

    #[test]
    fn test_zero_duration_is_finished() {
        let (a, _) = two_ids();
        let now = Instant::now();
        let anim = Animation::new(AnimationKind::Collapse(a), Duration::ZERO, now);
        assert!(anim.is_finished_at(now));
    }

    #[test]
    fn test_swap_offsets() {
        let (a, b) = two_ids();
        let effect = SwapEffect {
            record: a,
            neighbor: b,
            from: 2,
            to: 1,
        };
        assert_eq!(effect.offset(a, Easing::Linear, 0.0), Some(2.0));
        assert_eq!(effect.offset(a, Easing::Linear, 1.0), Some(1.0));
        assert_eq!(effect.offset(b, Easing::Linear, 1.0), Some(2.0));
        assert!(AnimationKind::Swap(effect).involves(b));
    }
}

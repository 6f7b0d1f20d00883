//! Pure reorder transitions.
//!
//! Moving a record is planned over the ordered sequence of record handles
//! without touching any record state. The resulting [`MovePlan`] says which
//! neighbour the record trades places with and where both end up; the
//! controller applies it to the sequence and swaps the two order values.
//!
//! Deleted records are transparent: they are skipped during the neighbour
//! search and never counted in visible positions, but keep their place in the
//! sequence relative to whatever they were next to.

use crate::record::RecordId;

/// Direction of a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Towards the start of the sequence.
    Up,
    /// Towards the end of the sequence.
    Down,
}

/// A planned move of one record past its nearest active neighbour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MovePlan {
    /// The record being moved.
    pub record: RecordId,
    /// The active neighbour it trades places with.
    pub neighbor: RecordId,
    /// Direction of the move.
    pub direction: Direction,
    /// Sequence index of `record` before the move.
    pub from: usize,
    /// Sequence index of `record` after the move. Equals the neighbour's
    /// index before the move.
    pub to: usize,
    /// Visible position (among active records) of `record` before the move.
    pub visible_from: usize,
    /// Visible position of `record` after the move.
    pub visible_to: usize,
}

impl MovePlan {
    /// Relocate the record in `sequence`: immediately before the neighbour
    /// when moving up, immediately after it when moving down.
    pub fn apply(&self, sequence: &mut Vec<RecordId>) {
        let record = sequence.remove(self.from);
        sequence.insert(self.to, record);
    }
}

/// Plan moving `record` one active position in `direction`.
///
/// Returns `None` when the record is not in the sequence, is itself inactive,
/// or has no active neighbour in that direction.
pub fn plan_move<F>(
    sequence: &[RecordId],
    is_active: F,
    record: RecordId,
    direction: Direction,
) -> Option<MovePlan>
where
    F: Fn(RecordId) -> bool,
{
    let from = sequence.iter().position(|&id| id == record)?;
    if !is_active(record) {
        return None;
    }

    let to = match direction {
        Direction::Up => (0..from).rev().find(|&i| is_active(sequence[i]))?,
        Direction::Down => (from + 1..sequence.len()).find(|&i| is_active(sequence[i]))?,
    };

    let visible_from = sequence[..from].iter().filter(|&&id| is_active(id)).count();
    let visible_to = match direction {
        Direction::Up => visible_from - 1,
        Direction::Down => visible_from + 1,
    };

    Some(MovePlan {
        record,
        neighbor: sequence[to],
        direction,
        from,
        to,
        visible_from,
        visible_to,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    fn ids(n: usize) -> Vec<RecordId> {
        let mut map: SlotMap<RecordId, ()> = SlotMap::with_key();
        (0..n).map(|_| map.insert(())).collect()
    }

    #[test]
    fn test_move_up_swaps_with_previous() {
        let seq = ids(3);
        let plan = plan_move(&seq, |_| true, seq[2], Direction::Up).unwrap();
        assert_eq!(plan.neighbor, seq[1]);
        assert_eq!((plan.from, plan.to), (2, 1));
        assert_eq!((plan.visible_from, plan.visible_to), (2, 1));

        let mut moved = seq.clone();
        plan.apply(&mut moved);
        assert_eq!(moved, vec![seq[0], seq[2], seq[1]]);
    }

    #[test]
    fn test_move_down_swaps_with_next() {
        let seq = ids(3);
        let plan = plan_move(&seq, |_| true, seq[0], Direction::Down).unwrap();
        assert_eq!(plan.neighbor, seq[1]);

        let mut moved = seq.clone();
        plan.apply(&mut moved);
        assert_eq!(moved, vec![seq[1], seq[0], seq[2]]);
    }

    #[test]
    fn test_boundaries_are_noops() {
        let seq = ids(3);
        assert!(plan_move(&seq, |_| true, seq[0], Direction::Up).is_none());
        assert!(plan_move(&seq, |_| true, seq[2], Direction::Down).is_none());
    }

    #[test]
    fn test_deleted_records_are_skipped() {
        let seq = ids(4);
        let deleted = [seq[1], seq[2]];
        let active = |id: RecordId| !deleted.contains(&id);

        let plan = plan_move(&seq, active, seq[3], Direction::Up).unwrap();
        assert_eq!(plan.neighbor, seq[0]);
        assert_eq!((plan.visible_from, plan.visible_to), (1, 0));

        let mut moved = seq.clone();
        plan.apply(&mut moved);
        assert_eq!(moved, vec![seq[3], seq[0], seq[1], seq[2]]);
    }

    #[test]
    fn test_move_down_past_deleted() {
        let seq = ids(3);
        let active = |id: RecordId| id != seq[1];

        let plan = plan_move(&seq, active, seq[0], Direction::Down).unwrap();
        let mut moved = seq.clone();
        plan.apply(&mut moved);
        assert_eq!(moved, vec![seq[1], seq[2], seq[0]]);
    }

    #[test]
    fn test_inactive_or_unknown_record() {
        let seq = ids(3);
        assert!(plan_move(&seq, |id: RecordId| id != seq[1], seq[1], Direction::Up).is_none());
        assert!(plan_move(&seq[..2], |_| true, seq[2], Direction::Up).is_none());
    }
}

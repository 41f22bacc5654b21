//! Streak-based reordering.
//!
//! Missed phrases come back after a few cards, correct ones go to the back,
//! and phrases on a long enough correct streak leave the queue.

use super::{not_at_front, Placement, Reorder, ReorderPolicy};
use crate::types::{EffectiveSettings, GlobalSettings};

/// Streak policy with configurable parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreakPolicy {
    /// Remaining items a missed phrase is placed behind.
    pub reinsertion_distance: usize,
    /// Correct streak that retires a phrase. 0 never retires.
    pub mastery_threshold: u32,
}

impl Default for StreakPolicy {
    fn default() -> Self {
        Self::from(&EffectiveSettings::merge(&GlobalSettings::default(), None))
    }
}

impl From<&EffectiveSettings> for StreakPolicy {
    fn from(settings: &EffectiveSettings) -> Self {
        Self {
            reinsertion_distance: settings.reinsertion_distance,
            mastery_threshold: settings.mastery_threshold,
        }
    }
}

impl StreakPolicy {
    fn is_mastered(&self, streak: u32) -> bool {
        self.mastery_threshold > 0 && streak >= self.mastery_threshold
    }
}

impl ReorderPolicy for StreakPolicy {
    fn name(&self) -> &'static str {
        "streak"
    }

    fn reorder(&self, queue: &[String], phrase_id: &str, correct: bool, streak: u32) -> Reorder {
        match queue.first() {
            Some(front) if front == phrase_id => {}
            _ => return Reorder::NoOp(not_at_front(queue, phrase_id)),
        }

        let mut next: Vec<String> = queue[1..].to_vec();
        let placement = if !correct {
            let position = self.reinsertion_distance.min(next.len());
            next.insert(position, phrase_id.to_string());
            Placement::Requeued { position }
        } else if self.is_mastered(streak) {
            Placement::Retired
        } else {
            next.push(phrase_id.to_string());
            Placement::Appended
        };

        Reorder::Moved {
            queue: next,
            placement,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queue::NoOpReorder;
    use pretty_assertions::assert_eq;

    fn queue(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    fn policy(distance: usize, threshold: u32) -> StreakPolicy {
        StreakPolicy {
            reinsertion_distance: distance,
            mastery_threshold: threshold,
        }
    }

    fn moved(reorder: Reorder) -> (Vec<String>, Placement) {
        match reorder {
            Reorder::Moved { queue, placement } => (queue, placement),
            Reorder::NoOp(report) => panic!("unexpected no-op: {report:?}"),
        }
    }

    #[test]
    fn wrong_answer_resurfaces_after_distance() {
        let (next, placement) = moved(policy(1, 5).reorder(&queue(&["a", "b", "c"]), "a", false, 0));
        assert_eq!(next, queue(&["b", "a", "c"]));
        assert_eq!(placement, Placement::Requeued { position: 1 });
    }

    #[test]
    fn correct_answer_goes_to_back() {
        let (next, placement) = moved(policy(1, 5).reorder(&queue(&["a", "b", "c"]), "a", true, 1));
        assert_eq!(next, queue(&["b", "c", "a"]));
        assert_eq!(placement, Placement::Appended);
    }

    #[test]
    fn mastered_phrase_is_retired() {
        let (next, placement) = moved(policy(1, 3).reorder(&queue(&["a", "b", "c"]), "a", true, 3));
        assert_eq!(next, queue(&["b", "c"]));
        assert_eq!(placement, Placement::Retired);
    }

    #[test]
    fn zero_threshold_never_retires() {
        let (next, placement) = moved(policy(1, 0).reorder(&queue(&["a", "b"]), "a", true, 100));
        assert_eq!(next, queue(&["b", "a"]));
        assert_eq!(placement, Placement::Appended);
    }

    #[test]
    fn distance_clamps_to_queue_length() {
        let (next, placement) = moved(policy(10, 5).reorder(&queue(&["a", "b", "c"]), "a", false, 0));
        assert_eq!(next, queue(&["b", "c", "a"]));
        assert_eq!(placement, Placement::Requeued { position: 2 });
    }

    #[test]
    fn zero_distance_keeps_phrase_in_front() {
        let (next, _) = moved(policy(0, 5).reorder(&queue(&["a", "b"]), "a", false, 0));
        assert_eq!(next, queue(&["a", "b"]));
    }

    #[test]
    fn single_item_queue() {
        let (next, _) = moved(policy(3, 5).reorder(&queue(&["a"]), "a", false, 0));
        assert_eq!(next, queue(&["a"]));

        let (next, placement) = moved(policy(3, 1).reorder(&queue(&["a"]), "a", true, 1));
        assert!(next.is_empty());
        assert_eq!(placement, Placement::Retired);
    }

    #[test]
    fn id_not_at_front_is_reported() {
        let current = queue(&["a", "b", "c"]);
        match policy(1, 5).reorder(&current, "b", true, 1) {
            Reorder::NoOp(report) => {
                assert_eq!(report.phrase_id, "b");
                assert_eq!(report.front.as_deref(), Some("a"));
                assert!(report.queued_elsewhere);
            }
            other => panic!("expected no-op, got {other:?}"),
        }

        assert!(matches!(
            policy(1, 5).reorder(&current, "zzz", false, 0),
            Reorder::NoOp(NoOpReorder { queued_elsewhere: false, .. })
        ));
        assert!(matches!(
            policy(1, 5).reorder(&[], "a", false, 0),
            Reorder::NoOp(_)
        ));
    }

    #[test]
    fn multiset_preserved_unless_retired() {
        let current = queue(&["a", "b", "c", "d", "e"]);
        let p = policy(2, 4);
        for (correct, streak) in [(false, 0), (true, 1), (true, 3)] {
            let (mut next, _) = moved(p.reorder(&current, "a", correct, streak));
            assert_eq!(next.len(), current.len());
            next.sort();
            assert_eq!(next, current);
        }
        let (next, _) = moved(p.reorder(&current, "a", true, 4));
        assert_eq!(next.len(), current.len() - 1);
    }
}

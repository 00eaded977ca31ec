//! Turn queue between asynchronous input and the fixed-rate tick
//!
//! Input sources may request several turns between two ticks. Every accepted
//! request is queued in order and exactly one is applied per tick, so two
//! quick turns land on two successive ticks instead of the second one
//! overwriting the first.

use std::collections::VecDeque;

use super::vector::{Heading, Vec3i};

/// Heading every game starts with
pub const INITIAL_HEADING: Heading = Heading::PosX;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectionController {
    committed: Heading,
    pending: VecDeque<Heading>,
}

impl DirectionController {
    pub fn new() -> Self {
        Self::with_heading(INITIAL_HEADING)
    }

    pub fn with_heading(committed: Heading) -> Self {
        Self {
            committed,
            pending: VecDeque::new(),
        }
    }

    /// Heading applied on the most recent tick
    pub fn committed(&self) -> Heading {
        self.committed
    }

    /// Accepted turns not yet applied, oldest first
    pub fn pending(&self) -> impl ExactSizeIterator<Item = Heading> + '_ {
        self.pending.iter().copied()
    }

    /// Queue a turn given as a raw vector.
    ///
    /// Anything other than one of the six unit steps is rejected.
    pub fn request_direction(&mut self, v: Vec3i) -> bool {
        match Heading::try_from(v) {
            Ok(heading) => self.request(heading),
            Err(err) => {
                tracing::trace!(%err, "ignoring direction request");
                false
            }
        }
    }

    /// Queue a turn. Returns whether it was accepted.
    ///
    /// A reversal of the committed heading is always rejected, whatever is
    /// queued. The request is then compared with the last queued turn (or the
    /// committed heading when nothing is queued): repeating it or reversing it
    /// is rejected too.
    pub fn request(&mut self, heading: Heading) -> bool {
        if heading.is_opposite(self.committed) {
            return false;
        }

        let reference = self.pending.back().copied().unwrap_or(self.committed);
        if heading == reference || heading.is_opposite(reference) {
            return false;
        }

        self.pending.push_back(heading);
        tracing::debug!(?heading, queued = self.pending.len(), "turn queued");
        true
    }

    /// Heading for the next tick. Call exactly once per tick.
    pub fn consume_tick(&mut self) -> Heading {
        if let Some(next) = self.pending.pop_front() {
            self.committed = next;
        }
        self.committed
    }

    pub fn reset(&mut self) {
        self.committed = INITIAL_HEADING;
        self.pending.clear();
    }
}

impl Default for DirectionController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn assert_queue_invariant(controller: &DirectionController) {
        let mut previous = controller.committed();
        for (index, heading) in controller.pending().enumerate() {
            assert_ne!(heading, previous, "repeat at queue index {index}");
            assert!(
                !heading.is_opposite(previous),
                "reversal at queue index {index}"
            );
            previous = heading;
        }
    }

    #[test]
    fn test_initial_state() {
        let mut controller = DirectionController::new();
        assert_eq!(controller.committed(), Heading::PosX);
        assert_eq!(controller.pending().len(), 0);
        assert_eq!(controller.consume_tick(), Heading::PosX);
    }

    #[test]
    fn test_reversal_of_committed_rejected() {
        let mut controller = DirectionController::new();
        assert!(!controller.request(Heading::NegX));
        assert_eq!(controller.pending().len(), 0);

        // Still illegal with other turns already queued
        assert!(controller.request(Heading::PosY));
        assert!(!controller.request(Heading::NegX));
        assert_eq!(controller.pending().collect::<Vec<_>>(), vec![Heading::PosY]);
    }

    #[test]
    fn test_repeat_rejected() {
        let mut controller = DirectionController::new();
        assert!(!controller.request(Heading::PosX));

        assert!(controller.request(Heading::PosZ));
        assert!(!controller.request(Heading::PosZ));
        assert_eq!(controller.pending().len(), 1);
    }

    #[test]
    fn test_reversal_of_last_queued_rejected() {
        let mut controller = DirectionController::new();
        assert!(controller.request(Heading::PosY));
        assert!(!controller.request(Heading::NegY));
        assert!(controller.request(Heading::NegZ));
        assert_eq!(
            controller.pending().collect::<Vec<_>>(),
            vec![Heading::PosY, Heading::NegZ]
        );
    }

    #[test]
    fn test_rapid_turns_applied_on_successive_ticks() {
        let mut controller = DirectionController::new();
        assert!(controller.request(Heading::PosY));
        assert!(controller.request(Heading::NegZ));
        assert_eq!(controller.pending().len(), 2);

        assert_eq!(controller.consume_tick(), Heading::PosY);
        assert_eq!(controller.committed(), Heading::PosY);
        assert_eq!(controller.consume_tick(), Heading::NegZ);
        assert_eq!(controller.committed(), Heading::NegZ);
        assert_eq!(controller.pending().len(), 0);

        // Nothing queued: heading holds
        assert_eq!(controller.consume_tick(), Heading::NegZ);
    }

    #[test]
    fn test_raw_vector_requests() {
        let mut controller = DirectionController::new();
        assert!(controller.request_direction(Vec3i::new(0, 0, 1)));
        assert!(!controller.request_direction(Vec3i::new(1, 1, 0)));
        assert!(!controller.request_direction(Vec3i::new(0, 0, 0)));
        assert!(!controller.request_direction(Vec3i::new(-1, 0, 0)));
        assert_eq!(controller.consume_tick(), Heading::PosZ);
    }

    #[test]
    fn test_reset() {
        let mut controller = DirectionController::with_heading(Heading::NegY);
        controller.request(Heading::PosZ);
        controller.reset();
        assert_eq!(controller.committed(), Heading::PosX);
        assert_eq!(controller.pending().len(), 0);
    }

    #[test]
    fn test_queue_invariant_under_random_input() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut controller = DirectionController::new();

        for _ in 0..5_000 {
            if rng.gen_bool(0.25) {
                controller.consume_tick();
            } else {
                let heading = Heading::ALL[rng.gen_range(0..Heading::ALL.len())];
                let committed = controller.committed();
                let accepted = controller.request(heading);
                if heading.is_opposite(committed) {
                    assert!(!accepted);
                }
            }
            assert_queue_invariant(&controller);
        }
    }
}

//! Study session management for spaced repetition practice.
//! Sequences one pass over a set of cards, applies SM-2 ratings through the
//! review store and re-queues cards rated "Again" at the end of the pass.

use super::clock::{Clock, SystemClock};
use super::flashcard::StudyCard;
use super::{Rating, ReviewState, StudyStreak, sm2};
use crate::database::ReviewStore;
use crate::error::{Result, StudyError};
use log::{debug, info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Active,
    Completed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FlipState {
    Unrevealed,
    Revealed,
}

/// How the working queue is ordered at start and on every restart.
pub enum QueueOrder {
    /// Uniform random permutation drawn from the given generator.
    Shuffled(StdRng),
    /// Keep the candidates in the order the caller supplied them.
    AsGiven,
}

impl QueueOrder {
    pub fn seeded(seed: u64) -> Self {
        QueueOrder::Shuffled(StdRng::seed_from_u64(seed))
    }

    pub fn random() -> Self {
        QueueOrder::Shuffled(StdRng::from_entropy())
    }
}

/// Point-in-time view of a session, for hosts that render progress.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SessionSnapshot {
    pub status: SessionStatus,
    pub flip: FlipState,
    pub position: usize,
    pub total_cards: usize,
    pub reviewed_count: usize,
    pub current_card_id: Option<String>,
}

/// Result of rating the current card.
#[derive(Clone, Debug, PartialEq)]
pub struct RateOutcome {
    /// State that was written to the store
    pub state: ReviewState,
    pub requeued: bool,
    pub completed: bool,
}

/// Manages a single pass over a candidate list.
/// Cards rated "Again" are appended to the working queue and shown again before the pass ends.
pub struct StudySession<T, S, C = SystemClock> {
    candidates: Vec<T>,
    queue: Vec<usize>,
    current_index: usize,
    flip: FlipState,
    status: SessionStatus,
    reviewed_count: usize,
    order: QueueOrder,
    store: S,
    clock: C,
}

impl<T: StudyCard, S: ReviewStore> StudySession<T, S, SystemClock> {
    /// Creates a session over `cards` in random order, dated by the system clock.
    pub fn new(cards: Vec<T>, store: S) -> Self {
        Self::with_order(cards, QueueOrder::random(), store, SystemClock)
    }
}

impl<T: StudyCard, S: ReviewStore, C: Clock> StudySession<T, S, C> {
    pub fn with_order(cards: Vec<T>, order: QueueOrder, store: S, clock: C) -> Self {
        let mut session = Self {
            candidates: cards,
            queue: Vec::new(),
            current_index: 0,
            flip: FlipState::Unrevealed,
            status: SessionStatus::Active,
            reviewed_count: 0,
            order,
            store,
            clock,
        };
        session.start_pass();
        info!("Study session started with {} cards", session.candidates.len());
        session
    }

    fn start_pass(&mut self) {
        let mut queue: Vec<usize> = (0..self.candidates.len()).collect();
        if let QueueOrder::Shuffled(rng) = &mut self.order {
            queue.shuffle(rng);
        }

        self.queue = queue;
        self.current_index = 0;
        self.flip = FlipState::Unrevealed;
        self.reviewed_count = 0;
        self.status = if self.queue.is_empty() {
            warn!("Study session has no cards; completed immediately");
            SessionStatus::Completed
        } else {
            SessionStatus::Active
        };
    }

    pub fn current_card(&self) -> Option<&T> {
        if self.status == SessionStatus::Completed {
            return None;
        }
        self.queue
            .get(self.current_index)
            .and_then(|&idx| self.candidates.get(idx))
    }

    /// Shows the answer of the current card.
    pub fn reveal(&mut self) -> Result<()> {
        self.ensure_active("reveal")?;
        if self.flip == FlipState::Revealed {
            return Err(StudyError::ProtocolViolation(
                "reveal called on a card that is already revealed".to_string(),
            ));
        }
        self.flip = FlipState::Revealed;
        Ok(())
    }

    /// Grades the current card, stores its new SM-2 state and moves to the next card.
    ///
    /// If the store fails, the error is returned and the session does not move.
    pub fn rate(&mut self, rating: Rating) -> Result<RateOutcome> {
        self.ensure_active("rate")?;
        if self.flip != FlipState::Revealed {
            return Err(StudyError::ProtocolViolation(
                "rate called before the card was revealed".to_string(),
            ));
        }

        let card_idx = self.queue[self.current_index];
        let card_id = self.candidates[card_idx].card_id().to_string();
        let today = self.clock.today();

        let current = self.store.load_or_default(&card_id, today)?;
        let next = sm2::apply_rating(&current, rating, today);

        let previous_streak = self.store.load_streak()?;
        let streak = StudyStreak::record(previous_streak.as_ref(), today);
        let streak_changed = previous_streak.as_ref() != Some(&streak);
        self.store.save_review(&next, streak_changed.then_some(&streak))?;

        debug!(
            "Rated card {} as {} (grade {}): interval {} days, next review {}",
            card_id,
            rating.label(),
            rating.quality(),
            next.interval,
            next.next_review_date
        );

        self.reviewed_count += 1;

        // Measured against the queue before any re-queue
        let was_last = self.current_index + 1 >= self.queue.len();
        let requeued = rating.is_fail();
        if requeued {
            self.queue.push(card_idx);
        }

        self.flip = FlipState::Unrevealed;
        if was_last && !requeued {
            self.status = SessionStatus::Completed;
            info!(
                "Study session completed after {} reviews",
                self.reviewed_count
            );
        } else {
            self.current_index += 1;
        }

        Ok(RateOutcome {
            state: next,
            requeued,
            completed: self.status == SessionStatus::Completed,
        })
    }

    /// Like [`rate`](Self::rate), for a raw 0-5 grade coming from a host.
    pub fn rate_grade(&mut self, grade: u8) -> Result<RateOutcome> {
        let rating = Rating::try_from(grade)?;
        self.rate(rating)
    }

    /// Reshuffles the original candidates (not the grown queue) into a fresh pass.
    pub fn restart(&mut self) {
        self.start_pass();
        info!("Study session restarted with {} cards", self.candidates.len());
    }

    fn ensure_active(&self, operation: &str) -> Result<()> {
        if self.status == SessionStatus::Completed {
            return Err(StudyError::ProtocolViolation(format!(
                "{operation} called on a completed session"
            )));
        }
        Ok(())
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn is_completed(&self) -> bool {
        self.status == SessionStatus::Completed
    }

    pub fn flip_state(&self) -> FlipState {
        self.flip
    }

    /// Cursor into the working queue.
    pub fn position(&self) -> usize {
        self.current_index
    }

    /// Length of the working queue, re-queued cards included.
    pub fn total_cards(&self) -> usize {
        self.queue.len()
    }

    pub fn reviewed_count(&self) -> usize {
        self.reviewed_count
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            status: self.status,
            flip: self.flip,
            position: self.current_index,
            total_cards: self.queue.len(),
            reviewed_count: self.reviewed_count,
            current_card_id: self.current_card().map(|c| c.card_id().to_string()),
        }
    }
}

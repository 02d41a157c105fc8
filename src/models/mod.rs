pub mod clock;
pub mod deck;
pub mod flashcard;
pub mod rating;
pub mod report;
pub mod review_state;
pub mod sm2;
pub mod streak;
pub mod study_mode;
pub mod study_session;

pub use clock::{Clock, FixedClock, SystemClock};
pub use deck::Deck;
pub use flashcard::{Flashcard, StudyCard};
pub use rating::Rating;
pub use report::{CaseProgress, MasteryBreakdown, StudyReport};
pub use review_state::ReviewState;
pub use sm2::MasteryLevel;
pub use streak::StudyStreak;
pub use study_mode::{StudyMode, select_cards};
pub use study_session::{
    FlipState, QueueOrder, RateOutcome, SessionSnapshot, SessionStatus, StudySession,
};

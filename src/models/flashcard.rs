//! Flashcard is a question/answer pair tagged with the case and category it belongs to.
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Flashcard {
    pub id: String,
    pub case: String,
    pub category: String,
    pub question: String,
    pub answer: String,
    #[serde(default)]
    pub explanation: String,
}

/// Anything a study session can queue. The session only ever looks at the id.
pub trait StudyCard {
    fn card_id(&self) -> &str;
}

impl StudyCard for Flashcard {
    fn card_id(&self) -> &str {
        &self.id
    }
}

impl StudyCard for String {
    fn card_id(&self) -> &str {
        self
    }
}

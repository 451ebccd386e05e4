// Store modules
// One store per domain, each persisting its full state under its own
// namespaced key, plus the content provider and the quiz controllers
// that drive them.

pub mod content;
pub mod custom_words;
pub mod gamification;
pub mod mistakes;
pub mod quiz;
pub mod sessions;
pub mod user;

pub use content::{random_verbs, random_words, random_wrong_answers, sample_verbs, sample_words};

pub use custom_words::{CustomWordStore, CustomWordUpdate, NewCustomWord};

pub use gamification::{GamificationStore, DEFAULT_DAILY_GOAL};

pub use mistakes::{MistakeStore, NewMistake};

pub use quiz::{
    matches_accepted_form, VerbAnswer, VerbQuiz, WordAnswer, WordQuiz, COMBO_BONUS_XP,
    HINT_PENALTY, QUESTIONS_PER_SESSION, VERB_XP_PER_CORRECT, WORD_XP_PER_CORRECT,
};

pub use sessions::{OverallStats, SessionStore, DEFAULT_RECENT_LIMIT};

pub use user::{ProfileUpdate, UserStore};

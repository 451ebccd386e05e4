use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User profile record
///
/// Created on first launch (guest) or derived from the Telegram identity
/// payload. Replaced, never deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_active_date: DateTime<Utc>,
}

/// Identity payload handed over by the Telegram Mini App host at launch.
///
/// Optional fields arrive exactly as Telegram sends them; validation
/// happens at the profile store boundary, not here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelegramUser {
    pub id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub photo_url: Option<String>,
}

/// Content difficulty rating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// Word content record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Word {
    pub id: String,
    pub word: String,
    pub translation: String,
    pub difficulty: Difficulty,
    pub part_of_speech: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// Irregular verb content record
///
/// `past` and `participle` may hold `/`-separated alternatives, e.g.
/// "got/gotten" or "was/were".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Verb {
    pub id: String,
    pub base: String,
    pub past: String,
    pub participle: String,
    pub translation: String,
    pub difficulty: Difficulty,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub examples: Option<Vec<String>>,
}

/// User-authored word entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomWord {
    pub id: String,
    pub word: String,
    pub translation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Which quiz produced a mistake
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MistakeKind {
    Word,
    Verb,
}

/// Recorded incorrect sub-answer, available for later review and retry.
///
/// A verb question can produce two of these (past and participle are
/// checked independently).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mistake {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: MistakeKind,
    pub question_id: String,
    pub question: String,
    pub user_answer: String,
    pub correct_answer: String,
    pub timestamp: DateTime<Utc>,
    pub retry_count: u32,
}

/// Quiz session mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionMode {
    Words,
    Verbs,
    Custom,
}

/// One bounded quiz run.
///
/// An open session has no `end_time`; completion fills it in together
/// with the final counters and accuracy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: String,
    pub mode: SessionMode,
    pub start_time: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
    pub accuracy: f64,
    pub total_questions: u32,
    pub correct_answers: u32,
    pub xp_earned: i64,
    pub words_learned: Vec<String>,
}

/// Achievement progress dimension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AchievementKind {
    Streak,
    WordsLearned,
    VerbsLearned,
    Accuracy,
    Xp,
}

/// Achievement catalog entry
///
/// `is_unlocked` only ever flips false to true; `unlocked_at` is stamped
/// once on that transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
    pub id: String,
    pub title: String,
    pub description: String,
    pub icon: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unlocked_at: Option<DateTime<Utc>>,
    pub is_unlocked: bool,
    pub requirement: u32,
    pub progress: u32,
    #[serde(rename = "type")]
    pub kind: AchievementKind,
}

/// Gamification state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GamificationData {
    pub xp: i64,
    pub streak: u32,
    pub last_active_date: DateTime<Utc>,
    pub daily_goal: u32,
    pub daily_progress: u32,
    pub achievements: Vec<Achievement>,
    pub level: i64,
}

/// Multiple-choice question generated for the words quiz
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordQuestion {
    pub id: String,
    pub word: Word,
    pub options: Vec<String>,
    pub correct_answer: String,
}

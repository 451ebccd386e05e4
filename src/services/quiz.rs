// Quiz session controllers
// Presentation-adjacent boundary: these build question sets from the
// content provider, classify answers and write the results into the
// gamification, mistake and session stores. Render state (inputs,
// highlighting) stays in the host UI and is never persisted.

use rand::seq::SliceRandom;

use crate::models::{MistakeKind, SessionMode, Verb, Word, WordQuestion};
use crate::services::content;
use crate::services::gamification::GamificationStore;
use crate::services::mistakes::{MistakeStore, NewMistake};
use crate::services::sessions::SessionStore;
use crate::storage::StorageResult;

pub const QUESTIONS_PER_SESSION: usize = 10;
pub const WORD_XP_PER_CORRECT: i64 = 10;
pub const COMBO_BONUS_XP: i64 = 5;
// Verbs pay more; they are harder.
pub const VERB_XP_PER_CORRECT: i64 = 15;
pub const HINT_PENALTY: i64 = 5;

const WRONG_OPTIONS_PER_QUESTION: usize = 3;
const COMBO_BONUS_THRESHOLD: u32 = 3;

/// Outcome of one words-quiz answer.
#[derive(Debug, Clone, PartialEq)]
pub struct WordAnswer {
    pub correct: bool,
    pub earned_xp: i64,
    pub combo: u32,
}

/// Outcome of one verbs-quiz answer. The question counts as correct
/// only when both forms pass.
#[derive(Debug, Clone, PartialEq)]
pub struct VerbAnswer {
    pub past_correct: bool,
    pub participle_correct: bool,
    pub earned_xp: i64,
}

/// Case-insensitive comparison after trimming, with `/`-separated
/// alternatives in the accepted form ("got/gotten", "was/were").
pub fn matches_accepted_form(input: &str, accepted: &str) -> bool {
    let normalized = normalize(input);
    let accepted = normalize(accepted);

    if accepted.contains('/') {
        return accepted.split('/').any(|alt| alt.trim() == normalized);
    }

    normalized == accepted
}

fn normalize(answer: &str) -> String {
    answer.trim().to_lowercase()
}

// ==================== 单词测验 / words quiz ====================

pub struct WordQuiz {
    questions: Vec<WordQuestion>,
    current: usize,
    score: u32,
    combo: u32,
    answered: bool,
}

impl WordQuiz {
    /// Build a question set from the content provider and open a words
    /// session.
    pub fn start(sessions: &mut SessionStore) -> StorageResult<Self> {
        let pool = content::sample_words();
        let questions = content::random_words(QUESTIONS_PER_SESSION)
            .into_iter()
            .map(|word| build_question(word, &pool))
            .collect();

        sessions.start_session(SessionMode::Words)?;

        Ok(Self {
            questions,
            current: 0,
            score: 0,
            combo: 0,
            answered: false,
        })
    }

    pub fn current_question(&self) -> Option<&WordQuestion> {
        self.questions.get(self.current)
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn combo(&self) -> u32 {
        self.combo
    }

    pub fn is_complete(&self) -> bool {
        self.current >= self.questions.len()
    }

    /// Classify the chosen option against the target translation
    /// (exact, case-sensitive). A correct answer earns XP plus the
    /// combo bonus once the running combo has reached the threshold,
    /// and advances daily progress; an incorrect one resets the combo
    /// and records a mistake. Returns `None` when the current question
    /// was already answered or the quiz is over.
    pub fn submit_answer(
        &mut self,
        answer: &str,
        gamification: &mut GamificationStore,
        mistakes: &mut MistakeStore,
    ) -> StorageResult<Option<WordAnswer>> {
        if self.answered {
            return Ok(None);
        }
        let Some(question) = self.questions.get(self.current) else {
            return Ok(None);
        };

        let correct = answer == question.correct_answer;
        let question_id = question.word.id.clone();
        let question_word = question.word.word.clone();
        let correct_answer = question.correct_answer.clone();
        self.answered = true;

        if correct {
            self.score += 1;
            let bonus = if self.combo >= COMBO_BONUS_THRESHOLD {
                COMBO_BONUS_XP
            } else {
                0
            };
            self.combo += 1;

            let earned_xp = WORD_XP_PER_CORRECT + bonus;
            gamification.add_xp(earned_xp)?;
            gamification.update_daily_progress(1)?;

            Ok(Some(WordAnswer {
                correct: true,
                earned_xp,
                combo: self.combo,
            }))
        } else {
            self.combo = 0;
            mistakes.add_mistake(NewMistake {
                kind: MistakeKind::Word,
                question_id,
                question: question_word,
                user_answer: answer.to_string(),
                correct_answer,
            })?;

            Ok(Some(WordAnswer {
                correct: false,
                earned_xp: 0,
                combo: 0,
            }))
        }
    }

    /// Move on to the next question.
    pub fn advance(&mut self) {
        if self.current < self.questions.len() {
            self.current += 1;
            self.answered = false;
        }
    }

    /// Close out the run: evaluate the streak, then log the session.
    pub fn finish(
        &mut self,
        sessions: &mut SessionStore,
        gamification: &mut GamificationStore,
    ) -> StorageResult<()> {
        gamification.update_streak()?;
        sessions.end_session(
            self.score,
            self.questions.len() as u32,
            self.score as i64 * WORD_XP_PER_CORRECT,
            self.questions.iter().map(|q| q.word.word.clone()).collect(),
        )
    }
}

fn build_question(word: Word, pool: &[Word]) -> WordQuestion {
    let mut options =
        content::random_wrong_answers(&word.translation, pool, WRONG_OPTIONS_PER_QUESTION);
    options.push(word.translation.clone());
    options.shuffle(&mut rand::rng());

    WordQuestion {
        id: word.id.clone(),
        correct_answer: word.translation.clone(),
        word,
        options,
    }
}

// ==================== 动词测验 / verbs quiz ====================

pub struct VerbQuiz {
    verbs: Vec<Verb>,
    current: usize,
    score: u32,
    hints_used: u32,
    hint_shown: bool,
    submitted: bool,
}

impl VerbQuiz {
    /// Draw a verb set from the content provider and open a verbs
    /// session.
    pub fn start(sessions: &mut SessionStore) -> StorageResult<Self> {
        let verbs = content::random_verbs(QUESTIONS_PER_SESSION);
        sessions.start_session(SessionMode::Verbs)?;

        Ok(Self {
            verbs,
            current: 0,
            score: 0,
            hints_used: 0,
            hint_shown: false,
            submitted: false,
        })
    }

    pub fn current_verb(&self) -> Option<&Verb> {
        self.verbs.get(self.current)
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn hints_used(&self) -> u32 {
        self.hints_used
    }

    pub fn is_complete(&self) -> bool {
        self.current >= self.verbs.len()
    }

    /// Reveal the hint for the current question. The XP penalty is
    /// applied when the answer is submitted, not here.
    pub fn use_hint(&mut self) {
        if !self.submitted && !self.hint_shown && self.current < self.verbs.len() {
            self.hint_shown = true;
            self.hints_used += 1;
        }
    }

    /// Check both verb forms independently. Full credit (XP minus any
    /// hint penalty, daily progress) only when both pass; otherwise one
    /// mistake per failing form and no XP. Returns `None` when already
    /// submitted or the quiz is over.
    pub fn submit_answer(
        &mut self,
        past_input: &str,
        participle_input: &str,
        gamification: &mut GamificationStore,
        mistakes: &mut MistakeStore,
    ) -> StorageResult<Option<VerbAnswer>> {
        if self.submitted {
            return Ok(None);
        }
        let Some(verb) = self.verbs.get(self.current) else {
            return Ok(None);
        };
        let verb = verb.clone();

        let past_correct = matches_accepted_form(past_input, &verb.past);
        let participle_correct = matches_accepted_form(participle_input, &verb.participle);
        self.submitted = true;

        if past_correct && participle_correct {
            self.score += 1;
            let penalty = if self.hint_shown { HINT_PENALTY } else { 0 };
            let earned_xp = VERB_XP_PER_CORRECT - penalty;

            gamification.add_xp(earned_xp)?;
            gamification.update_daily_progress(1)?;

            return Ok(Some(VerbAnswer {
                past_correct,
                participle_correct,
                earned_xp,
            }));
        }

        if !past_correct {
            mistakes.add_mistake(NewMistake {
                kind: MistakeKind::Verb,
                question_id: verb.id.clone(),
                question: format!("{} (past)", verb.base),
                user_answer: past_input.to_string(),
                correct_answer: verb.past.clone(),
            })?;
        }
        if !participle_correct {
            mistakes.add_mistake(NewMistake {
                kind: MistakeKind::Verb,
                question_id: verb.id.clone(),
                question: format!("{} (participle)", verb.base),
                user_answer: participle_input.to_string(),
                correct_answer: verb.participle.clone(),
            })?;
        }

        Ok(Some(VerbAnswer {
            past_correct,
            participle_correct,
            earned_xp: 0,
        }))
    }

    /// Move on to the next verb, clearing per-question hint state.
    pub fn advance(&mut self) {
        if self.current < self.verbs.len() {
            self.current += 1;
            self.submitted = false;
            self.hint_shown = false;
        }
    }

    /// Close out the run: evaluate the streak, then log the session.
    pub fn finish(
        &mut self,
        sessions: &mut SessionStore,
        gamification: &mut GamificationStore,
    ) -> StorageResult<()> {
        gamification.update_streak()?;
        sessions.end_session(
            self.score,
            self.verbs.len() as u32,
            self.score as i64 * VERB_XP_PER_CORRECT,
            self.verbs.iter().map(|v| v.base.clone()).collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Storage;

    struct Stores {
        gamification: GamificationStore,
        mistakes: MistakeStore,
        sessions: SessionStore,
    }

    fn stores() -> Stores {
        let storage = Storage::in_memory().expect("storage");
        Stores {
            gamification: GamificationStore::load(storage.clone()).expect("gamification"),
            mistakes: MistakeStore::load(storage.clone()).expect("mistakes"),
            sessions: SessionStore::load(storage).expect("sessions"),
        }
    }

    #[test]
    fn accepted_form_matching() {
        assert!(matches_accepted_form(" Went ", "went"));
        assert!(matches_accepted_form("got", "got/gotten"));
        assert!(matches_accepted_form("gotten", "got/gotten"));
        assert!(matches_accepted_form("WAS", "was/were"));
        assert!(!matches_accepted_form("go", "went"));
        assert!(!matches_accepted_form("", "went"));
    }

    #[test]
    fn word_quiz_builds_ten_questions_with_four_options() {
        let mut s = stores();
        let quiz = WordQuiz::start(&mut s.sessions).expect("start");

        assert!(s.sessions.current_session().is_some());
        let mut seen = 0;
        let mut q = quiz;
        while let Some(question) = q.current_question() {
            assert_eq!(question.options.len(), 4);
            assert!(question.options.contains(&question.correct_answer));
            seen += 1;
            q.advance();
        }
        assert_eq!(seen, QUESTIONS_PER_SESSION);
    }

    #[test]
    fn correct_word_answer_awards_xp_and_daily_progress() {
        let mut s = stores();
        let mut quiz = WordQuiz::start(&mut s.sessions).expect("start");

        let answer = quiz.current_question().expect("question").correct_answer.clone();
        let outcome = quiz
            .submit_answer(&answer, &mut s.gamification, &mut s.mistakes)
            .expect("submit")
            .expect("first answer");

        assert!(outcome.correct);
        assert_eq!(outcome.earned_xp, WORD_XP_PER_CORRECT);
        assert_eq!(s.gamification.xp(), WORD_XP_PER_CORRECT);
        assert_eq!(s.gamification.daily_progress(), 1);
        assert!(s.mistakes.mistakes().is_empty());

        // double submission of the same question is swallowed
        let again = quiz
            .submit_answer(&answer, &mut s.gamification, &mut s.mistakes)
            .expect("submit");
        assert!(again.is_none());
        assert_eq!(s.gamification.xp(), WORD_XP_PER_CORRECT);
    }

    #[test]
    fn combo_bonus_applies_from_the_fourth_streak_answer() {
        let mut s = stores();
        let mut quiz = WordQuiz::start(&mut s.sessions).expect("start");

        let mut total = 0;
        for i in 0..4 {
            let answer = quiz.current_question().expect("question").correct_answer.clone();
            let outcome = quiz
                .submit_answer(&answer, &mut s.gamification, &mut s.mistakes)
                .expect("submit")
                .expect("outcome");
            total += outcome.earned_xp;

            if i < 3 {
                assert_eq!(outcome.earned_xp, WORD_XP_PER_CORRECT);
            } else {
                assert_eq!(outcome.earned_xp, WORD_XP_PER_CORRECT + COMBO_BONUS_XP);
            }
            quiz.advance();
        }

        assert_eq!(total, 45);
        assert_eq!(s.gamification.xp(), 45);
    }

    #[test]
    fn wrong_word_answer_resets_combo_and_records_mistake() {
        let mut s = stores();
        let mut quiz = WordQuiz::start(&mut s.sessions).expect("start");

        let correct = quiz.current_question().expect("question").correct_answer.clone();
        quiz.submit_answer(&correct, &mut s.gamification, &mut s.mistakes)
            .expect("submit");
        quiz.advance();
        assert_eq!(quiz.combo(), 1);

        let outcome = quiz
            .submit_answer("certainly not a translation", &mut s.gamification, &mut s.mistakes)
            .expect("submit")
            .expect("outcome");

        assert!(!outcome.correct);
        assert_eq!(quiz.combo(), 0);
        assert_eq!(s.mistakes.mistakes().len(), 1);
        let mistake = &s.mistakes.mistakes()[0];
        assert_eq!(mistake.kind, MistakeKind::Word);
        assert_eq!(mistake.user_answer, "certainly not a translation");
        // score and xp untouched by the miss
        assert_eq!(quiz.score(), 1);
        assert_eq!(s.gamification.xp(), WORD_XP_PER_CORRECT);
    }

    #[test]
    fn word_answers_are_case_sensitive() {
        let mut s = stores();
        let mut quiz = WordQuiz::start(&mut s.sessions).expect("start");

        let correct = quiz.current_question().expect("question").correct_answer.clone();
        let outcome = quiz
            .submit_answer(&correct.to_uppercase(), &mut s.gamification, &mut s.mistakes)
            .expect("submit")
            .expect("outcome");

        // an option differing only in case is still the wrong option
        if correct != correct.to_uppercase() {
            assert!(!outcome.correct);
        }
    }

    #[test]
    fn word_quiz_finish_logs_session_and_streak() {
        let mut s = stores();
        let mut quiz = WordQuiz::start(&mut s.sessions).expect("start");

        for _ in 0..QUESTIONS_PER_SESSION {
            let answer = quiz.current_question().expect("question").correct_answer.clone();
            quiz.submit_answer(&answer, &mut s.gamification, &mut s.mistakes)
                .expect("submit");
            quiz.advance();
        }
        assert!(quiz.is_complete());

        quiz.finish(&mut s.sessions, &mut s.gamification).expect("finish");

        assert!(s.sessions.current_session().is_none());
        let session = &s.sessions.sessions()[0];
        assert_eq!(session.mode, SessionMode::Words);
        assert_eq!(session.correct_answers, 10);
        assert_eq!(session.total_questions, 10);
        assert_eq!(session.accuracy, 100.0);
        assert_eq!(session.xp_earned, 10 * WORD_XP_PER_CORRECT);
        assert_eq!(session.words_learned.len(), 10);
    }

    #[test]
    fn verb_quiz_awards_full_xp_without_hint() {
        let mut s = stores();
        let mut quiz = VerbQuiz::start(&mut s.sessions).expect("start");

        let verb = quiz.current_verb().expect("verb").clone();
        let past = verb.past.split('/').next().expect("past form").to_string();
        let participle = verb
            .participle
            .split('/')
            .next()
            .expect("participle form")
            .to_string();

        let outcome = quiz
            .submit_answer(&past, &participle, &mut s.gamification, &mut s.mistakes)
            .expect("submit")
            .expect("outcome");

        assert!(outcome.past_correct && outcome.participle_correct);
        assert_eq!(outcome.earned_xp, VERB_XP_PER_CORRECT);
        assert_eq!(s.gamification.daily_progress(), 1);
        assert!(s.mistakes.mistakes().is_empty());
    }

    #[test]
    fn hint_reduces_the_award() {
        let mut s = stores();
        let mut quiz = VerbQuiz::start(&mut s.sessions).expect("start");

        quiz.use_hint();
        quiz.use_hint(); // second press is ignored
        assert_eq!(quiz.hints_used(), 1);

        let verb = quiz.current_verb().expect("verb").clone();
        let past = verb.past.split('/').next().expect("past form").to_string();
        let participle = verb
            .participle
            .split('/')
            .next()
            .expect("participle form")
            .to_string();

        let outcome = quiz
            .submit_answer(&past, &participle, &mut s.gamification, &mut s.mistakes)
            .expect("submit")
            .expect("outcome");

        assert_eq!(outcome.earned_xp, VERB_XP_PER_CORRECT - HINT_PENALTY);
        assert_eq!(s.gamification.xp(), VERB_XP_PER_CORRECT - HINT_PENALTY);
    }

    #[test]
    fn each_failing_form_records_its_own_mistake() {
        let mut s = stores();
        let mut quiz = VerbQuiz::start(&mut s.sessions).expect("start");

        let verb = quiz.current_verb().expect("verb").clone();
        let past = verb.past.split('/').next().expect("past form").to_string();

        // one field wrong: exactly one mistake, no xp, no progress
        let outcome = quiz
            .submit_answer(&past, "nonsense", &mut s.gamification, &mut s.mistakes)
            .expect("submit")
            .expect("outcome");
        assert!(outcome.past_correct);
        assert!(!outcome.participle_correct);
        assert_eq!(outcome.earned_xp, 0);
        assert_eq!(s.gamification.xp(), 0);
        assert_eq!(s.gamification.daily_progress(), 0);
        assert_eq!(s.mistakes.mistakes().len(), 1);
        assert_eq!(
            s.mistakes.mistakes()[0].question,
            format!("{} (participle)", verb.base)
        );

        // both fields wrong on the next verb: two mistakes
        quiz.advance();
        let verb = quiz.current_verb().expect("verb").clone();
        quiz.submit_answer("nope", "nah", &mut s.gamification, &mut s.mistakes)
            .expect("submit")
            .expect("outcome");
        assert_eq!(s.mistakes.mistakes().len(), 3);
        assert_eq!(
            s.mistakes.mistakes()[1].question,
            format!("{} (past)", verb.base)
        );
        assert_eq!(s.mistakes.mistakes()[2].question, format!("{} (participle)", verb.base));
        // neither partially nor fully missed questions touch the score
        assert_eq!(quiz.score(), 0);
    }

    #[test]
    fn verb_quiz_finish_logs_session() {
        let mut s = stores();
        let mut quiz = VerbQuiz::start(&mut s.sessions).expect("start");

        while let Some(verb) = quiz.current_verb() {
            let verb = verb.clone();
            let past = verb.past.split('/').next().expect("past form").to_string();
            let participle = verb
                .participle
                .split('/')
                .next()
                .expect("participle form")
                .to_string();
            quiz.submit_answer(&past, &participle, &mut s.gamification, &mut s.mistakes)
                .expect("submit");
            quiz.advance();
        }

        quiz.finish(&mut s.sessions, &mut s.gamification).expect("finish");

        let session = &s.sessions.sessions()[0];
        assert_eq!(session.mode, SessionMode::Verbs);
        assert_eq!(session.correct_answers, 10);
        assert_eq!(session.xp_earned, 10 * VERB_XP_PER_CORRECT);
        assert_eq!(session.words_learned.len(), 10);
        assert!(s.gamification.streak() <= 1);
    }
}

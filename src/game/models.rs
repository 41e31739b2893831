use core::fmt;

use rand::{Rng, seq::SliceRandom};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Load order for a category batch: easy first, hard last.
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn points(&self) -> u32 {
        match self {
            Difficulty::Easy => 10,
            Difficulty::Medium => 15,
            Difficulty::Hard => 20,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Setup,
    Category,
    Playing,
    Finished,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Setup => write!(f, "setup"),
            Phase::Category => write!(f, "category"),
            Phase::Playing => write!(f, "playing"),
            Phase::Finished => write!(f, "finished"),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct Player {
    pub name: String,
    pub score: u32,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Category {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Question {
    pub text: String,
    pub correct_answer: String,
    pub incorrect_answers: Vec<String>,
    pub difficulty: Difficulty,
}

impl Question {
    /// Every answer in display order. The order is rolled fresh on each
    /// call and never stored, so a redisplayed question reshuffles.
    pub fn shuffled_answers<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<String> {
        let mut answers = self.incorrect_answers.clone();
        answers.push(self.correct_answer.clone());
        answers.shuffle(rng);
        answers
    }
}

/// Result of a single `submit_answer`, for the renderer to reveal.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct AnswerOutcome {
    pub correct: bool,
    pub points_awarded: u32,
    pub correct_answer: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    NextQuestion,
    EndOfCategory,
    Finished,
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Winner(usize),
    Tie,
}

/// Full view of the session handed to the render sink after every
/// transition. Untrusted API text in here must be sanitized by the
/// renderer before display.
#[derive(Debug, Serialize, Clone)]
pub struct GameSnapshot {
    pub phase: Phase,
    pub players: [Player; 2],
    pub current_player: usize,
    pub current_category: String,
    pub available_categories: Vec<Category>,
    pub question: Option<Question>,
    pub question_number: Option<usize>,
    pub question_count: usize,
    pub answering: bool,
    pub outcome: Option<GameOutcome>,
    pub last_error: Option<String>,
}

use std::collections::HashSet;

use crate::game::{
    error::GameError,
    models::{Advance, AnswerOutcome, Category, GameOutcome, GameSnapshot, Phase, Player, Question},
};

/// Root aggregate of one game. Pure and synchronous: every mutation goes
/// through a command method that either applies a legal transition or
/// returns a `GameError` and leaves the state untouched.
#[derive(Debug)]
pub struct GameSession {
    players: [Player; 2],
    categories: Vec<Category>,
    used_categories: HashSet<String>,
    questions: Vec<Question>,
    question_index: usize,
    current_player: usize,
    current_category: String,
    phase: Phase,
    answering: bool,
}

impl GameSession {
    pub fn new() -> Self {
        Self {
            players: [Player::default(), Player::default()],
            categories: vec![],
            used_categories: HashSet::new(),
            questions: vec![],
            question_index: 0,
            current_player: 0,
            current_category: String::new(),
            phase: Phase::Setup,
            answering: false,
        }
    }

    pub fn start(&mut self, name1: &str, name2: &str) -> Result<(), GameError> {
        if self.phase != Phase::Setup {
            return Err(GameError::InvalidPhase {
                command: "start",
                phase: self.phase,
            });
        }

        let name1 = name1.trim();
        let name2 = name2.trim();
        if name1.is_empty() || name2.is_empty() {
            return Err(GameError::EmptyName);
        }
        if name1 == name2 {
            return Err(GameError::DuplicateName);
        }

        self.players[0] = Player {
            name: name1.to_string(),
            score: 0,
        };
        self.players[1] = Player {
            name: name2.to_string(),
            score: 0,
        };
        self.phase = Phase::Category;

        Ok(())
    }

    pub fn install_categories(&mut self, categories: Vec<Category>) {
        self.categories = categories;
    }

    pub fn ensure_selectable(&self, id: &str) -> Result<(), GameError> {
        if self.phase != Phase::Category {
            return Err(GameError::InvalidPhase {
                command: "select_category",
                phase: self.phase,
            });
        }
        if self.used_categories.contains(id) {
            return Err(GameError::CategoryUsed(id.to_string()));
        }

        Ok(())
    }

    /// Installs a fully fetched question batch and enters `Playing`. The
    /// id is marked used here and only here, so a failed fetch never
    /// burns a category.
    pub fn begin_category(
        &mut self,
        id: &str,
        name: &str,
        questions: Vec<Question>,
    ) -> Result<(), GameError> {
        self.ensure_selectable(id)?;
        if questions.is_empty() {
            return Err(GameError::EmptyQuestionBatch(name.to_string()));
        }

        self.used_categories.insert(id.to_string());
        self.current_category = name.to_string();
        self.questions = questions;
        self.question_index = 0;
        self.current_player = 0;
        self.answering = true;
        self.phase = Phase::Playing;

        Ok(())
    }

    /// Exact string match against the correct answer. The `answering`
    /// flag drops on the first submission, so a second one is rejected
    /// without touching any score.
    pub fn submit_answer(&mut self, selected: &str) -> Result<AnswerOutcome, GameError> {
        if self.phase != Phase::Playing {
            return Err(GameError::InvalidPhase {
                command: "submit_answer",
                phase: self.phase,
            });
        }
        if !self.answering {
            return Err(GameError::AlreadyAnswered);
        }

        let question = &self.questions[self.question_index];
        let correct = selected == question.correct_answer;
        let points_awarded = if correct { question.difficulty.points() } else { 0 };
        let correct_answer = question.correct_answer.clone();

        self.answering = false;
        self.players[self.current_player].score += points_awarded;

        Ok(AnswerOutcome {
            correct,
            points_awarded,
            correct_answer,
        })
    }

    /// Moves to the next question, or reports the end of the category.
    /// The turn passes to the other player on every advance, no matter
    /// who answered correctly. With no categories left the session goes
    /// straight to `Finished` without waiting on a continue decision.
    pub fn advance(&mut self) -> Result<Advance, GameError> {
        if self.phase != Phase::Playing {
            return Err(GameError::InvalidPhase {
                command: "advance",
                phase: self.phase,
            });
        }
        if self.answering {
            return Err(GameError::AnswerPending);
        }

        if self.question_index < self.questions.len() - 1 {
            self.question_index += 1;
            self.current_player = 1 - self.current_player;
            self.answering = true;
            return Ok(Advance::NextQuestion);
        }

        if !self.categories_remain() {
            self.phase = Phase::Finished;
            return Ok(Advance::Finished);
        }

        Ok(Advance::EndOfCategory)
    }

    pub fn continue_with_another_category(&mut self, yes: bool) -> Result<(), GameError> {
        let end_of_category = self.phase == Phase::Playing
            && !self.answering
            && self.question_index + 1 == self.questions.len();
        if !end_of_category {
            return Err(GameError::InvalidPhase {
                command: "continue_with_another_category",
                phase: self.phase,
            });
        }

        if yes && self.categories_remain() {
            self.phase = Phase::Category;
        } else {
            self.phase = Phase::Finished;
        }

        Ok(())
    }

    /// Full reset back to `Setup`, keeping only the fetched category
    /// list so a new game skips the redundant network call.
    pub fn restart(&mut self) {
        let categories = std::mem::take(&mut self.categories);
        *self = Self::new();
        self.categories = categories;
    }

    pub fn outcome(&self) -> Option<GameOutcome> {
        if self.phase != Phase::Finished {
            return None;
        }

        let [p1, p2] = &self.players;
        let outcome = if p1.score > p2.score {
            GameOutcome::Winner(0)
        } else if p2.score > p1.score {
            GameOutcome::Winner(1)
        } else {
            GameOutcome::Tie
        };

        Some(outcome)
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn players(&self) -> &[Player; 2] {
        &self.players
    }

    pub fn current_player(&self) -> usize {
        self.current_player
    }

    pub fn current_category(&self) -> &str {
        &self.current_category
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn available_categories(&self) -> impl Iterator<Item = &Category> {
        self.categories
            .iter()
            .filter(|category| !self.used_categories.contains(&category.id))
    }

    pub fn categories_remain(&self) -> bool {
        self.available_categories().next().is_some()
    }

    pub fn used_categories(&self) -> &HashSet<String> {
        &self.used_categories
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn question_index(&self) -> usize {
        self.question_index
    }

    pub fn current_question(&self) -> Option<&Question> {
        if self.phase != Phase::Playing {
            return None;
        }

        self.questions.get(self.question_index)
    }

    pub fn is_answering(&self) -> bool {
        self.answering
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            phase: self.phase,
            players: self.players.clone(),
            current_player: self.current_player,
            current_category: self.current_category.clone(),
            available_categories: self.available_categories().cloned().collect(),
            question: self.current_question().cloned(),
            question_number: self.current_question().map(|_| self.question_index + 1),
            question_count: self.questions.len(),
            answering: self.answering,
            outcome: self.outcome(),
            last_error: None,
        }
    }
}

use futures::future::try_join3;
use tracing::{error, info};

use crate::{
    client::trivia_client_error::TriviaClientError,
    config::config::CONFIG,
    game::{
        error::GameError,
        models::{Advance, AnswerOutcome, Category, Difficulty, GameSnapshot, Question},
        session::GameSession,
    },
};

pub trait TriviaSource {
    async fn fetch_categories(&self) -> Result<Vec<Category>, TriviaClientError>;

    async fn fetch_questions(
        &self,
        category_id: &str,
        difficulty: Difficulty,
        limit: u8,
    ) -> Result<Vec<Question>, TriviaClientError>;
}

/// Gets the full session snapshot after every state transition. The
/// renderer owns display-time answer shuffling and must sanitize the
/// untrusted API text it prints.
pub trait RenderSink {
    fn render(&mut self, snapshot: &GameSnapshot);
}

pub trait ContinuePrompt {
    fn confirm_continue(&mut self, category_name: &str) -> bool;
}

/// The last failed request, kept as a value so a retry re-issues the
/// descriptor instead of replaying a captured closure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchRequest {
    Categories,
    Questions { id: String, name: String },
}

/// Single owner of the session. Every command goes through `&mut self`,
/// which serializes all mutation: two category selections can never
/// interleave, the second is rejected by the phase guard instead.
pub struct GameController<S, U> {
    session: GameSession,
    source: S,
    ui: U,
    last_failed: Option<FetchRequest>,
    last_error: Option<String>,
}

impl<S, U> GameController<S, U>
where
    S: TriviaSource,
    U: RenderSink + ContinuePrompt,
{
    pub fn new(source: S, ui: U) -> Self {
        Self {
            session: GameSession::new(),
            source,
            ui,
            last_failed: None,
            last_error: None,
        }
    }

    /// Validates the player names, then loads the category list unless a
    /// previous game already cached it. A failed load keeps the session
    /// in the category phase with a retry descriptor recorded.
    pub async fn start(&mut self, name1: &str, name2: &str) -> Result<(), GameError> {
        self.session.start(name1, name2)?;

        let result = if self.session.categories().is_empty() {
            self.load_categories().await
        } else {
            Ok(())
        };

        self.render();
        result
    }

    /// Fires one request per difficulty and joins all three: the first
    /// failure aborts the whole batch and partial results are discarded.
    /// Only a fully successful batch marks the category used and enters
    /// play, so a failed fetch leaves the category selectable.
    pub async fn select_category(&mut self, id: &str, name: &str) -> Result<(), GameError> {
        self.session.ensure_selectable(id)?;

        let limit = CONFIG.api.questions_per_difficulty;
        let batch = try_join3(
            self.source.fetch_questions(id, Difficulty::Easy, limit),
            self.source.fetch_questions(id, Difficulty::Medium, limit),
            self.source.fetch_questions(id, Difficulty::Hard, limit),
        )
        .await;

        let (easy, medium, hard) = match batch {
            Ok(batch) => batch,
            Err(e) => {
                error!("Failed to load questions for category {}: {}", id, e);
                let failure = self.record_failure(FetchRequest::questions(id, name), e);
                self.render();
                return Err(failure);
            }
        };

        // Difficulty-major order, fixed for the lifetime of the category
        let mut questions = easy;
        questions.extend(medium);
        questions.extend(hard);

        if questions.is_empty() {
            error!("Category {} returned no questions", id);
            self.last_failed = Some(FetchRequest::questions(id, name));
            self.last_error = Some(format!("No questions available for {}", name));
            self.render();
            return Err(GameError::EmptyQuestionBatch(name.to_string()));
        }

        info!("Loaded {} questions for category {}", questions.len(), id);
        self.session.begin_category(id, name, questions)?;
        self.clear_failure();
        self.render();

        Ok(())
    }

    pub fn submit_answer(&mut self, selected: &str) -> Result<AnswerOutcome, GameError> {
        let outcome = self.session.submit_answer(selected)?;
        self.render();

        Ok(outcome)
    }

    /// Next question, or the end-of-category decision: with categories
    /// left the continue prompt is consulted, with none left the session
    /// is already finished before any prompt.
    pub fn advance(&mut self) -> Result<(), GameError> {
        match self.session.advance()? {
            Advance::NextQuestion | Advance::Finished => {}
            Advance::EndOfCategory => {
                let category = self.session.current_category().to_string();
                let yes = self.ui.confirm_continue(&category);
                self.session.continue_with_another_category(yes)?;
            }
        }

        self.render();
        Ok(())
    }

    /// Re-issues the stored descriptor. One manual retry per call, no
    /// backoff, no cap on attempts.
    pub async fn retry_last_fetch(&mut self) -> Result<(), GameError> {
        let Some(request) = self.last_failed.clone() else {
            return Err(GameError::NothingToRetry);
        };

        info!("Retrying failed fetch: {:?}", request);
        match request {
            FetchRequest::Categories => {
                let result = self.load_categories().await;
                self.render();
                result
            }
            FetchRequest::Questions { id, name } => self.select_category(&id, &name).await,
        }
    }

    pub fn restart(&mut self) {
        self.session.restart();
        self.clear_failure();
        self.render();
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn ui(&self) -> &U {
        &self.ui
    }

    pub fn can_retry(&self) -> bool {
        self.last_failed.is_some()
    }

    async fn load_categories(&mut self) -> Result<(), GameError> {
        match self.source.fetch_categories().await {
            Ok(categories) => {
                info!("Loaded {} categories", categories.len());
                self.session.install_categories(categories);
                self.clear_failure();
                Ok(())
            }
            Err(e) => {
                error!("Failed to load categories: {}", e);
                Err(self.record_failure(FetchRequest::Categories, e))
            }
        }
    }

    fn record_failure(&mut self, request: FetchRequest, e: TriviaClientError) -> GameError {
        self.last_failed = Some(request);
        self.last_error = Some(e.to_string());

        GameError::Client(e)
    }

    fn clear_failure(&mut self) {
        self.last_failed = None;
        self.last_error = None;
    }

    fn render(&mut self) {
        let mut snapshot = self.session.snapshot();
        snapshot.last_error = self.last_error.clone();
        self.ui.render(&snapshot);
    }
}

impl FetchRequest {
    fn questions(id: &str, name: &str) -> Self {
        FetchRequest::Questions {
            id: id.to_string(),
            name: name.to_string(),
        }
    }
}

use crate::{client::trivia_client_error::TriviaClientError, game::models::Phase};

#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("Both players need a name")]
    EmptyName,

    #[error("Players must have different names")]
    DuplicateName,

    #[error("Category {0} has already been played")]
    CategoryUsed(String),

    #[error("{command} is not valid in the {phase} phase")]
    InvalidPhase {
        command: &'static str,
        phase: Phase,
    },

    #[error("The current question has already been answered")]
    AlreadyAnswered,

    #[error("The current question is still awaiting an answer")]
    AnswerPending,

    #[error("Category {0} returned no questions")]
    EmptyQuestionBatch(String),

    #[error("Http request failed: {0}")]
    Client(#[from] TriviaClientError),

    #[error("No failed request to retry")]
    NothingToRetry,
}

use std::collections::BTreeMap;

use reqwest::Client;
use serde::{Deserialize, de::DeserializeOwned};
use tracing::{error, info};

use crate::{
    client::trivia_client_error::TriviaClientError,
    game::{
        controller::TriviaSource,
        models::{Category, Difficulty, Question},
    },
};

/// Wire shape of a question as the trivia API returns it.
#[derive(Debug, Deserialize)]
pub struct ApiQuestion {
    pub question: ApiQuestionText,
    #[serde(rename(deserialize = "correctAnswer"))]
    pub correct_answer: String,
    #[serde(rename(deserialize = "incorrectAnswers"))]
    pub incorrect_answers: Vec<String>,
    pub difficulty: Difficulty,
}

#[derive(Debug, Deserialize)]
pub struct ApiQuestionText {
    pub text: String,
}

impl Into<Question> for ApiQuestion {
    fn into(self) -> Question {
        Question {
            text: self.question.text,
            correct_answer: self.correct_answer,
            incorrect_answers: self.incorrect_answers,
            difficulty: self.difficulty,
        }
    }
}

/// No request timeouts are configured: a hung request leaves the caller
/// waiting until the connection drops.
#[derive(Debug, Clone)]
pub struct TriviaClient {
    base_url: String,
    client: Client,
}

impl TriviaClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: Client::new(),
        }
    }

    /// The API hands categories back as an id -> display name map with
    /// no defined order; a BTreeMap keeps the menu deterministic.
    pub(crate) fn categories_from_map(map: BTreeMap<String, String>) -> Vec<Category> {
        map.into_iter()
            .map(|(id, name)| Category { id, name })
            .collect()
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, TriviaClientError> {
        info!("TriviaClient sending request to: {}", url);
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or("No body".into());
            error!("TriviaClient request failed: {} - {}", status, body);
            return Err(TriviaClientError::Api(status, body));
        }

        Ok(response.json::<T>().await?)
    }
}

impl TriviaSource for TriviaClient {
    async fn fetch_categories(&self) -> Result<Vec<Category>, TriviaClientError> {
        let url = format!("{}/categories", self.base_url);
        let map = self.get_json::<BTreeMap<String, String>>(&url).await?;

        Ok(Self::categories_from_map(map))
    }

    async fn fetch_questions(
        &self,
        category_id: &str,
        difficulty: Difficulty,
        limit: u8,
    ) -> Result<Vec<Question>, TriviaClientError> {
        let url = format!(
            "{}/questions?categories={}&difficulties={}&limit={}",
            self.base_url, category_id, difficulty, limit
        );
        let questions = self.get_json::<Vec<ApiQuestion>>(&url).await?;

        Ok(questions.into_iter().map(Into::into).collect())
    }
}

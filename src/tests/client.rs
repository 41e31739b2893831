#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use crate::{
        client::trivia_client::{ApiQuestion, TriviaClient},
        game::models::{Difficulty, Question},
    };

    #[test]
    fn decodes_the_wire_question_shape() {
        let json = serde_json::json!({
            "question": { "text": "What is the chemical symbol for gold?" },
            "correctAnswer": "Au",
            "incorrectAnswers": ["Ag", "Fe", "Pb"],
            "difficulty": "medium"
        });

        let api: ApiQuestion = serde_json::from_value(json).unwrap();
        let question: Question = api.into();

        assert_eq!(question.text, "What is the chemical symbol for gold?");
        assert_eq!(question.correct_answer, "Au");
        assert_eq!(question.incorrect_answers, vec!["Ag", "Fe", "Pb"]);
        assert_eq!(question.difficulty, Difficulty::Medium);
    }

    #[test]
    fn rejects_an_unknown_difficulty() {
        let json = serde_json::json!({
            "question": { "text": "?" },
            "correctAnswer": "a",
            "incorrectAnswers": ["b"],
            "difficulty": "impossible"
        });

        assert!(serde_json::from_value::<ApiQuestion>(json).is_err());
    }

    #[test]
    fn category_map_becomes_a_deterministic_list() {
        let mut map = BTreeMap::new();
        map.insert("science".to_string(), "Science".to_string());
        map.insert("arts_and_literature".to_string(), "Arts & Literature".to_string());
        map.insert("history".to_string(), "History".to_string());

        let categories = TriviaClient::categories_from_map(map);

        let ids: Vec<&str> = categories.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["arts_and_literature", "history", "science"]);
        assert_eq!(categories[0].name, "Arts & Literature");
    }
}

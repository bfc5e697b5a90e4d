use serde::{Deserialize, Serialize};

pub type CategoryId = i64;
pub type QuestionId = i64;
pub type AnswerId = i64;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuestionCategory {
    #[serde(rename = "_id")]
    pub id: CategoryId,
    pub name: String,
}

impl QuestionCategory {
    pub fn new(name: &str) -> Self {
        QuestionCategory {
            id: 0,
            name: name.to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Question {
    #[serde(rename = "_id")]
    pub id: QuestionId,
    pub category_id: CategoryId,
    pub text: String,
}

impl Question {
    pub fn new(category_id: CategoryId, text: &str) -> Self {
        Question {
            id: 0,
            category_id,
            text: text.to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Answer {
    #[serde(rename = "_id")]
    pub id: AnswerId,
    pub question_id: QuestionId,
    pub text: String,
    pub is_correct: bool,
}

impl Answer {
    pub fn new(question_id: QuestionId, text: &str, is_correct: bool) -> Self {
        Answer {
            id: 0,
            question_id,
            text: text.to_string(),
            is_correct,
        }
    }

    pub fn belongs_to(&self, question: &Question) -> bool {
        self.question_id == question.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answer_belongs_to_its_question_only() {
        let mut question = Question::new(1, "2 + 2?");
        question.id = 10;
        let mut other = Question::new(1, "3 + 3?");
        other.id = 11;

        let answer = Answer::new(10, "4", true);
        assert!(answer.belongs_to(&question));
        assert!(!answer.belongs_to(&other));
    }
}

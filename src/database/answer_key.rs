use std::fmt;

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// One stored answer key.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct AnswerKeyRecord {
    test_id: String,
    answers: String,
    created_at: DateTime<Utc>,
}

impl fmt::Display for AnswerKeyRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "🆔 {}: {} ({})",
            self.test_id,
            self.answers,
            self.created_at.format("%Y-%m-%d %H:%M:%S")
        )
    }
}

impl AnswerKeyRecord {
    pub fn retreive(test_id: String, answers: String, created_at: DateTime<Utc>) -> Self {
        Self {
            test_id,
            answers,
            created_at,
        }
    }

    pub fn test_id(&self) -> &str {
        &self.test_id
    }

    pub fn answers(&self) -> &str {
        &self.answers
    }

    pub fn created_at(&self) -> &DateTime<Utc> {
        &self.created_at
    }
}

/// Ids are compared without surrounding whitespace.
pub fn normalize_test_id(test_id: &str) -> &str {
    test_id.trim()
}

/// Answers are stored trimmed and upper-cased.
pub fn normalize_answers(answers: &str) -> String {
    answers.trim().to_uppercase()
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn renders_as_list_line() {
        let record = AnswerKeyRecord::retreive(
            "q1".into(),
            "ABCD".into(),
            Utc.with_ymd_and_hms(2024, 10, 20, 12, 30, 5).unwrap(),
        );
        assert_eq!(record.to_string(), "🆔 q1: ABCD (2024-10-20 12:30:05)");
    }

    #[test]
    fn normalizes_input() {
        assert_eq!(normalize_test_id("  q1 \n"), "q1");
        assert_eq!(normalize_answers(" abCd "), "ABCD");
    }
}

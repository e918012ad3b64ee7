//! Post-parse statistics: question count and missing-answer warnings.

use serde::{Deserialize, Serialize};

use crate::types::Question;

/// Count of parsed questions and advisory warnings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub total: usize,
    /// One message per question lacking a correct answer, in question order.
    pub warnings: Vec<String>,
}

impl Summary {
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Summarize parsed questions. Does not alter them.
pub fn summarize(questions: &[Question]) -> Summary {
    let warnings = questions
        .iter()
        .filter(|q| q.correct_answer.is_none())
        .map(|q| format!("A questão \"{}\" está sem alternativa correta.", q.identifier))
        .collect();

    Summary {
        total: questions.len(),
        warnings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    #[test]
    fn warns_for_missing_marker() {
        let summary = summarize(&parse("1. Q one\na) X\nb) Y"));
        assert_eq!(summary.total, 1);
        assert_eq!(summary.warnings.len(), 1);
        assert!(summary.warnings[0].contains("\"1.\""));
        assert!(summary.has_warnings());
    }

    #[test]
    fn no_warnings_when_all_marked() {
        let summary = summarize(&parse("1. A\na) x {correta}\n2. B\nb) y {correto}"));
        assert_eq!(summary.total, 2);
        assert!(!summary.has_warnings());
    }

    #[test]
    fn warnings_follow_question_order() {
        let summary = summarize(&parse("1. A\na) x\n2. B\na) y {correta}\nQuestão 3 C\na) z"));
        assert_eq!(
            summary.warnings,
            vec![
                "A questão \"1.\" está sem alternativa correta.",
                "A questão \"Questão 3\" está sem alternativa correta.",
            ]
        );
    }

    #[test]
    fn empty_input() {
        assert_eq!(summarize(&[]), Summary::default());
    }
}

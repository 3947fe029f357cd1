//! Scoring and grade bands.

use crate::{answer::AnswerSlot, kind::AssessmentKind, model::Question};

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Outcome {
    pub score: u16,
    pub total: u16,
}

impl Outcome {
    /// `0.0` for an empty assessment.
    pub fn percentage(self) -> f32 {
        if self.total == 0 {
            return 0.0;
        }
        self.score as f32 * 100.0 / self.total as f32
    }

    pub fn grade(self) -> Grade {
        Grade::from_percentage(self.percentage())
    }

    pub fn standing(self) -> Standing {
        Standing::from_percentage(self.percentage())
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    pub fn from_percentage(percentage: f32) -> Self {
        if percentage >= 90.0 {
            Self::A
        } else if percentage >= 80.0 {
            Self::B
        } else if percentage >= 70.0 {
            Self::C
        } else if percentage >= 60.0 {
            Self::D
        } else {
            Self::F
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::F => "F",
        }
    }
}

/// Coarse band used to pick the result cue.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Standing {
    Excellent,
    Passed,
    Failed,
}

impl Standing {
    pub fn from_percentage(percentage: f32) -> Self {
        if percentage >= 80.0 {
            Self::Excellent
        } else if percentage >= 50.0 {
            Self::Passed
        } else {
            Self::Failed
        }
    }
}

/// Count confirmed answers that match their key. Pending selections and
/// unanswered slots never score.
pub fn score<K: AssessmentKind>(
    questions: &[Question<K::Key>],
    slots: &[AnswerSlot<K::Answer>],
) -> Outcome {
    let correct = questions
        .iter()
        .zip(slots)
        .filter(|(question, slot)| {
            slot.confirmed()
                .is_some_and(|answer| K::is_correct(question, answer))
        })
        .count();

    Outcome {
        score: u16::try_from(correct).unwrap_or(u16::MAX),
        total: u16::try_from(questions.len()).unwrap_or(u16::MAX),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{answer::fresh_sheet, kind::Exam};

    fn question(key: Option<u8>) -> Question<Option<u8>> {
        Question {
            id: 0,
            text: "Q".into(),
            options: vec!["a".into(), "b".into(), "c".into(), "d".into()],
            key,
        }
    }

    #[test]
    fn only_confirmed_answers_score() {
        let questions = [question(Some(1)), question(Some(2)), question(Some(0))];
        let mut slots = fresh_sheet::<u8>(3);
        slots[0].select(1);
        slots[0].select(1);
        slots[1].select(2);
        slots[2].select(3);
        slots[2].select(3);

        let outcome = score::<Exam>(&questions, &slots);
        assert_eq!(outcome, Outcome { score: 1, total: 3 });
    }

    #[test]
    fn half_right_is_fifty_percent() {
        let outcome = Outcome { score: 1, total: 2 };
        assert_eq!(outcome.percentage(), 50.0);
        assert_eq!(outcome.grade(), Grade::F);
        assert_eq!(outcome.standing(), Standing::Passed);
    }

    #[test]
    fn grade_band_edges() {
        assert_eq!(Grade::from_percentage(90.0), Grade::A);
        assert_eq!(Grade::from_percentage(89.9), Grade::B);
        assert_eq!(Grade::from_percentage(80.0), Grade::B);
        assert_eq!(Grade::from_percentage(70.0), Grade::C);
        assert_eq!(Grade::from_percentage(60.0), Grade::D);
        assert_eq!(Grade::from_percentage(59.9), Grade::F);
        assert_eq!(Standing::from_percentage(80.0), Standing::Excellent);
        assert_eq!(Standing::from_percentage(49.0), Standing::Failed);
    }

    #[test]
    fn empty_assessment_scores_zero_percent() {
        assert_eq!(Outcome::default().percentage(), 0.0);
    }
}

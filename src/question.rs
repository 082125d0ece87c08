//! Questions
//!
//! The part of a question calibration and scoring need: its answer space and,
//! once known, its resolution.
use crate::errors::PrognosisError;
use crate::space::Space;
use crate::value::Value;
use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawQuestion {
    answer_space: Space,
    #[serde(default)]
    resolution: Option<Value>,
}

impl TryFrom<RawQuestion> for Question {
    type Error = PrognosisError;

    fn try_from(raw: RawQuestion) -> Result<Self, Self::Error> {
        Question::new(raw.answer_space, raw.resolution)
    }
}

/// A question with an answer space and an optional resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawQuestion", rename_all = "camelCase")]
pub struct Question {
    answer_space: Space,
    resolution: Option<Value>,
}

impl Question {
    /// Create a question. A resolution must inhabit the answer space.
    pub fn new(answer_space: Space, resolution: Option<Value>) -> Result<Self, PrognosisError> {
        if let Some(value) = &resolution {
            value.check(&answer_space)?;
        }
        Ok(Question {
            answer_space,
            resolution,
        })
    }

    pub fn unresolved(answer_space: Space) -> Self {
        Question {
            answer_space,
            resolution: None,
        }
    }

    pub fn answer_space(&self) -> &Space {
        &self.answer_space
    }

    pub fn resolution(&self) -> Option<&Value> {
        self.resolution.as_ref()
    }

    pub fn is_resolved(&self) -> bool {
        self.resolution.is_some()
    }

    /// Resolve the question, replacing any previous resolution.
    pub fn resolve(&mut self, value: Value) -> Result<(), PrognosisError> {
        value.check(&self.answer_space)?;
        self.resolution = Some(value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::space::NumericSpace;

    #[test]
    fn test_resolution_must_match_space() {
        let space = NumericSpace::new(0.0, 10.0, 10).unwrap();
        let q = Question::new(Space::Numeric(space.clone()), Some(Value::numeric(&space, 3.0).unwrap()));
        assert!(q.is_ok());
        let q = Question::new(Space::Numeric(space), Some(Value::binary(true)));
        assert!(q.is_err());

        let mut q = Question::unresolved(Space::Binary);
        assert!(!q.is_resolved());
        q.resolve(Value::binary(false)).unwrap();
        assert_eq!(q.resolution(), Some(&Value::binary(false)));
    }

    #[test]
    fn test_deserialize_checks_resolution() {
        let json = r#"{"answerSpace": {"type": "binary"}, "resolution": {"type": "binary", "value": true}}"#;
        let q: Question = serde_json::from_str(json).unwrap();
        assert!(q.is_resolved());
        let json = r#"{"answerSpace": {"type": "binary"}, "resolution": {"type": "numeric", "space": {"min": 0.0, "max": 1.0}, "value": 0.5}}"#;
        assert!(serde_json::from_str::<Question>(json).is_err());
        let json = r#"{"answerSpace": {"type": "binary"}}"#;
        assert!(!serde_json::from_str::<Question>(json).unwrap().is_resolved());
    }
}

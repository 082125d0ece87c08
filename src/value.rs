//! Answer values
//!
//! A concrete answer, always validated against its space when it is built or
//! deserialized.
use crate::errors::PrognosisError;
use crate::space::{format_binary, NumericSpace, Space};
use serde::{Deserialize, Serialize};

/// A yes/no answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BinaryValue {
    pub value: bool,
}

#[derive(Deserialize)]
struct RawNumericValue {
    space: NumericSpace,
    value: f64,
}

impl TryFrom<RawNumericValue> for NumericValue {
    type Error = PrognosisError;

    fn try_from(raw: RawNumericValue) -> Result<Self, Self::Error> {
        NumericValue::new(raw.space, raw.value)
    }
}

/// A numeric answer inside its space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawNumericValue")]
pub struct NumericValue {
    space: NumericSpace,
    value: f64,
}

impl NumericValue {
    pub fn new(space: NumericSpace, value: f64) -> Result<Self, PrognosisError> {
        if !space.check_value(value) {
            return Err(PrognosisError::ValueOutOfSpace(value, space.min(), space.max()));
        }
        Ok(NumericValue { space, value })
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn space(&self) -> &NumericSpace {
        &self.space
    }
}

/// Answer to a question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Value {
    Binary(BinaryValue),
    Numeric(NumericValue),
}

impl Value {
    pub fn binary(value: bool) -> Self {
        Value::Binary(BinaryValue { value })
    }

    pub fn numeric(space: &NumericSpace, value: f64) -> Result<Self, PrognosisError> {
        Ok(Value::Numeric(NumericValue::new(space.clone(), value)?))
    }

    /// Space this value lives in.
    pub fn space(&self) -> Space {
        match self {
            Value::Binary(_) => Space::Binary,
            Value::Numeric(v) => Space::Numeric(v.space.clone()),
        }
    }

    /// Validate the value against a space it is claimed to belong to.
    pub fn check(&self, space: &Space) -> Result<(), PrognosisError> {
        match (space, self) {
            (Space::Binary, Value::Binary(_)) => Ok(()),
            (Space::Numeric(s), Value::Numeric(v)) => {
                if s.check_value(v.value) {
                    Ok(())
                } else {
                    Err(PrognosisError::ValueOutOfSpace(v.value, s.min(), s.max()))
                }
            }
            (s, v) => Err(PrognosisError::TypeMismatch(
                v.kind().to_string(),
                s.kind().to_string(),
            )),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Value::Binary(_) => "binary",
            Value::Numeric(_) => "numeric",
        }
    }

    pub fn format(&self) -> String {
        match self {
            Value::Binary(b) => format_binary(b.value),
            Value::Numeric(v) => v.space.format_value(v.value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_value_out_of_space() {
        let space = NumericSpace::new(0.0, 10.0, 10).unwrap();
        assert!(Value::numeric(&space, 5.0).is_ok());
        assert!(matches!(
            Value::numeric(&space, 11.0),
            Err(PrognosisError::ValueOutOfSpace(_, _, _))
        ));
        assert!(Value::numeric(&space, f64::NAN).is_err());
    }

    #[test]
    fn test_check_against_space() {
        let space = NumericSpace::new(0.0, 10.0, 10).unwrap();
        let narrow = Space::Numeric(NumericSpace::new(0.0, 2.0, 10).unwrap());
        let v = Value::numeric(&space, 5.0).unwrap();
        assert!(v.check(&Space::Numeric(space)).is_ok());
        assert!(v.check(&narrow).is_err());
        assert!(matches!(
            v.check(&Space::Binary),
            Err(PrognosisError::TypeMismatch(_, _))
        ));
        assert!(Value::binary(true).check(&Space::Binary).is_ok());
    }

    #[test]
    fn test_deserialize_revalidates() {
        let ok = r#"{"type": "numeric", "space": {"min": 0.0, "max": 10.0, "bins": 10}, "value": 4.0}"#;
        let v: Value = serde_json::from_str(ok).unwrap();
        assert_eq!(v.format(), "4.0");
        let bad = r#"{"type": "numeric", "space": {"min": 0.0, "max": 10.0, "bins": 10}, "value": 40.0}"#;
        assert!(serde_json::from_str::<Value>(bad).is_err());
        let b: Value = serde_json::from_str(r#"{"type": "binary", "value": true}"#).unwrap();
        assert_eq!(b, Value::binary(true));
        assert_eq!(b.format(), "Yes");
    }
}

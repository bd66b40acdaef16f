use serde::{Deserialize, Serialize};

/// Numeric value as it arrives from a profile or catalog record.
///
/// Stores hand back decimals either as JSON numbers or as strings
/// (`"3.80"`), so scoring never trusts the wire type and goes through
/// [`parse_optional`] instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumericField {
    Number(f64),
    Text(String),
    /// Any other JSON shape (`true`, objects, arrays). Kept so one odd field
    /// does not reject the whole record; it never yields a value.
    Other(serde_json::Value),
}

impl NumericField {
    /// Parsed value, or `None` when the field does not hold a finite number.
    pub fn value(&self) -> Option<f64> {
        let parsed = match self {
            NumericField::Number(value) => Some(*value),
            NumericField::Text(raw) => raw.trim().parse::<f64>().ok(),
            NumericField::Other(_) => None,
        };
        parsed.filter(|value| value.is_finite())
    }
}

impl From<f64> for NumericField {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<u32> for NumericField {
    fn from(value: u32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<&str> for NumericField {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// Resolves an optional raw field to a finite number.
///
/// Absent, blank, unparsable, `NaN`, and infinite inputs all collapse to
/// `None`, which callers treat as "component inactive".
pub fn parse_optional(field: Option<&NumericField>) -> Option<f64> {
    field.and_then(NumericField::value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_and_numeric_strings_parse() {
        assert_eq!(parse_optional(Some(&NumericField::Number(3.5))), Some(3.5));
        assert_eq!(parse_optional(Some(&NumericField::from(" 7.5 "))), Some(7.5));
        assert_eq!(parse_optional(Some(&NumericField::from("0"))), Some(0.0));
    }

    #[test]
    fn garbage_collapses_to_absent() {
        assert_eq!(parse_optional(None), None);
        assert_eq!(parse_optional(Some(&NumericField::from(""))), None);
        assert_eq!(parse_optional(Some(&NumericField::from("n/a"))), None);
        assert_eq!(parse_optional(Some(&NumericField::from("NaN"))), None);
        assert_eq!(parse_optional(Some(&NumericField::from("inf"))), None);
        assert_eq!(parse_optional(Some(&NumericField::Number(f64::NAN))), None);
    }

    #[test]
    fn deserializes_from_number_or_string() {
        let number: NumericField = serde_json::from_str("325").expect("number");
        let text: NumericField = serde_json::from_str("\"3.80\"").expect("string");
        assert_eq!(number.value(), Some(325.0));
        assert_eq!(text.value(), Some(3.8));
    }

    #[test]
    fn non_numeric_json_shapes_are_absent() {
        for raw in ["true", "{\"score\": 7}", "[3.5]"] {
            let field: NumericField = serde_json::from_str(raw).expect("any json is accepted");
            assert!(matches!(field, NumericField::Other(_)), "{raw}");
            assert_eq!(field.value(), None);
        }
    }
}

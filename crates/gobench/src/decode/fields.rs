use std::collections::BTreeMap;

use serde_json::{Number, Value};

use super::{DecodeError, Decoded};

/// Members of one JSON object, consumed field by field while a record is
/// built from it. A `null` member counts as absent.
pub(super) struct Fields {
    record: &'static str,
    members: BTreeMap<String, Decoded>,
}

impl Fields {
    pub(super) fn new(record: &'static str, members: BTreeMap<String, Decoded>) -> Self {
        Self { record, members }
    }

    pub(super) fn take(&mut self, field: &'static str) -> Option<Decoded> {
        match self.members.remove(field) {
            Some(Decoded::Scalar(Value::Null)) | None => None,
            Some(value) => Some(value),
        }
    }

    /// Like [`Fields::take`], but hands back a `null` member as is.
    pub(super) fn take_raw(&mut self, field: &'static str) -> Option<Decoded> {
        self.members.remove(field)
    }

    pub(super) fn require(&mut self, field: &'static str) -> Result<Decoded, DecodeError> {
        self.take(field).ok_or(DecodeError::MissingField {
            record: self.record,
            field,
        })
    }

    pub(super) fn string(&mut self, field: &'static str) -> Result<String, DecodeError> {
        let value = self.require(field)?;
        self.expect_string(field, value)
    }

    pub(super) fn optional_string(
        &mut self,
        field: &'static str,
    ) -> Result<Option<String>, DecodeError> {
        self.take(field)
            .map(|value| self.expect_string(field, value))
            .transpose()
    }

    pub(super) fn integer(&mut self, field: &'static str) -> Result<i64, DecodeError> {
        match self.require(field)? {
            Decoded::Scalar(Value::Number(number)) => {
                integer_from_number(&number).ok_or_else(|| {
                    self.invalid(field, format!("{number} is out of range for an integer"))
                })
            }
            Decoded::Scalar(Value::String(text)) => text
                .trim()
                .parse::<i64>()
                .map_err(|error| self.invalid(field, format!("`{text}`: {error}"))),
            other => Err(self.invalid(
                field,
                format!("expected an integer, found {}", other.shape_name()),
            )),
        }
    }

    pub(super) fn float(&mut self, field: &'static str) -> Result<f64, DecodeError> {
        let value = match self.require(field)? {
            Decoded::Scalar(Value::Number(number)) => number
                .as_f64()
                .ok_or_else(|| self.invalid(field, format!("{number} is not representable")))?,
            Decoded::Scalar(Value::String(text)) => text
                .trim()
                .parse::<f64>()
                .map_err(|error| self.invalid(field, format!("`{text}`: {error}")))?,
            other => {
                return Err(self.invalid(
                    field,
                    format!("expected a number, found {}", other.shape_name()),
                ));
            }
        };
        if !value.is_finite() {
            return Err(self.invalid(field, format!("{value} is not a finite number")));
        }
        Ok(value)
    }

    /// Reads an optional array whose every element must have decoded to the
    /// record `pick` accepts. `expected` names that record in errors.
    pub(super) fn optional_list<T>(
        &mut self,
        field: &'static str,
        expected: &str,
        pick: impl Fn(Decoded) -> Result<T, Decoded>,
    ) -> Result<Option<Vec<T>>, DecodeError> {
        let Some(value) = self.take(field) else {
            return Ok(None);
        };
        let items = match value {
            Decoded::Array(items) => items,
            other => {
                return Err(self.invalid(
                    field,
                    format!("expected an array, found {}", other.shape_name()),
                ));
            }
        };

        let mut picked = Vec::with_capacity(items.len());
        for (index, item) in items.into_iter().enumerate() {
            match pick(item) {
                Ok(record) => picked.push(record),
                Err(Decoded::Root(_)) => {
                    return Err(DecodeError::Structural {
                        detail: format!(
                            "{}.{field}[{index}] is a root task; only the document top level may be labelled \".\"",
                            self.record
                        ),
                    });
                }
                Err(other) => {
                    return Err(self.invalid(
                        field,
                        format!(
                            "element {index}: expected {expected}, found {}",
                            other.shape_name()
                        ),
                    ));
                }
            }
        }
        Ok(Some(picked))
    }

    pub(super) fn invalid(&self, field: &'static str, detail: String) -> DecodeError {
        DecodeError::InvalidField {
            record: self.record,
            field,
            detail,
        }
    }

    fn expect_string(&self, field: &'static str, value: Decoded) -> Result<String, DecodeError> {
        match value {
            Decoded::Scalar(Value::String(text)) => Ok(text),
            other => Err(self.invalid(
                field,
                format!("expected a string, found {}", other.shape_name()),
            )),
        }
    }
}

/// Integral JSON numbers pass through; other finite numbers are truncated
/// toward zero. Anything outside `i64` is rejected.
fn integer_from_number(number: &Number) -> Option<i64> {
    if let Some(value) = number.as_i64() {
        return Some(value);
    }
    if number.is_u64() {
        return None;
    }
    let value = number.as_f64()?.trunc();
    if value.is_finite() && value >= i64::MIN as f64 && value < i64::MAX as f64 {
        Some(value as i64)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use serde_json::Number;

    use super::integer_from_number;

    #[test]
    fn floats_truncate_toward_zero() {
        let whole = Number::from_f64(3.0).expect("finite float");
        let fractional = Number::from_f64(3.5).expect("finite float");
        let negative = Number::from_f64(-2.7).expect("finite float");
        let huge = Number::from_f64(1e300).expect("finite float");
        assert_eq!(integer_from_number(&whole), Some(3));
        assert_eq!(integer_from_number(&fractional), Some(3));
        assert_eq!(integer_from_number(&negative), Some(-2));
        assert_eq!(integer_from_number(&huge), None);
        assert_eq!(integer_from_number(&Number::from(-7i64)), Some(-7));
        assert_eq!(integer_from_number(&Number::from(u64::MAX)), None);
    }
}

use serde::{Deserialize, Serialize};

use crate::core::record::Record;

/// The fixed set of fields compared between an IT row and its master row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComparisonField {
    #[serde(rename = "Service")]
    Service,
    #[serde(rename = "Tarif")]
    Tarif,
    #[serde(rename = "SLA_FORM")]
    SlaForm,
    #[serde(rename = "SLA_THRU")]
    SlaThru,
}

/// How the two sides of a field are compared
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    /// Trimmed string equality
    Text,
    /// Equality of the integers left after stripping non-digits
    Numeric,
}

impl ComparisonField {
    /// Comparison order; also the order failing fields are reported in
    pub const ALL: [Self; 4] = [Self::Service, Self::Tarif, Self::SlaForm, Self::SlaThru];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Service => "Service",
            Self::Tarif => "Tarif",
            Self::SlaForm => "SLA_FORM",
            Self::SlaThru => "SLA_THRU",
        }
    }

    #[must_use]
    pub fn it_column(self) -> &'static str {
        match self {
            Self::Service => "SERVICE",
            Self::Tarif => "TARIF",
            Self::SlaForm => "SLA_FORM",
            Self::SlaThru => "SLA_THRU",
        }
    }

    #[must_use]
    pub fn master_column(self) -> &'static str {
        match self {
            Self::Service => "Service REG",
            Self::Tarif => "Tarif REG",
            Self::SlaForm => "sla form REG",
            Self::SlaThru => "sla thru REG",
        }
    }

    #[must_use]
    pub fn comparison(self) -> Comparison {
        match self {
            Self::Service => Comparison::Text,
            Self::Tarif | Self::SlaForm | Self::SlaThru => Comparison::Numeric,
        }
    }

    /// Typed value of this field on the IT side
    #[must_use]
    pub fn it_value(self, record: &Record) -> FieldValue {
        FieldValue::extract(record.get(self.it_column()), self.comparison())
    }

    /// Typed value of this field on the master side
    #[must_use]
    pub fn master_value(self, record: &Record) -> FieldValue {
        FieldValue::extract(record.get(self.master_column()), self.comparison())
    }
}

impl std::fmt::Display for ComparisonField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One side of a field comparison, after extraction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(u64),
    /// Trimmed text, or the significant digits of a number too large for `u64`
    Text(String),
}

impl FieldValue {
    #[must_use]
    pub fn extract(raw: &str, comparison: Comparison) -> Self {
        match comparison {
            Comparison::Text => Self::Text(raw.trim().to_string()),
            Comparison::Numeric => extract_number(raw),
        }
    }
}

impl Default for FieldValue {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl std::fmt::Display for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// Extract an integer from a loosely formatted numeric cell.
///
/// Every character that is not an ASCII digit is removed. Input without digits
/// yields 0. A digit run beyond `u64` keeps its significant digits as text, so
/// two different oversized values never compare equal.
///
/// # Examples
///
/// ```
/// use recon_desk::core::field::{extract_number, FieldValue};
///
/// assert_eq!(extract_number("59,000"), FieldValue::Number(59_000));
/// assert_eq!(extract_number("Rp 59.000"), FieldValue::Number(59_000));
/// assert_eq!(extract_number("n/a"), FieldValue::Number(0));
/// ```
#[must_use]
pub fn extract_number(raw: &str) -> FieldValue {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    let significant = digits.trim_start_matches('0');
    if significant.is_empty() {
        return FieldValue::Number(0);
    }
    match significant.parse() {
        Ok(n) => FieldValue::Number(n),
        Err(_) => {
            tracing::debug!("numeric value '{}' exceeds u64, comparing digits", raw);
            FieldValue::Text(significant.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_number_strips_separators() {
        assert_eq!(extract_number("59000"), FieldValue::Number(59_000));
        assert_eq!(extract_number("59,000"), extract_number("59000"));
        assert_eq!(extract_number(" 3 hari"), FieldValue::Number(3));
        assert_eq!(extract_number("-5"), FieldValue::Number(5));
        assert_eq!(extract_number("007"), FieldValue::Number(7));
    }

    #[test]
    fn test_extract_number_degrades_to_zero() {
        assert_eq!(extract_number(""), FieldValue::Number(0));
        assert_eq!(extract_number("abc"), FieldValue::Number(0));
        assert_eq!(extract_number("000"), FieldValue::Number(0));
    }

    #[test]
    fn test_oversized_numbers_keep_their_digits() {
        let max = extract_number("18446744073709551615");
        assert_eq!(max, FieldValue::Number(u64::MAX));

        let over = extract_number("18446744073709551616");
        assert_eq!(over, FieldValue::Text("18446744073709551616".to_string()));
        assert_ne!(over, extract_number("99999999999999999999999"));
        assert_eq!(
            extract_number("0099.999.999.999.999.999.999.999"),
            extract_number("99999999999999999999999")
        );
        assert_ne!(over, FieldValue::Number(0));
    }

    #[test]
    fn test_extract_number_is_idempotent() {
        let once = extract_number("1.250.000");
        assert_eq!(extract_number(&once.to_string()), once);

        let big = extract_number("1.000.000.000.000.000.000.000");
        assert_eq!(extract_number(&big.to_string()), big);
    }

    #[test]
    fn test_field_columns() {
        assert_eq!(ComparisonField::SlaThru.it_column(), "SLA_THRU");
        assert_eq!(ComparisonField::SlaThru.master_column(), "sla thru REG");
        assert_eq!(ComparisonField::Service.comparison(), Comparison::Text);
        assert_eq!(ComparisonField::Tarif.comparison(), Comparison::Numeric);
    }

    #[test]
    fn test_field_value_extraction() {
        let record: Record = [("SERVICE", " REG23 "), ("TARIF", "62.000")]
            .into_iter()
            .collect();
        assert_eq!(
            ComparisonField::Service.it_value(&record),
            FieldValue::Text("REG23".to_string())
        );
        assert_eq!(ComparisonField::Tarif.it_value(&record), FieldValue::Number(62_000));
        assert_eq!(ComparisonField::SlaForm.it_value(&record), FieldValue::Number(0));
    }
}

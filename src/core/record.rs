use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Column holding the business key that joins IT rows to master rows
pub const KEY_COLUMN: &str = "SYS_CODE";
pub const ORIGIN_COLUMN: &str = "ORIGIN";
pub const DEST_COLUMN: &str = "DEST";

/// One data line of a parsed table, keyed by header name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: BTreeMap<String, String>,
}

impl Record {
    /// Build a record by pairing headers with values.
    ///
    /// Missing trailing values become empty strings and surplus values are dropped.
    /// A repeated header keeps the right-most value.
    #[must_use]
    pub fn from_row(headers: &[String], values: &[String]) -> Self {
        let fields = headers
            .iter()
            .enumerate()
            .map(|(i, h)| (h.clone(), values.get(i).cloned().unwrap_or_default()))
            .collect();
        Self { fields }
    }

    /// Value of `column`, or the empty string when absent
    #[must_use]
    pub fn get(&self, column: &str) -> &str {
        self.fields.get(column).map_or("", String::as_str)
    }

    #[must_use]
    pub fn key(&self) -> &str {
        self.get(KEY_COLUMN)
    }

    #[must_use]
    pub fn origin(&self) -> &str {
        self.get(ORIGIN_COLUMN)
    }

    #[must_use]
    pub fn dest(&self) -> &str {
        self.get(DEST_COLUMN)
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_from_row_pads_missing_values() {
        let headers = strings(&["ORIGIN", "DEST", "SYS_CODE"]);
        let record = Record::from_row(&headers, &strings(&["MES10612"]));
        assert_eq!(record.origin(), "MES10612");
        assert_eq!(record.dest(), "");
        assert_eq!(record.key(), "");
        assert_eq!(record.len(), 3);
    }

    #[test]
    fn test_from_row_drops_extra_values() {
        let headers = strings(&["A"]);
        let record = Record::from_row(&headers, &strings(&["1", "2"]));
        assert_eq!(record.len(), 1);
        assert_eq!(record.get("A"), "1");
    }

    #[test]
    fn test_absent_column_is_empty() {
        let record: Record = [("SERVICE", "REG23")].into_iter().collect();
        assert_eq!(record.get("TARIF"), "");
    }
}

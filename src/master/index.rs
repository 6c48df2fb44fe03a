use std::collections::HashMap;

use crate::core::record::Record;

/// Master records indexed by business key
#[derive(Debug, Default)]
pub struct MasterIndex<'a> {
    by_key: HashMap<&'a str, &'a Record>,
    /// Records that replaced an earlier record with the same key
    duplicates: usize,
    /// Records skipped because their key was empty
    skipped: usize,
}

impl<'a> MasterIndex<'a> {
    /// Index `records` by their `SYS_CODE` value.
    ///
    /// Empty keys are not indexed. When two records share a key the later one wins.
    #[must_use]
    pub fn build(records: &'a [Record]) -> Self {
        let mut index = Self::default();

        for record in records {
            let key = record.key();
            if key.is_empty() {
                index.skipped += 1;
                continue;
            }
            if index.by_key.insert(key, record).is_some() {
                index.duplicates += 1;
            }
        }

        if index.duplicates > 0 {
            tracing::debug!(
                "master data has {} duplicate keys, later rows kept",
                index.duplicates
            );
        }

        index
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&'a Record> {
        if key.is_empty() {
            return None;
        }
        self.by_key.get(key).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }

    #[must_use]
    pub fn duplicate_count(&self) -> usize {
        self.duplicates
    }

    #[must_use]
    pub fn skipped_count(&self) -> usize {
        self.skipped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::table::parse_table_text;

    #[test]
    fn test_last_duplicate_wins() {
        let master = parse_table_text(
            "SYS_CODE,Tarif REG\nK1,100\nK2,200\nK1,300\n",
            ',',
        );
        let index = MasterIndex::build(&master);
        assert_eq!(index.len(), 2);
        assert_eq!(index.duplicate_count(), 1);
        assert_eq!(index.get("K1").unwrap().get("Tarif REG"), "300");
        assert_eq!(index.get("K2").unwrap().get("Tarif REG"), "200");
    }

    #[test]
    fn test_empty_keys_are_skipped() {
        let master = parse_table_text("ORIGIN,SYS_CODE\nA,\nB,K\n", ',');
        let index = MasterIndex::build(&master);
        assert_eq!(index.len(), 1);
        assert_eq!(index.skipped_count(), 1);
        assert!(index.get("").is_none());
    }

    #[test]
    fn test_missing_key_column() {
        let master = parse_table_text("ORIGIN,DEST\nA,B\n", ',');
        let index = MasterIndex::build(&master);
        assert!(index.is_empty());
    }
}

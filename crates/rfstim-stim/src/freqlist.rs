//! Named frequency lists and their index selections.

use rfstim_config::{split_fields, ConfigCategory, ConfigManager};
use tracing::debug;

use crate::error::{Result, StimError};

/// Parse a `|`-separated list of frequency-list indexes, e.g. `"0|1"`.
pub fn parse_index_list(spec: &str) -> Result<Vec<usize>> {
    split_fields(spec, '|')
        .iter()
        .map(|token| {
            token.parse::<usize>().map_err(|_| StimError::InvalidNumber {
                value: token.clone(),
            })
        })
        .collect()
}

/// Parse a `|`-separated list of floating-point values, e.g. `"-10.0|-3.5"`.
pub fn parse_value_list(spec: &str) -> Result<Vec<f64>> {
    split_fields(spec, '|')
        .iter()
        .map(|token| {
            token.parse::<f64>().map_err(|_| StimError::InvalidNumber {
                value: token.clone(),
            })
        })
        .collect()
}

/// A named frequency list plus the index selection a stim uses into it.
///
/// The values are refreshed from the flist configuration table; until the
/// first refresh the list is empty and index lookups fail.
#[derive(Debug, Clone)]
pub struct FreqList {
    name: String,
    indexes: Vec<usize>,
    values: Vec<f64>,
}

impl FreqList {
    /// Create a list from its configured name and index spec (`"0"`,
    /// `"0|1"`, ...). Values stay empty until [`FreqList::refresh`].
    pub fn new(name: impl Into<String>, index_spec: &str) -> Result<Self> {
        Ok(Self {
            name: name.into(),
            indexes: parse_index_list(index_spec)?,
            values: Vec::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Point this selection at a different named list. The stale values
    /// are dropped; call [`FreqList::refresh`] before the next lookup.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.values.clear();
    }

    pub fn indexes(&self) -> &[usize] {
        &self.indexes
    }

    pub fn set_indexes(&mut self, indexes: &[usize]) {
        self.indexes = indexes.to_vec();
    }

    /// Re-query the flist table for this list's values.
    pub fn refresh(&mut self, config: &ConfigManager) -> Result<()> {
        let row = config.query(ConfigCategory::FreqList, &self.name)?;
        let values = row.get(1).ok_or(StimError::MissingField {
            field: "FreqListValue",
        })?;
        self.values = parse_value_list(values)?;
        debug!(
            list = %self.name,
            values = self.values.len(),
            "frequency list refreshed"
        );
        Ok(())
    }

    /// The frequency at one list index.
    pub fn frequency_at(&self, index: usize) -> Result<f64> {
        self.values
            .get(index)
            .copied()
            .ok_or(StimError::IndexOutOfRange {
                index,
                len: self.values.len(),
            })
    }

    /// The frequencies at each of the given indexes, in order.
    pub fn frequencies_at(&self, indexes: &[usize]) -> Result<Vec<f64>> {
        indexes.iter().map(|&i| self.frequency_at(i)).collect()
    }

    /// The frequencies selected by this list's own index set.
    pub fn selected(&self) -> Result<Vec<f64>> {
        self.frequencies_at(&self.indexes)
    }

    /// The first selected frequency.
    pub fn first_selected(&self) -> Result<f64> {
        let index = *self.indexes.first().ok_or(StimError::MissingField {
            field: "FreqListIndex",
        })?;
        self.frequency_at(index)
    }

    /// All values materialized by the last refresh.
    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn flist_config(tag: &str, contents: &str) -> (ConfigManager, PathBuf) {
        let dir = std::env::temp_dir().join(format!(
            "rfstim-flist-{tag}-{}-{}",
            std::process::id(),
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap()
                .as_nanos()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("site.flist");
        std::fs::write(&path, contents).unwrap();

        let mut manager = ConfigManager::new();
        manager.add_file(&path).unwrap();
        manager.load(ConfigCategory::FreqList).unwrap();
        (manager, dir)
    }

    const FLIST: &str = "\
FreqListName,FreqListValue
flist-a,1.8e9|2.4e9|3.7e9
flist-b,900e6
";

    #[test]
    fn index_and_value_list_parsing() {
        assert_eq!(parse_index_list("0").unwrap(), vec![0]);
        assert_eq!(parse_index_list("0|1|5").unwrap(), vec![0, 1, 5]);
        assert_eq!(
            parse_value_list("-10.0|3.5").unwrap(),
            vec![-10.0, 3.5]
        );
        assert!(matches!(
            parse_index_list("0|x"),
            Err(StimError::InvalidNumber { value }) if value == "x"
        ));
    }

    #[test]
    fn refresh_materializes_values() {
        let (config, dir) = flist_config("refresh", FLIST);
        let mut list = FreqList::new("flist-a", "0|2").unwrap();
        list.refresh(&config).unwrap();

        assert_eq!(list.values(), &[1.8e9, 2.4e9, 3.7e9]);
        assert_eq!(list.selected().unwrap(), vec![1.8e9, 3.7e9]);
        assert_eq!(list.first_selected().unwrap(), 1.8e9);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn lookup_before_refresh_fails() {
        let list = FreqList::new("flist-a", "0").unwrap();
        assert!(matches!(
            list.frequency_at(0),
            Err(StimError::IndexOutOfRange { index: 0, len: 0 })
        ));
    }

    #[test]
    fn out_of_range_index_is_reported() {
        let (config, dir) = flist_config("range", FLIST);
        let mut list = FreqList::new("flist-b", "0").unwrap();
        list.refresh(&config).unwrap();

        assert!(matches!(
            list.frequency_at(3),
            Err(StimError::IndexOutOfRange { index: 3, len: 1 })
        ));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn rename_drops_stale_values() {
        let (config, dir) = flist_config("rename", FLIST);
        let mut list = FreqList::new("flist-a", "0").unwrap();
        list.refresh(&config).unwrap();

        list.set_name("flist-b");
        assert!(list.values().is_empty());

        list.refresh(&config).unwrap();
        assert_eq!(list.first_selected().unwrap(), 900e6);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn unknown_list_name_propagates_config_error() {
        let (config, dir) = flist_config("unknown", FLIST);
        let mut list = FreqList::new("flist-zzz", "0").unwrap();
        assert!(matches!(
            list.refresh(&config),
            Err(StimError::Config(_))
        ));

        let _ = std::fs::remove_dir_all(&dir);
    }
}

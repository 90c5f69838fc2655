//! Typed stimulus definitions built from configuration rows.

use rfstim_config::ConfigManager;

use crate::error::{Result, StimError};
use crate::freqlist::{parse_index_list, parse_value_list, FreqList};
use crate::module::ChannelType;

/// Everything a stim row configures, parsed into its domain types.
#[derive(Debug, Clone)]
pub struct StimConfig {
    pub name: String,
    pub channel_type: ChannelType,
    pub trigger_type: String,
    pub pin: String,
    pub freq_list_name: String,
    pub freq_list_indexes: Vec<usize>,
    pub powers: Vec<f64>,
    pub wave_file: String,
    pub repeat_count: usize,
}

// Field positions within a stim config row, in column order.
const FIELD_NAME: usize = 0;
const FIELD_TYPE: usize = 1;
const FIELD_TRIGGER: usize = 2;
const FIELD_PIN: usize = 3;
const FIELD_FLIST_NAME: usize = 4;
const FIELD_FLIST_INDEX: usize = 5;
const FIELD_POWER: usize = 6;
const FIELD_WAVE_FILE: usize = 7;
const FIELD_REPEAT: usize = 8;

fn field<'a>(fields: &'a [String], index: usize, name: &'static str) -> Result<&'a str> {
    fields
        .get(index)
        .map(|s| s.as_str())
        .ok_or(StimError::MissingField { field: name })
}

/// A stim definition: the parsed configuration plus its frequency-list
/// selection.
#[derive(Debug, Clone)]
pub struct StimDef {
    config: StimConfig,
    freq_list: FreqList,
}

impl StimDef {
    /// Build a definition from an ordered stim config row.
    pub fn from_fields(fields: &[String]) -> Result<Self> {
        let freq_list_name = field(fields, FIELD_FLIST_NAME, "FreqListName")?.to_string();
        let index_spec = field(fields, FIELD_FLIST_INDEX, "FreqListIndex")?;
        let freq_list = FreqList::new(freq_list_name.clone(), index_spec)?;

        let repeat_field = field(fields, FIELD_REPEAT, "RepeatCount")?;
        let repeat_count = repeat_field
            .parse::<usize>()
            .map_err(|_| StimError::InvalidNumber {
                value: repeat_field.to_string(),
            })?;

        let config = StimConfig {
            name: field(fields, FIELD_NAME, "StimName")?.to_string(),
            channel_type: field(fields, FIELD_TYPE, "StimType")?.parse()?,
            trigger_type: field(fields, FIELD_TRIGGER, "TriggerType")?.to_string(),
            pin: field(fields, FIELD_PIN, "PinName")?.to_string(),
            freq_list_name,
            freq_list_indexes: parse_index_list(index_spec)?,
            powers: parse_value_list(field(fields, FIELD_POWER, "Power")?)?,
            wave_file: field(fields, FIELD_WAVE_FILE, "WaveFile")?.to_string(),
            repeat_count,
        };

        Ok(Self { config, freq_list })
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn channel_type(&self) -> ChannelType {
        self.config.channel_type
    }

    pub fn trigger_type(&self) -> &str {
        &self.config.trigger_type
    }

    pub fn pin(&self) -> &str {
        &self.config.pin
    }

    pub fn wave_file(&self) -> &str {
        &self.config.wave_file
    }

    pub fn powers(&self) -> &[f64] {
        &self.config.powers
    }

    pub fn set_powers(&mut self, powers: &[f64]) {
        self.config.powers = powers.to_vec();
    }

    pub fn repeat_count(&self) -> usize {
        self.config.repeat_count
    }

    pub fn set_repeat_count(&mut self, repeat: usize) {
        self.config.repeat_count = repeat;
    }

    pub fn freq_list(&self) -> &FreqList {
        &self.freq_list
    }

    pub fn freq_list_mut(&mut self) -> &mut FreqList {
        &mut self.freq_list
    }

    /// Re-query the frequency-list values for the current list name.
    pub fn refresh_freq_list(&mut self, config: &ConfigManager) -> Result<()> {
        self.freq_list.refresh(config)
    }

    /// Switch to a different named frequency list and refresh its values.
    pub fn rename_freq_list(&mut self, name: &str, config: &ConfigManager) -> Result<()> {
        self.freq_list.set_name(name);
        self.config.freq_list_name = name.to_string();
        self.freq_list.refresh(config)
    }

    /// The first selected frequency.
    pub fn frequency(&self) -> Result<f64> {
        self.freq_list.first_selected()
    }

    /// All selected frequencies.
    pub fn frequencies(&self) -> Result<Vec<f64>> {
        self.freq_list.selected()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(row: &[&str]) -> Vec<String> {
        row.iter().map(|s| s.to_string()).collect()
    }

    const CW_ROW: [&str; 9] = [
        "stim-cw", "CW", "SW", "RF1", "flist-a", "0", "-10.0|-3.5", "none", "2",
    ];

    #[test]
    fn parses_full_row() {
        let def = StimDef::from_fields(&fields(&CW_ROW)).unwrap();
        assert_eq!(def.name(), "stim-cw");
        assert_eq!(def.channel_type(), ChannelType::Cw);
        assert_eq!(def.trigger_type(), "SW");
        assert_eq!(def.pin(), "RF1");
        assert_eq!(def.freq_list().name(), "flist-a");
        assert_eq!(def.freq_list().indexes(), &[0]);
        assert_eq!(def.powers(), &[-10.0, -3.5]);
        assert_eq!(def.wave_file(), "none");
        assert_eq!(def.repeat_count(), 2);
    }

    #[test]
    fn multi_index_spec() {
        let mut row = CW_ROW;
        row[1] = "DT";
        row[5] = "0|1";
        let def = StimDef::from_fields(&fields(&row)).unwrap();
        assert_eq!(def.channel_type(), ChannelType::Dt);
        assert_eq!(def.freq_list().indexes(), &[0, 1]);
    }

    #[test]
    fn short_row_reports_missing_field() {
        let err = StimDef::from_fields(&fields(&CW_ROW[..5])).unwrap_err();
        assert!(matches!(err, StimError::MissingField { .. }));
    }

    #[test]
    fn bad_channel_type_is_rejected() {
        let mut row = CW_ROW;
        row[1] = "FM";
        assert!(matches!(
            StimDef::from_fields(&fields(&row)),
            Err(StimError::UnknownChannelType(t)) if t == "FM"
        ));
    }

    #[test]
    fn bad_repeat_count_is_rejected() {
        let mut row = CW_ROW;
        row[8] = "twice";
        assert!(matches!(
            StimDef::from_fields(&fields(&row)),
            Err(StimError::InvalidNumber { value }) if value == "twice"
        ));
    }

    #[test]
    fn setters_update_config() {
        let mut def = StimDef::from_fields(&fields(&CW_ROW)).unwrap();
        def.set_powers(&[-5.0]);
        def.set_repeat_count(10);
        assert_eq!(def.powers(), &[-5.0]);
        assert_eq!(def.repeat_count(), 10);
    }
}

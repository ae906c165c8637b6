// Settings module
// Display preferences for the publish-date control, read from TOML

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TimeFormat {
    #[default]
    #[serde(rename = "12h")]
    TwelveHour,
    #[serde(rename = "24h")]
    TwentyFourHour,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DateFormat {
    #[default]
    #[serde(rename = "MM/DD/YYYY")]
    MonthDayYear,
    #[serde(rename = "DD/MM/YYYY")]
    DayMonthYear,
    #[serde(rename = "YYYY/MM/DD")]
    YearMonthDay,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    pub time_format: TimeFormat,
    pub date_format: DateFormat,
    /// Source label -> translated label
    pub translations: HashMap<String, String>,
}

impl DisplaySettings {
    /// Reject translation entries that would blank out a label
    pub fn validate(&self) -> Result<(), String> {
        if let Some((source, _)) = self
            .translations
            .iter()
            .find(|(source, target)| source.trim().is_empty() || target.trim().is_empty())
        {
            return Err(format!("Empty translation entry for {:?}", source));
        }

        Ok(())
    }
}

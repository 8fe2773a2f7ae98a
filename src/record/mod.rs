//! Vital-sign record model
//!
//! A [`Record`] holds four pre-formatted strings. The serialized key names are
//! the short field codes used by every output format and by the document
//! store: `id`, `fr` (age group), `fc` (heart rate) and `spo2` (oxygen
//! saturation), always in that order.

use std::fmt;

use serde::{Deserialize, Serialize};

pub mod generator;

pub use generator::{RecordGenerator, generate_record, generate_records};

/// Column order shared by CSV headers, JSON objects and store documents
pub const FIELD_NAMES: [&str; 4] = ["id", "fr", "fc", "spo2"];

/// One synthetic vital-sign observation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Sequence identifier, `ID-007`
    pub id: String,

    /// Age group, `42 Anos`
    #[serde(rename = "fr")]
    pub age_group: String,

    /// Heart rate, `090ppm`
    #[serde(rename = "fc")]
    pub heart_rate: String,

    /// Oxygen saturation, `95%`
    #[serde(rename = "spo2")]
    pub oxygen_saturation: String,
}

impl Record {
    /// Field values in [`FIELD_NAMES`] order
    pub fn values(&self) -> [&str; 4] {
        [
            &self.id,
            &self.age_group,
            &self.heart_rate,
            &self.oxygen_saturation,
        ]
    }

    /// Render the record as a Python-style mapping literal
    ///
    /// `{'id': 'ID-001', 'fr': '42 Anos', 'fc': '090ppm', 'spo2': '95%'}`
    ///
    /// This is the line format of the TXT export and stays byte-compatible
    /// with files produced by earlier versions of the tool.
    pub fn to_mapping_literal(&self) -> String {
        let entries: Vec<String> = FIELD_NAMES
            .iter()
            .zip(self.values())
            .map(|(key, value)| format!("{}: {}", quote_literal(key), quote_literal(value)))
            .collect();
        format!("{{{}}}", entries.join(", "))
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_mapping_literal())
    }
}

/// Quote a string the way a Python `repr()` does
///
/// Single quotes are preferred; double quotes are used only when the value
/// contains a single quote and no double quote.
fn quote_literal(value: &str) -> String {
    let quote = if value.contains('\'') && !value.contains('"') {
        '"'
    } else {
        '\''
    };

    let mut out = String::with_capacity(value.len() + 2);
    out.push(quote);
    for ch in value.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c if (c as u32) < 0x20 || c as u32 == 0x7f => {
                out.push_str(&format!("\\x{:02x}", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}

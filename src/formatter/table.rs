//! Table formatting for generated records using tabled

use tabled::{
    Table,
    builder::Builder,
    settings::{Alignment, Color, Modify, Style, object::Rows},
};

use crate::pipeline::CheckedRecord;
use crate::record::FIELD_NAMES;

/// Table formatter for a run's records
pub struct RecordTable {
    /// Table style
    style: TableStyle,

    /// Enable colored output
    use_colors: bool,
}

/// Available table styles
#[derive(Debug, Clone, Copy)]
pub enum TableStyle {
    /// Modern style with box-drawing characters
    Modern,
    /// ASCII style with basic characters
    Ascii,
    /// Markdown style
    Markdown,
}

impl RecordTable {
    pub fn new() -> Self {
        Self {
            style: TableStyle::Modern,
            use_colors: false,
        }
    }

    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    pub fn with_style(mut self, style: TableStyle) -> Self {
        self.style = style;
        self
    }

    /// Render one row per record plus a validity column
    pub fn format(&self, records: &[CheckedRecord]) -> String {
        if records.is_empty() {
            return String::from("(no records)");
        }

        let mut builder = Builder::default();

        let mut header: Vec<String> = FIELD_NAMES.iter().map(|f| f.to_string()).collect();
        header.push("valid".to_string());
        builder.push_record(header);

        for checked in records {
            let mut row: Vec<String> = checked
                .record
                .values()
                .iter()
                .map(|v| v.to_string())
                .collect();
            row.push(if checked.valid { "yes" } else { "no" }.to_string());
            builder.push_record(row);
        }

        let mut table = builder.build();
        self.apply_style(&mut table);
        table.with(Modify::new(Rows::first()).with(Alignment::center()));

        if self.use_colors {
            table.modify(Rows::first(), Color::FG_CYAN | Color::BOLD);
        }

        table.to_string()
    }

    fn apply_style(&self, table: &mut Table) {
        match self.style {
            TableStyle::Modern => table.with(Style::modern()),
            TableStyle::Ascii => table.with(Style::ascii()),
            TableStyle::Markdown => table.with(Style::markdown()),
        };
    }
}

impl Default for RecordTable {
    fn default() -> Self {
        Self::new()
    }
}

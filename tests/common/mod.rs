//! Shared helpers for integration tests.

#![allow(dead_code)]

use xlplay::types::{CellStyle, Dataset, PlaybackSettings};

/// Dataset with `rows` numbered body rows and two columns, no styles.
pub fn make_dataset(rows: usize) -> Dataset {
    Dataset {
        headers: vec!["Name".to_string(), "Value".to_string()],
        rows: (0..rows)
            .map(|i| vec![format!("row{i}"), i.to_string()])
            .collect(),
        source_id: "test.xlsx".to_string(),
        styles: None,
    }
}

/// Dataset carrying a style table (header bold, one filled body cell).
pub fn make_styled_dataset() -> Dataset {
    let mut dataset = make_dataset(2);
    let bold = CellStyle {
        bold: true,
        ..CellStyle::default()
    };
    let filled = CellStyle {
        fill_color: Some("#ffff00".to_string()),
        ..CellStyle::default()
    };
    dataset.styles = Some(vec![
        vec![Some(bold), None],
        vec![None, Some(filled)],
        vec![None, None],
    ]);
    dataset
}

/// Settings with a given row height, otherwise defaults.
pub fn settings_with_row_height(row_height: u32) -> PlaybackSettings {
    PlaybackSettings {
        row_height,
        ..PlaybackSettings::default()
    }
}

//! Rendering command results as tables or JSON

use crate::cli::OutputFormat;
use crate::error::Result;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::Serialize;
use tresso_kanban::{Board, BoardSnapshot, Card, LogEntry};

/// A table with the house style
pub fn new_table() -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Truncate to `max` characters, appending "..." when cut
pub fn truncate_str(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{truncated}...")
    }
}

fn json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// A single record: a summary line for tables, the record itself for JSON
pub fn record<T: Serialize>(format: OutputFormat, summary: String, value: &T) -> Result<String> {
    match format {
        OutputFormat::Table => Ok(summary),
        OutputFormat::Json => json(value),
    }
}

/// Outcome of a command with nothing to return
pub fn done(format: OutputFormat, message: String) -> Result<String> {
    match format {
        OutputFormat::Table => Ok(message),
        OutputFormat::Json => json(&serde_json::json!({ "status": "ok", "message": message })),
    }
}

pub fn boards(format: OutputFormat, boards: &[Board]) -> Result<String> {
    if format == OutputFormat::Json {
        return json(boards);
    }
    if boards.is_empty() {
        return Ok("No boards yet. Create one with `tresso board create <name>`.".to_string());
    }

    let mut table = new_table();
    table.set_header(vec!["ID", "Name", "Color", "Created"]);
    for board in boards {
        table.add_row(vec![
            board.id.to_string(),
            board.name.clone(),
            format!("#{}", board.color),
            board.created_at.format("%Y-%m-%d %H:%M").to_string(),
        ]);
    }
    Ok(table.to_string())
}

fn card_cell(card: &Card) -> String {
    let mut cell = format!("#{} {}", card.id, truncate_str(&card.title, 40));
    if !card.labels.is_empty() {
        let names: Vec<&str> = card.labels.iter().map(|l| l.name.as_str()).collect();
        cell.push_str(&format!("\n[{}]", names.join(", ")));
    }
    cell
}

/// Columns side by side, cards top to bottom, then the label list
pub fn snapshot(format: OutputFormat, snapshot: &BoardSnapshot) -> Result<String> {
    if format == OutputFormat::Json {
        return json(snapshot);
    }

    let mut out = format!("Board {}: {} (#{})\n", snapshot.id, snapshot.name, snapshot.color);
    if snapshot.columns.is_empty() {
        out.push_str("No columns yet.");
        return Ok(out);
    }

    let columns: Vec<Vec<&Card>> = snapshot
        .columns
        .iter()
        .map(|column| snapshot.cards_in(column.id).collect())
        .collect();

    let mut table = new_table();
    table.set_header(
        snapshot
            .columns
            .iter()
            .map(|c| {
                let mut header = format!("{} ({})", c.name, c.id);
                if c.archived {
                    header.push_str(" archived");
                }
                header
            })
            .collect::<Vec<_>>(),
    );
    let depth = columns.iter().map(Vec::len).max().unwrap_or(0);
    for row in 0..depth {
        table.add_row(
            columns
                .iter()
                .map(|cards| cards.get(row).map(|c| card_cell(c)).unwrap_or_default())
                .collect::<Vec<_>>(),
        );
    }
    out.push_str(&table.to_string());

    if !snapshot.labels.is_empty() {
        let mut labels = new_table();
        labels.set_header(vec!["Label", "Name", "Color"]);
        for label in &snapshot.labels {
            labels.add_row(vec![
                label.id.to_string(),
                label.name.clone(),
                format!("#{}", label.color),
            ]);
        }
        out.push('\n');
        out.push_str(&labels.to_string());
    }
    Ok(out)
}

pub fn activity(format: OutputFormat, entries: &[LogEntry]) -> Result<String> {
    if format == OutputFormat::Json {
        return json(entries);
    }
    if entries.is_empty() {
        return Ok("No activity recorded.".to_string());
    }

    let mut table = new_table();
    table.set_header(vec!["Time", "Operation", "Actor", "ms", "Result"]);
    for entry in entries {
        table.add_row(vec![
            entry.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
            entry.op.clone(),
            entry.actor.clone().unwrap_or_default(),
            entry.duration_ms.to_string(),
            if entry.is_failure() { "failed" } else { "ok" }.to_string(),
        ]);
    }
    Ok(table.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tresso_kanban::{BoardId, CardId, Column, ColumnId, Label, LabelId, UserId};

    fn sample() -> BoardSnapshot {
        let board = Board {
            id: BoardId::new(1),
            name: "Launch".into(),
            color: "1e3a5f".into(),
            owner: UserId::new(1),
            created_at: chrono::Utc::now(),
        };
        let mut snapshot = BoardSnapshot::empty(&board);
        snapshot.columns = vec![
            Column::new(ColumnId::new(10), board.id, "To Do", 1.0),
            Column::new(ColumnId::new(11), board.id, "Done", 2.0),
        ];
        let bug = Label {
            id: LabelId::new(30),
            board_id: board.id,
            name: "bug".into(),
            color: "ff0000".into(),
        };
        let mut a = Card::new(CardId::new(20), board.id, ColumnId::new(10), "Write", 1.0);
        a.labels.push(bug.clone());
        let b = Card::new(CardId::new(21), board.id, ColumnId::new(10), "Review", 2.0);
        snapshot.cards = vec![a, b];
        snapshot.labels = vec![bug];
        snapshot
    }

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("hello", 5), "hello");
        assert_eq!(truncate_str("hello world", 8), "hello...");
    }

    #[test]
    fn test_snapshot_table_lists_cards_under_columns() {
        let text = snapshot(OutputFormat::Table, &sample()).unwrap();
        assert!(text.starts_with("Board 1: Launch"));
        assert!(text.contains("To Do (10)"));
        assert!(text.contains("#20 Write"));
        assert!(text.contains("[bug]"));
        assert!(text.find("#20").unwrap() < text.find("#21").unwrap());
    }

    #[test]
    fn test_snapshot_json_is_camel_case() {
        let text = snapshot(OutputFormat::Json, &sample()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["cards"][0]["columnId"], 10);
        assert_eq!(value["labels"][0]["name"], "bug");
    }

    #[test]
    fn test_empty_lists() {
        assert!(boards(OutputFormat::Table, &[]).unwrap().contains("No boards"));
        assert_eq!(boards(OutputFormat::Json, &[]).unwrap(), "[]");
        assert!(activity(OutputFormat::Table, &[]).unwrap().contains("No activity"));
    }

    #[test]
    fn test_done_as_json() {
        let text = done(OutputFormat::Json, "Deleted card 4".into()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["status"], "ok");
    }
}

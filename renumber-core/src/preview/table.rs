use crate::output::ListEntry;
use comfy_table::{Cell, Color, ContentArrangement, Table};
use std::io::{self, IsTerminal};

/// Render a directory listing as a table
pub fn render_listing(entries: &[ListEntry], use_color: bool) -> String {
    let mut table = Table::new();

    if io::stdout().is_terminal() {
        table.set_content_arrangement(ContentArrangement::Dynamic);
    } else {
        table.set_content_arrangement(ContentArrangement::Disabled);
    }

    // Force styling even in non-TTY environments when colors are explicitly requested
    if use_color {
        table.enforce_styling();
        table.set_header(vec![
            Cell::new("#").fg(Color::Cyan),
            Cell::new("Name").fg(Color::Cyan),
            Cell::new("Number").fg(Color::Cyan),
            Cell::new("Flags").fg(Color::Cyan),
        ]);
    } else {
        table.set_header(vec!["#", "Name", "Number", "Flags"]);
    }

    for entry in entries {
        let number = entry.value.map(|v| v.to_string()).unwrap_or_default();
        let flags = entry
            .flag
            .marker()
            .map(|c| c.to_string().repeat(entry.flag_count))
            .unwrap_or_default();

        if use_color {
            let name = if entry.value.is_some() {
                Cell::new(&entry.name)
            } else {
                Cell::new(&entry.name).fg(Color::DarkGrey)
            };
            table.add_row(vec![
                Cell::new(entry.index),
                name,
                Cell::new(number).fg(Color::Yellow),
                Cell::new(flags).fg(Color::Magenta),
            ]);
        } else {
            table.add_row(vec![entry.index.to_string(), entry.name.clone(), number, flags]);
        }
    }

    let numbered = entries.iter().filter(|e| e.value.is_some()).count();
    let flagged = entries.iter().filter(|e| e.flag_count > 0).count();
    if use_color {
        table.add_row(vec![
            Cell::new("─────").fg(Color::DarkGrey),
            Cell::new("─────────").fg(Color::DarkGrey),
            Cell::new("─────────").fg(Color::DarkGrey),
            Cell::new("─────").fg(Color::DarkGrey),
        ]);
        table.add_row(vec![
            Cell::new("TOTAL").fg(Color::Cyan),
            Cell::new(format!("{} entries", entries.len())).fg(Color::White),
            Cell::new(format!("{} numbered", numbered)).fg(Color::Yellow),
            Cell::new(format!("{} flagged", flagged)).fg(Color::White),
        ]);
    } else {
        table.add_row(vec!["─────", "─────────", "─────────", "─────"]);
        table.add_row(vec![
            "TOTAL".to_string(),
            format!("{} entries", entries.len()),
            format!("{} numbered", numbered),
            format!("{} flagged", flagged),
        ]);
    }

    table.to_string()
}

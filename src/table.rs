//! Text table rendering for note listings.

use std::io::{self, Write};

use unicode_width::UnicodeWidthStr;

use crate::models::Note;

const HEADERS: [&str; 3] = ["ID", "NOTE", "TAG"];

#[derive(Clone, Copy)]
enum Align {
    Left,
    Right,
    Center,
}

fn pad(text: &str, width: usize, align: Align) -> String {
    let fill = width.saturating_sub(UnicodeWidthStr::width(text));
    match align {
        Align::Left => format!("{}{}", text, " ".repeat(fill)),
        Align::Right => format!("{}{}", " ".repeat(fill), text),
        Align::Center => {
            let left = fill / 2;
            format!("{}{}{}", " ".repeat(left), text, " ".repeat(fill - left))
        }
    }
}

fn border(widths: &[usize]) -> String {
    let segments: Vec<String> = widths.iter().map(|w| "-".repeat(w + 2)).collect();
    format!("+{}+", segments.join("+"))
}

fn line(cells: &[String], widths: &[usize], aligns: &[Align]) -> String {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .zip(aligns)
        .map(|((cell, width), align)| pad(cell, *width, *align))
        .collect();
    format!("| {} |", padded.join(" | "))
}

/// Render notes as a bordered table with `ID | NOTE | TAG` columns.
///
/// The header is always printed, even when `notes` is empty.
pub fn render_table<W: Write>(notes: &[Note], out: &mut W) -> io::Result<()> {
    let rows: Vec<Vec<String>> = notes
        .iter()
        .map(|n| vec![n.id.to_string(), n.value.clone(), n.tag.clone()])
        .collect();

    let mut widths: Vec<usize> = HEADERS.iter().map(|h| h.width()).collect();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.width());
        }
    }

    let header: Vec<String> = HEADERS.iter().map(|h| h.to_string()).collect();
    let rule = border(&widths);

    writeln!(out, "{}", rule)?;
    writeln!(out, "{}", line(&header, &widths, &[Align::Center; 3]))?;
    writeln!(out, "{}", rule)?;
    for row in &rows {
        writeln!(
            out,
            "{}",
            line(row, &widths, &[Align::Right, Align::Left, Align::Left])
        )?;
    }
    if !rows.is_empty() {
        writeln!(out, "{}", rule)?;
    }
    Ok(())
}

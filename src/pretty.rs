//! # Pretty Printing - Chat Bubbles in the Terminal
//!
//! Terminal counterpart of [`crate::render::render_html`]. Each [`DisplayBlock`] is
//! written line by line:
//!
//! | Block | Terminal Rendering |
//! |-------|-------------------|
//! | User message | Right-aligned, green |
//! | Assistant message | Left-aligned, `**bold**` spans in bold |
//! | Recipe-of-the-day banner | **Bold Cyan** header |
//!
//! Colors and attributes go through **Crossterm** so the same code works on every
//! platform; the terminal width comes from [`crossterm::terminal::size`] and falls
//! back to [`FALLBACK_WIDTH`] when stdout is not a terminal.
//!
//! ```no_run
//! use awful_recipes::dialogue::ChatMessage;
//! use awful_recipes::{pretty, render};
//!
//! let transcript = vec![ChatMessage::assistant("Here are the ingredients for **Pesto**:")];
//! pretty::print_blocks(&render::render(&transcript)).unwrap();
//! ```

use crate::config::RecipeOfTheDay;
use crate::error::Result;
use crate::render::{Align, DisplayBlock};
use crossterm::{
    ExecutableCommand,
    style::{Attribute, Color, SetAttribute, SetForegroundColor},
    terminal,
};
use once_cell::sync::Lazy;
use regex::Regex;
use std::io::{Write, stdout};

/// Width assumed when the terminal size cannot be queried (pipes, CI).
pub const FALLBACK_WIDTH: usize = 80;

static BOLD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*\*([^\*]+)\*\*").expect("bold pattern compiles"));

/// Print blocks to stdout, sized to the current terminal.
pub fn print_blocks(blocks: &[DisplayBlock]) -> Result<()> {
    let width = terminal_width();
    let mut out = stdout();
    for block in blocks {
        write_block(block, width, &mut out)?;
    }
    out.flush()?;
    Ok(())
}

/// Print the recipe-of-the-day header shown when a chat starts.
pub fn print_banner(title: &str, feature: Option<&RecipeOfTheDay>) -> Result<()> {
    let mut out = stdout();
    out.execute(SetForegroundColor(Color::Cyan))?;
    out.execute(SetAttribute(Attribute::Bold))?;
    writeln!(out, "{title}")?;
    out.execute(SetAttribute(Attribute::Reset))?;
    out.execute(SetForegroundColor(Color::Reset))?;

    if let Some(feature) = feature {
        out.execute(SetAttribute(Attribute::Italic))?;
        writeln!(out, "Recipe of the day: {}", feature.caption)?;
        if let Some(image) = &feature.image {
            writeln!(out, "({})", image.display())?;
        }
        out.execute(SetAttribute(Attribute::Reset))?;
    }
    writeln!(out)?;
    out.flush()?;
    Ok(())
}

/// Write one block to `out`, right-aligning user lines within `width` columns.
pub fn write_block<W: Write>(block: &DisplayBlock, width: usize, out: &mut W) -> Result<()> {
    for line in &block.lines {
        match block.align {
            Align::Right => {
                let pad = width.saturating_sub(visible_width(line));
                write!(out, "{}", " ".repeat(pad))?;
                out.execute(SetForegroundColor(Color::Green))?;
                write!(out, "{line}")?;
                out.execute(SetForegroundColor(Color::Reset))?;
                writeln!(out)?;
            }
            Align::Left => {
                write_inline(line, out)?;
                writeln!(out)?;
            }
        }
    }
    writeln!(out)?;
    Ok(())
}

/// Write a line, turning `**text**` into bold text.
fn write_inline<W: Write>(line: &str, out: &mut W) -> Result<()> {
    let mut last_end = 0;
    for cap in BOLD_RE.captures_iter(line) {
        let (Some(whole), Some(inner)) = (cap.get(0), cap.get(1)) else {
            continue;
        };
        write!(out, "{}", &line[last_end..whole.start()])?;
        out.execute(SetAttribute(Attribute::Bold))?;
        write!(out, "{}", inner.as_str())?;
        out.execute(SetAttribute(Attribute::Reset))?;
        last_end = whole.end();
    }
    write!(out, "{}", &line[last_end..])?;
    Ok(())
}

fn visible_width(line: &str) -> usize {
    line.chars().count()
}

fn terminal_width() -> usize {
    terminal::size()
        .map(|(cols, _)| cols as usize)
        .unwrap_or(FALLBACK_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialogue::ChatMessage;
    use crate::render::render;

    fn written(message: ChatMessage, width: usize) -> String {
        let blocks = render(&[message]);
        let mut out = Vec::new();
        write_block(&blocks[0], width, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_user_line_is_padded_to_width() {
        let text = written(ChatMessage::user("pasta"), 20);
        assert!(text.starts_with(&" ".repeat(15)));
        assert!(!text.starts_with(&" ".repeat(16)));
        assert!(text.contains("pasta"));
    }

    #[test]
    fn test_overlong_user_line_is_not_padded() {
        let text = written(ChatMessage::user("a very long request"), 5);
        assert!(!text.starts_with(' '));
    }

    #[test]
    fn test_assistant_bold_markers_are_consumed() {
        let text = written(
            ChatMessage::assistant("Here are the ingredients for **Pesto**:\n\n- basil"),
            40,
        );
        assert!(text.starts_with("Here are the ingredients for "));
        assert!(text.contains("Pesto"));
        assert!(!text.contains("**"));
        assert!(text.contains("\n- basil\n"));
    }

    #[test]
    fn test_unmatched_markers_are_left_alone() {
        let text = written(ChatMessage::assistant("2 ** 3"), 40);
        assert!(text.starts_with("2 ** 3\n"));
    }
}

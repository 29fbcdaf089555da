use std::io;

use crossterm::{queue, style};

/// Print a menu item string, bolding any text inside `[...]` brackets.
/// Text outside brackets is printed dim.
pub fn print_menu_item(stdout: &mut io::Stdout, item: &str) -> anyhow::Result<()> {
    let mut run = String::new();
    let mut bracketed = false;

    for ch in item.chars() {
        match ch {
            '[' => {
                flush_run(stdout, &run, bracketed)?;
                run.clear();
                run.push(ch);
                bracketed = true;
            }
            ']' => {
                run.push(ch);
                flush_run(stdout, &run, bracketed)?;
                run.clear();
                bracketed = false;
            }
            _ => run.push(ch),
        }
    }
    flush_run(stdout, &run, bracketed)
}

fn flush_run(stdout: &mut io::Stdout, text: &str, bold: bool) -> anyhow::Result<()> {
    if text.is_empty() {
        return Ok(());
    }
    let attr = if bold {
        style::Attribute::Bold
    } else {
        style::Attribute::Dim
    };
    queue!(
        stdout,
        style::SetAttribute(attr),
        style::Print(text),
        style::SetAttribute(style::Attribute::Reset),
    )?;
    Ok(())
}

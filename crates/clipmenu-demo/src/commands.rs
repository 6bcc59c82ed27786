//! Line commands read from stdin.

use std::ops::Range;

use serde_json::Value;

use clipmenu_core::{ContextMenuOptions, MenuAction, Position};

pub const HELP: &str = "\
commands:
  page <text>              replace the page text, nothing selected
  select <text>            select <text> on the page
  focus <start> <end> <v>  focus a text field holding <v>, bytes start..end selected
  blur                     remove text field focus
  press [x y]              long-press / right-click at x,y
  choose <action>          copy | cut | paste | selectAll
  dismiss                  click away from the menu
  enable [json]            enable with options, e.g. {\"enableCut\":false}
  disable                  disable the menu
  read                     read the clipboard
  write <text>             write <text> to the clipboard
  echo <text>              echo <text>
  status                   show state
  quit";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Page(String),
    Select(String),
    Focus { value: String, selection: Range<usize> },
    Blur,
    Press(Position),
    Choose(MenuAction),
    Dismiss,
    Enable(Option<ContextMenuOptions>),
    Disable,
    Read,
    Write(String),
    Echo(String),
    Status,
    Help,
    Quit,
}

/// Parse one input line. Blank lines parse to `None`.
pub fn parse(line: &str) -> Option<Result<Command, String>> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word {
        "page" => Ok(Command::Page(rest.to_string())),
        "select" => Ok(Command::Select(rest.to_string())),
        "focus" => parse_focus(rest),
        "blur" => Ok(Command::Blur),
        "press" => parse_position(rest).map(Command::Press),
        "choose" => MenuAction::from_name(rest)
            .map(Command::Choose)
            .ok_or_else(|| format!("unknown action '{}'", rest)),
        "dismiss" => Ok(Command::Dismiss),
        "enable" => Ok(Command::Enable(parse_options(rest))),
        "disable" => Ok(Command::Disable),
        "read" => Ok(Command::Read),
        "write" => Ok(Command::Write(rest.to_string())),
        "echo" => Ok(Command::Echo(rest.to_string())),
        "status" => Ok(Command::Status),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" => Ok(Command::Quit),
        other => Err(format!("unknown command '{}', try 'help'", other)),
    };
    Some(command)
}

fn parse_focus(rest: &str) -> Result<Command, String> {
    let mut parts = rest.splitn(3, char::is_whitespace);
    let start = parts.next().and_then(|s| s.parse::<usize>().ok());
    let end = parts.next().and_then(|s| s.parse::<usize>().ok());
    match (start, end) {
        (Some(start), Some(end)) if start <= end => Ok(Command::Focus {
            value: parts.next().unwrap_or("").to_string(),
            selection: start..end,
        }),
        _ => Err("usage: focus <start> <end> <value>".to_string()),
    }
}

fn parse_position(rest: &str) -> Result<Position, String> {
    if rest.is_empty() {
        return Ok(Position::default());
    }
    let coords: Vec<f64> = rest
        .split_whitespace()
        .map(|s| s.parse::<f64>())
        .collect::<Result<_, _>>()
        .map_err(|e| format!("bad coordinate: {}", e))?;
    match coords.as_slice() {
        [x, y] => Ok(Position::new(*x, *y)),
        _ => Err("usage: press [x y]".to_string()),
    }
}

/// Options never fail to parse; anything unreadable means defaults.
fn parse_options(rest: &str) -> Option<ContextMenuOptions> {
    if rest.is_empty() {
        return None;
    }
    let value = serde_json::from_str::<Value>(rest).unwrap_or(Value::Null);
    Some(ContextMenuOptions::from_value(&value))
}

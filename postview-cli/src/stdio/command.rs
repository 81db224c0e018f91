use crate::screen::DialogAction;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// 1-based row number as printed in the list
    Open(usize),
    NextPage,
    PrevPage,
    Dismiss(DialogAction),
    Help,
    Quit,
    Unknown(String),
}

impl Command {
    pub fn parse(line: &str) -> Option<Command> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        if let Ok(row) = line.parse::<usize>() {
            return Some(match row {
                0 => Command::Unknown(line.to_string()),
                row => Command::Open(row),
            });
        }
        let cmd = match line.to_ascii_lowercase().as_str() {
            "n" | "next" => Command::NextPage,
            "p" | "prev" => Command::PrevPage,
            "d" | "done" => Command::Dismiss(DialogAction::Done),
            "c" | "cancel" => Command::Dismiss(DialogAction::Cancel),
            "h" | "help" | "?" => Command::Help,
            "q" | "quit" | "exit" => Command::Quit,
            _ => Command::Unknown(line.to_string()),
        };
        Some(cmd)
    }
}

pub const HELP: &str = "\
<row>   show the first comment of a post
n / p   next / previous page
d / c   close the comment (done / cancel)
q       quit";

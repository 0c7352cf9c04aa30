/// One line typed at the interactive prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptCommand {
    Search(String),
    /// 1-based index into the recent-search list.
    Recent(usize),
    ListRecent,
    ToggleUnits,
    Help,
    Quit,
    Empty,
    Unknown(String),
}

pub const HELP: &str = "Type a city name to search. \
`:u` toggles units, `:1`..`:5` repeats a recent search, `:r` lists them, `:q` quits.";

pub fn parse(line: &str) -> PromptCommand {
    let line = line.trim();

    let Some(cmd) = line.strip_prefix(':') else {
        return if line.is_empty() {
            PromptCommand::Empty
        } else {
            PromptCommand::Search(line.to_string())
        };
    };

    match cmd.trim().to_lowercase().as_str() {
        "q" | "quit" | "exit" => PromptCommand::Quit,
        "u" | "units" => PromptCommand::ToggleUnits,
        "r" | "recent" => PromptCommand::ListRecent,
        "h" | "help" | "?" => PromptCommand::Help,
        other => match other.parse::<usize>() {
            Ok(n) if n > 0 => PromptCommand::Recent(n),
            _ => PromptCommand::Unknown(line.to_string()),
        },
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UciCommand {
    Uci,
    IsReady,
    UciNewGame,
    Position(Vec<String>),
    /// `go`, with `depth N` if given; clock arguments are ignored
    Go { depth: Option<u32> },
    Perft(usize),
    /// `d`: print the board and its FEN
    Display,
    Quit,
    Unknown(String),
}

pub fn parse_uci_command(line: &str) -> Option<UciCommand> {
    let trimmed = line.trim();
    let parts: Vec<&str> = trimmed.split_whitespace().collect();
    if parts.is_empty() {
        return None;
    }

    let cmd = match parts[0] {
        "uci" => UciCommand::Uci,
        "isready" => UciCommand::IsReady,
        "ucinewgame" => UciCommand::UciNewGame,
        "position" => UciCommand::Position(parts.iter().map(|p| (*p).to_string()).collect()),
        "go" => {
            let depth = parts
                .iter()
                .position(|p| *p == "depth")
                .and_then(|i| parts.get(i + 1))
                .and_then(|v| v.parse::<u32>().ok());
            UciCommand::Go { depth }
        }
        "perft" => {
            let depth = parts.get(1).and_then(|v| v.parse::<usize>().ok()).unwrap_or(1).max(1);
            UciCommand::Perft(depth)
        }
        "d" => UciCommand::Display,
        "quit" => UciCommand::Quit,
        _ => UciCommand::Unknown(trimmed.to_string()),
    };

    Some(cmd)
}

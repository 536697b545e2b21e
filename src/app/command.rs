//! Command parsing for the command line

/// Parsed command from the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Quit the application: :q or :quit
    Quit,
    /// Draw a new session: :restart
    Restart,
    /// Clear all attempt history: :reset
    Reset,
    /// Report a problem with the current question: :report <note>
    Report(String),
    /// Clear message: (empty command)
    Nop,
}

/// Result of parsing a command
#[derive(Debug)]
pub enum ParseResult {
    /// Successfully parsed command
    Ok(Command),
    /// Unknown command
    UnknownCommand(String),
    /// Command needs an argument
    MissingArgument(String),
}

/// Parse a command string (without the leading :)
pub fn parse_command(input: &str) -> ParseResult {
    let input = input.trim();

    if input.is_empty() {
        return ParseResult::Ok(Command::Nop);
    }

    let mut parts = input.splitn(2, char::is_whitespace);
    let cmd = parts.next().unwrap_or("");
    let args = parts.next().map(|s| s.trim()).unwrap_or("");

    match cmd.to_lowercase().as_str() {
        "quit" | "q" => ParseResult::Ok(Command::Quit),
        "restart" | "new" => ParseResult::Ok(Command::Restart),
        "reset" => ParseResult::Ok(Command::Reset),
        "report" | "flag" => {
            if args.is_empty() {
                ParseResult::MissingArgument("report".to_string())
            } else {
                ParseResult::Ok(Command::Report(args.to_string()))
            }
        }
        _ => ParseResult::UnknownCommand(cmd.to_string()),
    }
}

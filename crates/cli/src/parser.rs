//! Line-based command parser.
//!
//! Deliberately trivial: the core consumes `ParsedCommand` values and has no
//! opinion on how they were produced. This is a placeholder front-end, not
//! the specified parsing interface.

use nx_batch_core::domain::ParsedCommand;

/// A command line is valid when it begins with the `nx` prefix and carries
/// at least one further token.
fn parse_line(line: &str) -> ParsedCommand {
    let trimmed = line.trim();
    let valid = trimmed.starts_with("nx ") && trimmed.split_whitespace().count() >= 2;
    ParsedCommand::new(trimmed.to_string(), Vec::new(), valid)
}

/// Parse a batch file's contents into a `ParsedCommand` stream. Blank lines
/// and `#`-prefixed comments are skipped entirely (they never reach the
/// core, valid or otherwise).
pub fn parse_batch(input: &str) -> Vec<ParsedCommand> {
    input
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(parse_line)
        .collect()
}

//! Interactive-loop command grammar
//!
//! One trimmed input line parses into exactly one command. Precedence is
//! fixed: quit keywords, registered workflow name, numeric menu index,
//! `s <n>`, `r <name>`, unknown. A single leading `:` is stripped before
//! matching.

use crate::workflow::WorkflowRegistry;

/// A parsed interactive-loop command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoopCommand {
    /// Exit the loop
    Quit,
    /// First token named a registered workflow; `k=v` tokens become raw
    /// args, anything else is reported for a warning
    Invoke {
        name: String,
        args: Vec<(String, String)>,
        ignored: Vec<String>,
    },
    /// 1-based index into the displayed, name-sorted menu
    Select(usize),
    /// `s <n>`: switch the current selection to menu index n
    SwitchTo(usize),
    /// `r <name>`: run by name, prompting for missing required parameters
    RunNamed(String),
    /// Looked numeric but was not a usable index
    InvalidSelection,
    /// `s` with an unparseable remainder
    InvalidSwitch,
    /// Nothing matched
    Unknown,
}

impl LoopCommand {
    /// Parse one non-empty input line against the registry.
    pub fn parse(input: &str, registry: &WorkflowRegistry) -> Self {
        let line = input.trim();
        let line = line.strip_prefix(':').unwrap_or(line).trim();
        if line.is_empty() {
            return LoopCommand::Unknown;
        }

        if line.eq_ignore_ascii_case("q")
            || line.eq_ignore_ascii_case("quit")
            || line.eq_ignore_ascii_case("exit")
        {
            return LoopCommand::Quit;
        }

        let tokens = tokenize(line);
        if let Some(first) = tokens.first() {
            if registry.contains(first) {
                let mut args = Vec::new();
                let mut ignored = Vec::new();
                for token in &tokens[1..] {
                    match token.split_once('=') {
                        Some((key, value)) => args.push((key.to_string(), value.to_string())),
                        None => ignored.push(token.clone()),
                    }
                }
                return LoopCommand::Invoke {
                    name: first.clone(),
                    args,
                    ignored,
                };
            }
        }

        if line.chars().next().is_some_and(|c| c.is_ascii_digit()) {
            let numeric = line.chars().all(|c| c.is_ascii_digit());
            return match (numeric, line.parse::<usize>()) {
                (true, Ok(n)) => LoopCommand::Select(n),
                _ => LoopCommand::InvalidSelection,
            };
        }

        if let Some(rest) = line.strip_prefix("s ") {
            return match rest.trim().parse::<usize>() {
                Ok(n) => LoopCommand::SwitchTo(n),
                Err(_) => LoopCommand::InvalidSwitch,
            };
        }

        if let Some(rest) = line.strip_prefix("r ") {
            let rest = rest.trim();
            if !rest.is_empty() {
                return LoopCommand::RunNamed(rest.to_string());
            }
        }

        LoopCommand::Unknown
    }
}

/// Split a line into tokens with shell-style quoting: single and double
/// quotes group, backslash escapes the next character outside single
/// quotes. An unbalanced quote degrades gracefully by running to end of
/// line.
pub fn tokenize(line: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut has_token = false;
    let mut in_single = false;
    let mut in_double = false;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match c {
            '\'' if !in_double => {
                in_single = !in_single;
                has_token = true;
            }
            '"' if !in_single => {
                in_double = !in_double;
                has_token = true;
            }
            '\\' if !in_single => {
                if let Some(next) = chars.next() {
                    current.push(next);
                    has_token = true;
                }
            }
            c if c.is_whitespace() && !in_single && !in_double => {
                if has_token {
                    tokens.push(std::mem::take(&mut current));
                    has_token = false;
                }
            }
            c => {
                current.push(c);
                has_token = true;
            }
        }
    }
    if has_token {
        tokens.push(current);
    }
    tokens
}

// Pure validation for everything the user types at a prompt
use crate::states::StateTable;

/// Typed at any prompt to leave
pub const EXIT_SENTINEL: &str = "exit";

/// Outcome of checking a numbered pick against a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Valid(u32),
    Exit,
    /// Not a whole number in `1..=maximum`; ask again
    Invalid,
}

/// Accept only plain digits naming an entry in `1..=maximum`.
///
/// "3.5", "abc", "-1", "0" and anything above `maximum` are `Invalid`.
pub fn validate_selection(input: &str, maximum: u32) -> Selection {
    if input == EXIT_SENTINEL {
        return Selection::Exit;
    }

    if input.is_empty() || !input.bytes().all(|b| b.is_ascii_digit()) {
        return Selection::Invalid;
    }

    // All digits but too long for u32 is still just out of range
    match input.parse::<u32>() {
        Ok(value) if (1..=maximum).contains(&value) => Selection::Valid(value),
        _ => Selection::Invalid,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateChoice {
    Found {
        /// As the user typed it, used for headings
        name: String,
        code: String,
    },
    Exit,
    Unknown,
}

pub fn resolve_state(input: &str, states: &StateTable) -> StateChoice {
    if input == EXIT_SENTINEL {
        return StateChoice::Exit;
    }

    match states.code_for(input) {
        Some(code) => StateChoice::Found {
            name: input.to_string(),
            code: code.to_string(),
        },
        None => StateChoice::Unknown,
    }
}

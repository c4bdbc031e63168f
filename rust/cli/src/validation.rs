//! Input parsing for the interactive play menu.
//!
//! The human's turn menu accepts the numbers 1-7 or word forms:
//!
//! | input | meaning |
//! |-------|---------|
//! | `1`, `f`, `fold` | fold |
//! | `2`, `c`, `call`, `check` | call / check |
//! | `3`, `r`, `raise` `[N]` | raise by N (asked for when missing) |
//! | `4`, `a`, `allin`, `all-in` | all-in |
//! | `5`, `l`, `list`, `cheats` | list cheats |
//! | `6`, `u`, `use`, `cheat` `[NAME [SEAT]]` | use a cheat |
//! | `7`, `s`, `status` | show status |
//! | `q`, `quit` | end the session |
//!
//! Parsing never touches game state; an [`MenuInput::Invalid`] just means
//! the menu is shown again.

/// One parsed line of menu input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuInput {
    Fold,
    Call,
    /// Amount to add on top of the call; `None` when it still has to be asked
    Raise(Option<u32>),
    AllIn,
    CheatList,
    UseCheat {
        name: Option<String>,
        target: Option<usize>,
    },
    Status,
    Quit,
    /// Invalid input with error message
    Invalid(String),
}

/// Parse a line from the turn menu.
///
/// # Example
///
/// ```rust
/// # use bloodgamble_cli::validation::{parse_menu_input, MenuInput};
/// assert_eq!(parse_menu_input("2"), MenuInput::Call);
/// assert_eq!(parse_menu_input("raise 6"), MenuInput::Raise(Some(6)));
/// assert_eq!(
///     parse_menu_input("cheat peekopponenthole 2"),
///     MenuInput::UseCheat { name: Some("peekopponenthole".into()), target: Some(2) }
/// );
/// assert_eq!(parse_menu_input("Q"), MenuInput::Quit);
/// ```
pub fn parse_menu_input(input: &str) -> MenuInput {
    let input = input.trim().to_lowercase();
    let parts: Vec<&str> = input.split_whitespace().collect();

    let Some((&cmd, args)) = parts.split_first() else {
        return MenuInput::Invalid("Empty input".to_string());
    };

    match cmd {
        "1" | "f" | "fold" => no_args(MenuInput::Fold, args),
        "2" | "c" | "call" | "check" => no_args(MenuInput::Call, args),
        "3" | "r" | "raise" => match args {
            [] => MenuInput::Raise(None),
            [amount] => match parse_amount(amount) {
                Ok(n) => MenuInput::Raise(Some(n)),
                Err(msg) => MenuInput::Invalid(msg),
            },
            _ => MenuInput::Invalid("Usage: raise <amount>".to_string()),
        },
        "4" | "a" | "allin" | "all-in" => no_args(MenuInput::AllIn, args),
        "5" | "l" | "list" | "cheats" => no_args(MenuInput::CheatList, args),
        "6" | "u" | "use" | "cheat" => match args {
            [] => MenuInput::UseCheat {
                name: None,
                target: None,
            },
            [name] => MenuInput::UseCheat {
                name: Some(name.to_string()),
                target: None,
            },
            [name, target] => match parse_target(target) {
                Ok(t) => MenuInput::UseCheat {
                    name: Some(name.to_string()),
                    target: Some(t),
                },
                Err(msg) => MenuInput::Invalid(msg),
            },
            _ => MenuInput::Invalid("Usage: cheat <name> [seat]".to_string()),
        },
        "7" | "s" | "status" => no_args(MenuInput::Status, args),
        "q" | "quit" => MenuInput::Quit,
        other => MenuInput::Invalid(format!(
            "Unrecognized choice: '{}'. Enter 1-7 or q.",
            other
        )),
    }
}

fn no_args(parsed: MenuInput, args: &[&str]) -> MenuInput {
    if args.is_empty() {
        parsed
    } else {
        MenuInput::Invalid(format!("Unexpected input: '{}'", args.join(" ")))
    }
}

/// Parse a positive HP amount.
pub fn parse_amount(input: &str) -> Result<u32, String> {
    match input.trim().parse::<u32>() {
        Ok(0) => Err("Amount must be positive".to_string()),
        Ok(n) => Ok(n),
        Err(_) => Err(format!("Invalid amount: '{}'", input.trim())),
    }
}

/// Parse an AI seat number (1-3).
pub fn parse_target(input: &str) -> Result<usize, String> {
    match input.trim().parse::<usize>() {
        Ok(n) if (1..=3).contains(&n) => Ok(n),
        _ => Err(format!("Invalid seat: '{}'. Choose 1-3.", input.trim())),
    }
}

/// `y`/`yes` confirms; anything else declines.
pub fn parse_confirmation(input: &str) -> bool {
    matches!(input.trim().to_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_and_words_map_to_the_same_choice() {
        let pairs = [
            ("1", "fold", MenuInput::Fold),
            ("2", "check", MenuInput::Call),
            ("4", "all-in", MenuInput::AllIn),
            ("5", "cheats", MenuInput::CheatList),
            ("7", "status", MenuInput::Status),
        ];
        for (number, word, expected) in pairs {
            assert_eq!(parse_menu_input(number), expected);
            assert_eq!(parse_menu_input(word), expected);
        }
    }

    #[test]
    fn input_is_trimmed_and_case_insensitive() {
        assert_eq!(parse_menu_input("  FOLD \n"), MenuInput::Fold);
        assert_eq!(parse_menu_input("Quit"), MenuInput::Quit);
    }

    #[test]
    fn raise_amount_is_optional() {
        assert_eq!(parse_menu_input("3"), MenuInput::Raise(None));
        assert_eq!(parse_menu_input("r 10"), MenuInput::Raise(Some(10)));
        assert!(matches!(parse_menu_input("raise ten"), MenuInput::Invalid(_)));
        assert!(matches!(parse_menu_input("raise 0"), MenuInput::Invalid(_)));
    }

    #[test]
    fn cheat_with_name_and_target() {
        assert_eq!(
            parse_menu_input("6"),
            MenuInput::UseCheat {
                name: None,
                target: None
            }
        );
        assert_eq!(
            parse_menu_input("cheat SwapHands"),
            MenuInput::UseCheat {
                name: Some("swaphands".into()),
                target: None
            }
        );
        assert!(matches!(
            parse_menu_input("cheat forcefold 0"),
            MenuInput::Invalid(_)
        ));
    }

    #[test]
    fn junk_is_invalid() {
        match parse_menu_input("xyz") {
            MenuInput::Invalid(msg) => assert!(msg.contains("Unrecognized")),
            other => panic!("expected Invalid, got {:?}", other),
        }
        assert!(matches!(parse_menu_input(""), MenuInput::Invalid(_)));
        assert!(matches!(parse_menu_input("fold now"), MenuInput::Invalid(_)));
    }

    #[test]
    fn targets_must_be_ai_seats() {
        assert_eq!(parse_target("3"), Ok(3));
        assert!(parse_target("0").is_err());
        assert!(parse_target("4").is_err());
    }

    #[test]
    fn confirmation() {
        assert!(parse_confirmation("Y"));
        assert!(parse_confirmation("yes"));
        assert!(!parse_confirmation(""));
        assert!(!parse_confirmation("n"));
    }
}

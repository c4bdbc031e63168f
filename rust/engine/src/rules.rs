use serde::{Deserialize, Serialize};

use crate::errors::GameError;
use crate::seat::PlayerDecision as D;

/// A decision after legality checks, carrying the HP it moves into the pot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidatedAction {
    Fold,
    Check,
    Call(u32),
    /// `total` is what the seat commits this turn (call + raise)
    Raise { total: u32, raise_by: u32 },
    AllIn(u32),
}

impl ValidatedAction {
    /// HP committed by this action.
    pub fn amount(&self) -> u32 {
        match *self {
            ValidatedAction::Fold | ValidatedAction::Check => 0,
            ValidatedAction::Call(n) | ValidatedAction::AllIn(n) => n,
            ValidatedAction::Raise { total, .. } => total,
        }
    }
}

/// Validates a seat decision against its stack and the current street.
///
/// Converts a [`crate::seat::PlayerDecision`] into a [`ValidatedAction`].
/// Calls and raises that would reach the whole stack become
/// [`ValidatedAction::AllIn`]; a call of nothing is a check.
///
/// # Arguments
///
/// * `stack` - HP the seat still holds
/// * `to_call` - HP needed to match the street maximum
/// * `min_raise` - smallest raise on top of the call (the big blind)
/// * `decision` - what the seat asked for
///
/// # Errors
///
/// Returns [`GameError::InvalidRaise`] for a raise below `min_raise` that
/// does not put the seat all-in.
///
/// # Examples
///
/// ```
/// use bloodgamble_engine::rules::{validate_action, ValidatedAction};
/// use bloodgamble_engine::seat::PlayerDecision;
///
/// assert_eq!(
///     validate_action(30, 0, 2, PlayerDecision::Call),
///     Ok(ValidatedAction::Check)
/// );
/// // a short stack calling goes all-in
/// assert_eq!(
///     validate_action(3, 5, 2, PlayerDecision::Call),
///     Ok(ValidatedAction::AllIn(3))
/// );
/// ```
///
/// ```
/// use bloodgamble_engine::errors::GameError;
/// use bloodgamble_engine::rules::validate_action;
/// use bloodgamble_engine::seat::PlayerDecision;
///
/// let result = validate_action(100, 2, 2, PlayerDecision::Raise(1));
/// assert!(matches!(result, Err(GameError::InvalidRaise { .. })));
/// ```
pub fn validate_action(
    stack: u32,
    to_call: u32,
    min_raise: u32,
    decision: D,
) -> Result<ValidatedAction, GameError> {
    match decision {
        D::Fold => Ok(ValidatedAction::Fold),
        D::Call => {
            if to_call == 0 {
                Ok(ValidatedAction::Check)
            } else if to_call >= stack {
                Ok(ValidatedAction::AllIn(stack))
            } else {
                Ok(ValidatedAction::Call(to_call))
            }
        }
        D::Raise(raise_by) => {
            let total = to_call.saturating_add(raise_by);
            if total >= stack {
                Ok(ValidatedAction::AllIn(stack))
            } else if raise_by < min_raise {
                Err(GameError::InvalidRaise {
                    amount: raise_by,
                    minimum: min_raise,
                })
            } else {
                Ok(ValidatedAction::Raise { total, raise_by })
            }
        }
        D::AllIn => Ok(ValidatedAction::AllIn(stack)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raise_reaching_stack_is_all_in_even_below_minimum() {
        assert_eq!(
            validate_action(5, 4, 2, D::Raise(1)),
            Ok(ValidatedAction::AllIn(5))
        );
    }

    #[test]
    fn legal_raise_commits_call_plus_raise() {
        assert_eq!(
            validate_action(50, 2, 2, D::Raise(6)),
            Ok(ValidatedAction::Raise {
                total: 8,
                raise_by: 6
            })
        );
    }

    #[test]
    fn all_in_with_empty_stack_commits_nothing() {
        assert_eq!(validate_action(0, 0, 2, D::AllIn).map(|a| a.amount()), Ok(0));
    }
}

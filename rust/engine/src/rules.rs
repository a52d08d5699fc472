use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::GameError;

/// A betting decision submitted by the seat to act.
///
/// `Raise` carries the total contribution the seat wants to reach ("raise to"),
/// not the increment.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "amount", rename_all = "snake_case")]
pub enum Action {
    Fold,
    Check,
    Call,
    Raise(u32),
}

impl Action {
    /// Decodes the loose `(name, amount)` pair used by transports. The amount is
    /// only read for raises.
    pub fn parse(name: &str, amount: u32) -> Result<Action, GameError> {
        match name.trim().to_ascii_lowercase().as_str() {
            "fold" => Ok(Action::Fold),
            "check" => Ok(Action::Check),
            "call" => Ok(Action::Call),
            "raise" | "bet" => Ok(Action::Raise(amount)),
            _ => Err(GameError::UnknownAction(name.to_string())),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Fold => f.write_str("fold"),
            Action::Check => f.write_str("check"),
            Action::Call => f.write_str("call"),
            Action::Raise(to) => write!(f, "raise to {to}"),
        }
    }
}

/// One entry of the legal-action menu offered to the seat to act.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LegalAction {
    Fold,
    /// `amount == 0` is a check, anything else a call. The amount may exceed
    /// the seat's stack; calling then puts the seat all-in for less.
    CheckOrCall { amount: u32 },
    /// Bounds are "raise to" totals.
    Raise { min: u32, max: u32 },
}

/// An action after it has been checked against the seat's chips. Amounts are
/// the chips that move from stack to contribution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidatedAction {
    Fold,
    Check,
    Call(u32),
    Raise { to: u32, chips: u32 },
}

/// Chips the seat still owes to match the highest active contribution.
pub fn amount_to_call(contribution: u32, highest: u32) -> u32 {
    highest.saturating_sub(contribution)
}

/// Lists what a seat holding `stack` behind `contribution` may do when the
/// highest active contribution is `highest`.
///
/// The minimum raise is one chip over the current bet, not the size of the
/// previous raise.
///
/// ```
/// use holdem_engine::rules::{legal_actions, LegalAction};
///
/// let menu = legal_actions(98, 2, 2);
/// assert_eq!(menu[1], LegalAction::CheckOrCall { amount: 0 });
/// assert_eq!(menu[2], LegalAction::Raise { min: 3, max: 100 });
///
/// // Cannot cover more than the call: no raise on offer.
/// assert_eq!(legal_actions(5, 0, 10).len(), 2);
/// ```
pub fn legal_actions(stack: u32, contribution: u32, highest: u32) -> Vec<LegalAction> {
    let owed = amount_to_call(contribution, highest);
    let mut menu = vec![
        LegalAction::Fold,
        LegalAction::CheckOrCall { amount: owed },
    ];
    if stack > owed {
        menu.push(LegalAction::Raise {
            min: highest + 1,
            max: contribution + stack,
        });
    }
    menu
}

/// Validates an action for a seat with `stack` chips behind and `contribution`
/// already committed, facing a highest active contribution of `highest`.
///
/// # Errors
///
/// - [`GameError::InvalidCheck`] when checking while chips are owed
/// - [`GameError::InvalidRaise`] when the target does not exceed `highest` or
///   needs more chips than the seat holds
///
/// A call the seat cannot cover becomes an all-in for less:
///
/// ```
/// use holdem_engine::rules::{validate_action, Action, ValidatedAction};
///
/// assert_eq!(validate_action(30, 0, 50, Action::Call), Ok(ValidatedAction::Call(30)));
/// assert_eq!(
///     validate_action(100, 2, 2, Action::Raise(5)),
///     Ok(ValidatedAction::Raise { to: 5, chips: 3 })
/// );
/// assert!(validate_action(100, 0, 2, Action::Raise(2)).is_err());
/// ```
pub fn validate_action(
    stack: u32,
    contribution: u32,
    highest: u32,
    action: Action,
) -> Result<ValidatedAction, GameError> {
    let owed = amount_to_call(contribution, highest);
    match action {
        Action::Fold => Ok(ValidatedAction::Fold),
        Action::Check => {
            if owed == 0 {
                Ok(ValidatedAction::Check)
            } else {
                Err(GameError::InvalidCheck { owed })
            }
        }
        Action::Call => {
            if owed == 0 {
                Ok(ValidatedAction::Check)
            } else {
                Ok(ValidatedAction::Call(owed.min(stack)))
            }
        }
        Action::Raise(to) => {
            let maximum = contribution.saturating_add(stack);
            if to <= highest || to > maximum {
                return Err(GameError::InvalidRaise {
                    target: to,
                    minimum: highest.saturating_add(1),
                    maximum,
                });
            }
            Ok(ValidatedAction::Raise {
                to,
                chips: to - contribution,
            })
        }
    }
}

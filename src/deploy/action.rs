// ABOUTME: The three lifecycle actions an invocation can perform.
// ABOUTME: Parses both the long input labels and the short CLI spellings.

use std::fmt;
use std::str::FromStr;

use super::RequestError;
use crate::config::inputs::actions;

/// A single lifecycle action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Upload an artifact and create or update a deployment.
    Deploy,
    /// Make the staging deployment serve production traffic.
    Promote,
    /// Delete the staging deployment.
    DeleteStaging,
}

impl Action {
    /// The input label for this action.
    pub fn label(&self) -> &'static str {
        match self {
            Action::Deploy => actions::DEPLOY,
            Action::Promote => actions::SET_PRODUCTION,
            Action::DeleteStaging => actions::DELETE_STAGING_DEPLOYMENT,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Action {
    type Err = RequestError;

    /// Case-insensitive; hyphens, underscores, and runs of spaces are equivalent.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s
            .to_ascii_lowercase()
            .split(|c: char| c == '-' || c == '_' || c.is_whitespace())
            .filter(|word| !word.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        match normalized.as_str() {
            actions::DEPLOY => Ok(Action::Deploy),
            actions::SET_PRODUCTION | "promote" => Ok(Action::Promote),
            actions::DELETE_STAGING_DEPLOYMENT | "delete staging" => Ok(Action::DeleteStaging),
            _ => Err(RequestError::UnknownAction(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_input_labels() {
        assert_eq!("deploy".parse::<Action>().unwrap(), Action::Deploy);
        assert_eq!("Set Production".parse::<Action>().unwrap(), Action::Promote);
        assert_eq!(
            "Delete Staging Deployment".parse::<Action>().unwrap(),
            Action::DeleteStaging
        );
    }

    #[test]
    fn parses_short_spellings() {
        assert_eq!("promote".parse::<Action>().unwrap(), Action::Promote);
        assert_eq!("set-production".parse::<Action>().unwrap(), Action::Promote);
        assert_eq!(
            "delete-staging".parse::<Action>().unwrap(),
            Action::DeleteStaging
        );
        assert_eq!(
            "delete_staging_deployment".parse::<Action>().unwrap(),
            Action::DeleteStaging
        );
    }

    #[test]
    fn label_round_trips() {
        for action in [Action::Deploy, Action::Promote, Action::DeleteStaging] {
            assert_eq!(action.label().parse::<Action>().unwrap(), action);
        }
    }

    #[test]
    fn unknown_action_is_rejected() {
        let err = "rollback".parse::<Action>().unwrap_err();
        assert!(err.to_string().contains("rollback"));
    }
}

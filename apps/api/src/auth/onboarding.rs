use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::user::User;

/// Where a student should go next in the marks → survey → advisor flow.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NextStep {
    Marks,
    Survey,
    Home,
}

impl NextStep {
    pub fn for_flags(marks_completed: bool, riasec_completed: bool) -> Self {
        if !marks_completed {
            NextStep::Marks
        } else if !riasec_completed {
            NextStep::Survey
        } else {
            NextStep::Home
        }
    }

    pub fn for_user(user: &User) -> Self {
        Self::for_flags(user.marks_completed, user.riasec_completed)
    }

    /// Greeting shown right after login.
    pub fn login_message(self) -> &'static str {
        match self {
            NextStep::Marks => "Welcome! Please enter your academic marks to get started.",
            NextStep::Survey => {
                "Great! Now complete the career assessment to get personalized recommendations."
            }
            NextStep::Home => "Welcome back!",
        }
    }
}

/// Fails unless marks entry is done.
pub fn require_marks(user: &User, message: &str) -> Result<(), AppError> {
    if user.marks_completed {
        Ok(())
    } else {
        Err(AppError::OnboardingIncomplete {
            message: message.to_string(),
            next_step: NextStep::Marks,
        })
    }
}

/// Fails unless both marks entry and the RIASEC assessment are done.
pub fn require_onboarded(user: &User, marks_message: &str, riasec_message: &str) -> Result<(), AppError> {
    require_marks(user, marks_message)?;
    if user.riasec_completed {
        Ok(())
    } else {
        Err(AppError::OnboardingIncomplete {
            message: riasec_message.to_string(),
            next_step: NextStep::Survey,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_goes_to_marks() {
        assert_eq!(NextStep::for_flags(false, false), NextStep::Marks);
        // Marks still gate even if the survey was somehow taken first.
        assert_eq!(NextStep::for_flags(false, true), NextStep::Marks);
    }

    #[test]
    fn test_marks_done_goes_to_survey() {
        assert_eq!(NextStep::for_flags(true, false), NextStep::Survey);
    }

    #[test]
    fn test_both_done_goes_home() {
        assert_eq!(NextStep::for_flags(true, true), NextStep::Home);
    }

    #[test]
    fn test_serializes_snake_case() {
        assert_eq!(serde_json::to_string(&NextStep::Survey).unwrap(), "\"survey\"");
    }
}

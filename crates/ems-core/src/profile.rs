//! Application-level user record (`profiles` table).

use serde::{Deserialize, Serialize};

use crate::ids::UserId;

/// Onboarding completion flag.
///
/// The backend column is a nullable boolean. `null` (or a missing key) is
/// kept distinct from `false` so that the raw fact survives a round trip,
/// while [`OnboardingFlag::is_complete`] is the single coercion rule every
/// reader uses: only `True` counts as onboarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Option<bool>", into = "Option<bool>")]
pub enum OnboardingFlag {
    #[default]
    NotSet,
    False,
    True,
}

impl OnboardingFlag {
    pub fn is_complete(self) -> bool {
        matches!(self, Self::True)
    }
}

impl From<Option<bool>> for OnboardingFlag {
    fn from(value: Option<bool>) -> Self {
        match value {
            None => Self::NotSet,
            Some(false) => Self::False,
            Some(true) => Self::True,
        }
    }
}

impl From<OnboardingFlag> for Option<bool> {
    fn from(flag: OnboardingFlag) -> Self {
        match flag {
            OnboardingFlag::NotSet => None,
            OnboardingFlag::False => Some(false),
            OnboardingFlag::True => Some(true),
        }
    }
}

/// Profile row as stored by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: UserId,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub is_onboarded: OnboardingFlag,
    #[serde(default)]
    pub goals_id: Option<Vec<i8>>,
}

impl Profile {
    pub fn is_onboarded(&self) -> bool {
        self.is_onboarded.is_complete()
    }
}

/// Partial update of a profile row. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProfilePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_onboarded: Option<bool>,
}

impl ProfilePatch {
    /// Patch that only flips the onboarding flag.
    pub fn onboarded() -> Self {
        Self {
            is_onboarded: Some(true),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

//! Goals and the goal entity builder.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ids::{GoalId, UserId};

/// How the user proves a goal was met.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ProofType {
    #[default]
    Photo,
    #[serde(rename = "GPS")]
    Gps,
    Health,
}

impl ProofType {
    pub const ALL: [ProofType; 3] = [ProofType::Photo, ProofType::Gps, ProofType::Health];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Photo => "Photo",
            Self::Gps => "GPS",
            Self::Health => "Health",
        }
    }
}

impl std::fmt::Display for ProofType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ProofType {
    type Err = GoalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| GoalError::UnknownProofType(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GoalError {
    #[error("goal title must not be empty")]
    EmptyTitle,
    #[error("unknown proof type: {0}")]
    UnknownProofType(String),
}

/// A goal title that is known to be non-empty after trimming.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GoalTitle(String);

impl GoalTitle {
    pub fn parse(raw: &str) -> Result<Self, GoalError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(GoalError::EmptyTitle);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Goal record, serialized with the keys the `goals` table uses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: GoalId,
    pub user_id: UserId,
    pub title: String,
    pub proof_type: ProofType,
    pub is_completed: bool,
}

impl Goal {
    /// Build a new, not yet completed goal with a fresh id.
    pub fn build(owner: UserId, title: GoalTitle, proof_type: ProofType) -> Self {
        Self {
            id: GoalId::new(),
            user_id: owner,
            title: title.0,
            proof_type,
            is_completed: false,
        }
    }
}

use serde::{Deserialize, Serialize};

use super::id_macro::impl_id;

/// Client-generated goal identifier (UUID v4).
///
/// Goals get their id before they are sent to the backend, so a fresh value
/// is produced for every [`GoalId::new`] call and never reused.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GoalId(String);

impl_id!(GoalId);

impl GoalId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}

impl Default for GoalId {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn new_ids_are_pairwise_distinct() {
        let ids: HashSet<GoalId> = (0..1000).map(|_| GoalId::new()).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn new_id_is_a_uuid() {
        let id = GoalId::new();
        assert!(uuid::Uuid::parse_str(id.as_str()).is_ok());
    }
}

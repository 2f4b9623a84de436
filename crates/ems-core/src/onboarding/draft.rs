//! Data collected while the wizard is open.

use std::collections::BTreeSet;

use crate::goal::Goal;
use crate::ids::GoalId;
use crate::profile::ProfilePatch;

/// Profile fields editable on the first wizard step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileFields {
    pub full_name: Option<String>,
    pub username: Option<String>,
    pub avatar_url: Option<String>,
}

impl ProfileFields {
    /// Patch carrying the non-blank fields, or `None` when nothing was entered.
    pub fn to_patch(&self) -> Option<ProfilePatch> {
        fn non_blank(value: &Option<String>) -> Option<String> {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        }

        let patch = ProfilePatch {
            full_name: non_blank(&self.full_name),
            username: non_blank(&self.username),
            avatar_url: non_blank(&self.avatar_url),
            is_onboarded: None,
        };
        (!patch.is_empty()).then_some(patch)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OnboardingDraft {
    pub profile: ProfileFields,
    pub goals: Vec<Goal>,
    pub selected_apps: BTreeSet<String>,
}

impl OnboardingDraft {
    pub fn add_goal(&mut self, goal: Goal) {
        self.goals.push(goal);
    }

    /// Returns `true` if a goal was removed.
    pub fn remove_goal(&mut self, id: &GoalId) -> bool {
        let before = self.goals.len();
        self.goals.retain(|g| &g.id != id);
        self.goals.len() != before
    }

    /// Toggle an app in the monitored set. Returns whether it is now selected.
    pub fn toggle_app(&mut self, app: impl Into<String>) -> bool {
        let app = app.into();
        if self.selected_apps.remove(&app) {
            false
        } else {
            self.selected_apps.insert(app);
            true
        }
    }
}

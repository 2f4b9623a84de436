//! Onboarding wizard state machine.

use serde::Serialize;

/// Wizard step, indexed 0..=2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OnboardingStep {
    /// Name, username, avatar.
    #[default]
    Profile,
    /// Initial goals.
    Goals,
    /// Apps to monitor.
    Apps,
}

impl OnboardingStep {
    pub const LAST: OnboardingStep = OnboardingStep::Apps;

    pub fn index(self) -> usize {
        match self {
            Self::Profile => 0,
            Self::Goals => 1,
            Self::Apps => 2,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Profile),
            1 => Some(Self::Goals),
            2 => Some(Self::Apps),
            _ => None,
        }
    }

    fn next(self) -> Option<Self> {
        Self::from_index(self.index() + 1)
    }

    fn previous(self) -> Option<Self> {
        self.index().checked_sub(1).and_then(Self::from_index)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnboardingEvent {
    Next,
    Back,
    Finish,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnboardingAction {
    /// Persist the collected data and complete onboarding.
    Commit,
}

/// Pure wizard state machine. Navigation is never blocked by validation.
pub struct OnboardingWizard;

impl OnboardingWizard {
    pub fn transition(
        step: OnboardingStep,
        event: OnboardingEvent,
    ) -> (OnboardingStep, Vec<OnboardingAction>) {
        match event {
            OnboardingEvent::Next => match step.next() {
                Some(next) => (next, Vec::new()),
                None => (step, vec![OnboardingAction::Commit]),
            },
            OnboardingEvent::Back => (step.previous().unwrap_or(step), Vec::new()),
            OnboardingEvent::Finish if step == OnboardingStep::LAST => {
                (step, vec![OnboardingAction::Commit])
            }
            OnboardingEvent::Finish => (step, Vec::new()),
        }
    }
}

// libs/appointment-cell/src/services/lifecycle.rs
use tracing::{debug, warn};

use crate::models::{WizardAction, WizardError, WizardStep};

/// Transition table of the booking wizard.
///
/// Only says where an action leads; step guards live in the wizard itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct WizardLifecycleService;

impl WizardLifecycleService {
    pub fn new() -> Self {
        Self
    }

    /// Target step for `action`, or `InvalidTransition` if the step has no such edge.
    pub fn resolve(&self, current: WizardStep, action: WizardAction) -> Result<WizardStep, WizardError> {
        debug!("Resolving {:?} from {:?}", action, current);

        self.get_valid_transitions(current)
            .into_iter()
            .find(|(candidate, _)| *candidate == action)
            .map(|(_, target)| target)
            .ok_or_else(|| {
                warn!("Invalid wizard transition attempted: {:?} from {:?}", action, current);
                WizardError::InvalidTransition { from: current, action }
            })
    }

    pub fn get_valid_transitions(&self, current: WizardStep) -> Vec<(WizardAction, WizardStep)> {
        match current {
            WizardStep::SelectingProviderAndProcedure => vec![
                (WizardAction::Next, WizardStep::SelectingDateTime),
            ],
            WizardStep::SelectingDateTime => vec![
                (WizardAction::Next, WizardStep::Confirming),
                (WizardAction::Back, WizardStep::SelectingProviderAndProcedure),
            ],
            WizardStep::Confirming => vec![
                (WizardAction::Next, WizardStep::Completed),
                (WizardAction::Back, WizardStep::SelectingDateTime),
            ],
            // Terminal until explicitly reset
            WizardStep::Completed => vec![
                (WizardAction::Reset, WizardStep::SelectingProviderAndProcedure),
            ],
        }
    }

    pub fn can(&self, current: WizardStep, action: WizardAction) -> bool {
        self.get_valid_transitions(current)
            .iter()
            .any(|(candidate, _)| *candidate == action)
    }
}

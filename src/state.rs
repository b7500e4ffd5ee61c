use crate::intent::Intent;

/// Where an administrator is within the add/delete flows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConversationState {
    #[default]
    Idle,
    AwaitingTestData,
    AwaitingDeleteId,
}

impl ConversationState {
    /// State after `intent` has been handled. Completed flows always land in `Idle`,
    /// whether they succeeded or not.
    pub fn next(self, intent: &Intent) -> Self {
        match intent {
            Intent::BeginAdd => ConversationState::AwaitingTestData,
            Intent::BeginDelete => ConversationState::AwaitingDeleteId,
            Intent::SubmitTestData(_) | Intent::SubmitDeleteId(_) | Intent::Cancel => {
                ConversationState::Idle
            }
            Intent::Start
            | Intent::Help
            | Intent::ListAll
            | Intent::AdminUnknown
            | Intent::Forbidden
            | Intent::SolveInstructions
            | Intent::Grade { .. }
            | Intent::UserUnknown
            | Intent::Fallback => self,
        }
    }
}

use teloxide::utils::command::BotCommands;

use crate::{
    auth::Role,
    commands::Command,
    keyboard::{ADD_TEST, DELETE_TEST, LIST_TESTS, SOLVE_TEST},
    state::ConversationState,
};

/// What an incoming message asks for, given who sent it and where their conversation is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Start,
    Cancel,
    Help,
    BeginAdd,
    BeginDelete,
    SubmitTestData(String),
    ListAll,
    SubmitDeleteId(String),
    AdminUnknown,
    /// A user pressed an admin-only button.
    Forbidden,
    SolveInstructions,
    Grade { test_id: String, answers: String },
    UserUnknown,
    Fallback,
}

impl Intent {
    /// Rules are tried in order and the first one that applies wins.
    pub fn classify(
        role: Role,
        state: ConversationState,
        text: Option<&str>,
        bot_username: &str,
    ) -> Self {
        let Some(text) = text.map(str::trim) else {
            return Intent::Fallback;
        };

        match Command::parse(text, bot_username) {
            Ok(Command::Start) => return Intent::Start,
            Ok(Command::Cancel) => return Intent::Cancel,
            Ok(Command::Help) => return Intent::Help,
            Err(_) => {}
        }

        match role {
            Role::Admin => match (text, state) {
                (ADD_TEST, _) => Intent::BeginAdd,
                (DELETE_TEST, _) => Intent::BeginDelete,
                (_, ConversationState::AwaitingTestData) => Intent::SubmitTestData(text.to_owned()),
                (LIST_TESTS, _) => Intent::ListAll,
                (_, ConversationState::AwaitingDeleteId) => Intent::SubmitDeleteId(text.to_owned()),
                _ => Intent::AdminUnknown,
            },
            Role::User => match text {
                SOLVE_TEST => Intent::SolveInstructions,
                ADD_TEST | DELETE_TEST | LIST_TESTS => Intent::Forbidden,
                _ => match text.split_once(':') {
                    Some((test_id, answers)) => Intent::Grade {
                        test_id: test_id.trim().to_owned(),
                        answers: answers.trim().to_owned(),
                    },
                    None => Intent::UserUnknown,
                },
            },
        }
    }
}

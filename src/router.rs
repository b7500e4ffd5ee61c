use std::sync::Arc;

use teloxide::{
    dispatching::dialogue::{Dialogue, Storage},
    types::ChatId,
};
use tracing::instrument;

use crate::{
    auth::{Authorize, Role},
    database::connection::{DeleteAnswerKey, RetreiveAnswerKey, StoreAnswerKey},
    error::TestDataError,
    grader,
    intent::Intent,
    keyboard::Keyboard,
    messages,
    state::ConversationState,
    BoxedError,
};

#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub text: String,
    pub keyboard: Option<Keyboard>,
    pub photo: Option<String>,
}

impl Reply {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            keyboard: None,
            photo: None,
        }
    }

    pub fn with_keyboard(mut self, keyboard: Keyboard) -> Self {
        self.keyboard = Some(keyboard);
        self
    }

    pub fn with_photo(mut self, photo: Option<String>) -> Self {
        self.photo = photo;
        self
    }
}

/// Splits admin input `id:answers` on the first colon.
pub fn parse_test_data(text: &str) -> Result<(&str, &str), TestDataError> {
    let (test_id, answers) = text.split_once(':').ok_or(TestDataError::MissingSeparator)?;
    let (test_id, answers) = (test_id.trim(), answers.trim());

    if test_id.is_empty() {
        return Err(TestDataError::EmptyId);
    }
    if answers.is_empty() {
        return Err(TestDataError::EmptyAnswers);
    }

    Ok((test_id, answers))
}

/// Turns incoming text into a reply, keeping each sender's conversation state in `states`.
pub struct QuizRouter<Keys, Auth, States: ?Sized> {
    keys: Arc<Keys>,
    auth: Auth,
    states: Arc<States>,
    bot_username: String,
    welcome_photo: Option<String>,
}

impl<Keys, Auth, States> QuizRouter<Keys, Auth, States>
where
    Keys: StoreAnswerKey + RetreiveAnswerKey + DeleteAnswerKey + Send + Sync,
    Auth: Authorize,
    States: Storage<ConversationState> + Send + Sync + ?Sized,
    States::Error: std::error::Error + Send + Sync + 'static,
{
    pub fn new(keys: Arc<Keys>, auth: Auth, states: Arc<States>) -> Self {
        Self {
            keys,
            auth,
            states,
            bot_username: String::new(),
            welcome_photo: None,
        }
    }

    pub fn with_bot_username(mut self, bot_username: impl Into<String>) -> Self {
        self.bot_username = bot_username.into();
        self
    }

    pub fn with_welcome_photo(mut self, welcome_photo: Option<String>) -> Self {
        self.welcome_photo = welcome_photo;
        self
    }

    #[instrument(level = "info", skip(self))]
    pub async fn respond(&self, sender: i64, text: Option<&str>) -> Reply {
        let role = self.auth.role_of(sender);
        match self.handle(sender, role, text).await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::error!("Failed to handle message from {}: {:?}", sender, e);
                Reply::new(messages::APOLOGY).with_keyboard(Keyboard::for_role(role))
            }
        }
    }

    async fn handle(
        &self,
        sender: i64,
        role: Role,
        text: Option<&str>,
    ) -> Result<Reply, BoxedError> {
        let dialogue =
            Dialogue::<ConversationState, States>::new(self.states.clone(), ChatId(sender));
        let state = dialogue.get_or_default().await?;

        let intent = Intent::classify(role, state, text, &self.bot_username);
        tracing::debug!("{}: {:?} in state {:?}", sender, intent, state);

        // state is stored before any key is written so a failed state write changes nothing
        let next = state.next(&intent);
        if next != state {
            tracing::debug!("{}: {:?} -> {:?}", sender, state, next);
            dialogue.update(next).await?;
        }

        Ok(self.execute(role, intent).await)
    }

    async fn execute(&self, role: Role, intent: Intent) -> Reply {
        let keyboard = Keyboard::for_role(role);

        match intent {
            Intent::Start => Reply::new(messages::welcome(role))
                .with_keyboard(keyboard)
                .with_photo(self.welcome_photo.clone()),
            Intent::Cancel => Reply::new(messages::CANCELLED).with_keyboard(keyboard),
            Intent::Help => Reply::new(messages::help(role)).with_keyboard(keyboard),
            Intent::BeginAdd => {
                Reply::new(messages::ASK_TEST_DATA).with_keyboard(Keyboard::Remove)
            }
            Intent::BeginDelete => {
                Reply::new(messages::ASK_DELETE_ID).with_keyboard(Keyboard::Remove)
            }
            Intent::SubmitTestData(text) => self.save_test(&text).await.with_keyboard(keyboard),
            Intent::ListAll => {
                let records = self.keys.list_all().await;
                Reply::new(messages::all_tests(&records)).with_keyboard(keyboard)
            }
            Intent::SubmitDeleteId(test_id) => {
                self.delete_test(&test_id).await.with_keyboard(keyboard)
            }
            Intent::AdminUnknown => {
                Reply::new(messages::admin_invalid_command()).with_keyboard(keyboard)
            }
            Intent::Forbidden => Reply::new(messages::NOT_ADMIN).with_keyboard(keyboard),
            Intent::SolveInstructions => {
                Reply::new(messages::SOLVE_INSTRUCTIONS).with_keyboard(keyboard)
            }
            Intent::Grade { test_id, answers } => {
                self.grade(&test_id, &answers).await.with_keyboard(keyboard)
            }
            Intent::UserUnknown => {
                Reply::new(messages::user_invalid_command()).with_keyboard(keyboard)
            }
            Intent::Fallback => Reply::new(messages::hint(role)).with_keyboard(keyboard),
        }
    }

    async fn save_test(&self, text: &str) -> Reply {
        let (test_id, answers) = match parse_test_data(text) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::info!("Rejected test data '{}': {}", text, e);
                return Reply::new(messages::invalid_test_data(&e));
            }
        };

        match self.keys.insert_if_absent(test_id, answers).await {
            Ok(true) => {
                tracing::info!("Test '{}' saved", test_id);
                Reply::new(messages::test_saved(test_id))
            }
            Ok(false) => {
                tracing::info!("Test '{}' already exists", test_id);
                Reply::new(messages::DUPLICATE_TEST)
            }
            Err(_) => Reply::new(messages::SAVE_FAILED),
        }
    }

    async fn delete_test(&self, test_id: &str) -> Reply {
        match self.keys.delete(test_id).await {
            Ok(true) => {
                tracing::info!("Test '{}' deleted", test_id);
                Reply::new(messages::test_deleted(test_id))
            }
            Ok(false) => Reply::new(messages::NO_SUCH_ID),
            Err(_) => Reply::new(messages::DELETE_FAILED),
        }
    }

    async fn grade(&self, test_id: &str, answers: &str) -> Reply {
        let Some(key) = self.keys.get(test_id).await else {
            tracing::info!("Test '{}' not found", test_id);
            return Reply::new(messages::TEST_NOT_FOUND);
        };

        match grader::grade(answers, &key) {
            Ok(result) => {
                tracing::info!(
                    "Test '{}' graded: {}/{}",
                    test_id,
                    result.correct(),
                    result.total()
                );
                Reply::new(messages::grade_report(test_id, &result))
            }
            Err(e) => {
                tracing::info!("Test '{}' rejected: {}", test_id, e);
                Reply::new(messages::wrong_answer_count(&e))
            }
        }
    }
}

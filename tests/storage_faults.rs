use std::{future::Future, io, pin::Pin, sync::Arc};

use answerkeybot::{
    auth::SingleAdmin,
    database::{
        answer_key::AnswerKeyRecord,
        connection::{Connection, DeleteAnswerKey, RetreiveAnswerKey, StoreAnswerKey},
    },
    error::StoreError,
    keyboard::{Keyboard, ADD_TEST, LIST_TESTS},
    router::QuizRouter,
    state::ConversationState,
};
use teloxide::{
    dispatching::dialogue::{Dialogue, InMemStorage, Storage},
    types::ChatId,
};

const ADMIN: i64 = 1000;
const USER: i64 = 2000;

/// Every query fails the way a lost database would.
struct BrokenKeys;

impl StoreAnswerKey for BrokenKeys {
    async fn put(&self, _test_id: &str, _answers: &str) -> Result<(), StoreError> {
        Err(sqlx::Error::PoolClosed.into())
    }

    async fn insert_if_absent(&self, _test_id: &str, _answers: &str) -> Result<bool, StoreError> {
        Err(sqlx::Error::PoolClosed.into())
    }
}

impl RetreiveAnswerKey for BrokenKeys {
    async fn get(&self, _test_id: &str) -> Option<String> {
        None
    }

    async fn list_all(&self) -> Vec<AnswerKeyRecord> {
        Vec::new()
    }
}

impl DeleteAnswerKey for BrokenKeys {
    async fn delete(&self, _test_id: &str) -> Result<bool, StoreError> {
        Err(sqlx::Error::PoolClosed.into())
    }
}

type StorageFuture<T> = Pin<Box<dyn Future<Output = Result<T, io::Error>> + Send>>;

/// Dialogue storage that can read `stored` (unless `fail_reads`) but never write.
struct ReadOnlyStates {
    stored: ConversationState,
    fail_reads: bool,
}

impl Storage<ConversationState> for ReadOnlyStates {
    type Error = io::Error;

    fn remove_dialogue(self: Arc<Self>, _chat_id: ChatId) -> StorageFuture<()> {
        Box::pin(async { Err(io::Error::other("state storage is read-only")) })
    }

    fn update_dialogue(
        self: Arc<Self>,
        _chat_id: ChatId,
        _dialogue: ConversationState,
    ) -> StorageFuture<()> {
        Box::pin(async { Err(io::Error::other("state storage is read-only")) })
    }

    fn get_dialogue(self: Arc<Self>, _chat_id: ChatId) -> StorageFuture<Option<ConversationState>> {
        Box::pin(async move {
            if self.fail_reads {
                Err(io::Error::other("state storage is down"))
            } else {
                Ok(Some(self.stored))
            }
        })
    }
}

async fn state_of(states: &Arc<InMemStorage<ConversationState>>, sender: i64) -> ConversationState {
    Dialogue::<ConversationState, _>::new(states.clone(), ChatId(sender))
        .get_or_default()
        .await
        .unwrap()
}

async fn set_state(
    states: &Arc<InMemStorage<ConversationState>>,
    sender: i64,
    state: ConversationState,
) {
    Dialogue::<ConversationState, _>::new(states.clone(), ChatId(sender))
        .update(state)
        .await
        .unwrap();
}

#[tokio::test]
async fn failed_writes_are_reported_and_flows_reset() {
    let states = InMemStorage::<ConversationState>::new();
    let router = QuizRouter::new(Arc::new(BrokenKeys), SingleAdmin::new(Some(ADMIN)), states.clone());

    router.respond(ADMIN, Some(ADD_TEST)).await;
    let reply = router.respond(ADMIN, Some("q1:ABCD")).await;
    assert!(reply.text.contains("Failed to save"), "{reply:?}");
    assert_eq!(reply.keyboard, Some(Keyboard::Admin));
    assert_eq!(state_of(&states, ADMIN).await, ConversationState::Idle);

    set_state(&states, ADMIN, ConversationState::AwaitingDeleteId).await;
    let reply = router.respond(ADMIN, Some("q1")).await;
    assert!(reply.text.contains("Failed to delete"), "{reply:?}");
    assert_eq!(state_of(&states, ADMIN).await, ConversationState::Idle);
}

#[tokio::test]
async fn failed_reads_look_like_missing_data() {
    let states = InMemStorage::<ConversationState>::new();
    let router = QuizRouter::new(Arc::new(BrokenKeys), SingleAdmin::new(Some(ADMIN)), states);

    let reply = router.respond(USER, Some("q1:ABCD")).await;
    assert!(reply.text.contains("Test not found"), "{reply:?}");

    let reply = router.respond(ADMIN, Some(LIST_TESTS)).await;
    assert!(reply.text.contains("no tests yet"), "{reply:?}");
}

#[tokio::test]
async fn unreadable_state_gets_an_apology() {
    let keys = Arc::new(Connection::in_memory().await.unwrap());
    let states = Arc::new(ReadOnlyStates {
        stored: ConversationState::Idle,
        fail_reads: true,
    });
    let router = QuizRouter::new(keys, SingleAdmin::new(Some(ADMIN)), states);

    let reply = router.respond(USER, Some("q1:ABCD")).await;
    assert!(reply.text.contains("something went wrong"), "{reply:?}");
    assert_eq!(reply.keyboard, Some(Keyboard::User));
}

#[tokio::test]
async fn unwritable_state_leaves_keys_untouched() {
    let keys = Arc::new(Connection::in_memory().await.unwrap());
    let states = Arc::new(ReadOnlyStates {
        stored: ConversationState::AwaitingTestData,
        fail_reads: false,
    });
    let router = QuizRouter::new(keys.clone(), SingleAdmin::new(Some(ADMIN)), states);

    let reply = router.respond(ADMIN, Some("q1:ABCD")).await;
    assert!(reply.text.contains("something went wrong"), "{reply:?}");
    assert_eq!(reply.keyboard, Some(Keyboard::Admin));
    assert_eq!(keys.get("q1").await, None);
}

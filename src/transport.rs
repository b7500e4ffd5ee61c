use std::sync::Arc;

use teloxide::{
    dispatching::{dialogue::InMemStorage, UpdateFilterExt, UpdateHandler},
    payloads::{SendMessageSetters, SendPhotoSetters},
    prelude::Requester,
    types::{ChatId, InputFile, Message, Update},
    Bot,
};
use tracing::instrument;
use url::Url;

use crate::{
    auth::SingleAdmin,
    database::connection::Connection,
    keyboard,
    router::{QuizRouter, Reply},
    state::ConversationState,
    messages, BoxedError, HandlerResult,
};

/// Telegram rejects longer message texts.
const MAX_MESSAGE_CHARS: usize = 4096;

pub type BotRouter = QuizRouter<Connection, SingleAdmin, InMemStorage<ConversationState>>;

pub fn schema() -> UpdateHandler<BoxedError> {
    Update::filter_message().endpoint(handle_message)
}

#[instrument(level = "info", skip(bot, msg, router), fields(chat_id = %msg.chat.id))]
async fn handle_message(bot: Bot, msg: Message, router: Arc<BotRouter>) -> HandlerResult {
    let reply = router.respond(msg.chat.id.0, msg.text()).await;
    deliver(&bot, msg.chat.id, reply).await
}

/// Sends exactly one message for `reply`.
async fn deliver(bot: &Bot, chat_id: ChatId, reply: Reply) -> HandlerResult {
    let markup = reply.keyboard.map(keyboard::markup);

    if let Some(photo) = &reply.photo {
        let mut request = bot.send_photo(chat_id, photo_file(photo)).caption(&reply.text);
        if let Some(markup) = markup.clone() {
            request = request.reply_markup(markup);
        }
        match request.await {
            Ok(_) => return Ok(()),
            Err(e) => tracing::warn!("Failed to send photo '{}': {}", photo, e),
        }
    }

    let mut request = bot.send_message(chat_id, fit_message(&reply.text));
    if let Some(markup) = markup.clone() {
        request = request.reply_markup(markup);
    }
    if let Err(e) = request.await {
        tracing::warn!("Failed to send reply to {}: {}", chat_id, e);

        let mut request = bot.send_message(chat_id, messages::APOLOGY);
        if let Some(markup) = markup {
            request = request.reply_markup(markup);
        }
        request.await?;
    }

    Ok(())
}

/// Cuts `text` at the last line break that keeps it within one Telegram message.
fn fit_message(text: &str) -> String {
    if text.chars().count() <= MAX_MESSAGE_CHARS {
        return text.to_owned();
    }

    // one char is left for the ellipsis
    let head: String = text.chars().take(MAX_MESSAGE_CHARS - 1).collect();
    let cut = head.rfind('\n').map_or(head.as_str(), |end| &head[..end]);
    format!("{cut}…")
}

fn photo_file(photo: &str) -> InputFile {
    match photo.parse::<Url>() {
        Ok(url) => InputFile::url(url),
        Err(_) => InputFile::file(photo),
    }
}

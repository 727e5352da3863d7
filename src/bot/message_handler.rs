//! Message Handler module for processing incoming Telegram messages

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::types::InputFile;
use tracing::{debug, error, info};

// Import localization
use crate::localization::t_lang;

use crate::session_store::{InMemSessionStore, SessionStore, UserId};

// Import dialogue manager and UI builder
use super::dialogue_manager::SessionMachine;
use super::ui_builder::{keyboard_markup, render_action, Keyboard, Outbound};

/// Outbound side of the chat transport
#[async_trait]
pub trait MessageChannel: Send + Sync {
    async fn send_text(&self, user: UserId, text: &str, keyboard: Keyboard) -> Result<()>;

    async fn send_document(
        &self,
        user: UserId,
        contents: Vec<u8>,
        filename: &str,
        caption: &str,
    ) -> Result<()>;
}

/// Telegram Bot API channel
pub struct TelegramChannel {
    bot: Bot,
}

impl TelegramChannel {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl MessageChannel for TelegramChannel {
    async fn send_text(&self, user: UserId, text: &str, keyboard: Keyboard) -> Result<()> {
        let request = self.bot.send_message(ChatId(user), text);
        match keyboard_markup(keyboard) {
            Some(markup) => request.reply_markup(markup).await?,
            None => request.await?,
        };
        Ok(())
    }

    async fn send_document(
        &self,
        user: UserId,
        contents: Vec<u8>,
        filename: &str,
        caption: &str,
    ) -> Result<()> {
        let file = InputFile::memory(contents).file_name(filename.to_string());
        self.bot
            .send_document(ChatId(user), file)
            .caption(caption)
            .await?;
        Ok(())
    }
}

/// Run one inbound text through the session machine and deliver the result.
///
/// A message the channel rejects is logged and reported to the user as a
/// warning, then delivery continues with the next message. Nothing is
/// retried; the session was already cleared by the terminal step.
pub async fn process_text<C, S>(
    channel: &C,
    machine: &SessionMachine<S>,
    user: UserId,
    text: &str,
    language_code: Option<&str>,
) -> Result<()>
where
    C: MessageChannel + ?Sized,
    S: SessionStore,
{
    let action = machine.handle(user, text).await;
    debug!(user_id = %user, action = action.name(), "Dialogue action");

    for outbound in render_action(&action, machine.config(), language_code) {
        match outbound {
            Outbound::Text { text, keyboard } => {
                if let Err(e) = channel.send_text(user, &text, keyboard).await {
                    error!(
                        user_id = %user,
                        chars = text.chars().count(),
                        error = %e,
                        "Failed to deliver message"
                    );
                    send_warning(channel, user, "warning-message-failed", language_code).await;
                }
            }
            Outbound::Document {
                filename,
                contents,
                caption,
            } => {
                let size = contents.len();
                match channel
                    .send_document(user, contents, &filename, &caption)
                    .await
                {
                    Ok(()) => info!(
                        user_id = %user,
                        filename = %filename,
                        bytes = size,
                        "Document delivered"
                    ),
                    Err(e) => {
                        error!(
                            user_id = %user,
                            filename = %filename,
                            error = %e,
                            "Failed to deliver document"
                        );
                        send_warning(channel, user, "warning-delivery-failed", language_code).await;
                    }
                }
            }
        }
    }

    Ok(())
}

async fn send_warning<C: MessageChannel + ?Sized>(
    channel: &C,
    user: UserId,
    key: &str,
    language_code: Option<&str>,
) {
    if let Err(e) = channel
        .send_text(user, &t_lang(key, language_code), Keyboard::MainMenu)
        .await
    {
        error!(user_id = %user, error = %e, "Failed to deliver warning");
    }
}

async fn handle_unsupported_message<C: MessageChannel + ?Sized>(
    channel: &C,
    user: UserId,
    language_code: Option<&str>,
) -> Result<()> {
    debug!(user_id = %user, "Received unsupported message type from user");
    channel
        .send_text(
            user,
            &t_lang("unsupported-message", language_code),
            Keyboard::MainMenu,
        )
        .await
}

pub async fn message_handler(
    bot: Bot,
    msg: Message,
    machine: Arc<SessionMachine<InMemSessionStore>>,
) -> Result<()> {
    // Extract user's language code from Telegram
    let language_code = msg
        .from
        .as_ref()
        .and_then(|user| user.language_code.as_ref())
        .map(|s| s.as_str());

    let channel = TelegramChannel::new(bot);
    let user = msg.chat.id.0;

    match msg.text() {
        Some(text) => {
            debug!(user_id = %user, "Received text message from user");
            process_text(&channel, machine.as_ref(), user, text, language_code).await
        }
        None => handle_unsupported_message(&channel, user, language_code).await,
    }
}

// SPDX-License-Identifier: MIT
// Copyright 2026 The skybot authors

//! Telegram transport on top of `teloxide`.
//!
//! Updates arrive through the axum webhook, so only the Bot API request
//! side of teloxide is used: send/edit text with an inline keyboard,
//! answer callback queries, and upload a document.

use crate::bot::reply::{Attachment, Reply};
use crate::error::AppError;
use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup, InputFile, MessageId};
use teloxide::{ApiError, RequestError};

pub use teloxide::types::{
    CallbackQuery, MaybeInaccessibleMessage, Message, Update, UpdateKind, User as TelegramUser,
};

/// Outbound side of the chat transport.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn send_message(&self, chat_id: i64, reply: &Reply) -> Result<(), AppError>;

    /// Replace the text and keyboard of a message the bot sent earlier.
    async fn edit_message(&self, chat_id: i64, message_id: i64, reply: &Reply)
        -> Result<(), AppError>;

    /// Stop the client-side spinner on a tapped button.
    async fn answer_callback(&self, query: &CallbackQuery, text: Option<&str>)
        -> Result<(), AppError>;

    async fn send_document(
        &self,
        chat_id: i64,
        attachment: &Attachment,
        caption: &str,
    ) -> Result<(), AppError>;
}

/// Telegram Bot API client.
#[derive(Clone)]
pub struct TelegramClient {
    bot: Bot,
}

impl TelegramClient {
    pub fn new(token: String) -> Self {
        Self {
            bot: Bot::new(token),
        }
    }

    /// Point the client at another Bot API host (tests, local server).
    pub fn with_api_url(token: String, api_url: &str) -> Result<Self, AppError> {
        let url = reqwest::Url::parse(api_url)
            .map_err(|e| AppError::BadRequest(format!("Bot API url {:?}: {}", api_url, e)))?;
        Ok(Self {
            bot: Bot::new(token).set_api_url(url),
        })
    }
}

/// Map a teloxide failure, keeping Telegram's description in the message.
fn telegram_error(err: RequestError) -> AppError {
    match &err {
        RequestError::RetryAfter(after) => {
            tracing::warn!(retry_after = ?after, "Telegram rate limit hit (429)");
        }
        RequestError::Api(ApiError::BotBlocked) => {
            tracing::info!("Bot was blocked by the user");
        }
        _ => {}
    }
    AppError::Telegram(err.to_string())
}

/// Inline keyboard for a reply, or `None` when it has no buttons.
fn keyboard(reply: &Reply) -> Option<InlineKeyboardMarkup> {
    if reply.keyboard.is_empty() {
        return None;
    }
    Some(InlineKeyboardMarkup::new(reply.keyboard.iter().map(|row| {
        row.iter()
            .map(|b| InlineKeyboardButton::callback(b.label.clone(), b.data.clone()))
            .collect::<Vec<_>>()
    })))
}

#[async_trait]
impl ChatTransport for TelegramClient {
    async fn send_message(&self, chat_id: i64, reply: &Reply) -> Result<(), AppError> {
        let mut request = self.bot.send_message(ChatId(chat_id), reply.text.clone());
        if let Some(markup) = keyboard(reply) {
            request = request.reply_markup(markup);
        }
        request.await.map_err(telegram_error)?;
        Ok(())
    }

    async fn edit_message(
        &self,
        chat_id: i64,
        message_id: i64,
        reply: &Reply,
    ) -> Result<(), AppError> {
        let message_id = i32::try_from(message_id)
            .map_err(|_| AppError::BadRequest(format!("message id {}", message_id)))?;
        let mut request =
            self.bot
                .edit_message_text(ChatId(chat_id), MessageId(message_id), reply.text.clone());
        if let Some(markup) = keyboard(reply) {
            request = request.reply_markup(markup);
        }
        request.await.map_err(telegram_error)?;
        Ok(())
    }

    async fn answer_callback(
        &self,
        query: &CallbackQuery,
        text: Option<&str>,
    ) -> Result<(), AppError> {
        let mut request = self.bot.answer_callback_query(query.id.clone());
        if let Some(text) = text {
            request = request.text(text.to_string());
        }
        request.await.map_err(telegram_error)?;
        Ok(())
    }

    async fn send_document(
        &self,
        chat_id: i64,
        attachment: &Attachment,
        caption: &str,
    ) -> Result<(), AppError> {
        let document =
            InputFile::memory(attachment.content.clone()).file_name(attachment.filename.clone());
        self.bot
            .send_document(ChatId(chat_id), document)
            .caption(caption.to_string())
            .await
            .map_err(telegram_error)?;
        Ok(())
    }
}

/// Sender id as stored in user documents.
pub fn user_id(user: &TelegramUser) -> i64 {
    user.id.0 as i64
}

/// Chat and message id of the message a button was attached to.
pub fn callback_origin(query: &CallbackQuery) -> Option<(i64, i64)> {
    query
        .message
        .as_ref()
        .map(|m| (m.chat().id.0, i64::from(m.id().0)))
}

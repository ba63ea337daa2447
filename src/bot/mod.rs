// SPDX-License-Identifier: MIT
// Copyright 2026 The skybot authors

//! Chat bot core: inbound update dispatch, button flows and the rule engine.
//!
//! Nothing here keeps per-conversation state. Every multi-step flow carries
//! what it needs inside the callback token of the next button.

pub mod codec;
pub mod commands;
pub mod confirm;
pub mod flows;
pub mod format;
pub mod notify;
pub mod reply;
pub mod role;
pub mod router;
pub mod scheduler;
pub mod thresholds;

use crate::db::Store;
use crate::error::{AppError, FlowError};
use crate::models::{Location, Role, User};
use crate::services::i18n;
use crate::services::telegram::{
    self, CallbackQuery, Message, TelegramUser, Update, UpdateKind,
};
use crate::services::WeatherProvider;
use crate::time_utils::format_utc_rfc3339;
use crate::AppState;
use reply::Reply;

/// The acting user plus access to shared services.
pub struct FlowContext<'a> {
    pub state: &'a AppState,
    pub user: User,
}

impl<'a> FlowContext<'a> {
    pub fn new(state: &'a AppState, user: User) -> Self {
        Self { state, user }
    }

    /// Same services, different (usually just updated) user.
    pub fn with_user(&self, user: User) -> Self {
        Self {
            state: self.state,
            user,
        }
    }

    pub fn store(&self) -> &dyn Store {
        self.state.store.as_ref()
    }

    pub fn weather(&self) -> &dyn WeatherProvider {
        self.state.weather.as_ref()
    }

    /// Localized string in the user's language.
    pub fn t(&self, key: &str) -> String {
        i18n::t(&self.user.language, key)
    }

    /// Localized string with `{name}` placeholders filled in.
    pub fn tf(&self, key: &str, args: &[(&str, &str)]) -> String {
        i18n::tf(&self.user.language, key, args)
    }

    pub fn require_role(&self, min: Role) -> Result<(), FlowError> {
        if self.user.role >= min {
            Ok(())
        } else {
            tracing::warn!(
                user_id = self.user.id,
                role = %self.user.role,
                required = %min,
                "Permission denied"
            );
            Err(FlowError::PermissionDenied)
        }
    }

    /// The user's saved location.
    pub fn location(&self) -> Result<&Location, FlowError> {
        self.user.location.as_ref().ok_or(FlowError::LocationRequired)
    }
}

/// Current time as stored in documents.
pub(crate) fn now_rfc3339() -> String {
    format_utc_rfc3339(chrono::Utc::now())
}

/// Fetch the sender's profile, creating it on first contact.
///
/// Ids listed in `ADMIN_IDS` start as Admin. Profile fields Telegram owns
/// (username, first name) and `last_active` are refreshed every time.
pub async fn load_user(state: &AppState, from: &TelegramUser) -> Result<User, AppError> {
    let now = now_rfc3339();
    let id = telegram::user_id(from);

    let mut user = match state.store.get_user(id).await? {
        Some(user) => user,
        None => {
            let role = if state.config.is_bootstrap_admin(id) {
                Role::Admin
            } else {
                Role::User
            };
            let mut user = User::new(id, from.first_name.clone(), role, &now);
            if let Some(lang) = from.language_code.as_deref() {
                if let Some(lang) = i18n::supported(lang) {
                    user.language = lang.to_string();
                }
            }
            tracing::info!(user_id = id, role = %role, "New user registered");
            user
        }
    };

    user.username = from.username.clone();
    user.first_name = from.first_name.clone();
    user.last_active = now;
    state.store.upsert_user(&user).await?;

    Ok(user)
}

/// Handle one webhook update end to end.
pub async fn handle_update(state: &AppState, update: Update) -> Result<(), AppError> {
    match update.kind {
        UpdateKind::CallbackQuery(callback) => handle_callback_query(state, &callback).await,
        UpdateKind::Message(message) => handle_message(state, &message).await,
        _ => {
            tracing::debug!(update_id = ?update.id, "Ignoring unsupported update");
            Ok(())
        }
    }
}

async fn handle_callback_query(state: &AppState, callback: &CallbackQuery) -> Result<(), AppError> {
    // Stop the spinner first; a failure here is cosmetic.
    if let Err(e) = state.transport.answer_callback(callback, None).await {
        tracing::warn!(error = %e, "Failed to answer callback query");
    }

    let Some(data) = callback.data.as_deref() else {
        return Ok(());
    };
    let user = load_user(state, &callback.from).await?;
    let ctx = FlowContext::new(state, user);

    tracing::debug!(user_id = ctx.user.id, data, "Callback received");

    let Some(reply) = router::handle_callback(&ctx, data).await else {
        return Ok(());
    };

    match telegram::callback_origin(callback) {
        Some((chat_id, message_id)) => deliver_edit(state, chat_id, message_id, &reply).await,
        None => deliver(state, ctx.user.id, &reply).await,
    }
}

async fn handle_message(state: &AppState, message: &Message) -> Result<(), AppError> {
    let Some(from) = message.from.as_ref() else {
        return Ok(());
    };
    let user = load_user(state, from).await?;
    let ctx = FlowContext::new(state, user);

    // Venue messages carry a location too; prefer the named form.
    let result = if let Some(venue) = message.venue() {
        commands::handle_venue(
            &ctx,
            &venue.title,
            venue.location.latitude,
            venue.location.longitude,
        )
        .map(Some)
    } else if let Some(loc) = message.location() {
        commands::handle_shared_location(&ctx, loc.latitude, loc.longitude).map(Some)
    } else if let Some(text) = message.text() {
        commands::handle_text(&ctx, text).await
    } else {
        Ok(None)
    };

    let reply = match result {
        Ok(Some(reply)) => reply,
        Ok(None) => return Ok(()),
        Err(err) => router::error_reply(&ctx, &err),
    };
    deliver(state, message.chat.id.0, &reply).await
}

/// Send a reply as a new message, plus its attachment if any.
pub async fn deliver(state: &AppState, chat_id: i64, reply: &Reply) -> Result<(), AppError> {
    state.transport.send_message(chat_id, reply).await?;
    send_attachment(state, chat_id, reply).await
}

/// Replace the tapped message with the reply.
async fn deliver_edit(
    state: &AppState,
    chat_id: i64,
    message_id: i64,
    reply: &Reply,
) -> Result<(), AppError> {
    match state.transport.edit_message(chat_id, message_id, reply).await {
        Ok(()) => {}
        Err(e) if e.is_not_modified() => {
            tracing::debug!(chat_id, message_id, "Message not modified");
        }
        Err(e) => {
            // Old messages can't be edited; fall back to a fresh one.
            tracing::warn!(error = %e, chat_id, message_id, "Edit failed, sending new message");
            state.transport.send_message(chat_id, reply).await?;
        }
    }
    send_attachment(state, chat_id, reply).await
}

async fn send_attachment(state: &AppState, chat_id: i64, reply: &Reply) -> Result<(), AppError> {
    if let Some(attachment) = &reply.attachment {
        state
            .transport
            .send_document(chat_id, attachment, &attachment.filename)
            .await?;
    }
    Ok(())
}

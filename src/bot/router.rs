// SPDX-License-Identifier: MIT
// Copyright 2026 The skybot authors

//! Callback router: decoded token → flow.
//!
//! The router only knows the action segment. Sub-actions and params are
//! interpreted by the flow that owns the action.

use super::codec::{self, CallbackToken};
use super::confirm;
use super::flows::{admin, alert, export, menu, settings, subscription, weather};
use super::reply::{Button, Reply};
use super::FlowContext;
use crate::error::FlowError;
use std::str::FromStr;

/// First token segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Menu,
    Help,
    Weather,
    Settings,
    Location,
    Timezone,
    Alert,
    Role,
    Subscription,
    Admin,
    Export,
}

impl Action {
    pub fn as_str(self) -> &'static str {
        match self {
            Action::Menu => "menu",
            Action::Help => "help",
            Action::Weather => "weather",
            Action::Settings => "settings",
            Action::Location => "loc",
            Action::Timezone => "tz",
            Action::Alert => "alert",
            Action::Role => "role",
            Action::Subscription => "sub",
            Action::Admin => "admin",
            Action::Export => "export",
        }
    }
}

impl FromStr for Action {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "menu" => Action::Menu,
            "help" => Action::Help,
            "weather" => Action::Weather,
            "settings" => Action::Settings,
            "loc" => Action::Location,
            "tz" => Action::Timezone,
            "alert" => Action::Alert,
            "role" => Action::Role,
            "sub" => Action::Subscription,
            "admin" => Action::Admin,
            "export" => Action::Export,
            _ => return Err(()),
        })
    }
}

/// Dispatch a decoded token.
///
/// Unknown actions yield `Ok(None)`: stale buttons from an older bot
/// version are dropped without a reply.
pub async fn route(ctx: &FlowContext<'_>, token: &CallbackToken) -> Result<Option<Reply>, FlowError> {
    let Ok(action) = token.action.parse::<Action>() else {
        tracing::debug!(action = %token.action, "Ignoring unknown callback action");
        return Ok(None);
    };

    let reply = match action {
        Action::Menu => menu::main_menu(ctx)?,
        Action::Help => menu::help(ctx)?,
        Action::Weather => weather::handle(ctx, token).await?,
        Action::Settings => settings::handle(ctx, token).await?,
        Action::Location => confirm::handle_location(ctx, token).await?,
        Action::Timezone => confirm::handle_timezone(ctx, token).await?,
        Action::Alert => alert::handle(ctx, token).await?,
        Action::Role => confirm::handle_role(ctx, token).await?,
        Action::Subscription => subscription::handle(ctx, token).await?,
        Action::Admin => admin::handle(ctx, token).await?,
        Action::Export => export::handle(ctx, token).await?,
    };
    Ok(Some(reply))
}

/// Decode and route a raw payload, turning every failure into a reply.
pub async fn handle_callback(ctx: &FlowContext<'_>, raw: &str) -> Option<Reply> {
    let result = match codec::decode(raw) {
        Ok(token) => route(ctx, &token).await,
        Err(e) => Err(e.into()),
    };

    match result {
        Ok(reply) => reply,
        Err(err) => Some(error_reply(ctx, &err)),
    }
}

/// Localized reply for a failed flow, with a way back to the menu.
pub fn error_reply(ctx: &FlowContext<'_>, err: &FlowError) -> Reply {
    match err {
        FlowError::Upstream(e) => {
            tracing::error!(user_id = ctx.user.id, error = %e, "Flow failed upstream");
        }
        _ => {
            tracing::info!(user_id = ctx.user.id, error = %err, "Flow rejected");
        }
    }

    let text = match err {
        FlowError::LimitReached(limit) => ctx.tf(err.i18n_key(), &[("limit", &limit.to_string())]),
        _ => ctx.t(err.i18n_key()),
    };

    let mut reply = Reply::text(text);
    if let Ok(button) = Button::new(ctx.t("button.menu"), "menu", "main", &[]) {
        reply = reply.row(vec![button]);
    }
    reply
}

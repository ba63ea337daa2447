// SPDX-License-Identifier: MIT
// Copyright 2026 The skybot authors

//! JSON data exports delivered as documents.

use super::menu_button;
use crate::bot::codec::CallbackToken;
use crate::bot::format;
use crate::bot::reply::Reply;
use crate::bot::FlowContext;
use crate::error::{AppError, FlowError};
use crate::models::{AlertConfig, Role, Subscription, User};
use serde::Serialize;

/// Everything stored about one user.
#[derive(Debug, Serialize)]
pub struct UserExport {
    pub user: User,
    pub alerts: Vec<AlertConfig>,
    pub subscriptions: Vec<Subscription>,
    pub exported_at: String,
}

/// `export_mine`, `export_users` (Admin only).
pub async fn handle(ctx: &FlowContext<'_>, token: &CallbackToken) -> Result<Reply, FlowError> {
    match token.sub_action.as_str() {
        "mine" => mine(ctx).await,
        "users" => users(ctx).await,
        other => Err(FlowError::Malformed(format!("export_{}", other))),
    }
}

pub async fn mine(ctx: &FlowContext<'_>) -> Result<Reply, FlowError> {
    let now = chrono::Utc::now();
    let export = UserExport {
        user: ctx.user.clone(),
        alerts: ctx.store().list_alerts(ctx.user.id).await?,
        subscriptions: ctx.store().get_user_subscriptions(ctx.user.id).await?,
        exported_at: crate::time_utils::format_utc_rfc3339(now),
    };
    let content = to_json(&export)?;

    tracing::info!(
        user_id = ctx.user.id,
        alerts = export.alerts.len(),
        subscriptions = export.subscriptions.len(),
        "User data exported"
    );

    Ok(Reply::text(ctx.t("export.ready"))
        .row(vec![menu_button(ctx)?])
        .attach(
            format!("skybot-{}-{}.json", ctx.user.id, format::file_stamp(now)),
            content,
        ))
}

pub async fn users(ctx: &FlowContext<'_>) -> Result<Reply, FlowError> {
    ctx.require_role(Role::Admin)?;

    let now = chrono::Utc::now();
    let users = ctx.store().list_users().await?;
    let content = to_json(&users)?;

    tracing::info!(user_id = ctx.user.id, count = users.len(), "User list exported");

    Ok(Reply::text(ctx.tf(
        "export.users_ready",
        &[("count", &users.len().to_string())],
    ))
    .row(vec![menu_button(ctx)?])
    .attach(format!("skybot-users-{}.json", format::file_stamp(now)), content))
}

fn to_json<T: Serialize>(value: &T) -> Result<Vec<u8>, FlowError> {
    serde_json::to_vec_pretty(value)
        .map_err(|e| FlowError::Upstream(AppError::Internal(e.into())))
}

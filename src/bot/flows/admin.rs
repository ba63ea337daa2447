// SPDX-License-Identifier: MIT
// Copyright 2026 The skybot authors

//! Moderator tools: user list and usage statistics.

use super::{back_button, menu_button};
use crate::bot::codec::CallbackToken;
use crate::bot::format;
use crate::bot::reply::{Button, Reply};
use crate::bot::FlowContext;
use crate::error::FlowError;
use crate::models::{Role, SubscriptionType};

/// Users shown on one screen.
const USER_LIST_LIMIT: usize = 50;

/// `admin_<menu|users|stats>`. Moderator or Admin only.
pub async fn handle(ctx: &FlowContext<'_>, token: &CallbackToken) -> Result<Reply, FlowError> {
    ctx.require_role(Role::Moderator)?;

    match token.sub_action.as_str() {
        "menu" => menu(ctx),
        "users" => users(ctx).await,
        "stats" => stats(ctx).await,
        other => Err(FlowError::Malformed(format!("admin_{}", other))),
    }
}

fn menu(ctx: &FlowContext<'_>) -> Result<Reply, FlowError> {
    let mut row = vec![
        Button::new(ctx.t("button.users"), "admin", "users", &[])?,
        Button::new(ctx.t("button.stats"), "admin", "stats", &[])?,
    ];
    if ctx.user.role == Role::Admin {
        row.push(Button::new(ctx.t("button.export_users"), "export", "users", &[])?);
    }
    Ok(Reply::text(ctx.t("admin.title"))
        .row(row)
        .row(vec![menu_button(ctx)?]))
}

pub async fn users(ctx: &FlowContext<'_>) -> Result<Reply, FlowError> {
    ctx.require_role(Role::Moderator)?;

    let users = ctx.store().list_users().await?;
    let mut text = ctx.tf("admin.users_title", &[("count", &users.len().to_string())]);
    for user in users.iter().take(USER_LIST_LIMIT) {
        text.push('\n');
        text.push_str(&format::user_line(user));
    }
    if users.len() > USER_LIST_LIMIT {
        text.push('\n');
        text.push_str(&ctx.tf(
            "admin.users_more",
            &[("count", &(users.len() - USER_LIST_LIMIT).to_string())],
        ));
    }
    if ctx.user.role == Role::Admin {
        text.push_str("\n\n");
        text.push_str(&ctx.t("admin.role_hint"));
    }

    Ok(Reply::text(text).row(vec![back_button(ctx, "admin", "menu", &[])?]))
}

pub async fn stats(ctx: &FlowContext<'_>) -> Result<Reply, FlowError> {
    ctx.require_role(Role::Moderator)?;

    let users = ctx.store().list_users().await?;
    let subs = ctx.store().list_active_subscriptions().await?;

    let count_role = |role: Role| users.iter().filter(|u| u.role == role).count().to_string();
    let with_location = users.iter().filter(|u| u.location.is_some()).count();

    let mut text = ctx.tf(
        "admin.stats",
        &[
            ("users", &users.len().to_string()),
            ("admins", &count_role(Role::Admin)),
            ("moderators", &count_role(Role::Moderator)),
            ("located", &with_location.to_string()),
            ("subs", &subs.len().to_string()),
        ],
    );
    for kind in SubscriptionType::ALL {
        let n = subs.iter().filter(|s| s.kind == kind).count();
        text.push_str(&format!("\n  {}: {}", ctx.t(kind.i18n_key()), n));
    }

    Ok(Reply::text(text).row(vec![back_button(ctx, "admin", "menu", &[])?]))
}

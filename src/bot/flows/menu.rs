// SPDX-License-Identifier: MIT
// Copyright 2026 The skybot authors

//! Main menu and help.

use super::menu_button;
use crate::bot::reply::{Button, Reply};
use crate::bot::FlowContext;
use crate::error::FlowError;
use crate::models::Role;

pub fn main_menu(ctx: &FlowContext<'_>) -> Result<Reply, FlowError> {
    let mut reply = Reply::text(ctx.tf("menu.title", &[("name", &ctx.user.first_name)]))
        .row(vec![
            Button::new(ctx.t("button.weather_now"), "weather", "current", &[])?,
            Button::new(ctx.t("button.forecast"), "weather", "forecast", &[])?,
            Button::new(ctx.t("button.air"), "weather", "air", &[])?,
        ])
        .row(vec![
            Button::new(ctx.t("button.alerts"), "alert", "list", &[])?,
            Button::new(ctx.t("button.subscriptions"), "sub", "list", &[])?,
        ])
        .row(vec![
            Button::new(ctx.t("button.settings"), "settings", "menu", &[])?,
            Button::new(ctx.t("button.export"), "export", "mine", &[])?,
            Button::new(ctx.t("button.help"), "help", "show", &[])?,
        ]);

    if ctx.user.role >= Role::Moderator {
        reply = reply.row(vec![Button::new(ctx.t("button.admin"), "admin", "menu", &[])?]);
    }
    Ok(reply)
}

pub fn help(ctx: &FlowContext<'_>) -> Result<Reply, FlowError> {
    let mut text = ctx.t("help.text");
    if ctx.user.role >= Role::Moderator {
        text.push_str("\n\n");
        text.push_str(&ctx.t("help.moderator"));
    }
    if ctx.user.role == Role::Admin {
        text.push('\n');
        text.push_str(&ctx.t("help.admin"));
    }
    Ok(Reply::text(text).row(vec![menu_button(ctx)?]))
}

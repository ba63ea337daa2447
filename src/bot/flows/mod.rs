// SPDX-License-Identifier: MIT
// Copyright 2026 The skybot authors

//! One module per callback action.
//!
//! Each flow interprets its own sub-actions and params and either mutates
//! through the store or returns the next screen.

pub mod admin;
pub mod alert;
pub mod export;
pub mod menu;
pub mod settings;
pub mod subscription;
pub mod weather;

use super::reply::Button;
use super::FlowContext;
use crate::bot::codec::TokenError;

/// "Back to menu" button.
pub(crate) fn menu_button(ctx: &FlowContext<'_>) -> Result<Button, TokenError> {
    Button::new(ctx.t("button.menu"), "menu", "main", &[])
}

/// "Back" button to another screen.
pub(crate) fn back_button(
    ctx: &FlowContext<'_>,
    action: &str,
    sub_action: &str,
    params: &[&str],
) -> Result<Button, TokenError> {
    Button::new(ctx.t("button.back"), action, sub_action, params)
}

// SPDX-License-Identifier: MIT
// Copyright 2026 The skybot authors

//! Language and unit preferences.

use super::menu_button;
use crate::bot::codec::CallbackToken;
use crate::bot::format;
use crate::bot::reply::{Button, Reply};
use crate::bot::FlowContext;
use crate::error::FlowError;
use crate::models::Units;
use crate::services::i18n;

/// `settings_menu`, `settings_lang_<code>`, `settings_units_<units>`.
pub async fn handle(ctx: &FlowContext<'_>, token: &CallbackToken) -> Result<Reply, FlowError> {
    match token.sub_action.as_str() {
        "menu" => menu(ctx),
        "lang" => {
            let lang = i18n::supported(token.param(0)?)
                .ok_or_else(|| FlowError::Malformed("unsupported language".to_string()))?;
            let mut user = ctx.user.clone();
            user.language = lang.to_string();
            ctx.store().upsert_user(&user).await?;
            tracing::info!(user_id = user.id, language = lang, "Language changed");
            // Re-render in the new language.
            menu(&ctx.with_user(user))
        }
        "units" => {
            let units: Units = token.parse_param(0)?;
            let mut user = ctx.user.clone();
            user.units = units;
            ctx.store().upsert_user(&user).await?;
            tracing::info!(user_id = user.id, units = units.as_str(), "Units changed");
            menu(&ctx.with_user(user))
        }
        other => Err(FlowError::Malformed(format!("settings_{}", other))),
    }
}

pub fn menu(ctx: &FlowContext<'_>) -> Result<Reply, FlowError> {
    let lang_row = i18n::SUPPORTED_LANGUAGES
        .iter()
        .map(|code| Button::new(i18n::language_name(code), "settings", "lang", &[*code]))
        .collect::<Result<Vec<_>, _>>()?;

    let units_row = [Units::Metric, Units::Imperial]
        .into_iter()
        .map(|u| {
            Button::new(
                ctx.t(&format!("units.{}", u.as_str())),
                "settings",
                "units",
                &[u.as_str()],
            )
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut text = format::settings(&ctx.user.language, &ctx.user);
    text.push_str("\n\n");
    text.push_str(&ctx.t("settings.hint"));

    Ok(Reply::text(text)
        .row(lang_row)
        .row(units_row)
        .row(vec![menu_button(ctx)?]))
}

// SPDX-License-Identifier: MIT
// Copyright 2026 The skybot authors

//! Weather screens for the saved location.

use super::menu_button;
use crate::bot::codec::CallbackToken;
use crate::bot::format;
use crate::bot::reply::{Button, Reply};
use crate::bot::FlowContext;
use crate::error::FlowError;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Current,
    Forecast,
    Air,
}

impl View {
    pub fn as_str(self) -> &'static str {
        match self {
            View::Current => "current",
            View::Forecast => "forecast",
            View::Air => "air",
        }
    }
}

impl FromStr for View {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "current" => Ok(View::Current),
            "forecast" => Ok(View::Forecast),
            "air" => Ok(View::Air),
            _ => Err(()),
        }
    }
}

/// `weather_<current|forecast|air>`.
pub async fn handle(ctx: &FlowContext<'_>, token: &CallbackToken) -> Result<Reply, FlowError> {
    let view = token
        .sub_action
        .parse()
        .map_err(|_| FlowError::Malformed(format!("weather_{}", token.sub_action)))?;
    show(ctx, view).await
}

pub async fn show(ctx: &FlowContext<'_>, view: View) -> Result<Reply, FlowError> {
    let location = ctx.location()?;
    let lang = ctx.user.language.as_str();

    tracing::debug!(user_id = ctx.user.id, view = view.as_str(), "Fetching weather");

    let text = match view {
        View::Current => {
            let current = ctx
                .weather()
                .current(location.lat, location.lon, lang)
                .await?;
            format::current(lang, &ctx.user, &location.name, &current)
        }
        View::Forecast => {
            let entries = ctx
                .weather()
                .forecast(location.lat, location.lon, lang)
                .await?;
            format::short_forecast(lang, &ctx.user, &location.name, &entries)
        }
        View::Air => {
            let air = ctx.weather().air_quality(location.lat, location.lon).await?;
            format::air_quality(lang, &location.name, &air)
        }
    };

    let others = [View::Current, View::Forecast, View::Air]
        .into_iter()
        .filter(|v| *v != view)
        .map(|v| Button::new(ctx.t(button_key(v)), "weather", v.as_str(), &[]))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Reply::text(text)
        .row(vec![Button::new(
            ctx.t("button.refresh"),
            "weather",
            view.as_str(),
            &[],
        )?])
        .row(others)
        .row(vec![menu_button(ctx)?]))
}

fn button_key(view: View) -> &'static str {
    match view {
        View::Current => "button.weather_now",
        View::Forecast => "button.forecast",
        View::Air => "button.air",
    }
}

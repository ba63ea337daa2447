// SPDX-License-Identifier: MIT
// Copyright 2026 The skybot authors

//! Alert management: list, create, edit threshold and operator, toggle, delete.

use super::{back_button, menu_button};
use crate::bot::codec::CallbackToken;
use crate::bot::format;
use crate::bot::reply::{grid, Button, Reply};
use crate::bot::thresholds;
use crate::bot::FlowContext;
use crate::error::FlowError;
use crate::models::alert::format_value;
use crate::models::{AlertConfig, AlertType, Operator};
use uuid::Uuid;

const PICKER_COLUMNS: usize = 4;

/// `alert_<sub>_…`
pub async fn handle(ctx: &FlowContext<'_>, token: &CallbackToken) -> Result<Reply, FlowError> {
    match token.sub_action.as_str() {
        "list" => list(ctx).await,
        "new" => match token.opt_param(0) {
            None => type_picker(ctx),
            Some(tag) => create(ctx, tag).await,
        },
        "view" => {
            let alert = load(ctx, token).await?;
            view(ctx, &alert, None)
        }
        "edit" => {
            let alert = load(ctx, token).await?;
            threshold_picker(ctx, &alert)
        }
        "set" => {
            let mut alert = load(ctx, token).await?;
            let value: f64 = token.parse_param(1)?;
            if !value.is_finite() {
                return Err(FlowError::Malformed(format!("threshold {}", value)));
            }
            alert.condition.value = value;
            save(ctx, &alert, "Alert threshold changed").await?;
            view(ctx, &alert, Some("alert.updated"))
        }
        "op" => {
            let mut alert = load(ctx, token).await?;
            match token.opt_param(1) {
                None => operator_picker(ctx, &alert),
                Some(raw) => {
                    let operator: Operator = raw
                        .parse()
                        .map_err(|_| FlowError::Malformed(format!("operator {:?}", raw)))?;
                    alert.condition.operator = operator;
                    save(ctx, &alert, "Alert operator changed").await?;
                    view(ctx, &alert, Some("alert.updated"))
                }
            }
        }
        "toggle" => {
            let mut alert = load(ctx, token).await?;
            alert.is_active = !alert.is_active;
            save(ctx, &alert, "Alert toggled").await?;
            view(ctx, &alert, None)
        }
        "delete" => {
            let alert = load(ctx, token).await?;
            ctx.store().delete_alert(ctx.user.id, alert.id).await?;
            tracing::info!(user_id = ctx.user.id, alert_id = %alert.id, "Alert deleted");
            let mut reply = list(ctx).await?;
            reply.text = format!("{}\n\n{}", ctx.t("alert.deleted"), reply.text);
            Ok(reply)
        }
        other => Err(FlowError::Malformed(format!("alert_{}", other))),
    }
}

/// The acting user's alert named by param 0.
async fn load(ctx: &FlowContext<'_>, token: &CallbackToken) -> Result<AlertConfig, FlowError> {
    let id: Uuid = token.parse_param(0)?;
    ctx.store()
        .get_alert(ctx.user.id, id)
        .await?
        .ok_or(FlowError::NotFound("alert"))
}

async fn save(ctx: &FlowContext<'_>, alert: &AlertConfig, what: &str) -> Result<(), FlowError> {
    ctx.store().upsert_alert(alert).await?;
    tracing::info!(
        user_id = ctx.user.id,
        alert_id = %alert.id,
        condition = %alert.condition,
        active = alert.is_active,
        "{}",
        what
    );
    Ok(())
}

pub async fn list(ctx: &FlowContext<'_>) -> Result<Reply, FlowError> {
    let alerts = ctx.store().list_alerts(ctx.user.id).await?;
    let lang = ctx.user.language.as_str();

    let text = if alerts.is_empty() {
        ctx.t("alert.list_empty")
    } else {
        ctx.tf(
            "alert.list_title",
            &[
                ("count", &alerts.len().to_string()),
                ("limit", &ctx.state.config.max_alerts_per_user.to_string()),
            ],
        )
    };

    let mut reply = Reply::text(text);
    for alert in &alerts {
        let icon = if alert.is_active { "🔔" } else { "🔕" };
        let id = alert.id.to_string();
        reply = reply.row(vec![Button::new(
            format!("{} {}", icon, format::alert_line(lang, alert)),
            "alert",
            "view",
            &[&id],
        )?]);
    }
    Ok(reply.row(vec![
        Button::new(ctx.t("button.add"), "alert", "new", &[])?,
        menu_button(ctx)?,
    ]))
}

fn type_picker(ctx: &FlowContext<'_>) -> Result<Reply, FlowError> {
    let buttons = AlertType::ALL
        .into_iter()
        .map(|t| Button::new(ctx.t(t.i18n_key()), "alert", "new", &[t.tag()]))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Reply::text(ctx.t("alert.pick_type"))
        .rows(grid(buttons, 2))
        .row(vec![back_button(ctx, "alert", "list", &[])?]))
}

async fn create(ctx: &FlowContext<'_>, tag: &str) -> Result<Reply, FlowError> {
    let alert_type = AlertType::from_tag(tag)
        .ok_or_else(|| FlowError::Malformed(format!("alert type {:?}", tag)))?;

    let limit = ctx.state.config.max_alerts_per_user;
    let existing = ctx.store().list_alerts(ctx.user.id).await?;
    if existing.len() >= limit {
        return Err(FlowError::LimitReached(limit));
    }

    let alert = AlertConfig::new(ctx.user.id, alert_type, &crate::bot::now_rfc3339());
    save(ctx, &alert, "Alert created").await?;
    view(ctx, &alert, Some("alert.created"))
}

fn view(
    ctx: &FlowContext<'_>,
    alert: &AlertConfig,
    banner: Option<&str>,
) -> Result<Reply, FlowError> {
    let mut text = String::new();
    if let Some(key) = banner {
        text.push_str(&ctx.t(key));
        text.push_str("\n\n");
    }
    text.push_str(&format::alert_details(&ctx.user.language, alert));

    let id = alert.id.to_string();
    let toggle_key = if alert.is_active {
        "button.pause"
    } else {
        "button.resume"
    };

    Ok(Reply::text(text)
        .row(vec![
            Button::new(ctx.t("button.threshold"), "alert", "edit", &[&id])?,
            Button::new(ctx.t("button.operator"), "alert", "op", &[&id])?,
        ])
        .row(vec![
            Button::new(ctx.t(toggle_key), "alert", "toggle", &[&id])?,
            Button::new(ctx.t("button.delete"), "alert", "delete", &[&id])?,
        ])
        .row(vec![back_button(ctx, "alert", "list", &[])?]))
}

fn threshold_picker(ctx: &FlowContext<'_>, alert: &AlertConfig) -> Result<Reply, FlowError> {
    let id = alert.id.to_string();
    let current = alert.condition.value;

    let buttons = thresholds::options(alert.alert_type, current)
        .into_iter()
        .map(|value| {
            let shown = format_value(value);
            let label = if (value - current).abs() < f64::EPSILON {
                format!("• {}", shown)
            } else {
                shown.clone()
            };
            Button::new(label, "alert", "set", &[&id, &shown])
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Reply::text(ctx.tf(
        "alert.pick_threshold",
        &[
            ("alert", &format::alert_line(&ctx.user.language, alert)),
            ("unit", alert.alert_type.unit().trim()),
        ],
    ))
    .rows(grid(buttons, PICKER_COLUMNS))
    .row(vec![back_button(ctx, "alert", "view", &[&id])?]))
}

fn operator_picker(ctx: &FlowContext<'_>, alert: &AlertConfig) -> Result<Reply, FlowError> {
    let id = alert.id.to_string();
    let buttons = Operator::ALL
        .into_iter()
        .map(|op| {
            let label = if op == alert.condition.operator {
                format!("• {}", op.symbol())
            } else {
                op.symbol().to_string()
            };
            Button::new(label, "alert", "op", &[&id, op.as_str()])
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Reply::text(ctx.t("alert.pick_operator"))
        .row(buttons)
        .row(vec![back_button(ctx, "alert", "view", &[&id])?]))
}

// SPDX-License-Identifier: MIT
// Copyright 2026 The skybot authors

//! Subscription management: list, create, time and frequency pickers, toggle, delete.

use super::{back_button, menu_button};
use crate::bot::codec::CallbackToken;
use crate::bot::format;
use crate::bot::reply::{grid, Button, Reply};
use crate::bot::FlowContext;
use crate::error::FlowError;
use crate::models::{Frequency, Subscription, SubscriptionType, TimeOfDay};
use uuid::Uuid;

/// Delivery times offered by the picker ("HHMM").
pub const TIME_CHOICES: [&str; 8] = ["0600", "0700", "0800", "0900", "1200", "1800", "2000", "2100"];

/// `sub_<sub>_…`
pub async fn handle(ctx: &FlowContext<'_>, token: &CallbackToken) -> Result<Reply, FlowError> {
    match token.sub_action.as_str() {
        "list" => list(ctx).await,
        "new" => match token.opt_param(0) {
            None => type_picker(ctx),
            Some(kind) => create(ctx, kind).await,
        },
        "view" => {
            let sub = load(ctx, token).await?;
            view(ctx, &sub, None)
        }
        "time" => {
            let mut sub = load(ctx, token).await?;
            match token.opt_param(1) {
                None => time_picker(ctx, &sub),
                Some(raw) => {
                    sub.time_of_day = TimeOfDay::from_compact(raw)
                        .map_err(|e| FlowError::Malformed(e.to_string()))?;
                    save(ctx, &sub, "Subscription time changed").await?;
                    view(ctx, &sub, Some("sub.updated"))
                }
            }
        }
        "freq" => {
            let mut sub = load(ctx, token).await?;
            match token.opt_param(1) {
                None => frequency_picker(ctx, &sub),
                Some(raw) => {
                    sub.frequency = raw
                        .parse()
                        .map_err(|_| FlowError::Malformed(format!("frequency {:?}", raw)))?;
                    save(ctx, &sub, "Subscription frequency changed").await?;
                    view(ctx, &sub, Some("sub.updated"))
                }
            }
        }
        "toggle" => {
            let mut sub = load(ctx, token).await?;
            sub.is_active = !sub.is_active;
            save(ctx, &sub, "Subscription toggled").await?;
            view(ctx, &sub, None)
        }
        "delete" => {
            let sub = load(ctx, token).await?;
            ctx.store().delete_subscription(ctx.user.id, sub.id).await?;
            tracing::info!(user_id = ctx.user.id, sub_id = %sub.id, "Subscription deleted");
            let mut reply = list(ctx).await?;
            reply.text = format!("{}\n\n{}", ctx.t("sub.deleted"), reply.text);
            Ok(reply)
        }
        other => Err(FlowError::Malformed(format!("sub_{}", other))),
    }
}

async fn load(ctx: &FlowContext<'_>, token: &CallbackToken) -> Result<Subscription, FlowError> {
    let id: Uuid = token.parse_param(0)?;
    ctx.store()
        .get_subscription(ctx.user.id, id)
        .await?
        .ok_or(FlowError::NotFound("subscription"))
}

async fn save(ctx: &FlowContext<'_>, sub: &Subscription, what: &str) -> Result<(), FlowError> {
    ctx.store().upsert_subscription(sub).await?;
    tracing::info!(
        user_id = ctx.user.id,
        sub_id = %sub.id,
        kind = sub.kind.as_str(),
        time = %sub.time_of_day,
        active = sub.is_active,
        "{}",
        what
    );
    Ok(())
}

pub async fn list(ctx: &FlowContext<'_>) -> Result<Reply, FlowError> {
    let subs = ctx.store().get_user_subscriptions(ctx.user.id).await?;
    let lang = ctx.user.language.as_str();

    let text = if subs.is_empty() {
        ctx.t("sub.list_empty")
    } else {
        ctx.tf("sub.list_title", &[("tz", &ctx.user.timezone)])
    };

    let mut reply = Reply::text(text);
    for sub in &subs {
        let icon = if sub.is_active { "✅" } else { "⏸" };
        let id = sub.id.to_string();
        reply = reply.row(vec![Button::new(
            format!("{} {}", icon, format::subscription_line(lang, sub)),
            "sub",
            "view",
            &[&id],
        )?]);
    }
    Ok(reply.row(vec![
        Button::new(ctx.t("button.add"), "sub", "new", &[])?,
        menu_button(ctx)?,
    ]))
}

fn type_picker(ctx: &FlowContext<'_>) -> Result<Reply, FlowError> {
    let buttons = SubscriptionType::ALL
        .into_iter()
        .map(|t| Button::new(ctx.t(t.i18n_key()), "sub", "new", &[t.as_str()]))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Reply::text(ctx.t("sub.pick_type"))
        .rows(grid(buttons, 2))
        .row(vec![back_button(ctx, "sub", "list", &[])?]))
}

/// One subscription per type; asking again opens the existing one.
async fn create(ctx: &FlowContext<'_>, raw: &str) -> Result<Reply, FlowError> {
    let kind: SubscriptionType = raw
        .parse()
        .map_err(|_| FlowError::Malformed(format!("subscription type {:?}", raw)))?;

    let existing = ctx.store().get_user_subscriptions(ctx.user.id).await?;
    if let Some(sub) = existing.iter().find(|s| s.kind == kind) {
        return view(ctx, sub, Some("sub.exists"));
    }

    let sub = Subscription::new(ctx.user.id, kind, &crate::bot::now_rfc3339());
    save(ctx, &sub, "Subscription created").await?;

    let banner = if ctx.user.location.is_some() {
        "sub.created"
    } else {
        "sub.created_no_location"
    };
    view(ctx, &sub, Some(banner))
}

fn view(
    ctx: &FlowContext<'_>,
    sub: &Subscription,
    banner: Option<&str>,
) -> Result<Reply, FlowError> {
    let mut text = String::new();
    if let Some(key) = banner {
        text.push_str(&ctx.t(key));
        text.push_str("\n\n");
    }
    text.push_str(&format::subscription_details(
        &ctx.user.language,
        sub,
        &ctx.user.timezone,
    ));

    let id = sub.id.to_string();
    let toggle_key = if sub.is_active {
        "button.pause"
    } else {
        "button.resume"
    };

    Ok(Reply::text(text)
        .row(vec![
            Button::new(ctx.t("button.time"), "sub", "time", &[&id])?,
            Button::new(ctx.t("button.frequency"), "sub", "freq", &[&id])?,
        ])
        .row(vec![
            Button::new(ctx.t(toggle_key), "sub", "toggle", &[&id])?,
            Button::new(ctx.t("button.delete"), "sub", "delete", &[&id])?,
        ])
        .row(vec![back_button(ctx, "sub", "list", &[])?]))
}

fn time_picker(ctx: &FlowContext<'_>, sub: &Subscription) -> Result<Reply, FlowError> {
    let id = sub.id.to_string();
    let current = sub.time_of_day.compact();

    let buttons = TIME_CHOICES
        .into_iter()
        .map(|compact| {
            let shown = format!("{}:{}", &compact[..2], &compact[2..]);
            let label = if compact == current {
                format!("• {}", shown)
            } else {
                shown
            };
            Button::new(label, "sub", "time", &[&id, compact])
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Reply::text(ctx.tf(
        "sub.pick_time",
        &[("time", &sub.time_of_day.to_string()), ("tz", &ctx.user.timezone)],
    ))
    .rows(grid(buttons, 4))
    .row(vec![back_button(ctx, "sub", "view", &[&id])?]))
}

fn frequency_picker(ctx: &FlowContext<'_>, sub: &Subscription) -> Result<Reply, FlowError> {
    let id = sub.id.to_string();
    let buttons = Frequency::ALL
        .into_iter()
        .map(|f| {
            let label = if f == sub.frequency {
                format!("• {}", ctx.t(f.i18n_key()))
            } else {
                ctx.t(f.i18n_key())
            };
            Button::new(label, "sub", "freq", &[&id, f.as_str()])
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Reply::text(ctx.t("sub.pick_frequency"))
        .rows(grid(buttons, 3))
        .row(vec![back_button(ctx, "sub", "view", &[&id])?]))
}

// SPDX-License-Identifier: MIT
// Copyright 2026 The skybot authors

//! Text commands and plain-text hand-off into confirmation proposals.

use super::confirm::{self, valid_coords, LocationCandidate};
use super::flows::{admin, alert, export, menu, settings, subscription, weather};
use super::reply::{Button, Reply};
use super::role::RoleChange;
use super::FlowContext;
use crate::error::FlowError;
use crate::models::Role;
use crate::time_utils::parse_timezone;

/// A `/command args` message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command<'a> {
    pub name: &'a str,
    pub args: &'a str,
}

/// Split `/name@bot rest` into name and trimmed argument string.
pub fn parse_command(text: &str) -> Option<Command<'_>> {
    let rest = text.trim().strip_prefix('/')?;
    let (head, args) = match rest.split_once(char::is_whitespace) {
        Some((head, args)) => (head, args.trim()),
        None => (rest, ""),
    };
    let name = head.split('@').next().unwrap_or(head);
    if name.is_empty() {
        return None;
    }
    Some(Command { name, args })
}

/// `"lat, lon"` or `"lat lon"`, in range.
pub fn parse_coordinates(text: &str) -> Option<(f64, f64)> {
    let mut parts = text
        .split(|c: char| c == ',' || c == ';' || c.is_whitespace())
        .filter(|s| !s.is_empty());
    let lat: f64 = parts.next()?.parse().ok()?;
    let lon: f64 = parts.next()?.parse().ok()?;
    if parts.next().is_some() || !valid_coords(lat, lon) {
        return None;
    }
    Some((lat, lon))
}

/// Handle a text message. `Ok(None)` means nothing to say.
pub async fn handle_text(ctx: &FlowContext<'_>, text: &str) -> Result<Option<Reply>, FlowError> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }

    let Some(command) = parse_command(text) else {
        return handle_plain_text(ctx, text).map(Some);
    };

    tracing::debug!(user_id = ctx.user.id, command = command.name, "Command received");

    let reply = match command.name {
        "start" => {
            let mut reply = menu::main_menu(ctx)?;
            reply.text = format!(
                "{}\n\n{}",
                ctx.tf("start.welcome", &[("name", &ctx.user.first_name)]),
                if ctx.user.location.is_some() {
                    ctx.t("start.ready")
                } else {
                    ctx.t("start.need_location")
                }
            );
            reply
        }
        "help" => menu::help(ctx)?,
        "menu" => menu::main_menu(ctx)?,
        "weather" => weather::show(ctx, weather::View::Current).await?,
        "forecast" => weather::show(ctx, weather::View::Forecast).await?,
        "air" => weather::show(ctx, weather::View::Air).await?,
        "location" => {
            if command.args.is_empty() {
                location_hint(ctx)?
            } else {
                confirm::propose_location(ctx, location_candidate(command.args))?
            }
        }
        "timezone" => {
            if command.args.is_empty() {
                Reply::text(ctx.tf("timezone.hint", &[("tz", &ctx.user.timezone)]))
            } else if parse_timezone(command.args).is_some() {
                confirm::propose_timezone(ctx, command.args)?
            } else {
                Reply::text(ctx.tf("timezone.invalid", &[("tz", command.args)]))
            }
        }
        "alerts" => alert::list(ctx).await?,
        "subscriptions" => subscription::list(ctx).await?,
        "settings" => settings::menu(ctx)?,
        "promote" => role_command(ctx, RoleChange::Promote, command.args).await?,
        "demote" => role_command(ctx, RoleChange::Demote, command.args).await?,
        "users" => admin::users(ctx).await?,
        "stats" => admin::stats(ctx).await?,
        "export" => export::mine(ctx).await?,
        _ => Reply::text(ctx.t("command.unknown")),
    };
    Ok(Some(reply))
}

/// A shared GPS pin.
pub fn handle_shared_location(ctx: &FlowContext<'_>, lat: f64, lon: f64) -> Result<Reply, FlowError> {
    if !valid_coords(lat, lon) {
        return Err(FlowError::Malformed(format!("coordinates {}, {}", lat, lon)));
    }
    confirm::propose_location(ctx, LocationCandidate::RawCoords { lat, lon })
}

/// A named venue picked in the client.
pub fn handle_venue(
    ctx: &FlowContext<'_>,
    title: &str,
    lat: f64,
    lon: f64,
) -> Result<Reply, FlowError> {
    if !valid_coords(lat, lon) {
        return Err(FlowError::Malformed(format!("coordinates {}, {}", lat, lon)));
    }
    let candidate = if title.trim().is_empty() {
        LocationCandidate::RawCoords { lat, lon }
    } else {
        LocationCandidate::Resolved {
            name: title.trim().to_string(),
            lat,
            lon,
        }
    };
    confirm::propose_location(ctx, candidate)
}

/// Plain text becomes a proposal: coordinates, a timezone, or a place name.
fn handle_plain_text(ctx: &FlowContext<'_>, text: &str) -> Result<Reply, FlowError> {
    if parse_coordinates(text).is_none() && looks_like_timezone(text) {
        return confirm::propose_timezone(ctx, text);
    }
    confirm::propose_location(ctx, location_candidate(text))
}

/// Only `Area/City` names and `UTC` count as timezones in plain text.
/// Legacy single-word zones ("Japan", "Singapore") are place names here.
fn looks_like_timezone(text: &str) -> bool {
    let text = text.trim();
    (text.contains('/') || text.eq_ignore_ascii_case("UTC")) && parse_timezone(text).is_some()
}

fn location_candidate(text: &str) -> LocationCandidate {
    match parse_coordinates(text) {
        Some((lat, lon)) => LocationCandidate::RawCoords { lat, lon },
        None => LocationCandidate::FreeText(text.to_string()),
    }
}

fn location_hint(ctx: &FlowContext<'_>) -> Result<Reply, FlowError> {
    let text = match &ctx.user.location {
        Some(loc) => ctx.tf("location.hint_current", &[("place", &loc.name)]),
        None => ctx.t("location.hint"),
    };
    Ok(Reply::text(text).row(vec![Button::new(
        ctx.t("button.menu"),
        "menu",
        "main",
        &[],
    )?]))
}

/// `/promote <id> [role]`, `/demote <id> [role]`.
async fn role_command(
    ctx: &FlowContext<'_>,
    change: RoleChange,
    args: &str,
) -> Result<Reply, FlowError> {
    ctx.require_role(Role::Admin)?;

    let mut parts = args.split_whitespace();
    let Some(target_id) = parts.next().and_then(|s| s.parse::<i64>().ok()) else {
        return Ok(Reply::text(ctx.t("role.usage")));
    };
    let requested = match parts.next() {
        None => None,
        Some(raw) => Some(
            parse_role(raw).ok_or_else(|| FlowError::Malformed(format!("role {:?}", raw)))?,
        ),
    };

    confirm::propose_role(ctx, target_id, change, requested).await
}

fn parse_role(raw: &str) -> Option<Role> {
    match raw.to_ascii_lowercase().as_str() {
        "user" => Some(Role::User),
        "moderator" | "mod" => Some(Role::Moderator),
        "admin" => Some(Role::Admin),
        other => other.parse::<u8>().ok().and_then(Role::from_value),
    }
}

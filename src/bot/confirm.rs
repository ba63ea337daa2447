// SPDX-License-Identifier: MIT
// Copyright 2026 The skybot authors

//! Propose → confirm/ignore dialogs for location, timezone and role changes.
//!
//! There is no session store. The proposal's confirm button carries the
//! whole candidate, and the confirm handler re-validates it before any
//! mutation. The ignore button carries nothing and mutates nothing.

use super::codec::{self, CallbackToken, TokenError};
use super::reply::{Button, Reply};
use super::role::{next_role, transition_to, RoleChange, RoleRejection};
use super::FlowContext;
use crate::error::{AppError, FlowError};
use crate::models::{Location, Role};
use crate::time_utils::parse_timezone;

const CONFIRM: &str = "confirm";
const IGNORE: &str = "ignore";

/// A location waiting for the user's confirmation.
///
/// The kind travels in the token as an explicit tag so the confirm side
/// never has to guess from the shape of the text.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationCandidate {
    /// GPS coordinates; named by reverse geocoding on confirm.
    RawCoords { lat: f64, lon: f64 },
    /// Name and coordinates already known.
    Resolved { name: String, lat: f64, lon: f64 },
    /// A place name typed by the user; geocoded on confirm.
    FreeText(String),
}

impl LocationCandidate {
    const RAW_COORDS_TAG: &'static str = "c";
    const RESOLVED_TAG: &'static str = "n";
    const FREE_TEXT_TAG: &'static str = "t";

    /// Token params, tag first.
    fn params(&self) -> Vec<String> {
        match self {
            LocationCandidate::RawCoords { lat, lon } => vec![
                Self::RAW_COORDS_TAG.to_string(),
                format_coord(*lat),
                format_coord(*lon),
            ],
            LocationCandidate::Resolved { name, lat, lon } => vec![
                Self::RESOLVED_TAG.to_string(),
                format_coord(*lat),
                format_coord(*lon),
                codec::escape(name),
            ],
            LocationCandidate::FreeText(text) => {
                vec![Self::FREE_TEXT_TAG.to_string(), codec::escape(text)]
            }
        }
    }

    /// Payload of the confirm button.
    pub fn confirm_data(&self) -> Result<String, TokenError> {
        let params = self.params();
        let params: Vec<&str> = params.iter().map(String::as_str).collect();
        codec::encode("loc", CONFIRM, &params)
    }

    /// Shorter candidate that still leads to the same place.
    fn degrade(&self) -> Option<Self> {
        match self {
            LocationCandidate::Resolved { lat, lon, .. } => Some(LocationCandidate::RawCoords {
                lat: *lat,
                lon: *lon,
            }),
            _ => None,
        }
    }

    /// Rebuild the candidate from a `loc_confirm_…` token.
    pub fn from_token(token: &CallbackToken) -> Result<Self, FlowError> {
        match token.param(0)? {
            Self::RAW_COORDS_TAG => {
                let (lat, lon) = coords_param(token, 1)?;
                Ok(LocationCandidate::RawCoords { lat, lon })
            }
            Self::RESOLVED_TAG => {
                let (lat, lon) = coords_param(token, 1)?;
                let name = token.text_param(3)?;
                if name.trim().is_empty() {
                    return Err(FlowError::Malformed("empty location name".to_string()));
                }
                Ok(LocationCandidate::Resolved { name, lat, lon })
            }
            Self::FREE_TEXT_TAG => {
                let text = token.text_param(1)?;
                if text.trim().is_empty() {
                    return Err(FlowError::Malformed("empty location query".to_string()));
                }
                Ok(LocationCandidate::FreeText(text))
            }
            tag => Err(FlowError::Malformed(format!("unknown location kind {:?}", tag))),
        }
    }

    /// What the proposal shows the user.
    pub fn describe(&self) -> String {
        match self {
            LocationCandidate::RawCoords { lat, lon } => describe_coords(*lat, *lon),
            LocationCandidate::Resolved { name, .. } => name.clone(),
            LocationCandidate::FreeText(text) => text.clone(),
        }
    }
}

/// Four decimals is roughly 10 m, plenty for weather.
fn format_coord(value: f64) -> String {
    format!("{:.4}", value)
}

fn describe_coords(lat: f64, lon: f64) -> String {
    format!("{:.4}, {:.4}", lat, lon)
}

/// Whether a coordinate pair is on the globe.
pub fn valid_coords(lat: f64, lon: f64) -> bool {
    lat.is_finite() && lon.is_finite() && lat.abs() <= 90.0 && lon.abs() <= 180.0
}

fn coords_param(token: &CallbackToken, index: usize) -> Result<(f64, f64), FlowError> {
    let lat: f64 = token.parse_param(index)?;
    let lon: f64 = token.parse_param(index + 1)?;
    if !valid_coords(lat, lon) {
        return Err(FlowError::Malformed(format!("coordinates out of range: {}, {}", lat, lon)));
    }
    Ok((lat, lon))
}

fn confirm_row(
    ctx: &FlowContext<'_>,
    confirm_data: String,
    action: &str,
) -> Result<Vec<Button>, FlowError> {
    Ok(vec![
        Button {
            label: ctx.t("button.confirm"),
            data: confirm_data,
        },
        Button::new(ctx.t("button.ignore"), action, IGNORE, &[])?,
    ])
}

fn ignored(ctx: &FlowContext<'_>, key: &str) -> Result<Reply, FlowError> {
    Ok(Reply::text(ctx.t(key)).row(vec![Button::new(
        ctx.t("button.menu"),
        "menu",
        "main",
        &[],
    )?]))
}

// ─── Location ────────────────────────────────────────────────────

/// Offer a location change. No geocoding happens here.
pub fn propose_location(
    ctx: &FlowContext<'_>,
    candidate: LocationCandidate,
) -> Result<Reply, FlowError> {
    let shown = candidate.describe();

    let data = match candidate.confirm_data() {
        Ok(data) => data,
        Err(TokenError::TooLong { len }) => {
            let Some(shorter) = candidate.degrade() else {
                return Err(FlowError::Malformed(format!(
                    "location proposal too long ({} bytes)",
                    len
                )));
            };
            tracing::debug!(len, "Resolved location too long for a button, sending coordinates");
            shorter.confirm_data()?
        }
        Err(e) => return Err(e.into()),
    };

    Ok(Reply::text(ctx.tf("location.confirm_prompt", &[("place", &shown)]))
        .row(confirm_row(ctx, data, "loc")?))
}

/// `loc_confirm_…` / `loc_ignore`.
pub async fn handle_location(
    ctx: &FlowContext<'_>,
    token: &CallbackToken,
) -> Result<Reply, FlowError> {
    match token.sub_action.as_str() {
        CONFIRM => {
            let candidate = LocationCandidate::from_token(token)?;
            let location = resolve_location(ctx, candidate).await?;

            let mut user = ctx.user.clone();
            user.location = Some(location.clone());
            ctx.store().upsert_user(&user).await?;

            tracing::info!(
                user_id = user.id,
                location = %location.name,
                "Location updated"
            );

            Ok(
                Reply::text(ctx.tf("location.saved", &[("place", &location.name)])).row(vec![
                    Button::new(ctx.t("button.weather_now"), "weather", "current", &[])?,
                    Button::new(ctx.t("button.menu"), "menu", "main", &[])?,
                ]),
            )
        }
        IGNORE => ignored(ctx, "location.ignored"),
        other => Err(FlowError::Malformed(format!("loc_{}", other))),
    }
}

async fn resolve_location(
    ctx: &FlowContext<'_>,
    candidate: LocationCandidate,
) -> Result<Location, FlowError> {
    match candidate {
        LocationCandidate::RawCoords { lat, lon } => {
            let place = ctx.weather().reverse_geocode(lat, lon).await?;
            Ok(match place {
                Some(place) => Location {
                    name: place.name,
                    lat,
                    lon,
                    country: place.country,
                },
                None => Location {
                    name: describe_coords(lat, lon),
                    lat,
                    lon,
                    country: None,
                },
            })
        }
        LocationCandidate::Resolved { name, lat, lon } => Ok(Location {
            name,
            lat,
            lon,
            country: None,
        }),
        LocationCandidate::FreeText(query) => {
            let place = ctx
                .weather()
                .geocode(&query)
                .await?
                .ok_or(FlowError::NotFound("location"))?;
            Ok(Location {
                name: place.name,
                lat: place.lat,
                lon: place.lon,
                country: place.country,
            })
        }
    }
}

// ─── Timezone ────────────────────────────────────────────────────

/// Offer a timezone change. The name must already be a valid IANA zone.
pub fn propose_timezone(ctx: &FlowContext<'_>, name: &str) -> Result<Reply, FlowError> {
    let tz = parse_timezone(name)
        .ok_or_else(|| FlowError::Malformed(format!("unknown timezone {:?}", name)))?;
    let data = codec::encode("tz", CONFIRM, &[&codec::escape(tz.name())])?;

    Ok(Reply::text(ctx.tf("timezone.confirm_prompt", &[("tz", tz.name())]))
        .row(confirm_row(ctx, data, "tz")?))
}

/// `tz_confirm_<name>` / `tz_ignore`.
pub async fn handle_timezone(
    ctx: &FlowContext<'_>,
    token: &CallbackToken,
) -> Result<Reply, FlowError> {
    match token.sub_action.as_str() {
        CONFIRM => {
            let name = token.text_param(0)?;
            let tz = parse_timezone(&name)
                .ok_or_else(|| FlowError::Malformed(format!("unknown timezone {:?}", name)))?;

            let mut user = ctx.user.clone();
            user.timezone = tz.name().to_string();
            ctx.store().upsert_user(&user).await?;

            tracing::info!(user_id = user.id, timezone = tz.name(), "Timezone updated");

            Ok(Reply::text(ctx.tf("timezone.saved", &[("tz", tz.name())]))
                .row(vec![Button::new(ctx.t("button.menu"), "menu", "main", &[])?]))
        }
        IGNORE => ignored(ctx, "timezone.ignored"),
        other => Err(FlowError::Malformed(format!("tz_{}", other))),
    }
}

// ─── Role ────────────────────────────────────────────────────────

/// Offer a one-step role change for `target_id`.
///
/// Only Admins may change roles. The ladder is checked here, before the
/// proposal is shown.
pub async fn propose_role(
    ctx: &FlowContext<'_>,
    target_id: i64,
    change: RoleChange,
    requested: Option<Role>,
) -> Result<Reply, FlowError> {
    ctx.require_role(Role::Admin)?;

    let target = ctx
        .store()
        .get_user(target_id)
        .await?
        .ok_or(FlowError::NotFound("user"))?;

    let transition =
        next_role(target.role, change, requested).map_err(FlowError::IllegalTransition)?;

    let target_id = target.id.to_string();
    let role_value = transition.to.value().to_string();
    let data = codec::encode("role", CONFIRM, &[change.as_str(), &target_id, &role_value])?;

    let label = target.label();
    let mut text = ctx.tf(
        "role.confirm_prompt",
        &[
            ("user", &label),
            ("old", transition.from.name()),
            ("new", transition.to.name()),
        ],
    );
    if transition.warning {
        text.push_str("\n\n");
        text.push_str(&ctx.t("role.warning_admin"));
    }

    Ok(Reply::text(text).row(confirm_row(ctx, data, "role")?))
}

/// `role_confirm_<change>_<targetId>_<roleValue>` / `role_ignore`.
pub async fn handle_role(ctx: &FlowContext<'_>, token: &CallbackToken) -> Result<Reply, FlowError> {
    match token.sub_action.as_str() {
        CONFIRM => confirm_role(ctx, token).await,
        IGNORE => ignored(ctx, "role.ignored"),
        other => Err(FlowError::Malformed(format!("role_{}", other))),
    }
}

async fn confirm_role(ctx: &FlowContext<'_>, token: &CallbackToken) -> Result<Reply, FlowError> {
    // The acting user may have lost Admin since the proposal.
    ctx.require_role(Role::Admin)?;

    let change = RoleChange::from_tag(token.param(0)?)
        .ok_or_else(|| FlowError::Malformed("unknown role change".to_string()))?;
    let target_id: i64 = token.parse_param(1)?;
    let new_role = Role::from_value(token.parse_param(2)?)
        .ok_or_else(|| FlowError::Malformed("unknown role value".to_string()))?;

    // Re-read the target: another admin may have acted in between.
    let target = ctx
        .store()
        .get_user(target_id)
        .await?
        .ok_or(FlowError::NotFound("user"))?;
    let label = target.label();

    let transition = match transition_to(target.role, new_role) {
        Ok(t) => t,
        Err(RoleRejection::Unchanged) => {
            return Ok(Reply::text(ctx.tf(
                "role.already",
                &[("user", &label), ("role", new_role.name())],
            ))
            .row(vec![Button::new(ctx.t("button.menu"), "menu", "main", &[])?]));
        }
        Err(rejection) => return Err(FlowError::IllegalTransition(rejection)),
    };
    let promoting = transition.to > transition.from;
    if promoting != (change == RoleChange::Promote) {
        return Err(FlowError::IllegalTransition(RoleRejection::TargetMismatch));
    }

    match ctx
        .store()
        .change_user_role(ctx.user.id, target_id, new_role)
        .await
    {
        Ok(()) => {}
        Err(AppError::NotFound(_)) => return Err(FlowError::NotFound("user")),
        Err(e) => return Err(e.into()),
    }

    tracing::info!(
        acting_admin_id = ctx.user.id,
        target_id,
        old_role = %transition.from,
        new_role = %transition.to,
        change = change.as_str(),
        "Role change confirmed"
    );

    notify_target(ctx, &target.language, target_id, transition.to).await;

    Ok(Reply::text(ctx.tf(
        "role.changed",
        &[
            ("user", &label),
            ("old", transition.from.name()),
            ("new", transition.to.name()),
        ],
    ))
    .row(vec![Button::new(ctx.t("button.menu"), "menu", "main", &[])?]))
}

/// Tell the target about their new role. Best effort.
async fn notify_target(ctx: &FlowContext<'_>, language: &str, target_id: i64, role: Role) {
    let text = crate::services::i18n::tf(language, "role.notify_target", &[("role", role.name())]);
    if let Err(e) = ctx
        .state
        .transport
        .send_message(target_id, &Reply::text(text))
        .await
    {
        tracing::warn!(target_id, error = %e, "Failed to notify user of role change");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round_trip(candidate: &LocationCandidate) -> LocationCandidate {
        let data = candidate.confirm_data().unwrap();
        LocationCandidate::from_token(&codec::decode(&data).unwrap()).unwrap()
    }

    #[test]
    fn test_raw_coords_token() {
        let c = LocationCandidate::RawCoords {
            lat: -33.8688,
            lon: 151.2093,
        };
        assert_eq!(c.confirm_data().unwrap(), "loc_confirm_c_-33.8688_151.2093");
        assert_eq!(round_trip(&c), c);
    }

    #[test]
    fn test_resolved_name_with_delimiter() {
        let c = LocationCandidate::Resolved {
            name: "Rio_de Janeiro".to_string(),
            lat: -22.9068,
            lon: -43.1729,
        };
        assert_eq!(round_trip(&c), c);
    }

    #[test]
    fn test_free_text_unicode() {
        let c = LocationCandidate::FreeText("Москва".to_string());
        assert_eq!(round_trip(&c), c);
    }

    #[test]
    fn test_only_resolved_degrades() {
        let resolved = LocationCandidate::Resolved {
            name: "x".repeat(80),
            lat: 1.0,
            lon: 2.0,
        };
        assert!(matches!(
            resolved.confirm_data(),
            Err(TokenError::TooLong { .. })
        ));
        let shorter = resolved.degrade().unwrap();
        assert_eq!(shorter, LocationCandidate::RawCoords { lat: 1.0, lon: 2.0 });
        assert!(shorter.confirm_data().is_ok());

        assert!(LocationCandidate::FreeText("y".into()).degrade().is_none());
    }

    #[test]
    fn test_rejects_bad_candidates() {
        for raw in [
            "loc_confirm",
            "loc_confirm_z_1_2",
            "loc_confirm_c_91_0",
            "loc_confirm_c_abc_0",
            "loc_confirm_c_10",
            "loc_confirm_t_",
        ] {
            let token = codec::decode(raw).unwrap();
            assert!(
                matches!(LocationCandidate::from_token(&token), Err(FlowError::Malformed(_))),
                "{} should be malformed",
                raw
            );
        }
    }
}

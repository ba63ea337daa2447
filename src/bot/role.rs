// SPDX-License-Identifier: MIT
// Copyright 2026 The skybot authors

//! Role ladder transitions.
//!
//! Roles move one step at a time along `User < Moderator < Admin`.
//! These functions are pure; callers fetch the target's current role
//! and hand the result to the confirmation flow.

use crate::models::Role;
use std::fmt;

/// Direction of a requested role change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleChange {
    Promote,
    Demote,
}

impl RoleChange {
    /// Token tag.
    pub fn as_str(self) -> &'static str {
        match self {
            RoleChange::Promote => "promote",
            RoleChange::Demote => "demote",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "promote" => Some(RoleChange::Promote),
            "demote" => Some(RoleChange::Demote),
            _ => None,
        }
    }
}

/// A legal single-step role change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleTransition {
    pub from: Role,
    pub to: Role,
    /// Set when an Admin is being demoted. Not an error, but callers
    /// surface it before confirmation.
    pub warning: bool,
}

/// Why a role change was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleRejection {
    /// User → Admin requested directly.
    MustPromoteToModeratorFirst,
    /// Admin → User requested directly.
    MustDemoteToModeratorFirst,
    AlreadyHighest,
    AlreadyLowest,
    /// Requested target points the opposite way from the change.
    TargetMismatch,
    /// Target already holds the role being applied.
    Unchanged,
}

impl RoleRejection {
    pub fn i18n_key(self) -> &'static str {
        match self {
            RoleRejection::MustPromoteToModeratorFirst => "role.reject.skip_promote",
            RoleRejection::MustDemoteToModeratorFirst => "role.reject.skip_demote",
            RoleRejection::AlreadyHighest => "role.reject.highest",
            RoleRejection::AlreadyLowest => "role.reject.lowest",
            RoleRejection::TargetMismatch => "role.reject.mismatch",
            RoleRejection::Unchanged => "role.reject.unchanged",
        }
    }
}

impl fmt::Display for RoleRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            RoleRejection::MustPromoteToModeratorFirst => "must promote to Moderator first",
            RoleRejection::MustDemoteToModeratorFirst => "must demote to Moderator first",
            RoleRejection::AlreadyHighest => "already highest",
            RoleRejection::AlreadyLowest => "already lowest",
            RoleRejection::TargetMismatch => "target role does not match direction",
            RoleRejection::Unchanged => "role unchanged",
        };
        f.write_str(reason)
    }
}

/// Compute the role a promote/demote should produce.
///
/// `requested` is an explicit target named by the caller. It must be the
/// adjacent rung in the requested direction.
pub fn next_role(
    current: Role,
    change: RoleChange,
    requested: Option<Role>,
) -> Result<RoleTransition, RoleRejection> {
    let next = match change {
        RoleChange::Promote => current.above().ok_or(RoleRejection::AlreadyHighest)?,
        RoleChange::Demote => current.below().ok_or(RoleRejection::AlreadyLowest)?,
    };

    if let Some(requested) = requested {
        if requested != next {
            return Err(match change {
                RoleChange::Promote if requested > next => {
                    RoleRejection::MustPromoteToModeratorFirst
                }
                RoleChange::Demote if requested < next => {
                    RoleRejection::MustDemoteToModeratorFirst
                }
                _ => RoleRejection::TargetMismatch,
            });
        }
    }

    Ok(RoleTransition {
        from: current,
        to: next,
        warning: change == RoleChange::Demote && current == Role::Admin,
    })
}

/// Check that applying `target` to a user currently at `current` is a
/// single ladder step, re-deriving the direction from the two roles.
pub fn transition_to(current: Role, target: Role) -> Result<RoleTransition, RoleRejection> {
    if current == target {
        return Err(RoleRejection::Unchanged);
    }
    let change = if target > current {
        RoleChange::Promote
    } else {
        RoleChange::Demote
    };
    next_role(current, change, Some(target))
}

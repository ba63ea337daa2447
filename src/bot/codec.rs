// SPDX-License-Identifier: MIT
// Copyright 2026 The skybot authors

//! Callback token codec.
//!
//! Every inline button carries a string `action_subAction_param…`. The
//! first two segments are always the action and sub-action; everything
//! after belongs to the flow that handles the action, which knows its own
//! arity. Numeric params are written as-is. Free-text params go through
//! [`escape`] so they never contain the delimiter.

use crate::error::FlowError;
use std::str::FromStr;

/// Segment separator.
pub const DELIMITER: char = '_';

/// Telegram's `callback_data` limit, in bytes.
pub const MAX_TOKEN_LEN: usize = 64;

/// Decoded button payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallbackToken {
    pub action: String,
    pub sub_action: String,
    pub params: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("malformed callback token: {segments} segment(s)")]
    Malformed { segments: usize },

    #[error("callback token is {len} bytes, limit is {MAX_TOKEN_LEN}")]
    TooLong { len: usize },

    #[error("invalid escape sequence in callback param")]
    BadEscape,
}

impl From<TokenError> for FlowError {
    fn from(err: TokenError) -> Self {
        FlowError::Malformed(err.to_string())
    }
}

/// Split a raw payload into action, sub-action and params.
pub fn decode(raw: &str) -> Result<CallbackToken, TokenError> {
    let mut segments = raw.split(DELIMITER);
    let action = segments.next().unwrap_or_default();
    let Some(sub_action) = segments.next() else {
        return Err(TokenError::Malformed { segments: 1 });
    };

    Ok(CallbackToken {
        action: action.to_string(),
        sub_action: sub_action.to_string(),
        params: segments.map(str::to_string).collect(),
    })
}

/// Join action, sub-action and params with the delimiter.
///
/// Callers must [`escape`] any free-text param. Fails instead of truncating
/// when the result would exceed [`MAX_TOKEN_LEN`].
pub fn encode(action: &str, sub_action: &str, params: &[&str]) -> Result<String, TokenError> {
    let mut out = String::with_capacity(MAX_TOKEN_LEN);
    out.push_str(action);
    out.push(DELIMITER);
    out.push_str(sub_action);
    for param in params {
        out.push(DELIMITER);
        out.push_str(param);
    }

    if out.len() > MAX_TOKEN_LEN {
        return Err(TokenError::TooLong { len: out.len() });
    }
    Ok(out)
}

/// Percent-encode a free-text param, including the delimiter.
pub fn escape(text: &str) -> String {
    // `urlencoding` leaves `_` alone since it is URL-safe.
    urlencoding::encode(text).replace(DELIMITER, "%5F")
}

/// Reverse of [`escape`].
pub fn unescape(param: &str) -> Result<String, TokenError> {
    urlencoding::decode(param)
        .map(|s| s.into_owned())
        .map_err(|_| TokenError::BadEscape)
}

impl CallbackToken {
    /// Re-encode this token.
    pub fn encode(&self) -> Result<String, TokenError> {
        let params: Vec<&str> = self.params.iter().map(String::as_str).collect();
        encode(&self.action, &self.sub_action, &params)
    }

    /// Raw param at `index`, or a malformed-input error.
    pub fn param(&self, index: usize) -> Result<&str, FlowError> {
        self.params
            .get(index)
            .map(String::as_str)
            .ok_or_else(|| {
                FlowError::Malformed(format!(
                    "{}_{} expects param #{}",
                    self.action, self.sub_action, index
                ))
            })
    }

    /// Raw param at `index` if present.
    pub fn opt_param(&self, index: usize) -> Option<&str> {
        self.params.get(index).map(String::as_str)
    }

    /// Param at `index` parsed as `T`.
    pub fn parse_param<T: FromStr>(&self, index: usize) -> Result<T, FlowError> {
        let raw = self.param(index)?;
        raw.parse()
            .map_err(|_| FlowError::Malformed(format!("unparseable param #{}: {:?}", index, raw)))
    }

    /// Free-text param at `index`, unescaped.
    pub fn text_param(&self, index: usize) -> Result<String, FlowError> {
        Ok(unescape(self.param(index)?)?)
    }
}

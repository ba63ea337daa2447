// SPDX-License-Identifier: MIT
// Copyright 2026 The skybot authors

//! Outbound reply: text plus the next set of buttons.

use crate::bot::codec::{self, TokenError};
use serde::Serialize;

/// Inline button. `data` is always produced by [`codec::encode`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Button {
    pub label: String,
    pub data: String,
}

impl Button {
    pub fn new(
        label: impl Into<String>,
        action: &str,
        sub_action: &str,
        params: &[&str],
    ) -> Result<Self, TokenError> {
        Ok(Self {
            label: label.into(),
            data: codec::encode(action, sub_action, params)?,
        })
    }
}

/// File attached to a reply (exports).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub filename: String,
    pub content: Vec<u8>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Reply {
    pub text: String,
    /// Rows of buttons.
    pub keyboard: Vec<Vec<Button>>,
    pub attachment: Option<Attachment>,
}

impl Reply {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn row(mut self, row: Vec<Button>) -> Self {
        if !row.is_empty() {
            self.keyboard.push(row);
        }
        self
    }

    pub fn rows(mut self, rows: impl IntoIterator<Item = Vec<Button>>) -> Self {
        for row in rows {
            self = self.row(row);
        }
        self
    }

    pub fn attach(mut self, filename: impl Into<String>, content: Vec<u8>) -> Self {
        self.attachment = Some(Attachment {
            filename: filename.into(),
            content,
        });
        self
    }

    /// All button payloads, in order.
    pub fn callback_data(&self) -> impl Iterator<Item = &str> {
        self.keyboard.iter().flatten().map(|b| b.data.as_str())
    }
}

/// Lay buttons out `per_row` to a row.
pub fn grid(buttons: Vec<Button>, per_row: usize) -> Vec<Vec<Button>> {
    buttons
        .chunks(per_row.max(1))
        .map(<[Button]>::to_vec)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_layout() {
        let buttons: Vec<Button> = (0..5)
            .map(|i| Button::new(i.to_string(), "menu", "main", &[]).unwrap())
            .collect();
        let rows = grid(buttons, 2);
        assert_eq!(rows.iter().map(Vec::len).collect::<Vec<_>>(), vec![2, 2, 1]);
    }

    #[test]
    fn test_empty_rows_are_skipped() {
        let reply = Reply::text("hi").row(vec![]);
        assert!(reply.keyboard.is_empty());
    }
}

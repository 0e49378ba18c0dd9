// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mkignore-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of mkignore and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Display-column text fitting for the fixed-width template grid.
//!
//! Terminal cells are not characters: a glyph may occupy 0, 1, or 2 columns.
//! Truncation and padding therefore accumulate per-glyph column widths instead
//! of counting chars or bytes, or the grid misaligns on double-width text.

use unicode_width::UnicodeWidthChar;

/// Total display columns occupied by `text`.
pub fn display_width(text: &str) -> usize {
    text.chars().map(|ch| ch.width().unwrap_or(0)).sum()
}

/// Fits `text` into exactly `width` display columns.
///
/// Glyphs are emitted while they still fit whole; the first glyph that would
/// overflow is dropped along with everything after it, and the remainder is
/// padded with single-column spaces. A double-width glyph is never split.
pub fn fit_width(text: &str, width: usize) -> String {
    let mut out = String::with_capacity(width);
    let mut used = 0usize;
    for ch in text.chars() {
        let cols = ch.width().unwrap_or(0);
        if used + cols > width {
            break;
        }
        out.push(ch);
        used += cols;
    }
    out.extend(std::iter::repeat(' ').take(width - used));
    out
}

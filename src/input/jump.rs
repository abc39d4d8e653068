//! Parsing of the jump prompt: decimal, `0x` hex, or a percentage of the file.

use crate::error::{Result, RlhexError};

/// Resolve `text` to an absolute offset inside a file of `size` bytes.
///
/// Accepted forms are a decimal integer (`4096`, `-3`), a hex integer with a
/// case-insensitive `0x` prefix (`0x1000`) and a percentage of the file size
/// (`50%`, `12.5%`). The result is clamped to `[0, size - 1]`; an empty file
/// always resolves to 0.
///
/// # Errors
/// Returns [`RlhexError::InvalidJumpTarget`] when `text` matches none of the forms.
pub fn resolve_jump_target(text: &str, size: u64) -> Result<u64> {
    let trimmed = text.trim();
    let invalid = || RlhexError::InvalidJumpTarget {
        input: text.to_string(),
    };

    let target: i128 = if let Some(digits) = strip_hex_prefix(trimmed) {
        u128::from_str_radix(digits, 16)
            .map(|value| value.min(i128::MAX as u128) as i128)
            .map_err(|_| invalid())?
    } else if let Some(percent) = trimmed.strip_suffix('%') {
        let percent: f64 = percent.trim().parse().map_err(|_| invalid())?;
        if !percent.is_finite() {
            return Err(invalid());
        }
        (percent / 100.0 * size as f64) as i128
    } else {
        trimmed.parse::<i128>().map_err(|_| invalid())?
    };

    Ok(clamp_offset(target, size))
}

fn strip_hex_prefix(text: &str) -> Option<&str> {
    text.strip_prefix("0x").or_else(|| text.strip_prefix("0X"))
}

fn clamp_offset(target: i128, size: u64) -> u64 {
    let last = size.saturating_sub(1) as i128;
    target.clamp(0, last) as u64
}

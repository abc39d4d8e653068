//! Fixed-width numeric interpretation of raw bytes.

use std::fmt;

/// Byte order used when interpreting multi-byte values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Endianness {
    #[default]
    Little,
    Big,
}

impl Endianness {
    pub fn toggled(self) -> Self {
        match self {
            Endianness::Little => Endianness::Big,
            Endianness::Big => Endianness::Little,
        }
    }

    pub fn read_u16(self, bytes: &[u8]) -> Option<u16> {
        let raw: [u8; 2] = bytes.get(..2)?.try_into().ok()?;
        Some(match self {
            Endianness::Little => u16::from_le_bytes(raw),
            Endianness::Big => u16::from_be_bytes(raw),
        })
    }

    pub fn read_u32(self, bytes: &[u8]) -> Option<u32> {
        let raw: [u8; 4] = bytes.get(..4)?.try_into().ok()?;
        Some(match self {
            Endianness::Little => u32::from_le_bytes(raw),
            Endianness::Big => u32::from_be_bytes(raw),
        })
    }

    pub fn read_f32(self, bytes: &[u8]) -> Option<f32> {
        self.read_u32(bytes).map(f32::from_bits)
    }
}

impl fmt::Display for Endianness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endianness::Little => f.write_str("little"),
            Endianness::Big => f.write_str("big"),
        }
    }
}

/// Numeric readings of the first bytes of a window
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueReadout {
    pub int16: Option<u16>,
    pub int32: Option<u32>,
    pub float32: Option<f32>,
}

impl ValueReadout {
    /// Minimum window length for which values are shown at all
    pub const MIN_WINDOW: usize = 4;

    /// Interpret `window`; `None` for windows shorter than [`Self::MIN_WINDOW`]
    pub fn interpret(window: &[u8], endianness: Endianness) -> Option<Self> {
        if window.len() < Self::MIN_WINDOW {
            return None;
        }
        Some(Self {
            int16: endianness.read_u16(window),
            int32: endianness.read_u32(window),
            float32: endianness.read_f32(window),
        })
    }

    /// Suffix appended to a dump line; readings that are missing are left out
    pub fn suffix(&self) -> String {
        let mut out = String::new();
        if let Some(v) = self.int16 {
            out.push_str(&format!(" int16: {}", v));
        }
        if let Some(v) = self.int32 {
            out.push_str(&format!(" int32: {}", v));
        }
        if let Some(v) = self.float32 {
            out.push_str(&format!(" float: {}", format_general(f64::from(v), 6)));
        }
        out
    }
}

/// Format `value` like C's `%.<precision>g`.
///
/// Scientific notation is used when the decimal exponent is below -4 or not below
/// the precision; trailing zeros and a dangling decimal point are removed.
pub fn format_general(value: f64, precision: usize) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0" } else { "0" }.to_string();
    }

    let precision = precision.max(1);
    let scientific = format!("{:.*e}", precision - 1, value);
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (scientific.as_str(), 0),
    };

    if exponent < -4 || exponent >= precision as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!(
            "{}e{}{:02}",
            trim_fraction(mantissa),
            sign,
            exponent.unsigned_abs()
        )
    } else {
        let decimals = (precision as i32 - 1 - exponent).max(0) as usize;
        trim_fraction(&format!("{:.*}", decimals, value)).to_string()
    }
}

fn trim_fraction(text: &str) -> &str {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text
    }
}

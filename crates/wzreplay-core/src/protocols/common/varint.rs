//! Variable-length integer codec used throughout the netplay protocol.
//!
//! Values are spread over at most five bytes. Each byte position `n` has a
//! threshold `THRESHOLDS[n]`: a byte below `256 - THRESHOLDS[n]` terminates
//! the value, anything else continues it. Position 4 has threshold 0, so the
//! fifth byte always terminates. This is not LEB128.

/// Per-position continuation thresholds.
pub const THRESHOLDS: [u32; MAX_VARINT_LEN] = [78, 95, 32, 70, 0];
/// Per-position digit weights (running product of the thresholds).
pub const WEIGHTS: [u32; MAX_VARINT_LEN] = [1, 78, 7410, 237_120, 16_598_400];
/// Upper bound on encoded length.
pub const MAX_VARINT_LEN: usize = 5;

/// Fold one byte at position `n` into the accumulator.
///
/// Returns whether the byte terminates the value, and the new accumulator.
/// Arithmetic wraps so malformed five-byte sequences cannot overflow.
pub fn decode_step(byte: u8, acc: u32, n: usize) -> (bool, u32) {
    let threshold = THRESHOLDS[n];
    let weight = WEIGHTS[n];
    let byte = u32::from(byte);
    if byte < 256 - threshold {
        (true, acc.wrapping_add(byte.wrapping_mul(weight)))
    } else {
        let digit = 256 - threshold + 255 - byte;
        (false, acc.wrapping_add(digit.wrapping_mul(weight)))
    }
}

/// Decode an unsigned value, pulling bytes from `next_byte`.
///
/// The supplier's error is propagated unchanged, so callers decide what a
/// missing byte means (a bounded slice and an `io::Read` report it
/// differently).
///
/// # Examples
/// This helper is part of an internal module, so the example is marked as
/// text example.
/// ```text
/// use wzreplay_core::protocols::common::varint::decode_u32_with;
///
/// let mut bytes = [0xffu8, 0x01].into_iter();
/// let value = decode_u32_with(|| bytes.next().ok_or(())).unwrap();
/// assert_eq!(value, 256);
/// ```
pub fn decode_u32_with<E, F>(mut next_byte: F) -> Result<u32, E>
where
    F: FnMut() -> Result<u8, E>,
{
    let mut acc = 0u32;
    for n in 0..MAX_VARINT_LEN {
        let (last, value) = decode_step(next_byte()?, acc, n);
        acc = value;
        if last {
            break;
        }
    }
    Ok(acc)
}

/// Map a decoded varint to the protocol's signed representation.
///
/// Even `v` gives `v / 2`; odd `v` gives `-(v / 2 - 1)`. This is close to,
/// but not the same as, zig-zag decoding: `1 -> 1`, `3 -> 0`, `5 -> -1`.
pub fn signed_from_varint(value: u32) -> i32 {
    let half = (value / 2) as i32;
    if value % 2 == 0 { half } else { -(half - 1) }
}

#[cfg(test)]
pub(crate) fn encode_u32(mut value: u32) -> Vec<u8> {
    let mut out = Vec::with_capacity(MAX_VARINT_LEN);
    for &threshold in &THRESHOLDS[..MAX_VARINT_LEN - 1] {
        if value < 256 - threshold {
            out.push(value as u8);
            return out;
        }
        value -= 256 - threshold;
        out.push((255 - value % threshold) as u8);
        value /= threshold;
    }
    out.push(value as u8);
    out
}

//! Integer parameter encoding and bounded command buffers.
//!
//! A parameter value 0-255 is transmitted as-is in one byte. Values
//! 256-510 take two bytes: a leading [`CARRY_MARKER`] (255) meaning
//! "add 255 to the byte that follows", then `value - 255`. There is
//! exactly one carry step; 510 is the end of the domain and anything
//! above it is an encoding error, not a truncation.

use heapless::Vec;

/// Largest value the 1-or-2-byte carry encoding can express
pub const MAX_ENCODABLE_VALUE: u16 = 510;

/// Carry marker byte: "add 255 to the next byte"
pub const CARRY_MARKER: u8 = 255;

/// Maximum text payload length in bytes, NUL terminator excluded
pub const MAX_TEXT_LEN: usize = 64;

/// Largest encoded command: `TT` tag + text payload + NUL terminator
pub const MAX_COMMAND_SIZE: usize = 2 + MAX_TEXT_LEN + 1;

/// One encoded transport write
pub type CommandBytes = Vec<u8, MAX_COMMAND_SIZE>;

/// The transport writes for one command, in send order
///
/// Position-and-text commands occupy two writes; everything else one.
pub type Transfers = Vec<CommandBytes, 2>;

/// Errors that can occur while encoding a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EncodeError {
    /// Integer parameter outside the encodable 0..=510 domain
    ValueOutOfRange(u16),
    /// Text payload exceeds [`MAX_TEXT_LEN`]
    PayloadTooLarge,
}

/// Append the carry encoding of `value` to `buf`
///
/// The range check runs unconditionally in every build; the display
/// firmware has no recovery path for a malformed parameter.
pub fn encode_value(buf: &mut CommandBytes, value: u16) -> Result<(), EncodeError> {
    if value > MAX_ENCODABLE_VALUE {
        return Err(EncodeError::ValueOutOfRange(value));
    }
    if value > u8::MAX as u16 {
        buf.push(CARRY_MARKER)
            .map_err(|_| EncodeError::PayloadTooLarge)?;
        buf.push((value - CARRY_MARKER as u16) as u8)
            .map_err(|_| EncodeError::PayloadTooLarge)?;
    } else {
        buf.push(value as u8)
            .map_err(|_| EncodeError::PayloadTooLarge)?;
    }
    Ok(())
}

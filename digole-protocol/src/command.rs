//! Display command set.
//!
//! One [`Command`] variant per logical operation, each carrying
//! exactly the parameters its wire form needs. Dispatch is an
//! exhaustive match, so a mismatched argument shape cannot be
//! expressed at all.

use crate::encode::{encode_value, CommandBytes, EncodeError, Transfers, MAX_TEXT_LEN};

/// Command tags (2 ASCII bytes each)
mod tag {
    pub const CLEAR: &[u8; 2] = b"CL";
    pub const BACKLIGHT: &[u8; 2] = b"BL";
    pub const CURSOR: &[u8; 2] = b"CS";
    pub const FONT: &[u8; 2] = b"SF";
    pub const POSITION: &[u8; 2] = b"TP";
    pub const TEXT: &[u8; 2] = b"TT";
}

/// Fixed setup sequence: clear, cursor off, font 18, backlight on
pub const CONFIG_SEQUENCE: &[u8] = b"CLCS\x00SF\x12BL\x01";

/// Font selected by [`CONFIG_SEQUENCE`] (17 characters per row)
pub const CONFIG_FONT: u8 = 18;

/// One logical display command
///
/// Boolean and font parameters are typed so that out-of-domain values
/// are unrepresentable; row/col are range-checked at encode time since
/// `u16` spans both bands of the carry encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command<'a> {
    /// Send the fixed multi-command setup sequence
    Configure,
    /// Clear the screen
    Clear,
    /// Switch the backlight off/on
    Backlight(bool),
    /// Hide/show the cursor
    Cursor(bool),
    /// Select a device font (0, 6, 10, 18, 51, 120 or 123)
    Font(u8),
    /// Move the text cursor
    Position { row: u16, col: u16 },
    /// Draw a string at the current cursor position
    Text(&'a str),
    /// Move the cursor, then draw a string
    TextAt { row: u16, col: u16, text: &'a str },
}

impl Command<'_> {
    /// Encode into transport writes, in send order
    ///
    /// [`Command::TextAt`] yields two buffers (position, then text);
    /// every other command yields one.
    pub fn encode(&self) -> Result<Transfers, EncodeError> {
        let mut transfers = Transfers::new();
        let last = match *self {
            Command::Configure => raw(CONFIG_SEQUENCE)?,
            Command::Clear => raw(tag::CLEAR)?,
            Command::Backlight(on) => param(tag::BACKLIGHT, on as u16)?,
            Command::Cursor(on) => param(tag::CURSOR, on as u16)?,
            Command::Font(id) => param(tag::FONT, id as u16)?,
            Command::Position { row, col } => position(row, col)?,
            Command::Text(text) => text_payload(text)?,
            Command::TextAt { row, col, text } => {
                push(&mut transfers, position(row, col)?)?;
                text_payload(text)?
            }
        };
        push(&mut transfers, last)?;
        Ok(transfers)
    }
}

fn push(transfers: &mut Transfers, buf: CommandBytes) -> Result<(), EncodeError> {
    transfers.push(buf).map_err(|_| EncodeError::PayloadTooLarge)
}

fn raw(bytes: &[u8]) -> Result<CommandBytes, EncodeError> {
    let mut buf = CommandBytes::new();
    buf.extend_from_slice(bytes)
        .map_err(|_| EncodeError::PayloadTooLarge)?;
    Ok(buf)
}

fn param(tag: &[u8; 2], value: u16) -> Result<CommandBytes, EncodeError> {
    let mut buf = raw(tag)?;
    encode_value(&mut buf, value)?;
    Ok(buf)
}

fn position(row: u16, col: u16) -> Result<CommandBytes, EncodeError> {
    let mut buf = raw(tag::POSITION)?;
    encode_value(&mut buf, row)?;
    encode_value(&mut buf, col)?;
    Ok(buf)
}

/// `TT` tag + string bytes + NUL terminator, as one write whose length
/// includes the terminator
fn text_payload(text: &str) -> Result<CommandBytes, EncodeError> {
    if text.len() > MAX_TEXT_LEN {
        return Err(EncodeError::PayloadTooLarge);
    }
    let mut buf = raw(tag::TEXT)?;
    buf.extend_from_slice(text.as_bytes())
        .map_err(|_| EncodeError::PayloadTooLarge)?;
    buf.push(0).map_err(|_| EncodeError::PayloadTooLarge)?;
    Ok(buf)
}

//! Wire command encoding for Digole serial text displays
//!
//! Digole display adapters take text-mode commands as a two-character
//! ASCII tag followed by raw parameter bytes:
//!
//! ```text
//! ┌─────┬──────────────────────────────┬──────────────────────────┐
//! │ Tag │ Parameters                   │ Meaning                  │
//! ├─────┼──────────────────────────────┼──────────────────────────┤
//! │ CL  │ -                            │ clear screen             │
//! │ BL  │ 1 value (0/1)                │ backlight off/on         │
//! │ CS  │ 1 value (0/1)                │ cursor off/on            │
//! │ SF  │ 1 value (font id)            │ select font              │
//! │ TP  │ 2 values (row, col)          │ position text cursor     │
//! │ TT  │ NUL-terminated byte string   │ draw text                │
//! └─────┴──────────────────────────────┴──────────────────────────┘
//! ```
//!
//! Integer parameters use a single-step carry encoding: one raw byte
//! for 0-255, or a leading 255 ("add 255 to the next byte") for
//! 256-510. The device firmware depends on these exact bytes, so the
//! encoder is bit-exact and rejects anything outside the domain.
//!
//! This crate is transport-free: [`Command::encode`] produces the
//! buffers, the driver crate decides how they reach the bus.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod command;
pub mod encode;

// Re-export key types at crate root for convenience
pub use command::{Command, CONFIG_FONT, CONFIG_SEQUENCE};
pub use encode::{
    encode_value, CommandBytes, EncodeError, Transfers, CARRY_MARKER, MAX_COMMAND_SIZE,
    MAX_ENCODABLE_VALUE, MAX_TEXT_LEN,
};

//! I2C driver for Digole serial text displays
//!
//! Translates high-level display operations (clear, locate, text,
//! formatted print, backlight/cursor/font control) into the Digole
//! wire protocol and hands each encoded buffer to a transport.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────┐
//! │  Application                         │
//! └──────────────────────────────────────┘
//!                  │ clear / locate / text / print ...
//!                  ▼
//! ┌──────────────────────────────────────┐
//! │  Digole (this crate - lifecycle,     │
//! │  operation surface)                  │
//! └──────────────────────────────────────┘
//!                  │ Command encoding (digole-protocol)
//!                  ▼
//! ┌──────────────────────────────────────┐
//! │  Transport (I2cTransport over any    │
//! │  embedded-hal bus, or your own)      │
//! └──────────────────────────────────────┘
//! ```
//!
//! # Concurrency
//!
//! Every operation is a direct, blocking transport call taking
//! `&mut self`; the driver holds no locks. Sharing one display between
//! contexts requires an external mutex around the [`Digole`] instance.
//!
//! # Error model
//!
//! Transport errors propagate unchanged with no retries. A command
//! that needs two bus writes (position then text) stops at the first
//! failing write, so the display can be left mid-update; callers
//! decide whether to redraw.

#![no_std]
#![deny(unsafe_code)]

pub mod driver;
pub mod event;
pub mod transport;

// Re-export key types at crate root for convenience
pub use driver::{BusConfig, Digole, Error, FORMAT_LEN};
pub use event::{EventSink, NoEvents};
pub use transport::{I2cTransport, Transport, DEFAULT_ADDRESS};

//! Transport seam between the driver and the bus.
//!
//! The driver reaches the display through a single write primitive.
//! Queueing, clocking and transport-level retries belong to the bus
//! layer behind it.

use embedded_hal::i2c::I2c;

/// Factory-default 7-bit I2C address of Digole display adapters
pub const DEFAULT_ADDRESS: u8 = 0x27;

/// Byte sink for encoded display commands
///
/// One call per encoded command buffer. Implementations forward the
/// buffer unmodified and report the bus result; the driver never
/// retries.
pub trait Transport {
    /// Error type surfaced by the underlying bus
    type Error;

    /// Write one complete command buffer to the display
    fn write(&mut self, bytes: &[u8]) -> Result<(), Self::Error>;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    type Error = T::Error;

    fn write(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        T::write(self, bytes)
    }
}

/// Transport over an `embedded-hal` I2C bus
///
/// Each command buffer becomes one I2C write transaction to a fixed
/// 7-bit address.
pub struct I2cTransport<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C: I2c> I2cTransport<I2C> {
    /// Create a transport using the factory-default address
    pub fn new(i2c: I2C) -> Self {
        Self::with_address(i2c, DEFAULT_ADDRESS)
    }

    /// Create a transport for a display re-addressed via its `SI2CA`
    /// command
    pub fn with_address(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    /// The display's 7-bit address on the bus
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Release the underlying bus
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C: I2c> Transport for I2cTransport<I2C> {
    type Error = I2C::Error;

    fn write(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        self.i2c.write(self.address, bytes)
    }
}

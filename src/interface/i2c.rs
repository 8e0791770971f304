//! I2C interface implementation built on top of `embedded-hal` `I2c`.

use embedded_hal::i2c::I2c;

use super::Mpr121Interface;

/// Bus address with the ADDR pin tied to VSS.
pub const DEFAULT_ADDRESS: u8 = 0x5A;

/// I2C-based interface implementation for the MPR121 driver.
pub struct I2cInterface<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C> I2cInterface<I2C> {
    /// Creates a new interface talking to [`DEFAULT_ADDRESS`].
    pub const fn new(i2c: I2C) -> Self {
        Self::with_address(i2c, DEFAULT_ADDRESS)
    }

    /// Creates a new interface for a device strapped to another address (`0x5B`..=`0x5D`).
    pub const fn with_address(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    /// Returns the 7-bit device address.
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Provides mutable access to the wrapped I2C bus.
    pub fn i2c_mut(&mut self) -> &mut I2C {
        &mut self.i2c
    }

    /// Consumes the interface and returns the owned I2C bus.
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C> Mpr121Interface for I2cInterface<I2C>
where
    I2C: I2c,
{
    type Error = I2C::Error;

    fn write_register(&mut self, register: u8, value: u8) -> core::result::Result<(), Self::Error> {
        self.i2c.write(self.address, &[register, value])
    }

    fn read_many(&mut self, register: u8, buf: &mut [u8]) -> core::result::Result<(), Self::Error> {
        if buf.is_empty() {
            return Ok(());
        }

        self.i2c.write_read(self.address, &[register], buf)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::{DEFAULT_ADDRESS, I2cInterface};
    use crate::interface::Mpr121Interface;
    use embedded_hal::i2c::ErrorKind;
    use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};
    use std::vec;

    #[test]
    fn read_many_addresses_register_and_fills_buffer() {
        let expectations = [I2cTransaction::write_read(
            DEFAULT_ADDRESS,
            vec![0x00],
            vec![0xFF, 0x0A],
        )];
        let mut i2c = I2cMock::new(&expectations);
        let mut interface = I2cInterface::new(i2c.clone());

        let mut buffer = [0u8; 2];
        interface.read_many(0x00, &mut buffer).unwrap();
        assert_eq!(buffer, [0xFF, 0x0A]);

        i2c.done();
    }

    #[test]
    fn write_register_sends_address_then_value() {
        let expectations = [I2cTransaction::write(0x5B, vec![0x5E, 0x8C])];
        let mut i2c = I2cMock::new(&expectations);
        let mut interface = I2cInterface::with_address(i2c.clone(), 0x5B);

        interface.write_register(0x5E, 0x8C).unwrap();
        assert_eq!(interface.address(), 0x5B);

        i2c.done();
    }

    #[test]
    fn read_register_reuses_read_many() {
        let expectations = [I2cTransaction::write_read(
            DEFAULT_ADDRESS,
            vec![0x5C],
            vec![0x24],
        )];
        let mut i2c = I2cMock::new(&expectations);
        let mut interface = I2cInterface::new(i2c.clone());

        assert_eq!(interface.read_register(0x5C).unwrap(), 0x24);

        i2c.done();
    }

    #[test]
    fn bus_errors_propagate_without_retry() {
        let expectations = [
            I2cTransaction::write(DEFAULT_ADDRESS, vec![0x80, 0x63]).with_error(ErrorKind::Other),
        ];
        let mut i2c = I2cMock::new(&expectations);
        let mut interface = I2cInterface::new(i2c.clone());

        assert_eq!(interface.write_register(0x80, 0x63), Err(ErrorKind::Other));

        i2c.done();
    }

    #[test]
    fn read_many_ignores_empty_buffer() {
        let expectations: [I2cTransaction; 0] = [];
        let mut i2c = I2cMock::new(&expectations);
        let mut interface = I2cInterface::new(i2c.clone());

        interface.read_many(0x00, &mut []).unwrap();

        i2c.done();
    }
}

//! Bus interface abstraction for the MPR121 driver.

pub mod i2c;

/// Abstraction over the low-level register access required by the driver.
///
/// Implementations issue exactly one bus transaction per call and never retry;
/// failures are returned to the driver unchanged.
pub trait Mpr121Interface {
    /// Error type produced by the concrete bus implementation.
    type Error;

    /// Writes a single register.
    fn write_register(&mut self, register: u8, value: u8) -> core::result::Result<(), Self::Error>;

    /// Reads consecutive registers starting at `register` into the provided buffer.
    fn read_many(&mut self, register: u8, buf: &mut [u8]) -> core::result::Result<(), Self::Error>;

    /// Reads a single register.
    fn read_register(&mut self, register: u8) -> core::result::Result<u8, Self::Error> {
        let mut value = [0u8; 1];
        self.read_many(register, &mut value)?;
        Ok(value[0])
    }
}

impl<T> Mpr121Interface for &mut T
where
    T: Mpr121Interface + ?Sized,
{
    type Error = T::Error;

    fn write_register(&mut self, register: u8, value: u8) -> core::result::Result<(), Self::Error> {
        T::write_register(self, register, value)
    }

    fn read_many(&mut self, register: u8, buf: &mut [u8]) -> core::result::Result<(), Self::Error> {
        T::read_many(self, register, buf)
    }
}

//! Error handling primitives for the MPR121 driver.

/// Crate-wide result type alias.
pub type Result<T, E> = core::result::Result<T, Error<E>>;

/// Error variants produced by the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// Any error reported by the underlying bus interface.
    Interface(E),
    /// The device answered, but `CONFIG1` did not hold its post-reset default.
    ///
    /// Usually means the part failed to reset, is absent, or sits at another address.
    UnexpectedResetState {
        /// Value read back from `CONFIG1`.
        config1: u8,
    },
    /// A caller-supplied argument is out of range (register selector, channel, electrode count).
    InvalidArgument,
    /// The provided configuration parameters are invalid.
    InvalidConfig,
    /// The requested operation is not implemented by this driver.
    NotSupported,
}

impl<E> From<E> for Error<E> {
    fn from(err: E) -> Self {
        Self::Interface(err)
    }
}

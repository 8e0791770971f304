//! Touch state decoding and the host event sink contract.

use crate::registers::ELECTRODE_COUNT;

/// Bits of the touch status word that map to electrodes ELE0..ELE11.
pub const TOUCH_MASK_BITS: u16 = 0x0FFF;

/// Per-electrode touch state, bit `i` set when electrode `i` is touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TouchMask(u16);

impl TouchMask {
    /// Mask with no electrode touched.
    pub const NONE: Self = Self(0);

    /// Builds a mask from a raw status word, discarding bits above ELE11.
    pub const fn from_bits(bits: u16) -> Self {
        Self(bits & TOUCH_MASK_BITS)
    }

    /// Decodes the two touch status bytes as laid out in the register map.
    pub const fn from_status_bytes(low: u8, high: u8) -> Self {
        Self::from_bits(u16::from_le_bytes([low, high]))
    }

    /// Returns the raw 12-bit mask.
    pub const fn bits(self) -> u16 {
        self.0
    }

    /// Returns `true` when `channel` is touched. Channels past ELE11 are never touched.
    pub const fn is_touched(self, channel: u8) -> bool {
        channel < ELECTRODE_COUNT && self.0 & (1 << channel) != 0
    }

    /// Number of touched electrodes.
    pub const fn count(self) -> u32 {
        self.0.count_ones()
    }

    /// Iterates over the touched electrode indices in ascending order.
    pub fn iter(self) -> impl Iterator<Item = u8> {
        (0..ELECTRODE_COUNT).filter(move |&channel| self.is_touched(channel))
    }

    /// Iterates over electrodes whose state differs from `previous`.
    pub fn changes_from(self, previous: TouchMask) -> impl Iterator<Item = ChannelEvent> {
        let changed = self.0 ^ previous.0;
        (0..ELECTRODE_COUNT)
            .filter(move |&channel| changed & (1 << channel) != 0)
            .map(move |channel| ChannelEvent {
                channel,
                touched: self.is_touched(channel),
            })
    }
}

impl From<TouchMask> for u16 {
    fn from(mask: TouchMask) -> Self {
        mask.bits()
    }
}

/// State change of a single electrode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChannelEvent {
    /// Electrode index, 0..=11.
    pub channel: u8,
    /// `true` on touch, `false` on release.
    pub touched: bool,
}

/// A report delivered to the host input subsystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TouchReport {
    /// The complete touch mask.
    Mask(TouchMask),
    /// One electrode changed state.
    Channel(ChannelEvent),
}

/// Receiver of touch reports, implemented by the host integration.
pub trait TouchSink {
    /// Accepts one report.
    fn report(&mut self, report: TouchReport);
}

impl<F> TouchSink for F
where
    F: FnMut(TouchReport),
{
    fn report(&mut self, report: TouchReport) {
        self(report)
    }
}

//! Strongly typed parameter enumerations for the MPR121 driver.
//!
//! These enums map directly to datasheet field encodings and are used across
//! [`Config`](crate::config::Config) and the register bitfields. Prefer these
//! types over raw integers to keep configuration values valid and explicit.
//!
//! # Examples
//!
//! ```rust
//! use mpr121::params::{ChargeDischargeTime, ElectrodeSampleInterval, SecondFilterIterations};
//!
//! let cdt = ChargeDischargeTime::Us0_5;
//! let sfi = SecondFilterIterations::Samples4;
//! let esi = ElectrodeSampleInterval::Ms1;
//! assert_eq!(esi.millis(), 1);
//! let _ = (cdt, sfi);
//! ```

use modular_bitfield::prelude::Specifier;

/// Baseline tracking and calibration lock selection (`ECR.CL`, bits 7:6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 2]
pub enum BaselineTracking {
    /// Tracking enabled, baseline starts from the current baseline register value.
    Enabled = 0b00,
    /// Tracking disabled (calibration lock).
    Disabled = 0b01,
    /// Tracking enabled, baseline loaded with the 5 high bits of the first sample.
    LoadHigh5Bits = 0b10,
    /// Tracking enabled, baseline loaded with all 10 bits of the first sample.
    LoadAll10Bits = 0b11,
}

/// First filter iterations (`CONFIG1.FFI`, bits 7:6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 2]
pub enum FirstFilterIterations {
    /// 6 samples (reset default).
    Samples6 = 0b00,
    /// 10 samples.
    Samples10 = 0b01,
    /// 18 samples.
    Samples18 = 0b10,
    /// 34 samples.
    Samples34 = 0b11,
}

impl FirstFilterIterations {
    /// Returns the number of samples taken by the first filter.
    pub const fn samples(self) -> u8 {
        match self {
            Self::Samples6 => 6,
            Self::Samples10 => 10,
            Self::Samples18 => 18,
            Self::Samples34 => 34,
        }
    }
}

/// Global charge/discharge time (`CONFIG2.CDT`, bits 7:5).
///
/// Encoding `000` is reserved and therefore not representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 3]
pub enum ChargeDischargeTime {
    /// 0.5 µs.
    Us0_5 = 0b001,
    /// 1 µs.
    Us1 = 0b010,
    /// 2 µs.
    Us2 = 0b011,
    /// 4 µs.
    Us4 = 0b100,
    /// 8 µs.
    Us8 = 0b101,
    /// 16 µs.
    Us16 = 0b110,
    /// 32 µs.
    Us32 = 0b111,
}

impl ChargeDischargeTime {
    /// Returns the charge time in nanoseconds.
    pub const fn nanos(self) -> u32 {
        match self {
            Self::Us0_5 => 500,
            Self::Us1 => 1_000,
            Self::Us2 => 2_000,
            Self::Us4 => 4_000,
            Self::Us8 => 8_000,
            Self::Us16 => 16_000,
            Self::Us32 => 32_000,
        }
    }
}

/// Second filter iterations (`CONFIG2.SFI`, bits 4:3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 2]
pub enum SecondFilterIterations {
    /// 4 samples.
    Samples4 = 0b00,
    /// 6 samples.
    Samples6 = 0b01,
    /// 10 samples.
    Samples10 = 0b10,
    /// 18 samples.
    Samples18 = 0b11,
}

/// Electrode sample interval (`CONFIG2.ESI`, bits 2:0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 3]
pub enum ElectrodeSampleInterval {
    /// 1 ms.
    Ms1 = 0b000,
    /// 2 ms.
    Ms2 = 0b001,
    /// 4 ms.
    Ms4 = 0b010,
    /// 8 ms.
    Ms8 = 0b011,
    /// 16 ms.
    Ms16 = 0b100,
    /// 32 ms.
    Ms32 = 0b101,
    /// 64 ms.
    Ms64 = 0b110,
    /// 128 ms.
    Ms128 = 0b111,
}

impl ElectrodeSampleInterval {
    /// Returns the sample period in milliseconds.
    pub const fn millis(self) -> u32 {
        1 << (self as u32)
    }
}

/// Behaviour of the baseline-filter tuning writes issued during initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TuningWritePolicy {
    /// Abort initialization on the first failed tuning write.
    Strict,
    /// Log failed tuning writes and keep going.
    BestEffort,
}

/// How touch state is forwarded to the host event sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReportMode {
    /// One report carrying the full 12-bit mask.
    RawMask,
    /// One report per channel whose state changed since the previous report.
    PerChannel,
}

/// Power-management transitions requested by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PmAction {
    /// Enter a low-power state.
    Suspend,
    /// Leave the low-power state.
    Resume,
}

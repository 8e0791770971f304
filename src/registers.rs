//! Register map definitions for the MPR121 capacitive touch sensor.
#![allow(unused_parens)]

use modular_bitfield::prelude::*;

use crate::params::{
    BaselineTracking, ChargeDischargeTime, ElectrodeSampleInterval, FirstFilterIterations,
    SecondFilterIterations,
};

/// Number of touch-sensing electrodes.
pub const ELECTRODE_COUNT: u8 = 12;
/// Number of measurement channels, including the proximity pseudo-electrode `ELEPROX`.
pub const CHANNEL_COUNT: u8 = 13;

/// Register address of `ELE0-7 touch status`.
pub const REG_TOUCH_STATUS_L: u8 = 0x00;
/// Register address of `ELE8-11, ELEPROX touch status`.
pub const REG_TOUCH_STATUS_H: u8 = 0x01;
/// Register address of `ELE0-7 out-of-range status`.
pub const REG_OOR_STATUS_L: u8 = 0x02;
/// Register address of `ELE8-11, ELEPROX out-of-range status`.
pub const REG_OOR_STATUS_H: u8 = 0x03;
/// Register address of `ELE0 filtered data LSB`; channels follow in LSB/MSB pairs.
pub const REG_FILTERED_DATA_0L: u8 = 0x04;
/// Register address of `ELE0 baseline value`; one byte per channel.
pub const REG_BASELINE_0: u8 = 0x1E;

/// Register address of `MHD rising`.
pub const REG_MHDR: u8 = 0x2B;
/// Register address of `NHD amount rising`.
pub const REG_NHDR: u8 = 0x2C;
/// Register address of `NCL rising`.
pub const REG_NCLR: u8 = 0x2D;
/// Register address of `FDL rising`.
pub const REG_FDLR: u8 = 0x2E;
/// Register address of `MHD falling`.
pub const REG_MHDF: u8 = 0x2F;
/// Register address of `NHD amount falling`.
pub const REG_NHDF: u8 = 0x30;
/// Register address of `NCL falling`.
pub const REG_NCLF: u8 = 0x31;
/// Register address of `FDL falling`.
pub const REG_FDLF: u8 = 0x32;
/// Register address of `NHD amount touched`.
pub const REG_NHDT: u8 = 0x33;
/// Register address of `NCL touched`.
pub const REG_NCLT: u8 = 0x34;
/// Register address of `FDL touched`.
pub const REG_FDLT: u8 = 0x35;

/// Register address of `ELE0 touch threshold`.
pub const REG_TOUCH_THRESHOLD_0: u8 = 0x41;
/// Register address of `ELE0 release threshold`.
pub const REG_RELEASE_THRESHOLD_0: u8 = 0x42;

/// Register address of `Debounce touch & release`.
pub const REG_DEBOUNCE: u8 = 0x5B;
/// Register address of `Filter/global CDC configuration` (`CONFIG1`).
pub const REG_CONFIG1: u8 = 0x5C;
/// Register address of `Filter/global CDT configuration` (`CONFIG2`).
pub const REG_CONFIG2: u8 = 0x5D;
/// Register address of `Electrode configuration` (`ECR`).
pub const REG_ECR: u8 = 0x5E;
/// Register address of `Soft reset`.
pub const REG_SOFT_RESET: u8 = 0x80;

/// Soft reset command value written to the `SOFT_RESET` register.
pub const RESET_COMMAND: u8 = 0x63;
/// `ECR` value that stops all electrodes; configuration registers may only be written in this mode.
pub const ECR_STOP: u8 = 0x00;

/// Returns the touch threshold register of `electrode`.
pub const fn touch_threshold_register(electrode: u8) -> u8 {
    REG_TOUCH_THRESHOLD_0 + 2 * electrode
}

/// Returns the release threshold register of `electrode`.
pub const fn release_threshold_register(electrode: u8) -> u8 {
    REG_RELEASE_THRESHOLD_0 + 2 * electrode
}

/// Returns the first (LSB) filtered data register of `channel`.
pub const fn filtered_data_register(channel: u8) -> u8 {
    REG_FILTERED_DATA_0L + 2 * channel
}

/// Returns the baseline value register of `channel`.
pub const fn baseline_register(channel: u8) -> u8 {
    REG_BASELINE_0 + channel
}

/// Access permissions encoded for each register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterAccess {
    /// Read-only register.
    ReadOnly,
    /// Write-only register.
    WriteOnly,
    /// Read/write register.
    ReadWrite,
}

/// Minimal metadata exposed by every register value type.
pub trait Register {
    /// Raw storage backing the register payload.
    type Raw: Copy;
    /// Register address as documented in the datasheet.
    const ADDRESS: u8;
    /// Access permission classification.
    const ACCESS: RegisterAccess;
    /// Value held after power-on or soft reset.
    const RESET_VALUE: Self::Raw;
}

/// Bitfield representation of the `ECR` register (address `0x5E`).
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElectrodeControl {
    // Number of enabled electrodes, counted from ELE0 (bits 3:0).
    pub electrodes: B4,
    // Proximity detection electrode selection, zero disables it (bits 5:4).
    pub proximity: B2,
    // Calibration lock / baseline tracking selection (bits 7:6).
    pub baseline_tracking: BaselineTracking,
}

impl ElectrodeControl {
    /// Run-mode value enabling `electrodes` with baseline tracking on and proximity off.
    pub fn running(electrodes: u8) -> Self {
        Self::new()
            .with_electrodes(electrodes)
            .with_proximity(0)
            .with_baseline_tracking(BaselineTracking::LoadHigh5Bits)
    }

    /// Returns `true` when any electrode is enabled.
    pub fn is_running(self) -> bool {
        self.electrodes() != 0 || self.proximity() != 0
    }
}

impl From<u8> for ElectrodeControl {
    fn from(value: u8) -> Self {
        Self::from_bytes([value])
    }
}

impl From<ElectrodeControl> for u8 {
    fn from(value: ElectrodeControl) -> Self {
        value.into_bytes()[0]
    }
}

/// Bitfield representation of the `CONFIG1` register (address `0x5C`).
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config1 {
    // Global charge/discharge current in µA (bits 5:0).
    pub charge_current: B6,
    // First filter iterations (bits 7:6).
    pub first_filter: FirstFilterIterations,
}

impl From<u8> for Config1 {
    fn from(value: u8) -> Self {
        Self::from_bytes([value])
    }
}

impl From<Config1> for u8 {
    fn from(value: Config1) -> Self {
        value.into_bytes()[0]
    }
}

/// Bitfield representation of the `CONFIG2` register (address `0x5D`).
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config2 {
    // Electrode sample interval (bits 2:0).
    pub sample_interval: ElectrodeSampleInterval,
    // Second filter iterations (bits 4:3).
    pub second_filter: SecondFilterIterations,
    // Global charge/discharge time (bits 7:5).
    pub charge_time: ChargeDischargeTime,
}

impl From<u8> for Config2 {
    fn from(value: u8) -> Self {
        Self::from_bytes([value])
    }
}

impl From<Config2> for u8 {
    fn from(value: Config2) -> Self {
        value.into_bytes()[0]
    }
}

/// Bitfield representation of the `DEBOUNCE` register (address `0x5B`).
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Debounce {
    // Consecutive detections required to report a touch (bits 2:0).
    pub touch: B3,
    #[skip]
    __: B1,
    // Consecutive detections required to report a release (bits 6:4).
    pub release: B3,
    #[skip]
    __: B1,
}

impl From<u8> for Debounce {
    fn from(value: u8) -> Self {
        Self::from_bytes([value])
    }
}

impl From<Debounce> for u8 {
    fn from(value: Debounce) -> Self {
        value.into_bytes()[0]
    }
}

impl Register for ElectrodeControl {
    type Raw = u8;
    const ADDRESS: u8 = REG_ECR;
    const ACCESS: RegisterAccess = RegisterAccess::ReadWrite;
    const RESET_VALUE: Self::Raw = 0x00;
}

impl Register for Config1 {
    type Raw = u8;
    const ADDRESS: u8 = REG_CONFIG1;
    const ACCESS: RegisterAccess = RegisterAccess::ReadWrite;
    const RESET_VALUE: Self::Raw = 0x24;
}

impl Register for Config2 {
    type Raw = u8;
    const ADDRESS: u8 = REG_CONFIG2;
    const ACCESS: RegisterAccess = RegisterAccess::ReadWrite;
    const RESET_VALUE: Self::Raw = 0x24;
}

impl Register for Debounce {
    type Raw = u8;
    const ADDRESS: u8 = REG_DEBOUNCE;
    const ACCESS: RegisterAccess = RegisterAccess::ReadWrite;
    const RESET_VALUE: Self::Raw = 0x00;
}

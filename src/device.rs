//! High-level MPR121 device driver implementation.

use crate::config::{Config, ConfigError};
use crate::error::{Error, Result};
use crate::interface::Mpr121Interface;
use crate::interface::i2c::I2cInterface;
use crate::log::{debug, error, info, trace, warn};
use crate::params::{PmAction, ReportMode, TuningWritePolicy};
use crate::registers::{
    CHANNEL_COUNT,
    Config1,
    ECR_STOP,
    ELECTRODE_COUNT,
    ElectrodeControl,
    REG_CONFIG1,
    REG_CONFIG2,
    REG_DEBOUNCE,
    REG_FDLF,
    REG_FDLR,
    REG_FDLT,
    REG_MHDF,
    REG_MHDR,
    REG_NCLF,
    REG_NCLR,
    REG_NCLT,
    REG_NHDF,
    REG_NHDR,
    REG_NHDT,
    REG_OOR_STATUS_L,
    REG_SOFT_RESET,
    REG_TOUCH_STATUS_L,
    RESET_COMMAND,
    Register,
    baseline_register,
    filtered_data_register,
    release_threshold_register,
    touch_threshold_register,
};
use crate::report::{TouchMask, TouchReport, TouchSink};
use crate::work::WorkSlot;
use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

// Supply settle time before the first bus access (milliseconds).
const POWER_UP_SETTLE_DELAY_MS: u32 = 10;
// Time for the soft reset to complete (milliseconds).
const SOFT_RESET_DELAY_MS: u32 = 1;
// Filtered data is 10 bits wide.
const FILTERED_DATA_MASK: u16 = 0x03FF;
// Number of register writes in the baseline filter tuning sequence.
const TUNING_WRITES: usize = 14;

/// Lifecycle of the sensor as driven by [`Mpr121::init`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DeviceState {
    /// Nothing has been sent to the device yet.
    Uninitialized,
    /// Soft reset issued, electrodes not yet stopped explicitly.
    Resetting,
    /// Electrodes stopped; configuration registers may be written.
    StoppedConfiguring,
    /// Electrodes enabled and sensing.
    Running,
    /// Bring-up aborted; the device must be initialized again from scratch.
    Failed,
}

/// High-level synchronous driver for the MPR121 touch sensor.
///
/// One instance owns one bus binding and the runtime touch state of that device.
pub struct Mpr121<IFACE> {
    interface: IFACE,
    config: Config,
    state: DeviceState,
    touch_status: TouchMask,
}

impl<IFACE> Mpr121<IFACE> {
    // ==================================================================
    // == Driver Construction & Ownership ===============================
    // ==================================================================
    /// Creates a new driver instance from the provided bus interface.
    pub fn new(interface: IFACE, config: Config) -> Self {
        Self {
            interface,
            config,
            state: DeviceState::Uninitialized,
            touch_status: TouchMask::NONE,
        }
    }

    /// Consumes the driver and returns the owned interface.
    pub fn release(self) -> (IFACE, Config) {
        (self.interface, self.config)
    }

    /// Provides mutable access to the underlying interface.
    pub fn interface_mut(&mut self) -> &mut IFACE {
        &mut self.interface
    }

    /// Returns a shared reference to the active configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Current lifecycle state.
    pub fn state(&self) -> DeviceState {
        self.state
    }

    /// Touch mask captured by the most recent status read.
    pub fn touch_status(&self) -> TouchMask {
        self.touch_status
    }
}

impl<I2C> Mpr121<I2cInterface<I2C>>
where
    I2C: I2c,
{
    // ==================================================================
    // == I2C Convenience Constructors ==================================
    // ==================================================================
    /// Convenience constructor for I2C transports at the default address.
    pub fn new_i2c(i2c: I2C, config: Config) -> Self {
        Self::new(I2cInterface::new(i2c), config)
    }

    /// Convenience constructor for I2C transports at a strapped address.
    pub fn new_i2c_with_address(i2c: I2C, address: u8, config: Config) -> Self {
        Self::new(I2cInterface::with_address(i2c, address), config)
    }

    /// Releases the driver, returning the I2C bus and configuration.
    pub fn release_i2c(self) -> (I2C, Config) {
        let (iface, config) = self.release();
        (iface.release(), config)
    }
}

impl<IFACE, CommE> Mpr121<IFACE>
where
    IFACE: Mpr121Interface<Error = CommE>,
{
    // ==================================================================
    // == Initialization ================================================
    // ==================================================================
    /// Runs the bring-up sequence and starts capacitive sensing.
    ///
    /// Order: settle, soft reset, stop electrodes, check `CONFIG1` holds its reset default,
    /// program thresholds and filter tuning, then enable electrodes. Any failure leaves the
    /// device in [`DeviceState::Failed`]; call `init` again to retry from the start.
    pub fn init(&mut self, delay: &mut impl DelayNs) -> Result<(), CommE> {
        self.config.validate().map_err(|_| Error::InvalidConfig)?;

        info!("mpr121: init");
        if self.config.release_threshold > self.config.touch_threshold {
            warn!(
                "mpr121: release threshold {} above touch threshold {}",
                self.config.release_threshold,
                self.config.touch_threshold
            );
        }
        match self.bring_up(delay) {
            Ok(()) => {
                info!("mpr121: running with {} electrodes", self.config.electrode_count);
                Ok(())
            }
            Err(err) => {
                error!("mpr121: init failed in state {:?}", self.state);
                self.state = DeviceState::Failed;
                Err(err)
            }
        }
    }

    fn bring_up(&mut self, delay: &mut impl DelayNs) -> Result<(), CommE> {
        delay.delay_ms(POWER_UP_SETTLE_DELAY_MS);
        self.soft_reset(delay)?;
        self.stop()?;

        let config1 = self.read_config(1)?;
        if config1 != Config1::RESET_VALUE {
            error!("mpr121: config1 is {:#x} after reset", config1);
            return Err(Error::UnexpectedResetState { config1 });
        }

        self.set_thresholds(self.config.touch_threshold, self.config.release_threshold)?;
        self.apply_tuning()?;
        self.run(self.config.electrode_count)?;

        self.touch_status = TouchMask::NONE;
        Ok(())
    }

    /// Issues a soft reset and waits for it to complete.
    ///
    /// The device comes back with all electrodes stopped and registers at their defaults.
    pub fn soft_reset(&mut self, delay: &mut impl DelayNs) -> Result<(), CommE> {
        self.state = DeviceState::Resetting;
        self.interface
            .write_register(REG_SOFT_RESET, RESET_COMMAND)
            .map_err(|err| {
                error!("mpr121: soft reset write failed");
                Error::Interface(err)
            })?;
        delay.delay_ms(SOFT_RESET_DELAY_MS);
        Ok(())
    }

    // ==================================================================
    // == Mode Control ===================================================
    // ==================================================================
    /// Stops all electrodes so configuration registers can be written.
    pub fn stop(&mut self) -> Result<(), CommE> {
        self.interface
            .write_register(ElectrodeControl::ADDRESS, ECR_STOP)
            .map_err(|err| {
                error!("mpr121: can't set stop mode");
                Error::Interface(err)
            })?;
        self.state = DeviceState::StoppedConfiguring;
        Ok(())
    }

    /// Enables `electrode_count` electrodes with baseline tracking on and proximity off.
    pub fn run(&mut self, electrode_count: u8) -> Result<(), CommE> {
        if electrode_count > ELECTRODE_COUNT {
            return Err(Error::InvalidArgument);
        }

        let ecr = ElectrodeControl::running(electrode_count);
        self.interface
            .write_register(ElectrodeControl::ADDRESS, u8::from(ecr))
            .map_err(|err| {
                error!("mpr121: can't set run mode");
                Error::Interface(err)
            })?;
        self.state = DeviceState::Running;
        Ok(())
    }

    // ==================================================================
    // == Configuration Registers ========================================
    // ==================================================================
    /// Writes the same touch and release threshold to every electrode.
    ///
    /// Electrodes are programmed in order, touch before release. The first failure aborts
    /// and leaves the remaining electrodes untouched.
    pub fn set_thresholds(&mut self, touch: u8, release: u8) -> Result<(), CommE> {
        for electrode in 0..ELECTRODE_COUNT {
            self.interface
                .write_register(touch_threshold_register(electrode), touch)
                .and_then(|()| {
                    self.interface
                        .write_register(release_threshold_register(electrode), release)
                })
                .map_err(|err| {
                    error!("mpr121: failed to set thresholds of electrode {}", electrode);
                    Error::Interface(err)
                })?;
        }
        Ok(())
    }

    /// Reads `CONFIG1` (`which == 1`) or `CONFIG2` (`which == 2`).
    pub fn read_config(&mut self, which: u8) -> Result<u8, CommE> {
        let register = match which {
            1 => REG_CONFIG1,
            2 => REG_CONFIG2,
            _ => return Err(Error::InvalidArgument),
        };

        let value = self.interface.read_register(register)?;
        debug!("mpr121: config{} = {:#x}", which, value);
        Ok(value)
    }

    fn apply_tuning(&mut self) -> Result<(), CommE> {
        let sequence = tuning_sequence(&self.config).map_err(|_| Error::InvalidConfig)?;
        for (register, value) in sequence {
            if let Err(err) = self.interface.write_register(register, value) {
                match self.config.tuning_policy {
                    TuningWritePolicy::Strict => {
                        error!("mpr121: tuning write to {:#x} failed", register);
                        return Err(Error::Interface(err));
                    }
                    TuningWritePolicy::BestEffort => {
                        warn!("mpr121: tuning write to {:#x} failed, continuing", register);
                    }
                }
            }
        }
        Ok(())
    }

    // ==================================================================
    // == Touch Status ===================================================
    // ==================================================================
    /// Reads the touch status of all twelve electrodes.
    ///
    /// A failed read yields [`TouchMask::NONE`] instead of an error so a bus glitch is never
    /// mistaken for a touch. The failure is logged.
    pub fn get_touched(&mut self) -> TouchMask {
        let mut raw = [0u8; 2];
        let mask = match self.interface.read_many(REG_TOUCH_STATUS_L, &mut raw) {
            Ok(()) => TouchMask::from_status_bytes(raw[0], raw[1]),
            Err(_) => {
                error!("mpr121: touch status read failed, reporting no touch");
                TouchMask::NONE
            }
        };

        self.touch_status = mask;
        mask
    }

    /// Reads the touch status and forwards it to `sink` according to the configured
    /// [`ReportMode`]. Meant to run on the deferred work context.
    pub fn report_data(&mut self, sink: &mut impl TouchSink) -> TouchMask {
        let previous = self.touch_status;
        let mask = self.get_touched();
        trace!("mpr121: touch status {:#x}", mask.bits());

        match self.config.report_mode {
            ReportMode::RawMask => sink.report(TouchReport::Mask(mask)),
            ReportMode::PerChannel => {
                for event in mask.changes_from(previous) {
                    sink.report(TouchReport::Channel(event));
                }
            }
        }

        mask
    }

    /// Claims the request pending in `slot` and runs [`Mpr121::report_data`] for it.
    ///
    /// The slot is owned by the host so interrupt handlers can schedule through a shared
    /// reference (typically a `static`) while this runs. Requests claimed before the
    /// electrodes are running are dropped without touching the bus.
    pub fn process_pending(
        &mut self,
        slot: &WorkSlot,
        sink: &mut impl TouchSink,
    ) -> Option<TouchMask> {
        if !slot.take() {
            return None;
        }

        if self.state != DeviceState::Running {
            debug!("mpr121: dropping report requested in state {:?}", self.state);
            return None;
        }

        Some(self.report_data(sink))
    }

    // ==================================================================
    // == Diagnostics ====================================================
    // ==================================================================
    /// Reads the 10-bit filtered data of `channel` (0..=12, 12 being `ELEPROX`).
    pub fn filtered_data(&mut self, channel: u8) -> Result<u16, CommE> {
        if channel >= CHANNEL_COUNT {
            return Err(Error::InvalidArgument);
        }

        let mut raw = [0u8; 2];
        self.interface
            .read_many(filtered_data_register(channel), &mut raw)?;
        Ok(u16::from_le_bytes(raw) & FILTERED_DATA_MASK)
    }

    /// Reads the baseline of `channel`, scaled to the 10-bit filtered data range.
    pub fn baseline(&mut self, channel: u8) -> Result<u16, CommE> {
        if channel >= CHANNEL_COUNT {
            return Err(Error::InvalidArgument);
        }

        let value = self.interface.read_register(baseline_register(channel))?;
        Ok(u16::from(value) << 2)
    }

    /// Reads the raw out-of-range status word (`ELE0`..`ELEPROX`, plus the auto-config flags).
    pub fn out_of_range_status(&mut self) -> Result<u16, CommE> {
        let mut raw = [0u8; 2];
        self.interface.read_many(REG_OOR_STATUS_L, &mut raw)?;
        Ok(u16::from_le_bytes(raw))
    }

    // ==================================================================
    // == Power Management ===============================================
    // ==================================================================
    /// Power-management hook. Suspend and resume are not implemented.
    pub fn pm_action(&mut self, action: PmAction) -> Result<(), CommE> {
        debug!("mpr121: pm action {:?} not supported", action);
        Err(Error::NotSupported)
    }
}

/// Baseline filter, debounce and operational `CONFIG1`/`CONFIG2` writes, in issue order.
fn tuning_sequence(
    config: &Config,
) -> core::result::Result<[(u8, u8); TUNING_WRITES], ConfigError> {
    let filter = &config.filter;
    Ok([
        (REG_MHDR, filter.rising.max_half_delta),
        (REG_NHDR, filter.rising.noise_half_delta),
        (REG_NCLR, filter.rising.noise_count_limit),
        (REG_FDLR, filter.rising.filter_delay_limit),
        (REG_MHDF, filter.falling.max_half_delta),
        (REG_NHDF, filter.falling.noise_half_delta),
        (REG_NCLF, filter.falling.noise_count_limit),
        (REG_FDLF, filter.falling.filter_delay_limit),
        (REG_NHDT, filter.touched.noise_half_delta),
        (REG_NCLT, filter.touched.noise_count_limit),
        (REG_FDLT, filter.touched.filter_delay_limit),
        (REG_DEBOUNCE, u8::from(config.debounce()?)),
        (REG_CONFIG1, u8::from(config.config1()?)),
        (REG_CONFIG2, u8::from(config.config2())),
    ])
}

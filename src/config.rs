//! Configuration primitives for the MPR121 driver.

use crate::params::{
    ChargeDischargeTime,
    ElectrodeSampleInterval,
    FirstFilterIterations,
    ReportMode,
    SecondFilterIterations,
    TuningWritePolicy,
};
use crate::registers::{Config1, Config2, Debounce, ELECTRODE_COUNT};

/// Largest charge current selectable through `CONFIG1.CDC`, in µA.
pub const MAX_CHARGE_CURRENT_UA: u8 = 63;
/// Largest debounce count accepted by the `DEBOUNCE` register.
pub const MAX_DEBOUNCE: u8 = 7;

/// Baseline filter parameters for one filter direction.
///
/// `max_half_delta` is ignored by the touched filter, which has no MHD register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FilterParams {
    /// Maximum half delta (MHD).
    pub max_half_delta: u8,
    /// Noise half delta (NHD).
    pub noise_half_delta: u8,
    /// Noise count limit (NCL).
    pub noise_count_limit: u8,
    /// Filter delay count limit (FDL).
    pub filter_delay_limit: u8,
}

impl FilterParams {
    /// Creates a new parameter set.
    pub const fn new(
        max_half_delta: u8,
        noise_half_delta: u8,
        noise_count_limit: u8,
        filter_delay_limit: u8,
    ) -> Self {
        Self {
            max_half_delta,
            noise_half_delta,
            noise_count_limit,
            filter_delay_limit,
        }
    }
}

/// Adaptive baseline filter tuning applied while electrodes are stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BaselineFilter {
    /// Parameters used when the measured data is above the baseline.
    pub rising: FilterParams,
    /// Parameters used when the measured data is below the baseline.
    pub falling: FilterParams,
    /// Parameters used while an electrode is touched.
    pub touched: FilterParams,
}

impl Default for BaselineFilter {
    fn default() -> Self {
        Self {
            rising: FilterParams::new(0x01, 0x01, 0x0E, 0x00),
            falling: FilterParams::new(0x01, 0x05, 0x01, 0x00),
            touched: FilterParams::new(0x00, 0x00, 0x00, 0x00),
        }
    }
}

/// User-facing configuration for the MPR121 sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// Touch threshold written to every electrode.
    pub touch_threshold: u8,
    /// Release threshold written to every electrode.
    pub release_threshold: u8,
    /// Number of electrodes enabled when entering run mode.
    pub electrode_count: u8,
    /// Baseline filter tuning.
    pub filter: BaselineFilter,
    /// Consecutive detections required before a touch is reported.
    pub debounce_touch: u8,
    /// Consecutive detections required before a release is reported.
    pub debounce_release: u8,
    /// Global charge/discharge current in µA.
    pub charge_current: u8,
    /// First filter iterations.
    pub first_filter: FirstFilterIterations,
    /// Global charge/discharge time.
    pub charge_time: ChargeDischargeTime,
    /// Second filter iterations.
    pub second_filter: SecondFilterIterations,
    /// Electrode sample interval.
    pub sample_interval: ElectrodeSampleInterval,
    /// Failure handling for the filter tuning writes.
    pub tuning_policy: TuningWritePolicy,
    /// Encoding used when forwarding touch state to the host.
    pub report_mode: ReportMode,
}

impl Config {
    /// Begins building a [`Config`] using the builder pattern.
    pub fn new() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// Checks whether this configuration is valid according to datasheet rules.
    pub fn validate(&self) -> core::result::Result<(), ConfigError> {
        if self.electrode_count > ELECTRODE_COUNT {
            return Err(ConfigError::ElectrodeCountOutOfRange);
        }

        if self.charge_current > MAX_CHARGE_CURRENT_UA {
            return Err(ConfigError::ChargeCurrentOutOfRange);
        }

        if self.debounce_touch > MAX_DEBOUNCE || self.debounce_release > MAX_DEBOUNCE {
            return Err(ConfigError::DebounceOutOfRange);
        }

        Ok(())
    }

    /// Encoded operational `CONFIG1` value.
    pub fn config1(&self) -> core::result::Result<Config1, ConfigError> {
        Config1::new()
            .with_first_filter(self.first_filter)
            .with_charge_current_checked(self.charge_current)
            .map_err(|_| ConfigError::ChargeCurrentOutOfRange)
    }

    /// Encoded operational `CONFIG2` value.
    pub fn config2(&self) -> Config2 {
        Config2::new()
            .with_charge_time(self.charge_time)
            .with_second_filter(self.second_filter)
            .with_sample_interval(self.sample_interval)
    }

    /// Encoded `DEBOUNCE` value.
    pub fn debounce(&self) -> core::result::Result<Debounce, ConfigError> {
        Debounce::new()
            .with_touch_checked(self.debounce_touch)
            .and_then(|debounce| debounce.with_release_checked(self.debounce_release))
            .map_err(|_| ConfigError::DebounceOutOfRange)
    }
}

/// Builder for [`Config`] allowing piecemeal construction.
#[derive(Debug, Clone, Copy)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Creates a new builder seeded with [`Config::default()`].
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// Sets the touch and release thresholds applied to every electrode.
    pub fn thresholds(mut self, touch: u8, release: u8) -> Self {
        self.config.touch_threshold = touch;
        self.config.release_threshold = release;
        self
    }

    /// Sets how many electrodes run, counted from ELE0.
    pub fn electrode_count(mut self, count: u8) -> Self {
        self.config.electrode_count = count;
        self
    }

    /// Overrides the baseline filter tuning.
    pub fn filter(mut self, filter: BaselineFilter) -> Self {
        self.config.filter = filter;
        self
    }

    /// Sets the touch and release debounce counts.
    pub fn debounce(mut self, touch: u8, release: u8) -> Self {
        self.config.debounce_touch = touch;
        self.config.debounce_release = release;
        self
    }

    /// Sets the global charge current in µA.
    pub fn charge_current(mut self, micro_amps: u8) -> Self {
        self.config.charge_current = micro_amps;
        self
    }

    /// Sets the first filter iterations.
    pub fn first_filter(mut self, iterations: FirstFilterIterations) -> Self {
        self.config.first_filter = iterations;
        self
    }

    /// Sets the global charge time.
    pub fn charge_time(mut self, time: ChargeDischargeTime) -> Self {
        self.config.charge_time = time;
        self
    }

    /// Sets the second filter iterations.
    pub fn second_filter(mut self, iterations: SecondFilterIterations) -> Self {
        self.config.second_filter = iterations;
        self
    }

    /// Sets the electrode sample interval.
    pub fn sample_interval(mut self, interval: ElectrodeSampleInterval) -> Self {
        self.config.sample_interval = interval;
        self
    }

    /// Selects how failed tuning writes are handled during initialization.
    pub fn tuning_policy(mut self, policy: TuningWritePolicy) -> Self {
        self.config.tuning_policy = policy;
        self
    }

    /// Selects how touch state is forwarded to the host.
    pub fn report_mode(mut self, mode: ReportMode) -> Self {
        self.config.report_mode = mode;
        self
    }

    /// Finalizes the builder and returns the [`Config`].
    pub fn build(self) -> Config {
        self.config
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            touch_threshold: 12,
            release_threshold: 6,
            electrode_count: ELECTRODE_COUNT,
            filter: BaselineFilter::default(),
            debounce_touch: 0,
            debounce_release: 0,
            charge_current: 16,
            first_filter: FirstFilterIterations::Samples6,
            charge_time: ChargeDischargeTime::Us0_5,
            second_filter: SecondFilterIterations::Samples4,
            sample_interval: ElectrodeSampleInterval::Ms1,
            tuning_policy: TuningWritePolicy::Strict,
            report_mode: ReportMode::RawMask,
        }
    }
}

/// Validation errors generated while verifying a [`Config`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// More than twelve electrodes requested.
    ElectrodeCountOutOfRange,
    /// Charge current exceeds the 6-bit `CDC` field.
    ChargeCurrentOutOfRange,
    /// Debounce count exceeds the 3-bit field.
    DebounceOutOfRange,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_encode_operational_values() {
        let config = Config::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.config1().map(u8::from), Ok(0x10));
        assert_eq!(u8::from(config.config2()), 0x20);
        assert_eq!(config.debounce().map(u8::from), Ok(0x00));
    }

    #[test]
    fn builder_overrides_fields() {
        let config = Config::new()
            .thresholds(40, 20)
            .electrode_count(4)
            .debounce(1, 2)
            .report_mode(ReportMode::PerChannel)
            .build();

        assert_eq!(config.touch_threshold, 40);
        assert_eq!(config.release_threshold, 20);
        assert_eq!(config.electrode_count, 4);
        assert_eq!(config.debounce().map(u8::from), Ok(0x21));
        assert_eq!(config.report_mode, ReportMode::PerChannel);
    }

    #[test]
    fn validate_rejects_out_of_range_fields() {
        let too_many = Config::new().electrode_count(13).build();
        assert_eq!(too_many.validate(), Err(ConfigError::ElectrodeCountOutOfRange));

        let current = Config::new().charge_current(64).build();
        assert_eq!(current.validate(), Err(ConfigError::ChargeCurrentOutOfRange));

        let debounce = Config::new().debounce(8, 0).build();
        assert_eq!(debounce.validate(), Err(ConfigError::DebounceOutOfRange));

    }

    #[test]
    fn release_above_touch_is_accepted() {
        let inverted = Config::new().thresholds(6, 12).build();
        assert_eq!(inverted.validate(), Ok(()));
    }

    #[test]
    fn encoders_reject_values_wider_than_their_fields() {
        let mut config = Config::default();
        config.charge_current = 64;
        assert_eq!(config.config1(), Err(ConfigError::ChargeCurrentOutOfRange));

        config.debounce_release = 8;
        assert_eq!(config.debounce(), Err(ConfigError::DebounceOutOfRange));

        config.debounce_release = 7;
        config.debounce_touch = 9;
        assert_eq!(config.debounce(), Err(ConfigError::DebounceOutOfRange));
    }
}

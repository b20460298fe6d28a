use crate::register::config::IIRFilterCoefficient;
use crate::register::odr::OutputDataRate;
use crate::register::osr::Oversampling;

/// Sensor settings applied by [`Bmp390::apply_configuration`](crate::Bmp390::apply_configuration)
/// and read back by [`Bmp390::configuration`](crate::Bmp390::configuration).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Configuration {
    pub(crate) enable_pressure: bool,
    pub(crate) enable_temperature: bool,
    pub(crate) output_data_rate: OutputDataRate,
    pub(crate) pressure_oversampling: Oversampling,
    pub(crate) temperature_oversampling: Oversampling,
    pub(crate) iir_filter_coefficient: IIRFilterCoefficient,
}

impl Default for Configuration {
    /// Both sensors on, pressure ×8 / temperature ×1, IIR 15 at 50 Hz.
    fn default() -> Self {
        Self {
            enable_pressure: true,
            enable_temperature: true,
            output_data_rate: OutputDataRate::R50Hz,
            pressure_oversampling: Oversampling::X8,
            temperature_oversampling: Oversampling::X1,
            iir_filter_coefficient: IIRFilterCoefficient::Coef15,
        }
    }
}

impl Configuration {
    pub fn enable_pressure(mut self, enable: bool) -> Self {
        self.enable_pressure = enable;
        self
    }

    /// Pressure compensation needs a temperature from the same cycle, so disabling temperature only
    /// makes sense together with pressure.
    pub fn enable_temperature(mut self, enable: bool) -> Self {
        self.enable_temperature = enable;
        self
    }

    pub fn oversampling(mut self, pressure: Oversampling, temperature: Oversampling) -> Self {
        self.pressure_oversampling = pressure;
        self.temperature_oversampling = temperature;
        self
    }

    pub fn output_data_rate(mut self, rate: OutputDataRate) -> Self {
        self.output_data_rate = rate;
        self
    }

    pub fn iir_filter(mut self, coefficient: IIRFilterCoefficient) -> Self {
        self.iir_filter_coefficient = coefficient;
        self
    }

    pub fn pressure_enabled(&self) -> bool {
        self.enable_pressure
    }

    pub fn temperature_enabled(&self) -> bool {
        self.enable_temperature
    }

    /// `(pressure, temperature)` oversampling.
    pub fn oversampling_settings(&self) -> (Oversampling, Oversampling) {
        (self.pressure_oversampling, self.temperature_oversampling)
    }

    pub fn output_data_rate_setting(&self) -> OutputDataRate {
        self.output_data_rate
    }

    pub fn iir_filter_setting(&self) -> IIRFilterCoefficient {
        self.iir_filter_coefficient
    }

    pub fn from_preset(p: Preset) -> Self {
        p.into()
    }
}

/// Recommended settings for the use cases in section 3.5 of the datasheet.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Preset {
    HandheldLowPower,
    HandheldDynamic,
    WeatherMonitoring,
    DropDetection,
    IndoorNavigation,
    Drone,
    IndoorLocalization,
}

impl From<Preset> for Configuration {
    fn from(p: Preset) -> Self {
        use IIRFilterCoefficient::*;
        use Oversampling::*;

        let (osr_p, osr_t, iir, odr) = match p {
            Preset::HandheldLowPower => (X8, X1, Coef3, OutputDataRate::R12p5Hz),
            Preset::HandheldDynamic => (X4, X1, Coef15, OutputDataRate::R50Hz),
            Preset::WeatherMonitoring => (X1, X1, Coef0, OutputDataRate::R0p01Hz),
            Preset::DropDetection => (X2, X1, Coef0, OutputDataRate::R100Hz),
            Preset::IndoorNavigation => (X16, X2, Coef15, OutputDataRate::R25Hz),
            Preset::Drone => (X8, X1, Coef3, OutputDataRate::R50Hz),
            Preset::IndoorLocalization => (X1, X1, Coef15, OutputDataRate::R0p78Hz),
        };

        Configuration::default()
            .oversampling(osr_p, osr_t)
            .iir_filter(iir)
            .output_data_rate(odr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings() {
        let config = Configuration::default();

        assert!(config.pressure_enabled());
        assert!(config.temperature_enabled());
        assert_eq!((Oversampling::X8, Oversampling::X1), config.oversampling_settings());
        assert_eq!(IIRFilterCoefficient::Coef15, config.iir_filter_setting());
        assert_eq!(OutputDataRate::R50Hz, config.output_data_rate_setting());
    }

    #[test]
    fn builder_overrides_defaults() {
        let config = Configuration::default()
            .oversampling(Oversampling::X32, Oversampling::X1)
            .enable_temperature(false);

        assert_eq!(Oversampling::X32, config.pressure_oversampling);
        assert_eq!(Oversampling::X1, config.temperature_oversampling);
        assert!(!config.enable_temperature);
        assert!(config.enable_pressure);
    }

    #[test]
    fn presets() {
        let config = Configuration::from_preset(Preset::IndoorNavigation);
        assert_eq!((Oversampling::X16, Oversampling::X2), config.oversampling_settings());
        assert_eq!(OutputDataRate::R25Hz, config.output_data_rate);

        let config = Configuration::from(Preset::WeatherMonitoring);
        assert_eq!(IIRFilterCoefficient::Coef0, config.iir_filter_coefficient);
        assert_eq!(OutputDataRate::R0p01Hz, config.output_data_rate);

        let config = Configuration::from(Preset::HandheldLowPower);
        assert_eq!(Oversampling::X8, config.pressure_oversampling);
        assert_eq!(IIRFilterCoefficient::Coef3, config.iir_filter_coefficient);
    }

    #[test]
    fn every_preset_matches_datasheet_table() {
        use IIRFilterCoefficient::*;
        use Oversampling::*;

        let table = [
            (Preset::HandheldLowPower, X8, X1, Coef3, OutputDataRate::R12p5Hz),
            (Preset::HandheldDynamic, X4, X1, Coef15, OutputDataRate::R50Hz),
            (Preset::WeatherMonitoring, X1, X1, Coef0, OutputDataRate::R0p01Hz),
            (Preset::DropDetection, X2, X1, Coef0, OutputDataRate::R100Hz),
            (Preset::IndoorNavigation, X16, X2, Coef15, OutputDataRate::R25Hz),
            (Preset::Drone, X8, X1, Coef3, OutputDataRate::R50Hz),
            (Preset::IndoorLocalization, X1, X1, Coef15, OutputDataRate::R0p78Hz),
        ];

        for (preset, osr_p, osr_t, iir, odr) in table {
            let config = Configuration::from_preset(preset);

            assert_eq!((osr_p, osr_t), config.oversampling_settings(), "{:?}", preset);
            assert_eq!(iir, config.iir_filter_setting(), "{:?}", preset);
            assert_eq!(odr, config.output_data_rate_setting(), "{:?}", preset);
            assert!(config.pressure_enabled() && config.temperature_enabled());
        }
    }
}

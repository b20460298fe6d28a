use embedded_hal::i2c::SevenBitAddress;
use log::{debug, warn};

use crate::bus::{I2c, Transport};
use crate::calibration::CalibrationCoefficients;
use crate::compensation::CompensationEngine;
use crate::config::Configuration;
use crate::error::{Bmp390Error, BusError, ConfigurationError, MeasurementError};
use crate::measurement::Measurement;
use crate::register::config::{IIRFilterCoefficient, IirFilter};
use crate::register::data::{RawPressure, RawTemperature};
use crate::register::odr::{Odr, OutputDataRate};
use crate::register::osr::{OsrCfg, Oversampling, PressureOversampling, TemperatureOversampling};
use crate::register::pwr_ctrl::{self, PwrCtrl, PwrCtrlFlags};
use crate::register::{Field, Reg, RegisterAccess};

/// Type alias for a Bmp390 chip communicating over I2C
pub type Bmp390I2c<T> = Bmp390<I2c<T>>;

/// Type alias used to simplify return types throughout the driver
pub type Bmp390Result<T, E> = Result<T, Bmp390Error<E>>;

/// The I2C address used when nothing else is specified (SDO pulled high).
pub const DEFAULT_ADDRESS: SevenBitAddress = 0x77;

/// Main Bmp390 driver struct
///
/// Owns the transport, the calibration coefficients of this particular chip and the retained
/// temperature used for pressure compensation. Every bus operation takes `&mut self`, so sharing a
/// device between threads needs an external lock.
pub struct Bmp390<T> {
    regs: RegisterAccess<T>,
    engine: CompensationEngine,
}

impl<T> Bmp390I2c<T>
where
    T: embedded_hal::i2c::I2c,
{
    /// Constructs a new Bmp390 driver instance that communicates over I2C
    ///
    /// This function will:
    /// - Load calibration coefficients from NVM
    /// - Set the sensor enable bits in PWR_CTRL
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # use embedded_hal::i2c::I2c;
    /// # use bmp390_blocking::Bmp390Result;
    /// use bmp390_blocking::{Bmp390, SdoPinState};
    /// # fn demo<I: I2c>(i2c: I) -> Bmp390Result<(), I::Error> {
    ///
    /// let mut device = Bmp390::new_i2c(i2c, SdoPinState::High)?;
    /// let measurement = device.measure()?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new_i2c(i2c: T, sdo_pin_state: SdoPinState) -> Bmp390Result<Self, T::Error> {
        Self::new(I2c::new(i2c), sdo_pin_state.into())
    }
}

impl<T> Bmp390<T>
where
    T: Transport,
{
    /// Creates a new instance of the Bmp390 driver on an arbitrary [`Transport`].
    pub fn new(transport: T, address: SevenBitAddress) -> Bmp390Result<Self, T::Error> {
        let mut regs = RegisterAccess::new(transport, address);
        let engine = Self::initialize(&mut regs)?;

        Ok(Bmp390 { regs, engine })
    }

    /// Like [`new`](Self::new), then applies `config`.
    pub fn with_configuration(
        transport: T,
        address: SevenBitAddress,
        config: &Configuration,
    ) -> Bmp390Result<Self, T::Error> {
        let mut device = Self::new(transport, address)?;
        device.apply_configuration(config)?;

        Ok(device)
    }

    fn initialize(regs: &mut RegisterAccess<T>) -> Bmp390Result<CompensationEngine, T::Error> {
        let coefficients = CalibrationCoefficients::load(regs)?;
        debug!("calibration coefficients: {:?}", coefficients);

        for bit in pwr_ctrl::SENSOR_EN {
            regs.set_bit(PwrCtrl::ADDR, bit, true)?;
        }

        Ok(CompensationEngine::new(coefficients))
    }

    /// Reloads the calibration from NVM and forgets the retained temperature.
    ///
    /// On failure the previous calibration is kept.
    pub fn reinitialize(&mut self) -> Bmp390Result<(), T::Error> {
        self.engine = Self::initialize(&mut self.regs)?;

        Ok(())
    }

    /// Applies the given configurations by writing to their corresponding register fields.
    ///
    /// Bits outside the configured fields are left untouched. Every failure is reported as
    /// [`Bmp390Error::Configuration`].
    pub fn apply_configuration(&mut self, config: &Configuration) -> Bmp390Result<(), T::Error> {
        self.set_enabled(pwr_ctrl::PRESS_EN, config.enable_pressure)?;
        self.set_enabled(pwr_ctrl::TEMP_EN, config.enable_temperature)?;
        self.set_oversampling(config.pressure_oversampling, config.temperature_oversampling)?;
        self.set_output_data_rate(config.output_data_rate)?;
        self.set_iir_filter(config.iir_filter_coefficient)?;

        Ok(())
    }

    /// Reads the current settings back from the device.
    pub fn configuration(&mut self) -> Result<Configuration, ConfigurationError<T::Error>> {
        let flags = self.power_control()?;
        let osr = self.oversampling()?;

        Ok(Configuration::default()
            .enable_pressure(flags.press_en)
            .enable_temperature(flags.temp_en)
            .oversampling(osr.osr_p, osr.osr_t)
            .output_data_rate(self.output_data_rate()?)
            .iir_filter(self.iir_filter()?))
    }

    fn set_enabled(&mut self, bit: u8, enable: bool) -> Result<(), ConfigurationError<T::Error>> {
        if enable {
            self.regs.set_bit(PwrCtrl::ADDR, bit, true)?;
        } else {
            self.regs.clear_bit(PwrCtrl::ADDR, bit)?;
        }

        Ok(())
    }

    /// Reads the raw 24-bit temperature and signals the device to start the next temperature conversion.
    pub fn read_raw_temperature(&mut self) -> Result<u32, MeasurementError<T::Error>> {
        let raw = self.regs.read::<RawTemperature>()?;
        self.restart_conversion(pwr_ctrl::TEMP_EN);

        Ok(raw)
    }

    /// Reads the raw 24-bit pressure and signals the device to start the next pressure conversion.
    pub fn read_raw_pressure(&mut self) -> Result<u32, MeasurementError<T::Error>> {
        let raw = self.regs.read::<RawPressure>()?;
        self.restart_conversion(pwr_ctrl::PRESS_EN);

        Ok(raw)
    }

    fn restart_conversion(&mut self, bit: u8) {
        if let Err(e) = self.regs.set_bit(PwrCtrl::ADDR, bit, true) {
            warn!("could not set PWR_CTRL bit {}: {:?}", bit, e);
        }
    }

    /// Reads and compensates the temperature in °C.
    ///
    /// The result is also retained for subsequent pressure compensation.
    pub fn read_temperature(&mut self) -> Result<f32, MeasurementError<T::Error>> {
        let raw = self.read_raw_temperature()?;

        Ok(self.engine.compensate_temperature(raw))
    }

    /// Reads and compensates the pressure in Pa.
    ///
    /// A fresh temperature is read and compensated first, so the pressure is always compensated
    /// against the temperature of the same cycle.
    pub fn read_pressure(&mut self) -> Result<f32, MeasurementError<T::Error>> {
        Ok(self.measure()?.pressure_pascal())
    }

    /// Reads temperature, then pressure, and compensates both.
    pub fn measure(&mut self) -> Result<Measurement, MeasurementError<T::Error>> {
        let temperature = self.read_temperature()?;
        let raw_pressure = self.read_raw_pressure()?;
        let pressure = self.engine.compensate_pressure_at(raw_pressure, temperature);

        Ok(Measurement::new(temperature, pressure))
    }

    /// Writes both oversampling settings to the OSR (0x1C) register in one read-modify-write.
    pub fn set_oversampling(
        &mut self,
        pressure: Oversampling,
        temperature: Oversampling,
    ) -> Result<(), ConfigurationError<T::Error>> {
        let osr_p: u8 = pressure.into();
        let osr_t: u8 = temperature.into();
        let mask = PressureOversampling::MASK | (TemperatureOversampling::MASK << TemperatureOversampling::SHIFT);

        self.regs
            .write_field(PressureOversampling::ADDR, 0, mask, osr_p | (osr_t << TemperatureOversampling::SHIFT))?;

        Ok(())
    }

    /// Returns the oversampling configuration from the OSR (0x1C) register.
    pub fn oversampling(&mut self) -> Result<OsrCfg, ConfigurationError<T::Error>> {
        Ok(OsrCfg {
            osr_p: self.regs.read_typed::<PressureOversampling>()?,
            osr_t: self.regs.read_typed::<TemperatureOversampling>()?,
        })
    }

    /// Writes the IIR filter coefficient to the CONFIG (0x1F) register.
    pub fn set_iir_filter(&mut self, coefficient: IIRFilterCoefficient) -> Result<(), ConfigurationError<T::Error>> {
        Ok(self.regs.write_typed::<IirFilter>(coefficient)?)
    }

    /// Returns the IIR filter coefficient from the CONFIG (0x1F) register.
    pub fn iir_filter(&mut self) -> Result<IIRFilterCoefficient, ConfigurationError<T::Error>> {
        self.regs.read_typed::<IirFilter>()
    }

    /// Writes the output data rate to the ODR (0x1D) register.
    pub fn set_output_data_rate(&mut self, rate: OutputDataRate) -> Result<(), ConfigurationError<T::Error>> {
        Ok(self.regs.write_typed::<Odr>(rate)?)
    }

    /// Returns the output data rate from the ODR (0x1D) register.
    pub fn output_data_rate(&mut self) -> Result<OutputDataRate, ConfigurationError<T::Error>> {
        self.regs.read_typed::<Odr>()
    }

    /// Returns the enable flags from the PWR_CTRL (0x1B) register.
    pub fn power_control(&mut self) -> Result<PwrCtrlFlags, BusError<T::Error>> {
        self.regs.read::<PwrCtrl>()
    }

    pub fn coefficients(&self) -> &CalibrationCoefficients {
        self.engine.coefficients()
    }

    /// The compensation engine holding this device's calibration and retained temperature.
    pub fn compensation(&mut self) -> &mut CompensationEngine {
        &mut self.engine
    }

    /// Direct register access, for registers the driver has no dedicated method for.
    pub fn registers(&mut self) -> &mut RegisterAccess<T> {
        &mut self.regs
    }

    /// Destroys the driver and gives back the transport.
    pub fn release(self) -> T {
        self.regs.release()
    }
}

/// This enum should reflect the physical state of the SDO pin. This is used to determine the I2C address
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum SdoPinState {
    /// SDO is pulled high by connection to VDDIO
    High,
    /// SDO is pulled low by connection to GND
    Low,
}

impl From<SdoPinState> for SevenBitAddress {
    fn from(value: SdoPinState) -> SevenBitAddress {
        match value {
            SdoPinState::High => DEFAULT_ADDRESS,
            SdoPinState::Low => 0x76,
        }
    }
}

//! Conversion of raw ADC counts into degrees Celsius and Pascal.
//!
//! Pressure compensation depends on the temperature at the time of the pressure conversion. The
//! engine keeps the most recently compensated temperature around for that purpose, so the usual
//! cycle is [`compensate_temperature`](CompensationEngine::compensate_temperature) followed by
//! [`compensate_pressure`](CompensationEngine::compensate_pressure) with samples taken together.
//! [`compensate_pressure_at`](CompensationEngine::compensate_pressure_at) takes the temperature
//! explicitly instead.

use log::warn;

use crate::calibration::CalibrationCoefficients;

pub struct CompensationEngine {
    coefficients: CalibrationCoefficients,
    t_lin: Option<f32>,
}

impl CompensationEngine {
    pub fn new(coefficients: CalibrationCoefficients) -> Self {
        Self { coefficients, t_lin: None }
    }

    pub fn coefficients(&self) -> &CalibrationCoefficients {
        &self.coefficients
    }

    /// The most recently compensated temperature in °C, if any.
    pub fn temperature(&self) -> Option<f32> {
        self.t_lin
    }

    /// Forgets the retained temperature.
    pub fn reset(&mut self) {
        self.t_lin = None;
    }

    /// Compensates a raw 24-bit temperature sample, retains the result and returns it in °C.
    pub fn compensate_temperature(&mut self, raw: u32) -> f32 {
        let c = &self.coefficients;
        let offset = raw as f32 - c.par_t1;

        let celsius = offset * c.par_t2 + (offset * offset) * c.par_t3;
        self.t_lin = Some(celsius);

        celsius
    }

    /// Compensates a raw 24-bit pressure sample using the retained temperature. Returns Pascal.
    ///
    /// The temperature must have been compensated from a sample taken in the same measurement cycle;
    /// the engine does not refresh it. Before the first temperature compensation 0 °C is assumed.
    pub fn compensate_pressure(&self, pressure: u32) -> f32 {
        let t_lin = match self.t_lin {
            Some(t_lin) => t_lin,
            None => {
                warn!("pressure compensated before any temperature, assuming 0 °C");
                0.0
            }
        };

        self.compensate_pressure_at(pressure, t_lin)
    }

    /// Compensates a raw 24-bit pressure sample at the given temperature in °C. Returns Pascal.
    pub fn compensate_pressure_at(&self, raw: u32, temperature: f32) -> f32 {
        let c = &self.coefficients;
        let raw = raw as f32;

        let offset = cubic([c.par_p5, c.par_p6, c.par_p7, c.par_p8], temperature);
        let sensitivity = raw * cubic([c.par_p1, c.par_p2, c.par_p3, c.par_p4], temperature);
        let nonlinear = (raw * raw) * (c.par_p9 + c.par_p10 * temperature) + (raw * raw * raw) * c.par_p11;

        offset + sensitivity + nonlinear
    }
}

/// `k[0] + k[1]·t + k[2]·t² + k[3]·t³`, summed left to right.
fn cubic(k: [f32; 4], t: f32) -> f32 {
    k[0] + k[1] * t + k[2] * (t * t) + k[3] * (t * t * t)
}

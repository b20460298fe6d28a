use core::fmt::{Debug, Formatter};

/// One compensated temperature/pressure pair, taken in the same measurement cycle.
#[derive(Copy, Clone, PartialEq)]
pub struct Measurement {
    temperature_c: f32,
    pressure_pa: f32,
}

impl Measurement {
    pub fn new(temperature_c: f32, pressure_pa: f32) -> Self {
        Self { temperature_c, pressure_pa }
    }

    pub fn temperature_celsius(&self) -> f32 {
        self.temperature_c
    }

    pub fn pressure_pascal(&self) -> f32 {
        self.pressure_pa
    }

    pub fn pressure_hectopascal(&self) -> f32 {
        self.pressure_pa / 100.0
    }
}

impl Debug for Measurement {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Measurement")
            .field("temperature_c", &self.temperature_c)
            .field("pressure_pa", &self.pressure_pa)
            .finish()
    }
}

#[cfg(feature = "uom")]
impl Measurement {
    pub fn pressure_uom(&self) -> uom::si::f32::Pressure {
        uom::si::f32::Pressure::new::<uom::si::pressure::pascal>(self.pressure_pa)
    }

    pub fn temperature_uom(&self) -> uom::si::f32::ThermodynamicTemperature {
        uom::si::f32::ThermodynamicTemperature::new::<uom::si::thermodynamic_temperature::degree_celsius>(
            self.temperature_c,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors() {
        let m = Measurement::new(21.5, 101325.0);

        assert_eq!(21.5, m.temperature_celsius());
        assert_eq!(101325.0, m.pressure_pascal());
        assert_eq!(1013.25, m.pressure_hectopascal());
    }

    #[cfg(feature = "uom")]
    #[test]
    fn uom_units() {
        use uom::si::pressure::hectopascal;
        use uom::si::thermodynamic_temperature::kelvin;

        let m = Measurement::new(0.0, 101325.0);

        assert!((m.pressure_uom().get::<hectopascal>() - 1013.25).abs() < 1e-3);
        assert!((m.temperature_uom().get::<kelvin>() - 273.15).abs() < 1e-3);
    }
}

//! BH1750 ambient-light sensor over I²C.
//!
//! Thin plumbing only: the sensor is started once in continuous
//! high-resolution mode and read on every MEASURE press. Detection
//! failure at startup is terminal for the session - the control loop
//! switches to the fallback illuminance generator and never re-probes.

use crate::error::Error;

/// Default BH1750 I²C address (ADDR pin low).
pub const BH1750_ADDR: u8 = 0x23;

const CMD_POWER_ON: u8 = 0x01;
const CMD_CONT_HIGH_RES: u8 = 0x10;

/// Counts-to-lux divisor from the BH1750 datasheet.
const COUNTS_PER_LUX: f32 = 1.2;

pub struct Bh1750<I2C> {
    i2c: I2C,
}

impl<I2C> Bh1750<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    pub fn new(i2c: I2C) -> Self {
        Self { i2c }
    }

    /// Power the sensor on and start continuous high-resolution sampling.
    pub fn start(&mut self) -> Result<(), Error> {
        self.i2c
            .write(BH1750_ADDR, &[CMD_POWER_ON])
            .map_err(|_| Error::Sensor)?;
        self.i2c
            .write(BH1750_ADDR, &[CMD_CONT_HIGH_RES])
            .map_err(|_| Error::Sensor)?;
        Ok(())
    }

    /// Read the latest illuminance sample (lux).
    pub fn read_lux(&mut self) -> Result<f32, Error> {
        let mut raw = [0u8; 2];
        self.i2c
            .read(BH1750_ADDR, &mut raw)
            .map_err(|_| Error::Sensor)?;
        let counts = u16::from_be_bytes(raw);
        Ok(counts as f32 / COUNTS_PER_LUX)
    }
}

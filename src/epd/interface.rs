//! Display interface using SPI
use crate::error::HardwareError;
use display_interface::DisplayError;
use embedded_hal::{
    delay::DelayNs,
    digital::{InputPin, OutputPin},
    spi::SpiDevice,
};

/// How often BUSY is sampled
const BUSY_POLL_MS: u32 = 10;
/// Full refreshes of the tri-color panel take ~15 s; anything past this is a hang
const BUSY_WAIT_TIMEOUT_MS: u32 = 30_000;

/// Largest single SPI write, spidev rejects transfers above its buffer size
const SPI_CHUNK: usize = 4096;

/// The Connection Interface of the Waveshare HAT
pub struct DisplayInterface<SPI, BSY, DC, RST, PWR, DELAY> {
    /// SPI device
    spi: SPI,
    /// High for busy, wait until display is ready
    busy: BSY,
    /// Data/Command Control Pin (High for data, Low for command)
    dc: DC,
    /// Pin for Reseting
    rst: RST,
    /// HAT power switch
    pwr: PWR,
    pub(crate) delay: DELAY,
}

impl<SPI, BSY, DC, RST, PWR, DELAY> DisplayInterface<SPI, BSY, DC, RST, PWR, DELAY> {
    pub fn new(spi: SPI, busy: BSY, dc: DC, rst: RST, pwr: PWR, delay: DELAY) -> Self {
        DisplayInterface {
            spi,
            busy,
            dc,
            rst,
            pwr,
            delay,
        }
    }
}

impl<SPI, BSY, DC, RST, PWR, DELAY> DisplayInterface<SPI, BSY, DC, RST, PWR, DELAY>
where
    SPI: SpiDevice,
    BSY: InputPin,
    DC: OutputPin,
    RST: OutputPin,
    PWR: OutputPin,
    DELAY: DelayNs,
{
    /// Basic function for sending commands
    pub(crate) fn cmd(&mut self, command: u8) -> Result<(), DisplayError> {
        // low for commands
        self.dc.set_low().map_err(|_| DisplayError::DCError)?;

        match self.spi.write(&[command]) {
            Ok(_) => Ok(()),
            Err(e) => {
                log::error!("SPI write error for command 0x{:02X}: {:?}", command, e);
                Err(DisplayError::BusWriteError)
            }
        }
    }

    /// Basic function for sending an array of u8-values of data over spi
    pub(crate) fn data(&mut self, data: &[u8]) -> Result<(), DisplayError> {
        // high for data
        self.dc.set_high().map_err(|_| DisplayError::DCError)?;
        for chunk in data.chunks(SPI_CHUNK) {
            self.spi
                .write(chunk)
                .map_err(|_| DisplayError::BusWriteError)?;
        }
        Ok(())
    }

    /// Basic function for sending a command and the data belonging to it.
    pub(crate) fn cmd_with_data(&mut self, command: u8, data: &[u8]) -> Result<(), DisplayError> {
        self.cmd(command)?;
        self.data(data)
    }

    /// Basic function for sending the same byte of data (one u8) multiple times over spi
    /// Used for setting one color for the whole frame
    pub(crate) fn data_x_times(&mut self, val: u8, repetitions: usize) -> Result<(), DisplayError> {
        // high for data
        self.dc.set_high().map_err(|_| DisplayError::DCError)?;

        let buffer = [val; SPI_CHUNK];
        let mut remaining = repetitions;
        while remaining > 0 {
            let n = remaining.min(SPI_CHUNK);
            self.spi
                .write(&buffer[..n])
                .map_err(|_| DisplayError::BusWriteError)?;
            remaining -= n;
        }

        log::debug!("Completed sending {} bytes of 0x{:02X}", repetitions, val);
        Ok(())
    }

    /// Wait for the busy pin to go LOW, polling every few milliseconds
    pub(crate) fn wait_until_idle(&mut self) -> Result<(), HardwareError> {
        log::debug!("Waiting for busy pin to go LOW...");
        let mut waited_ms = 0;

        loop {
            match self.busy.is_high() {
                Ok(false) => return Ok(()),
                Ok(true) => {}
                Err(_) => {
                    log::error!("Error reading BUSY pin state");
                    return Err(DisplayError::BusWriteError.into());
                }
            }
            if waited_ms >= BUSY_WAIT_TIMEOUT_MS {
                log::error!("TIMEOUT waiting for BUSY pin to go LOW after {} ms", waited_ms);
                return Err(HardwareError::BusyTimeout { waited_ms });
            }
            self.delay.delay_ms(BUSY_POLL_MS);
            waited_ms += BUSY_POLL_MS;
        }
    }

    /// Resets the device: high 20 ms, low 2 ms, high 20 ms
    pub(crate) fn reset(&mut self) -> Result<(), DisplayError> {
        self.rst.set_high().map_err(|_| DisplayError::RSError)?;
        self.delay.delay_ms(20);
        self.rst.set_low().map_err(|_| DisplayError::RSError)?;
        self.delay.delay_ms(2);
        self.rst.set_high().map_err(|_| DisplayError::RSError)?;
        self.delay.delay_ms(20);
        Ok(())
    }

    /// Switch the HAT supply
    pub(crate) fn set_power(&mut self, on: bool) -> Result<(), DisplayError> {
        let res = if on {
            self.pwr.set_high()
        } else {
            self.pwr.set_low()
        };
        res.map_err(|_| DisplayError::RSError)
    }

    /// Drive every output low, the state the lines are left in on exit.
    ///
    /// Errors are logged and otherwise ignored: this runs on the way out.
    pub(crate) fn park_lines(&mut self) {
        if self.rst.set_low().is_err() {
            log::warn!("Could not drive RST low");
        }
        if self.dc.set_low().is_err() {
            log::warn!("Could not drive DC low");
        }
        if self.pwr.set_low().is_err() {
            log::warn!("Could not switch the HAT off");
        }
    }
}

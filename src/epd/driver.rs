//! 2.13" B V4 Display Driver Implementation
//!
//! ## Refresh sequence
//!
//! The panel has no partial refresh for the red plane, so every `display()` is
//! a full refresh: write `0x24` (black/white), write `0x26` (red), then
//! `MASTER_ACTIVATE` and wait for BUSY to drop. That wait takes the bulk of
//! a push.
//!
//! ### Polarity
//!
//! Both planes are sent in the same polarity the frame buffer uses: bit set is
//! white, bit clear is ink. The controller is told to invert the red RAM
//! (`0x21`) so a blank red layer shows no red.
//!
//! ### BUSY Pin Wait
//!
//! BUSY is active high. It is polled every 10 ms with a 30 s timeout.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use embedded_hal::spi::SpiDevice;

use crate::epd::interface::DisplayInterface;
use crate::epd::{cmd::Cmd, flag::Flag, BUFFER_LEN, HEIGHT, WIDTH};
use crate::error::HardwareError;
use crate::sink::DisplaySink;

/// Driver for the Waveshare 2.13" B V4 panel
///
/// ## Type Parameters
///
/// - `SPI` - SPI device for communication
/// - `BSY` - BUSY input pin (HIGH when display is busy)
/// - `DC` - Data/Command output pin
/// - `RST` - Reset output pin
/// - `PWR` - HAT power switch output pin
/// - `DELAY` - Delay provider for timing
pub struct Epd2in13bV4<SPI, BSY, DC, RST, PWR, DELAY> {
    /// The display interface
    interface: DisplayInterface<SPI, BSY, DC, RST, PWR, DELAY>,
    released: bool,
}

impl<SPI, BSY, DC, RST, PWR, DELAY> Epd2in13bV4<SPI, BSY, DC, RST, PWR, DELAY>
where
    SPI: SpiDevice,
    BSY: InputPin,
    DC: OutputPin,
    RST: OutputPin,
    PWR: OutputPin,
    DELAY: DelayNs,
{
    /// Wrap the bus and pins; the controller is not touched until `init`
    pub fn new(spi: SPI, busy: BSY, dc: DC, rst: RST, pwr: PWR, delay: DELAY) -> Self {
        Epd2in13bV4 {
            interface: DisplayInterface::new(spi, busy, dc, rst, pwr, delay),
            released: false,
        }
    }

    /// Execute command followed by data
    fn cmd_data(&mut self, cmd: u8, data: &[u8]) -> Result<(), HardwareError> {
        self.interface.cmd_with_data(cmd, data)?;
        Ok(())
    }

    /// Configure driver output control for 250 gate lines
    fn configure_driver_output(&mut self) -> Result<(), HardwareError> {
        self.cmd_data(
            Cmd::DRIVER_CONTROL,
            &[
                Flag::DRIVER_OUTPUT_MUX_LOW,
                Flag::DRIVER_OUTPUT_MUX_HIGH,
                Flag::DRIVER_OUTPUT_GATE_SCAN_FROM_G0,
            ],
        )
    }

    /// Set the RAM window to the full panel and park the address counters at the origin
    fn set_full_ram_window(&mut self) -> Result<(), HardwareError> {
        let x_end = ((WIDTH - 1) >> 3) as u8; // 0x0F: 16 bytes per line
        let y_end = (HEIGHT - 1) as u16; // 249
        self.cmd_data(Cmd::SET_RAMX_START_END, &[0x00, x_end])?;
        self.cmd_data(
            Cmd::SET_RAMY_START_END,
            &[0x00, 0x00, (y_end & 0xFF) as u8, (y_end >> 8) as u8],
        )?;
        self.cmd_data(Cmd::SET_RAMX_COUNTER, &[0x00])?;
        self.cmd_data(Cmd::SET_RAMY_COUNTER, &[0x00, 0x00])
    }

    /// Trigger the refresh and wait for it to finish
    fn turn_on_display(&mut self) -> Result<(), HardwareError> {
        self.interface.cmd(Cmd::MASTER_ACTIVATE)?;
        self.interface.wait_until_idle()
    }

    fn check_len(buffer: &[u8]) -> Result<(), HardwareError> {
        if buffer.len() != BUFFER_LEN {
            return Err(HardwareError::BufferSize {
                expected: BUFFER_LEN,
                actual: buffer.len(),
            });
        }
        Ok(())
    }
}

impl<SPI, BSY, DC, RST, PWR, DELAY> DisplaySink for Epd2in13bV4<SPI, BSY, DC, RST, PWR, DELAY>
where
    SPI: SpiDevice,
    BSY: InputPin,
    DC: OutputPin,
    RST: OutputPin,
    PWR: OutputPin,
    DELAY: DelayNs,
{
    fn init(&mut self) -> Result<(), HardwareError> {
        log::info!("Initializing e-paper display");

        self.interface.set_power(true)?;
        self.interface.reset()?;
        self.interface.wait_until_idle()?;

        // Software reset - start with a clean state
        self.interface.cmd(Cmd::SW_RESET)?;
        self.interface.wait_until_idle()?;

        log::debug!("Configuring driver output, data entry mode and RAM window");
        self.configure_driver_output()?;
        self.cmd_data(Cmd::DATA_ENTRY_MODE, &[Flag::DATA_ENTRY_INCRY_INCRX])?;
        self.set_full_ram_window()?;

        self.cmd_data(Cmd::BORDER_WAVEFORM_CONTROL, &[Flag::BORDER_WAVEFORM_FOLLOW_LUT])?;
        self.cmd_data(Cmd::TEMP_CONTROL, &[Flag::INTERNAL_TEMP_SENSOR])?;
        self.cmd_data(
            Cmd::DISPLAY_UPDATE_CONTROL,
            &[Flag::DISPLAY_UPDATE_INVERSE_RED, Flag::DISPLAY_UPDATE_SOURCE_MODE],
        )?;

        self.interface.wait_until_idle()?;
        log::info!("Display initialization complete");
        Ok(())
    }

    fn clear(&mut self) -> Result<(), HardwareError> {
        log::info!("Clearing frame to white");
        self.interface.cmd(Cmd::WRITE_BW_DATA)?;
        self.interface.data_x_times(Flag::RAM_ALL_WHITE, BUFFER_LEN)?;
        self.interface.cmd(Cmd::WRITE_RED_DATA)?;
        self.interface.data_x_times(Flag::RAM_ALL_WHITE, BUFFER_LEN)?;
        self.turn_on_display()
    }

    fn display(&mut self, primary: &[u8], secondary: &[u8]) -> Result<(), HardwareError> {
        Self::check_len(primary)?;
        Self::check_len(secondary)?;

        log::info!("Writing frame to display");
        self.cmd_data(Cmd::WRITE_BW_DATA, primary)?;
        self.cmd_data(Cmd::WRITE_RED_DATA, secondary)?;
        self.turn_on_display()?;
        log::debug!("Display frame update completed");
        Ok(())
    }

    fn sleep(&mut self) -> Result<(), HardwareError> {
        self.cmd_data(Cmd::DEEP_SLEEP_MODE, &[Flag::DEEP_SLEEP_MODE_1])?;
        self.interface.delay.delay_ms(100);
        log::info!("Display now in deep sleep mode");
        Ok(())
    }

    fn release(&mut self) {
        if self.released {
            return;
        }
        self.interface.park_lines();
        self.released = true;
    }
}

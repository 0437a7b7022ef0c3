//! Raspberry Pi wiring of the panel
//!
//! Opens the SPI device and requests the GPIO lines through the character
//! device. Dropping the returned driver hands the lines back to the kernel;
//! [`DisplaySink::release`](crate::sink::DisplaySink::release) parks them low
//! first.

use anyhow::Context;
use linux_embedded_hal::{
    gpio_cdev::{Chip, LineRequestFlags},
    spidev::{SpiModeFlags, SpidevOptions},
    CdevPin, Delay, SpidevDevice,
};

use crate::epd::driver::Epd2in13bV4;
use crate::epd::pins::{Pins, GPIO_CHIP, SPI_DEVICE, SPI_SPEED_HZ};

/// The panel as wired on the Pi
pub type PiPanel = Epd2in13bV4<SpidevDevice, CdevPin, CdevPin, CdevPin, CdevPin, Delay>;

fn output(chip: &mut Chip, line: u32, label: &str) -> anyhow::Result<CdevPin> {
    let handle = chip
        .get_line(line)
        .and_then(|l| l.request(LineRequestFlags::OUTPUT, 0, label))
        .with_context(|| format!("requesting GPIO {line} ({label}) as output"))?;
    CdevPin::new(handle).with_context(|| format!("wrapping GPIO {line} ({label})"))
}

fn input(chip: &mut Chip, line: u32, label: &str) -> anyhow::Result<CdevPin> {
    let handle = chip
        .get_line(line)
        .and_then(|l| l.request(LineRequestFlags::INPUT, 0, label))
        .with_context(|| format!("requesting GPIO {line} ({label}) as input"))?;
    CdevPin::new(handle).with_context(|| format!("wrapping GPIO {line} ({label})"))
}

/// Acquire SPI and GPIO for the panel
pub fn open_panel() -> anyhow::Result<PiPanel> {
    log::info!(
        "Configuring SPI {} at {} Hz, mode 0",
        SPI_DEVICE,
        SPI_SPEED_HZ
    );
    let mut spi = SpidevDevice::open(SPI_DEVICE)
        .with_context(|| format!("opening {SPI_DEVICE}"))?;
    spi.0
        .configure(
            &SpidevOptions::new()
                .bits_per_word(8)
                .max_speed_hz(SPI_SPEED_HZ)
                .mode(SpiModeFlags::SPI_MODE_0)
                .build(),
        )
        .context("configuring SPI")?;

    let mut chip = Chip::new(GPIO_CHIP).with_context(|| format!("opening {GPIO_CHIP}"))?;
    let rst = output(&mut chip, Pins::RST, "epd2in13b_rst")?;
    let dc = output(&mut chip, Pins::DC, "epd2in13b_dc")?;
    let pwr = output(&mut chip, Pins::PWR, "epd2in13b_pwr")?;
    let busy = input(&mut chip, Pins::BSY, "epd2in13b_busy")?;
    log::debug!(
        "GPIO lines acquired: RST {}, DC {}, PWR {}, BUSY {} (CS {} via spidev)",
        Pins::RST,
        Pins::DC,
        Pins::PWR,
        Pins::BSY,
        Pins::CS
    );

    Ok(Epd2in13bV4::new(spi, busy, dc, rst, pwr, Delay))
}

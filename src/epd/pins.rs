//! Pin definitions for the e-paper HAT on a Raspberry Pi
//!
//! BCM numbering, as wired by the Waveshare 2.13" HAT.

/// Pin configuration constants for the display
pub struct Pins;

impl Pins {
    /// Reset pin for display
    pub const RST: u32 = 17;
    /// Data/Command control pin (High for data, Low for command)
    pub const DC: u32 = 25;
    /// Chip Select, driven by the kernel as CE0 of `/dev/spidev0.0`
    pub const CS: u32 = 8;
    /// Busy status pin (High when display is busy)
    pub const BSY: u32 = 24;
    /// Power switch of the HAT
    pub const PWR: u32 = 18;
}

/// SPI device node the HAT is attached to
pub const SPI_DEVICE: &str = "/dev/spidev0.0";

/// GPIO character device holding the pins above
pub const GPIO_CHIP: &str = "/dev/gpiochip0";

/// SPI clock
pub const SPI_SPEED_HZ: u32 = 4_000_000;

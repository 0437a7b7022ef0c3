/// Flag values and constants for configuring the 2.13" B V4 controller.
pub struct Flag;
#[allow(missing_docs)]
impl Flag {
    // Driver Output Control (0x01): MUX = 0xF9 + 1 = 250 gate lines
    pub const DRIVER_OUTPUT_MUX_LOW: u8 = 0xF9;
    pub const DRIVER_OUTPUT_MUX_HIGH: u8 = 0x00;
    pub const DRIVER_OUTPUT_GATE_SCAN_FROM_G0: u8 = 0x00;

    // Data Entry Mode (0x11) flags
    pub const DATA_ENTRY_INCRY_INCRX: u8 = 0x03; // Y increment, X increment

    // Deep Sleep Mode (0x10) flags
    pub const DEEP_SLEEP_MODE_1: u8 = 0x01;

    // Temperature Sensor Control (0x18) flags
    pub const INTERNAL_TEMP_SENSOR: u8 = 0x80;

    // Border Waveform Control (0x3C)
    pub const BORDER_WAVEFORM_FOLLOW_LUT: u8 = 0x05;

    // Display Update Control 1 (0x21): inverse red RAM, source output mode
    pub const DISPLAY_UPDATE_INVERSE_RED: u8 = 0x80;
    pub const DISPLAY_UPDATE_SOURCE_MODE: u8 = 0x80;

    // RAM fill pattern, bit = 1 is white on both planes as sent by the host
    pub const RAM_ALL_WHITE: u8 = 0xFF;
}

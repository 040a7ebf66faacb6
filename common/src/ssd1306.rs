//! Async SSD1306 OLED driver over I2C.
//!
//! Only the transport lives here: the pixels are owned by a
//! [`Framebuffer`] that already matches the controller's page layout, so a
//! flush is a window setup followed by a straight copy of the buffer.
//!
//! Every I2C write starts with a control byte: `0x00` for a command, `0x40`
//! for display RAM data.

use embedded_hal_async::i2c::I2c;

use crate::config::{PAGES, SCREEN_WIDTH};
use crate::framebuffer::Framebuffer;

const CONTROL_COMMAND: u8 = 0x00;
const CONTROL_DATA: u8 = 0x40;

/// Display RAM bytes per data write.
pub const DATA_CHUNK: usize = 32;

/// SSD1306 commands
mod cmd {
    pub const DISPLAY_OFF: u8 = 0xAE;
    pub const DISPLAY_ON: u8 = 0xAF;
    pub const SET_CLOCK_DIV: u8 = 0xD5;
    pub const SET_MUX_RATIO: u8 = 0xA8;
    pub const SET_DISPLAY_OFFSET: u8 = 0xD3;
    pub const SET_START_LINE: u8 = 0x40;
    pub const SET_CHARGE_PUMP: u8 = 0x8D;
    pub const SET_MEMORY_MODE: u8 = 0x20;
    pub const SET_SEG_REMAP: u8 = 0xA1;
    pub const SET_COM_SCAN_DEC: u8 = 0xC8;
    pub const SET_COM_PINS: u8 = 0xDA;
    pub const SET_CONTRAST: u8 = 0x81;
    pub const SET_PRECHARGE: u8 = 0xD9;
    pub const SET_VCOM_DETECT: u8 = 0xDB;
    pub const RESUME_RAM: u8 = 0xA4;
    pub const SET_NORMAL: u8 = 0xA6;
    pub const SET_INVERSE: u8 = 0xA7;
    pub const SET_COLUMN_ADDR: u8 = 0x21;
    pub const SET_PAGE_ADDR: u8 = 0x22;
}

/// Default contrast after init.
pub const DEFAULT_CONTRAST: u8 = 0xCF;

/// Init sequence for a 128x64 panel with the internal charge pump.
const INIT_SEQUENCE: &[u8] = &[
    cmd::DISPLAY_OFF,
    cmd::SET_CLOCK_DIV,
    0x80,
    cmd::SET_MUX_RATIO,
    0x3F, // 64 lines
    cmd::SET_DISPLAY_OFFSET,
    0x00,
    cmd::SET_START_LINE,
    cmd::SET_CHARGE_PUMP,
    0x14,
    cmd::SET_MEMORY_MODE,
    0x00, // horizontal addressing
    cmd::SET_SEG_REMAP,
    cmd::SET_COM_SCAN_DEC,
    cmd::SET_COM_PINS,
    0x12,
    cmd::SET_CONTRAST,
    DEFAULT_CONTRAST,
    cmd::SET_PRECHARGE,
    0xF1,
    cmd::SET_VCOM_DETECT,
    0x40,
    cmd::RESUME_RAM,
    cmd::SET_NORMAL,
    cmd::DISPLAY_ON,
];

/// SSD1306 on an async I2C bus.
pub struct Ssd1306<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C> Ssd1306<I2C>
where
    I2C: I2c,
{
    /// Wrap the bus. Call [`init`](Self::init) before the first flush.
    pub const fn new(
        i2c: I2C,
        address: u8,
    ) -> Self {
        Self { i2c, address }
    }

    pub const fn address(&self) -> u8 { self.address }

    /// Give the bus back.
    pub fn release(self) -> I2C { self.i2c }

    /// Send the power-up sequence and switch the panel on.
    pub async fn init(&mut self) -> Result<(), I2C::Error> {
        for &c in INIT_SEQUENCE {
            self.command(c).await?;
        }
        Ok(())
    }

    async fn command(
        &mut self,
        c: u8,
    ) -> Result<(), I2C::Error> {
        self.i2c.write(self.address, &[CONTROL_COMMAND, c]).await
    }

    /// Push a full frame.
    pub async fn flush(
        &mut self,
        frame: &Framebuffer,
    ) -> Result<(), I2C::Error> {
        let window = [
            cmd::SET_COLUMN_ADDR,
            0,
            (SCREEN_WIDTH - 1) as u8,
            cmd::SET_PAGE_ADDR,
            0,
            (PAGES - 1) as u8,
        ];
        for c in window {
            self.command(c).await?;
        }

        let mut packet = [0u8; DATA_CHUNK + 1];
        packet[0] = CONTROL_DATA;
        for page in (0..PAGES).filter_map(|p| frame.page(p)) {
            for chunk in page.chunks(DATA_CHUNK) {
                packet[1..=chunk.len()].copy_from_slice(chunk);
                self.i2c.write(self.address, &packet[..=chunk.len()]).await?;
            }
        }
        Ok(())
    }

    pub async fn set_contrast(
        &mut self,
        contrast: u8,
    ) -> Result<(), I2C::Error> {
        self.command(cmd::SET_CONTRAST).await?;
        self.command(contrast).await
    }

    pub async fn set_display_on(
        &mut self,
        on: bool,
    ) -> Result<(), I2C::Error> {
        self.command(if on { cmd::DISPLAY_ON } else { cmd::DISPLAY_OFF }).await
    }

    /// Hardware inversion; the framebuffer is untouched.
    pub async fn set_inverted(
        &mut self,
        inverted: bool,
    ) -> Result<(), I2C::Error> {
        self.command(if inverted { cmd::SET_INVERSE } else { cmd::SET_NORMAL }).await
    }
}

// =============================================================================
// Tests
// =============================================================================

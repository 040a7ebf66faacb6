//! SSD1306 OLED on I2C1.
//!
//! Pin mapping:
//! - SDA: GPIO26 (I2C1 SDA)
//! - SCL: GPIO27 (I2C1 SCL)
//! - Address: 0x3C

use defmt::{error, info};
use embassy_rp::i2c::{Async, Config as I2cConfig, I2c};
use embassy_rp::peripherals::I2C1;
use embassy_time::Timer;
use launcher_common::config::{DISPLAY_RETRY_MS, I2C_FREQUENCY_HZ, OLED_ADDRESS};
use launcher_common::ssd1306::Ssd1306;

/// The OLED driver on the async I2C1 bus.
pub type Oled = Ssd1306<I2c<'static, I2C1, Async>>;

/// Wrap the bus. The panel is not touched until [`init_display`].
pub const fn new_display(i2c: I2c<'static, I2C1, Async>) -> Oled { Ssd1306::new(i2c, OLED_ADDRESS) }

/// Bring the panel up, retrying until it answers.
///
/// A missing or unpowered module NAKs the first command; there is nothing
/// useful to do without a screen, so keep trying.
pub async fn init_display(oled: &mut Oled) {
    let mut attempt = 1u32;
    loop {
        match oled.init().await {
            Ok(()) => {
                info!("SSD1306 at {=u8:#x} initialized (attempt {})", oled.address(), attempt);
                return;
            }
            Err(e) => {
                error!("SSD1306 init failed: {}, retrying in {} ms", e, DISPLAY_RETRY_MS);
                Timer::after_millis(u64::from(DISPLAY_RETRY_MS)).await;
                attempt = attempt.wrapping_add(1);
            }
        }
    }
}

/// I2C configuration for the SSD1306.
///
/// 400 kHz fast mode. The panel is rated for it and a full frame then takes
/// about 25 ms.
pub fn display_i2c_config() -> I2cConfig {
    let mut config = I2cConfig::default();
    config.frequency = I2C_FREQUENCY_HZ;
    config
}

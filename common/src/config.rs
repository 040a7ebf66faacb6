//! Display, input and timing configuration constants.
//!
//! Per-program tuning (gravity, paddle size, ...) lives at the top of each
//! program module; only values shared across modules are collected here.

// =============================================================================
// Display Configuration
// =============================================================================

/// Display width in pixels (SSD1306 128x64 module)
pub const SCREEN_WIDTH: u32 = 128;

/// Display height in pixels
pub const SCREEN_HEIGHT: u32 = 64;

/// Number of 8-pixel-high pages in display RAM.
pub const PAGES: usize = (SCREEN_HEIGHT / 8) as usize;

/// Size of a full 1bpp frame in bytes.
pub const FRAMEBUFFER_SIZE: usize = SCREEN_WIDTH as usize * PAGES;

/// 7-bit I2C address of the OLED (0x3D on modules with the SA0 jumper set).
pub const OLED_ADDRESS: u8 = 0x3C;

/// I2C bus frequency. 400 kHz fast mode pushes a full frame in ~25 ms.
pub const I2C_FREQUENCY_HZ: u32 = 400_000;

/// Screen center X coordinate, pre-computed as i32 for drawing code.
pub const CENTER_X: i32 = (SCREEN_WIDTH / 2) as i32;

/// Screen center Y coordinate, pre-computed as i32 for drawing code.
pub const CENTER_Y: i32 = (SCREEN_HEIGHT / 2) as i32;

// =============================================================================
// Input Configuration
// =============================================================================

/// Number of physical buttons.
pub const BUTTON_COUNT: usize = 3;

/// A raw level must be stable this long before the debounced level follows.
pub const DEBOUNCE_MS: u32 = 20;

/// A button counts as "held" once it has been down this long.
pub const HELD_MS: u32 = 400;

/// Exit combo held this long is reported as an explicit exit request.
pub const EXIT_REQUEST_MS: u32 = 2_000;

/// Any button held this long trips the fail-safe gesture.
pub const FAIL_SAFE_MS: u32 = 5_000;

// =============================================================================
// Launcher Configuration
// =============================================================================

/// Frame interval while the menu is shown.
pub const MENU_FRAME_MS: u32 = 10;

/// Vertical pitch of menu lines (8px glyph cell + 1px spacing).
pub const MENU_LINE_HEIGHT: i32 = 9;

/// How long the boot screen stays up before the menu appears.
pub const BOOT_SCREEN_MS: u32 = 1_000;

/// Delay between display init attempts when the panel does not answer.
pub const DISPLAY_RETRY_MS: u32 = 1_000;

/// On-board LED toggle period.
pub const HEARTBEAT_MS: u32 = 500;

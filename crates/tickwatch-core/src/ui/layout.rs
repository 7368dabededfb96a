//! Screen geometry shared by every page.
//!
//! The panel is a 128 x 160 portrait display. Pages are laid out with fixed
//! pixel positions, so everything that more than one page relies on lives
//! here.

/// Panel width in pixels.
pub const SCREEN_WIDTH: i32 = 128;

/// Panel height in pixels.
pub const SCREEN_HEIGHT: i32 = 160;

/// Horizontal center, used for centered headlines.
pub const CENTER_X: i32 = SCREEN_WIDTH / 2;

// ============================================================================
// Status bar
// ============================================================================

pub const STATUS_BAR_HEIGHT: i32 = 20;

/// Top-left of the short time readout.
pub const STATUS_TIME_X: i32 = 2;
pub const STATUS_TIME_Y: i32 = 5;

/// Center of the bluetooth dot.
pub const BLUETOOTH_X: i32 = SCREEN_WIDTH - 55;
pub const BLUETOOTH_Y: i32 = 10;
pub const BLUETOOTH_RADIUS: i32 = 5;

/// Battery outline; the fill and terminal nub are derived from it.
pub const BATTERY_X: i32 = SCREEN_WIDTH - 25;
pub const BATTERY_Y: i32 = 5;
pub const BATTERY_WIDTH: i32 = 20;
pub const BATTERY_HEIGHT: i32 = 10;

// ============================================================================
// Watch face
// ============================================================================

pub const FACE_TIME_Y: i32 = 50;
pub const FACE_DATE_Y: i32 = 80;
pub const FACE_STEPS_Y: i32 = 110;
pub const FACE_BATTERY_Y: i32 = 140;

// ============================================================================
// Lists and grids
// ============================================================================

pub const TITLE_X: i32 = 10;

pub const MENU_TITLE_Y: i32 = 30;
pub const MENU_FIRST_ROW_Y: i32 = 60;
pub const MENU_ROW_PITCH: i32 = 25;
pub const MENU_ROW_HEIGHT: i32 = 20;
pub const MENU_LABEL_X: i32 = 15;

pub const ICON_MENU_TITLE_Y: i32 = 25;
pub const ICON_GRID_COLUMNS: usize = 2;
pub const ICON_CELL_WIDTH: i32 = SCREEN_WIDTH / 2;
pub const ICON_CELL_HEIGHT: i32 = 60;
pub const ICON_GRID_TOP: i32 = 50;

// ============================================================================
// Side action bar
// ============================================================================

pub const ACTION_BAR_WIDTH: i32 = 20;
pub const ACTION_BAR_CENTER_X: i32 = SCREEN_WIDTH - ACTION_BAR_WIDTH / 2;
pub const ACTION_UP_TOP: i32 = 30;
pub const ACTION_DOWN_TOP: i32 = SCREEN_HEIGHT - 40;
/// Height of the up/down arrows, also their widest row.
pub const ACTION_ARROW_SIZE: i32 = 10;

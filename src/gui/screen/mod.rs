pub mod model;
pub mod view;

pub use model::{Frame, Screen};
pub use view::draw;

pub const TOP_BAR_HEIGHT: f64 = 56.0;
pub const BAR_HEIGHT: f64 = 56.0;
pub const PANEL_HEIGHT: f64 = 250.0;
pub const TOGGLE_RADIUS: f64 = 20.0; // center toggle disc
pub const TOGGLE_ICON_SIZE: f64 = 24.0;
pub const OPEN_ROTATION_DEG: f64 = 135.0; // "+" morphs into an "x"
pub const ACTION_DISC_RADIUS: f64 = 20.0;
pub const ACTION_ICON_SIZE: f64 = 22.0;
pub const BAR_ICON_SIZE: f64 = 22.0;
pub const GRID_PADDING: f64 = 8.0;
pub const CARD_PADDING: f64 = 4.0;
pub const CARD_HEIGHT: f64 = 160.0;
pub const THUMB_RADIUS: f64 = 30.0; // circular card thumbnail
pub const THUMB_LOAD_SIZE: i32 = 256;

pub const WINDOW_WIDTH: f32 = 720.0;
pub const WINDOW_HEIGHT: f32 = 560.0;
pub const PADDING: u16 = 20;
pub const SPACING: u32 = 12;
pub const TITLE_SIZE: u32 = 28;
pub const HEADING_SIZE: u32 = 20;
pub const STATUS_SIZE: u32 = 13;

use ratatui::style::Color;

pub const PRIMARY: Color = Color::from_u32(0x00f2efe9);
pub const SECONDARY: Color = Color::from_u32(0x005c5a57);
pub const NEUTRAL: Color = Color::from_u32(0x008a8784);
pub const BACKGROUND: Color = Color::from_u32(0x00121212);
pub const ACCENT: Color = Color::from_u32(0x00e8b04b);
pub const ERROR: Color = Color::from_u32(0x00e5534b);

use colored::Color;

pub const PRIMARY: Color = Color::BrightGreen;
pub const SEPARATOR: Color = Color::BrightBlack;
pub const TEXT_DEFAULT: Color = Color::BrightWhite;
pub const TIMESTAMP: Color = Color::BrightBlack;
pub const SOURCE: Color = Color::Green;
pub const IP_ADDR: Color = Color::BrightWhite;
pub const COUNT: Color = Color::Cyan;

use ratatui::style::Color;

// Hermes palette
pub const ACCENT: Color = Color::Rgb(229, 9, 20);          // Marquee red
pub const ACCENT_SOFT: Color = Color::Rgb(255, 92, 92);
pub const ANIME_PINK: Color = Color::Rgb(255, 105, 180);
pub const QUALITY_GOLD: Color = Color::Rgb(255, 200, 60);
pub const BORDER: Color = Color::Rgb(70, 70, 80);
pub const HIGHLIGHT_BG: Color = Color::Rgb(40, 40, 52);
pub const TEXT_PRIMARY: Color = Color::White;
pub const TEXT_SECONDARY: Color = Color::Rgb(200, 200, 210);
pub const TEXT_DIM: Color = Color::Rgb(130, 130, 140);

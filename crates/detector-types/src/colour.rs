use serde::{Deserialize, Serialize};

/// RGB colour with components in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Colour {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Colour {
    pub const WHITE: Colour = Colour::rgb(1.0, 1.0, 1.0);

    pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }
}

/// Named colour keys accepted by colour assignments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColorKey {
    Red,
    Green,
    Blue,
    Yellow,
    Magenta,
    Invisible,
}

impl ColorKey {
    /// Exact lowercase key, as written in colour assignments.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "red" => Some(ColorKey::Red),
            "green" => Some(ColorKey::Green),
            "blue" => Some(ColorKey::Blue),
            "yellow" => Some(ColorKey::Yellow),
            "magenta" => Some(ColorKey::Magenta),
            "invisible" => Some(ColorKey::Invisible),
            _ => None,
        }
    }

    /// Case-insensitive lookup used by grid colour overrides.
    pub fn from_key_ignore_case(key: &str) -> Option<Self> {
        Self::from_key(&key.to_ascii_lowercase())
    }

    /// Palette colour, or `None` for [`ColorKey::Invisible`].
    pub fn colour(self) -> Option<Colour> {
        match self {
            ColorKey::Red => Some(Colour::rgb(1.0, 0.2, 0.2)),
            ColorKey::Green => Some(Colour::rgb(0.5, 1.0, 0.5)),
            ColorKey::Blue => Some(Colour::rgb(0.0, 0.5, 1.0)),
            ColorKey::Yellow => Some(Colour::rgb(1.0, 1.0, 0.0)),
            ColorKey::Magenta => Some(Colour::rgb(1.0, 0.0, 1.0)),
            ColorKey::Invisible => None,
        }
    }
}

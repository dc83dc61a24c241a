use detector_types::{ColorKey, Colour, GridColorOverride};
use geometry_kernel::VisAttributes;

/// Grid colour for a key in any case. Unknown keys give white.
pub fn grid_colour(key: &str) -> VisAttributes {
    match ColorKey::from_key_ignore_case(key) {
        Some(ColorKey::Invisible) => VisAttributes::invisible(),
        Some(k) => VisAttributes::coloured(k.colour().unwrap_or(Colour::WHITE)),
        None => VisAttributes::coloured(Colour::WHITE),
    }
}

/// Display attributes for the three grid volumes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridStyle {
    pub container: VisAttributes,
    pub pillar_a: VisAttributes,
    pub pillar_b: VisAttributes,
}

impl GridStyle {
    /// Style for an override; inactive overrides give the neutral style.
    pub fn from_override(colors: Option<&GridColorOverride>) -> Self {
        match colors {
            Some(c) if c.active => Self {
                container: grid_colour(&c.container),
                pillar_a: grid_colour(&c.pillar_a),
                pillar_b: grid_colour(&c.pillar_b),
            },
            _ => Self::default(),
        }
    }
}

impl Default for GridStyle {
    fn default() -> Self {
        let white = VisAttributes::coloured(Colour::WHITE);
        Self {
            container: white,
            pillar_a: white,
            pillar_b: white,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_key_is_white() {
        assert_eq!(grid_colour("chartreuse").colour, Colour::WHITE);
    }

    #[test]
    fn inactive_override_is_neutral() {
        let colors = GridColorOverride {
            container: "red".into(),
            pillar_a: "green".into(),
            pillar_b: "blue".into(),
            active: false,
        };
        assert_eq!(GridStyle::from_override(Some(&colors)), GridStyle::default());
    }

    #[test]
    fn active_override_maps_each_volume() {
        let colors = GridColorOverride {
            container: "INVISIBLE".into(),
            pillar_a: "Green".into(),
            pillar_b: "blue".into(),
            active: true,
        };
        let style = GridStyle::from_override(Some(&colors));
        assert!(!style.container.visible);
        assert_eq!(Some(style.pillar_a.colour), ColorKey::Green.colour());
        assert_eq!(Some(style.pillar_b.colour), ColorKey::Blue.colour());
    }
}

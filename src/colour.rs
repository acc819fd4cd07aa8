/// A fill or stroke colour in the DeviceRGB or DeviceGray colour space. Components
/// range from 0.0 to 1.0.
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum Colour {
    Rgb { r: f32, g: f32, b: f32 },
    Grey { g: f32 },
}

impl Colour {
    /// An RGB colour from 8-bit components, as design tools give them
    pub fn rgb8(r: u8, g: u8, b: u8) -> Colour {
        Colour::Rgb {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        }
    }

    pub fn grey(g: f32) -> Colour {
        Colour::Grey { g }
    }
}

macro_rules! rgb8 {
    ($r:expr, $g:expr, $b:expr) => {
        Colour::Rgb {
            r: $r as f32 / 255.0,
            g: $g as f32 / 255.0,
            b: $b as f32 / 255.0,
        }
    };
}

/// The palette of the business document layouts
pub mod colours {
    use super::Colour;

    pub const BLACK: Colour = Colour::Grey { g: 0.0 };
    /// Section header bands
    pub const SECTION_BAND: Colour = rgb8!(248, 250, 252);
    /// Table header strips
    pub const TABLE_HEADER: Colour = rgb8!(240, 240, 240);
    /// Table row separators, footer and running header rules
    pub const RULE: Colour = rgb8!(200, 200, 200);
    /// Footer and running header text
    pub const MUTED_TEXT: Colour = rgb8!(100, 100, 100);
}

use rgb::RGB8;

const CITY_COLOURS: [RGB8; 10] = [
    RGB8 { r: 255, g: 87, b: 51 },
    RGB8 { r: 0, g: 150, b: 136 },
    RGB8 { r: 63, g: 81, b: 181 },
    RGB8 { r: 233, g: 30, b: 99 },
    RGB8 { r: 156, g: 39, b: 176 },
    RGB8 { r: 255, g: 193, b: 7 },
    RGB8 { r: 76, g: 175, b: 80 },
    RGB8 { r: 33, g: 150, b: 243 },
    RGB8 { r: 244, g: 67, b: 54 },
    RGB8 { r: 121, g: 85, b: 72 },
];

/// Index to colour mapping shared by every renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    colours: &'static [RGB8],
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            colours: &CITY_COLOURS,
        }
    }
}

impl Palette {
    pub fn len(&self) -> usize {
        self.colours.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colours.is_empty()
    }

    pub fn colour_of(&self, index: usize) -> RGB8 {
        self.colours[index % self.colours.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_colour_wraps_every_ten() {
        let palette = Palette::default();
        assert_eq!(palette.len(), 10);
        for i in 0..25 {
            assert_eq!(palette.colour_of(i), palette.colour_of(i + 10));
            assert_eq!(palette.colour_of(i), palette.colour_of(i));
        }
        assert_eq!(palette.colour_of(0), RGB8::new(255, 87, 51));
        assert_eq!(palette.colour_of(19), RGB8::new(121, 85, 72));
    }
}

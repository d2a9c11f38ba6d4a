use plotters::style::RGBColor;

/// Sequential colour maps used for the install-method hue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Palette {
    Viridis,
    Mako,
}

// Evenly spaced stops at 0, 0.25, 0.5, 0.75 and 1.
const VIRIDIS: [(u8, u8, u8); 5] = [
    (0x44, 0x01, 0x54),
    (0x3b, 0x52, 0x8b),
    (0x21, 0x91, 0x8c),
    (0x5e, 0xc9, 0x62),
    (0xfd, 0xe7, 0x25),
];

const MAKO: [(u8, u8, u8); 5] = [
    (0x0b, 0x04, 0x05),
    (0x3e, 0x35, 0x6b),
    (0x35, 0x7b, 0xa2),
    (0x49, 0xc1, 0xad),
    (0xde, 0xf5, 0xe5),
];

impl Palette {
    fn stops(self) -> &'static [(u8, u8, u8); 5] {
        match self {
            Palette::Viridis => &VIRIDIS,
            Palette::Mako => &MAKO,
        }
    }

    /// Colour at position `t` in `[0, 1]`, linearly interpolated.
    pub fn at(self, t: f64) -> RGBColor {
        let stops = self.stops();
        let scaled = t.clamp(0.0, 1.0) * (stops.len() - 1) as f64;
        let i = (scaled.floor() as usize).min(stops.len() - 2);
        let frac = scaled - i as f64;
        let lerp = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * frac).round() as u8;
        let (a, b) = (stops[i], stops[i + 1]);
        RGBColor(lerp(a.0, b.0), lerp(a.1, b.1), lerp(a.2, b.2))
    }

    /// `n` colours sampled evenly, skipping both ends of the map.
    pub fn colors(self, n: usize) -> Vec<RGBColor> {
        (1..=n).map(|i| self.at(i as f64 / (n + 1) as f64)).collect()
    }
}

//! The fixed color ramp that time of day is mapped onto.

use palette::{LinSrgb, Srgb};

/// Number of entries in a ramp
pub const RAMP_LEN: usize = 256;

/// Reference stops of matplotlib's viridis, evenly spaced from 0.0 to 1.0.
const VIRIDIS_STOPS: [(u8, u8, u8); 10] = [
    (0x44, 0x01, 0x54),
    (0x48, 0x28, 0x78),
    (0x3e, 0x49, 0x89),
    (0x31, 0x68, 0x8e),
    (0x26, 0x82, 0x8e),
    (0x1f, 0x9e, 0x89),
    (0x35, 0xb7, 0x79),
    (0x6e, 0xce, 0x58),
    (0xb5, 0xde, 0x2b),
    (0xfd, 0xe7, 0x25),
];

/// An immutable 256-entry lookup table of display colors.
///
/// Entries are kept as floating point sRGB. Neighboring stops are mixed in
/// linear light, where relative luminance is a linear function of the mix, so
/// lightness strictly increases from entry to entry as long as it increases
/// from stop to stop. Quantizing to 8 bits would break that for adjacent
/// entries; `display` rounds only for output.
#[derive(Debug, Clone)]
pub struct Colormap {
    name: &'static str,
    entries: Box<[Srgb<f64>; RAMP_LEN]>,
}

impl Colormap {
    /// Dark purple through teal to yellow, monotonic in lightness.
    pub fn viridis() -> Self {
        Self::from_stops("viridis", &VIRIDIS_STOPS)
    }

    fn from_stops(name: &'static str, stops: &[(u8, u8, u8)]) -> Self {
        let linear: Vec<LinSrgb<f64>> = stops
            .iter()
            .map(|&(r, g, b)| Srgb::new(r, g, b).into_format::<f64>().into_linear())
            .collect();
        let segments = (linear.len() - 1) as f64;
        let mut entries = Box::new([Srgb::new(0.0f64, 0.0, 0.0); RAMP_LEN]);

        for (i, entry) in entries.iter_mut().enumerate() {
            let pos = i as f64 / (RAMP_LEN - 1) as f64 * segments;
            let lo = (pos.floor() as usize).min(linear.len() - 2);
            let t = pos - lo as f64;
            let (from, to) = (linear[lo], linear[lo + 1]);

            let mixed = LinSrgb::new(
                lerp(from.red, to.red, t),
                lerp(from.green, to.green, t),
                lerp(from.blue, to.blue, t),
            );
            *entry = Srgb::from_linear(mixed);
        }

        Self { name, entries }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Entry at `index`, clamped to the last entry.
    pub fn get(&self, index: usize) -> Srgb<f64> {
        self.entries[index.min(RAMP_LEN - 1)]
    }

    /// Entry at `index` rounded to 8 bits per channel.
    pub fn display(&self, index: usize) -> Srgb<u8> {
        self.get(index).into_format::<u8>()
    }
}

fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

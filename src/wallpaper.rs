mod extract;
mod index;
mod update;

pub use extract::{fingerprint_file, ExtractError};
pub use index::{ColorIndex, PersistenceError};
pub use update::update_index;

use palette::white_point::D65;
use palette::{IntoColor, Lab, Srgb};
use serde::{Deserialize, Serialize};

/// A color in CIE L*a*b* (D65), as produced by `palette`.
///
/// L is in `[0, 100]`, a and b roughly in `[-128, 127]`. Both the image
/// fingerprints and the time-of-day targets use this convention, so distances
/// between them are meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Fingerprint {
    pub l: f64,
    pub a: f64,
    pub b: f64,
}

impl Fingerprint {
    pub fn new(l: f64, a: f64, b: f64) -> Self {
        Self { l, a, b }
    }

    /// Convert an 8-bit sRGB color into a fingerprint.
    pub fn from_srgb(rgb: Srgb<u8>) -> Self {
        Self::from_srgb_f64(rgb.into_format())
    }

    /// Convert an sRGB color with channels in `[0, 1]` into a fingerprint.
    pub fn from_srgb_f64(rgb: Srgb<f64>) -> Self {
        let lab: Lab<D65, f64> = rgb.into_color();
        Self::new(lab.l, lab.a, lab.b)
    }

    /// Euclidean distance in L*a*b* space.
    pub fn distance(&self, other: &Fingerprint) -> f64 {
        let dl = self.l - other.l;
        let da = self.a - other.a;
        let db = self.b - other.b;
        (dl * dl + da * da + db * db).sqrt()
    }

    pub fn is_finite(&self) -> bool {
        self.l.is_finite() && self.a.is_finite() && self.b.is_finite()
    }
}

/// One indexed wallpaper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WallpaperRecord {
    /// Canonical path of the image; primary key of the index
    pub identifier: String,
    pub fingerprint: Fingerprint,
}

impl WallpaperRecord {
    pub fn new(identifier: impl Into<String>, fingerprint: Fingerprint) -> Self {
        Self {
            identifier: identifier.into(),
            fingerprint,
        }
    }
}

//! A long, reproducible list of colors for plots with many series.
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of pseudo-random colors following the soft colors.
pub const RANDOM_COLORS: usize = 100;

/// Seed used by [`Palette::default`].
pub const DEFAULT_SEED: u64 = 1;

/// An 8-bit RGBA color.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq, Hash)]
pub struct Rgba {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel, 255 is opaque.
    pub a: u8,
}

impl Rgba {
    /// An opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }
}

/// Muted colors that are easy to tell apart, used first by every palette.
pub const SOFT_COLORS: [Rgba; 7] = [
    Rgba::rgb(241, 90, 96),
    Rgba::rgb(122, 195, 106),
    Rgba::rgb(90, 155, 212),
    Rgba::rgb(250, 167, 91),
    Rgba::rgb(158, 103, 171),
    Rgba::rgb(206, 112, 88),
    Rgba::rgb(215, 127, 180),
];

/// Error returned when a palette would have no colors.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("a palette needs at least one color")]
pub struct EmptyPaletteError;

/// An immutable, non-empty sequence of colors: the [`SOFT_COLORS`] followed by [`RANDOM_COLORS`]
/// opaque colors drawn from a PCG generator. Palettes built from the same seed are identical.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(try_from = "PaletteColors")]
pub struct Palette {
    colors: Vec<Rgba>,
}

#[derive(Deserialize)]
struct PaletteColors {
    colors: Vec<Rgba>,
}

impl TryFrom<PaletteColors> for Palette {
    type Error = EmptyPaletteError;

    fn try_from(value: PaletteColors) -> Result<Self, Self::Error> {
        Self::from_colors(value.colors)
    }
}

impl Palette {
    /// Builds the palette for `seed`.
    pub fn new(seed: u64) -> Self {
        let mut rng = Pcg64::seed_from_u64(seed);
        let colors = SOFT_COLORS
            .iter()
            .copied()
            .chain((0..RANDOM_COLORS).map(|_| Rgba::rgb(rng.gen(), rng.gen(), rng.gen())))
            .collect();

        Self { colors }
    }

    /// Builds a palette from an explicit list of colors.
    ///
    /// # Errors
    ///
    /// Returns an error if `colors` is empty.
    pub fn from_colors(colors: Vec<Rgba>) -> Result<Self, EmptyPaletteError> {
        if colors.is_empty() {
            return Err(EmptyPaletteError);
        }

        Ok(Self { colors })
    }

    /// Returns all colors.
    pub fn colors(&self) -> &[Rgba] {
        &self.colors
    }

    /// Returns the number of colors.
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Returns `true` if the palette has no colors, which never happens.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Returns the color at `index`, if there is one.
    pub fn get(&self, index: usize) -> Option<Rgba> {
        self.colors.get(index).copied()
    }

    /// Returns the color at `index`, starting over at the beginning once the palette is
    /// exhausted.
    pub fn cycle(&self, index: usize) -> Rgba {
        self.colors[index % self.colors.len()]
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

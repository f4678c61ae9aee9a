//! Star color palettes.
//!
//! A palette is either one flat color or a weighted set of bands. Sampling a
//! banded palette is a categorical draw over the band weights followed by a
//! uniform draw inside each channel range of the chosen band.

use rand::Rng;
use smallvec::{smallvec, SmallVec};

/// Uniform range `[min, min + span)` for one color channel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChannelRange {
    pub min: f32,
    pub span: f32,
}

impl ChannelRange {
    pub const fn fixed(value: f32) -> Self {
        Self {
            min: value,
            span: 0.0,
        }
    }

    pub const fn span(min: f32, span: f32) -> Self {
        Self { min, span }
    }

    #[inline]
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        if self.span > 0.0 {
            self.min + rng.gen::<f32>() * self.span
        } else {
            self.min
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorBand {
    pub weight: f32,
    pub channels: [ChannelRange; 3],
}

#[derive(Clone, Debug, PartialEq)]
pub enum Palette {
    Flat([f32; 3]),
    Banded(SmallVec<[ColorBand; 3]>),
}

impl Palette {
    pub fn white() -> Self {
        Palette::Flat([1.0, 1.0, 1.0])
    }

    /// Mostly cool white with violet and warm accents.
    pub fn star_field() -> Self {
        Palette::Banded(smallvec![
            ColorBand {
                weight: 0.7,
                channels: [
                    ChannelRange::span(0.8, 0.2),
                    ChannelRange::span(0.8, 0.2),
                    ChannelRange::fixed(1.0),
                ],
            },
            ColorBand {
                weight: 0.2,
                channels: [
                    ChannelRange::span(0.8, 0.2),
                    ChannelRange::span(0.4, 0.3),
                    ChannelRange::fixed(1.0),
                ],
            },
            ColorBand {
                weight: 0.1,
                channels: [
                    ChannelRange::fixed(1.0),
                    ChannelRange::span(0.8, 0.2),
                    ChannelRange::span(0.4, 0.3),
                ],
            },
        ])
    }

    pub fn total_weight(&self) -> f32 {
        match self {
            Palette::Flat(_) => 1.0,
            Palette::Banded(bands) => bands.iter().map(|b| b.weight).sum(),
        }
    }

    /// Index of the band selected by `roll`, where `roll` is in `[0, total_weight)`.
    pub fn band_index(&self, roll: f32) -> Option<usize> {
        let Palette::Banded(bands) = self else {
            return None;
        };
        let mut acc = 0.0;
        for (i, band) in bands.iter().enumerate() {
            acc += band.weight;
            if roll < acc {
                return Some(i);
            }
        }
        // float accumulation can leave roll == total; fall into the last non-empty band
        bands.iter().rposition(|b| b.weight > 0.0)
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> [f32; 3] {
        match self {
            Palette::Flat(rgb) => *rgb,
            Palette::Banded(bands) => {
                let roll = rng.gen::<f32>() * self.total_weight();
                match self.band_index(roll) {
                    Some(i) => {
                        let [r, g, b] = bands[i].channels;
                        [r.sample(rng), g.sample(rng), b.sample(rng)]
                    }
                    None => [1.0, 1.0, 1.0],
                }
            }
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Palette::white()
    }
}

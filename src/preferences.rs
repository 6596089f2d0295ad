//! Display preferences handed to the view layer.

use crate::model::{Color, PieceKind};
use crate::protocol::glyph;
use derive_getters::Getters;
use derive_new::new;
use serde::{Deserialize, Serialize};
use strum::{EnumIter, EnumString};

/// Board theme.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Theme {
    /// Light background: outline glyphs are white.
    #[default]
    Light,
    /// Dark background: the glyph sets swap so white pieces read as bright.
    Dark,
}

/// View preferences, passed explicitly instead of read from ambient state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Getters, new)]
pub struct Preferences {
    /// Active theme.
    theme: Theme,
}

impl Preferences {
    /// Symbol used to draw a piece under the active theme.
    pub fn symbol(&self, kind: PieceKind, color: Color) -> char {
        match self.theme {
            Theme::Light => glyph(kind, color),
            Theme::Dark => glyph(kind, color.opponent()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dark_theme_swaps_glyph_sets() {
        let light = Preferences::new(Theme::Light);
        let dark = Preferences::new(Theme::Dark);
        assert_eq!(light.symbol(PieceKind::King, Color::White), '♔');
        assert_eq!(dark.symbol(PieceKind::King, Color::White), '♚');
        assert_eq!(dark.symbol(PieceKind::Pawn, Color::Black), '♙');
    }
}

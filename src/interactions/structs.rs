use core::fmt;

use image::Rgba;
use serde::{Deserialize, Serialize};

/// Residue-level interaction categories, listed in classification priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Interaction {
    DisulfideBond,
    SaltBridge,
    CationPi,
    PiStacking,
    HydrophobicContact,
    /// Fallback for any residue pair closer than 4 Å
    CloseContact,
}

impl Interaction {
    /// Human-readable category name.
    pub fn name(&self) -> &'static str {
        match self {
            Interaction::DisulfideBond => "Disulfide Bond",
            Interaction::SaltBridge => "Salt Bridge",
            Interaction::CationPi => "Cation-Pi Interaction",
            Interaction::PiStacking => "Pi-Stacking",
            Interaction::HydrophobicContact => "Hydrophobic Contact",
            Interaction::CloseContact => "Close Contact",
        }
    }

    /// Fixed display color, independent of theme.
    pub fn color(&self) -> Rgba<u8> {
        match self {
            Interaction::DisulfideBond => Rgba([234, 179, 8, 255]),
            Interaction::SaltBridge => Rgba([239, 68, 68, 255]),
            Interaction::CationPi => Rgba([249, 115, 22, 255]),
            Interaction::PiStacking => Rgba([168, 85, 247, 255]),
            Interaction::HydrophobicContact => Rgba([34, 197, 94, 255]),
            Interaction::CloseContact => Rgba([107, 114, 128, 255]),
        }
    }

    /// The heatmap filter this interaction belongs to, if any.
    pub fn filter_category(&self) -> Option<FilterCategory> {
        match self {
            Interaction::DisulfideBond => Some(FilterCategory::Disulfide),
            Interaction::SaltBridge => Some(FilterCategory::SaltBridge),
            Interaction::PiStacking => Some(FilterCategory::PiStacking),
            Interaction::HydrophobicContact => Some(FilterCategory::Hydrophobic),
            Interaction::CationPi | Interaction::CloseContact => None,
        }
    }
}

impl fmt::Display for Interaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Interaction categories that can be shown in filtered mode.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum FilterCategory {
    SaltBridge,
    Disulfide,
    Hydrophobic,
    PiStacking,
}

/// A classified residue pair: the category plus its display color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassifiedInteraction {
    pub interaction: Interaction,
    pub color: Rgba<u8>,
}

impl From<Interaction> for ClassifiedInteraction {
    fn from(interaction: Interaction) -> Self {
        Self {
            interaction,
            color: interaction.color(),
        }
    }
}

impl fmt::Display for ClassifiedInteraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.interaction)
    }
}

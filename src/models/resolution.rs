use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ExportError;

/// Named output quality preset for exported videos
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResolutionTier {
    FullHd,
    TwoK,
    FourK,
}

impl ResolutionTier {
    pub const ALL: [ResolutionTier; 3] = [Self::FullHd, Self::TwoK, Self::FourK];

    pub fn name(&self) -> &'static str {
        match self {
            ResolutionTier::FullHd => "FULL_HD",
            ResolutionTier::TwoK => "2K",
            ResolutionTier::FourK => "4K",
        }
    }
}

impl fmt::Display for ResolutionTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ResolutionTier {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().replace('-', "_").as_str() {
            "FULL_HD" | "FULLHD" | "FHD" => Ok(Self::FullHd),
            "2K" => Ok(Self::TwoK),
            "4K" => Ok(Self::FourK),
            _ => Err(ExportError::UnsupportedResolution(s.to_string())),
        }
    }
}

/// Pixel dimensions of a rendered output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Tier → dimensions table used for video exports.
///
/// The default is the portrait (9:16) table the video service has been
/// fed so far; [`ResolutionTable::landscape`] is the conventional 16:9
/// reading of the same tier names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionTable {
    #[serde(default = "portrait_full_hd")]
    pub full_hd: Dimensions,

    #[serde(rename = "2k", alias = "two_k", default = "portrait_two_k")]
    pub two_k: Dimensions,

    #[serde(rename = "4k", alias = "four_k", default = "portrait_four_k")]
    pub four_k: Dimensions,
}

fn portrait_full_hd() -> Dimensions {
    ResolutionTable::PORTRAIT.full_hd
}

fn portrait_two_k() -> Dimensions {
    ResolutionTable::PORTRAIT.two_k
}

fn portrait_four_k() -> Dimensions {
    ResolutionTable::PORTRAIT.four_k
}

impl ResolutionTable {
    pub const PORTRAIT: Self = Self {
        full_hd: Dimensions::new(1080, 1920),
        two_k: Dimensions::new(1440, 2560),
        four_k: Dimensions::new(2160, 3840),
    };

    pub const LANDSCAPE: Self = Self {
        full_hd: Dimensions::new(1920, 1080),
        two_k: Dimensions::new(2560, 1440),
        four_k: Dimensions::new(3840, 2160),
    };

    pub fn landscape() -> Self {
        Self::LANDSCAPE
    }

    pub fn resolve(&self, tier: ResolutionTier) -> Dimensions {
        match tier {
            ResolutionTier::FullHd => self.full_hd,
            ResolutionTier::TwoK => self.two_k,
            ResolutionTier::FourK => self.four_k,
        }
    }

    /// Resolve a tier given by name, e.g. from the command line.
    pub fn resolve_name(&self, name: &str) -> Result<Dimensions, ExportError> {
        Ok(self.resolve(name.parse()?))
    }
}

impl Default for ResolutionTable {
    fn default() -> Self {
        Self::PORTRAIT
    }
}

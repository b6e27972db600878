use super::path::SymbolStyle;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// How the significance value of a result is to be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignificanceKind {
    /// Higher is better; significant at or above [`Z_SCORE_THRESHOLD`].
    ZScore,
    /// Lower is better; significant below [`P_VALUE_THRESHOLD`].
    PValue,
}

pub const Z_SCORE_THRESHOLD: f64 = 3.5;
pub const P_VALUE_THRESHOLD: f64 = 0.01;

impl SignificanceKind {
    pub fn is_significant(&self, value: f64) -> bool {
        match self {
            SignificanceKind::ZScore => value >= Z_SCORE_THRESHOLD,
            SignificanceKind::PValue => value < P_VALUE_THRESHOLD,
        }
    }

    /// Value reported for an alignment that found nothing.
    pub fn insignificant_value(&self) -> f64 {
        match self {
            SignificanceKind::ZScore => 0.0,
            SignificanceKind::PValue => 1.0,
        }
    }
}

/// The alignment method a result was produced with.
///
/// The method decides the twist budget, the significance metric and the report
/// conventions; the fragment chaining pipeline itself is shared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
pub enum Algorithm {
    #[serde(rename = "ce")]
    Ce,
    #[serde(rename = "ce-sidechain")]
    CeSideChain,
    #[serde(rename = "fatcat-rigid")]
    FatCatRigid,
    #[default]
    #[serde(rename = "fatcat-flexible")]
    FatCatFlexible,
}

impl Algorithm {
    pub const ALL: [Algorithm; 4] = [
        Algorithm::Ce,
        Algorithm::CeSideChain,
        Algorithm::FatCatRigid,
        Algorithm::FatCatFlexible,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Ce => "jCE",
            Algorithm::CeSideChain => "jCE-sidechain",
            Algorithm::FatCatRigid => "jFatCat_rigid",
            Algorithm::FatCatFlexible => "jFatCat_flexible",
        }
    }

    pub fn significance(&self) -> SignificanceKind {
        match self {
            Algorithm::Ce | Algorithm::CeSideChain => SignificanceKind::ZScore,
            Algorithm::FatCatRigid | Algorithm::FatCatFlexible => SignificanceKind::PValue,
        }
    }

    /// Rigid methods allow no twists regardless of configuration.
    pub fn allows_twists(&self) -> bool {
        matches!(self, Algorithm::FatCatFlexible)
    }

    pub fn symbol_style(&self) -> SymbolStyle {
        match self {
            Algorithm::Ce | Algorithm::CeSideChain => SymbolStyle::Identity,
            Algorithm::FatCatRigid | Algorithm::FatCatFlexible => SymbolStyle::BlockIndex,
        }
    }

    /// Closing note of the FatCat-style report. Only plain CE explains identity symbols;
    /// side-chain CE shares the block-index note of the FatCat variants.
    pub fn report_note(&self) -> &'static str {
        match self {
            Algorithm::Ce => {
                "Note: positions are from PDB; | means alignment of identical amino acids, : of similar amino acids "
            }
            Algorithm::CeSideChain | Algorithm::FatCatRigid | Algorithm::FatCatFlexible => {
                "Note: positions are from PDB; the numbers between alignments are block index"
            }
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown alignment algorithm '{0}'")]
pub struct ParseAlgorithmError(pub String);

impl FromStr for Algorithm {
    type Err = ParseAlgorithmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "ce" | "jce" => Ok(Algorithm::Ce),
            "ce-sidechain" | "ce-side-chain" | "jce-sidechain" => Ok(Algorithm::CeSideChain),
            "fatcat-rigid" | "jfatcat-rigid" => Ok(Algorithm::FatCatRigid),
            "fatcat" | "fatcat-flexible" | "jfatcat-flexible" => Ok(Algorithm::FatCatFlexible),
            _ => Err(ParseAlgorithmError(s.to_string())),
        }
    }
}

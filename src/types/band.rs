//! Heat band classification types

use serde::Serialize;
use std::fmt;

/// Ordered risk classification, `Cold < Mild < Warm < Hot < Critical`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HeatBand {
    #[default]
    Cold,
    Mild,
    Warm,
    Hot,
    Critical,
}

impl HeatBand {
    pub const ALL: [HeatBand; 5] = [
        HeatBand::Cold,
        HeatBand::Mild,
        HeatBand::Warm,
        HeatBand::Hot,
        HeatBand::Critical,
    ];

    /// Hot and critical bands raise a volatility spike notification.
    pub fn is_elevated(&self) -> bool {
        *self >= HeatBand::Hot
    }

    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HeatBand::Cold => "cold",
            HeatBand::Mild => "mild",
            HeatBand::Warm => "warm",
            HeatBand::Hot => "hot",
            HeatBand::Critical => "critical",
        }
    }
}

impl fmt::Display for HeatBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

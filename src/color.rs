use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Color chosen for a round. Each color carries a fixed coefficient.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Blue,
    Red,
    Yellow,
    Black,
    /// Star (okey) color, worth the largest coefficient.
    Star,
}

pub const TOTAL_ROUNDS: usize = 11;
pub const PLAYER_COUNT: usize = 4;
pub const MAX_TILE_SCORE: i64 = 500;
pub const MAX_NAME_LEN: usize = 20;
pub const FINAL_ROUND_MULTIPLIER: i64 = 10;

impl Color {
    /// All colors in the order the scoring sheet lists them.
    pub const ALL: [Color; 5] = [
        Color::Blue,
        Color::Red,
        Color::Yellow,
        Color::Black,
        Color::Star,
    ];

    /// Multiplier applied to every penalty and to a double finish.
    #[inline]
    pub const fn coefficient(&self) -> i64 {
        match self {
            Color::Blue => 5,
            Color::Red => 4,
            Color::Yellow => 3,
            Color::Black => 6,
            Color::Star => 10,
        }
    }

    /// Looks up the color owning a coefficient, if any.
    pub fn from_coefficient(value: i64) -> Option<Color> {
        Self::ALL.into_iter().find(|color| color.coefficient() == value)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Color::Blue => "blue",
            Color::Red => "red",
            Color::Yellow => "yellow",
            Color::Black => "black",
            Color::Star => "star",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (x{})", self.name(), self.coefficient())
    }
}

impl FromStr for Color {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        if let Some(color) = Self::ALL.into_iter().find(|c| c.name() == lower) {
            return Ok(color);
        }
        lower
            .parse::<i64>()
            .ok()
            .and_then(Color::from_coefficient)
            .ok_or_else(|| format!("unknown color: {s}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coefficients_match_scoring_sheet() {
        let coefficients: Vec<i64> = Color::ALL.iter().map(Color::coefficient).collect();
        assert_eq!(coefficients, vec![5, 4, 3, 6, 10]);
    }

    #[test]
    fn parse_by_name_or_coefficient() {
        assert_eq!("Blue".parse::<Color>(), Ok(Color::Blue));
        assert_eq!(" star ".parse::<Color>(), Ok(Color::Star));
        assert_eq!("6".parse::<Color>(), Ok(Color::Black));
        assert!("7".parse::<Color>().is_err());
        assert!("green".parse::<Color>().is_err());
    }
}

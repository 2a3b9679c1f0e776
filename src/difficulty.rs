//! Difficulty levels and the generation density each one selects

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GameError;

/// Difficulty key
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Normal,
    Hard,
    Expert,
}

/// Read-only generation parameters for one difficulty
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyProfile {
    /// Nominal wall density. Carving decides the real wall layout.
    pub wall_count: u32,
    /// Hole density; scales the per-dead-end hole chance, not an exact count
    pub hole_count: u32,
    /// Fraction of the canvas covered by the maze grid
    pub maze_size: f32,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Normal,
        Difficulty::Hard,
        Difficulty::Expert,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Normal => "normal",
            Difficulty::Hard => "hard",
            Difficulty::Expert => "expert",
        }
    }

    pub fn profile(&self) -> DifficultyProfile {
        match self {
            Difficulty::Easy => DifficultyProfile {
                wall_count: 5,
                hole_count: 3,
                maze_size: 0.7,
            },
            Difficulty::Normal => DifficultyProfile {
                wall_count: 8,
                hole_count: 5,
                maze_size: 0.8,
            },
            Difficulty::Hard => DifficultyProfile {
                wall_count: 12,
                hole_count: 8,
                maze_size: 0.9,
            },
            Difficulty::Expert => DifficultyProfile {
                wall_count: 16,
                hole_count: 12,
                maze_size: 1.0,
            },
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "normal" => Ok(Difficulty::Normal),
            "hard" => Ok(Difficulty::Hard),
            "expert" => Ok(Difficulty::Expert),
            _ => Err(GameError::UnknownDifficulty(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_keys() {
        assert_eq!("easy".parse::<Difficulty>().unwrap(), Difficulty::Easy);
        assert_eq!("Expert".parse::<Difficulty>().unwrap(), Difficulty::Expert);
        for d in Difficulty::ALL {
            assert_eq!(d.as_str().parse::<Difficulty>().unwrap(), d);
        }
    }

    #[test]
    fn test_unknown_difficulty() {
        let err = "insane".parse::<Difficulty>().unwrap_err();
        assert!(matches!(err, GameError::UnknownDifficulty(ref k) if k == "insane"));
    }

    #[test]
    fn test_profiles_scale_with_difficulty() {
        let sizes: Vec<f32> = Difficulty::ALL.iter().map(|d| d.profile().maze_size).collect();
        assert!(sizes.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(Difficulty::Easy.profile().hole_count, 3);
    }
}

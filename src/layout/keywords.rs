//! Alignment keywords of the layout shorthand.
//!
//! Keywords use their CSS spellings (`space-between`, `flex-start`, ...) both
//! in [`FromStr`] and in serde.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use taffy::{AlignItems as TaffyAlignItems, JustifyContent as TaffyJustifyContent};
use thiserror::Error;

/// A keyword that is not part of the vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {axis} alignment keyword: {keyword}")]
pub struct UnknownKeyword {
    /// `"main-axis"` or `"cross-axis"`.
    pub axis: &'static str,
    /// The rejected input.
    pub keyword: String,
}

/// Distribution of children along the main axis (`x` of the shorthand).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MainAxis {
    Start,
    End,
    FlexStart,
    FlexEnd,
    Center,
    SpaceBetween,
    SpaceAround,
    SpaceEvenly,
}

/// Alignment of children across the main axis (`y` of the shorthand).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CrossAxis {
    Start,
    End,
    FlexStart,
    FlexEnd,
    Center,
    Baseline,
    Stretch,
}

impl From<MainAxis> for TaffyJustifyContent {
    fn from(keyword: MainAxis) -> Self {
        match keyword {
            MainAxis::Start => Self::Start,
            MainAxis::End => Self::End,
            MainAxis::FlexStart => Self::FlexStart,
            MainAxis::FlexEnd => Self::FlexEnd,
            MainAxis::Center => Self::Center,
            MainAxis::SpaceBetween => Self::SpaceBetween,
            MainAxis::SpaceAround => Self::SpaceAround,
            MainAxis::SpaceEvenly => Self::SpaceEvenly,
        }
    }
}

impl From<CrossAxis> for TaffyAlignItems {
    fn from(keyword: CrossAxis) -> Self {
        match keyword {
            CrossAxis::Start => Self::Start,
            CrossAxis::End => Self::End,
            CrossAxis::FlexStart => Self::FlexStart,
            CrossAxis::FlexEnd => Self::FlexEnd,
            CrossAxis::Center => Self::Center,
            CrossAxis::Baseline => Self::Baseline,
            CrossAxis::Stretch => Self::Stretch,
        }
    }
}

impl FromStr for MainAxis {
    type Err = UnknownKeyword;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "start" => Self::Start,
            "end" => Self::End,
            "flex-start" => Self::FlexStart,
            "flex-end" => Self::FlexEnd,
            "center" => Self::Center,
            "space-between" => Self::SpaceBetween,
            "space-around" => Self::SpaceAround,
            "space-evenly" => Self::SpaceEvenly,
            other => {
                return Err(UnknownKeyword {
                    axis: "main-axis",
                    keyword: other.to_string(),
                })
            }
        })
    }
}

impl FromStr for CrossAxis {
    type Err = UnknownKeyword;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "start" => Self::Start,
            "end" => Self::End,
            "flex-start" => Self::FlexStart,
            "flex-end" => Self::FlexEnd,
            "center" => Self::Center,
            "baseline" => Self::Baseline,
            "stretch" => Self::Stretch,
            other => {
                return Err(UnknownKeyword {
                    axis: "cross-axis",
                    keyword: other.to_string(),
                })
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_css_spellings() {
        assert_eq!("space-between".parse::<MainAxis>(), Ok(MainAxis::SpaceBetween));
        assert_eq!("baseline".parse::<CrossAxis>(), Ok(CrossAxis::Baseline));
    }

    #[test]
    fn rejects_keywords_of_the_other_axis() {
        let err = "space-between".parse::<CrossAxis>().unwrap_err();
        assert_eq!(err.to_string(), "unknown cross-axis alignment keyword: space-between");
        assert!("stretch".parse::<MainAxis>().is_err());
    }

    #[test]
    fn serde_uses_the_same_spellings() {
        assert_eq!(serde_json::to_string(&MainAxis::SpaceEvenly).unwrap(), "\"space-evenly\"");
        let parsed: CrossAxis = serde_json::from_str("\"flex-end\"").unwrap();
        assert_eq!(parsed, CrossAxis::FlexEnd);
    }

    #[test]
    fn maps_onto_taffy() {
        assert_eq!(TaffyJustifyContent::from(MainAxis::SpaceAround), TaffyJustifyContent::SpaceAround);
        assert_eq!(TaffyAlignItems::from(CrossAxis::Center), TaffyAlignItems::Center);
    }
}

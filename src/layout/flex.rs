//! Flex container shorthand.
//!
//! [`Flex`] describes a container with a handful of flags instead of a full
//! style: `col` or `row` for the axis, `reverse` to flip it, and an optional
//! `layout { x, y }` for alignment along and across that axis. Everything else
//! goes in the passthrough [`Style`], which reaches the container untouched.
//!
//! | Shorthand | Container property |
//! |---|---|
//! | `col` | `flex_direction: Column` (default `Row`) |
//! | `reverse` | `ColumnReverse` / `RowReverse` |
//! | `layout.x` | `justify_content` |
//! | `layout.y` | `align_items` |

use super::keywords::{CrossAxis, MainAxis};
use serde::{Deserialize, Serialize};
use taffy::{AlignItems, FlexDirection, JustifyContent, Style};

/// Alignment part of the shorthand. Absent keywords stay unset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Layout {
    /// Main-axis distribution.
    pub x: Option<MainAxis>,
    /// Cross-axis alignment.
    pub y: Option<CrossAxis>,
}

/// Declarative flex container description.
///
/// # Example
///
/// ```
/// use reaccoon::layout::{CrossAxis, Flex, MainAxis};
/// use taffy::{AlignItems, FlexDirection, JustifyContent};
///
/// let style = Flex::row()
///     .x(MainAxis::SpaceBetween)
///     .y(CrossAxis::Center)
///     .resolve();
///
/// assert_eq!(style.flex_direction, FlexDirection::Row);
/// assert_eq!(style.justify_content, Some(JustifyContent::SpaceBetween));
/// assert_eq!(style.align_items, Some(AlignItems::Center));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Flex {
    /// Lay children out in a column.
    pub col: bool,
    /// Lay children out in a row. This is the default; `col` wins if both are set.
    pub row: bool,
    /// Reverse the chosen direction.
    pub reverse: bool,
    /// Alignment keywords.
    pub layout: Option<Layout>,
    /// Passthrough container style.
    pub style: Style,
}

/// Properties handed to the flex container.
#[derive(Debug, Clone, PartialEq)]
pub struct ContainerProps {
    /// Direction chosen by the flags.
    pub direction: FlexDirection,
    /// From `layout.x`, if given.
    pub justify_content: Option<JustifyContent>,
    /// From `layout.y`, if given.
    pub align_items: Option<AlignItems>,
    /// The passthrough style.
    pub rest: Style,
}

impl Flex {
    /// A row container with no alignment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A column container.
    #[must_use]
    pub fn col() -> Self {
        Self { col: true, ..Self::default() }
    }

    /// A row container.
    #[must_use]
    pub fn row() -> Self {
        Self { row: true, ..Self::default() }
    }

    /// Reverses the direction.
    #[must_use]
    pub const fn reversed(mut self) -> Self {
        self.reverse = true;
        self
    }

    /// Sets the main-axis keyword.
    #[must_use]
    pub fn x(mut self, keyword: MainAxis) -> Self {
        self.layout.get_or_insert_with(Layout::default).x = Some(keyword);
        self
    }

    /// Sets the cross-axis keyword.
    #[must_use]
    pub fn y(mut self, keyword: CrossAxis) -> Self {
        self.layout.get_or_insert_with(Layout::default).y = Some(keyword);
        self
    }

    /// Replaces the alignment keywords.
    #[must_use]
    pub const fn layout(mut self, layout: Layout) -> Self {
        self.layout = Some(layout);
        self
    }

    /// Replaces the passthrough style.
    #[must_use]
    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Direction selected by `col` and `reverse`.
    #[must_use]
    pub const fn direction(&self) -> FlexDirection {
        match (self.col, self.reverse) {
            (true, false) => FlexDirection::Column,
            (true, true) => FlexDirection::ColumnReverse,
            (false, false) => FlexDirection::Row,
            (false, true) => FlexDirection::RowReverse,
        }
    }

    /// Translates the shorthand into container properties.
    #[must_use]
    pub fn container_props(&self) -> ContainerProps {
        let layout = self.layout.unwrap_or_default();

        ContainerProps {
            direction: self.direction(),
            justify_content: layout.x.map(JustifyContent::from),
            align_items: layout.y.map(AlignItems::from),
            rest: self.style.clone(),
        }
    }

    /// Translates the shorthand straight into a container style.
    #[must_use]
    pub fn resolve(&self) -> Style {
        self.container_props().into_style()
    }
}

impl ContainerProps {
    /// Folds the properties into one style.
    ///
    /// The direction always comes from the flags. Alignment set explicitly on
    /// the passthrough style wins over the layout keywords.
    #[must_use]
    pub fn into_style(self) -> Style {
        let rest = self.rest;
        Style {
            flex_direction: self.direction,
            justify_content: rest.justify_content.or(self.justify_content),
            align_items: rest.align_items.or(self.align_items),
            ..rest
        }
    }
}

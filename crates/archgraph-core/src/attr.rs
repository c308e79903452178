//! Typed presentation attributes for nodes, edges, clusters and the graph.
//!
//! Every value here maps onto exactly one layout-engine attribute, so an
//! invalid combination is a compile error or a constructor error instead of
//! an engine warning at render time.

use std::fmt;
use std::str::FromStr;

use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

use crate::{Error, Result};

/// Global layout direction (`rankdir`).
///
/// Defaults to [`Direction::TopToBottom`], the engine's own default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, AsRefStr)]
#[strum(ascii_case_insensitive)]
pub enum Direction {
    #[default]
    #[strum(serialize = "TB")]
    TopToBottom,
    #[strum(serialize = "LR")]
    LeftToRight,
    #[strum(serialize = "BT")]
    BottomToTop,
    #[strum(serialize = "RL")]
    RightToLeft,
}

/// Node outline shape.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, AsRefStr, EnumIter,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Shape {
    #[default]
    Box,
    Ellipse,
    Circle,
    DoubleCircle,
    Diamond,
    Parallelogram,
    Cylinder,
    Note,
    /// Start/stop marker, drawn as a box with diagonals.
    #[strum(serialize = "Msquare")]
    Terminator,
    Octagon,
    Component,
    Folder,
    Hexagon,
    Plaintext,
    Tab,
    Box3d,
}

/// Outline style flag for nodes and clusters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum Style {
    Rounded,
    Dashed,
    Dotted,
    Bold,
    Filled,
    Invis,
}

/// Ordered, de-duplicated set of [`Style`] flags.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StyleSet(Vec<Style>);

impl StyleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, style: Style) {
        if !self.0.contains(&style) {
            self.0.push(style);
        }
    }

    pub fn contains(&self, style: Style) -> bool {
        self.0.contains(&style)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Style> + '_ {
        self.0.iter().copied()
    }
}

impl From<Style> for StyleSet {
    fn from(style: Style) -> Self {
        Self(vec![style])
    }
}

impl FromIterator<Style> for StyleSet {
    fn from_iter<I: IntoIterator<Item = Style>>(iter: I) -> Self {
        let mut set = StyleSet::new();
        for style in iter {
            set.insert(style);
        }
        set
    }
}

impl fmt::Display for StyleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, style) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{style}")?;
        }
        Ok(())
    }
}

/// Edge line style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum LineStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
    Bold,
}

/// A color: `#RRGGBB`, `#RRGGBBAA`, or an X11 color name such as `lightgrey`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Color(String);

impl Color {
    pub fn new(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        let valid = match value.strip_prefix('#') {
            Some(hex) => {
                matches!(hex.len(), 6 | 8) && hex.chars().all(|c| c.is_ascii_hexdigit())
            }
            None => !value.is_empty() && value.chars().all(|c| c.is_ascii_alphanumeric()),
        };
        if !valid {
            return Err(Error::invalid_attribute("color", value));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Color::new(s)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Horizontal alignment of the lines of a multi-line [`Label`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Justify {
    #[default]
    Center,
    Left,
    Right,
}

/// Display text of a node, edge or cluster: a single line or several.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Label {
    lines: Vec<String>,
    justify: Justify,
}

impl Label {
    /// Build a label from text; embedded `\n` start new lines.
    pub fn new(text: &str) -> Self {
        Self {
            lines: text.split('\n').map(str::to_string).collect(),
            justify: Justify::Center,
        }
    }

    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            justify: Justify::Center,
        }
    }

    pub fn justify(mut self, justify: Justify) -> Self {
        self.justify = justify;
        self
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn justification(&self) -> Justify {
        self.justify
    }

    pub fn is_multiline(&self) -> bool {
        self.lines.len() > 1
    }

    pub fn is_empty(&self) -> bool {
        self.lines.iter().all(String::is_empty)
    }

    /// The label as plain text, lines joined with `\n`.
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

impl From<&str> for Label {
    fn from(text: &str) -> Self {
        Label::new(text)
    }
}

impl From<String> for Label {
    fn from(text: String) -> Self {
        Label::new(&text)
    }
}

impl From<&String> for Label {
    fn from(text: &String) -> Self {
        Label::new(text)
    }
}

/// Optional node styling. Setting a fill color implies [`Style::Filled`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NodeStyle {
    pub styles: StyleSet,
    pub fill_color: Option<Color>,
    pub color: Option<Color>,
}

impl NodeStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rounded() -> Self {
        Self::new().with(Style::Rounded)
    }

    pub fn dashed() -> Self {
        Self::new().with(Style::Dashed)
    }

    pub fn filled(color: Color) -> Self {
        Self::new().fill(color)
    }

    pub fn with(mut self, style: Style) -> Self {
        self.styles.insert(style);
        self
    }

    pub fn fill(mut self, color: Color) -> Self {
        self.styles.insert(Style::Filled);
        self.fill_color = Some(color);
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }
}

impl From<Style> for NodeStyle {
    fn from(style: Style) -> Self {
        NodeStyle::new().with(style)
    }
}

/// Edge attributes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EdgeAttrs {
    pub label: Option<Label>,
    pub line: LineStyle,
    pub color: Option<Color>,
}

impl EdgeAttrs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn labeled(label: impl Into<Label>) -> Self {
        Self::new().label(label)
    }

    pub fn label(mut self, label: impl Into<Label>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn line(mut self, line: LineStyle) -> Self {
        self.line = line;
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }
}

impl From<LineStyle> for EdgeAttrs {
    fn from(line: LineStyle) -> Self {
        EdgeAttrs::new().line(line)
    }
}

/// Cluster attributes: label, fill and border.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClusterAttrs {
    pub label: Option<Label>,
    pub styles: StyleSet,
    pub fill_color: Option<Color>,
    pub color: Option<Color>,
}

impl ClusterAttrs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn labeled(label: impl Into<Label>) -> Self {
        Self::new().label(label)
    }

    pub fn label(mut self, label: impl Into<Label>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with(mut self, style: Style) -> Self {
        self.styles.insert(style);
        self
    }

    pub fn fill(mut self, color: Color) -> Self {
        self.styles.insert(Style::Filled);
        self.fill_color = Some(color);
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    /// Overlay `other` onto `self`; whatever `other` sets wins.
    pub(crate) fn merge(&mut self, other: ClusterAttrs) {
        if other.label.is_some() {
            self.label = other.label;
        }
        if !other.styles.is_empty() {
            self.styles = other.styles;
        }
        if other.fill_color.is_some() {
            self.fill_color = other.fill_color;
        }
        if other.color.is_some() {
            self.color = other.color;
        }
    }
}

/// Graph-wide defaults.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GraphAttrs {
    pub direction: Direction,
    pub font_name: Option<String>,
    pub font_size: Option<f32>,
}

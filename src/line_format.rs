// src/line_format.rs

// Compact format strings for lines and markers: an optional colour letter,
// an optional marker and an optional line style, in any order ("r--", "o", "k:").

use plotters::style::RGBColor;

use crate::constants::{DASH_DOT_PATTERN, DASH_PATTERN, DOT_PATTERN};
use crate::error::{PlotError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    Solid,
    Dashed,
    Dotted,
    DashDot,
    /// Markers only.
    None,
}

impl LineStyle {
    /// On/off lengths in units of the line width, `None` for continuous strokes.
    pub fn dash_pattern(&self) -> Option<&'static [f64]> {
        match self {
            LineStyle::Dashed => Some(&DASH_PATTERN),
            LineStyle::Dotted => Some(&DOT_PATTERN),
            LineStyle::DashDot => Some(&DASH_DOT_PATTERN),
            LineStyle::Solid | LineStyle::None => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Point,
    Circle,
    Square,
    TriangleUp,
    TriangleDown,
    Plus,
    Cross,
    Star,
}

impl Marker {
    fn from_char(c: char) -> Option<Self> {
        Some(match c {
            '.' => Marker::Point,
            'o' => Marker::Circle,
            's' => Marker::Square,
            '^' => Marker::TriangleUp,
            'v' => Marker::TriangleDown,
            '+' => Marker::Plus,
            'x' => Marker::Cross,
            '*' => Marker::Star,
            _ => return None,
        })
    }
}

fn color_from_char(c: char) -> Option<RGBColor> {
    Some(match c {
        'b' => RGBColor(0, 0, 255),
        'g' => RGBColor(0, 128, 0),
        'r' => RGBColor(255, 0, 0),
        'c' => RGBColor(0, 191, 191),
        'm' => RGBColor(191, 0, 191),
        'y' => RGBColor(191, 191, 0),
        'k' => RGBColor(0, 0, 0),
        'w' => RGBColor(255, 255, 255),
        _ => return None,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineFormat {
    pub line_style: LineStyle,
    pub marker: Option<Marker>,
    pub color: Option<RGBColor>,
}

impl Default for LineFormat {
    fn default() -> Self {
        Self {
            line_style: LineStyle::Solid,
            marker: None,
            color: None,
        }
    }
}

impl LineFormat {
    pub fn parse(fmt: &str) -> Result<Self> {
        let mut line_style = None;
        let mut marker = None;
        let mut color = None;

        let chars: Vec<char> = fmt.chars().collect();
        let mut i = 0;
        while i < chars.len() {
            let c = chars[i];
            let next = chars.get(i + 1).copied();
            let (style, consumed) = match (c, next) {
                ('-', Some('-')) => (Some(LineStyle::Dashed), 2),
                ('-', Some('.')) => (Some(LineStyle::DashDot), 2),
                ('-', _) => (Some(LineStyle::Solid), 1),
                (':', _) => (Some(LineStyle::Dotted), 1),
                _ => (None, 1),
            };
            if let Some(style) = style {
                if line_style.replace(style).is_some() {
                    return Err(PlotError::InvalidFormat(format!(
                        "'{fmt}' has two line styles"
                    )));
                }
            } else if let Some(m) = Marker::from_char(c) {
                if marker.replace(m).is_some() {
                    return Err(PlotError::InvalidFormat(format!("'{fmt}' has two markers")));
                }
            } else if let Some(rgb) = color_from_char(c) {
                if color.replace(rgb).is_some() {
                    return Err(PlotError::InvalidFormat(format!("'{fmt}' has two colours")));
                }
            } else {
                return Err(PlotError::InvalidFormat(format!(
                    "'{fmt}': unrecognised character '{c}'"
                )));
            }
            i += consumed;
        }

        let line_style = match (line_style, marker) {
            (Some(style), _) => style,
            (None, Some(_)) => LineStyle::None,
            (None, None) => LineStyle::Solid,
        };
        Ok(Self {
            line_style,
            marker,
            color,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_line_styles() {
        assert_eq!(LineFormat::parse("-").unwrap().line_style, LineStyle::Solid);
        assert_eq!(LineFormat::parse("--").unwrap().line_style, LineStyle::Dashed);
        assert_eq!(LineFormat::parse(":").unwrap().line_style, LineStyle::Dotted);
        assert_eq!(LineFormat::parse("-.").unwrap().line_style, LineStyle::DashDot);
        assert_eq!(LineFormat::parse("").unwrap(), LineFormat::default());
    }

    #[test]
    fn test_parse_marker_only() {
        let fmt = LineFormat::parse("o").unwrap();
        assert_eq!(fmt.marker, Some(Marker::Circle));
        assert_eq!(fmt.line_style, LineStyle::None);
    }

    #[test]
    fn test_parse_combined_any_order() {
        let a = LineFormat::parse("r--").unwrap();
        let b = LineFormat::parse("--r").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.color, Some(RGBColor(255, 0, 0)));

        let c = LineFormat::parse("ks-").unwrap();
        assert_eq!(c.marker, Some(Marker::Square));
        assert_eq!(c.line_style, LineStyle::Solid);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(LineFormat::parse("q"), Err(PlotError::InvalidFormat(_))));
        assert!(matches!(LineFormat::parse("--:"), Err(PlotError::InvalidFormat(_))));
        assert!(matches!(LineFormat::parse("os"), Err(PlotError::InvalidFormat(_))));
    }

    #[test]
    fn test_dash_patterns() {
        assert!(LineStyle::Solid.dash_pattern().is_none());
        assert!(LineStyle::Dashed.dash_pattern().is_some());
    }
}

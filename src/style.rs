use egui::Color32;
use serde::{Deserialize, Serialize};
use std::cell::{Cell, RefCell};
use std::fmt;
use std::str::FromStr;

/// Color used when the configured one cannot be parsed
pub const DEFAULT_COLOR: Color32 = Color32::BLACK;

/// Width used when the configured one is missing, zero or negative
pub const DEFAULT_WIDTH: f32 = 2.0;

/// The kind of mark a gesture produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    #[default]
    #[serde(alias = "free")]
    Freehand,
    #[serde(alias = "rect")]
    Rectangle,
    Circle,
    Line,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 4] = [
        ShapeKind::Freehand,
        ShapeKind::Rectangle,
        ShapeKind::Circle,
        ShapeKind::Line,
    ];

    /// Freehand marks go straight to the committed surface
    pub fn is_freehand(self) -> bool {
        self == ShapeKind::Freehand
    }

    pub fn label(self) -> &'static str {
        match self {
            ShapeKind::Freehand => "✏ Freehand",
            ShapeKind::Rectangle => "▭ Rectangle",
            ShapeKind::Circle => "◯ Circle",
            ShapeKind::Line => "╱ Line",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ShapeKind::Freehand => "free",
            ShapeKind::Rectangle => "rect",
            ShapeKind::Circle => "circle",
            ShapeKind::Line => "line",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownShape(pub String);

impl fmt::Display for UnknownShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown shape kind: {:?}", self.0)
    }
}

impl std::error::Error for UnknownShape {}

impl FromStr for ShapeKind {
    type Err = UnknownShape;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "free" | "freehand" => Ok(ShapeKind::Freehand),
            "rect" | "rectangle" => Ok(ShapeKind::Rectangle),
            "circle" => Ok(ShapeKind::Circle),
            "line" => Ok(ShapeKind::Line),
            _ => Err(UnknownShape(s.to_string())),
        }
    }
}

/// Stroke style for a single draw call. Line caps are always round.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Style {
    pub color: Color32,
    pub width: f32,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            color: DEFAULT_COLOR,
            width: DEFAULT_WIDTH,
        }
    }
}

impl Style {
    /// Builds a style from raw toolbar values, substituting safe defaults
    /// for anything that would produce an invalid draw call.
    ///
    /// Runs on every draw, so substitutions only log at debug level. The
    /// warning is emitted once, when [`ToolConfig`] receives the bad value.
    pub fn resolve(raw_color: &str, raw_width: f32) -> Self {
        let color = parse_color(raw_color).unwrap_or_else(|| {
            log::debug!("Invalid stroke color {:?}, using default", raw_color);
            DEFAULT_COLOR
        });
        let width = if is_valid_width(raw_width) {
            raw_width
        } else {
            log::debug!("Invalid stroke width {}, using default", raw_width);
            DEFAULT_WIDTH
        };
        Self { color, width }
    }

    pub fn radius(&self) -> f32 {
        self.width / 2.0
    }
}

/// Parses `#rgb`, `#rrggbb` or `#rrggbbaa` (the leading `#` is optional).
/// Fully transparent results are rejected so a stroke is always visible.
pub fn parse_color(raw: &str) -> Option<Color32> {
    let digits = raw.trim().trim_start_matches('#');
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    Color32::from_hex(&format!("#{digits}")).ok().filter(|color| color.a() > 0)
}

pub fn is_valid_width(width: f32) -> bool {
    width.is_finite() && width > 0.0
}

/// Formats a color the way the toolbar reports it
pub fn color_to_hex(color: Color32) -> String {
    format!("#{:02x}{:02x}{:02x}", color.r(), color.g(), color.b())
}

/// Live tool settings shared between the toolbar and the controller.
///
/// The controller keeps an `Rc<ToolConfig>` and reads it at the moment
/// each draw happens, so toolbar edits made mid-gesture show up on the
/// next segment or preview frame.
#[derive(Debug)]
pub struct ToolConfig {
    color: RefCell<String>,
    width: Cell<f32>,
    shape: Cell<ShapeKind>,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self::new("#000000", 5.0, ShapeKind::Freehand)
    }
}

impl ToolConfig {
    pub fn new(color: &str, width: f32, shape: ShapeKind) -> Self {
        if parse_color(color).is_none() || !is_valid_width(width) {
            log::warn!("Invalid tool settings (color {:?}, width {}), drawing with defaults", color, width);
        }
        Self {
            color: RefCell::new(color.to_string()),
            width: Cell::new(width),
            shape: Cell::new(shape),
        }
    }

    pub fn color(&self) -> String {
        self.color.borrow().clone()
    }

    pub fn set_color(&self, color: &str) {
        if *self.color.borrow() == color {
            return;
        }
        if parse_color(color).is_none() {
            log::warn!("Invalid stroke color {:?}, drawing with the default", color);
        }
        *self.color.borrow_mut() = color.to_string();
    }

    pub fn width(&self) -> f32 {
        self.width.get()
    }

    pub fn set_width(&self, width: f32) {
        if self.width.get() == width {
            return;
        }
        if !is_valid_width(width) {
            log::warn!("Invalid stroke width {}, drawing with the default", width);
        }
        self.width.set(width);
    }

    pub fn shape(&self) -> ShapeKind {
        self.shape.get()
    }

    pub fn set_shape(&self, shape: ShapeKind) {
        self.shape.set(shape);
    }

    /// The style to use for a draw happening right now
    pub fn current_style(&self) -> Style {
        Style::resolve(&self.color.borrow(), self.width.get())
    }

    pub fn snapshot(&self) -> ToolSnapshot {
        ToolSnapshot {
            color: self.color(),
            width: self.width(),
            shape: self.shape(),
        }
    }

    pub fn restore(&self, snapshot: &ToolSnapshot) {
        self.set_color(&snapshot.color);
        self.set_width(snapshot.width);
        self.set_shape(snapshot.shape);
    }
}

/// Serializable copy of the tool settings, stored between sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolSnapshot {
    pub color: String,
    pub width: f32,
    pub shape: ShapeKind,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_toolbar_shape_names() {
        assert_eq!("free".parse(), Ok(ShapeKind::Freehand));
        assert_eq!("Rect".parse(), Ok(ShapeKind::Rectangle));
        assert_eq!(" circle ".parse(), Ok(ShapeKind::Circle));
        assert_eq!("line".parse(), Ok(ShapeKind::Line));
        assert!("spiral".parse::<ShapeKind>().is_err());
    }

    #[test]
    fn test_display_round_trips_through_from_str() {
        for kind in ShapeKind::ALL {
            assert_eq!(kind.to_string().parse(), Ok(kind));
        }
    }

    #[test]
    fn test_resolve_keeps_valid_values() {
        let style = Style::resolve("#ff8000", 7.5);
        assert_eq!(style.color, Color32::from_rgb(255, 128, 0));
        assert_eq!(style.width, 7.5);
    }

    #[test]
    fn test_resolve_substitutes_defaults() {
        assert_eq!(Style::resolve("", 0.0), Style::default());
        assert_eq!(Style::resolve("not a color", -3.0), Style::default());
        assert_eq!(Style::resolve("#00000000", f32::NAN), Style::default());
    }

    #[test]
    fn test_color_without_hash_is_accepted() {
        assert_eq!(parse_color("00ff00"), Some(Color32::from_rgb(0, 255, 0)));
        assert_eq!(color_to_hex(Color32::from_rgb(0, 255, 0)), "#00ff00");
    }

    #[test]
    fn test_config_changes_are_seen_live() {
        let config = ToolConfig::default();
        assert_eq!(config.current_style().width, 5.0);
        config.set_width(9.0);
        config.set_color("#ff0000");
        assert_eq!(config.current_style(), Style::resolve("#ff0000", 9.0));
    }

    #[test]
    fn test_snapshot_restore() {
        let config = ToolConfig::default();
        let snapshot = ToolSnapshot {
            color: "#123456".to_string(),
            width: 3.0,
            shape: ShapeKind::Circle,
        };
        config.restore(&snapshot);
        assert_eq!(config.snapshot(), snapshot);
    }

    #[test]
    fn test_invalid_values_are_stored_and_resolved_per_draw() {
        let config = ToolConfig::default();
        config.set_color("nope");
        config.set_width(f32::NAN);
        assert_eq!(config.color(), "nope");
        assert_eq!(config.current_style(), Style::default());
        assert_eq!(config.current_style(), Style::default());

        config.set_color("#0000ff");
        config.set_width(4.0);
        assert_eq!(config.current_style(), Style::resolve("#0000ff", 4.0));
        assert!(!is_valid_width(0.0));
        assert!(is_valid_width(0.5));
    }
}

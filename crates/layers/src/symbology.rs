/// 8-bit RGBA, the color format the map widget consumes.
pub type Rgba = [u8; 4];

pub const HIGHLIGHTED_FILL: Rgba = [0, 255, 0, 255];
pub const SELECTED_FILL: Rgba = [0, 0, 255, 255];
pub const DEFAULT_FILL: Rgba = [255, 0, 0, 255];

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointStyle {
    pub highlighted: Rgba,
    pub selected: Rgba,
    pub default: Rgba,
}

impl PointStyle {
    /// Highlight beats selection; everything else gets the default fill.
    pub fn fill(&self, highlighted: bool, selected: bool) -> Rgba {
        if highlighted {
            self.highlighted
        } else if selected {
            self.selected
        } else {
            self.default
        }
    }
}

impl Default for PointStyle {
    fn default() -> Self {
        Self {
            highlighted: HIGHLIGHTED_FILL,
            selected: SELECTED_FILL,
            default: DEFAULT_FILL,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PolygonStyle {
    pub fill: Rgba,
    pub line: Rgba,
    pub line_width_px: f32,
}

impl PolygonStyle {
    pub const fn new(fill: Rgba, line: Rgba, line_width_px: f32) -> Self {
        Self {
            fill,
            line,
            line_width_px,
        }
    }
}

impl Default for PolygonStyle {
    fn default() -> Self {
        Self::new([255, 140, 0, 80], [255, 140, 0, 255], 2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::{DEFAULT_FILL, HIGHLIGHTED_FILL, PointStyle, SELECTED_FILL};

    #[test]
    fn fill_policy_prefers_highlight_over_selection() {
        let style = PointStyle::default();
        assert_eq!(style.fill(true, true), HIGHLIGHTED_FILL);
        assert_eq!(style.fill(true, false), HIGHLIGHTED_FILL);
        assert_eq!(style.fill(false, true), SELECTED_FILL);
        assert_eq!(style.fill(false, false), DEFAULT_FILL);
    }
}

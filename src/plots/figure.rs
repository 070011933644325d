//! Renderer-independent description of a figure: panels holding layers of data.

/// How the points of a layer get drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Circle,
    Cross,
}

/// The color of a layer or of each of its points.
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Black,
    /// Palette index, used to color by class.
    Indexed(usize),
    /// One palette index per point.
    PerPoint(Vec<usize>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum LayerKind {
    /// Points joined in order by a line.
    Line,
    /// Unconnected points.
    Markers(Marker),
}

/// A named series of points.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    pub name: String,
    pub kind: LayerKind,
    pub paint: Paint,
    pub points: Vec<(f64, f64)>,
}

impl Layer {
    pub fn line<S: Into<String>>(name: S, points: Vec<(f64, f64)>, paint: Paint) -> Self {
        Self {
            name: name.into(),
            kind: LayerKind::Line,
            paint,
            points,
        }
    }

    pub fn markers<S: Into<String>>(
        name: S,
        marker: Marker,
        points: Vec<(f64, f64)>,
        paint: Paint,
    ) -> Self {
        Self {
            name: name.into(),
            kind: LayerKind::Markers(marker),
            paint,
            points,
        }
    }
}

/// One set of axes.
#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub layers: Vec<Layer>,
    /// Lock the axes to the same scale, one data unit spans as many pixels on both.
    pub equal_aspect: bool,
}

impl Panel {
    pub fn new<S: Into<String>>(title: S) -> Self {
        Self {
            title: title.into(),
            x_label: String::new(),
            y_label: String::new(),
            layers: Vec::new(),
            equal_aspect: false,
        }
    }

    /// Smallest box holding every point of every layer, `None` if there are no points.
    pub fn bounds(&self) -> Option<Bounds> {
        self.layers
            .iter()
            .flat_map(|layer| layer.points.iter().copied())
            .filter(|(x, y)| x.is_finite() && y.is_finite())
            .fold(None, |acc: Option<Bounds>, (x, y)| {
                Some(match acc {
                    None => Bounds::point(x, y),
                    Some(b) => b.including(x, y),
                })
            })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub panels: Vec<Panel>,
    pub show_legend: bool,
    pub legend_title: Option<String>,
}

/// An axis-aligned box in data coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Bounds {
    fn point(x: f64, y: f64) -> Self {
        Self {
            x_min: x,
            x_max: x,
            y_min: y,
            y_max: y,
        }
    }

    fn including(self, x: f64, y: f64) -> Self {
        Self {
            x_min: self.x_min.min(x),
            x_max: self.x_max.max(x),
            y_min: self.y_min.min(y),
            y_max: self.y_max.max(y),
        }
    }

    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    /// Grows every side by `fraction` of the span. Empty spans grow by `fraction` units.
    pub fn padded(self, fraction: f64) -> Self {
        let pad = |span: f64| if span > 0.0 { span * fraction } else { fraction };
        let (px, py) = (pad(self.width()), pad(self.height()));
        Self {
            x_min: self.x_min - px,
            x_max: self.x_max + px,
            y_min: self.y_min - py,
            y_max: self.y_max + py,
        }
    }

    /// Widens the shorter side, around its center, so that the box maps onto a
    /// `pixels.0 × pixels.1` area with the same data units per pixel on both axes.
    pub fn equal_aspect(self, pixels: (u32, u32)) -> Self {
        let (pw, ph) = (f64::from(pixels.0.max(1)), f64::from(pixels.1.max(1)));
        let per_pixel = (self.width() / pw).max(self.height() / ph);

        let (cx, cy) = (
            0.5 * (self.x_min + self.x_max),
            0.5 * (self.y_min + self.y_max),
        );
        let (half_w, half_h) = (0.5 * per_pixel * pw, 0.5 * per_pixel * ph);

        Self {
            x_min: cx - half_w,
            x_max: cx + half_w,
            y_min: cy - half_h,
            y_max: cy + half_h,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn panel_with(points: Vec<(f64, f64)>) -> Panel {
        let mut panel = Panel::new("p");
        panel.layers.push(Layer::line("l", points, Paint::Black));
        panel
    }

    #[test]
    fn bounds_cover_all_layers() {
        let mut panel = panel_with(vec![(0.0, 1.0), (2.0, -1.0)]);
        panel.layers.push(Layer::markers(
            "m",
            Marker::Cross,
            vec![(-3.0, 0.5)],
            Paint::Indexed(0),
        ));

        let b = panel.bounds().unwrap();
        assert_eq!((b.x_min, b.x_max, b.y_min, b.y_max), (-3.0, 2.0, -1.0, 1.0));
    }

    #[test]
    fn empty_panel_has_no_bounds() {
        assert!(Panel::new("empty").bounds().is_none());
    }

    #[test]
    fn equal_aspect_matches_units_per_pixel() {
        let b = Bounds {
            x_min: 0.0,
            x_max: 10.0,
            y_min: 0.0,
            y_max: 2.0,
        };

        let eq = b.equal_aspect((400, 300));
        assert!((eq.width() / 400.0 - eq.height() / 300.0).abs() < 1e-12);
        assert!(eq.x_min <= b.x_min + 1e-12 && eq.x_max >= b.x_max - 1e-12);
        assert!(eq.y_min < b.y_min && eq.y_max > b.y_max);
        assert!((eq.width() - 10.0).abs() < 1e-12);
    }

    #[test]
    fn padding_handles_flat_spans() {
        let b = Bounds {
            x_min: 1.0,
            x_max: 1.0,
            y_min: 0.0,
            y_max: 4.0,
        }
        .padded(0.05);

        assert!((b.x_min - 0.95).abs() < 1e-12);
        assert!((b.x_max - 1.05).abs() < 1e-12);
        assert!((b.y_min + 0.2).abs() < 1e-12);
        assert!((b.y_max - 4.2).abs() < 1e-12);
    }
}

use std::path::Path;

use log::debug;
use plotters::{
    chart::ChartContext,
    coord::{cartesian::Cartesian2d, types::RangedCoordf64, Shift},
    prelude::{ChartBuilder, Circle, Cross, DrawingArea, IntoDrawingArea, PathElement, SVGBackend},
    series::LineSeries,
    style::{Color, IntoFont, RGBColor, BLACK, WHITE},
};

use super::figure::{Bounds, Figure, LayerKind, Marker, Paint, Panel};
use crate::error::Result;

const MARGIN: u32 = 10;
const X_LABEL_AREA: u32 = 35;
const Y_LABEL_AREA: u32 = 50;
const TITLE_SIZE: u32 = 22;
const CAPTION_SIZE: u32 = 16;
const PADDING: f64 = 0.05;

/// Class colors, cycled when there are more classes than entries.
const PALETTE: [RGBColor; 8] = [
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(214, 39, 40),
    RGBColor(148, 103, 189),
    RGBColor(140, 86, 75),
    RGBColor(227, 119, 194),
    RGBColor(127, 127, 127),
];

fn palette(i: usize) -> RGBColor {
    PALETTE[i % PALETTE.len()]
}

fn point_color(paint: &Paint, i: usize) -> RGBColor {
    match paint {
        Paint::Black => BLACK,
        Paint::Indexed(k) => palette(*k),
        Paint::PerPoint(ks) => ks.get(i).map_or(BLACK, |&k| palette(k)),
    }
}

/// Writes `figure` as an SVG file at `path`, its panels laid out left to right.
pub fn render_svg<P: AsRef<Path>>(figure: &Figure, path: P) -> Result<()> {
    let path = path.as_ref();
    let root = SVGBackend::new(path, (figure.width, figure.height)).into_drawing_area();
    root.fill(&WHITE)?;

    let body = root.titled(&figure.title, ("sans-serif", TITLE_SIZE).into_font())?;
    let areas = body.split_evenly((1, figure.panels.len().max(1)));
    for (panel, area) in figure.panels.iter().zip(&areas) {
        draw_panel(figure, panel, area)?;
    }

    root.present()?;
    debug!("rendered {} panel(s) to {}", figure.panels.len(), path.display());
    Ok(())
}

type Chart<'a, 'b> = ChartContext<'a, SVGBackend<'b>, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

/// The padded data bounds of `panel`, a unit box when it has no points.
fn data_ranges(panel: &Panel) -> Bounds {
    panel
        .bounds()
        .unwrap_or(Bounds {
            x_min: 0.0,
            x_max: 1.0,
            y_min: 0.0,
            y_max: 1.0,
        })
        .padded(PADDING)
}

/// Draws the title of `panel` on top of `area` and returns what is left below it.
fn panel_area<'b>(
    panel: &Panel,
    area: &DrawingArea<SVGBackend<'b>, Shift>,
) -> Result<DrawingArea<SVGBackend<'b>, Shift>> {
    if panel.title.is_empty() {
        return Ok(area.clone());
    }

    Ok(area.titled(&panel.title, ("sans-serif", CAPTION_SIZE).into_font())?)
}

/// Lays out the axes of `panel` over `area`.
///
/// With an equal aspect, the ranges are fitted to the plotting area plotters actually lays out,
/// measured on a first build over placeholder ranges.
fn build_chart<'a, 'b>(
    panel: &Panel,
    area: &'a DrawingArea<SVGBackend<'b>, Shift>,
) -> Result<Chart<'a, 'b>> {
    let mut builder = ChartBuilder::on(area);
    builder
        .margin(MARGIN)
        .x_label_area_size(X_LABEL_AREA)
        .y_label_area_size(Y_LABEL_AREA);

    let mut ranges = data_ranges(panel);
    if panel.equal_aspect {
        // the plotting area does not depend on the ranges
        let pixels = builder
            .build_cartesian_2d(0.0..1.0, 0.0..1.0)?
            .plotting_area()
            .dim_in_pixel();
        ranges = ranges.equal_aspect(pixels);
    }

    Ok(builder.build_cartesian_2d(ranges.x_min..ranges.x_max, ranges.y_min..ranges.y_max)?)
}

fn draw_panel(
    figure: &Figure,
    panel: &Panel,
    area: &DrawingArea<SVGBackend<'_>, Shift>,
) -> Result<()> {
    let area = panel_area(panel, area)?;
    let mut chart = build_chart(panel, &area)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .disable_y_mesh()
        .x_desc(panel.x_label.as_str())
        .y_desc(panel.y_label.as_str())
        .draw()?;

    for layer in &panel.layers {
        let points = layer.points.iter().copied().enumerate();

        match layer.kind {
            LayerKind::Line => {
                let color = point_color(&layer.paint, 0);
                let anno = chart.draw_series(LineSeries::new(
                    layer.points.iter().copied(),
                    color.stroke_width(2),
                ))?;

                if figure.show_legend {
                    let label = match &figure.legend_title {
                        Some(title) => format!("{title}: {}", layer.name),
                        None => layer.name.clone(),
                    };
                    anno.label(label).legend(move |(x, y)| {
                        PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
                    });
                }
            }
            LayerKind::Markers(Marker::Circle) => {
                chart.draw_series(points.map(|(i, p)| {
                    Circle::new(p, 3, point_color(&layer.paint, i).mix(0.8).filled())
                }))?;
            }
            LayerKind::Markers(Marker::Cross) => {
                chart.draw_series(points.map(|(i, p)| {
                    Cross::new(p, 6, point_color(&layer.paint, i).stroke_width(2))
                }))?;
            }
        }
    }

    if figure.show_legend {
        chart
            .configure_series_labels()
            .border_style(BLACK)
            .background_style(WHITE.mix(0.8))
            .draw()?;
    }

    Ok(())
}

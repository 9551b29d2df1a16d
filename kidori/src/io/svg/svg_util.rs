use serde::{Deserialize, Serialize};
use svg::node::element::Path;
use svg::node::element::path::Data;

use crate::entities::ColorTag;
use crate::fsize;
use crate::geometry::primitives::Rect;

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize, Copy)]
pub struct SvgDrawOptions {
    ///The theme to use for the svg
    #[serde(default)]
    pub theme: SvgLayoutTheme,
    ///Draw a measuring grid over the sheet
    #[serde(default = "default_true")]
    pub grid: bool,
    ///Distance between the thin grid lines
    #[serde(default = "default_minor_grid_step")]
    pub minor_grid_step: fsize,
    ///Distance between the thick, labeled grid lines
    #[serde(default = "default_major_grid_step")]
    pub major_grid_step: fsize,
    ///Print the width and height of every placed piece
    #[serde(default = "default_true")]
    pub dimension_labels: bool,
}

impl Default for SvgDrawOptions {
    fn default() -> Self {
        Self {
            theme: SvgLayoutTheme::default(),
            grid: true,
            minor_grid_step: default_minor_grid_step(),
            major_grid_step: default_major_grid_step(),
            dimension_labels: true,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_minor_grid_step() -> fsize {
    100.0
}

fn default_major_grid_step() -> fsize {
    500.0
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize, Copy)]
pub struct SvgLayoutTheme {
    pub stroke_width_multiplier: fsize,
    pub sheet_fill: ColorTag,
    pub minor_grid_color: ColorTag,
    pub major_grid_color: ColorTag,
    pub grid_opacity: fsize,
    pub piece_stroke: ColorTag,
    pub piece_opacity: fsize,
    pub label_color: ColorTag,
}

impl Default for SvgLayoutTheme {
    fn default() -> Self {
        SvgLayoutTheme::PLYWOOD
    }
}

impl SvgLayoutTheme {
    pub const PLYWOOD: SvgLayoutTheme = SvgLayoutTheme {
        stroke_width_multiplier: 2.0,
        sheet_fill: ColorTag(0xE8, 0xCF, 0xA6),
        minor_grid_color: ColorTag(0x80, 0x80, 0x80),
        major_grid_color: ColorTag(0xFF, 0x00, 0x00),
        grid_opacity: 0.4,
        piece_stroke: ColorTag(0xFF, 0xFF, 0xFF),
        piece_opacity: 0.5,
        label_color: ColorTag(0x00, 0x00, 0x00),
    };

    pub const GRAY: SvgLayoutTheme = SvgLayoutTheme {
        stroke_width_multiplier: 2.5,
        sheet_fill: ColorTag(0xD3, 0xD3, 0xD3),
        minor_grid_color: ColorTag(0xA0, 0xA0, 0xA0),
        major_grid_color: ColorTag(0x40, 0x40, 0x40),
        grid_opacity: 0.5,
        piece_stroke: ColorTag(0xFF, 0xFF, 0xFF),
        piece_opacity: 0.5,
        label_color: ColorTag(0x00, 0x00, 0x00),
    };
}

pub fn data_to_path(data: Data, params: &[(&str, &str)]) -> Path {
    let mut path = Path::new();
    for param in params {
        path = path.set(param.0, param.1)
    }
    path.set("d", data)
}

pub fn rect_data(rect: &Rect) -> Data {
    Data::new()
        .move_to((rect.left() as f32, rect.top() as f32))
        .line_to((rect.right() as f32, rect.top() as f32))
        .line_to((rect.right() as f32, rect.bottom() as f32))
        .line_to((rect.left() as f32, rect.bottom() as f32))
        .close()
}

/// Appends a straight line from `(x1, y1)` to `(x2, y2)` to `data`
pub fn line_data(data: Data, (x1, y1): (fsize, fsize), (x2, y2): (fsize, fsize)) -> Data {
    data.move_to((x1 as f32, y1 as f32))
        .line_to((x2 as f32, y2 as f32))
}

/// Upper bound on the number of grid lines drawn along one axis
pub const MAX_GRID_LINES: usize = 1000;

/// Positions `0, step, 2 * step, ...` up to and including `end`, at most [`MAX_GRID_LINES`] + 1 of them
pub fn grid_positions(step: fsize, end: fsize) -> impl Iterator<Item = fsize> {
    let n_steps = match step > 0.0 && end >= 0.0 {
        true => fsize::min((end / step + 1e-9).floor(), MAX_GRID_LINES as fsize) as usize,
        false => 0,
    };
    (0..=n_steps).map(move |i| i as fsize * step)
}

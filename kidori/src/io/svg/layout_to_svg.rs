use log::warn;
use svg::Document;
use svg::node::element::path::Data;
use svg::node::element::{Group, Text, Title};

use crate::entities::Layout;
use crate::fsize;
use crate::geometry::primitives::Rect;
use crate::io::svg::svg_util;
use crate::io::svg::svg_util::{MAX_GRID_LINES, SvgDrawOptions};

/// Draws a cutting diagram of `layout`: the sheet, an optional measuring grid and every placed piece.
pub fn layout_to_svg(layout: &Layout, options: SvgDrawOptions, title: &str) -> Document {
    let sheet = layout.sheet_rect();
    let theme = &options.theme;

    // an empty sheet has no length, size everything relative to its width instead
    let reference = match sheet.height > 0.0 {
        true => fsize::min(sheet.width, sheet.height),
        false => sheet.width,
    };
    let stroke_width = reference * 0.001 * theme.stroke_width_multiplier;
    let font_size = reference * 0.025;

    let vbox = {
        let margin = 0.05 * fsize::max(sheet.width, sheet.height);
        (
            sheet.left() - margin,
            sheet.top() - margin - 2.0 * font_size,
            sheet.width + 2.0 * margin,
            sheet.height + 2.0 * margin + 2.0 * font_size,
        )
    };

    let label = {
        //print some information above the left top of the sheet
        let label_content = format!(
            "length: {:.1} | width: {:.1} | density: {:.3}% | {}",
            sheet.height,
            sheet.width,
            layout.density() * 100.0,
            title,
        );
        Text::new(label_content)
            .set("x", sheet.left())
            .set("y", sheet.top() - 1.5 * font_size)
            .set("font-size", font_size)
            .set("font-family", "monospace")
            .set("font-weight", "500")
    };

    //draw sheet
    let sheet_group = Group::new()
        .set("id", "sheet")
        .add(svg_util::data_to_path(
            svg_util::rect_data(&sheet),
            &[
                ("fill", &*format!("{}", theme.sheet_fill)),
                ("stroke", "black"),
                ("stroke-width", &*format!("{}", 2.0 * stroke_width)),
            ],
        ))
        .add(Title::new(format!(
            "sheet, width: {:.3}, length: {:.3}, kerf: {:.3}",
            sheet.width, sheet.height, layout.kerf
        )));

    let grid_group = match options.grid {
        false => None,
        true if !(options.minor_grid_step > 0.0 && options.major_grid_step > 0.0) => {
            warn!(
                "[IO] grid steps should be positive (minor: {}, major: {}), not drawing the grid",
                options.minor_grid_step, options.major_grid_step
            );
            None
        }
        true if fsize::max(sheet.width, sheet.height) / options.minor_grid_step > MAX_GRID_LINES as fsize => {
            warn!(
                "[IO] minor grid step {} is too fine for a {:.3} x {:.3} sheet, not drawing the grid",
                options.minor_grid_step, sheet.width, sheet.height
            );
            None
        }
        true => Some(grid(&sheet, &options, stroke_width, font_size)),
    };

    //draw placed pieces
    let pieces_group = {
        let mut pieces_group = Group::new().set("id", "pieces");
        for pp in layout.placed_pieces.iter() {
            let rect = pp.rect();
            let mut piece_group = Group::new()
                .set("id", format!("piece_{}", pp.id))
                .add(svg_util::data_to_path(
                    svg_util::rect_data(&rect),
                    &[
                        ("fill", &*format!("{}", pp.color)),
                        ("fill-opacity", &*format!("{}", theme.piece_opacity)),
                        ("stroke", &*format!("{}", theme.piece_stroke)),
                        ("stroke-width", &*format!("{}", stroke_width)),
                    ],
                ))
                .add(Title::new(format!(
                    "piece, id: {}, x: {:.3}, y: {:.3}, width: {:.3}, height: {:.3}",
                    pp.id, pp.x, pp.y, pp.width, pp.height
                )));

            if options.dimension_labels {
                let label_size = fsize::min(fsize::min(rect.width, rect.height) * 0.2, font_size);
                let (cx, cy) = (rect.x + rect.width / 2.0, rect.y + rect.height / 2.0);
                //width along the top edge, height along the left edge
                let width_label = Text::new(format_dimension(rect.width))
                    .set("x", cx)
                    .set("y", rect.top() + 1.2 * label_size)
                    .set("font-size", label_size)
                    .set("font-family", "monospace")
                    .set("text-anchor", "middle")
                    .set("fill", format!("{}", theme.label_color));
                let height_label = Text::new(format_dimension(rect.height))
                    .set("x", rect.left() + 1.2 * label_size)
                    .set("y", cy)
                    .set("font-size", label_size)
                    .set("font-family", "monospace")
                    .set("text-anchor", "middle")
                    .set("fill", format!("{}", theme.label_color))
                    .set(
                        "transform",
                        format!("rotate(-90 {} {})", rect.left() + 1.2 * label_size, cy),
                    );
                piece_group = piece_group.add(width_label).add(height_label);
            }
            pieces_group = pieces_group.add(piece_group);
        }
        pieces_group
    };

    let document = Document::new().set("viewBox", vbox).add(sheet_group);
    let document = match grid_group {
        Some(grid_group) => document.add(grid_group),
        None => document,
    };
    document.add(pieces_group).add(label)
}

fn grid(sheet: &Rect, options: &SvgDrawOptions, stroke_width: fsize, font_size: fsize) -> Group {
    let theme = &options.theme;
    let lines = |step: fsize| -> Data {
        let vertical = svg_util::grid_positions(step, sheet.width)
            .fold(Data::new(), |data, x| {
                svg_util::line_data(data, (x, sheet.top()), (x, sheet.bottom()))
            });
        svg_util::grid_positions(step, sheet.height).fold(vertical, |data, y| {
            svg_util::line_data(data, (sheet.left(), y), (sheet.right(), y))
        })
    };

    let mut grid_group = Group::new()
        .set("id", "grid")
        .add(svg_util::data_to_path(
            lines(options.minor_grid_step),
            &[
                ("fill", "none"),
                ("stroke", &*format!("{}", theme.minor_grid_color)),
                ("stroke-width", &*format!("{}", 0.5 * stroke_width)),
                ("stroke-opacity", &*format!("{}", theme.grid_opacity)),
            ],
        ))
        .add(svg_util::data_to_path(
            lines(options.major_grid_step),
            &[
                ("fill", "none"),
                ("stroke", &*format!("{}", theme.major_grid_color)),
                ("stroke-width", &*format!("{}", stroke_width)),
                ("stroke-opacity", &*format!("{}", theme.grid_opacity)),
            ],
        ));

    //labels at the major lines, along the top and left edge of the sheet
    let label_size = 0.6 * font_size;
    let label = |content: String, x: fsize, y: fsize, anchor: &str| {
        Text::new(content)
            .set("x", x)
            .set("y", y)
            .set("font-size", label_size)
            .set("font-family", "monospace")
            .set("text-anchor", anchor)
            .set("fill", format!("{}", theme.major_grid_color))
    };
    for x in svg_util::grid_positions(options.major_grid_step, sheet.width) {
        grid_group = grid_group.add(label(
            format_dimension(x),
            x,
            sheet.top() - 0.3 * label_size,
            "middle",
        ));
    }
    for y in svg_util::grid_positions(options.major_grid_step, sheet.height).skip(1) {
        grid_group = grid_group.add(label(
            format_dimension(y),
            sheet.left() - 0.3 * label_size,
            y + 0.3 * label_size,
            "end",
        ));
    }
    grid_group
}

/// Whole numbers without decimals, anything else with one.
fn format_dimension(value: fsize) -> String {
    match value.fract() == 0.0 {
        true => format!("{value:.0}"),
        false => format!("{value:.1}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{ColorTag, PlacedPiece};

    fn layout() -> Layout {
        Layout {
            sheet_width: 1220.0,
            sheet_length: 600.0,
            kerf: 0.0,
            placed_pieces: vec![PlacedPiece {
                id: 0,
                x: 0.0,
                y: 0.0,
                width: 400.0,
                height: 600.0,
                color: ColorTag(0xCC, 0x66, 0x66),
            }],
        }
    }

    #[test]
    fn draws_pieces_and_labels() {
        let svg = layout_to_svg(&layout(), SvgDrawOptions::default(), "cabinet").to_string();
        assert!(svg.contains("piece_0"));
        assert!(svg.contains("#CC6666"));
        assert!(svg.contains("cabinet"));
        assert!(svg.contains("id=\"grid\""));
        // header, grid labels at x = 0, 500, 1000 and y = 500, width and height of the piece
        assert_eq!(svg.matches("<text").count(), 7);
    }

    #[test]
    fn grid_can_be_disabled() {
        let options = SvgDrawOptions {
            grid: false,
            dimension_labels: false,
            ..SvgDrawOptions::default()
        };
        let svg = layout_to_svg(&layout(), options, "").to_string();
        assert!(!svg.contains("id=\"grid\""));
        assert_eq!(svg.matches("<text").count(), 1);
    }

    #[test]
    fn too_fine_grid_is_skipped() {
        let options = SvgDrawOptions {
            minor_grid_step: 1e-12,
            ..SvgDrawOptions::default()
        };
        let svg = layout_to_svg(&layout(), options, "").to_string();
        assert!(!svg.contains("id=\"grid\""));
        assert!(svg.contains("piece_0"));
    }

    #[test]
    fn empty_layout_still_renders() {
        let svg = layout_to_svg(&Layout::empty(1220.0, 0.0), SvgDrawOptions::default(), "").to_string();
        assert!(svg.contains("id=\"sheet\""));
    }
}

use minefair_core::{GRID_SIDE, MineLayout, Tile};
use xmlwriter::{Options, XmlWriter};

use crate::config::RenderSettings;

/// One line per grid row, cells separated by a space.
pub(crate) fn text_grid(layout: &MineLayout, settings: &RenderSettings) -> String {
    layout
        .tiles()
        .outer_iter()
        .map(|row| {
            row.iter()
                .map(|&tile| glyph(tile, settings))
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn glyph(tile: Tile, settings: &RenderSettings) -> &str {
    match tile {
        Tile::Mine => &settings.mine,
        Tile::Safe => &settings.safe,
    }
}

/// Square of filled, outlined cells; `tile_size` pixels each.
pub(crate) fn svg_grid(layout: &MineLayout, settings: &RenderSettings) -> String {
    let tile_size = settings.tile_size;
    let side = u32::from(GRID_SIDE) * tile_size;

    let mut w = XmlWriter::new(Options::default());
    w.start_element("svg");
    w.write_attribute("xmlns", "http://www.w3.org/2000/svg");
    w.write_attribute("width", &side);
    w.write_attribute("height", &side);
    w.write_attribute("viewBox", &format!("0 0 {side} {side}"));

    for ((row, col), &tile) in layout.tiles().indexed_iter() {
        let fill = match tile {
            Tile::Mine => &settings.mine_color,
            Tile::Safe => &settings.safe_color,
        };
        w.start_element("rect");
        w.write_attribute("x", &(col as u32 * tile_size));
        w.write_attribute("y", &(row as u32 * tile_size));
        w.write_attribute("width", &tile_size);
        w.write_attribute("height", &tile_size);
        w.write_attribute("fill", fill);
        w.write_attribute("stroke", &settings.outline_color);
        w.end_element();
    }

    w.end_document()
}

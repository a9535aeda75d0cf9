// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Weekgrid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Weekgrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! PNG export: one rectangle per grid cell.
//!
//! Rasterizing into an RGBA buffer is always available; encoding needs the `raster` feature.

use std::path::Path;

use crate::grid::GridPlan;
use crate::model::Day;
use crate::store::WriteDurability;

use super::ExportError;

type Rgb = [u8; 3];

const BACKGROUND: Rgb = [0xff, 0xff, 0xff];
const GRID_LINE: Rgb = [0x44, 0x44, 0x44];
const HEADER_BAND: Rgb = [0xd9, 0xd9, 0xd9];
const CORNER: Rgb = [0xbf, 0xbf, 0xbf];
const EMPTY_CELL: Rgb = [0xff, 0xff, 0xff];

const DAY_COLORS: [Rgb; 7] = [
    [0x9e, 0xc5, 0xfe], // monday
    [0xf8, 0x9f, 0x9f], // tuesday
    [0xff, 0xd8, 0x8a], // wednesday
    [0xa3, 0xe4, 0xa7], // thursday
    [0xf2, 0xb8, 0xe6], // friday
    [0xc8, 0xb6, 0xf2], // saturday
    [0xff, 0xe9, 0x9e], // sunday
];

pub fn day_color(day: Day) -> Rgb {
    DAY_COLORS[day.index()]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RasterLayout {
    pub cell_width: u32,
    pub cell_height: u32,
    /// Width of the day-label column.
    pub label_width: u32,
    pub margin: u32,
}

impl Default for RasterLayout {
    fn default() -> Self {
        Self {
            cell_width: 96,
            cell_height: 40,
            label_width: 120,
            margin: 12,
        }
    }
}

impl RasterLayout {
    pub fn dimensions(&self, columns: u32) -> (u32, u32) {
        let rows = 1 + Day::ALL.len() as u32;
        (
            self.margin * 2 + self.label_width + columns * self.cell_width,
            self.margin * 2 + rows * self.cell_height,
        )
    }

    /// `(x, y, width, height)` of the cell at `row` (0 is the header band) and `col` (0 is the
    /// label column).
    pub fn cell_rect(&self, row: u32, col: u32) -> (u32, u32, u32, u32) {
        let (x, width) = if col == 0 {
            (self.margin, self.label_width)
        } else {
            (
                self.margin + self.label_width + (col - 1) * self.cell_width,
                self.cell_width,
            )
        };
        (x, self.margin + row * self.cell_height, width, self.cell_height)
    }
}

/// An RGBA8 pixel buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl Raster {
    fn filled(width: u32, height: u32, color: Rgb) -> Self {
        let mut pixels = Vec::with_capacity(width as usize * height as usize * 4);
        for _ in 0..(width as usize * height as usize) {
            pixels.extend_from_slice(&[color[0], color[1], color[2], 0xff]);
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        Some([self.pixels[idx], self.pixels[idx + 1], self.pixels[idx + 2]])
    }

    fn fill_rect(&mut self, (x0, y0, w, h): (u32, u32, u32, u32), color: Rgb) {
        for y in y0..(y0 + h).min(self.height) {
            for x in x0..(x0 + w).min(self.width) {
                let idx = (y as usize * self.width as usize + x as usize) * 4;
                self.pixels[idx..idx + 3].copy_from_slice(&color);
            }
        }
    }

    fn outline_rect(&mut self, (x0, y0, w, h): (u32, u32, u32, u32), color: Rgb) {
        if w == 0 || h == 0 {
            return;
        }
        self.fill_rect((x0, y0, w, 1), color);
        self.fill_rect((x0, y0 + h - 1, w, 1), color);
        self.fill_rect((x0, y0, 1, h), color);
        self.fill_rect((x0 + w - 1, y0, 1, h), color);
    }

    fn cell(&mut self, rect: (u32, u32, u32, u32), fill: Rgb) {
        self.fill_rect(rect, fill);
        self.outline_rect(rect, GRID_LINE);
    }
}

pub fn rasterize(plan: &GridPlan, layout: &RasterLayout) -> Raster {
    let columns = plan.headers.len() as u32;
    let (width, height) = layout.dimensions(columns);
    let mut raster = Raster::filled(width, height, BACKGROUND);

    raster.cell(layout.cell_rect(0, 0), CORNER);
    for col in 1..=columns {
        raster.cell(layout.cell_rect(0, col), HEADER_BAND);
    }

    for (row_idx, row) in plan.rows.iter().enumerate() {
        let row_no = row_idx as u32 + 1;
        let color = day_color(row.day);
        raster.cell(layout.cell_rect(row_no, 0), lighten(color));
        for (col_idx, cell) in row.cells.iter().enumerate() {
            let fill = if cell.has_content { color } else { EMPTY_CELL };
            raster.cell(layout.cell_rect(row_no, col_idx as u32 + 1), fill);
        }
    }

    raster
}

fn lighten(color: Rgb) -> Rgb {
    color.map(|c| c + (0xff - c) / 2)
}

#[cfg(feature = "raster")]
pub fn render_png(plan: &GridPlan, layout: &RasterLayout) -> Result<Vec<u8>, ExportError> {
    use image::ImageEncoder;

    let raster = rasterize(plan, layout);
    let mut buf = Vec::new();
    image::codecs::png::PngEncoder::new(&mut buf)
        .write_image(
            &raster.pixels,
            raster.width,
            raster.height,
            image::ExtendedColorType::Rgba8,
        )
        .map_err(|err| ExportError::Encode {
            message: err.to_string(),
        })?;
    Ok(buf)
}

#[cfg(not(feature = "raster"))]
pub fn render_png(_plan: &GridPlan, _layout: &RasterLayout) -> Result<Vec<u8>, ExportError> {
    Err(ExportError::PrerequisiteMissing {
        what: "PNG export needs the `raster` feature",
    })
}

/// Encodes and writes the PNG. Nothing is written when encoding fails.
pub fn write_png(
    path: &Path,
    plan: &GridPlan,
    layout: &RasterLayout,
    durability: WriteDurability,
) -> Result<(u32, u32), ExportError> {
    let bytes = render_png(plan, layout)?;
    crate::store::write_atomic(path, &bytes, durability)?;
    let dims = layout.dimensions(plan.headers.len() as u32);
    tracing::info!(path = %path.display(), width = dims.0, height = dims.1, "png written");
    Ok(dims)
}

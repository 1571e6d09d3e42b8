//! Display colors derived from finding sets.
//!
//! Every finding kind has a base color. A set of findings is shown as the
//! unweighted mean of its kinds' base colors: unchanged ("dark") on the
//! cells that carry the findings, and lightened toward white ("light") on
//! the other cells of a flagged column.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::validation::{CellRef, ErrorIndex, FindingKind, FindingSet};

/// Share of the distance to white added by the light intensity.
pub const LIGHTEN_FACTOR: f64 = 0.7;

/// An 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// `#rrggbb` notation.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Base color of a finding kind.
pub fn base_color(kind: FindingKind) -> Rgb {
    match kind {
        FindingKind::Null => Rgb::new(255, 0, 0),
        FindingKind::TypeMismatch => Rgb::new(255, 255, 0),
        FindingKind::Outlier => Rgb::new(51, 153, 255),
    }
}

/// Which cells a color is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intensity {
    /// The cell itself carries the findings.
    Dark,
    /// The cell is clean but its column carries findings.
    Light,
}

/// A blended color with full-precision channels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlendedColor {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl BlendedColor {
    /// Move each channel `factor` of the way toward 255.
    pub fn lighten(self, factor: f64) -> Self {
        let toward_white = |c: f64| c + (255.0 - c) * factor;
        Self {
            r: toward_white(self.r),
            g: toward_white(self.g),
            b: toward_white(self.b),
        }
    }

    /// Convert to 8-bit channels, truncating toward zero.
    pub fn to_rgb(&self) -> Rgb {
        let channel = |c: f64| c.clamp(0.0, 255.0) as u8;
        Rgb::new(channel(self.r), channel(self.g), channel(self.b))
    }
}

/// Blend a finding set at the given intensity. `None` for an empty set.
pub fn blend(findings: FindingSet, intensity: Intensity) -> Option<BlendedColor> {
    if findings.is_empty() {
        return None;
    }

    let (mut r, mut g, mut b) = (0.0, 0.0, 0.0);
    for kind in findings.iter() {
        let base = base_color(kind);
        r += f64::from(base.r);
        g += f64::from(base.g);
        b += f64::from(base.b);
    }

    let n = findings.len() as f64;
    let mean = BlendedColor {
        r: r / n,
        g: g / n,
        b: b / n,
    };

    Some(match intensity {
        Intensity::Dark => mean,
        Intensity::Light => mean.lighten(LIGHTEN_FACTOR),
    })
}

/// Background and text color of one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CellColors {
    /// `None` leaves the presentation default.
    pub background: Option<Rgb>,
    pub foreground: Rgb,
}

/// Precomputed colors for every flagged cell and column.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColorTable {
    cells: IndexMap<CellRef, Rgb>,
    columns: IndexMap<usize, Rgb>,
}

impl ColorTable {
    /// Build the table from an error index.
    pub fn from_index(index: &ErrorIndex) -> Self {
        let cells = index
            .cells()
            .filter_map(|flagged| {
                blend(flagged.findings, Intensity::Dark).map(|c| (flagged.cell, c.to_rgb()))
            })
            .collect();

        let columns = index
            .columns()
            .filter_map(|(col, findings)| {
                blend(findings, Intensity::Light).map(|c| (col, c.to_rgb()))
            })
            .collect();

        Self { cells, columns }
    }

    /// Colors for a cell: dark over flagged cells with white text, light over
    /// the rest of a flagged column, nothing elsewhere. Text is black unless
    /// the cell itself is flagged.
    pub fn color_for(&self, row: usize, column: usize) -> CellColors {
        if let Some(dark) = self.cells.get(&CellRef::new(row, column)) {
            return CellColors {
                background: Some(*dark),
                foreground: Rgb::WHITE,
            };
        }

        CellColors {
            background: self.columns.get(&column).copied(),
            foreground: Rgb::BLACK,
        }
    }

    /// Light color of a column, if it has findings.
    pub fn column_color(&self, column: usize) -> Option<Rgb> {
        self.columns.get(&column).copied()
    }
}

//! Outputs consumed by presentation: summary statistics and display colors.

mod color;
mod summary;

pub use color::{
    base_color, blend, BlendedColor, CellColors, ColorTable, Intensity, Rgb, LIGHTEN_FACTOR,
};
pub use summary::{percentage, KindSummary, SummaryStats};

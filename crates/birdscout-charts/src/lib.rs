// Self-contained HTML/SVG documents for the county charts and detail table
pub mod chart;
pub mod html;
pub mod output;
pub mod table;

pub use chart::{Bar, BarChart, PieChart, ScatterChart, Slice};
pub use output::{open_in_viewer, write_document, ChartError};
pub use table::DetailTable;

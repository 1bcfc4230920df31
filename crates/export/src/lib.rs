//! Report rendering: CSV files for spreadsheets and a printable HTML page
//! used as the PDF vehicle. All functions are pure string builders; the API
//! layer decides headers and content types.

mod csv_export;
mod filters;
mod format;
mod html;

pub use csv_export::{articles_csv, control_card_csv, movements_csv, stock_csv, ExportError};
pub use filters::ExportFilters;
pub use format::{currency, spanish_date};
pub use html::{control_card_html, render_page, table_html};

pub mod format;
pub mod inspect;
pub mod report;

pub use format::{OutputFormat, CSV_HEADER};
pub use inspect::{is_path_list, read_path_list, InspectFailure, InspectSummary, Inspector};
pub use report::{find_tables, format_date, FileReport, TableMatch};

pub mod csv_import;
pub mod import;
pub mod template;

pub use csv_import::{CsvImportError, load_from_file, parse_csv};
pub use import::{ImportError, ImportOptions, ImportReport, import_csv, prepare};
pub use template::{TEMPLATE_FILENAME, write_template};

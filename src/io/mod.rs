pub mod autosave;
pub mod csv_export;
pub mod file;

pub use autosave::{load_working_copy, save_working_copy, Debounce, WorkingCopy, AUTOSAVE_DELAY};
pub use csv_export::export_csv;
pub use file::{load_project, save_project};

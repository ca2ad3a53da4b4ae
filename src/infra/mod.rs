//! File I/O, dated note lookup, external commands

mod exec;
mod fs;

pub use exec::{ExecError, run_capturing_stdout, split_command};
pub use fs::{
    FsError, SEARCH_WINDOW_DAYS, date_from_file_name, find_most_recent_note, note_file_name,
    note_path_for_date, read_note_text, write_note_text,
};

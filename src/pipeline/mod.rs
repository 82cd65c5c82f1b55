//! Processing pipeline components.

mod coordinator;
mod processor;

pub use coordinator::{
    InputFile, ProcessCheck, collect_input_files, output_dir_for, output_path_for, should_process,
};
pub use processor::{ProcessOptions, ProcessResult, process_file};

pub mod mrinfo;
pub mod tags;

pub use mrinfo::{extract_axis_count, extract_shell_table, ShellTable};
pub use tags::{extract_tag_value, TagPath};

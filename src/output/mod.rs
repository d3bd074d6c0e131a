pub mod formatter;

pub use formatter::{
    format_course_table, format_gpa, format_json, format_summary, format_tsv, should_use_colors,
    Report,
};

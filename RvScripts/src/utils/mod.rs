//! Utility functions

pub mod path;
pub mod text;

pub use path::{
    UNNAMED, create_directory_structure, ensure_dir, normalize_path, sanitize_filename,
    sanitize_or_fallback,
};
pub use text::{is_line_break, normalize_bytes, normalize_content, replace_newlines, split_lines};

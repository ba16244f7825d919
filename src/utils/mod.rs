pub mod text;

pub use text::{escape_html, is_blank, substring_after_last, truncate_string, unescape_html};

//! Markdown link lookup under the editor cursor

pub mod data;

pub use data::{get_markdown_link, get_markdown_url_info, LinkInfo};

//! Comment body normalization: line cleanup, edge trimming and tag extraction.

pub mod edges;
pub mod lines;
pub mod tags;

pub use edges::{is_blank, trim_edges, trim_edges_owned};
pub use lines::{has_star_margin, is_doc_block, normalize_lines, strips_markers};
pub use tags::{extract_tags, parse_tag_line, ExtractedTags};

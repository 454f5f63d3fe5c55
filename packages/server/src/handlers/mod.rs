pub mod author;
pub mod fallback;
pub mod post;
pub mod standalone;

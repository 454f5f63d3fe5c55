pub mod author;
pub mod blog_post;
pub mod comment;
pub mod standalone_post;

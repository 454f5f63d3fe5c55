pub mod author;
pub mod post;
pub mod shared;
pub mod standalone;

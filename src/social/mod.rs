pub mod composer;

pub use composer::{split_posts, PostComposer, MAX_POST_LENGTH};

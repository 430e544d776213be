pub mod ratings;

pub use ratings::{create_rating, delete_rating, get_rating, get_ratings, modify_rating};

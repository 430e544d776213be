pub mod health;
pub mod ratings;

pub use health::health_handler;
pub use ratings::{
    create_rating_handler, delete_rating_handler, get_rating_handler, get_ratings_handler,
    modify_rating_handler,
};

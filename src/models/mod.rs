pub mod rating;
pub mod user;

pub use rating::{NewRating, RatingInput, RatingOwner};
pub use user::Claims;

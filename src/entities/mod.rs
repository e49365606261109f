pub mod movie;
pub mod rating;

pub mod ingredient;
pub mod recipe;
pub mod relation;
pub mod shopping_cart;
pub mod subscription;
pub mod tag;
pub mod user;

pub mod error;
pub mod reorder;
pub mod session;
pub mod todo;
pub mod user;
pub mod validate;
pub mod view;

//! Asset loading and validation for menus and picker settings.

pub mod load;
pub mod schema;

pub use load::*;
pub use schema::*;

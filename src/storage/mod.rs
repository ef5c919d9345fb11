//! Storage layer
//!
//! One JSON snapshot file for the whole user collection, written atomically.

pub mod file_io;
pub mod users;

pub use file_io::{read_json_or_default, write_json_atomic};
pub use users::UserStore;

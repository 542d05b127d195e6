pub mod health;
pub mod privilege;

pub use health::check;

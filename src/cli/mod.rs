pub mod args;
pub mod op;
pub mod ops;

pub use ops::{Add, AddDir, Cat, Get, Pin, Version};

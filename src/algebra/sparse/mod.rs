#![allow(non_snake_case)]

mod core;
pub use self::core::*;
mod builder;
pub use builder::*;
mod matrix_math;
pub use matrix_math::*;

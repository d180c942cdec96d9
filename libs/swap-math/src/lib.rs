#![no_std]

#[cfg(test)]
extern crate std;

pub mod constant_product;
pub mod full_math;
pub mod liquidity_math;

pub use constant_product::*;
pub use full_math::*;
pub use liquidity_math::*;

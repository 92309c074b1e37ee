#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod encoding;
pub mod extract;
pub mod stream;

pub use stream::{transform, StreamXor};

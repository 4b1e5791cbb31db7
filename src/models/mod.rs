pub mod common;
pub mod generation;
pub mod upscale;

pub use common::*;
pub use generation::*;
pub use upscale::*;

#![allow(dead_code)]

pub mod builders;
pub mod mock_sfn;
pub mod strategies;

pub use builders::*;
pub use mock_sfn::*;
pub use strategies::*;

//! Wire and form types shared by the tweet studio client crates.

pub mod domain;
pub mod error;
pub mod protocol;

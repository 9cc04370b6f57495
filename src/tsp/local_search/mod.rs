//! Local search (§4.11, §4.12): 2-opt / 2-opt* and 3-opt / 3-opt*.

pub mod three_opt;
pub mod two_opt;

pub use three_opt::three_opt;
pub use two_opt::two_opt;

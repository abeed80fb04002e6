pub mod breakdown;
pub mod currency;
pub mod input;
pub mod parameters;

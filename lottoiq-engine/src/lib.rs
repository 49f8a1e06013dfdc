pub mod enhance;
pub mod ensemble;
pub mod generator;
pub mod scorers;

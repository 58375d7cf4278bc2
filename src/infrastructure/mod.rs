pub mod elevate;
pub mod observability;
pub mod persistence;

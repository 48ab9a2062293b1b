pub mod clock;
pub mod knowledge;

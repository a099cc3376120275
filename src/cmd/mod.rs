pub mod play;
pub mod simulate;
pub mod validate;

pub mod banner;
pub mod ping;

pub mod inject;
pub mod serve;

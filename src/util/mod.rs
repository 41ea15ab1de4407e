pub mod norm;
pub mod svd;

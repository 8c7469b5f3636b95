pub mod products;
pub mod run;
pub mod validate;

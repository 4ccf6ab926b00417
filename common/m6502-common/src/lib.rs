pub mod boxedarray;
pub mod num;

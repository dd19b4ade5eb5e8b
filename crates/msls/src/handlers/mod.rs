pub mod flow;
pub mod health;
pub mod sls;
pub mod slsx;

pub mod pool;
pub mod repo;

pub use pool::create_pool;

pub mod date_math;

pub use date_math::DateError;

pub mod abs_error;

pub use abs_error::AbsoluteError;

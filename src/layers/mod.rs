pub mod unit;
pub mod dense;

pub use unit::Unit;
pub use dense::Layer;

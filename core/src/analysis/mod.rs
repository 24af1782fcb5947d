pub use propagation::*;

mod propagation;

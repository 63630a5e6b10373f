//! Expression tree handed to the translator.

pub mod expr;
pub mod pattern;
pub mod term;

pub use expr::{CompareOp, MathOp, ValueExpr};
pub use pattern::{GraphPattern, TermPattern};
pub use term::{Literal, Value};

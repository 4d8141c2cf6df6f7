mod subset;

mod quotient;

mod product;
pub use product::{ProductIndex, Verdict};

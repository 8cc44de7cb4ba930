//! Real-space image to visibility transforms

mod dft;
pub use dft::TransformerDft;

mod transformer_trait;
pub use transformer_trait::{Transformer, TransformerTrait};

/// Layer side: the host lifecycle and the importance data layer that plugs
/// into it.
///
/// The host drives every layer through
/// ```text
///   setup ─► ( reshape ─► forward ─► backward )*
/// ```
/// passing the layer's input blobs (`bottom`) and output blobs (`top`).

mod blob;
mod data_layer;
pub mod registry;

pub use blob::Blob;
pub use data_layer::ImportanceDataLayer;

use crate::error::Result;

/// Plugin contract of the host framework.
pub trait Layer {
    /// Name the layer is registered under.
    fn type_name(&self) -> &'static str;

    /// Called once, before anything else. Validate wiring and load
    /// whatever the layer needs.
    fn setup(&mut self, bottom: &[Blob], top: &mut [Blob]) -> Result<()>;

    /// Called before every forward pass; resizes `top` to what forward
    /// will produce.
    fn reshape(&mut self, bottom: &[Blob], top: &mut [Blob]) -> Result<()>;

    fn forward(&mut self, bottom: &[Blob], top: &mut [Blob]) -> Result<()>;

    fn backward(&mut self, top: &[Blob], propagate_down: &[bool], bottom: &mut [Blob])
        -> Result<()>;
}

//! Software scanline rasterizer: projects triangle meshes through a perspective camera and fills
//! them with interpolated depth and Gouraud lighting, one worker job per chunk of faces.

pub mod device;
pub mod error;
pub mod math;
pub mod scene;
pub mod settings;
pub mod shading;

pub use device::Device;
pub use error::{Error, Result};
pub use scene::{Camera, Mesh};
pub use settings::RenderSettings;

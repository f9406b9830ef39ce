pub mod camera;
pub mod constants;
pub mod error;
pub mod orbit;
pub mod routing;
pub mod sampler;
pub mod session;
pub mod tween;

pub use camera::*;
pub use constants::*;
pub use error::*;
pub use orbit::*;
pub use routing::*;
pub use sampler::*;
pub use session::*;

// Shaders bundled as string constants
pub static SCENE_WGSL: &str = include_str!("../../shaders/scene.wgsl");
pub static POST_WGSL: &str = include_str!("../../shaders/post.wgsl");

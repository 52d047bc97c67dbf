pub mod reference;
pub mod video;

pub use reference::StoredReference;
pub use video::Video;

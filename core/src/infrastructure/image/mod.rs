pub mod fs_image_encoder;

pub use fs_image_encoder::FsImageEncoder;

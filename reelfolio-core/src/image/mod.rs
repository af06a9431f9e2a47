pub mod variant_path;

pub use variant_path::{
    ExtensionPolicy, extension, is_image_path, to_large_path, to_large_path_prefix,
    to_thumb_path, to_thumb_path_or_original, to_thumb_path_prefix,
    to_thumbs_path_prefix, variant_path,
};

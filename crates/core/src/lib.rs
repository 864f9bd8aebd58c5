mod exif_reader;
mod metadata;
mod organize;
mod placement;

#[cfg(test)]
mod fixtures;

pub use exif_reader::{read_capture_timestamp, MetadataError, EXIF_TIMESTAMP_FORMAT};
pub use metadata::{resolve_capture_date, DateSource};
pub use organize::{
    organize_directory, organize_entry, FileOutcome, OrganizeOptions, Reporter, Stats,
};
pub use placement::{
    destination_for, folder_for, is_image_file, relative_folder, PlacementError,
    IMAGE_EXTENSIONS, MAX_COLLISION_SUFFIX,
};

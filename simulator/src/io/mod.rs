//! Persistence of generated frame sets.

pub mod archive;

pub use archive::{archive_file_name, ArchiveError, FrameArchive, SaveReport};

pub mod assets;
pub mod entries;

pub use assets::{AssetError, AssetStore, sanitize_filename};
pub use entries::{
    CreateOutcome, DeleteOutcome, EditOutcome, EntryForm, EntryService, FetchOutcome,
    UploadedImage,
};

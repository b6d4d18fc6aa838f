//! Repository addressing
//!
//! Three representations of the same information meet here:
//!
//! - a URL path as seen by an HTTP handler (`/peer/dataset/at/ipfs/QmHash`),
//! - a [`DatasetRef`] used by business logic,
//! - a file under the repository root, or a datastore [`Key`], selected by a
//!   logical [`File`] kind.
//!
//! [`http_path_to_ref_path`] turns the first into the canonical reference
//! string that [`DatasetRef::parse`] understands. [`File`] is the only place
//! the on-disk layout is spelled out; everything else resolves storage
//! locations through it.

mod dataset_ref;
mod files;
mod key;
mod path;

pub use dataset_ref::{DatasetRef, ParseError};
pub use files::{file_key, filepath, BasePath, File, FileError};
pub use key::Key;
pub use path::http_path_to_ref_path;

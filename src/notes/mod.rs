// Notes: on-disk storage engine and the wiki-link graph derived from it

pub mod links;
pub mod store;

pub use links::{extract_links, find_backlinks, resolve_links, Resolved};
pub use store::{generate_filename, Listing, NoteStorage};

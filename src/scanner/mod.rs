pub mod folder_scanner;
pub mod naming;

pub use folder_scanner::{CandidateFile, Discovery, FolderScanner, SizeFolder};
pub use naming::{NamingRules, SizeToken};

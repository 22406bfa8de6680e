pub mod builder;
pub mod bundle;
pub mod document;
pub mod error;
pub mod index;
pub mod lexicon;
pub mod persist;
pub mod register;
pub mod source;
pub mod tokenizer;

pub use builder::{BuildStats, DuplicateKey, IndexBuilder};
pub use bundle::{IndexBundle, IndexMaps};
pub use document::SourceDocument;
pub use error::{IndexError, PersistError, SourceError};
pub use index::{DocId, DocMeta, InvertedIndex, Posting, PostingsList, TermId};
pub use lexicon::Lexicon;
pub use register::{DocumentRegister, Registration};

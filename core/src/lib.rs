pub mod error;
pub mod index;
pub mod pagedir;
pub mod persist;
pub mod query;
pub mod rank;
pub mod search;
pub mod tokenizer;

pub use error::{IndexError, QueryError, SetupError};
pub use index::{IndexStore, PostingList};
pub use pagedir::{Corpus, Page};
pub use query::{Query, Token};
pub use rank::{RankedDoc, Ranking};

/// Dense document identifier, assigned from 1 in crawl order.
pub type DocId = u32;

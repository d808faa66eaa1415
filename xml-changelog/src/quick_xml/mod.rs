//! Tree writer using `quick-xml`

mod writer;

/// Re-export `quick-xml` crate
pub use quick_xml;

pub use self::writer::{
	serialize_document,
	Writer,
};

#![doc(html_root_url = "https://docs.rs/keyed-reconciler/0.0.1")]
#![warn(clippy::pedantic)]

#[cfg(doctest)]
pub mod readme {
	doc_comment::doctest!("../README.md");
}

mod block;
mod error;
pub mod keyed_list;
mod options;
pub mod reconcile;
mod scratch;
pub mod splice;

pub use block::Block;
pub use error::{DuplicateKeyError, Sequence};
pub use keyed_list::KeyedList;
pub use options::ReconcileOptions;
pub use reconcile::{reconcile, Host, Renderer, Report};

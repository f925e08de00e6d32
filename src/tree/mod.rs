mod children;
mod error;
mod forest;
mod insert;
mod lookup;
mod node;
pub(crate) mod traversal;

pub(crate) use children::{ChildSlot, Tree};
pub use error::{TreeError, TreeResult};
pub(crate) use forest::Forest;
pub(crate) use insert::RegexCache;
pub(crate) use node::{Node, NodeKind};

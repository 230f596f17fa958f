mod arena;
mod handle;
mod node;
mod raw_avl_tree;

pub use handle::Handle;
pub(crate) use raw_avl_tree::RawAvlTree;

mod arena;
mod handle;
mod node;
mod raw_bst;
mod raw_rbtree;
mod walk;

pub(crate) use handle::Handle;
pub(crate) use node::Side;
pub(crate) use raw_bst::RawBst;
pub(crate) use raw_rbtree::RawRbTree;
pub(crate) use walk::Topology;

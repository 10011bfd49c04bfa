mod arena;
mod handle;
mod navigate;
mod node;
mod raw_osrbtree_map;
mod size;
mod validate;

pub(crate) use handle::Handle;
pub(crate) use navigate::SearchResult;
pub(crate) use node::Direction;
pub(crate) use raw_osrbtree_map::RawOSRBTreeMap;

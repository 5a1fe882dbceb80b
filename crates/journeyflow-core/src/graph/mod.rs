mod compensation;
mod store;

pub use compensation::{Compensation, Mutation};
pub use store::{GraphStore, NodePatch};

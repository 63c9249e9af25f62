mod vectors;

pub use vectors::VectorStore;

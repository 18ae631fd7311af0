pub mod producer;

pub use producer::FloorProducer;

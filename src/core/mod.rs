pub mod almanach;
pub mod factory;
pub mod graph;
pub mod labeler;
pub mod lint;
pub mod placeholder;
pub mod pool;
pub mod resolver;
pub mod sample;
pub mod teller;
pub mod towns;

pub mod settings;

pub use settings::{AppConfig, FridayConfig, MosqueConfig, Note};

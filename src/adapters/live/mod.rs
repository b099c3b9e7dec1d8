//! Adapters that call the real image service.

pub mod openai;

mod fake_engine;

pub use fake_engine::{EngineCall, FakeContainerEngine};

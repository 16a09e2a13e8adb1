mod container_engine;

pub use container_engine::{BuildInput, BuildRequest, ContainerEngine, ContainerHandle, ImageId};

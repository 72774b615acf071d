pub mod client;
pub mod containers;
pub mod logs;
pub mod stats;

#[cfg(test)]
pub mod mock;

pub use client::{ContainerRuntime, DockerClient};

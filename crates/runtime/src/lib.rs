//! Container runtime collaborator.
//!
//! This crate provides:
//! - The [`ContainerRuntime`] / [`ContainerHandle`] traits the engine
//!   consumes for listings, lifecycle commands, and the event stream
//! - [`DockerCli`], the Docker implementation driving the `docker` CLI
//!   with JSON output

pub mod client;
pub mod docker;
pub mod error;

pub use client::{ContainerFilter, ContainerHandle, ContainerRuntime};
pub use docker::DockerCli;
pub use error::{Result, RuntimeError};

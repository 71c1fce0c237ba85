//! Platform abstraction layer for reading clocks.
//!
//! This module provides a platform abstraction that allows switching between
//! the real clocks of the operating system (process and thread processor time via the
//! `cpu_time` package, wall clock time via the standard library) and a fake implementation
//! for testing purposes.

mod abstractions;
mod facade;
#[cfg(test)]
mod fake;
mod real;

pub(crate) use abstractions::Platform;
pub(crate) use facade::PlatformFacade;
#[cfg(test)]
pub(crate) use fake::FakePlatform;

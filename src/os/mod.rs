//! Operating system abstraction layer
//!
//! This module provides a unified, platform-independent interface to the
//! operating system services the crate needs. Today that is a single one:
//! cryptographically secure entropy for seeding [`crate::rng::Csprng`].
//!
//! Platform-specific implementations are selected at compile time. Each
//! submodule exposes the same `sys_random` function, which reports failure
//! as [`crate::CryptoError::EntropyUnavailable`] instead of aborting.

#[cfg(target_os = "macos")]
pub(crate) mod macos;

#[cfg(target_os = "macos")]
pub(crate) use macos::*;

#[cfg(target_os = "linux")]
pub(crate) mod linux;

#[cfg(target_os = "linux")]
pub(crate) use linux::*;

#[cfg(target_os = "windows")]
pub(crate) mod windows;

#[cfg(target_os = "windows")]
pub(crate) use windows::*;

#[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
pub(crate) mod urandom;

#[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
pub(crate) use urandom::*;

// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Values and diagnostics shared by every strand crate.

pub mod error;
pub mod value;

pub use error::{Diagnostic, Error};
pub use value::{Dictionary, OrderedF64, Value};

pub type Result<T> = std::result::Result<T, Error>;

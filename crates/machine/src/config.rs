// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	fmt::{Display, Formatter},
	str::FromStr,
};

use serde::{Deserialize, Serialize};
use strand_type::{Error, Result, error, error::diagnostic::bytecode::invalid_argument};

/// The backend executing a compiled pipeline.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProcessorKind {
	/// Pull-based chain of steps, one traverser at a time.
	#[default]
	Pipes,
	/// Batch operators, every operator consumes its whole input before the next one runs.
	Dataflow,
}

impl Display for ProcessorKind {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			ProcessorKind::Pipes => f.write_str("pipes"),
			ProcessorKind::Dataflow => f.write_str("dataflow"),
		}
	}
}

impl FromStr for ProcessorKind {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self> {
		match s.to_lowercase().as_str() {
			"pipes" => Ok(ProcessorKind::Pipes),
			"dataflow" => Ok(ProcessorKind::Dataflow),
			_ => Err(error!(invalid_argument("with_processor", format!("unknown processor '{}'", s)))),
		}
	}
}

/// Settings a bytecode is compiled with. Source instructions of the bytecode take precedence.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MachineConfig {
	pub processor: ProcessorKind,
	/// Upper bound of body passes per traverser and repeat. Without a bound, a repeat needs an
	/// `until` condition to compile.
	pub loop_limit: Option<u32>,
}

impl MachineConfig {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_processor(mut self, processor: ProcessorKind) -> Self {
		self.processor = processor;
		self
	}

	pub fn with_loop_limit(mut self, limit: u32) -> Self {
		self.loop_limit = Some(limit);
		self
	}
}

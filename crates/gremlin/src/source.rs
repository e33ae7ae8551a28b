// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use strand_bytecode::{Argument, Bytecode, Coefficient, Operator, SourceOperator};
use strand_machine::{MachineConfig, ProcessorKind};
use strand_type::Value;

use crate::Traversal;

/// Spawns traversals sharing the same source instructions and machine settings.
#[derive(Clone, Debug, Default)]
pub struct TraversalSource {
	bytecode: Bytecode,
	config: MachineConfig,
}

impl TraversalSource {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_config(mut self, config: MachineConfig) -> Self {
		self.config = config;
		self
	}

	/// Executes spawned traversals with `processor`, regardless of the configured one.
	pub fn with_processor(mut self, processor: ProcessorKind) -> Self {
		self.bytecode.add_source_instruction(SourceOperator::WithProcessor, [processor.to_string().into()]);
		self
	}

	pub fn with_strategy(mut self, strategy: &str) -> Self {
		self.bytecode.add_source_instruction(SourceOperator::WithStrategy, [strategy.into()]);
		self
	}

	/// A traversal starting with one traverser per value.
	pub fn inject<V: Into<Value>>(&self, values: impl IntoIterator<Item = V>) -> Traversal {
		let mut bytecode = self.bytecode.clone();
		let starts = values.into_iter().map(|value| Argument::Value(value.into()));
		bytecode.add_instruction(Coefficient::unity(), Operator::Inject, starts);
		Traversal::new(bytecode, self.config.clone())
	}
}

// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Batch backend: every operator consumes the complete output of the operator before it.

mod operator;

use std::collections::VecDeque;

use operator::Operator;
use strand_type::{Result, error::diagnostic::iterator::exhausted, return_error};
use tracing::{instrument, trace};

use crate::{
	function::Function,
	processor::Processor,
	traverser::{Traverser, TraverserFactory},
};

pub struct Dataflow {
	operators: Vec<Operator>,
	injected: Vec<Traverser>,
	pending: Vec<Traverser>,
	armed: bool,
	output: VecDeque<Traverser>,
}

impl Dataflow {
	pub fn new(functions: Vec<Function>, starts: Vec<Traverser>, factory: TraverserFactory) -> Self {
		Self {
			operators: functions.into_iter().map(|function| Operator::new(function, factory)).collect(),
			injected: starts,
			pending: Vec::new(),
			armed: true,
			output: VecDeque::new(),
		}
	}

	fn is_executable(&self) -> bool {
		(self.armed && !self.injected.is_empty()) || !self.pending.is_empty() || (self.armed && self.has_generator())
	}

	/// A pipeline with a reduce produces a result even without any input.
	fn has_generator(&self) -> bool {
		self.operators.iter().any(Operator::is_generator)
	}

	#[instrument(name = "machine::dataflow::execute", level = "trace", skip_all)]
	fn execute(&mut self) -> Result<()> {
		let mut batch = Vec::with_capacity(self.injected.len() + self.pending.len());
		if self.armed {
			batch.extend(self.injected.iter().cloned());
			self.armed = false;
		}
		batch.append(&mut self.pending);

		for operator in &mut self.operators {
			let input = batch.len();
			batch = operator.run(batch)?;
			trace!(operator = operator.name(), input, output = batch.len(), "operator executed");
		}

		self.output.extend(batch);
		Ok(())
	}
}

impl Processor for Dataflow {
	fn has_next(&mut self) -> Result<bool> {
		if self.output.is_empty() && self.is_executable() {
			self.execute()?;
		}
		Ok(!self.output.is_empty())
	}

	fn next(&mut self) -> Result<Traverser> {
		if !self.has_next()? {
			return_error!(exhausted());
		}
		match self.output.pop_front() {
			Some(traverser) => Ok(traverser),
			None => return_error!(exhausted()),
		}
	}

	fn add_start(&mut self, traverser: Traverser) {
		self.pending.push(traverser);
	}

	fn reset(&mut self) {
		self.pending.clear();
		self.output.clear();
		self.armed = true;
	}
}

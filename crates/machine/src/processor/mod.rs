// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Execution backends of a compiled pipeline.

mod dataflow;
mod pipes;

pub use dataflow::Dataflow;
pub use pipes::Pipes;
use strand_type::Result;

use crate::{config::ProcessorKind, function::Function, traverser::Traverser, traverser::TraverserFactory};

/// Iterator protocol shared by all backends.
///
/// `next` must only be called after `has_next` returned true. `add_start` and `reset` allow a
/// nested pipeline to be reused for one input traverser after another.
pub trait Processor {
	fn has_next(&mut self) -> Result<bool>;

	fn next(&mut self) -> Result<Traverser>;

	fn add_start(&mut self, traverser: Traverser);

	fn reset(&mut self);
}

pub enum MachineProcessor {
	Pipes(Pipes),
	Dataflow(Dataflow),
}

impl MachineProcessor {
	pub fn new(
		kind: ProcessorKind,
		functions: Vec<Function>,
		starts: Vec<Traverser>,
		factory: TraverserFactory,
	) -> Self {
		match kind {
			ProcessorKind::Pipes => MachineProcessor::Pipes(Pipes::new(functions, starts, factory)),
			ProcessorKind::Dataflow => MachineProcessor::Dataflow(Dataflow::new(functions, starts, factory)),
		}
	}
}

impl Processor for MachineProcessor {
	fn has_next(&mut self) -> Result<bool> {
		match self {
			MachineProcessor::Pipes(processor) => processor.has_next(),
			MachineProcessor::Dataflow(processor) => processor.has_next(),
		}
	}

	fn next(&mut self) -> Result<Traverser> {
		match self {
			MachineProcessor::Pipes(processor) => processor.next(),
			MachineProcessor::Dataflow(processor) => processor.next(),
		}
	}

	fn add_start(&mut self, traverser: Traverser) {
		match self {
			MachineProcessor::Pipes(processor) => processor.add_start(traverser),
			MachineProcessor::Dataflow(processor) => processor.add_start(traverser),
		}
	}

	fn reset(&mut self) {
		match self {
			MachineProcessor::Pipes(processor) => processor.reset(),
			MachineProcessor::Dataflow(processor) => processor.reset(),
		}
	}
}

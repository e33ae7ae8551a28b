// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

use strand_bytecode::Bytecode;
use strand_machine::{Compilation, MachineConfig, Traverser};
use strand_type::{Error, Result, Value};
use tracing::{debug, instrument};

mod step;

/// A traversal under construction, and once iterated, the iterator over its results.
///
/// Builder methods append instructions to the bytecode. Errors raised while building are deferred
/// and returned by the first iteration call. The first iteration call compiles the bytecode and
/// locks the traversal: a builder method called afterwards fails every following iteration call
/// with `TRAVERSAL_001`.
#[derive(Debug)]
pub struct Traversal {
	bytecode: Bytecode,
	config: MachineConfig,
	compilation: Option<Compilation>,
	error: Option<Error>,
	replay: Option<Replay>,
	/// Set once the iterator returned an error, it ends there.
	fused: bool,
}

/// An object still owed to the caller because its traverser carried a coefficient above one.
#[derive(Debug)]
struct Replay {
	object: Value,
	remaining: u64,
}

impl Traversal {
	pub(crate) fn new(bytecode: Bytecode, config: MachineConfig) -> Self {
		Self {
			bytecode,
			config,
			compilation: None,
			error: None,
			replay: None,
			fused: false,
		}
	}

	pub fn bytecode(&self) -> &Bytecode {
		&self.bytecode
	}

	/// Whether the first iteration call compiled the traversal already.
	pub fn is_locked(&self) -> bool {
		self.compilation.is_some()
	}

	/// The bytecode of a traversal used as argument of another one.
	pub fn into_bytecode(self) -> Result<Bytecode> {
		match self.error {
			Some(err) => Err(err),
			None => Ok(self.bytecode),
		}
	}

	#[instrument(name = "gremlin::traversal::lock", level = "debug", skip_all)]
	fn compilation(&mut self) -> Result<&mut Compilation> {
		if let Some(err) = &self.error {
			return Err(err.clone());
		}

		let compilation = match self.compilation.take() {
			Some(compilation) => compilation,
			None => {
				let compilation = Compilation::compile_with(self.bytecode.clone(), &self.config)?;
				debug!(bytecode = %self.bytecode, "traversal locked");
				compilation
			}
		};
		Ok(self.compilation.insert(compilation))
	}

	pub fn has_next(&mut self) -> Result<bool> {
		if let Some(err) = &self.error {
			return Err(err.clone());
		}
		if self.replay.is_some() {
			return Ok(true);
		}
		self.compilation()?.has_next()
	}

	/// The next result object. A traverser with coefficient `k` yields its object `k` times before
	/// the pipeline is pulled again.
	pub fn next(&mut self) -> Result<Value> {
		if let Some(err) = &self.error {
			return Err(err.clone());
		}

		if let Some(mut replay) = self.replay.take() {
			replay.remaining -= 1;
			if replay.remaining == 0 {
				return Ok(replay.object);
			}
			let object = replay.object.clone();
			self.replay = Some(replay);
			return Ok(object);
		}

		let traverser = self.compilation()?.next()?;
		let count = traverser.coefficient().count();
		let object = traverser.into_object();
		if count > 1 {
			self.replay = Some(Replay {
				object: object.clone(),
				remaining: count - 1,
			});
		}
		Ok(object)
	}

	/// The next traverser as the machine produced it, coefficient included.
	///
	/// Objects still owed by a replay of [`Traversal::next`] are dropped.
	pub fn next_traverser(&mut self) -> Result<Traverser> {
		self.replay = None;
		self.compilation()?.next()
	}

	pub fn to_list(&mut self) -> Result<Vec<Value>> {
		let mut result = Vec::new();
		while self.has_next()? {
			result.push(Traversal::next(self)?);
		}
		Ok(result)
	}
}

impl Iterator for Traversal {
	type Item = Result<Value>;

	fn next(&mut self) -> Option<Self::Item> {
		if self.fused {
			return None;
		}
		let item = match self.has_next() {
			Ok(true) => Traversal::next(self),
			Ok(false) => return None,
			Err(err) => Err(err),
		};
		self.fused = item.is_err();
		Some(item)
	}
}

impl Display for Traversal {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.bytecode)
	}
}

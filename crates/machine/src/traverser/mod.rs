// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

mod factory;
mod path;
mod set;

use std::fmt::{Display, Formatter};

pub use factory::TraverserFactory;
use indexmap::IndexMap;
pub use path::Path;
pub use set::TraverserSet;
use strand_bytecode::Coefficient;
use strand_type::Value;

/// Identifies one repeat instruction of a compiled bytecode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LoopId(pub usize);

impl Display for LoopId {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "loop#{}", self.0)
	}
}

/// The unit of data flowing through a pipeline.
///
/// A traverser is owned by exactly one step at a time. Steps that forward it to more than one
/// destination clone it.
#[derive(Clone, Debug, PartialEq)]
pub struct Traverser {
	object: Value,
	coefficient: Coefficient,
	path: Option<Path>,
	loops: IndexMap<LoopId, u32>,
}

impl Traverser {
	pub(crate) fn new(object: Value, coefficient: Coefficient, path: Option<Path>) -> Self {
		Self {
			object,
			coefficient,
			path,
			loops: IndexMap::new(),
		}
	}

	pub fn object(&self) -> &Value {
		&self.object
	}

	pub fn into_object(self) -> Value {
		self.object
	}

	pub fn coefficient(&self) -> Coefficient {
		self.coefficient
	}

	pub fn coefficient_mut(&mut self) -> &mut Coefficient {
		&mut self.coefficient
	}

	pub fn path(&self) -> Option<&Path> {
		self.path.as_ref()
	}

	pub fn loops(&self, id: LoopId) -> u32 {
		self.loops.get(&id).copied().unwrap_or(0)
	}

	/// The counter of the innermost loop this traverser is in.
	pub fn innermost_loops(&self) -> u32 {
		self.loops.last().map(|(_, count)| *count).unwrap_or(0)
	}

	/// A traverser carrying `object` with this traverser's coefficient, path and loop counters.
	/// The path, when tracked, is extended by the new object.
	pub fn split(&self, object: Value, label: Option<&str>) -> Traverser {
		let path = self.path.as_ref().map(|path| {
			let mut path = path.clone();
			path.extend(object.clone(), label);
			path
		});
		Traverser {
			object,
			coefficient: self.coefficient,
			path,
			loops: self.loops.clone(),
		}
	}

	pub fn add_label(&mut self, label: &str) {
		if let Some(path) = &mut self.path {
			path.add_label(label);
		}
	}

	pub fn incr_loops(&mut self, id: LoopId) {
		*self.loops.entry(id).or_insert(0) += 1;
	}

	pub fn reset_loops(&mut self, id: LoopId) {
		self.loops.shift_remove(&id);
	}

	pub(crate) fn loop_counters(&self) -> Vec<(LoopId, u32)> {
		self.loops.iter().map(|(id, count)| (*id, *count)).collect()
	}
}

impl Display for Traverser {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		if self.coefficient.is_unity() {
			write!(f, "{}", self.object)
		} else {
			write!(f, "{}x{}", self.coefficient, self.object)
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_split_keeps_metadata() {
		let mut traverser = TraverserFactory::Path.create(Value::int8(1), Coefficient::new(3), Some("a"));
		traverser.incr_loops(LoopId(0));

		let split = traverser.split(Value::int8(2), Some("b"));
		assert_eq!(split.object(), &Value::int8(2));
		assert_eq!(split.coefficient().count(), 3);
		assert_eq!(split.loops(LoopId(0)), 1);
		assert_eq!(split.path().unwrap().objects(), &[Value::int8(1), Value::int8(2)]);

		// the split does not touch its parent
		assert_eq!(traverser.path().unwrap().len(), 1);
	}

	#[test]
	fn test_nested_loop_counters_are_independent() {
		let mut traverser = TraverserFactory::Object.create(Value::int8(1), Coefficient::unity(), None);
		traverser.incr_loops(LoopId(0));
		traverser.incr_loops(LoopId(1));
		traverser.incr_loops(LoopId(1));

		assert_eq!(traverser.loops(LoopId(0)), 1);
		assert_eq!(traverser.loops(LoopId(1)), 2);
		assert_eq!(traverser.innermost_loops(), 2);

		traverser.reset_loops(LoopId(1));
		assert_eq!(traverser.loops(LoopId(1)), 0);
		assert_eq!(traverser.innermost_loops(), 1);
	}

	#[test]
	fn test_object_factory_does_not_track_path() {
		let traverser = TraverserFactory::Object.create(Value::int8(1), Coefficient::unity(), Some("a"));
		assert!(traverser.path().is_none());
		assert!(traverser.split(Value::int8(2), None).path().is_none());
	}
}

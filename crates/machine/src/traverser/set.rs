// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use indexmap::IndexMap;
use strand_type::Value;

use super::{LoopId, Path, Traverser};

type Key = (Value, Option<Path>, Vec<(LoopId, u32)>);

/// Traversers bulked by equality: two traversers with the same object, path and loop counters
/// collapse into one whose coefficient is the sum of both.
#[derive(Clone, Debug, Default)]
pub struct TraverserSet {
	traversers: IndexMap<Key, Traverser>,
}

impl TraverserSet {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn add(&mut self, traverser: Traverser) {
		let key = (traverser.object().clone(), traverser.path().cloned(), traverser.loop_counters());
		match self.traversers.get_mut(&key) {
			Some(existing) => existing.coefficient_mut().sum(traverser.coefficient()),
			None => {
				self.traversers.insert(key, traverser);
			}
		}
	}
}

impl IntoIterator for TraverserSet {
	type Item = Traverser;
	type IntoIter = indexmap::map::IntoValues<Key, Traverser>;

	fn into_iter(self) -> Self::IntoIter {
		self.traversers.into_values()
	}
}

#[cfg(test)]
mod tests {
	use strand_bytecode::Coefficient;

	use super::*;
	use crate::traverser::TraverserFactory;

	#[test]
	fn test_bulks_equal_traversers() {
		let factory = TraverserFactory::Object;
		let mut set = TraverserSet::new();
		set.add(factory.create(Value::int8(1), Coefficient::unity(), None));
		set.add(factory.create(Value::int8(2), Coefficient::unity(), None));
		set.add(factory.create(Value::int8(1), Coefficient::new(2), None));

		let result: Vec<_> = set.into_iter().collect();
		assert_eq!(result.len(), 2);
		assert_eq!(result[0].object(), &Value::int8(1));
		assert_eq!(result[0].coefficient().count(), 3);
		assert_eq!(result[1].coefficient().count(), 1);
	}

	#[test]
	fn test_different_paths_do_not_bulk() {
		let factory = TraverserFactory::Path;
		let mut set = TraverserSet::new();
		set.add(factory.create(Value::int8(0), Coefficient::unity(), None).split(Value::int8(1), None));
		set.add(factory.create(Value::int8(1), Coefficient::unity(), None));
		assert_eq!(set.into_iter().count(), 2);
	}
}

// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

use strand_type::Result;
use tracing::trace;

use super::FilterFunction;
use crate::{Compilation, traverser::Traverser};

/// Guarded traversals. The first guard that holds selects its traversal; when none does, every
/// unguarded (default) traversal receives its own copy of the traverser.
#[derive(Clone, Debug)]
pub struct BranchFunction {
	branches: Vec<(Option<FilterFunction>, Box<Compilation>)>,
}

impl BranchFunction {
	pub fn new(branches: Vec<(Option<FilterFunction>, Box<Compilation>)>) -> Self {
		Self {
			branches,
		}
	}

	pub fn apply(&mut self, traverser: &Traverser) -> Result<Vec<Traverser>> {
		let mut selected = None;
		for (index, (guard, _)) in self.branches.iter_mut().enumerate() {
			if let Some(guard) = guard {
				if guard.test(traverser)? {
					selected = Some(index);
					break;
				}
			}
		}

		if let Some(index) = selected {
			trace!(branch = index, "guard selected branch");
			return self.branches[index].1.flat_map_traverser(traverser.clone());
		}

		let mut result = Vec::new();
		for (_, compilation) in self.branches.iter_mut().filter(|(guard, _)| guard.is_none()) {
			result.extend(compilation.flat_map_traverser(traverser.clone())?);
		}
		Ok(result)
	}
}

impl Display for BranchFunction {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		for (i, (guard, compilation)) in self.branches.iter().enumerate() {
			if i > 0 {
				f.write_str(", ")?;
			}
			match guard {
				Some(guard) => write!(f, "{} => {}", guard, compilation)?,
				None => write!(f, "default => {}", compilation)?,
			}
		}
		Ok(())
	}
}

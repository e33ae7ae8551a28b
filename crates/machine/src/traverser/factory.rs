// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use strand_bytecode::Coefficient;
use strand_type::Value;

use super::{Path, Traverser};

/// Creates fresh traversers. Path history is only recorded when some step asks for it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TraverserFactory {
	Object,
	Path,
}

impl TraverserFactory {
	pub fn create(&self, object: Value, coefficient: Coefficient, label: Option<&str>) -> Traverser {
		match self {
			TraverserFactory::Object => Traverser::new(object, coefficient, None),
			TraverserFactory::Path => {
				let mut path = Path::new();
				path.extend(object.clone(), label);
				Traverser::new(object, coefficient, Some(path))
			}
		}
	}

	pub fn tracks_path(&self) -> bool {
		matches!(self, TraverserFactory::Path)
	}
}

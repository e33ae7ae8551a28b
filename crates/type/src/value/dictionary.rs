// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	cmp::Ordering,
	hash::{DefaultHasher, Hash, Hasher},
	ops::{Deref, DerefMut},
};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::Value;

/// Insertion-ordered key/value entries. Equality and hashing ignore entry order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<(Value, Value)>", into = "Vec<(Value, Value)>")]
pub struct Dictionary(IndexMap<Value, Value>);

impl Dictionary {
	pub fn new() -> Self {
		Self(IndexMap::new())
	}

	pub fn into_inner(self) -> IndexMap<Value, Value> {
		self.0
	}
}

impl Deref for Dictionary {
	type Target = IndexMap<Value, Value>;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

impl DerefMut for Dictionary {
	fn deref_mut(&mut self) -> &mut Self::Target {
		&mut self.0
	}
}

impl Hash for Dictionary {
	fn hash<H: Hasher>(&self, state: &mut H) {
		let mut combined: u64 = 0;
		for entry in self.0.iter() {
			let mut hasher = DefaultHasher::new();
			entry.hash(&mut hasher);
			combined = combined.wrapping_add(hasher.finish());
		}
		self.0.len().hash(state);
		combined.hash(state);
	}
}

impl PartialOrd for Dictionary {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}

impl Ord for Dictionary {
	fn cmp(&self, other: &Self) -> Ordering {
		let mut left: Vec<_> = self.0.iter().collect();
		let mut right: Vec<_> = other.0.iter().collect();
		left.sort();
		right.sort();
		left.cmp(&right)
	}
}

impl From<Vec<(Value, Value)>> for Dictionary {
	fn from(entries: Vec<(Value, Value)>) -> Self {
		Self(entries.into_iter().collect())
	}
}

impl From<Dictionary> for Vec<(Value, Value)> {
	fn from(dictionary: Dictionary) -> Self {
		dictionary.0.into_iter().collect()
	}
}

impl From<IndexMap<Value, Value>> for Dictionary {
	fn from(entries: IndexMap<Value, Value>) -> Self {
		Self(entries)
	}
}

impl FromIterator<(Value, Value)> for Dictionary {
	fn from_iter<T: IntoIterator<Item = (Value, Value)>>(iter: T) -> Self {
		Self(iter.into_iter().collect())
	}
}

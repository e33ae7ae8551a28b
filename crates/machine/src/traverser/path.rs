// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use serde::{Deserialize, Serialize};
use strand_type::Value;

/// The objects a traverser visited, each with the labels of the step that produced it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Path {
	objects: Vec<Value>,
	labels: Vec<Vec<String>>,
}

impl Path {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn extend(&mut self, object: Value, label: Option<&str>) {
		self.objects.push(object);
		self.labels.push(label.map(|l| vec![l.to_string()]).unwrap_or_default());
	}

	/// Labels the most recent entry. Used by steps that do not change the object.
	pub fn add_label(&mut self, label: &str) {
		if let Some(last) = self.labels.last_mut() {
			if !last.iter().any(|l| l == label) {
				last.push(label.to_string());
			}
		}
	}

	pub fn len(&self) -> usize {
		self.objects.len()
	}

	pub fn is_empty(&self) -> bool {
		self.objects.is_empty()
	}

	pub fn objects(&self) -> &[Value] {
		&self.objects
	}

	pub fn labels(&self, index: usize) -> &[String] {
		self.labels.get(index).map(Vec::as_slice).unwrap_or(&[])
	}

	/// The most recent object carrying `label`.
	pub fn get(&self, label: &str) -> Option<&Value> {
		self.labels.iter().rposition(|labels| labels.iter().any(|l| l == label)).map(|i| &self.objects[i])
	}

	pub fn to_value(&self) -> Value {
		Value::List(self.objects.clone())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_get_returns_latest() {
		let mut path = Path::new();
		path.extend(Value::int8(1), Some("a"));
		path.extend(Value::int8(2), None);
		path.add_label("b");
		path.extend(Value::int8(3), Some("a"));

		assert_eq!(path.len(), 3);
		assert_eq!(path.get("a"), Some(&Value::int8(3)));
		assert_eq!(path.get("b"), Some(&Value::int8(2)));
		assert_eq!(path.get("c"), None);
		assert_eq!(path.labels(1), ["b".to_string()]);
		assert_eq!(path.to_value(), Value::list([1, 2, 3]));
	}
}

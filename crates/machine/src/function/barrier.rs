// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

use strand_type::{Dictionary, Result, Value};

use super::MapFunction;
use crate::traverser::{Traverser, TraverserSet};

/// Aggregations that need the whole input before producing output.
#[derive(Clone, Debug)]
pub enum BarrierFunction {
	/// Collapses equal traversers into one, summing their coefficients.
	Bulk,
	/// Counts traversers per key. Without a key function the object is the key.
	GroupCount(Option<Box<MapFunction>>),
}

#[derive(Clone, Debug)]
pub enum BarrierValue {
	Traversers(TraverserSet),
	Counts(Dictionary),
}

impl BarrierFunction {
	pub fn initial_value(&self) -> BarrierValue {
		match self {
			BarrierFunction::Bulk => BarrierValue::Traversers(TraverserSet::new()),
			BarrierFunction::GroupCount(_) => BarrierValue::Counts(Dictionary::new()),
		}
	}

	pub fn apply(&mut self, traverser: Traverser, accumulator: BarrierValue) -> Result<BarrierValue> {
		match (self, accumulator) {
			(BarrierFunction::Bulk, BarrierValue::Traversers(mut set)) => {
				set.add(traverser);
				Ok(BarrierValue::Traversers(set))
			}
			(BarrierFunction::GroupCount(by), BarrierValue::Counts(mut counts)) => {
				let key = match by {
					Some(by) => by.apply(&traverser, None)?.into_object(),
					None => traverser.object().clone(),
				};
				let weight = i64::try_from(traverser.coefficient().count()).unwrap_or(i64::MAX);
				let count = counts.entry(key).or_insert(Value::Int8(0));
				*count = count.add(&Value::Int8(weight))?;
				Ok(BarrierValue::Counts(counts))
			}
			(_, accumulator) => Ok(accumulator),
		}
	}

	/// Whether the accumulated value already consists of traversers.
	pub fn returns_traversers(&self) -> bool {
		matches!(self, BarrierFunction::Bulk)
	}

	pub fn traversers(&self, value: BarrierValue) -> Vec<Traverser> {
		match value {
			BarrierValue::Traversers(set) => set.into_iter().collect(),
			BarrierValue::Counts(_) => Vec::new(),
		}
	}

	pub fn values(&self, value: BarrierValue) -> Vec<Value> {
		match value {
			BarrierValue::Traversers(set) => set.into_iter().map(Traverser::into_object).collect(),
			BarrierValue::Counts(counts) if counts.is_empty() => Vec::new(),
			BarrierValue::Counts(counts) => vec![Value::Dictionary(counts)],
		}
	}
}

impl Display for BarrierFunction {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			BarrierFunction::Bulk => f.write_str("bulk"),
			BarrierFunction::GroupCount(None) => f.write_str("groupcount"),
			BarrierFunction::GroupCount(Some(by)) => write!(f, "groupcount by {}", by),
		}
	}
}

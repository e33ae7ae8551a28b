// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	cmp::Ordering,
	fmt::{Display, Formatter},
	hash::{Hash, Hasher},
	ops::Deref,
};

use serde::{Deserialize, Serialize};

/// An `f64` that is never NaN, so it can take part in `Eq`, `Hash` and `Ord`.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct OrderedF64(f64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NanError;

impl Display for NanError {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str("NaN is not a valid ordered float")
	}
}

impl TryFrom<f64> for OrderedF64 {
	type Error = NanError;

	fn try_from(value: f64) -> Result<Self, Self::Error> {
		if value.is_nan() {
			return Err(NanError);
		}
		// -0.0 and 0.0 share one representation
		if value == 0.0 {
			return Ok(Self(0.0));
		}
		Ok(Self(value))
	}
}

impl From<OrderedF64> for f64 {
	fn from(value: OrderedF64) -> Self {
		value.0
	}
}

impl OrderedF64 {
	pub fn value(&self) -> f64 {
		self.0
	}
}

impl Deref for OrderedF64 {
	type Target = f64;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

impl PartialEq for OrderedF64 {
	fn eq(&self, other: &Self) -> bool {
		self.0.to_bits() == other.0.to_bits()
	}
}

impl Eq for OrderedF64 {}

impl Hash for OrderedF64 {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.0.to_bits().hash(state);
	}
}

impl PartialOrd for OrderedF64 {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}

impl Ord for OrderedF64 {
	fn cmp(&self, other: &Self) -> Ordering {
		self.0.total_cmp(&other.0)
	}
}

impl Display for OrderedF64 {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		Display::fmt(&self.0, f)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_nan_rejected() {
		assert!(OrderedF64::try_from(f64::NAN).is_err());
	}

	#[test]
	fn test_negative_zero_equals_zero() {
		let a = OrderedF64::try_from(-0.0).unwrap();
		let b = OrderedF64::try_from(0.0).unwrap();
		assert_eq!(a, b);
	}
}

// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::{self, Display, Formatter};

use serde::{
	Deserialize, Deserializer, Serialize,
	de::{Error, Visitor},
};
use strand_type::{error, error::diagnostic::bytecode::invalid_argument};

/// How many identical logical copies an instruction or a traverser stands for.
///
/// The count never drops below one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Coefficient(u64);

impl Coefficient {
	pub const fn unity() -> Self {
		Self(1)
	}

	pub fn new(count: u64) -> Self {
		Self(count.max(1))
	}

	pub fn count(&self) -> u64 {
		self.0
	}

	pub fn set(&mut self, count: u64) {
		self.0 = count.max(1);
	}

	pub fn multiply(&mut self, other: Coefficient) {
		self.0 = self.0.saturating_mul(other.0);
	}

	pub fn sum(&mut self, other: Coefficient) {
		self.0 = self.0.saturating_add(other.0);
	}

	pub fn is_unity(&self) -> bool {
		self.0 == 1
	}
}

impl Default for Coefficient {
	fn default() -> Self {
		Self::unity()
	}
}

impl From<u64> for Coefficient {
	fn from(count: u64) -> Self {
		Self::new(count)
	}
}

impl<'de> Deserialize<'de> for Coefficient {
	fn deserialize<D>(deserializer: D) -> Result<Coefficient, D::Error>
	where
		D: Deserializer<'de>,
	{
		struct CountVisitor;

		impl Visitor<'_> for CountVisitor {
			type Value = Coefficient;

			fn expecting(&self, formatter: &mut Formatter) -> fmt::Result {
				formatter.write_str("an unsigned 64-bit number of at least one")
			}

			fn visit_u64<E: Error>(self, value: u64) -> Result<Self::Value, E> {
				if value == 0 {
					return Err(E::custom(error!(invalid_argument("c", "a coefficient must be at least 1"))));
				}
				Ok(Coefficient(value))
			}
		}

		deserializer.deserialize_u64(CountVisitor)
	}
}

impl Display for Coefficient {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		Display::fmt(&self.0, f)
	}
}

// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use strand_bytecode::{Argument, Bytecode};
use strand_type::{Result, Value};

use crate::{P, Traversal};

/// Anything a step accepts as its function: a lambda, a constant or a nested traversal.
///
/// A nested traversal carries the errors deferred while building it, they surface here.
pub trait IntoArgument {
	fn into_argument(self) -> Result<Argument>;
}

impl IntoArgument for Argument {
	fn into_argument(self) -> Result<Argument> {
		Ok(self)
	}
}

impl IntoArgument for Traversal {
	fn into_argument(self) -> Result<Argument> {
		self.into_bytecode().map(Argument::Bytecode)
	}
}

impl IntoArgument for Bytecode {
	fn into_argument(self) -> Result<Argument> {
		Ok(Argument::Bytecode(self))
	}
}

impl IntoArgument for Value {
	fn into_argument(self) -> Result<Argument> {
		Ok(Argument::Value(self))
	}
}

impl IntoArgument for &str {
	fn into_argument(self) -> Result<Argument> {
		Ok(Argument::Value(Value::utf8(self)))
	}
}

impl IntoArgument for String {
	fn into_argument(self) -> Result<Argument> {
		Ok(Argument::Value(Value::Utf8(self)))
	}
}

impl IntoArgument for i64 {
	fn into_argument(self) -> Result<Argument> {
		Ok(Argument::Value(Value::Int8(self)))
	}
}

impl IntoArgument for i32 {
	fn into_argument(self) -> Result<Argument> {
		Ok(Argument::Value(Value::int8(self)))
	}
}

impl IntoArgument for f64 {
	fn into_argument(self) -> Result<Argument> {
		Ok(Argument::Value(Value::float8(self)))
	}
}

impl IntoArgument for bool {
	fn into_argument(self) -> Result<Argument> {
		Ok(Argument::Value(Value::Boolean(self)))
	}
}

/// A predicate on its own becomes a single filter step testing the traverser object.
impl IntoArgument for P {
	fn into_argument(self) -> Result<Argument> {
		self.into_filter().map(Argument::Bytecode)
	}
}

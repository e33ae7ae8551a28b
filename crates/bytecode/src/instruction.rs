// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use strand_type::{Result, error::diagnostic::bytecode::duplicate_label, return_error};

use crate::{Argument, Coefficient, Operator, SourceOperator};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Instruction {
	pub coefficient: Coefficient,
	pub operator: Operator,
	pub arguments: Vec<Argument>,
	pub label: Option<String>,
}

impl Instruction {
	pub fn new(coefficient: Coefficient, operator: Operator, arguments: Vec<Argument>) -> Self {
		Self {
			coefficient,
			operator,
			arguments,
			label: None,
		}
	}

	/// Labels the instruction. A step carries at most one label.
	pub fn add_label(&mut self, label: impl Into<String>) -> Result<()> {
		let label = label.into();
		if let Some(existing) = &self.label {
			return_error!(duplicate_label(existing, &label));
		}
		self.label = Some(label);
		Ok(())
	}

	pub fn add_arg(&mut self, argument: impl Into<Argument>) {
		self.arguments.push(argument.into());
	}
}

impl Display for Instruction {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		if !self.coefficient.is_unity() {
			write!(f, "{}*", self.coefficient)?;
		}
		write!(f, "{}(", self.operator)?;
		for (i, argument) in self.arguments.iter().enumerate() {
			if i > 0 {
				f.write_str(", ")?;
			}
			write!(f, "{}", argument)?;
		}
		f.write_str(")")?;
		if let Some(label) = &self.label {
			write!(f, "@{}", label)?;
		}
		Ok(())
	}
}

/// Configures how a bytecode gets executed. Never part of the step chain.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SourceInstruction {
	pub operator: SourceOperator,
	pub arguments: Vec<Argument>,
}

impl Display for SourceInstruction {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}(", self.operator)?;
		for (i, argument) in self.arguments.iter().enumerate() {
			if i > 0 {
				f.write_str(", ")?;
			}
			write!(f, "{}", argument)?;
		}
		f.write_str(")")
	}
}

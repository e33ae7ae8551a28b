// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use strand_type::{Result, error::diagnostic::bytecode::no_instruction, return_error};

use crate::{Argument, Coefficient, Instruction, Operator, SourceInstruction, SourceOperator};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Bytecode {
	pub source_instructions: Vec<SourceInstruction>,
	pub step_instructions: Vec<Instruction>,
}

impl Bytecode {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn add_instruction(
		&mut self,
		coefficient: Coefficient,
		operator: Operator,
		arguments: impl IntoIterator<Item = Argument>,
	) {
		self.step_instructions.push(Instruction::new(coefficient, operator, arguments.into_iter().collect()));
	}

	pub fn add_source_instruction(&mut self, operator: SourceOperator, arguments: impl IntoIterator<Item = Argument>) {
		self.source_instructions.push(SourceInstruction {
			operator,
			arguments: arguments.into_iter().collect(),
		});
	}

	pub fn last_instruction(&self) -> Option<&Instruction> {
		self.step_instructions.last()
	}

	/// The most recently added step instruction, for adding labels or arguments in place.
	pub fn last_instruction_mut(&mut self) -> Result<&mut Instruction> {
		match self.step_instructions.last_mut() {
			Some(instruction) => Ok(instruction),
			None => return_error!(no_instruction()),
		}
	}

	pub fn is_empty(&self) -> bool {
		self.step_instructions.is_empty()
	}

	pub fn len(&self) -> usize {
		self.step_instructions.len()
	}

	/// Whether this bytecode or any bytecode nested in its arguments uses `operator`.
	pub fn contains_operator(&self, operator: Operator) -> bool {
		self.step_instructions.iter().any(|instruction| {
			instruction.operator == operator
				|| instruction
					.arguments
					.iter()
					.filter_map(Argument::as_bytecode)
					.any(|nested| nested.contains_operator(operator))
		})
	}

	/// Every label defined in this bytecode and the bytecode nested in its arguments.
	pub fn labels(&self) -> Vec<&str> {
		let mut result = Vec::new();
		self.collect_labels(&mut result);
		result
	}

	fn collect_labels<'a>(&'a self, result: &mut Vec<&'a str>) {
		for instruction in &self.step_instructions {
			if let Some(label) = &instruction.label {
				result.push(label.as_str());
			}
			for nested in instruction.arguments.iter().filter_map(Argument::as_bytecode) {
				nested.collect_labels(result);
			}
		}
	}
}

impl Display for Bytecode {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str("[")?;
		let sources = self.source_instructions.iter().map(|i| i as &dyn Display);
		let steps = self.step_instructions.iter().map(|i| i as &dyn Display);
		for (i, instruction) in sources.chain(steps).enumerate() {
			if i > 0 {
				f.write_str(", ")?;
			}
			write!(f, "{}", instruction)?;
		}
		f.write_str("]")
	}
}

#[cfg(test)]
mod tests {
	use strand_type::Value;

	use super::*;
	use crate::Token;

	#[test]
	fn test_last_instruction_on_empty_bytecode() {
		let mut bytecode = Bytecode::new();
		let err = bytecode.last_instruction_mut().unwrap_err();
		assert_eq!(err.code, "BYTECODE_001");
	}

	#[test]
	fn test_label_targets_last_instruction() {
		let mut bytecode = Bytecode::new();
		bytecode.add_instruction(Coefficient::unity(), Operator::Map, ["x -> x + 1".into()]);
		bytecode.add_instruction(Coefficient::unity(), Operator::Filter, ["x > 2".into()]);
		bytecode.last_instruction_mut().unwrap().add_label("a").unwrap();

		assert_eq!(bytecode.step_instructions[0].label, None);
		assert_eq!(bytecode.step_instructions[1].label.as_deref(), Some("a"));
	}

	#[test]
	fn test_second_label_rejected() {
		let mut bytecode = Bytecode::new();
		bytecode.add_instruction(Coefficient::unity(), Operator::Map, ["traverser::object".into()]);
		let instruction = bytecode.last_instruction_mut().unwrap();
		instruction.add_label("a").unwrap();
		let err = instruction.add_label("b").unwrap_err();
		assert_eq!(err.code, "BYTECODE_006");
		assert_eq!(instruction.label.as_deref(), Some("a"));
	}

	#[test]
	fn test_nested_labels_and_operators() {
		let mut body = Bytecode::new();
		body.add_instruction(Coefficient::unity(), Operator::Map, ["x -> x * 2".into()]);
		body.last_instruction_mut().unwrap().add_label("inner").unwrap();
		body.add_instruction(Coefficient::unity(), Operator::Path, []);

		let mut bytecode = Bytecode::new();
		bytecode.add_instruction(Coefficient::unity(), Operator::Repeat, [Token::Repeat.into(), body.into()]);

		assert!(bytecode.contains_operator(Operator::Path));
		assert!(!bytecode.contains_operator(Operator::Barrier));
		assert_eq!(bytecode.labels(), vec!["inner"]);
	}

	#[test]
	fn test_display() {
		let mut bytecode = Bytecode::new();
		bytecode.add_source_instruction(SourceOperator::WithProcessor, ["pipes".into()]);
		bytecode.add_instruction(Coefficient::unity(), Operator::Inject, [Value::int8(1).into()]);
		bytecode.add_instruction(Coefficient::new(2), Operator::Map, ["x -> x + 1".into()]);
		bytecode.last_instruction_mut().unwrap().add_label("a").unwrap();

		assert_eq!(bytecode.to_string(), r#"[with_processor("pipes"), inject(1), 2*map("x -> x + 1")@a]"#);
	}

	#[test]
	fn test_serde() {
		let mut body = Bytecode::new();
		body.add_instruction(Coefficient::unity(), Operator::Map, ["x -> x + 1".into()]);
		let mut bytecode = Bytecode::new();
		bytecode.add_instruction(
			Coefficient::new(3),
			Operator::Repeat,
			[Token::Repeat.into(), body.into(), Token::Until.into(), Value::int8(3).into()],
		);

		let json = serde_json::to_string(&bytecode).unwrap();
		let back: Bytecode = serde_json::from_str(&json).unwrap();
		assert_eq!(bytecode, back);
	}
}

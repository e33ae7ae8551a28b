// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use crate::error::diagnostic::Diagnostic;

pub fn no_instruction() -> Diagnostic {
	Diagnostic {
		code: "BYTECODE_001".to_string(),
		message: "bytecode has no instruction".to_string(),
		label: Some("the last instruction was requested from empty bytecode".to_string()),
		help: Some("add a step before labeling or modulating it".to_string()),
		notes: vec!["labels and modulators always target the most recently added instruction".to_string()],
		cause: None,
	}
}

pub fn unknown_operator(name: &str) -> Diagnostic {
	Diagnostic {
		code: "BYTECODE_002".to_string(),
		message: format!("unknown operator '{}'", name),
		label: Some("this operator is not part of the instruction set".to_string()),
		help: Some(
			"use one of: inject, map, filter, flatmap, reduce, branch, repeat, barrier, path, groupcount, join, incr, explain"
				.to_string(),
		),
		notes: vec![],
		cause: None,
	}
}

pub fn invalid_argument(operator: &str, detail: impl Into<String>) -> Diagnostic {
	let detail = detail.into();
	Diagnostic {
		code: "BYTECODE_003".to_string(),
		message: format!("invalid argument for '{}'", operator),
		label: Some(detail),
		help: None,
		notes: vec![],
		cause: None,
	}
}

pub fn missing_argument(operator: &str, expected: &str) -> Diagnostic {
	Diagnostic {
		code: "BYTECODE_004".to_string(),
		message: format!("missing argument for '{}'", operator),
		label: Some(format!("expected {}", expected)),
		help: None,
		notes: vec![],
		cause: None,
	}
}

pub fn unresolved_label(label: &str) -> Diagnostic {
	Diagnostic {
		code: "BYTECODE_005".to_string(),
		message: format!("label '{}' is not defined", label),
		label: Some("no instruction carries this label".to_string()),
		help: Some("label a step with as(...) before referring to it".to_string()),
		notes: vec![],
		cause: None,
	}
}

pub fn duplicate_label(existing: &str, label: &str) -> Diagnostic {
	Diagnostic {
		code: "BYTECODE_006".to_string(),
		message: format!("instruction is already labeled '{}'", existing),
		label: Some(format!("cannot add second label '{}'", label)),
		help: None,
		notes: vec!["multiple labels per step are not supported".to_string()],
		cause: None,
	}
}

pub fn unknown_function(operator: &str, name: &str) -> Diagnostic {
	Diagnostic {
		code: "BYTECODE_007".to_string(),
		message: format!("unknown function '{}' for '{}'", name, operator),
		label: Some("this name does not resolve to a built-in function".to_string()),
		help: None,
		notes: vec![],
		cause: None,
	}
}

pub fn unknown_strategy(name: &str) -> Diagnostic {
	Diagnostic {
		code: "BYTECODE_008".to_string(),
		message: format!("unknown strategy '{}'", name),
		label: Some("source instruction names a strategy the machine does not provide".to_string()),
		help: Some("use one of: explain, pipes, dataflow".to_string()),
		notes: vec![],
		cause: None,
	}
}

pub fn misplaced_instruction(operator: &str, detail: &str) -> Diagnostic {
	Diagnostic {
		code: "BYTECODE_009".to_string(),
		message: format!("misplaced '{}' instruction", operator),
		label: Some(detail.to_string()),
		help: None,
		notes: vec![],
		cause: None,
	}
}

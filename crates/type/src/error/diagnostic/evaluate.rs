// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use crate::error::diagnostic::Diagnostic;

pub fn expression_syntax(source: &str, detail: impl Into<String>) -> Diagnostic {
	Diagnostic {
		code: "EVALUATE_001".to_string(),
		message: format!("cannot parse expression '{}'", source),
		label: Some(detail.into()),
		help: Some("lambdas look like 'x -> x + 1' or 'x > 2'".to_string()),
		notes: vec![],
		cause: None,
	}
}

pub fn operator_not_applicable(operator: &str, left: &str, right: &str) -> Diagnostic {
	Diagnostic {
		code: "EVALUATE_002".to_string(),
		message: format!("cannot apply '{}' to {} and {}", operator, left, right),
		label: None,
		help: None,
		notes: vec![],
		cause: None,
	}
}

pub fn unary_not_applicable(operator: &str, operand: &str) -> Diagnostic {
	Diagnostic {
		code: "EVALUATE_002".to_string(),
		message: format!("cannot apply '{}' to {}", operator, operand),
		label: None,
		help: None,
		notes: vec![],
		cause: None,
	}
}

pub fn key_not_found(key: &str) -> Diagnostic {
	Diagnostic {
		code: "EVALUATE_003".to_string(),
		message: format!("key '{}' not found", key),
		label: Some("the dictionary has no entry for this key".to_string()),
		help: None,
		notes: vec![],
		cause: None,
	}
}

pub fn division_by_zero() -> Diagnostic {
	Diagnostic {
		code: "EVALUATE_004".to_string(),
		message: "division by zero".to_string(),
		label: None,
		help: None,
		notes: vec![],
		cause: None,
	}
}

pub fn integer_overflow(operator: &str) -> Diagnostic {
	Diagnostic {
		code: "EVALUATE_005".to_string(),
		message: format!("integer overflow in '{}'", operator),
		label: None,
		help: None,
		notes: vec![],
		cause: None,
	}
}

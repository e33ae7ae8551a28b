// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use crate::error::diagnostic::Diagnostic;

pub fn exhausted() -> Diagnostic {
	Diagnostic {
		code: "ITERATOR_001".to_string(),
		message: "next() called on an exhausted iterator".to_string(),
		label: Some("has_next() would have returned false".to_string()),
		help: Some("call has_next() before next()".to_string()),
		notes: vec![],
		cause: None,
	}
}

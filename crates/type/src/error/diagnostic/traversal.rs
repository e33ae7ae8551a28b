// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use crate::error::diagnostic::Diagnostic;

pub fn locked(operator: &str) -> Diagnostic {
	Diagnostic {
		code: "TRAVERSAL_001".to_string(),
		message: "traversal is locked".to_string(),
		label: Some(format!("'{}' was added after the traversal was compiled", operator)),
		help: Some("build a new traversal instead of modifying one that is being iterated".to_string()),
		notes: vec![],
		cause: None,
	}
}

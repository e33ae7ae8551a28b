// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use crate::error::diagnostic::Diagnostic;

pub fn dead_end() -> Diagnostic {
	Diagnostic {
		code: "REPEAT_001".to_string(),
		message: "repeat has no reachable termination".to_string(),
		label: Some("no until() or times() condition is configured".to_string()),
		help: Some("add until(...) or times(n), or configure a loop limit on the machine".to_string()),
		notes: vec!["emit() produces extra output but never ends the loop".to_string()],
		cause: None,
	}
}

pub fn loop_limit_exceeded(limit: u32) -> Diagnostic {
	Diagnostic {
		code: "REPEAT_002".to_string(),
		message: format!("traverser exceeded the loop limit of {}", limit),
		label: Some("the repeat body was entered more often than allowed".to_string()),
		help: Some("check the until() condition or raise the configured loop limit".to_string()),
		notes: vec![],
		cause: None,
	}
}

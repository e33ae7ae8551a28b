// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter, Write};

use serde::{Deserialize, Serialize};

pub mod bytecode;
pub mod evaluate;
pub mod iterator;
pub mod repeat;
pub mod traversal;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
	pub code: String,
	pub message: String,
	pub label: Option<String>,
	pub help: Option<String>,
	pub notes: Vec<String>,
	pub cause: Option<Box<Diagnostic>>,
}

impl Display for Diagnostic {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_fmt(format_args!("{}", self.code))
	}
}

pub struct DefaultRenderer;

impl DefaultRenderer {
	pub fn render_string(diagnostic: &Diagnostic) -> String {
		let mut output = String::new();
		Self::render(&mut output, diagnostic, 0);
		output
	}

	fn render(output: &mut String, diagnostic: &Diagnostic, depth: usize) {
		let indent = "  ".repeat(depth);

		let _ = writeln!(output, "{indent}Error {}", diagnostic.code);
		let _ = writeln!(output, "{indent}  {}", diagnostic.message);

		if let Some(label) = &diagnostic.label {
			let _ = writeln!(output, "{indent}  --> {}", label);
		}

		if let Some(help) = &diagnostic.help {
			let _ = writeln!(output, "{indent}help: {}", help);
		}

		for note in &diagnostic.notes {
			let _ = writeln!(output, "{indent}note: {}", note);
		}

		if let Some(cause) = &diagnostic.cause {
			let _ = writeln!(output, "{indent}caused by:");
			Self::render(output, cause, depth + 1);
		}
	}
}

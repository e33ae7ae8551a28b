// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use strand_bytecode::{Argument, Bytecode, Coefficient, Operator, SourceOperator, Token};
use strand_machine::{Compilation, MachineConfig};
use strand_type::Value;

fn bytecode(instructions: Vec<(Operator, Vec<Argument>)>) -> Bytecode {
	let mut bytecode = Bytecode::new();
	for (operator, arguments) in instructions {
		bytecode.add_instruction(Coefficient::unity(), operator, arguments);
	}
	bytecode
}

fn compile_error(bytecode: Bytecode) -> String {
	Compilation::compile(bytecode).unwrap_err().code.clone()
}

#[test]
fn test_repeat_without_termination_is_a_dead_end() {
	let body = bytecode(vec![(Operator::Map, vec!["x -> x + 1".into()])]);
	let emit_only = bytecode(vec![(
		Operator::Repeat,
		vec![Token::Repeat.into(), body.into(), Token::Emit.into(), Value::Boolean(true).into()],
	)]);
	assert_eq!(compile_error(emit_only.clone()), "REPEAT_001");

	let config = MachineConfig::new().with_loop_limit(10);
	assert!(Compilation::compile_with(emit_only, &config).is_ok());
}

#[test]
fn test_repeat_without_body() {
	let bytecode = bytecode(vec![(Operator::Repeat, vec![Token::Until.into(), 3i64.into()])]);
	assert_eq!(compile_error(bytecode), "BYTECODE_004");
}

#[test]
fn test_repeat_with_too_many_checks() {
	let body = bytecode(vec![(Operator::Map, vec!["x -> x + 1".into()])]);
	let bytecode = bytecode(vec![(
		Operator::Repeat,
		vec![
			Token::Repeat.into(),
			body.into(),
			Token::Emit.into(),
			Value::Boolean(true).into(),
			Token::Until.into(),
			3i64.into(),
			Token::Emit.into(),
			"x > 1".into(),
		],
	)]);
	assert_eq!(compile_error(bytecode), "BYTECODE_003");
}

#[test]
fn test_unknown_function() {
	let bytecode = bytecode(vec![(Operator::Map, vec!["traverser::weight".into()])]);
	assert_eq!(compile_error(bytecode), "BYTECODE_007");
}

#[test]
fn test_unknown_strategy() {
	let mut bytecode = bytecode(vec![(Operator::Inject, vec![1i64.into()])]);
	bytecode.add_source_instruction(SourceOperator::WithStrategy, vec!["optimize".into()]);
	assert_eq!(compile_error(bytecode), "BYTECODE_008");
}

#[test]
fn test_unknown_processor() {
	let mut bytecode = bytecode(vec![(Operator::Inject, vec![1i64.into()])]);
	bytecode.add_source_instruction(SourceOperator::WithProcessor, vec!["spark".into()]);
	assert_eq!(compile_error(bytecode), "BYTECODE_003");
}

#[test]
fn test_misplaced_inject_and_explain() {
	let inject = bytecode(vec![(Operator::Map, vec!["x -> x".into()]), (Operator::Inject, vec![1i64.into()])]);
	assert_eq!(compile_error(inject), "BYTECODE_009");

	let explain = bytecode(vec![(Operator::Explain, vec![]), (Operator::Map, vec!["x -> x".into()])]);
	assert_eq!(compile_error(explain), "BYTECODE_009");
}

#[test]
fn test_unresolved_path_label() {
	let bytecode = bytecode(vec![(Operator::Inject, vec![1i64.into()]), (Operator::Path, vec!["a".into()])]);
	assert_eq!(compile_error(bytecode), "BYTECODE_005");
}

#[test]
fn test_lambda_syntax_error() {
	let bytecode = bytecode(vec![(Operator::Filter, vec!["x -> x >".into()])]);
	assert_eq!(compile_error(bytecode), "EVALUATE_001");
}

#[test]
fn test_invalid_reduce_operator() {
	let bytecode = bytecode(vec![(Operator::Reduce, vec!["avg".into()])]);
	assert_eq!(compile_error(bytecode), "BYTECODE_003");
}

#[test]
fn test_join_requires_kind_and_traversal() {
	let bytecode = bytecode(vec![(Operator::Join, vec![Token::Inner.into()])]);
	assert_eq!(compile_error(bytecode), "BYTECODE_004");
}

#[test]
fn test_next_on_exhausted_compilation() {
	let bytecode = bytecode(vec![(Operator::Inject, vec![1i64.into()])]);
	let mut compilation = Compilation::compile(bytecode).unwrap();
	assert_eq!(compilation.next().unwrap().object(), &Value::int8(1));
	assert!(!compilation.has_next().unwrap());
	assert_eq!(compilation.next().unwrap_err().code, "ITERATOR_001");
}

#[test]
fn test_runtime_evaluation_error() {
	let bytecode = bytecode(vec![(Operator::Inject, vec![1i64.into(), 0i64.into()]), (Operator::Map, vec!["x -> 1 / x".into()])]);
	let mut compilation = Compilation::compile(bytecode).unwrap();
	assert_eq!(compilation.next().unwrap().object(), &Value::int8(1));
	assert_eq!(compilation.has_next().unwrap_err().code, "EVALUATE_004");
}

#[test]
fn test_display() {
	let mut bytecode = bytecode(vec![(Operator::Inject, vec![1i64.into()]), (Operator::Map, vec!["x -> x + 1".into()])]);
	bytecode.last_instruction_mut().unwrap().add_label("a").unwrap();
	bytecode.add_instruction(Coefficient::new(2), Operator::Filter, vec!["gt".into(), 1i64.into()]);

	let compilation = Compilation::compile(bytecode).unwrap();
	assert_eq!(compilation.to_string(), "[inject(1), map(x -> x + 1)@a, 2*filter(gt 1)]");
}

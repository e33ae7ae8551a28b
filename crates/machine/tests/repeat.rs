// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use strand_bytecode::{Argument, Bytecode, Coefficient, Operator, Token};
use strand_machine::{Compilation, MachineConfig, ProcessorKind};
use strand_type::Value;

fn body(lambda: &str) -> Bytecode {
	let mut bytecode = Bytecode::new();
	bytecode.add_instruction(Coefficient::unity(), Operator::Map, [lambda.into()]);
	bytecode
}

fn repeat(starts: &[i64], arguments: Vec<Argument>) -> Bytecode {
	let mut bytecode = Bytecode::new();
	bytecode.add_instruction(Coefficient::unity(), Operator::Inject, starts.iter().map(|v| Argument::from(*v)));
	bytecode.add_instruction(Coefficient::unity(), Operator::Repeat, arguments);
	bytecode
}

fn run_with(bytecode: Bytecode, config: &MachineConfig) -> Vec<Value> {
	let mut compilation = Compilation::compile_with(bytecode, config).unwrap();
	let mut result = Vec::new();
	while compilation.has_next().unwrap() {
		let traverser = compilation.next().unwrap();
		for _ in 0..traverser.coefficient().count() {
			result.push(traverser.object().clone());
		}
	}
	result.sort();
	result
}

fn run_both(bytecode: Bytecode) -> Vec<Value> {
	let pipes = run_with(bytecode.clone(), &MachineConfig::new());
	let dataflow = run_with(bytecode, &MachineConfig::new().with_processor(ProcessorKind::Dataflow));
	assert_eq!(pipes, dataflow);
	pipes
}

fn values(values: &[i64]) -> Vec<Value> {
	values.iter().map(|v| Value::int8(*v)).collect()
}

#[test]
fn test_times_after_body() {
	let bytecode = repeat(&[0], vec![Token::Repeat.into(), body("x -> x + 1").into(), Token::Until.into(), 3i64.into()]);
	assert_eq!(run_both(bytecode), values(&[3]));
}

#[test]
fn test_times_before_body() {
	let bytecode = repeat(&[0], vec![Token::Until.into(), 3i64.into(), Token::Repeat.into(), body("x -> x + 1").into()]);
	assert_eq!(run_both(bytecode), values(&[3]));
}

#[test]
fn test_times_emits_every_input_once() {
	let before: Vec<Argument> = vec![Token::Until.into(), 2i64.into(), Token::Repeat.into(), body("x -> x + 10").into()];
	let after: Vec<Argument> = vec![Token::Repeat.into(), body("x -> x + 10").into(), Token::Until.into(), 2i64.into()];
	for arguments in [before, after] {
		assert_eq!(run_both(repeat(&[1, 2, 3], arguments)), values(&[21, 22, 23]));
	}
}

#[test]
fn test_times_zero() {
	let before = repeat(&[5], vec![Token::Until.into(), 0i64.into(), Token::Repeat.into(), body("x -> x + 1").into()]);
	assert_eq!(run_both(before), values(&[5]));

	let after = repeat(&[5], vec![Token::Repeat.into(), body("x -> x + 1").into(), Token::Until.into(), 0i64.into()]);
	assert_eq!(run_both(after), values(&[6]));
}

#[test]
fn test_until_traversal() {
	let mut condition = Bytecode::new();
	condition.add_instruction(Coefficient::unity(), Operator::Filter, ["x >= 8".into()]);

	let bytecode = repeat(&[1], vec![Token::Repeat.into(), body("x -> x * 2").into(), Token::Until.into(), condition.into()]);
	assert_eq!(run_both(bytecode), values(&[8]));
}

#[test]
fn test_until_lambda_before_body() {
	let bytecode = repeat(&[1, 9], vec![Token::Until.into(), "x >= 8".into(), Token::Repeat.into(), body("x -> x * 2").into()]);
	assert_eq!(run_both(bytecode), values(&[8, 9]));
}

#[test]
fn test_emit_after_body() {
	let bytecode = repeat(
		&[0],
		vec![
			Token::Repeat.into(),
			body("x -> x + 1").into(),
			Token::Emit.into(),
			Value::Boolean(true).into(),
			Token::Until.into(),
			3i64.into(),
		],
	);
	assert_eq!(run_both(bytecode), values(&[1, 2, 3, 3]));
}

#[test]
fn test_emit_before_body() {
	let bytecode = repeat(
		&[0],
		vec![
			Token::Emit.into(),
			Value::Boolean(true).into(),
			Token::Repeat.into(),
			body("x -> x + 1").into(),
			Token::Until.into(),
			2i64.into(),
		],
	);
	assert_eq!(run_both(bytecode), values(&[0, 1, 2]));
}

#[test]
fn test_emit_with_condition() {
	let bytecode = repeat(
		&[0],
		vec![
			Token::Repeat.into(),
			body("x -> x + 1").into(),
			Token::Emit.into(),
			"x % 2 == 0".into(),
			Token::Until.into(),
			5i64.into(),
		],
	);
	assert_eq!(run_both(bytecode), values(&[2, 4, 5]));
}

#[test]
fn test_loops_inside_body() {
	let mut loops = Bytecode::new();
	loops.add_instruction(Coefficient::unity(), Operator::Map, ["traverser::loops".into()]);

	let bytecode = repeat(&[0], vec![Token::Repeat.into(), loops.into(), Token::Until.into(), 3i64.into()]);
	assert_eq!(run_both(bytecode), values(&[3]));
}

#[test]
fn test_nested_repeat() {
	let mut inner_body = Bytecode::new();
	inner_body.add_instruction(
		Coefficient::unity(),
		Operator::Repeat,
		[Token::Repeat.into(), body("x -> x + 1").into(), Token::Until.into(), 2i64.into()],
	);

	let bytecode =
		repeat(&[0], vec![Token::Repeat.into(), inner_body.into(), Token::Until.into(), 3i64.into()]);
	assert_eq!(run_both(bytecode), values(&[6]));
}

#[test]
fn test_coefficient_survives_loop() {
	let mut bytecode = Bytecode::new();
	bytecode.add_instruction(Coefficient::new(4), Operator::Inject, [Argument::from(1i64)]);
	bytecode.add_instruction(
		Coefficient::unity(),
		Operator::Repeat,
		[Token::Repeat.into(), body("x -> x * 3").into(), Token::Until.into(), 2i64.into()],
	);
	assert_eq!(run_both(bytecode), values(&[9, 9, 9, 9]));
}

#[test]
fn test_loop_limit_terminates_emit_only_repeat() {
	let bytecode = repeat(
		&[0],
		vec![Token::Repeat.into(), body("x -> x + 1").into(), Token::Emit.into(), Value::Boolean(true).into()],
	);
	let config = MachineConfig::new().with_loop_limit(3);
	let mut compilation = Compilation::compile_with(bytecode, &config).unwrap();

	let mut emitted = Vec::new();
	let err = loop {
		match compilation.has_next() {
			Ok(true) => emitted.push(compilation.next().unwrap().into_object()),
			Ok(false) => panic!("loop limit should end iteration with an error"),
			Err(err) => break err,
		}
	};
	assert_eq!(err.code, "REPEAT_002");
	assert_eq!(emitted, values(&[1, 2]));
}

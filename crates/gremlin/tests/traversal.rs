// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use strand_gremlin::{P, Token, Traversal, TraversalSource, __};
use strand_machine::{MachineConfig, ProcessorKind};
use strand_type::{Result, Value};
use tracing_subscriber::EnvFilter;

fn g() -> TraversalSource {
	let _ = tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).with_test_writer().try_init();
	TraversalSource::new()
}

fn values(values: &[i64]) -> Vec<Value> {
	values.iter().map(|v| Value::int8(*v)).collect()
}

fn sorted(mut traversal: Traversal) -> Vec<Value> {
	let mut result = traversal.to_list().unwrap();
	result.sort();
	result
}

#[test]
fn test_map_filter_count() {
	let mut traversal = g().inject([1, 2, 3, 4]).map("x -> x + 1").filter("x > 2").count();
	assert_eq!(traversal.to_list().unwrap(), values(&[3]));
}

#[test]
fn test_repeat_times() {
	let traversal = g().inject([0]).repeat(__.map("x -> x + 1")).times(3);
	assert_eq!(sorted(traversal), values(&[3]));
}

#[test]
fn test_times_before_repeat() {
	let traversal = g().inject([0, 10]).times(2).repeat(__.map("x -> x + 1"));
	assert_eq!(sorted(traversal), values(&[2, 12]));
}

#[test]
fn test_repeat_until() {
	let traversal = g().inject([1]).repeat(__.map("x -> x * 2")).until(__.filter("x >= 8"));
	assert_eq!(sorted(traversal), values(&[8]));
}

#[test]
fn test_repeat_emit() {
	let traversal = g().inject([0]).repeat(__.map("x -> x + 1")).emit().times(3);
	assert_eq!(sorted(traversal), values(&[1, 2, 3, 3]));

	let conditional = g().inject([0]).repeat(__.map("x -> x + 1")).emit_when("x % 2 == 0").times(5);
	assert_eq!(sorted(conditional), values(&[2, 4, 5]));
}

#[test]
fn test_loop_limit_from_config() {
	let g = g().with_config(MachineConfig::new().with_loop_limit(3));
	let err = g.inject([0]).repeat(__.map("x -> x + 1")).emit().to_list().unwrap_err();
	assert_eq!(err.code, "REPEAT_002");

	let err = TraversalSource::new().inject([0]).repeat(__.map("x -> x + 1")).emit().to_list().unwrap_err();
	assert_eq!(err.code, "REPEAT_001");
}

#[test]
fn test_coefficient_replay() {
	let mut traversal = g().inject([7]).c(3);
	for _ in 0..3 {
		assert!(traversal.has_next().unwrap());
		assert_eq!(traversal.next().unwrap(), Value::int8(7));
	}
	assert!(!traversal.has_next().unwrap());
	assert_eq!(traversal.next().unwrap_err().code, "ITERATOR_001");
}

#[test]
fn test_next_traverser_keeps_coefficient() {
	let mut traversal = g().inject([7]).c(3);
	let traverser = traversal.next_traverser().unwrap();
	assert_eq!(traverser.object(), &Value::int8(7));
	assert_eq!(traverser.coefficient().count(), 3);
	assert!(!traversal.has_next().unwrap());
}

#[test]
fn test_sum_and_count_weigh_coefficients() {
	let mut sum = g().inject([1, 2, 3]).c(2).sum();
	assert_eq!(sum.to_list().unwrap(), values(&[12]));

	let mut count = g().inject([1, 2, 3]).c(2).count();
	assert_eq!(count.to_list().unwrap(), values(&[6]));
}

#[test]
fn test_traversal_locks_on_first_iteration() {
	let mut traversal = g().inject([1, 2]).map("x -> x + 1");
	assert!(!traversal.is_locked());
	assert_eq!(traversal.next().unwrap(), Value::int8(2));
	assert!(traversal.is_locked());

	let mut traversal = traversal.map("x -> x * 2");
	assert_eq!(traversal.has_next().unwrap_err().code, "TRAVERSAL_001");
	assert_eq!(traversal.next().unwrap_err().code, "TRAVERSAL_001");
}

#[test]
fn test_builder_errors_are_deferred() {
	let err = g().inject([1]).map(__.start().as_("a")).to_list().unwrap_err();
	assert_eq!(err.code, "BYTECODE_001");

	let err = g().inject([1]).as_("a").as_("b").to_list().unwrap_err();
	assert_eq!(err.code, "BYTECODE_006");
}

#[test]
fn test_iterator_ends_after_error() {
	let traversal = g().inject([1, 0]).map("x -> 1 / x");
	let items: Vec<Result<Value>> = traversal.collect();
	assert_eq!(items.len(), 2);
	assert_eq!(items[0].as_ref().unwrap(), &Value::int8(1));
	assert_eq!(items[1].as_ref().unwrap_err().code, "EVALUATE_004");
}

#[test]
fn test_iterator_collects() {
	let doubled: Result<Vec<Value>> = g().inject([1, 2, 3]).map("x -> x * 2").collect();
	assert_eq!(doubled.unwrap(), values(&[2, 4, 6]));
}

#[test]
fn test_is_and_predicates() {
	assert_eq!(sorted(g().inject([1, 2, 3]).is(2)), values(&[2]));
	assert_eq!(sorted(g().inject([1, 2, 3]).is_p(P::gte(2))), values(&[2, 3]));
	assert_eq!(sorted(g().inject([1, 2, 3]).filter(P::neq(2))), values(&[1, 3]));
}

#[test]
fn test_predicate_against_traversal() {
	let traversal = g().inject([1, 5, 9]).is_p(P::gt(__.inject([4])));
	assert_eq!(sorted(traversal), values(&[5, 9]));
}

#[test]
fn test_choose() {
	let traversal = g().inject([1, 2, 3, 4]).choose(__.is_p(P::gt(2)), __.map("x -> x * 10"));
	assert_eq!(sorted(traversal), values(&[30, 40]));

	let traversal = g().inject([1, 2, 3, 4]).choose_or("x > 2", __.map("x -> x * 10"), __.map("x -> x - 1"));
	assert_eq!(sorted(traversal), values(&[0, 1, 30, 40]));
}

#[test]
fn test_union() {
	let traversal = g().inject([1]).union([__.map("x -> x + 1"), __.map("x -> x + 2"), __.identity()]);
	assert_eq!(sorted(traversal), values(&[1, 2, 3]));
}

#[test]
fn test_constant_and_unfold() {
	assert_eq!(sorted(g().inject([1, 2]).constant("a")), vec![Value::utf8("a"), Value::utf8("a")]);
	assert_eq!(sorted(g().inject([Value::list([3, 1, 2])]).unfold()), values(&[1, 2, 3]));
}

#[test]
fn test_has_and_has_key() {
	let marko = Value::dictionary([("name", Value::utf8("marko")), ("age", Value::int8(29))]);
	let lop = Value::dictionary([("name", Value::utf8("lop")), ("lang", Value::utf8("java"))]);

	let mut has = g().inject([marko.clone(), lop.clone()]).has("name", "marko");
	assert_eq!(has.to_list().unwrap(), vec![marko.clone()]);

	let mut has_key = g().inject([marko, lop.clone()]).has_key("lang");
	assert_eq!(has_key.to_list().unwrap(), vec![lop]);
}

#[test]
fn test_join() {
	let people = __.inject([
		Value::dictionary([("id", 1), ("age", 29)]),
		Value::dictionary([("id", 2), ("age", 27)]),
	]);
	let names = [
		Value::dictionary([("id", Value::int8(1)), ("name", Value::utf8("marko"))]),
		Value::dictionary([("id", Value::int8(3)), ("name", Value::utf8("josh"))]),
	];

	let mut inner = g().inject(names).join(Token::Inner, people);
	let marko = Value::dictionary([("id", Value::int8(1)), ("name", Value::utf8("marko")), ("age", Value::int8(29))]);
	assert_eq!(inner.to_list().unwrap(), vec![marko]);
}

#[test]
fn test_group_count_by() {
	let mut traversal = g().inject([1, 2, 3, 4, 5]).group_count().by("x -> x % 2 == 0");
	assert_eq!(traversal.to_list().unwrap(), vec![Value::dictionary([(false, 3), (true, 2)])]);
}

#[test]
fn test_barrier_bulks_equal_objects() {
	let mut traversal = g().inject([1, 1, 2, 1]).barrier();
	let traverser = traversal.next_traverser().unwrap();
	assert_eq!(traverser.object(), &Value::int8(1));
	assert_eq!(traverser.coefficient().count(), 3);
	assert_eq!(traversal.to_list().unwrap(), values(&[2]));
}

#[test]
fn test_path_labels() {
	let traversal = g().inject([1]).map("x -> x + 1").as_("a").map("x -> x * 10").as_("b");
	let mut labelled = traversal.path_labels(["b", "a"]);
	assert_eq!(labelled.to_list().unwrap(), vec![Value::list([20, 2])]);

	let mut full = g().inject([1]).incr().path();
	assert_eq!(full.to_list().unwrap(), vec![Value::list([1, 2])]);

	let err = g().inject([1]).path_labels(["a"]).to_list().unwrap_err();
	assert_eq!(err.code, "BYTECODE_005");
}

#[test]
fn test_loops_inside_repeat() {
	let traversal = g().inject([0]).repeat(__.loops()).times(3);
	assert_eq!(sorted(traversal), values(&[3]));
}

#[test]
fn test_processors_agree() {
	let build = |g: TraversalSource| {
		g.inject([1, 2, 3])
			.union([__.map("x -> x * 2"), __.repeat(__.incr()).times(2)])
			.filter("x > 2")
			.group_count()
	};
	let pipes = build(g()).to_list().unwrap();
	let dataflow = build(g().with_processor(ProcessorKind::Dataflow)).to_list().unwrap();
	assert_eq!(pipes, vec![Value::dictionary([(4, 2), (6, 1), (3, 1), (5, 1)])]);
	assert_eq!(pipes, dataflow);
}

#[test]
fn test_explain() {
	let mut traversal = g().inject([1]).map("x -> x + 1").explain();
	let result = traversal.to_list().unwrap();
	assert_eq!(result.len(), 1);
	let description = result[0].as_utf8().unwrap();
	assert!(description.starts_with("bytecode    ["));
	assert!(description.contains("\nprocessor   pipes"));

	let mut traversal = g().with_processor(ProcessorKind::Dataflow).with_strategy("explain").inject([1]).identity();
	let result = traversal.to_list().unwrap();
	assert_eq!(result.len(), 1);
	assert!(result[0].as_utf8().unwrap().ends_with("processor   dataflow"));
}

#[test]
fn test_explain_must_be_last() {
	let err = g().inject([1]).explain().identity().to_list().unwrap_err();
	assert_eq!(err.code, "BYTECODE_009");
}

#[test]
fn test_display() {
	let traversal = g().inject([1]).map("x -> x + 1").as_("a");
	assert_eq!(traversal.to_string(), "[inject(1), map(\"x -> x + 1\")@a]");
}

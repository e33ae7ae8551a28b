// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::{Debug, Display, Formatter};

use strand_bytecode::{Argument, Bytecode, Coefficient, Instruction, Oper, Operator, Pred, SourceOperator, Token};
use strand_type::{
	Result, Value,
	error::diagnostic::{
		bytecode::{invalid_argument, misplaced_instruction, missing_argument, unknown_function, unknown_strategy, unresolved_label},
		iterator::exhausted,
		repeat::dead_end,
	},
	return_error,
};
use tracing::{debug, instrument};

use crate::{
	config::MachineConfig,
	expression::Lambda,
	function::{
		BarrierFunction, BranchFunction, CheckKind, FilterFunction, FlatMapFunction, Function, FunctionKind,
		JoinFunction, JoinKind, LoopCheck, LoopCondition, LoopLocation, MapFunction, Operand, ReduceFunction,
		RepeatBranch,
	},
	processor::{MachineProcessor, Processor},
	traverser::{LoopId, Traverser, TraverserFactory},
};

/// A compiled bytecode.
///
/// The processor executing it is created on first demand and reused afterwards. Cloning a
/// compilation yields an independent pipeline that has not started yet.
pub struct Compilation {
	bytecode: Bytecode,
	functions: Vec<Function>,
	starts: Vec<Traverser>,
	factory: TraverserFactory,
	config: MachineConfig,
	processor: Option<MachineProcessor>,
}

impl Compilation {
	pub fn compile(bytecode: Bytecode) -> Result<Self> {
		Self::compile_with(bytecode, &MachineConfig::default())
	}

	#[instrument(name = "machine::compile", level = "debug", skip_all)]
	pub fn compile_with(bytecode: Bytecode, config: &MachineConfig) -> Result<Self> {
		let labels: Vec<String> = bytecode.labels().into_iter().map(str::to_string).collect();
		let factory = if bytecode.contains_operator(Operator::Path) {
			TraverserFactory::Path
		} else {
			TraverserFactory::Object
		};

		let mut compiler = Compiler {
			config,
			factory,
			labels: &labels,
			next_loop: 0,
		};
		let compilation = compiler.compile(bytecode)?;

		debug!(
			processor = %compilation.config.processor,
			steps = compilation.functions.len(),
			loops = compiler.next_loop,
			tracks_path = factory.tracks_path(),
			"compiled bytecode"
		);
		Ok(compilation)
	}

	pub fn bytecode(&self) -> &Bytecode {
		&self.bytecode
	}

	pub fn functions(&self) -> &[Function] {
		&self.functions
	}

	pub fn config(&self) -> &MachineConfig {
		&self.config
	}

	pub fn factory(&self) -> TraverserFactory {
		self.factory
	}

	fn processor(&mut self) -> &mut MachineProcessor {
		self.processor.get_or_insert_with(|| {
			MachineProcessor::new(
				self.config.processor,
				self.functions.clone(),
				self.starts.clone(),
				self.factory,
			)
		})
	}

	pub fn has_next(&mut self) -> Result<bool> {
		self.processor().has_next()
	}

	pub fn next(&mut self) -> Result<Traverser> {
		let processor = self.processor();
		if !processor.has_next()? {
			return_error!(exhausted());
		}
		processor.next()
	}

	pub fn add_start(&mut self, traverser: Traverser) {
		self.processor().add_start(traverser);
	}

	pub fn reset(&mut self) {
		if let Some(processor) = &mut self.processor {
			processor.reset();
		}
	}

	/// Starts a fresh run for `traverser`. A bytecode with its own `inject` ignores the traverser.
	fn feed(&mut self, traverser: Traverser) {
		self.reset();
		if self.starts.is_empty() {
			self.add_start(traverser);
		}
	}

	/// Whether the pipeline produces anything for `traverser`.
	pub fn filter_traverser(&mut self, traverser: Traverser) -> Result<bool> {
		self.feed(traverser);
		self.has_next()
	}

	/// The first result of the pipeline for `traverser`.
	pub fn map_traverser(&mut self, traverser: Traverser) -> Result<Option<Traverser>> {
		self.feed(traverser);
		if self.has_next()? {
			Ok(Some(self.next()?))
		} else {
			Ok(None)
		}
	}

	/// Every result of the pipeline for `traverser`.
	pub fn flat_map_traverser(&mut self, traverser: Traverser) -> Result<Vec<Traverser>> {
		self.feed(traverser);
		let mut result = Vec::new();
		while self.has_next()? {
			result.push(self.next()?);
		}
		Ok(result)
	}

	/// Human readable description of the compiled pipeline.
	pub fn explain(&self) -> String {
		format!("bytecode    {}\ncompilation {}\nprocessor   {}", self.bytecode, self, self.config.processor)
	}
}

impl Clone for Compilation {
	fn clone(&self) -> Self {
		Self {
			bytecode: self.bytecode.clone(),
			functions: self.functions.clone(),
			starts: self.starts.clone(),
			factory: self.factory,
			config: self.config.clone(),
			processor: None,
		}
	}
}

impl Debug for Compilation {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Compilation")
			.field("bytecode", &self.bytecode.to_string())
			.field("config", &self.config)
			.field("started", &self.processor.is_some())
			.finish()
	}
}

impl Display for Compilation {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str("[")?;
		let mut first = true;
		if !self.starts.is_empty() {
			f.write_str("inject(")?;
			for (i, start) in self.starts.iter().enumerate() {
				if i > 0 {
					f.write_str(", ")?;
				}
				write!(f, "{}", start)?;
			}
			f.write_str(")")?;
			first = false;
		}
		for function in &self.functions {
			if !first {
				f.write_str(", ")?;
			}
			write!(f, "{}", function)?;
			first = false;
		}
		f.write_str("]")
	}
}

struct Compiler<'a> {
	config: &'a MachineConfig,
	factory: TraverserFactory,
	labels: &'a [String],
	next_loop: usize,
}

impl Compiler<'_> {
	fn compile(&mut self, bytecode: Bytecode) -> Result<Compilation> {
		let mut config = self.config.clone();
		let mut explain = false;
		for source in &bytecode.source_instructions {
			let name = source.arguments.first().and_then(Argument::as_text);
			match (source.operator, name) {
				(SourceOperator::WithProcessor, Some(name)) => config.processor = name.parse()?,
				(SourceOperator::WithStrategy, Some("explain")) => explain = true,
				(SourceOperator::WithStrategy, Some(name)) => return_error!(unknown_strategy(name)),
				(operator, None) => return_error!(missing_argument(operator.as_str(), "a name")),
			}
		}

		let count = bytecode.step_instructions.len();
		let mut starts = Vec::new();
		let mut functions = Vec::with_capacity(count);
		for (index, instruction) in bytecode.step_instructions.iter().enumerate() {
			match instruction.operator {
				Operator::Inject if index == 0 => starts = self.starts(instruction)?,
				Operator::Inject => {
					return_error!(misplaced_instruction("inject", "inject must be the first instruction"))
				}
				Operator::Explain if index + 1 == count => explain = true,
				Operator::Explain => {
					return_error!(misplaced_instruction("explain", "explain must be the last instruction"))
				}
				_ => functions.push(Function {
					coefficient: instruction.coefficient,
					label: instruction.label.clone(),
					kind: self.function(instruction)?,
				}),
			}
		}

		let compilation = Compilation {
			bytecode,
			functions,
			starts,
			factory: self.factory,
			config,
			processor: None,
		};

		if !explain {
			return Ok(compilation);
		}

		let explanation = compilation.explain();
		let label = compilation.bytecode.last_instruction().and_then(|i| i.label.as_deref());
		let start = self.factory.create(Value::Utf8(explanation), Coefficient::unity(), label);
		Ok(Compilation {
			functions: Vec::new(),
			starts: vec![start],
			..compilation
		})
	}

	fn nested(&mut self, operator: Operator, argument: &Argument) -> Result<Box<Compilation>> {
		match argument {
			Argument::Bytecode(bytecode) => Ok(Box::new(self.compile(bytecode.clone())?)),
			other => {
				return_error!(invalid_argument(operator.as_str(), format!("expected a traversal, got {}", other.kind())))
			}
		}
	}

	fn starts(&self, instruction: &Instruction) -> Result<Vec<Traverser>> {
		let mut result = Vec::with_capacity(instruction.arguments.len());
		for argument in &instruction.arguments {
			let Some(value) = argument.as_value() else {
				return_error!(invalid_argument("inject", format!("expected a value, got {}", argument.kind())));
			};
			result.push(self.factory.create(value.clone(), instruction.coefficient, instruction.label.as_deref()));
		}
		Ok(result)
	}

	fn function(&mut self, instruction: &Instruction) -> Result<FunctionKind> {
		let arguments = instruction.arguments.as_slice();
		Ok(match instruction.operator {
			Operator::Map => FunctionKind::Map(self.map(Operator::Map, arguments)?),
			Operator::Filter => FunctionKind::Filter(self.filter(arguments)?),
			Operator::FlatMap => FunctionKind::FlatMap(self.flat_map(arguments)?),
			Operator::Reduce => FunctionKind::Reduce(self.reduce(arguments)?),
			Operator::Barrier => {
				if !arguments.is_empty() {
					return_error!(invalid_argument("barrier", "barrier takes no arguments"));
				}
				FunctionKind::Barrier(BarrierFunction::Bulk)
			}
			Operator::GroupCount => FunctionKind::Barrier(BarrierFunction::GroupCount(match arguments {
				[] => None,
				[_] => Some(Box::new(self.map(Operator::GroupCount, arguments)?)),
				_ => return_error!(invalid_argument("groupcount", "groupcount takes at most one key function")),
			})),
			Operator::Path => FunctionKind::Map(MapFunction::Path(self.path_labels(arguments)?)),
			Operator::Incr => FunctionKind::Map(MapFunction::Incr),
			Operator::Join => FunctionKind::FlatMap(FlatMapFunction::Join(self.join(arguments)?)),
			Operator::Branch => FunctionKind::Branch(self.branch(arguments)?),
			Operator::Repeat => FunctionKind::Repeat(self.repeat(arguments)?),
			Operator::Inject | Operator::Explain => {
				return_error!(misplaced_instruction(instruction.operator.as_str(), "not a step instruction"))
			}
		})
	}

	/// Text arguments of `map` resolve to a built-in function first, then to a lambda when they
	/// contain `->`, and are a constant otherwise.
	fn map(&mut self, operator: Operator, arguments: &[Argument]) -> Result<MapFunction> {
		let Some(first) = arguments.first() else {
			return_error!(missing_argument(operator.as_str(), "a function, a constant or a traversal"));
		};
		Ok(match first {
			Argument::Bytecode(_) => MapFunction::Traversal(self.nested(operator, first)?),
			Argument::Token(token) => {
				return_error!(invalid_argument(operator.as_str(), format!("unexpected token {}", token)))
			}
			Argument::Value(Value::Utf8(text)) => match text.as_str() {
				"traverser::object" => MapFunction::Object,
				"traverser::count" => MapFunction::Count,
				"traverser::loops" => MapFunction::Loops,
				"dictionary::get" => MapFunction::Get(self.operand(operator, arguments.get(1))?),
				text if text.contains("->") => MapFunction::Lambda(Lambda::parse(text)?),
				text if is_function_name(text) => return_error!(unknown_function(operator.as_str(), text)),
				_ => MapFunction::Constant(Value::Utf8(text.clone())),
			},
			Argument::Value(value) => MapFunction::Constant(value.clone()),
		})
	}

	fn filter(&mut self, arguments: &[Argument]) -> Result<FilterFunction> {
		Ok(match arguments {
			[Argument::Bytecode(_)] => FilterFunction::Traversal(self.nested(Operator::Filter, &arguments[0])?),
			[Argument::Value(Value::Utf8(name)), operand] => {
				let Some(pred) = Pred::parse(name) else {
					return_error!(invalid_argument("filter", format!("unknown predicate '{}'", name)));
				};
				FilterFunction::Compare(pred, self.operand(Operator::Filter, Some(operand))?)
			}
			[Argument::Value(Value::Utf8(text))] => FilterFunction::Lambda(Lambda::parse(text)?),
			[] => return_error!(missing_argument("filter", "a predicate, a lambda or a traversal")),
			_ => return_error!(invalid_argument("filter", "expected a predicate and operand, a lambda or a traversal")),
		})
	}

	fn flat_map(&mut self, arguments: &[Argument]) -> Result<FlatMapFunction> {
		Ok(match arguments {
			[Argument::Bytecode(_)] => FlatMapFunction::Traversal(self.nested(Operator::FlatMap, &arguments[0])?),
			[Argument::Value(Value::Utf8(text))] => match text.as_str() {
				"traverser::object" => FlatMapFunction::Unfold,
				"dictionary::keys" => FlatMapFunction::Keys,
				"dictionary::values" => FlatMapFunction::Values,
				text if !text.contains("->") && is_function_name(text) => {
					return_error!(unknown_function("flatmap", text))
				}
				text => FlatMapFunction::Lambda(Lambda::parse(text)?),
			},
			[] => return_error!(missing_argument("flatmap", "a function, a lambda or a traversal")),
			_ => return_error!(invalid_argument("flatmap", "expected a function, a lambda or a traversal")),
		})
	}

	fn reduce(&mut self, arguments: &[Argument]) -> Result<ReduceFunction> {
		let Some(oper) = arguments.first().and_then(Argument::as_text) else {
			return_error!(missing_argument("reduce", "a reduce operator"));
		};
		let oper: Oper = oper.parse()?;
		let seed = match arguments.get(1) {
			Some(Argument::Value(value)) => value.clone(),
			Some(other) => {
				return_error!(invalid_argument("reduce", format!("expected a seed value, got {}", other.kind())))
			}
			None => default_seed(oper),
		};
		Ok(ReduceFunction::new(oper, seed))
	}

	fn path_labels(&self, arguments: &[Argument]) -> Result<Vec<String>> {
		let mut labels = Vec::new();
		for argument in arguments {
			match argument.as_value() {
				Some(Value::Utf8(label)) => labels.push(label.clone()),
				Some(Value::List(items)) => {
					for item in items {
						let Value::Utf8(label) = item else {
							return_error!(invalid_argument("path", format!("expected a label, got {}", item.kind())));
						};
						labels.push(label.clone());
					}
				}
				_ => return_error!(invalid_argument("path", format!("expected labels, got {}", argument.kind()))),
			}
		}

		for label in &labels {
			if !self.labels.contains(label) {
				return_error!(unresolved_label(label));
			}
		}
		Ok(labels)
	}

	fn join(&mut self, arguments: &[Argument]) -> Result<JoinFunction> {
		let [Argument::Token(token), right] = arguments else {
			return_error!(missing_argument("join", "a join kind and a traversal"));
		};
		let Some(kind) = JoinKind::from_token(*token) else {
			return_error!(invalid_argument("join", format!("'{}' is not a join kind", token)));
		};
		Ok(JoinFunction {
			kind,
			right: self.nested(Operator::Join, right)?,
		})
	}

	fn branch(&mut self, arguments: &[Argument]) -> Result<BranchFunction> {
		if arguments.is_empty() || arguments.len() % 2 != 0 {
			return_error!(invalid_argument("branch", "expected pairs of guard and traversal"));
		}

		let mut branches = Vec::with_capacity(arguments.len() / 2);
		for pair in arguments.chunks(2) {
			let guard = match &pair[0] {
				Argument::Token(Token::Default) => None,
				Argument::Bytecode(_) => Some(FilterFunction::Traversal(self.nested(Operator::Branch, &pair[0])?)),
				Argument::Value(Value::Utf8(text)) => Some(FilterFunction::Lambda(Lambda::parse(text)?)),
				other => {
					return_error!(invalid_argument("branch", format!("expected a guard, got {}", other.kind())))
				}
			};
			branches.push((guard, self.nested(Operator::Branch, &pair[1])?));
		}
		Ok(BranchFunction::new(branches))
	}

	fn repeat(&mut self, arguments: &[Argument]) -> Result<RepeatBranch> {
		if arguments.len() % 2 != 0 {
			return_error!(invalid_argument("repeat", "expected pairs of marker and argument"));
		}

		let mut body = None;
		let mut checks = Vec::new();
		let (mut before, mut after) = (0, 0);
		for pair in arguments.chunks(2) {
			let kind = match &pair[0] {
				Argument::Token(Token::Repeat) => {
					if body.is_some() {
						return_error!(invalid_argument("repeat", "a repeat has exactly one loop body"));
					}
					body = Some(self.nested(Operator::Repeat, &pair[1])?);
					continue;
				}
				Argument::Token(Token::Until) => CheckKind::Until,
				Argument::Token(Token::Emit) => CheckKind::Emit,
				other => {
					return_error!(invalid_argument("repeat", format!("expected a loop marker, got {}", other)))
				}
			};

			let location = if body.is_none() {
				before += 1;
				LoopLocation::before(before - 1)
			} else {
				after += 1;
				LoopLocation::after(after - 1)
			};
			let Some(location) = location else {
				return_error!(invalid_argument("repeat", "at most two checks on each side of the loop body"));
			};

			checks.push(LoopCheck {
				location,
				kind,
				condition: self.loop_condition(kind, &pair[1])?,
			});
		}

		let Some(body) = body else {
			return_error!(missing_argument("repeat", "a loop body"));
		};
		if self.config.loop_limit.is_none() && !checks.iter().any(|check| check.kind == CheckKind::Until) {
			return_error!(dead_end());
		}

		let id = LoopId(self.next_loop);
		self.next_loop += 1;
		Ok(RepeatBranch::new(id, *body, checks, self.config.loop_limit))
	}

	fn loop_condition(&mut self, kind: CheckKind, argument: &Argument) -> Result<LoopCondition> {
		Ok(match (kind, argument) {
			(_, Argument::Bytecode(_)) => LoopCondition::Traversal(self.nested(Operator::Repeat, argument)?),
			(_, Argument::Value(Value::Boolean(true))) => LoopCondition::Always,
			(CheckKind::Until, Argument::Value(Value::Int8(n))) => match u32::try_from(*n) {
				Ok(n) => LoopCondition::Times(n),
				Err(_) => return_error!(invalid_argument("repeat", format!("cannot repeat {} times", n))),
			},
			(_, Argument::Value(Value::Utf8(text))) => LoopCondition::Lambda(Lambda::parse(text)?),
			(_, other) => {
				return_error!(invalid_argument("repeat", format!("expected a loop condition, got {}", other)))
			}
		})
	}

	fn operand(&mut self, operator: Operator, argument: Option<&Argument>) -> Result<Operand> {
		match argument {
			Some(argument @ Argument::Bytecode(_)) => Ok(Operand::Traversal(self.nested(operator, argument)?)),
			Some(Argument::Value(value)) => Ok(Operand::Constant(value.clone())),
			Some(Argument::Token(token)) => {
				return_error!(invalid_argument(operator.as_str(), format!("unexpected token {}", token)))
			}
			None => return_error!(missing_argument(operator.as_str(), "an operand")),
		}
	}
}

fn default_seed(oper: Oper) -> Value {
	match oper {
		Oper::Sum => Value::Int8(0),
		Oper::Mult => Value::Int8(1),
		Oper::Min | Oper::Max => Value::Undefined,
	}
}

fn is_function_name(text: &str) -> bool {
	text.contains("::") && !text.contains(char::is_whitespace)
}

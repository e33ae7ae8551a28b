// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::mem;

/// Accumulator cell of a barrier step.
pub trait Barrier<B> {
	fn update(&mut self, value: B);

	fn get(&self) -> &B;

	/// Moves the accumulated value out, leaving the initial value behind.
	fn take(&mut self) -> B;

	fn reset(&mut self);
}

#[derive(Clone, Debug)]
pub struct InMemoryBarrier<B> {
	initial: B,
	value: B,
}

impl<B: Clone> InMemoryBarrier<B> {
	pub fn new(initial: B) -> Self {
		Self {
			value: initial.clone(),
			initial,
		}
	}
}

impl<B: Clone> Barrier<B> for InMemoryBarrier<B> {
	fn update(&mut self, value: B) {
		self.value = value;
	}

	fn get(&self) -> &B {
		&self.value
	}

	fn take(&mut self) -> B {
		mem::replace(&mut self.value, self.initial.clone())
	}

	fn reset(&mut self) {
		self.value = self.initial.clone();
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_update_take_reset() {
		let mut barrier = InMemoryBarrier::new(0);
		barrier.update(barrier.get() + 5);
		assert_eq!(*barrier.get(), 5);
		assert_eq!(barrier.take(), 5);
		assert_eq!(*barrier.get(), 0);

		barrier.update(3);
		barrier.reset();
		assert_eq!(*barrier.get(), 0);
	}
}

/// Sequential action/object-path id source, scoped to a single batch.
///
/// Every request builder participating in a batch borrows the same provider,
/// which is what lets a later request reference a node produced by an earlier
/// one. Ids start at 1 and never repeat or skip. Batches are built
/// sequentially, so no synchronization is involved.
#[derive(Debug, Default)]
pub struct IdProvider {
	current: i32,
}

impl IdProvider {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn next(&mut self) -> i32 {
		self.current += 1;
		self.current
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_ids_start_at_one_and_are_gap_free() {
		let mut ids = IdProvider::new();
		let allocated: Vec<i32> = (0..5).map(|_| ids.next()).collect();
		assert_eq!(allocated, vec![1, 2, 3, 4, 5]);
	}
}

//! Various utility functions.

pub mod stricteq;

use either::Either;

/// Combines two arrays of the same length elementwise.
pub fn zip_with<const C: usize, T, S, U, F>(left: [T; C], right: [S; C], mut f: F) -> [U; C]
where F: FnMut(T, S) -> U {
  let res = left.into_iter().zip(right)
    .map(|(x, y)| f(x, y))
    .collect::<Vec<_>>()
    .try_into();
  match res {
    Ok(res) => res,
    Err(_) => panic!("Invalid array length"),
  }
}

/// Splits an iterable of `Either` into a collection of `Left` and a
/// collection of `Right`.
pub fn partition_either<I, A, B, C1, C2>(iter: I) -> (C1, C2)
where I: IntoIterator<Item = Either<A, B>>,
      C1: Default + Extend<A>,
      C2: Default + Extend<B> {
  let mut c1 = C1::default();
  let mut c2 = C2::default();
  for elem in iter {
    match elem {
      Either::Left(a) => c1.extend([a]),
      Either::Right(b) => c2.extend([b]),
    }
  }
  (c1, c2)
}

pub fn partition_mapped<I, T, A, B, F, C1, C2>(iter: I, f: F) -> (C1, C2)
where I: IntoIterator<Item = T>,
      F: FnMut(T) -> Either<A, B>,
      C1: Default + Extend<A>,
      C2: Default + Extend<B> {
  partition_either(iter.into_iter().map(f))
}

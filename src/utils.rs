/// Absolute float comparison for tests, default tolerance `1e-5`.
#[macro_export]
macro_rules! assert_float_eq {
  ($l : expr, $r : expr) => {
    $crate::assert_float_eq!($l, $r, 1e-5)
  };
  ($l : expr, $r : expr, $tol : expr) => {{
    let (l, r): (f64, f64) = ($l, $r);
    assert!((l - r).abs() < $tol, "{} != {} (tolerance {})", l, r, $tol);
  }};
}

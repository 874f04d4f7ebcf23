//! Helpers for unit tests.

/// Returns a `Cursor` over the bytes of the given file in
/// `src/io/test_files/`.
macro_rules! include_test_file {
    ($filename:expr) => {{
        let bytes = include_bytes!(
            concat!(env!("CARGO_MANIFEST_DIR"), "/src/io/test_files/", $filename)
        ) as &[u8];
        std::io::Cursor::new(bytes)
    }}
}

/// Asserts that two floats differ by at most `1e-6` (or the given epsilon).
macro_rules! assert_approx_eq {
    ($left:expr, $right:expr) => {
        assert_approx_eq!($left, $right, 1e-6)
    };
    ($left:expr, $right:expr, $eps:expr) => {{
        let (left, right) = ($left, $right);
        if (left - right).abs() > $eps {
            panic!(
                "assert_approx_eq failed:\n  left: `{:?}`,\n right: `{:?}`\nAt: {}:{}:{}",
                left,
                right,
                file!(),
                line!(),
                column!(),
            );
        }
    }};
}

/// Asserts that the given block panics. The block may capture anything, unwind safety isn't a
/// concern for values that are thrown away with the panic.
macro_rules! assert_panics {
    ($run:block) => {
        assert_panics!($run, "assertion failed to panic")
    };
    ($run:block, $msg:literal) => {
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| $run));
        assert!(result.is_err(), $msg);
        println!("^ panic caught");
    };
}

pub(crate) use assert_panics;

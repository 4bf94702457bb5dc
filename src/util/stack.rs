/// Stack space that must remain before a recursive step runs without growing.
const RED_ZONE: usize = 100 * 1024;

/// Stack space allocated each time the stack is grown.
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Runs `f`, first switching to a freshly allocated stack segment if less
/// than the red zone remains on the current one.
///
/// Wrap every recursive step of the parser and the evaluator in this so that
/// nesting depth is bounded by memory rather than by the thread's stack size.
///
/// # Example
/// ```
/// use tally::util::stack::ensure_sufficient_stack;
///
/// fn depth(n: u32) -> u32 {
///     ensure_sufficient_stack(|| if n == 0 { 0 } else { depth(n - 1) + 1 })
/// }
///
/// assert_eq!(depth(50_000), 50_000);
/// ```
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

/// On wasm the runtime owns the stack; call `f` directly.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passes_the_result_through() {
        let result: Result<f64, &str> = ensure_sufficient_stack(|| Ok(1.5));
        assert_eq!(result, Ok(1.5));
    }

    #[test]
    fn deep_recursion_does_not_overflow() {
        fn sum(n: u64) -> u64 {
            ensure_sufficient_stack(|| if n == 0 { 0 } else { n + sum(n - 1) })
        }

        assert_eq!(sum(100_000), 5_000_050_000);
    }
}

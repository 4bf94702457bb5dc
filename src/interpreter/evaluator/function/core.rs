use std::fmt;

use crate::{
    error::RuntimeError,
    interpreter::evaluator::{
        core::{EvalResult, Evaluator},
        environment::FunctionTable,
        function::{builtin, min_max},
    },
};

/// Type alias for builtin function handlers.
///
/// A builtin receives a slice of evaluated arguments whose length has already
/// been checked against its [`Arity`].
type BuiltinFn = fn(&[f64]) -> f64;

/// Specifies the allowed number of arguments for a function.
///
/// - `Exact(n)` means the function must receive exactly `n` arguments.
/// - `AtLeast(n)` means the function accepts `n` or more arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// Exactly this many arguments.
    Exact(usize),
    /// This many arguments or more.
    AtLeast(usize),
}

impl Arity {
    /// Tests whether the given argument count satisfies this arity constraint.
    ///
    /// # Example
    /// ```
    /// use tally::interpreter::evaluator::function::core::Arity;
    ///
    /// assert!(Arity::Exact(2).check(2));
    /// assert!(!Arity::Exact(2).check(3));
    /// assert!(Arity::AtLeast(1).check(5));
    /// assert!(!Arity::AtLeast(1).check(0));
    /// ```
    #[must_use]
    pub const fn check(self, n: usize) -> bool {
        match self {
            Self::Exact(m) => n == m,
            Self::AtLeast(m) => n >= m,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(n) => write!(f, "{n}"),
            Self::AtLeast(n) => write!(f, "at least {n}"),
        }
    }
}

/// Defines the builtin functions.
///
/// Each entry provides:
/// - a string name,
/// - the enum variant naming it,
/// - the accepted arity,
/// - a function pointer implementing the builtin.
///
/// The macro produces:
/// - `BuiltinFunction`, a closed enumeration of the builtins,
/// - name lookup and reverse lookup as `match` expressions,
/// - `BUILTIN_FUNCTIONS`, the list of builtin names.
macro_rules! builtin_functions {
    (
        $(
            $name:literal => $variant:ident {
                arity: $arity:expr,
                func: $func:expr $(,)?
            }
        ),* $(,)?
    ) => {
        /// A function provided by the language itself.
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum BuiltinFunction {
            $(
                #[doc = concat!("`", $name, "`")]
                $variant,
            )*
        }

        impl BuiltinFunction {
            /// Finds the builtin called `name`.
            #[must_use]
            pub fn lookup(name: &str) -> Option<Self> {
                match name {
                    $($name => Some(Self::$variant),)*
                    _ => None,
                }
            }

            /// The name the builtin is called by.
            #[must_use]
            pub const fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => $name,)*
                }
            }

            /// The number of arguments the builtin accepts.
            #[must_use]
            pub const fn arity(self) -> Arity {
                match self {
                    $(Self::$variant => $arity,)*
                }
            }

            fn func(self) -> BuiltinFn {
                match self {
                    $(Self::$variant => $func,)*
                }
            }
        }

        /// Names of all builtin functions.
        pub const BUILTIN_FUNCTIONS: &[&str] = &[
            $($name,)*
        ];
    };
}

builtin_functions! {
    "cos"   => Cos   { arity: Arity::Exact(1), func: builtin::cos },
    "sin"   => Sin   { arity: Arity::Exact(1), func: builtin::sin },
    "tan"   => Tan   { arity: Arity::Exact(1), func: builtin::tan },
    "acos"  => Acos  { arity: Arity::Exact(1), func: builtin::acos },
    "asin"  => Asin  { arity: Arity::Exact(1), func: builtin::asin },
    "atan"  => Atan  { arity: Arity::Exact(1), func: builtin::atan },
    "rad"   => Rad   { arity: Arity::Exact(1), func: builtin::radians },
    "deg"   => Deg   { arity: Arity::Exact(1), func: builtin::degrees },
    "abs"   => Abs   { arity: Arity::Exact(1), func: builtin::abs },
    "atan2" => Atan2 { arity: Arity::Exact(2), func: builtin::atan2 },
    "max"   => Max   { arity: Arity::AtLeast(1), func: min_max::max },
    "min"   => Min   { arity: Arity::AtLeast(1), func: min_max::min },
}

impl BuiltinFunction {
    /// Calls the builtin after checking the argument count.
    ///
    /// # Errors
    /// Returns `RuntimeError::ArityMismatch` if `args` does not satisfy the
    /// builtin's arity.
    ///
    /// # Example
    /// ```
    /// use tally::interpreter::evaluator::function::core::BuiltinFunction;
    ///
    /// let atan2 = BuiltinFunction::lookup("atan2").unwrap();
    /// assert_eq!(atan2.call(&[1.0, 1.0], 1), Ok(std::f64::consts::FRAC_PI_4));
    /// assert!(atan2.call(&[1.0], 1).is_err());
    /// ```
    pub fn call(self, args: &[f64], line: usize) -> EvalResult<f64> {
        if !self.arity().check(args.len()) {
            return Err(RuntimeError::ArityMismatch { name: self.name().to_string(),
                                                     expected: self.arity(),
                                                     found: args.len(),
                                                     line });
        }
        Ok((self.func())(args))
    }
}

impl Evaluator {
    /// Calls the function named `name` with already evaluated arguments.
    ///
    /// The name is resolved by checking, in order:
    /// 1. the user-defined `functions`, whose closure is invoked;
    /// 2. the builtin functions;
    ///
    /// and otherwise fails with `UnknownFunction`. User definitions therefore
    /// shadow builtins of the same name.
    ///
    /// # Errors
    /// - Unknown function name.
    /// - Wrong number of arguments.
    /// - Any error raised by the called closure.
    pub(crate) fn eval_function(&mut self,
                                name: &str,
                                args: &[f64],
                                functions: &FunctionTable,
                                line: usize)
                                -> EvalResult<f64> {
        let closure = functions.borrow().get(name).cloned();
        if let Some(closure) = closure {
            return self.invoke(&closure, args, line);
        }

        if let Some(builtin) = BuiltinFunction::lookup(name) {
            return builtin.call(args, line);
        }

        Err(RuntimeError::UnknownFunction { name: name.to_string(),
                                            line })
    }
}

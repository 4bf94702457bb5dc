use std::f64::consts;

/// Defines the builtin constants.
///
/// Each entry maps a name to an enum variant and its value. The macro
/// produces the `BuiltinConstant` enum, name lookup, and the
/// `BUILTIN_CONSTANTS` name list.
macro_rules! builtin_constants {
    ($($name:literal => $variant:ident = $value:expr),* $(,)?) => {
        /// A named number provided by the language itself.
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum BuiltinConstant {
            $(
                #[doc = concat!("`", $name, "`")]
                $variant,
            )*
        }

        impl BuiltinConstant {
            /// Finds the constant called `name`.
            ///
            /// # Example
            /// ```
            /// use tally::interpreter::evaluator::constant::BuiltinConstant;
            ///
            /// assert_eq!(BuiltinConstant::lookup("pi"), Some(BuiltinConstant::Pi));
            /// assert_eq!(BuiltinConstant::lookup("tau"), None);
            /// ```
            #[must_use]
            pub fn lookup(name: &str) -> Option<Self> {
                match name {
                    $($name => Some(Self::$variant),)*
                    _ => None,
                }
            }

            /// The name the constant is referred to by.
            #[must_use]
            pub const fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => $name,)*
                }
            }

            /// The constant's value.
            #[must_use]
            pub const fn value(self) -> f64 {
                match self {
                    $(Self::$variant => $value,)*
                }
            }
        }

        /// Names of all builtin constants.
        pub const BUILTIN_CONSTANTS: &[&str] = &[$($name,)*];
    };
}

builtin_constants! {
    "pi" => Pi = consts::PI,
    "e"  => E  = consts::E,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values() {
        assert_eq!(BuiltinConstant::Pi.value(), consts::PI);
        assert_eq!(BuiltinConstant::E.value(), consts::E);
    }

    #[test]
    fn names_are_lowercase_only() {
        assert_eq!(BuiltinConstant::lookup("PI"), None);
        assert_eq!(BuiltinConstant::lookup("E"), None);
        for name in BUILTIN_CONSTANTS {
            assert_eq!(BuiltinConstant::lookup(name).map(BuiltinConstant::name), Some(*name));
        }
    }
}

/// Native stack growth for deeply nested input.
///
/// Parsing and evaluation both recurse once per level of nesting. This module
/// lets those recursions grow the native stack on demand instead of
/// overflowing it.
pub mod stack;

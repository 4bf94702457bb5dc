use logos::Logos;

use crate::error::ParseError;

/// Represents a lexical token in the source input.
/// A token is a minimal but meaningful unit of text produced by the lexer.
/// This enum defines all recognized tokens in the language.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(extras = LexerExtras)]
pub enum Token {
    /// Numeric literal tokens, such as `42`, `3.14`, `.5`, `2.` or `2.1e-10`.
    #[regex(r"[0-9]+(\.[0-9]*)?([eE][+-]?[0-9]+)?", parse_number)]
    #[regex(r"\.[0-9]+([eE][+-]?[0-9]+)?", parse_number)]
    Number(f64),
    /// Identifier tokens; variable or function names such as `x` or `hyp`.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),
    /// `// Comments.`
    #[regex(r"//[^\n\r]*", logos::skip)]
    Comment,
    /// `:=`
    #[token(":=")]
    Define,
    /// `**`
    #[token("**")]
    DoubleStar,
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `,`
    #[token(",")]
    Comma,
    /// `;`
    #[token(";")]
    Semicolon,
    /// Line breaks separate statements.
    #[token("\n", |lex| {
        lex.extras.line += 1;
        Token::NewLine
    })]
    NewLine,
    /// Blanks, tabs, feeds and carriage returns.
    #[regex(r"[ \t\f\r]+", logos::skip)]
    Ignored,
}

/// Additional information carried by the lexer during tokenization.
///
/// Tracks the current line number for error reporting and diagnostics.
#[derive(Default)]
pub struct LexerExtras {
    /// The current line number in the source being tokenized.
    pub line: usize,
}

/// Parses a floating-point literal from the current token slice.
fn parse_number(lex: &mut logos::Lexer<Token>) -> Option<f64> {
    lex.slice().parse().ok()
}

/// Splits `source` into tokens, pairing each with the line it starts on.
///
/// Lines are counted from 1.
///
/// # Errors
/// Returns `ParseError::UnexpectedToken` for the first character sequence that
/// does not form a valid token.
///
/// # Example
/// ```
/// use tally::interpreter::lexer::{Token, tokenize};
///
/// let tokens = tokenize("x := 2 ** 3").unwrap();
/// assert_eq!(tokens[1], (Token::Define, 1));
/// assert_eq!(tokens[3], (Token::DoubleStar, 1));
/// ```
pub fn tokenize(source: &str) -> Result<Vec<(Token, usize)>, ParseError> {
    let mut tokens = Vec::new();
    let mut lexer = Token::lexer_with_extras(source, LexerExtras { line: 1 });

    while let Some(token) = lexer.next() {
        // The newline callback bumps the counter before the token is yielded.
        let line = if token == Ok(Token::NewLine) {
            lexer.extras.line - 1
        } else {
            lexer.extras.line
        };
        match token {
            Ok(tok) => tokens.push((tok, line)),
            Err(()) => {
                return Err(ParseError::UnexpectedToken { token: lexer.slice().to_string(),
                                                         line });
            },
        }
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<Token> {
        tokenize(source).unwrap().into_iter().map(|(t, _)| t).collect()
    }

    #[test]
    fn power_is_one_token() {
        assert_eq!(kinds("2**3*4"),
                   vec![Token::Number(2.0),
                        Token::DoubleStar,
                        Token::Number(3.0),
                        Token::Star,
                        Token::Number(4.0)]);
    }

    #[test]
    fn number_forms() {
        assert_eq!(kinds("42 3.25 .5 2. 1e3 2.5E-1"),
                   vec![Token::Number(42.0),
                        Token::Number(3.25),
                        Token::Number(0.5),
                        Token::Number(2.0),
                        Token::Number(1000.0),
                        Token::Number(0.25)]);
    }

    #[test]
    fn definitions_and_comments() {
        assert_eq!(kinds("f(a, b) := a // ignored\n"),
                   vec![Token::Identifier("f".into()),
                        Token::LParen,
                        Token::Identifier("a".into()),
                        Token::Comma,
                        Token::Identifier("b".into()),
                        Token::RParen,
                        Token::Define,
                        Token::Identifier("a".into()),
                        Token::NewLine]);
    }

    #[test]
    fn lines_are_tracked() {
        let tokens = tokenize("a := 1\n\nb := 2").unwrap();
        assert_eq!(tokens[0].1, 1);
        assert_eq!(tokens[3], (Token::NewLine, 1));
        assert_eq!(tokens[4], (Token::NewLine, 2));
        assert_eq!(tokens[5], (Token::Identifier("b".into()), 3));
    }

    #[test]
    fn unknown_character_is_reported_with_line() {
        let err = tokenize("1 +\n2 $ 3").unwrap_err();
        assert_eq!(err,
                   ParseError::UnexpectedToken { token: "$".into(),
                                                 line:  2, });
    }
}

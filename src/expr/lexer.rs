//! Logos-based lexer for constant expressions.

use logos::Logos;

/// Expression tokens. Whitespace is skipped.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n]+")]
pub enum Token {
    // =========================================================================
    // LITERALS AND NAMES
    // =========================================================================
    #[regex(r"[0-9][0-9_]*'[sS]?[bBoOdDhH][0-9a-fA-F_]+")]
    #[regex(r"'[sS]?[bBoOdDhH][0-9a-fA-F_]+")]
    BasedLiteral,

    #[regex(r"0[xX][0-9a-fA-F_]+")]
    HexLiteral,

    #[regex(r"[0-9][0-9_]*")]
    Decimal,

    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Ident,

    #[regex(r"\$[a-zA-Z_][a-zA-Z0-9_]*")]
    SystemFunction,

    // =========================================================================
    // OPERATORS
    // =========================================================================
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("**")]
    StarStar,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("<<")]
    Shl,
    #[token(">>")]
    Shr,
    #[token("==")]
    EqEq,
    #[token("!=")]
    NotEq,
    #[token("<=")]
    Le,
    #[token(">=")]
    Ge,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("&&")]
    AndAnd,
    #[token("||")]
    OrOr,
    #[token("!")]
    Bang,
    #[token("~")]
    Tilde,
    #[token("&")]
    Amp,
    #[token("|")]
    Pipe,
    #[token("^")]
    Caret,
    #[token("?")]
    Question,
    #[token(":")]
    Colon,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token(",")]
    Comma,
}

/// Tokenize an expression. Returns the offending text on the first
/// unrecognized character.
pub fn tokenize(input: &str) -> Result<Vec<(Token, &str)>, &str> {
    let mut lexer = Token::lexer(input);
    let mut tokens = Vec::new();
    while let Some(token) = lexer.next() {
        match token {
            Ok(token) => tokens.push((token, lexer.slice())),
            Err(()) => return Err(lexer.slice()),
        }
    }
    Ok(tokens)
}

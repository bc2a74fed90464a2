//! SQL tokenizer with dialect-configurable string literal styles.

use super::{Keyword, Span, StringStyle, Token, TokenKind};

/// A string literal delimiter pair registered by a dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiteralStyleSpec {
    /// Opening delimiter, matched case-insensitively (e.g. `X'`).
    pub open: &'static str,
    /// Closing delimiter (e.g. `'`).
    pub close: &'static str,
    /// The style tag attached to the produced token.
    pub style: StringStyle,
}

/// Tokenizer configuration a dialect supplies.
///
/// The base tokenizer always recognizes single-quoted plain strings; a
/// dialect may register further delimiter pairs that tokenize as string
/// literals of another style. Registered delimiters are tried before the
/// base quote rule, longest opening delimiter first, so `X'` wins over a
/// bare identifier `X` followed by `'...'`.
#[derive(Debug, Clone, Default)]
pub struct TokenizerSettings {
    string_styles: Vec<LiteralStyleSpec>,
}

static DEFAULT_SETTINGS: TokenizerSettings = TokenizerSettings {
    string_styles: Vec::new(),
};

impl TokenizerSettings {
    /// Creates an empty configuration (base tokenizer behavior only).
    #[must_use]
    pub const fn new() -> Self {
        Self {
            string_styles: Vec::new(),
        }
    }

    /// Registers a string literal style.
    ///
    /// A later registration with the same opening delimiter replaces the
    /// earlier one. The base single-quote delimiter cannot be re-registered;
    /// plain strings always stay plain.
    pub fn register_string_style(&mut self, spec: LiteralStyleSpec) {
        if spec.open == "'" {
            return;
        }
        self.string_styles.retain(|s| s.open != spec.open);
        self.string_styles.push(spec);
        // Longest opening delimiter first keeps matching greedy.
        self.string_styles.sort_by(|a, b| b.open.len().cmp(&a.open.len()));
    }

    /// Returns the registered styles, longest opening delimiter first.
    #[must_use]
    pub fn string_styles(&self) -> &[LiteralStyleSpec] {
        &self.string_styles
    }
}

/// A lexer that tokenizes SQL input.
pub struct Lexer<'a> {
    /// The input source code.
    input: &'a str,
    /// Tokenizer configuration (dialect-supplied).
    settings: &'a TokenizerSettings,
    /// The current byte position.
    pos: usize,
    /// The byte position of the start of the current token.
    start: usize,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer with base tokenizer behavior.
    #[must_use]
    pub const fn new(input: &'a str) -> Self {
        Self::with_settings(input, &DEFAULT_SETTINGS)
    }

    /// Creates a new lexer with dialect-supplied settings.
    #[must_use]
    pub const fn with_settings(input: &'a str, settings: &'a TokenizerSettings) -> Self {
        Self {
            input,
            settings,
            pos: 0,
            start: 0,
        }
    }

    /// Returns the current character without advancing.
    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    /// Returns the next character without advancing.
    fn peek_next(&self) -> Option<char> {
        let mut chars = self.input[self.pos..].chars();
        chars.next();
        chars.next()
    }

    /// Advances to the next character and returns it.
    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    /// Skips whitespace and comments.
    fn skip_whitespace_and_comments(&mut self) {
        loop {
            while self.peek().is_some_and(|c| c.is_whitespace()) {
                self.advance();
            }

            // Single-line comments (-- ...)
            if self.peek() == Some('-') && self.peek_next() == Some('-') {
                self.advance();
                self.advance();
                while self.peek().is_some_and(|c| c != '\n') {
                    self.advance();
                }
                continue;
            }

            // Multi-line comments (/* ... */)
            if self.peek() == Some('/') && self.peek_next() == Some('*') {
                self.advance();
                self.advance();
                loop {
                    match self.advance() {
                        Some('*') if self.peek() == Some('/') => {
                            self.advance();
                            break;
                        }
                        None => break,
                        _ => {}
                    }
                }
                continue;
            }

            break;
        }
    }

    /// Creates a token covering the current scan.
    fn make_token(&self, kind: TokenKind) -> Token {
        Token::new(kind, Span::new(self.start, self.pos))
    }

    /// Attempts to scan a string literal for a dialect-registered style.
    ///
    /// Styles are tried longest opening delimiter first; the opening
    /// delimiter is matched case-insensitively.
    fn scan_configured_string(&mut self) -> Option<Token> {
        let rest = &self.input[self.pos..];
        let spec = *self
            .settings
            .string_styles()
            .iter()
            .find(|spec| starts_with_ignore_case(rest, spec.open))?;

        self.pos += spec.open.len();
        let content_start = self.pos;

        match self.input[self.pos..].find(spec.close) {
            Some(offset) => {
                let value = self.input[content_start..content_start + offset].to_string();
                self.pos = content_start + offset + spec.close.len();
                Some(self.make_token(TokenKind::String {
                    value,
                    style: spec.style,
                }))
            }
            None => {
                self.pos = self.input.len();
                Some(self.make_token(TokenKind::Error(String::from(
                    "Unterminated string literal",
                ))))
            }
        }
    }

    /// Scans an identifier or keyword.
    fn scan_identifier(&mut self) -> Token {
        while self.peek().is_some_and(|c| c.is_alphanumeric() || c == '_') {
            self.advance();
        }

        let text = &self.input[self.start..self.pos];

        if let Some(keyword) = Keyword::from_str(text) {
            self.make_token(TokenKind::Keyword(keyword))
        } else {
            self.make_token(TokenKind::Identifier(String::from(text)))
        }
    }

    /// Scans a quoted identifier (e.g., "column name" or `column name`).
    fn scan_quoted_identifier(&mut self, quote: char) -> Token {
        self.advance(); // consume opening quote
        let content_start = self.pos;

        loop {
            match self.peek() {
                Some(c) if c == quote => {
                    // Doubled quote is an escape
                    if self.peek_next() == Some(quote) {
                        self.advance();
                        self.advance();
                    } else {
                        break;
                    }
                }
                Some(_) => {
                    self.advance();
                }
                None => {
                    return self.make_token(TokenKind::Error(String::from(
                        "Unterminated quoted identifier",
                    )));
                }
            }
        }

        let content = &self.input[content_start..self.pos];
        self.advance(); // consume closing quote

        let unescaped = content.replace(&format!("{quote}{quote}"), &quote.to_string());
        self.make_token(TokenKind::Identifier(unescaped))
    }

    /// Scans a number (integer or float).
    fn scan_number(&mut self) -> Token {
        let mut is_float = false;

        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }

        if self.peek() == Some('.') && self.peek_next().is_some_and(|c| c.is_ascii_digit()) {
            is_float = true;
            self.advance();
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.advance();
            }
        }

        if self.peek().is_some_and(|c| c == 'e' || c == 'E') {
            is_float = true;
            self.advance();
            if self.peek().is_some_and(|c| c == '+' || c == '-') {
                self.advance();
            }
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.advance();
            }
        }

        let text = &self.input[self.start..self.pos];

        if is_float {
            match text.parse::<f64>() {
                Ok(f) => self.make_token(TokenKind::Float(f)),
                Err(e) => self.make_token(TokenKind::Error(format!("Invalid float: {e}"))),
            }
        } else {
            match text.parse::<i64>() {
                Ok(i) => self.make_token(TokenKind::Integer(i)),
                Err(e) => self.make_token(TokenKind::Error(format!("Invalid integer: {e}"))),
            }
        }
    }

    /// Scans a plain single-quoted string literal.
    fn scan_string(&mut self) -> Token {
        self.advance(); // consume opening quote
        let mut value = String::new();

        loop {
            match self.peek() {
                Some('\'') => {
                    // Doubled quote is an escape
                    if self.peek_next() == Some('\'') {
                        value.push('\'');
                        self.advance();
                        self.advance();
                    } else {
                        break;
                    }
                }
                Some(c) => {
                    value.push(c);
                    self.advance();
                }
                None => {
                    return self.make_token(TokenKind::Error(String::from(
                        "Unterminated string literal",
                    )));
                }
            }
        }

        self.advance(); // consume closing quote
        self.make_token(TokenKind::String {
            value,
            style: StringStyle::Plain,
        })
    }

    /// Scans the next token.
    #[must_use]
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace_and_comments();
        self.start = self.pos;

        // Dialect-registered literal styles win over everything below,
        // including the base quote rule and identifier scanning.
        if let Some(token) = self.scan_configured_string() {
            return token;
        }

        let c = match self.advance() {
            Some(c) => c,
            None => return self.make_token(TokenKind::Eof),
        };

        match c {
            '(' => self.make_token(TokenKind::LeftParen),
            ')' => self.make_token(TokenKind::RightParen),
            ',' => self.make_token(TokenKind::Comma),
            ';' => self.make_token(TokenKind::Semicolon),
            '+' => self.make_token(TokenKind::Plus),
            '-' => self.make_token(TokenKind::Minus),
            '*' => self.make_token(TokenKind::Star),
            '/' => self.make_token(TokenKind::Slash),
            '%' => self.make_token(TokenKind::Percent),
            '~' => self.make_token(TokenKind::BitNot),
            '?' => self.make_token(TokenKind::Question),
            '.' => self.make_token(TokenKind::Dot),
            ':' => self.make_token(TokenKind::Colon),
            '=' => self.make_token(TokenKind::Eq),
            '<' => {
                if self.peek() == Some('=') {
                    self.advance();
                    self.make_token(TokenKind::LtEq)
                } else if self.peek() == Some('>') {
                    self.advance();
                    self.make_token(TokenKind::NotEq)
                } else if self.peek() == Some('<') {
                    self.advance();
                    self.make_token(TokenKind::LeftShift)
                } else {
                    self.make_token(TokenKind::Lt)
                }
            }
            '>' => {
                if self.peek() == Some('=') {
                    self.advance();
                    self.make_token(TokenKind::GtEq)
                } else if self.peek() == Some('>') {
                    self.advance();
                    self.make_token(TokenKind::RightShift)
                } else {
                    self.make_token(TokenKind::Gt)
                }
            }
            '!' => {
                if self.peek() == Some('=') {
                    self.advance();
                    self.make_token(TokenKind::NotEq)
                } else {
                    self.make_token(TokenKind::Error(String::from("Unexpected character: !")))
                }
            }
            '|' => {
                if self.peek() == Some('|') {
                    self.advance();
                    self.make_token(TokenKind::Concat)
                } else {
                    self.make_token(TokenKind::BitOr)
                }
            }
            '&' => self.make_token(TokenKind::BitAnd),

            '\'' => {
                self.pos = self.start;
                self.scan_string()
            }

            '"' => {
                self.pos = self.start;
                self.scan_quoted_identifier('"')
            }
            '`' => {
                self.pos = self.start;
                self.scan_quoted_identifier('`')
            }

            c if c.is_ascii_digit() => {
                self.pos = self.start;
                self.scan_number()
            }

            c if c.is_alphabetic() || c == '_' => {
                self.pos = self.start;
                self.scan_identifier()
            }

            _ => self.make_token(TokenKind::Error(format!("Unexpected character: {c}"))),
        }
    }

    /// Tokenizes the entire input and returns all tokens.
    #[must_use]
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token();
            let is_eof = token.is_eof();
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        tokens
    }
}

/// ASCII case-insensitive prefix check.
fn starts_with_ignore_case(haystack: &str, prefix: &str) -> bool {
    haystack.len() >= prefix.len()
        && haystack.as_bytes()[..prefix.len()].eq_ignore_ascii_case(prefix.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokenize(input: &str) -> Vec<Token> {
        Lexer::new(input).tokenize()
    }

    fn token_kinds(input: &str) -> Vec<TokenKind> {
        tokenize(input).into_iter().map(|t| t.kind).collect()
    }

    fn hex_settings() -> TokenizerSettings {
        let mut settings = TokenizerSettings::new();
        settings.register_string_style(LiteralStyleSpec {
            open: "X'",
            close: "'",
            style: StringStyle::Hex,
        });
        settings
    }

    #[test]
    fn test_empty_input() {
        let tokens = tokenize("");
        assert_eq!(tokens.len(), 1);
        assert!(matches!(tokens[0].kind, TokenKind::Eof));
    }

    #[test]
    fn test_comments() {
        assert_eq!(
            token_kinds("SELECT -- comment\nFROM /* block */ WHERE"),
            vec![
                TokenKind::Keyword(Keyword::Select),
                TokenKind::Keyword(Keyword::From),
                TokenKind::Keyword(Keyword::Where),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_keywords_case_insensitive() {
        assert_eq!(
            token_kinds("select FROM wHeRe"),
            vec![
                TokenKind::Keyword(Keyword::Select),
                TokenKind::Keyword(Keyword::From),
                TokenKind::Keyword(Keyword::Where),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_identifiers_and_quoted_identifiers() {
        assert_eq!(
            token_kinds("foo \"column name\" `another`"),
            vec![
                TokenKind::Identifier(String::from("foo")),
                TokenKind::Identifier(String::from("column name")),
                TokenKind::Identifier(String::from("another")),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_numbers() {
        assert_eq!(
            token_kinds("42 3.14 2.5e-3"),
            vec![
                TokenKind::Integer(42),
                TokenKind::Float(3.14),
                TokenKind::Float(2.5e-3),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_string_with_escaped_quote() {
        assert_eq!(
            token_kinds("'it''s'"),
            vec![
                TokenKind::String {
                    value: String::from("it's"),
                    style: StringStyle::Plain,
                },
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_operators() {
        assert_eq!(
            token_kinds("+ - * / % = != <> <= >= || & | << >>"),
            vec![
                TokenKind::Plus,
                TokenKind::Minus,
                TokenKind::Star,
                TokenKind::Slash,
                TokenKind::Percent,
                TokenKind::Eq,
                TokenKind::NotEq,
                TokenKind::NotEq,
                TokenKind::LtEq,
                TokenKind::GtEq,
                TokenKind::Concat,
                TokenKind::BitAnd,
                TokenKind::BitOr,
                TokenKind::LeftShift,
                TokenKind::RightShift,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_hex_string_requires_registration() {
        // Without the style registered, X scans as an identifier.
        assert_eq!(
            token_kinds("X'48AF'"),
            vec![
                TokenKind::Identifier(String::from("X")),
                TokenKind::String {
                    value: String::from("48AF"),
                    style: StringStyle::Plain,
                },
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_hex_string_with_registered_style() {
        let settings = hex_settings();
        let tokens = Lexer::with_settings("X'48AF'", &settings).tokenize();
        assert_eq!(
            tokens[0].kind,
            TokenKind::String {
                value: String::from("48AF"),
                style: StringStyle::Hex,
            }
        );
    }

    #[test]
    fn test_hex_string_open_delimiter_case_insensitive() {
        let settings = hex_settings();
        let tokens = Lexer::with_settings("x'ff'", &settings).tokenize();
        assert_eq!(
            tokens[0].kind,
            TokenKind::String {
                value: String::from("ff"),
                style: StringStyle::Hex,
            }
        );
    }

    #[test]
    fn test_registered_style_leaves_plain_strings_alone() {
        let settings = hex_settings();
        let tokens = Lexer::with_settings("'hello' X'00'", &settings).tokenize();
        assert_eq!(
            tokens[0].kind,
            TokenKind::String {
                value: String::from("hello"),
                style: StringStyle::Plain,
            }
        );
        assert_eq!(
            tokens[1].kind,
            TokenKind::String {
                value: String::from("00"),
                style: StringStyle::Hex,
            }
        );
    }

    #[test]
    fn test_base_quote_cannot_be_reregistered() {
        let mut settings = TokenizerSettings::new();
        settings.register_string_style(LiteralStyleSpec {
            open: "'",
            close: "'",
            style: StringStyle::Hex,
        });
        assert!(settings.string_styles().is_empty());
    }

    #[test]
    fn test_unterminated_registered_literal() {
        let settings = hex_settings();
        let tokens = Lexer::with_settings("X'48", &settings).tokenize();
        assert!(matches!(tokens[0].kind, TokenKind::Error(_)));
    }

    #[test]
    fn test_span_tracking() {
        let tokens = tokenize("SELECT id");
        assert_eq!(tokens[0].span, Span::new(0, 6));
        assert_eq!(tokens[1].span, Span::new(7, 9));
    }
}

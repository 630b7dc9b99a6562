//! The CSS 2.1 lexer.
//!
//! [CSS 2.1 § 4.1.1 Tokenization](https://www.w3.org/TR/CSS21/syndata.html#tokenization)
//!
//! "The stylesheet's character stream is tokenized according to the
//! lexical scanner below." Comments are stripped, a run of whitespace
//! becomes one `S` token, and unterminated constructs are closed at the
//! end of input per
//! [§ 4.2](https://www.w3.org/TR/CSS21/syndata.html#parsing-errors):
//! "User agents must close all open constructs... at the end of the
//! style sheet."

use bilby_common::Interner;

use super::token::Token;

/// The CSS tokenizer. Input must already be decoded to UTF-8 (see
/// [`super::charset::decode`]).
pub struct Tokenizer {
    /// The input being tokenized.
    input: Vec<char>,
    /// Current position in the input.
    position: usize,
    /// Interner shared with the owning stylesheet.
    interner: Interner,
}

impl Tokenizer {
    /// Create a tokenizer over decoded input.
    #[must_use]
    pub fn new(input: &str, interner: Interner) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            interner,
        }
    }

    /// Tokenize the whole input. The returned vector always ends with
    /// [`Token::Eof`].
    #[must_use]
    pub fn run(mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token();
            let done = token.is_eof();
            tokens.push(token);
            if done {
                return tokens;
            }
        }
    }

    /// Consume one token.
    fn next_token(&mut self) -> Token {
        self.consume_comments();

        let Some(c) = self.consume() else {
            return Token::Eof;
        };

        match c {
            c if is_whitespace(c) => {
                self.consume_whitespace();
                Token::Whitespace
            }

            '"' | '\'' => self.consume_string(c),

            // HASH: '#' name
            '#' => {
                if self.peek().is_some_and(is_name_char) || self.starts_escape(0) {
                    let name = self.consume_name();
                    Token::Hash(self.interner.intern(&name))
                } else {
                    Token::Char('#')
                }
            }

            // ATKEYWORD: '@' ident
            '@' => {
                if self.would_start_ident() {
                    let name = self.consume_ident();
                    Token::AtKeyword(self.interner.intern(&name))
                } else {
                    Token::Char('@')
                }
            }

            // INCLUDES: "~="
            '~' => {
                if self.peek() == Some('=') {
                    let _ = self.consume();
                    Token::Includes
                } else {
                    Token::Char('~')
                }
            }

            // DASHMATCH: "|="
            '|' => {
                if self.peek() == Some('=') {
                    let _ = self.consume();
                    Token::DashMatch
                } else {
                    Token::Char('|')
                }
            }

            // CDO: "<!--"
            '<' => {
                if self.peek() == Some('!')
                    && self.peek_at(1) == Some('-')
                    && self.peek_at(2) == Some('-')
                {
                    let _ = self.consume();
                    let _ = self.consume();
                    let _ = self.consume();
                    Token::Cdo
                } else {
                    Token::Char('<')
                }
            }

            '-' => {
                // CDC: "-->"
                if self.peek() == Some('-') && self.peek_at(1) == Some('>') {
                    let _ = self.consume();
                    let _ = self.consume();
                    Token::Cdc
                } else if self.would_start_number() {
                    self.reconsume();
                    self.consume_numeric()
                } else if self.peek().is_some_and(is_name_start_char) || self.starts_escape(0) {
                    self.reconsume();
                    let name = self.consume_ident();
                    self.finish_ident_like(&name)
                } else {
                    Token::Char('-')
                }
            }

            '+' | '.' => {
                if self.would_start_number_after(c) {
                    self.reconsume();
                    self.consume_numeric()
                } else {
                    Token::Char(c)
                }
            }

            c if c.is_ascii_digit() => {
                self.reconsume();
                self.consume_numeric()
            }

            '\\' => {
                if self.peek().is_some_and(|n| n != '\n') {
                    self.reconsume();
                    let name = self.consume_ident();
                    self.finish_ident_like(&name)
                } else {
                    Token::Char('\\')
                }
            }

            c if is_name_start_char(c) => {
                self.reconsume();
                let name = self.consume_ident();
                self.finish_ident_like(&name)
            }

            c => Token::Char(c),
        }
    }

    /// Decide between IDENT, FUNCTION, and URI after an identifier.
    fn finish_ident_like(&mut self, name: &str) -> Token {
        if self.peek() == Some('(') {
            let _ = self.consume();
            if name.eq_ignore_ascii_case("url") {
                self.consume_uri()
            } else {
                Token::Function(self.interner.intern(name))
            }
        } else {
            Token::Ident(self.interner.intern(name))
        }
    }

    /// Strip `/* ... */` comments.
    ///
    /// [§ 4.1.9 Comments](https://www.w3.org/TR/CSS21/syndata.html#comments)
    /// "Comments begin with the characters '/*' and end with the
    /// characters '*/'." An unterminated comment runs to EOF.
    fn consume_comments(&mut self) {
        while self.peek() == Some('/') && self.peek_at(1) == Some('*') {
            let _ = self.consume();
            let _ = self.consume();
            loop {
                match self.consume() {
                    Some('*') if self.peek() == Some('/') => {
                        let _ = self.consume();
                        break;
                    }
                    Some(_) => {}
                    None => return,
                }
            }
        }
    }

    /// Consume a whitespace run.
    fn consume_whitespace(&mut self) {
        while self.peek().is_some_and(is_whitespace) {
            let _ = self.consume();
        }
    }

    /// Consume a string token after its opening quote.
    ///
    /// [§ 4.1.3 Characters and case](https://www.w3.org/TR/CSS21/syndata.html#strings):
    /// a string cannot directly contain a newline; `\` followed by a
    /// newline is a continuation; EOF closes the string.
    fn consume_string(&mut self, quote: char) -> Token {
        let mut value = String::new();
        loop {
            match self.consume() {
                Some(c) if c == quote => {
                    return Token::String(self.interner.intern(&value));
                }
                None => {
                    // "User agents must close strings upon reaching the
                    // end of a line, but then drop the construct" applies
                    // to newlines; EOF closes the string intact.
                    return Token::String(self.interner.intern(&value));
                }
                Some('\n') => {
                    self.reconsume();
                    return Token::Error;
                }
                Some('\\') => match self.peek() {
                    None => {}
                    Some('\n') => {
                        let _ = self.consume();
                    }
                    Some(_) => {
                        if let Some(c) = self.consume_escape() {
                            value.push(c);
                        }
                    }
                },
                Some(c) => value.push(c),
            }
        }
    }

    /// Consume a URI token after `url(`.
    ///
    /// [§ 4.3.4 URLs and URIs](https://www.w3.org/TR/CSS21/syndata.html#uri)
    /// "The format of a URI value is 'url(' followed by optional white
    /// space followed by an optional single quote or double quote
    /// character followed by the URI itself..."
    fn consume_uri(&mut self) -> Token {
        self.consume_whitespace();

        // Quoted form.
        if let Some(quote) = self.peek().filter(|&c| c == '"' || c == '\'') {
            let _ = self.consume();
            let inner = self.consume_string(quote);
            let Token::String(value) = inner else {
                // Bad string inside url() poisons the whole URI.
                self.consume_bad_uri();
                return Token::Error;
            };
            self.consume_whitespace();
            match self.consume() {
                Some(')') | None => return Token::Uri(value),
                Some(_) => {
                    self.consume_bad_uri();
                    return Token::Error;
                }
            }
        }

        // Unquoted form.
        let mut value = String::new();
        loop {
            match self.consume() {
                Some(')') | None => return Token::Uri(self.interner.intern(&value)),
                Some(c) if is_whitespace(c) => {
                    self.consume_whitespace();
                    return match self.consume() {
                        Some(')') | None => Token::Uri(self.interner.intern(&value)),
                        Some(_) => {
                            self.consume_bad_uri();
                            Token::Error
                        }
                    };
                }
                Some('"' | '\'' | '(') => {
                    self.consume_bad_uri();
                    return Token::Error;
                }
                Some('\\') => {
                    if let Some(c) = self.consume_escape() {
                        value.push(c);
                    }
                }
                Some(c) => value.push(c),
            }
        }
    }

    /// Skip the remnants of a malformed URI up to the closing `)`.
    fn consume_bad_uri(&mut self) {
        loop {
            match self.consume() {
                Some(')') | None => return,
                Some('\\') => {
                    let _ = self.consume_escape();
                }
                Some(_) => {}
            }
        }
    }

    /// Consume NUMBER, PERCENTAGE, or DIMENSION. The numeric text is kept
    /// verbatim; conversion happens on demand in the language parser.
    fn consume_numeric(&mut self) -> Token {
        let mut text = String::new();

        if let Some(sign) = self.peek().filter(|&c| c == '+' || c == '-') {
            text.push(sign);
            let _ = self.consume();
        }
        while let Some(digit) = self.peek().filter(char::is_ascii_digit) {
            text.push(digit);
            let _ = self.consume();
        }
        if self.peek() == Some('.') && self.peek_at(1).is_some_and(|c| c.is_ascii_digit()) {
            text.push('.');
            let _ = self.consume();
            while let Some(digit) = self.peek().filter(char::is_ascii_digit) {
                text.push(digit);
                let _ = self.consume();
            }
        }

        if self.peek() == Some('%') {
            let _ = self.consume();
            Token::Percentage(self.interner.intern(&text))
        } else if self.would_start_ident() {
            let unit = self.consume_ident();
            text.push_str(&unit);
            Token::Dimension(self.interner.intern(&text))
        } else {
            Token::Number(self.interner.intern(&text))
        }
    }

    /// Consume an identifier: `-? nmstart nmchar*` with escapes.
    fn consume_ident(&mut self) -> String {
        let mut result = String::new();
        if self.peek() == Some('-') {
            result.push('-');
            let _ = self.consume();
        }
        loop {
            match self.peek() {
                Some(c) if is_name_char(c) => {
                    result.push(c);
                    let _ = self.consume();
                }
                Some('\\') if self.starts_escape(0) => {
                    let _ = self.consume();
                    if let Some(c) = self.consume_escape() {
                        result.push(c);
                    }
                }
                _ => return result,
            }
        }
    }

    /// Consume a name: `nmchar+` with escapes (used by HASH).
    fn consume_name(&mut self) -> String {
        let mut result = String::new();
        loop {
            match self.peek() {
                Some(c) if is_name_char(c) => {
                    result.push(c);
                    let _ = self.consume();
                }
                Some('\\') if self.starts_escape(0) => {
                    let _ = self.consume();
                    if let Some(c) = self.consume_escape() {
                        result.push(c);
                    }
                }
                _ => return result,
            }
        }
    }

    /// Consume an escape after its backslash.
    ///
    /// [§ 4.1.3](https://www.w3.org/TR/CSS21/syndata.html#escaped-characters)
    /// "Third, backslash escapes allow authors to refer to characters
    /// they cannot easily put in a document": up to six hex digits
    /// (optionally followed by one whitespace character), or any
    /// character other than a hex digit or newline taken verbatim.
    fn consume_escape(&mut self) -> Option<char> {
        match self.consume() {
            Some(c) if c.is_ascii_hexdigit() => {
                let mut hex = c.to_string();
                for _ in 0..5 {
                    match self.peek() {
                        Some(h) if h.is_ascii_hexdigit() => {
                            hex.push(h);
                            let _ = self.consume();
                        }
                        _ => break,
                    }
                }
                if self.peek().is_some_and(is_whitespace) {
                    let _ = self.consume();
                }
                let code = u32::from_str_radix(&hex, 16).unwrap_or(0xFFFD);
                if code == 0 || (0xD800..=0xDFFF).contains(&code) || code > 0x0010_FFFF {
                    Some('\u{FFFD}')
                } else {
                    char::from_u32(code)
                }
            }
            None => Some('\u{FFFD}'),
            Some(c) => Some(c),
        }
    }

    /// `true` when the next input starts an identifier.
    fn would_start_ident(&self) -> bool {
        match self.peek() {
            Some('-') => {
                self.peek_at(1).is_some_and(is_name_start_char) || self.starts_escape(1)
            }
            Some(c) if is_name_start_char(c) => true,
            Some('\\') => self.starts_escape(0),
            _ => false,
        }
    }

    /// `true` when the character after a consumed `-` starts a number.
    fn would_start_number(&self) -> bool {
        match self.peek() {
            Some(c) if c.is_ascii_digit() => true,
            Some('.') => self.peek_at(1).is_some_and(|c| c.is_ascii_digit()),
            _ => false,
        }
    }

    /// `true` when `first` (already consumed) plus the upcoming input
    /// starts a number.
    fn would_start_number_after(&self, first: char) -> bool {
        match first {
            '+' => self.would_start_number(),
            '.' => self.peek().is_some_and(|c| c.is_ascii_digit()),
            _ => false,
        }
    }

    /// `true` when position `offset` holds a backslash starting a valid
    /// escape (a backslash not followed by a newline).
    fn starts_escape(&self, offset: usize) -> bool {
        self.peek_at(offset) == Some('\\') && self.peek_at(offset + 1) != Some('\n')
    }

    /// Consume and return the next character.
    fn consume(&mut self) -> Option<char> {
        let c = self.input.get(self.position).copied();
        if c.is_some() {
            self.position += 1;
        }
        c
    }

    /// Put back the last consumed character.
    fn reconsume(&mut self) {
        if self.position > 0 {
            self.position -= 1;
        }
    }

    /// Peek at the next character without consuming it.
    fn peek(&self) -> Option<char> {
        self.peek_at(0)
    }

    /// Peek at an offset from the current position.
    fn peek_at(&self, offset: usize) -> Option<char> {
        self.input.get(self.position + offset).copied()
    }
}

/// [§ 4.1.1] `s: [ \t\r\n\f]+`
fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n' | '\x0C')
}

/// [§ 4.1.1] `nmstart: [_a-z]|{nonascii}|{escape}` (ASCII letters of
/// either case; the grammar is case-insensitive).
fn is_name_start_char(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || !c.is_ascii()
}

/// [§ 4.1.1] `nmchar: [_a-z0-9-]|{nonascii}|{escape}`
fn is_name_char(c: char) -> bool {
    is_name_start_char(c) || c.is_ascii_digit() || c == '-'
}

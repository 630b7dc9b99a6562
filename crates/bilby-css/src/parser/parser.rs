//! The core parser state machine.
//!
//! [CSS 2.1 § 4.1.7 Rule sets, declaration blocks, and selectors](https://www.w3.org/TR/CSS21/syndata.html#rule-sets)
//! and [§ 4.2 Rules for handling parsing errors](https://www.w3.org/TR/CSS21/syndata.html#parsing-errors).
//!
//! "When errors occur in CSS, the parser must recover gracefully":
//! malformed declarations are discarded to the next `;` at the same
//! nesting level, malformed statements to the next matching `}`, and all
//! open constructs are closed at the end of the style sheet. The machine
//! keeps a stack of open frames so at-rules and blocks nest.

use std::collections::VecDeque;

use crate::tokenizer::Token;

use super::event::Event;

/// The two parsing modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// A complete stylesheet.
    Stylesheet,
    /// The value of an HTML `style` attribute: an implicit declaration
    /// list wrapped in one selector-less ruleset.
    InlineStyle,
}

/// An open construct on the parser stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Frame {
    /// A ruleset body: declarations only.
    Ruleset,
    /// An at-rule body: nested rulesets, declarations, or at-rules.
    AtRule,
    /// A bare brace block being skipped.
    Block,
}

/// Parsing phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// Nothing emitted yet.
    Begin,
    /// Emitting body events.
    Body,
    /// `EndStylesheet` emitted.
    Finished,
}

/// Token stream to event stream converter.
pub struct Parser {
    tokens: Vec<Token>,
    position: usize,
    mode: Mode,
    phase: Phase,
    stack: Vec<Frame>,
    queued: VecDeque<Event>,
    /// Sentinel returned once the token vector is exhausted.
    eof: Token,
}

impl Parser {
    /// Create a parser over a token vector (which must end with
    /// [`Token::Eof`], as produced by the tokenizer).
    #[must_use]
    pub fn new(tokens: Vec<Token>, mode: Mode) -> Self {
        Self {
            tokens,
            position: 0,
            mode,
            phase: Phase::Begin,
            stack: Vec::new(),
            queued: VecDeque::new(),
            eof: Token::Eof,
        }
    }

    /// Produce the next event, or `None` after `EndStylesheet`.
    pub fn next_event(&mut self) -> Option<Event> {
        if let Some(event) = self.queued.pop_front() {
            return Some(event);
        }
        match self.phase {
            Phase::Begin => {
                self.phase = Phase::Body;
                if self.mode == Mode::InlineStyle {
                    self.stack.push(Frame::Ruleset);
                    self.queued.push_back(Event::StartRuleset(Vec::new()));
                }
                Some(Event::StartStylesheet)
            }
            Phase::Body => Some(self.body_event()),
            Phase::Finished => None,
        }
    }

    /// Compute the next body event.
    fn body_event(&mut self) -> Event {
        loop {
            match self.stack.last().copied() {
                None => {
                    if let Some(event) = self.top_level_event() {
                        return event;
                    }
                }
                Some(Frame::Ruleset) => {
                    if let Some(event) = self.ruleset_event() {
                        return event;
                    }
                }
                Some(Frame::AtRule) => {
                    if let Some(event) = self.at_rule_event() {
                        return event;
                    }
                }
                Some(Frame::Block) => {
                    if let Some(event) = self.block_event() {
                        return event;
                    }
                }
            }
        }
    }

    /// One step at the top level. `None` means "loop again".
    fn top_level_event(&mut self) -> Option<Event> {
        loop {
            match self.peek() {
                // [§ 4.1.1] "The CDO and CDC tokens... may appear
                // around statements" - ignored, as is whitespace.
                Token::Whitespace | Token::Cdo | Token::Cdc => {
                    let _ = self.consume();
                }
                Token::Eof => {
                    self.phase = Phase::Finished;
                    return Some(Event::EndStylesheet);
                }
                // A stray close brace at the top level is a parse error;
                // drop it and continue.
                Token::Char('}') => {
                    let _ = self.consume();
                }
                Token::AtKeyword(_) => return self.start_at_rule(),
                _ => return self.start_ruleset(),
            }
        }
    }

    /// One step inside a ruleset body.
    fn ruleset_event(&mut self) -> Option<Event> {
        loop {
            match self.peek() {
                Token::Whitespace | Token::Char(';') => {
                    let _ = self.consume();
                }
                Token::Char('}') => {
                    let _ = self.consume();
                    let _ = self.stack.pop();
                    return Some(Event::EndRuleset);
                }
                Token::Eof => {
                    // Close the open construct at end of input.
                    if self.mode == Mode::InlineStyle && self.stack.len() == 1 {
                        self.phase = Phase::Finished;
                        let _ = self.stack.pop();
                        self.queued.push_back(Event::EndStylesheet);
                        return Some(Event::EndRuleset);
                    }
                    let _ = self.stack.pop();
                    return Some(Event::EndRuleset);
                }
                Token::Ident(_) => {
                    if let Some(event) = self.parse_declaration() {
                        return Some(event);
                    }
                }
                // [§ 4.2] "Malformed declarations... discard until the
                // next ; or the end of the block."
                _ => self.skip_declaration(),
            }
        }
    }

    /// One step inside an at-rule body.
    fn at_rule_event(&mut self) -> Option<Event> {
        loop {
            match self.peek() {
                Token::Whitespace | Token::Char(';') | Token::Cdo | Token::Cdc => {
                    let _ = self.consume();
                }
                Token::Char('}') => {
                    let _ = self.consume();
                    let _ = self.stack.pop();
                    return Some(Event::EndAtRule);
                }
                Token::Eof => {
                    let _ = self.stack.pop();
                    return Some(Event::EndAtRule);
                }
                Token::AtKeyword(_) => return self.start_at_rule(),
                Token::Ident(_) if self.looks_like_declaration() => {
                    if let Some(event) = self.parse_declaration() {
                        return Some(event);
                    }
                }
                Token::Char('{') => {
                    // A bare block: skip it as one construct.
                    let _ = self.consume();
                    self.stack.push(Frame::Block);
                    return Some(Event::StartBlock);
                }
                _ => return self.start_ruleset(),
            }
        }
    }

    /// One step inside a bare block being skipped.
    fn block_event(&mut self) -> Option<Event> {
        let mut content = Vec::new();
        loop {
            match self.peek() {
                Token::Char('}') | Token::Eof => {
                    if matches!(self.peek(), Token::Char('}')) {
                        let _ = self.consume();
                    }
                    let _ = self.stack.pop();
                    if !content.is_empty() {
                        self.queued.push_back(Event::EndBlock);
                        return Some(Event::BlockContent(content));
                    }
                    return Some(Event::EndBlock);
                }
                Token::Char('{') => {
                    let _ = self.consume();
                    self.stack.push(Frame::Block);
                    if !content.is_empty() {
                        self.queued.push_back(Event::StartBlock);
                        return Some(Event::BlockContent(content));
                    }
                    return Some(Event::StartBlock);
                }
                _ => {
                    let token = self.consume();
                    content.push(token);
                }
            }
        }
    }

    /// Parse an at-rule head. Returns its start event, queueing the end
    /// event for the `;` form.
    fn start_at_rule(&mut self) -> Option<Event> {
        let Token::AtKeyword(name) = self.consume() else {
            return None;
        };
        let mut prelude = Vec::new();
        loop {
            match self.peek() {
                Token::Char(';') => {
                    let _ = self.consume();
                    self.queued.push_back(Event::EndAtRule);
                    return Some(Event::StartAtRule {
                        name,
                        prelude: trim_whitespace(prelude),
                    });
                }
                Token::Char('{') => {
                    let _ = self.consume();
                    self.stack.push(Frame::AtRule);
                    return Some(Event::StartAtRule {
                        name,
                        prelude: trim_whitespace(prelude),
                    });
                }
                // Close at EOF: the at-rule ends without a block.
                Token::Eof => {
                    self.queued.push_back(Event::EndAtRule);
                    return Some(Event::StartAtRule {
                        name,
                        prelude: trim_whitespace(prelude),
                    });
                }
                // A close brace ends the enclosing construct; the
                // at-rule is malformed and dropped.
                Token::Char('}') => return None,
                _ => {
                    let token = self.consume();
                    prelude.push(token);
                }
            }
        }
    }

    /// Parse a ruleset head (prelude up to `{`). Returns its start event
    /// or `None` when the prelude is malformed and was discarded.
    fn start_ruleset(&mut self) -> Option<Event> {
        let mut prelude = Vec::new();
        loop {
            match self.peek() {
                Token::Char('{') => {
                    let _ = self.consume();
                    self.stack.push(Frame::Ruleset);
                    return Some(Event::StartRuleset(trim_whitespace(prelude)));
                }
                // [§ 4.1.7] "the entire contents of the selector,
                // including the declaration block, must be ignored" when
                // the selector is malformed; a prelude that ends without
                // a block is dropped wholesale.
                Token::Char(';') => {
                    let _ = self.consume();
                    return None;
                }
                Token::Char('}') | Token::Eof => return None,
                _ => {
                    let token = self.consume();
                    prelude.push(token);
                }
            }
        }
    }

    /// `true` when the upcoming tokens read as `IDENT S* :`.
    fn looks_like_declaration(&self) -> bool {
        let mut offset = 1;
        while matches!(self.peek_at(offset), Token::Whitespace) {
            offset += 1;
        }
        matches!(self.peek_at(offset), Token::Char(':'))
    }

    /// Parse one declaration; `None` when it was malformed and skipped.
    fn parse_declaration(&mut self) -> Option<Event> {
        let Token::Ident(property) = self.consume() else {
            return None;
        };
        self.skip_ws();
        if !matches!(self.peek(), Token::Char(':')) {
            self.skip_declaration();
            return None;
        }
        let _ = self.consume();
        self.skip_ws();

        let mut value = Vec::new();
        let mut depth = 0usize;
        let mut poisoned = false;
        loop {
            match self.peek() {
                Token::Char(';') if depth == 0 => {
                    let _ = self.consume();
                    break;
                }
                Token::Char('}') if depth == 0 => break,
                Token::Eof => break,
                Token::Error => {
                    poisoned = true;
                    let _ = self.consume();
                }
                token => {
                    match token {
                        Token::Function(_) | Token::Char('(' | '[' | '{') => depth += 1,
                        Token::Char(')' | ']' | '}') => depth = depth.saturating_sub(1),
                        _ => {}
                    }
                    let token = self.consume();
                    value.push(token);
                }
            }
        }

        if poisoned {
            return None;
        }

        let (value, important) = split_important(trim_whitespace(value));
        if value.is_empty() {
            // "p { color: }" has no value to keep.
            return None;
        }
        Some(Event::Declaration {
            property,
            value,
            important,
        })
    }

    /// [§ 4.2] discard a malformed declaration: consume to the next `;`
    /// at nesting level zero, leaving a closing `}` for the caller.
    fn skip_declaration(&mut self) {
        let mut depth = 0usize;
        loop {
            match self.peek() {
                Token::Char(';') if depth == 0 => {
                    let _ = self.consume();
                    return;
                }
                Token::Char('}') if depth == 0 => return,
                Token::Eof => return,
                token => {
                    match token {
                        Token::Function(_) | Token::Char('(' | '[' | '{') => depth += 1,
                        Token::Char(')' | ']' | '}') => depth = depth.saturating_sub(1),
                        _ => {}
                    }
                    let _ = self.consume();
                }
            }
        }
    }

    /// Skip whitespace tokens.
    fn skip_ws(&mut self) {
        while matches!(self.peek(), Token::Whitespace) {
            let _ = self.consume();
        }
    }

    /// Peek the next token (EOF once exhausted).
    fn peek(&self) -> &Token {
        self.peek_at(0)
    }

    /// Peek at an offset from the current position.
    fn peek_at(&self, offset: usize) -> &Token {
        self.tokens.get(self.position + offset).unwrap_or(&self.eof)
    }

    /// Consume and return the next token.
    fn consume(&mut self) -> Token {
        let token = self
            .tokens
            .get(self.position)
            .cloned()
            .unwrap_or(Token::Eof);
        if self.position < self.tokens.len() {
            self.position += 1;
        }
        token
    }
}

/// Drop leading and trailing whitespace tokens.
fn trim_whitespace(mut tokens: Vec<Token>) -> Vec<Token> {
    while tokens.last().is_some_and(Token::is_whitespace) {
        let _ = tokens.pop();
    }
    if let Some(first_non_ws) = tokens.iter().position(|t| !t.is_whitespace()) {
        let _ = tokens.drain(..first_non_ws);
    }
    tokens
}

/// Detect and strip a trailing `! S* important` from a declaration value.
///
/// [§ 6.4.2 !important rules](https://www.w3.org/TR/CSS21/cascade.html#important-rules)
fn split_important(mut value: Vec<Token>) -> (Vec<Token>, bool) {
    let mut cut = value.len();

    // Trailing whitespace.
    while cut > 0 && value[cut - 1].is_whitespace() {
        cut -= 1;
    }
    // The "important" identifier.
    if cut == 0 || !value[cut - 1].is_ident("important") {
        return (value, false);
    }
    cut -= 1;
    // Whitespace between `!` and `important`.
    while cut > 0 && value[cut - 1].is_whitespace() {
        cut -= 1;
    }
    // The `!` delimiter.
    if cut == 0 || !value[cut - 1].is_char('!') {
        return (value, false);
    }
    cut -= 1;
    value.truncate(cut);
    (trim_whitespace(value), true)
}

#[cfg(test)]
mod tests {
    use bilby_common::Interner;

    use super::*;
    use crate::tokenizer::Tokenizer;

    fn events(css: &str, mode: Mode) -> Vec<Event> {
        let interner = Interner::new();
        let tokens = Tokenizer::new(css, interner).run();
        let mut parser = Parser::new(tokens, mode);
        let mut out = Vec::new();
        while let Some(event) = parser.next_event() {
            out.push(event);
        }
        out
    }

    #[test]
    fn test_simple_ruleset() {
        let out = events("p { color: red }", Mode::Stylesheet);
        assert!(matches!(out[0], Event::StartStylesheet));
        assert!(matches!(out[1], Event::StartRuleset(_)));
        assert!(
            matches!(&out[2], Event::Declaration { property, important: false, .. }
                if property.as_str() == "color")
        );
        assert!(matches!(out[3], Event::EndRuleset));
        assert!(matches!(out[4], Event::EndStylesheet));
    }

    #[test]
    fn test_important_is_split_off() {
        let out = events("p { color: red ! important ; }", Mode::Stylesheet);
        let Some(Event::Declaration { value, important, .. }) = out
            .iter()
            .find(|e| matches!(e, Event::Declaration { .. }))
        else {
            panic!("no declaration event");
        };
        assert!(*important);
        assert_eq!(value.len(), 1, "value should be just the ident 'red'");
    }

    #[test]
    fn test_semicolon_at_rule() {
        let out = events("@import url(a.css);", Mode::Stylesheet);
        assert!(
            matches!(&out[1], Event::StartAtRule { name, .. } if name.as_str() == "import")
        );
        assert!(matches!(out[2], Event::EndAtRule));
    }

    #[test]
    fn test_at_rule_with_nested_rulesets() {
        let out = events("@media screen { p { color: red } }", Mode::Stylesheet);
        assert!(
            matches!(&out[1], Event::StartAtRule { name, .. } if name.as_str() == "media")
        );
        assert!(matches!(out[2], Event::StartRuleset(_)));
        assert!(matches!(out[3], Event::Declaration { .. }));
        assert!(matches!(out[4], Event::EndRuleset));
        assert!(matches!(out[5], Event::EndAtRule));
    }

    #[test]
    fn test_malformed_declaration_is_discarded() {
        // [§ 4.2] "Malformed declarations" - the bad declaration must
        // not damage the following one.
        let out = events("p { color&: red; background: white }", Mode::Stylesheet);
        let declarations: Vec<_> = out
            .iter()
            .filter(|e| matches!(e, Event::Declaration { .. }))
            .collect();
        assert_eq!(declarations.len(), 1);
        assert!(
            matches!(declarations[0], Event::Declaration { property, .. }
                if property.as_str() == "background")
        );
    }

    #[test]
    fn test_unclosed_constructs_close_at_eof() {
        let out = events("@media screen { p { color: red ", Mode::Stylesheet);
        assert!(out.iter().any(|e| matches!(e, Event::EndRuleset)));
        assert!(out.iter().any(|e| matches!(e, Event::EndAtRule)));
        assert!(matches!(out.last(), Some(Event::EndStylesheet)));
    }

    #[test]
    fn test_inline_mode_wraps_declarations() {
        let out = events("color: red; margin: 0", Mode::InlineStyle);
        assert!(matches!(out[0], Event::StartStylesheet));
        assert!(matches!(&out[1], Event::StartRuleset(p) if p.is_empty()));
        let declarations = out
            .iter()
            .filter(|e| matches!(e, Event::Declaration { .. }))
            .count();
        assert_eq!(declarations, 2);
        assert!(matches!(out.last(), Some(Event::EndStylesheet)));
    }

    #[test]
    fn test_value_with_function_keeps_semicolons_nested() {
        let out = events("p { background: url(a;b.png) }", Mode::Stylesheet);
        // The ; inside the URI must not split the declaration.
        let declarations = out
            .iter()
            .filter(|e| matches!(e, Event::Declaration { .. }))
            .count();
        assert_eq!(declarations, 1);
    }
}

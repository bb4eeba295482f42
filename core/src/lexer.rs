//! Ring-buffered streaming lexer shared by every language component.
//!
//! The ring buffer itself is a [`std::collections::VecDeque`] bounded at
//! [`RING_CAPACITY`] bytes — a real ring buffer data structure, not a
//! simulation of one. Bytes fed beyond that capacity queue in `pending`
//! until scanning retires enough of the window to admit them. When a token's
//! content outgrows the window before a delimiter is found, its bytes are
//! evacuated into a heap-allocated [`TokenBuffer`] so the window can keep
//! draining `pending`; this is the boundary-crossing mechanism that lets a
//! single token span more than one fed chunk.

use std::collections::VecDeque;

use crate::span::PackedSpan;
use crate::token::{Token, TokenFlags, TokenKind};

/// Bound on the lexer's in-flight scanning window.
pub const RING_CAPACITY: usize = 4096;

/// Which language's keyword/structural rules this lexer instance enforces.
///
/// The token shape and ring-buffer mechanics are shared; only the keyword
/// table and a handful of structural token kinds differ, so the discriminant
/// lives on the lexer, not on [`Token`] itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Json,
    Zon,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LexerState {
    Start,
    InString,
    InStringEscape,
    InNumber,
    InIdentifier,
    InCommentSingle,
    InCommentMulti,
    InCharLiteral,
    Err,
}

/// Heap-backed accumulator engaged only when a token straddles the ring
/// window. Freed as soon as the straddling token completes (or the lexer
/// enters `err` state and resynchronizes).
#[derive(Debug, Clone)]
struct TokenBuffer {
    start_position: usize,
    state: LexerState,
    depth_at_start: u8,
    flags: TokenFlags,
    kind_hint: TokenKind,
    bytes: Vec<u8>,
}

/// A zero-steady-state-allocation streaming lexer producing 16-byte packed
/// [`Token`]s from a byte stream fed incrementally via [`Lexer::feed`].
pub struct Lexer {
    language: Language,
    ring: VecDeque<u8>,
    window_start: usize,
    pending: VecDeque<u8>,
    pos: usize,
    line: u32,
    column: u32,
    depth: u32,
    token_start: usize,
    state: LexerState,
    flags: TokenFlags,
    closed: bool,
    emitted_eof: bool,
    peeked: Option<Token>,
    token_buffer: Option<TokenBuffer>,
    /// Bytes for the most recently emitted straddling token, kept alive until
    /// the next call to `next`/`peek` so callers can read them via
    /// [`Lexer::token_bytes`].
    last_straddling: Option<(PackedSpan, Vec<u8>)>,
    emit_trivia: bool,
}

impl Lexer {
    /// Creates an empty lexer ready to receive input via [`feed`](Self::feed).
    pub fn new(language: Language) -> Self {
        Self {
            language,
            ring: VecDeque::with_capacity(RING_CAPACITY),
            window_start: 0,
            pending: VecDeque::new(),
            pos: 0,
            line: 0,
            column: 0,
            depth: 0,
            token_start: 0,
            state: LexerState::Start,
            flags: TokenFlags::empty(),
            closed: false,
            emitted_eof: false,
            peeked: None,
            token_buffer: None,
            last_straddling: None,
            emit_trivia: false,
        }
    }

    /// Seeds a lexer with a complete, already-known source buffer and closes
    /// it for further input. This is the common "parse this whole file" path.
    pub fn from_source(language: Language, source: &[u8]) -> Self {
        let mut lexer = Self::new(language);
        lexer.feed(source);
        lexer.finish();
        lexer
    }

    /// Alias for [`Lexer::from_source`], under the `init(input)` naming some
    /// callers expect from a one-shot lex.
    pub fn init(language: Language, input: &[u8]) -> Self {
        Self::from_source(language, input)
    }

    /// Whether trivia tokens (`whitespace`, `comment`) are emitted rather
    /// than silently skipped. Default: skip, since most callers only care
    /// about the value tree.
    pub fn set_emit_trivia(&mut self, emit: bool) {
        self.emit_trivia = emit;
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Appends bytes to the lexer's input for streaming callers.
    pub fn feed(&mut self, bytes: &[u8]) {
        tracing::trace!(fed = bytes.len(), pending = self.pending.len(), "lexer fed bytes");
        self.pending.extend(bytes.iter().copied());
        self.admit();
    }

    /// Signals that no more bytes will ever be fed. Until this is called, a
    /// token starved mid-scan yields a `continuation` token rather than an
    /// `err`/`eof` resolution, since more input may still be coming.
    pub fn finish(&mut self) {
        self.closed = true;
    }

    fn admit(&mut self) {
        while self.ring.len() < RING_CAPACITY {
            match self.pending.pop_front() {
                Some(b) => self.ring.push_back(b),
                None => break,
            }
        }
    }

    fn byte_at(&self, abs: usize) -> Option<u8> {
        if abs < self.window_start {
            return None;
        }
        self.ring.get(abs - self.window_start).copied()
    }

    /// Retires ring bytes strictly before `abs`, freeing room to admit more
    /// `pending` bytes. Never retires bytes still needed by the in-progress
    /// token (callers only retire up to `token_start`).
    fn retire_to(&mut self, abs: usize) {
        while self.window_start < abs && !self.ring.is_empty() {
            self.ring.pop_front();
            self.window_start += 1;
        }
        self.admit();
    }

    /// True once neither the ring nor the pending backlog has a next byte.
    fn starved(&self) -> bool {
        self.byte_at(self.pos).is_none()
    }

    fn advance(&mut self) -> Option<u8> {
        let b = self.byte_at(self.pos)?;
        self.pos += 1;
        if b == b'\n' {
            self.line += 1;
            self.column = 0;
        } else {
            self.column += 1;
        }
        Some(b)
    }

    fn peek_byte(&self) -> Option<u8> {
        self.byte_at(self.pos)
    }

    fn peek_byte_at(&self, offset: usize) -> Option<u8> {
        self.byte_at(self.pos + offset)
    }

    /// Returns the bytes of a just-emitted token. Non-continuation tokens
    /// that completed within the current window are read straight out of the
    /// ring; straddling tokens are read from the retained evacuation buffer.
    /// Returns `None` if the span has already been retired — callers must
    /// read token text before calling `next`/`peek` again. Token bytes are
    /// never stored in bulk by the core; consumers that need them buffer
    /// their own slice.
    pub fn token_bytes(&self, tok: &Token) -> Option<Vec<u8>> {
        if let Some((span, bytes)) = &self.last_straddling {
            if *span == tok.span {
                return Some(bytes.clone());
            }
        }
        let start = tok.span.start_u32() as usize;
        let end = tok.span.end_u32() as usize;
        if start < self.window_start {
            return None;
        }
        let mut out = Vec::with_capacity(end.saturating_sub(start));
        for abs in start..end {
            out.push(self.byte_at(abs)?);
        }
        Some(out)
    }

    #[inline]
    fn push_flag(&mut self, f: TokenFlags) {
        self.flags.insert(f);
    }

    fn depth_u8(&self) -> u8 {
        self.depth.min(u8::MAX as u32) as u8
    }

    fn bump_open(&mut self) {
        self.depth = self.depth.saturating_add(1);
    }

    fn bump_close(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    fn make_token(&self, kind: TokenKind, start: usize, end: usize, depth_at_start: u8) -> Token {
        Token::new(
            PackedSpan::from_usize(start, end),
            kind,
            depth_at_start,
            self.flags,
            0,
        )
    }

    /// Begins evacuating the in-progress token into a heap `TokenBuffer`,
    /// recording everything needed to resume scanning once more input
    /// arrives.
    fn engage_token_buffer(&mut self, kind_hint: TokenKind, depth_at_start: u8) {
        if self.token_buffer.is_some() {
            return;
        }
        let mut bytes = Vec::with_capacity(self.pos - self.token_start);
        for abs in self.token_start..self.pos {
            if let Some(b) = self.byte_at(abs) {
                bytes.push(b);
            }
        }
        self.token_buffer = Some(TokenBuffer {
            start_position: self.token_start,
            state: self.state,
            depth_at_start,
            flags: self.flags,
            kind_hint,
            bytes,
        });
        self.retire_to(self.pos);
    }

    fn resume_from_token_buffer(&mut self) {
        if let Some(tb) = &self.token_buffer {
            self.token_start = tb.start_position;
            self.state = tb.state;
            self.flags = tb.flags;
        }
    }

    /// Finalizes a straddling token: appends the tail collected since
    /// resuming onto the buffered prefix and clears the buffer. Returns
    /// `None` if no token buffer was engaged (callers only invoke this when
    /// `self.token_buffer.is_some()`).
    fn finish_token_buffer(&mut self, end: usize) -> Option<(usize, u8, Vec<u8>)> {
        let tb = self.token_buffer.take()?;
        let mut bytes = tb.bytes;
        for abs in tb.start_position.max(self.window_start)..end {
            if abs >= tb.start_position + bytes.len() {
                if let Some(b) = self.byte_at(abs) {
                    bytes.push(b);
                }
            }
        }
        Some((tb.start_position, tb.depth_at_start, bytes))
    }

    /// Builds the final token for a straddling completion (using `kind`,
    /// which the caller determines from what was actually scanned — the
    /// buffer's own `kind_hint` only labels intermediate `continuation`
    /// tokens), falling back to a same-window token if no buffer was ever
    /// engaged.
    fn finalize_straddling(&mut self, end: usize, kind: TokenKind, depth_at_start: u8) -> Token {
        match self.finish_token_buffer(end) {
            Some((start, depth, bytes)) => {
                tracing::debug!(start, end, len = bytes.len(), ?kind, "token straddled a ring boundary");
                let span = PackedSpan::from_usize(start, end);
                let tok = Token::new(span, kind, depth, self.flags, 0);
                self.last_straddling = Some((span, bytes));
                tok
            }
            None => self.make_token(kind, self.token_start, end, depth_at_start),
        }
    }

    fn emit_continuation(&mut self, kind_hint: TokenKind, depth_at_start: u8) -> Token {
        self.engage_token_buffer(kind_hint, depth_at_start);
        let span = PackedSpan::from_usize(self.token_start, self.pos);
        Token::new(
            span,
            TokenKind::Continuation,
            depth_at_start,
            self.flags | TokenFlags::CONTINUATION,
            0,
        )
    }

    /// Pulls the next meaningful token, returning `None` only once `eof` has
    /// already been emitted (or, for a still-open stream, when no token is
    /// available right now and the caller should `feed` more bytes).
    pub fn next(&mut self) -> Option<Token> {
        if let Some(tok) = self.peeked.take() {
            return Some(tok);
        }
        self.scan_next()
    }

    /// Non-consuming lookahead of exactly one token.
    pub fn peek(&mut self) -> Option<Token> {
        if self.peeked.is_none() {
            self.peeked = self.scan_next();
        }
        self.peeked
    }

    fn scan_next(&mut self) -> Option<Token> {
        loop {
            if self.emitted_eof {
                return None;
            }
            let tok = self.scan_one()?;
            if tok.is_trivia() && !self.emit_trivia {
                continue;
            }
            return Some(tok);
        }
    }

    fn scan_one(&mut self) -> Option<Token> {
        // Resume a straddling token if one is in flight.
        if self.token_buffer.is_some() {
            self.resume_from_token_buffer();
        } else {
            self.token_start = self.pos;
            self.flags = TokenFlags::empty();
        }

        if self.state == LexerState::Err {
            return self.scan_error_recovery();
        }

        match self.state {
            LexerState::InString => return self.continue_string(),
            LexerState::InStringEscape => return self.continue_string_escape(),
            LexerState::InNumber => return self.continue_number(),
            LexerState::InIdentifier => return self.continue_identifier(),
            LexerState::InCommentSingle => return self.continue_comment_single(),
            LexerState::InCommentMulti => return self.continue_comment_multi(),
            LexerState::InCharLiteral => return self.continue_char_literal(),
            LexerState::Start | LexerState::Err => {}
        }

        self.token_start = self.pos;
        let depth_at_start = self.depth_u8();

        let Some(b) = self.peek_byte() else {
            if self.closed {
                if self.emitted_eof {
                    return None;
                }
                self.emitted_eof = true;
                return Some(self.make_token(TokenKind::Eof, self.pos, self.pos, depth_at_start));
            }
            return None;
        };

        match b {
            b' ' | b'\t' | b'\r' | b'\n' => {
                self.advance();
                while matches!(self.peek_byte(), Some(b' ' | b'\t' | b'\r' | b'\n')) {
                    self.advance();
                }
                Some(self.make_token(TokenKind::Whitespace, self.token_start, self.pos, depth_at_start))
            }
            b'{' => {
                self.advance();
                self.bump_open();
                Some(self.make_token(TokenKind::ObjectStart, self.token_start, self.pos, depth_at_start))
            }
            b'}' => {
                self.advance();
                self.bump_close();
                Some(self.make_token(TokenKind::ObjectEnd, self.token_start, self.pos, depth_at_start))
            }
            b'[' => {
                self.advance();
                self.bump_open();
                Some(self.make_token(TokenKind::ArrayStart, self.token_start, self.pos, depth_at_start))
            }
            b']' => {
                self.advance();
                self.bump_close();
                Some(self.make_token(TokenKind::ArrayEnd, self.token_start, self.pos, depth_at_start))
            }
            b',' => {
                self.advance();
                Some(self.make_token(TokenKind::Comma, self.token_start, self.pos, depth_at_start))
            }
            b':' => {
                self.advance();
                Some(self.make_token(TokenKind::Colon, self.token_start, self.pos, depth_at_start))
            }
            b'=' if self.language == Language::Zon => {
                self.advance();
                Some(self.make_token(TokenKind::Equals, self.token_start, self.pos, depth_at_start))
            }
            b'"' => {
                self.advance();
                self.state = LexerState::InString;
                self.continue_string()
            }
            b'\'' if self.language == Language::Zon => {
                self.advance();
                self.state = LexerState::InCharLiteral;
                self.continue_char_literal()
            }
            b'/' if self.peek_byte_at(1) == Some(b'/') => {
                self.advance();
                self.advance();
                self.state = LexerState::InCommentSingle;
                self.continue_comment_single()
            }
            b'/' if self.peek_byte_at(1) == Some(b'*') => {
                self.advance();
                self.advance();
                self.state = LexerState::InCommentMulti;
                self.continue_comment_multi()
            }
            b'-' | b'0'..=b'9' => {
                if b == b'-' {
                    self.push_flag(TokenFlags::IS_NEGATIVE);
                }
                self.advance();
                self.state = LexerState::InNumber;
                self.continue_number()
            }
            b'.' if self.language == Language::Zon && starts_struct_literal(self) => {
                self.advance();
                self.advance();
                self.bump_open();
                Some(self.make_token(TokenKind::StructStart, self.token_start, self.pos, depth_at_start))
            }
            b'.' if self.language == Language::Zon && is_ident_start(self.peek_byte_at(1)) => {
                self.advance();
                self.state = LexerState::InIdentifier;
                self.continue_identifier()
            }
            b'@' if self.language == Language::Zon => self.lex_zon_keyword_like(b"@import", TokenKind::Import, depth_at_start),
            b't' => self.lex_keyword(b"true", TokenKind::BooleanTrue, depth_at_start),
            b'f' => self.lex_keyword(b"false", TokenKind::BooleanFalse, depth_at_start),
            b'n' => self.lex_keyword(b"null", TokenKind::NullValue, depth_at_start),
            b if is_ident_start(Some(b)) && self.language == Language::Zon => {
                self.state = LexerState::InIdentifier;
                self.continue_identifier()
            }
            _ => {
                self.advance();
                self.state = LexerState::Err;
                self.push_flag(TokenFlags::HAS_ERROR);
                Some(self.make_token(TokenKind::Err, self.token_start, self.pos, depth_at_start))
            }
        }
    }

    fn lex_keyword(&mut self, word: &[u8], kind: TokenKind, depth_at_start: u8) -> Option<Token> {
        for (i, expect) in word.iter().enumerate() {
            match self.peek_byte_at(i) {
                Some(b) if b == *expect => continue,
                _ => {
                    // Mismatch: consume one byte, flag as an error token.
                    self.advance();
                    self.state = LexerState::Err;
                    self.push_flag(TokenFlags::HAS_ERROR);
                    return Some(self.make_token(TokenKind::Err, self.token_start, self.pos, depth_at_start));
                }
            }
        }
        for _ in 0..word.len() {
            self.advance();
        }
        Some(self.make_token(kind, self.token_start, self.pos, depth_at_start))
    }

    fn lex_zon_keyword_like(&mut self, word: &[u8], kind: TokenKind, depth_at_start: u8) -> Option<Token> {
        self.lex_keyword(word, kind, depth_at_start)
    }

    fn continue_string(&mut self) -> Option<Token> {
        let depth_at_start = self.token_buffer.as_ref().map(|t| t.depth_at_start).unwrap_or(self.depth_u8());
        loop {
            let Some(b) = self.peek_byte() else {
                if self.closed {
                    self.state = LexerState::Err;
                    self.push_flag(TokenFlags::HAS_ERROR);
                    let span = PackedSpan::from_usize(self.token_start, self.pos);
                    self.state = LexerState::Start;
                    return Some(Token::new(span, TokenKind::Err, depth_at_start, self.flags, 0));
                }
                return Some(self.emit_continuation(TokenKind::StringValue, depth_at_start));
            };
            match b {
                b'\\' => {
                    self.advance();
                    self.push_flag(TokenFlags::HAS_ESCAPES);
                    self.state = LexerState::InStringEscape;
                    return self.continue_string_escape();
                }
                b'"' => {
                    self.advance();
                    self.state = LexerState::Start;
                    let pos = self.pos;
                    return Some(self.finalize_straddling(pos, TokenKind::StringValue, depth_at_start));
                }
                _ => {
                    self.advance();
                }
            }
        }
    }

    fn continue_string_escape(&mut self) -> Option<Token> {
        let depth_at_start = self.token_buffer.as_ref().map(|t| t.depth_at_start).unwrap_or(self.depth_u8());
        if self.peek_byte().is_none() {
            if self.closed {
                self.state = LexerState::Err;
                self.push_flag(TokenFlags::HAS_ERROR);
                let span = PackedSpan::from_usize(self.token_start, self.pos);
                self.state = LexerState::Start;
                return Some(Token::new(span, TokenKind::Err, depth_at_start, self.flags, 0));
            }
            return Some(self.emit_continuation(TokenKind::StringValue, depth_at_start));
        }
        self.advance();
        self.state = LexerState::InString;
        self.continue_string()
    }

    fn continue_number(&mut self) -> Option<Token> {
        let depth_at_start = self.token_buffer.as_ref().map(|t| t.depth_at_start).unwrap_or(self.depth_u8());
        loop {
            let Some(b) = self.peek_byte() else {
                if self.closed {
                    return Some(self.finish_number(depth_at_start));
                }
                return Some(self.emit_continuation(TokenKind::NumberValue, depth_at_start));
            };
            match b {
                b'0'..=b'9' => {
                    self.advance();
                }
                b'.' if !self.flags.contains(TokenFlags::IS_FLOAT) && !self.flags.contains(TokenFlags::IS_SCIENTIFIC) => {
                    self.push_flag(TokenFlags::IS_FLOAT);
                    self.advance();
                }
                b'e' | b'E' if !self.flags.contains(TokenFlags::IS_SCIENTIFIC) => {
                    self.push_flag(TokenFlags::IS_SCIENTIFIC);
                    self.advance();
                    if matches!(self.peek_byte(), Some(b'+' | b'-')) {
                        self.advance();
                    }
                }
                _ => return Some(self.finish_number(depth_at_start)),
            }
        }
    }

    fn finish_number(&mut self, depth_at_start: u8) -> Token {
        self.state = LexerState::Start;
        let pos = self.pos;
        self.finalize_straddling(pos, TokenKind::NumberValue, depth_at_start)
    }

    fn continue_identifier(&mut self) -> Option<Token> {
        let depth_at_start = self.token_buffer.as_ref().map(|t| t.depth_at_start).unwrap_or(self.depth_u8());
        loop {
            let Some(b) = self.peek_byte() else {
                if self.closed {
                    return Some(self.finish_identifier(depth_at_start));
                }
                return Some(self.emit_continuation(TokenKind::Identifier, depth_at_start));
            };
            if is_ident_continue(b) {
                self.advance();
            } else {
                return Some(self.finish_identifier(depth_at_start));
            }
        }
    }

    fn finish_identifier(&mut self, depth_at_start: u8) -> Token {
        self.state = LexerState::Start;
        let leading_dot = match &self.token_buffer {
            Some(tb) => tb.bytes.first() == Some(&b'.'),
            None => self.byte_at(self.token_start) == Some(b'.'),
        };
        let kind = if leading_dot {
            TokenKind::FieldName
        } else {
            TokenKind::Identifier
        };
        let pos = self.pos;
        self.finalize_straddling(pos, kind, depth_at_start)
    }

    fn continue_comment_single(&mut self) -> Option<Token> {
        let depth_at_start = self.token_buffer.as_ref().map(|t| t.depth_at_start).unwrap_or(self.depth_u8());
        loop {
            match self.peek_byte() {
                Some(b'\n') | None if self.peek_byte() != Some(b'\n') => {
                    if self.closed {
                        self.state = LexerState::Start;
                        return Some(self.make_token(TokenKind::Comment, self.token_start, self.pos, depth_at_start));
                    }
                    return Some(self.emit_continuation(TokenKind::Comment, depth_at_start));
                }
                Some(b'\n') | None => {
                    self.state = LexerState::Start;
                    let pos = self.pos;
                    return Some(self.finalize_straddling(pos, TokenKind::Comment, depth_at_start));
                }
                Some(_) => {
                    self.advance();
                }
            }
        }
    }

    fn continue_comment_multi(&mut self) -> Option<Token> {
        let depth_at_start = self.token_buffer.as_ref().map(|t| t.depth_at_start).unwrap_or(self.depth_u8());
        loop {
            match self.peek_byte() {
                Some(b'*') if self.peek_byte_at(1) == Some(b'/') => {
                    self.advance();
                    self.advance();
                    self.state = LexerState::Start;
                    let pos = self.pos;
                    return Some(self.finalize_straddling(pos, TokenKind::Comment, depth_at_start));
                }
                Some(_) => {
                    self.advance();
                }
                None => {
                    if self.closed {
                        self.state = LexerState::Err;
                        self.push_flag(TokenFlags::HAS_ERROR);
                        let span = PackedSpan::from_usize(self.token_start, self.pos);
                        self.state = LexerState::Start;
                        return Some(Token::new(span, TokenKind::Err, depth_at_start, self.flags, 0));
                    }
                    return Some(self.emit_continuation(TokenKind::Comment, depth_at_start));
                }
            }
        }
    }

    fn continue_char_literal(&mut self) -> Option<Token> {
        let depth_at_start = self.token_buffer.as_ref().map(|t| t.depth_at_start).unwrap_or(self.depth_u8());
        loop {
            match self.peek_byte() {
                Some(b'\\') => {
                    self.advance();
                    self.push_flag(TokenFlags::HAS_ESCAPES);
                    if self.peek_byte().is_some() {
                        self.advance();
                    }
                }
                Some(b'\'') => {
                    self.advance();
                    self.state = LexerState::Start;
                    let pos = self.pos;
                    return Some(self.finalize_straddling(pos, TokenKind::CharLiteral, depth_at_start));
                }
                Some(_) => {
                    self.advance();
                }
                None => {
                    if self.closed {
                        self.state = LexerState::Err;
                        self.push_flag(TokenFlags::HAS_ERROR);
                        let span = PackedSpan::from_usize(self.token_start, self.pos);
                        self.state = LexerState::Start;
                        return Some(Token::new(span, TokenKind::Err, depth_at_start, self.flags, 0));
                    }
                    return Some(self.emit_continuation(TokenKind::CharLiteral, depth_at_start));
                }
            }
        }
    }

    /// After an `err` token, resynchronize at the next structural delimiter
    /// (`,`, `}`, `]`) rather than re-entering token dispatch byte by byte.
    fn scan_error_recovery(&mut self) -> Option<Token> {
        self.state = LexerState::Start;
        self.token_start = self.pos;
        self.scan_one_non_recovery()
    }

    fn scan_one_non_recovery(&mut self) -> Option<Token> {
        // Re-enter the normal dispatch; `state` was just reset to `Start`.
        self.scan_one()
    }
}

fn is_ident_start(b: Option<u8>) -> bool {
    matches!(b, Some(b) if b.is_ascii_alphabetic() || b == b'_')
}

fn is_ident_continue(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Heuristic used only to decide whether a leading `.` followed by `{`
/// starts an anonymous ZON struct/tuple literal (`.{`) rather than a
/// `.field` name or `.EnumLiteral`.
fn starts_struct_literal(lexer: &Lexer) -> bool {
    lexer.peek_byte_at(1) == Some(b'{')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex_all(language: Language, src: &str) -> Vec<Token> {
        let mut lexer = Lexer::from_source(language, src.as_bytes());
        let mut out = Vec::new();
        while let Some(tok) = lexer.next() {
            let is_eof = tok.kind == TokenKind::Eof;
            out.push(tok);
            if is_eof {
                break;
            }
        }
        out
    }

    #[test]
    fn totality_empty_input() {
        let toks = lex_all(Language::Json, "");
        assert_eq!(toks.len(), 1);
        assert_eq!(toks[0].kind, TokenKind::Eof);
        let mut lexer = Lexer::from_source(Language::Json, b"");
        assert!(lexer.next().is_some());
        assert!(lexer.next().is_none());
        assert!(lexer.next().is_none());
    }

    #[test]
    fn simple_object_tokens() {
        let toks = lex_all(Language::Json, r#"{"name": "test", "value": 42}"#);
        let kinds: Vec<_> = toks.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::ObjectStart,
                TokenKind::StringValue,
                TokenKind::Colon,
                TokenKind::StringValue,
                TokenKind::Comma,
                TokenKind::StringValue,
                TokenKind::Colon,
                TokenKind::NumberValue,
                TokenKind::ObjectEnd,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn depth_tracks_nesting_and_returns_to_zero() {
        let toks = lex_all(Language::Json, "[[1, 2], [3]]");
        let mut prev = 0u8;
        for t in &toks {
            let delta = t.depth as i16 - prev as i16;
            assert!(delta.abs() <= 1, "depth jumped by more than 1: {:?}", t);
            prev = t.depth;
        }
        assert_eq!(toks.last().unwrap().depth, 0);
    }

    #[test]
    fn unterminated_string_emits_err() {
        let toks = lex_all(Language::Json, r#""abc"#);
        assert!(toks.iter().any(|t| t.kind == TokenKind::Err));
    }

    #[test]
    fn boundary_straddling_string_via_feed() {
        let mut lexer = Lexer::new(Language::Json);
        let prefix = format!("{}\"abc", " ".repeat(4090));
        assert_eq!(prefix.len(), 4095);
        lexer.feed(prefix.as_bytes());

        let mut saw_continuation = false;
        let mut final_tok = None;
        loop {
            match lexer.next() {
                Some(t) if t.kind == TokenKind::Continuation => {
                    saw_continuation = true;
                }
                Some(t) if t.kind == TokenKind::Whitespace => continue,
                Some(t) => {
                    final_tok = Some(t);
                    break;
                }
                None => {
                    lexer.feed(b"def\"");
                }
            }
        }
        assert!(saw_continuation);
        let tok = final_tok.expect("string token");
        assert_eq!(tok.kind, TokenKind::StringValue);
        assert!(!tok.flags.contains(TokenFlags::CONTINUATION));
        let bytes = lexer.token_bytes(&tok).expect("bytes still available");
        assert_eq!(&bytes, br#""abcdef""#);
    }

    #[test]
    fn number_flags_set() {
        let toks = lex_all(Language::Json, "-3.14e10");
        let n = &toks[0];
        assert_eq!(n.kind, TokenKind::NumberValue);
        assert!(n.flags.contains(TokenFlags::IS_NEGATIVE));
        assert!(n.flags.contains(TokenFlags::IS_FLOAT));
        assert!(n.flags.contains(TokenFlags::IS_SCIENTIFIC));
    }

    #[test]
    fn zon_struct_and_fields() {
        let toks = lex_all(Language::Zon, r#".{ .name = "zz", .version = "1.0" }"#);
        let kinds: Vec<_> = toks.iter().map(|t| t.kind).collect();
        assert_eq!(kinds[0], TokenKind::StructStart);
        assert!(kinds.contains(&TokenKind::FieldName));
        assert!(kinds.contains(&TokenKind::Equals));
    }

    #[test]
    fn large_unterminated_string_is_linear() {
        let body = "x".repeat(1_000_000);
        let src = format!("\"{}", body);
        let toks = lex_all(Language::Json, &src);
        assert_eq!(toks.last().unwrap().kind, TokenKind::Err);
    }
}

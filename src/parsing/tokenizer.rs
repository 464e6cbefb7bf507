use super::source::{SourceOffset, Span};

use regex::{Regex, Captures};
use once_cell::sync::Lazy;

/// A cursor into a unit expression. Every read either consumes a
/// prefix of the remaining input or leaves the state untouched.
#[derive(Debug, Clone)]
pub struct TokenizerState<'a> {
  input: &'a str,
  position: SourceOffset,
}

#[derive(Debug, Clone)]
pub struct TokenizerMatch<'a> {
  matched_str: &'a str,
  start: SourceOffset,
  end: SourceOffset,
}

#[derive(Debug)]
pub struct TokenizerCaptures<'a> {
  captures: Captures<'a>,
  start: SourceOffset,
  end: SourceOffset,
}

impl<'a> TokenizerState<'a> {
  pub fn new(input: &'a str) -> Self {
    Self {
      input,
      position: SourceOffset(0)
    }
  }

  pub fn remaining_len(&self) -> usize {
    self.input.len()
  }

  pub fn is_eof(&self) -> bool {
    self.input.is_empty()
  }

  /// The unconsumed portion of the input.
  pub fn rest(&self) -> &'a str {
    self.input
  }

  pub fn peek(&self) -> Option<char> {
    self.input.chars().next()
  }

  pub fn current_pos(&self) -> SourceOffset {
    self.position
  }

  /// Advances the position of `self` by `amount` bytes. Returns a
  /// [`TokenizerMatch`] indicating the substring matched by the
  /// skipped portion. This method will never advance beyond
  /// one-past-the-end of the input.
  ///
  /// `amount` must land on a character boundary.
  pub fn advance(&mut self, mut amount: usize) -> TokenizerMatch<'a> {
    amount = amount.min(self.input.len());

    let match_pos = self.current_pos();
    let (prefix, suffix) = self.input.split_at(amount);
    self.position.0 += amount;
    self.input = suffix;
    TokenizerMatch {
      matched_str: prefix,
      start: match_pos,
      end: match_pos + amount,
    }
  }

  /// Consumes the next character if it satisfies `pred`.
  pub fn read_char_if(&mut self, pred: impl FnOnce(char) -> bool) -> Option<char> {
    let c = self.peek().filter(|c| pred(*c))?;
    self.advance(c.len_utf8());
    Some(c)
  }

  pub fn read_literal(&mut self, literal: &str) -> Option<TokenizerMatch<'a>> {
    self.input.starts_with(literal).then(|| {
      self.advance(literal.len())
    })
  }

  /// If the current position of the string matches the given regex,
  /// returns the matched string and advances the tokenizer state. If
  /// not, returns `None`.
  ///
  /// The regex MUST be anchored at the start of the input. This
  /// function may panic if that precondition is not satisfied.
  pub fn read_regex(&mut self, regex: &Regex) -> Option<TokenizerMatch<'a>> {
    let m = regex.find(self.input)?;
    assert_eq!(m.start(), 0, "Regex must be anchored at the start of the input");

    Some(self.advance(m.len()))
  }

  pub fn read_regex_with_captures(&mut self, regex: &Regex) -> Option<TokenizerCaptures<'a>> {
    let c = regex.captures(self.input)?;
    let whole = c.get(0)?;
    assert_eq!(whole.start(), 0, "Regex must be anchored at the start of the input");
    let m = self.advance(whole.len());
    Some(TokenizerCaptures {
      captures: c,
      start: m.start(),
      end: m.end(),
    })
  }

  pub fn read_many<T, F>(&mut self, mut function: F) -> Vec<T>
  where F: FnMut(&mut Self) -> Option<T> {
    let mut output = Vec::new();
    while let Some(item) = function(self) {
      output.push(item);
    }
    output
  }

  pub fn consume_spaces(&mut self) {
    static RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*").unwrap());
    self.read_regex(&RE);
  }
}

impl<'h> TokenizerMatch<'h> {
  pub fn as_str(&self) -> &'h str {
    self.matched_str
  }
  pub fn start(&self) -> SourceOffset {
    self.start
  }
  pub fn end(&self) -> SourceOffset {
    self.end
  }
  pub fn span(&self) -> Span {
    Span::new(self.start, self.end)
  }
  pub fn is_empty(&self) -> bool {
    self.start == self.end
  }
}

impl<'h> TokenizerCaptures<'h> {
  pub fn as_str(&self) -> &'h str {
    self.captures.get(0).map_or("", |m| m.as_str())
  }
  pub fn get(&self, i: usize) -> Option<&'h str> {
    self.captures.get(i).map(|m| m.as_str())
  }
  pub fn start(&self) -> SourceOffset {
    self.start
  }
  pub fn end(&self) -> SourceOffset {
    self.end
  }
  pub fn span(&self) -> Span {
    Span::new(self.start, self.end)
  }
}

impl Default for TokenizerState<'static> {
  fn default() -> Self {
    Self::new("")
  }
}

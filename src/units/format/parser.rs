//! Recursive descent parser for unit expressions such as `kg·m/s²`,
//! `km/h` or `(K*5/9)+459.67`.

use crate::parsing::source::{SourceOffset, Span};
use crate::parsing::tokenizer::TokenizerState;
use crate::units::converter::Converter;
use crate::units::power::RationalPower;
use crate::units::rational::ExactRational;
use crate::units::simplifier::normalize;
use crate::units::unit::Unit;

use either::Either;
use num::BigInt;
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use std::str::FromStr;

/// Characters which can never appear in a unit name.
pub const STRUCTURAL_CHARS: &str = "·*/()[]^+-;<>{}|&!?=:,⁰¹²³⁴⁵⁶⁷⁸⁹⁻";

static IDENTIFIER_RE: Lazy<Regex> = Lazy::new(|| {
  Regex::new(&format!(r"^[^\s\d{}]+", regex::escape(STRUCTURAL_CHARS))).unwrap()
});

static NUMBER_RE: Lazy<Regex> = Lazy::new(|| {
  Regex::new(r"^-?[0-9]+(\.[0-9]*)?([eE][+-]?[0-9]+)?").unwrap()
});

static UNSIGNED_NUMBER_RE: Lazy<Regex> = Lazy::new(|| {
  Regex::new(r"^[0-9]+(\.[0-9]*)?([eE][+-]?[0-9]+)?").unwrap()
});

static EXPONENT_RE: Lazy<Regex> = Lazy::new(|| {
  Regex::new(r"^([+-]?[0-9]+)(?::([0-9]+))?").unwrap()
});

static BARE_EXPONENT_RE: Lazy<Regex> = Lazy::new(|| {
  Regex::new(r"^([0-9]+)(?::([0-9]+))?").unwrap()
});

static SUPERSCRIPTS: phf::Map<char, char> = phf::phf_map! {
  '⁰' => '0',
  '¹' => '1',
  '²' => '2',
  '³' => '3',
  '⁴' => '4',
  '⁵' => '5',
  '⁶' => '6',
  '⁷' => '7',
  '⁸' => '8',
  '⁹' => '9',
  '⁻' => '-',
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} at {span}")]
pub struct ParseError {
  pub kind: ParseErrorKind,
  pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ParseErrorKind {
  #[error("Unknown unit '{0}'")]
  UnknownIdentifier(String),
  #[error("Malformed exponent '{0}'")]
  MalformedExponent(String),
  #[error("Unbalanced parenthesis")]
  UnbalancedParenthesis,
  #[error("Unexpected trailing input '{0}'")]
  TrailingInput(String),
  #[error("Unexpected end of input")]
  UnexpectedEnd,
  #[error("Invalid number '{0}'")]
  InvalidNumber(String),
  #[error("Unexpected token '{0}'")]
  UnexpectedToken(String),
}

/// A numeric scale factor. Integers and their ratios stay exact;
/// anything involving a decimal is a float.
type Scale = Either<ExactRational, f64>;

enum Element {
  Power(RationalPower),
  Number(Scale),
}

/// The powers and scale factors of a `*`/`/` chain, accumulated
/// left to right.
struct TermBuilder {
  powers: Vec<RationalPower>,
  scale: Scale,
}

struct ExprParser<'r> {
  text: &'r str,
  resolve: &'r dyn Fn(&str) -> Option<Unit>,
}

/// Whether `name` consists of a single identifier token.
pub fn is_identifier(name: &str) -> bool {
  IDENTIFIER_RE.find(name).is_some_and(|m| m.len() == name.len())
}

/// Parses a unit expression, resolving names with `resolve`. The
/// empty string (or a blank one) is the dimensionless unit.
pub fn parse_unit(text: &str, resolve: &dyn Fn(&str) -> Option<Unit>) -> Result<Unit, ParseError> {
  let parser = ExprParser { text, resolve };
  let mut state = TokenizerState::new(text);
  let result = parser.parse_all(&mut state);
  if let Err(err) = &result {
    tracing::trace!(input = text, error = %err, "Failed to parse unit expression");
  }
  result
}

impl ParseError {
  pub fn new(kind: ParseErrorKind, span: Span) -> Self {
    Self { kind, span }
  }

  fn at(kind: ParseErrorKind, pos: SourceOffset) -> Self {
    Self::new(kind, Span::empty(pos))
  }

  fn invalid_number(text: &str, span: Span) -> Self {
    Self::new(ParseErrorKind::InvalidNumber(span.slice(text).to_owned()), span)
  }
}

impl<'r> ExprParser<'r> {
  fn parse_all(&self, state: &mut TokenizerState<'_>) -> Result<Unit, ParseError> {
    state.consume_spaces();
    if state.is_eof() {
      return Ok(Unit::one());
    }
    let unit = self.parse_expr(state)?;
    state.consume_spaces();
    if let Some(m) = state.read_literal(")") {
      return Err(ParseError::new(ParseErrorKind::UnbalancedParenthesis, m.span()));
    }
    if !state.is_eof() {
      let start = state.current_pos();
      let rest = state.advance(state.remaining_len());
      return Err(ParseError::new(ParseErrorKind::TrailingInput(rest.as_str().to_owned()), Span::new(start, rest.end())));
    }
    Ok(unit)
  }

  /// `term (('+' | '-') number)?`
  fn parse_expr(&self, state: &mut TokenizerState<'_>) -> Result<Unit, ParseError> {
    let start = state.current_pos();
    let unit = self.parse_term(state)?;
    state.consume_spaces();
    let Some(sign) = state.read_char_if(|c| c == '+' || c == '-') else {
      return Ok(unit);
    };
    state.consume_spaces();
    let Some(m) = state.read_regex(&UNSIGNED_NUMBER_RE) else {
      return Err(unexpected(state));
    };
    let offset = f64::from_str(m.as_str())
      .ok()
      .filter(|x| x.is_finite())
      .ok_or_else(|| ParseError::new(ParseErrorKind::InvalidNumber(m.as_str().to_owned()), m.span()))?;
    let offset = if sign == '-' { -offset } else { offset };
    unit.try_transform(Converter::add(offset))
      .map_err(|_| ParseError::invalid_number(self.text, Span::new(start, m.end())))
  }

  /// `factor (('*' | '·') factor)*`
  fn parse_term(&self, state: &mut TokenizerState<'_>) -> Result<Unit, ParseError> {
    state.consume_spaces();
    let start = state.current_pos();
    let mut term = TermBuilder::new();
    self.parse_factor(state, &mut term)?;
    loop {
      state.consume_spaces();
      if state.read_literal("*").or_else(|| state.read_literal("·")).is_none() {
        break;
      }
      self.parse_factor(state, &mut term)?;
    }
    term.build(self.text, Span::new(start, state.current_pos()))
  }

  /// `element ('/' element)*`
  fn parse_factor(&self, state: &mut TokenizerState<'_>, term: &mut TermBuilder) -> Result<(), ParseError> {
    let element = self.parse_element(state)?;
    term.push(element, false);
    loop {
      state.consume_spaces();
      if state.read_literal("/").is_none() {
        break;
      }
      let element = self.parse_element(state)?;
      term.push(element, true);
    }
    Ok(())
  }

  /// `base exponent?`
  fn parse_element(&self, state: &mut TokenizerState<'_>) -> Result<Element, ParseError> {
    state.consume_spaces();
    if let Some(m) = state.read_regex(&NUMBER_RE) {
      let value = parse_scale(m.as_str())
        .ok_or_else(|| ParseError::new(ParseErrorKind::InvalidNumber(m.as_str().to_owned()), m.span()))?;
      let element = match self.parse_exponent(state, false)? {
        None => value,
        Some(exponent) => raise_scale(value, &exponent)
          .ok_or_else(|| ParseError::invalid_number(self.text, Span::new(m.start(), state.current_pos())))?,
      };
      return Ok(Element::Number(element));
    }
    let base = self.parse_base(state)?;
    let power = match self.parse_exponent(state, true)? {
      None => RationalPower::unit(base),
      Some(exponent) => RationalPower::new(base, exponent),
    };
    Ok(Element::Power(power))
  }

  /// `'(' expr ')' | identifier`
  fn parse_base(&self, state: &mut TokenizerState<'_>) -> Result<Unit, ParseError> {
    if let Some(open) = state.read_literal("(") {
      let unit = self.parse_expr(state)?;
      state.consume_spaces();
      if state.read_literal(")").is_none() {
        return Err(ParseError::new(ParseErrorKind::UnbalancedParenthesis, Span::new(open.start(), state.current_pos())));
      }
      return Ok(unit);
    }
    if let Some(m) = state.read_regex(&IDENTIFIER_RE) {
      return (self.resolve)(m.as_str())
        .ok_or_else(|| ParseError::new(ParseErrorKind::UnknownIdentifier(m.as_str().to_owned()), m.span()));
    }
    Err(unexpected(state))
  }

  /// Reads an exponent, if one is present. Bare digits (as in `s2`)
  /// are only accepted where `allow_bare` is set, since after a
  /// number they would be part of the number.
  fn parse_exponent(&self, state: &mut TokenizerState<'_>, allow_bare: bool) -> Result<Option<ExactRational>, ParseError> {
    let start = state.current_pos();
    let superscript = state.read_many(|state| state.read_char_if(|c| SUPERSCRIPTS.contains_key(&c)));
    if !superscript.is_empty() {
      let digits: String = superscript.iter().filter_map(|c| SUPERSCRIPTS.get(c)).collect();
      let span = Span::new(start, state.current_pos());
      return i64::from_str(&digits)
        .map(|n| Some(ExactRational::from(n)))
        .map_err(|_| ParseError::new(ParseErrorKind::MalformedExponent(superscript.iter().collect()), span));
    }

    let mut operator_state = state.clone();
    operator_state.consume_spaces();
    if operator_state.read_literal("^").or_else(|| operator_state.read_literal("**")).is_some() {
      *state = operator_state;
      state.consume_spaces();
      return match state.read_regex_with_captures(&EXPONENT_RE) {
        Some(c) => exponent_from_parts(c.get(1), c.get(2), c.as_str(), c.span()).map(Some),
        None => {
          let token = next_token(state);
          Err(ParseError::new(ParseErrorKind::MalformedExponent(token.to_owned()), Span::new(state.current_pos(), state.current_pos() + token.len())))
        }
      };
    }

    if allow_bare {
      if let Some(c) = state.read_regex_with_captures(&BARE_EXPONENT_RE) {
        return exponent_from_parts(c.get(1), c.get(2), c.as_str(), c.span()).map(Some);
      }
    }
    Ok(None)
  }
}

impl TermBuilder {
  fn new() -> Self {
    Self { powers: Vec::new(), scale: Either::Left(ExactRational::one()) }
  }

  fn push(&mut self, element: Element, invert: bool) {
    match element {
      Element::Power(power) => {
        self.powers.push(if invert { power.recip() } else { power });
      }
      Element::Number(value) => {
        let value = if invert { invert_scale(value) } else { value };
        self.scale = multiply_scales(&self.scale, &value);
      }
    }
  }

  /// Applies the accumulated scale to the product of the powers.
  /// Fails if the scale, alone or combined with a scale inside a
  /// parenthesized factor, is zero or out of the `f64` range.
  fn build(self, text: &str, span: Span) -> Result<Unit, ParseError> {
    let unit = normalize(self.powers);
    let converter = match self.scale {
      Either::Left(r) if r.is_zero() => None,
      Either::Left(r) => Some(Converter::rational(r)),
      Either::Right(f) => Converter::try_multiply(f).ok(),
    };
    converter
      .and_then(|converter| unit.try_transform(converter).ok())
      .ok_or_else(|| ParseError::invalid_number(text, span))
  }
}

/// Integers are exact, anything else is a float. Zero is rejected,
/// since it is not a valid scale factor.
fn parse_scale(text: &str) -> Option<Scale> {
  if text.contains(['.', 'e', 'E']) {
    let value = f64::from_str(text).ok()?;
    (value != 0.0 && value.is_finite()).then_some(Either::Right(value))
  } else {
    let value = ExactRational::from(BigInt::from_str(text).ok()?);
    (!value.is_zero()).then_some(Either::Left(value))
  }
}

fn scale_to_f64(scale: &Scale) -> f64 {
  match scale {
    Either::Left(r) => r.to_f64(),
    Either::Right(f) => *f,
  }
}

fn multiply_scales(a: &Scale, b: &Scale) -> Scale {
  match (a, b) {
    (Either::Left(a), Either::Left(b)) => Either::Left(a.times(b)),
    _ => Either::Right(scale_to_f64(a) * scale_to_f64(b)),
  }
}

fn invert_scale(scale: Scale) -> Scale {
  match scale {
    Either::Left(r) => match r.inverse() {
      Ok(inv) => Either::Left(inv),
      Err(_) => Either::Right(f64::INFINITY),
    },
    Either::Right(f) => Either::Right(1.0 / f),
  }
}

/// `None` if an exact power would be unreasonably large.
fn raise_scale(scale: Scale, exponent: &ExactRational) -> Option<Scale> {
  match (scale, exponent.to_i64()) {
    (Either::Left(r), Some(n)) => r.checked_powi(n).map(Either::Left),
    (scale, _) => Some(Either::Right(scale_to_f64(&scale).powf(exponent.to_f64()))),
  }
}

fn exponent_from_parts(numer: Option<&str>, denom: Option<&str>, text: &str, span: Span) -> Result<ExactRational, ParseError> {
  let malformed = || ParseError::new(ParseErrorKind::MalformedExponent(text.to_owned()), span);
  let numer = BigInt::from_str(numer.ok_or_else(malformed)?).map_err(|_| malformed())?;
  match denom {
    None => Ok(ExactRational::from(numer)),
    Some(denom) => {
      let denom = BigInt::from_str(denom).map_err(|_| malformed())?;
      ExactRational::try_new(numer, denom).map_err(|_| malformed())
    }
  }
}

/// The text of the next token, for error messages: a run of
/// identifier characters, or else a single character.
fn next_token<'a>(state: &TokenizerState<'a>) -> &'a str {
  let rest = state.rest();
  match IDENTIFIER_RE.find(rest) {
    Some(m) => m.as_str(),
    None => rest.chars().next().map_or("", |c| &rest[..c.len_utf8()]),
  }
}

fn unexpected(state: &TokenizerState<'_>) -> ParseError {
  let pos = state.current_pos();
  match state.peek() {
    None => ParseError::at(ParseErrorKind::UnexpectedEnd, pos),
    Some(')') => ParseError::new(ParseErrorKind::UnbalancedParenthesis, Span::new(pos, pos + 1)),
    Some(_) => {
      let token = next_token(state);
      ParseError::new(ParseErrorKind::UnexpectedToken(token.to_owned()), Span::new(pos, pos + token.len()))
    }
  }
}

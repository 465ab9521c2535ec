//! Single left-to-right scan over one token vector.
//!
//! The session classifies each token as a flag, an argument of the currently
//! open flag, or a positional argument, and writes occurrences into a fresh
//! [`ParseResult`]. Callbacks run as soon as a flag closes.

use tracing::{debug, warn};

use crate::{ParseError, ParseResult, Parser, SpecId};

/// Scan state between tokens.
#[derive(Debug)]
enum State<'t> {
    Idle,
    /// A flag taking arguments is open and collecting.
    AwaitingArgs { id: SpecId, collected: Vec<&'t str> },
}

/// Whether the scan goes on after a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Next,
    /// A directive took over the remaining tokens.
    HandOff,
}

pub(crate) struct Session<'p, 'a, 't> {
    parser: &'p mut Parser<'a>,
    tokens: Vec<&'t str>,
    result: ParseResult,
    state: State<'t>,
    positionals: usize,
    terminated: bool,
}

impl<'p, 'a, 't> Session<'p, 'a, 't> {
    pub(crate) fn new<S: AsRef<str>>(parser: &'p mut Parser<'a>, tokens: &'t [S]) -> Self {
        let result = ParseResult::for_specs(parser.params.iter().map(|param| &param.spec));
        Self {
            parser,
            tokens: tokens.iter().map(|token| token.as_ref()).collect(),
            result,
            state: State::Idle,
            positionals: 0,
            terminated: false,
        }
    }

    /// Runs the scan and returns the result alongside the outcome, so partial
    /// progress survives a failure.
    pub(crate) fn run(mut self) -> (ParseResult, Result<(), ParseError>) {
        let outcome = self.scan();
        (self.result, outcome)
    }

    fn scan(&mut self) -> Result<(), ParseError> {
        for index in 1..self.tokens.len() {
            let token = self.tokens[index];
            debug!(index, token, "Scanning token");

            let step = if self.is_flag_like(token) {
                match token.strip_prefix("--") {
                    Some(body) => self.long_flag(index, body)?,
                    None => self.short_flags(index, &token[1..])?,
                }
            } else if matches!(self.state, State::AwaitingArgs { .. }) {
                self.flag_argument(index, token)?
            } else {
                self.positional(index, token)?
            };

            if step == Step::HandOff {
                return Ok(());
            }
        }

        self.close_open()?;
        self.validate()
    }

    /// A token opens flags when it starts with `-`, is more than a bare `-`,
    /// and no terminator has been seen.
    fn is_flag_like(&self, token: &str) -> bool {
        !self.terminated && token.len() > 1 && token.starts_with('-')
    }

    fn long_flag(&mut self, index: usize, body: &'t str) -> Result<Step, ParseError> {
        self.close_open()?;

        if body.is_empty() && self.parser.terminator {
            debug!(index, "Terminator reached, remaining tokens are positional");
            self.terminated = true;
            return Ok(Step::Next);
        }

        let (name, inline) = match body.split_once('=') {
            Some((name, value)) => (name, Some(value)),
            None => (body, None),
        };
        let id = self.parser.resolve_long(name)?;
        self.activate(id, index, inline)
    }

    fn short_flags(&mut self, index: usize, cluster: &'t str) -> Result<Step, ParseError> {
        for (offset, short) in cluster.char_indices() {
            self.close_open()?;

            let id = self.parser.resolve_short(short)?;
            let rest = &cluster[offset + short.len_utf8()..];
            if self.parser.params[id.0].spec.is_leading() && !rest.is_empty() {
                let value = rest.strip_prefix('=').unwrap_or(rest);
                return self.activate(id, index, Some(value));
            }

            if self.activate(id, index, None)? == Step::HandOff {
                return Ok(Step::HandOff);
            }
        }
        Ok(Step::Next)
    }

    /// Records an occurrence of `id` and moves into the state its arity
    /// calls for.
    fn activate(
        &mut self,
        id: SpecId,
        index: usize,
        inline: Option<&'t str>,
    ) -> Result<Step, ParseError> {
        let param = &mut self.parser.params[id.0];
        param.occurrences += 1;
        param.satisfied = true;
        self.result.record_occurrence(id);

        let spec = &self.parser.params[id.0].spec;
        if !spec.takes_args() {
            if let Some(value) = inline {
                warn!(parameter = %spec, value, "Discarding inline value for flag without arguments");
            }
            self.dispatch(id, &[]);
            return Ok(Step::Next);
        }

        if spec.is_directive() {
            let remaining = self.tokens[index..].to_vec();
            debug!(parameter = %spec, count = remaining.len(), "Directive takes over remaining tokens");
            self.dispatch(id, &remaining);
            return Ok(Step::HandOff);
        }

        match inline {
            Some(value) => {
                self.state = State::AwaitingArgs {
                    id,
                    collected: vec![value],
                };
                self.close_open()?;
            }
            None => {
                self.state = State::AwaitingArgs {
                    id,
                    collected: Vec::new(),
                };
            }
        }
        Ok(Step::Next)
    }

    fn flag_argument(&mut self, index: usize, token: &'t str) -> Result<Step, ParseError> {
        let next_is_flag = self
            .tokens
            .get(index + 1)
            .is_some_and(|next| self.is_flag_like(next));
        let is_last = index + 1 == self.tokens.len();

        let full = match &mut self.state {
            State::AwaitingArgs { id, collected } => {
                collected.push(token);
                collected.len() >= self.parser.params[id.0].spec.max_arity()
            }
            State::Idle => false,
        };

        if full || next_is_flag || is_last {
            self.close_open()?;
        }
        Ok(Step::Next)
    }

    fn positional(&mut self, index: usize, token: &'t str) -> Result<Step, ParseError> {
        if self.positionals >= self.parser.positional.max {
            return Err(ParseError::UnexpectedPositional(token.to_string()));
        }

        if let Some(hook) = self.parser.directive_positional.as_mut() {
            if hook(self.positionals, &self.tokens[index..]) {
                debug!(index, token, "Positional directive took over remaining tokens");
                return Ok(Step::HandOff);
            }
        }

        debug!(position = self.positionals, token, "Positional argument");
        if let Some(callback) = self.parser.positional_callback.as_mut() {
            callback(self.positionals, token);
        }
        self.positionals += 1;
        Ok(Step::Next)
    }

    /// Closes the open flag, if any, and runs its callback.
    fn close_open(&mut self) -> Result<(), ParseError> {
        let State::AwaitingArgs { id, collected } = std::mem::replace(&mut self.state, State::Idle)
        else {
            return Ok(());
        };

        let spec = &self.parser.params[id.0].spec;
        if collected.len() < spec.min_arity() {
            return Err(ParseError::InsufficientArgs {
                id,
                name: spec.display_name(),
                required: spec.min_arity(),
                found: collected.len(),
            });
        }

        self.dispatch(id, &collected);
        Ok(())
    }

    fn dispatch(&mut self, id: SpecId, args: &[&str]) {
        let param = &mut self.parser.params[id.0];
        debug!(parameter = %param.spec, args = ?args, "Invoking callback");
        self.result.record_values(id, args);
        if let Some(callback) = param.callback.as_mut() {
            callback(args);
        }
    }

    fn validate(&self) -> Result<(), ParseError> {
        let min = self.parser.positional.min;
        if self.positionals < min {
            return Err(ParseError::TooFewPositionals {
                found: self.positionals,
                min,
            });
        }

        for (index, param) in self.parser.params.iter().enumerate() {
            if param.spec.is_required() && !param.satisfied {
                return Err(ParseError::MissingRequiredParameter {
                    id: SpecId(index),
                    name: param.spec.display_name(),
                });
            }
        }
        Ok(())
    }
}

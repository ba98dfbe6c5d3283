use std::fmt::{Display, Formatter};

use error_stack::Report;
use vodca::{AsRefln, Fromln};

use crate::KernelError;

/// Every rule message that failed for one submitted payload, in rule order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Fromln, AsRefln)]
pub struct Violations(Vec<String>);

impl Violations {
    pub fn new(messages: impl Into<Vec<String>>) -> Self {
        Self(messages.into())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, message: &str) -> bool {
        self.0.iter().any(|m| m == message)
    }
}

impl Display for Violations {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.join("; "))
    }
}

pub struct Rule<T> {
    check: fn(&T) -> bool,
    message: &'static str,
}

impl<T> Rule<T> {
    pub const fn new(check: fn(&T) -> bool, message: &'static str) -> Self {
        Self { check, message }
    }

    pub fn holds(&self, target: &T) -> bool {
        (self.check)(target)
    }

    pub fn message(&self) -> &'static str {
        self.message
    }
}

/// Evaluates every rule against the target before reporting, so callers
/// always see the complete list of violations instead of the first one.
pub struct Validator<'a, T> {
    target: &'a T,
    violations: Vec<String>,
}

impl<'a, T> Validator<'a, T> {
    pub fn new(target: &'a T) -> Self {
        Self {
            target,
            violations: Vec::new(),
        }
    }

    pub fn rules(mut self, rules: &[Rule<T>]) -> Self {
        for rule in rules {
            if !rule.holds(self.target) {
                self.violations.push(rule.message().to_string());
            }
        }
        self
    }

    /// Adds a rule whose outcome was decided outside the target, e.g. by a lookup.
    pub fn ensure(mut self, holds: bool, message: &str) -> Self {
        if !holds {
            self.violations.push(message.to_string());
        }
        self
    }

    pub fn finish(self) -> error_stack::Result<(), KernelError> {
        if self.violations.is_empty() {
            Ok(())
        } else {
            Err(Report::new(KernelError::Validation(Violations(
                self.violations,
            ))))
        }
    }
}

use std::error::Error;
use std::fmt;
use std::rc::Rc;

use crate::classic::clvm::costs::Cost;
use crate::classic::clvm::sexp::SExp;

/// The cost charged by an operator together with the value it produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reduction(pub Cost, pub Rc<SExp>);

/// Every failure an operator or the dispatcher can report.  Each carries the
/// node it was looking at when it failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperatorError {
    Arity(Rc<SExp>, String),
    Type(Rc<SExp>, String),
    Range(Rc<SExp>, String),
    ReservedOperator(Rc<SExp>, String),
    InvalidOperator(Rc<SExp>, String),
    Raise(Rc<SExp>),
}

pub type Response = Result<Reduction, OperatorError>;

impl OperatorError {
    pub fn node(&self) -> &Rc<SExp> {
        match self {
            OperatorError::Arity(n, _) => n,
            OperatorError::Type(n, _) => n,
            OperatorError::Range(n, _) => n,
            OperatorError::ReservedOperator(n, _) => n,
            OperatorError::InvalidOperator(n, _) => n,
            OperatorError::Raise(n) => n,
        }
    }

    pub fn message(&self) -> String {
        match self {
            OperatorError::Arity(_, m)
            | OperatorError::Type(_, m)
            | OperatorError::Range(_, m)
            | OperatorError::ReservedOperator(_, m)
            | OperatorError::InvalidOperator(_, m) => m.clone(),
            OperatorError::Raise(_) => "clvm raise".to_string(),
        }
    }
}

impl fmt::Display for OperatorError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}: {}", self.message(), self.node())
    }
}

impl Error for OperatorError {}

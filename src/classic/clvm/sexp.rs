use std::fmt::Display;
use std::rc::Rc;

use crate::classic::clvm::reduction::OperatorError;

/// A clvm value.  Atoms are byte strings; pairs join two values.  Values are
/// never mutated once built, so subtrees are shared freely by reference
/// count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SExp {
    Atom(Vec<u8>),
    Pair(Rc<SExp>, Rc<SExp>),
}

impl SExp {
    pub fn nullp(&self) -> bool {
        match self {
            SExp::Atom(a) => a.is_empty(),
            _ => false,
        }
    }

    pub fn listp(&self) -> bool {
        matches!(self, SExp::Pair(_, _))
    }

    pub fn atom(&self) -> Option<&[u8]> {
        match self {
            SExp::Atom(a) => Some(a),
            _ => None,
        }
    }

    pub fn pair(&self) -> Option<(&Rc<SExp>, &Rc<SExp>)> {
        match self {
            SExp::Pair(f, r) => Some((f, r)),
            _ => None,
        }
    }

    /// Count the pairs along the right spine.  The terminator isn't examined.
    pub fn list_len(&self) -> usize {
        let mut count = 0;
        let mut tail = self;
        while let SExp::Pair(_, r) = tail {
            count += 1;
            tail = r.as_ref();
        }
        count
    }
}

fn write_atom(formatter: &mut std::fmt::Formatter<'_>, a: &[u8]) -> std::fmt::Result {
    if a.is_empty() {
        formatter.write_str("()")
    } else {
        write!(formatter, "0x{}", hex::encode(a))
    }
}

impl Display for SExp {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SExp::Atom(a) => write_atom(formatter, a),
            SExp::Pair(f, r) => {
                write!(formatter, "({}", f)?;
                let mut tail: &SExp = r.as_ref();
                loop {
                    match tail {
                        SExp::Pair(f, r) => {
                            write!(formatter, " {}", f)?;
                            tail = r.as_ref();
                        }
                        SExp::Atom(a) => {
                            if !a.is_empty() {
                                formatter.write_str(" . ")?;
                                write_atom(formatter, a)?;
                            }
                            return formatter.write_str(")");
                        }
                    }
                }
            }
        }
    }
}

pub fn nil() -> Rc<SExp> {
    Rc::new(SExp::Atom(vec![]))
}

pub fn atom(v: &[u8]) -> Rc<SExp> {
    Rc::new(SExp::Atom(v.to_vec()))
}

pub fn cons(f: Rc<SExp>, r: Rc<SExp>) -> Rc<SExp> {
    Rc::new(SExp::Pair(f, r))
}

pub fn bool_sexp(b: bool) -> Rc<SExp> {
    if b {
        atom(&[1])
    } else {
        nil()
    }
}

/// Truthiness as clvm sees it: anything but the empty atom.
pub fn non_nil(sexp: &SExp) -> bool {
    !sexp.nullp()
}

pub fn first(sexp: &Rc<SExp>) -> Result<Rc<SExp>, OperatorError> {
    match sexp.pair() {
        Some((f, _)) => Ok(f.clone()),
        _ => Err(OperatorError::Type(
            sexp.clone(),
            "first of non-cons".to_string(),
        )),
    }
}

pub fn rest(sexp: &Rc<SExp>) -> Result<Rc<SExp>, OperatorError> {
    match sexp.pair() {
        Some((_, r)) => Ok(r.clone()),
        _ => Err(OperatorError::Type(
            sexp.clone(),
            "rest of non-cons".to_string(),
        )),
    }
}

/// The elements of a nil-terminated list, or None if the list ends in a
/// non-empty atom.
pub fn proper_list(sexp: &Rc<SExp>) -> Option<Vec<Rc<SExp>>> {
    let mut args = vec![];
    let mut args_sexp = sexp.clone();
    loop {
        let next = match args_sexp.pair() {
            Some((f, r)) => {
                args.push(f.clone());
                r.clone()
            }
            None => {
                if non_nil(&args_sexp) {
                    return None;
                }
                return Some(args);
            }
        };
        args_sexp = next;
    }
}

pub fn enlist(vec: &[Rc<SExp>]) -> Rc<SExp> {
    let mut built = nil();

    for i_reverse in 0..vec.len() {
        let i = vec.len() - i_reverse - 1;
        built = cons(vec[i].clone(), built);
    }

    built
}

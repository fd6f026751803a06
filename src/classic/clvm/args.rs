use std::rc::Rc;

use crate::classic::clvm::casts::bigint_from_bytes;
use crate::classic::clvm::costs::{Cost, MALLOC_COST_PER_BYTE};
use crate::classic::clvm::reduction::{OperatorError, Reduction};
use crate::classic::clvm::sexp::{atom, proper_list, SExp};
use crate::util::Number;

/// Walks an argument list one element at a time.  Reaching a non-empty
/// terminator yields a single error and then ends the iteration.
pub struct ArgIter {
    args: Rc<SExp>,
    cursor: Option<Rc<SExp>>,
}

impl ArgIter {
    pub fn new(args: &Rc<SExp>) -> Self {
        ArgIter {
            args: args.clone(),
            cursor: Some(args.clone()),
        }
    }

    /// The next element as a byte string; pairs are rejected.
    pub fn next_atom(&mut self, op_name: &str) -> Result<Option<Vec<u8>>, OperatorError> {
        match self.next() {
            None => Ok(None),
            Some(arg) => {
                let arg = arg?;
                atom_bytes(&arg, op_name).map(|b| Some(b.to_vec()))
            }
        }
    }

    /// The next element as a signed integer, with its encoded length.
    pub fn next_int(&mut self, op_name: &str) -> Result<Option<(Number, usize)>, OperatorError> {
        match self.next() {
            None => Ok(None),
            Some(arg) => {
                let arg = arg?;
                int_atom(&arg, op_name).map(Some)
            }
        }
    }
}

impl Iterator for ArgIter {
    type Item = Result<Rc<SExp>, OperatorError>;

    fn next(&mut self) -> Option<Self::Item> {
        let cursor = self.cursor.take()?;
        match cursor.as_ref() {
            SExp::Pair(f, r) => {
                self.cursor = Some(r.clone());
                Some(Ok(f.clone()))
            }
            SExp::Atom(a) => {
                if a.is_empty() {
                    None
                } else {
                    Some(Err(OperatorError::Type(
                        self.args.clone(),
                        "bad argument list".to_string(),
                    )))
                }
            }
        }
    }
}

/// The arguments as a vector, insisting on a nil terminator.
pub fn arg_list(args: &Rc<SExp>) -> Result<Vec<Rc<SExp>>, OperatorError> {
    proper_list(args)
        .ok_or_else(|| OperatorError::Type(args.clone(), "bad argument list".to_string()))
}

pub fn check_arg_count(
    args: &Rc<SExp>,
    expected: usize,
    op_name: &str,
) -> Result<Vec<Rc<SExp>>, OperatorError> {
    let list = arg_list(args)?;
    if list.len() != expected {
        return Err(OperatorError::Arity(
            args.clone(),
            format!(
                "{} takes exactly {} argument{}",
                op_name,
                expected,
                if expected == 1 { "" } else { "s" }
            ),
        ));
    }
    Ok(list)
}

pub fn atom_bytes<'a>(arg: &'a Rc<SExp>, op_name: &str) -> Result<&'a [u8], OperatorError> {
    arg.atom()
        .ok_or_else(|| OperatorError::Type(arg.clone(), format!("{} on list", op_name)))
}

pub fn int_atom(arg: &Rc<SExp>, op_name: &str) -> Result<(Number, usize), OperatorError> {
    let b = atom_bytes(arg, op_name)?;
    Ok((bigint_from_bytes(b, None), b.len()))
}

/// Small integer arguments (shift amounts, substring indices) must fit in 4
/// bytes.
pub fn i32_atom(arg: &Rc<SExp>, op_name: &str) -> Result<i32, OperatorError> {
    let b = atom_bytes(arg, op_name)?;
    if b.len() > 4 {
        return Err(OperatorError::Range(
            arg.clone(),
            format!("{} requires int32 args (with no leading zeros)", op_name),
        ));
    }

    let mut v: i32 = if !b.is_empty() && b[0] & 0x80 != 0 { -1 } else { 0 };
    for byte in b.iter() {
        v = (v << 8) | (*byte as i32);
    }
    Ok(v)
}

/// Build a new atom and charge for allocating it.
pub fn new_atom_and_cost(cost: Cost, buf: &[u8]) -> Reduction {
    let c = buf.len() as Cost * MALLOC_COST_PER_BYTE;
    Reduction(cost + c, atom(buf))
}

/// Total length of every atom in the list.
pub fn args_len(args: &Rc<SExp>, op_name: &str) -> Result<usize, OperatorError> {
    let mut total = 0;
    for arg in ArgIter::new(args) {
        let arg = arg?;
        total += atom_bytes(&arg, op_name)?.len();
    }
    Ok(total)
}

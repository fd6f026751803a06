use std::rc::Rc;

use crate::classic::clvm::casts::bigint_to_bytes_clvm;
use crate::classic::clvm::sexp::{atom, enlist, SExp};
use crate::util::Number;

mod casts;

pub fn int(v: i64) -> Rc<SExp> {
    atom(&bigint_to_bytes_clvm(&Number::from(v)))
}

pub fn bytes(v: &[u8]) -> Rc<SExp> {
    atom(v)
}

pub fn args(v: &[Rc<SExp>]) -> Rc<SExp> {
    enlist(v)
}

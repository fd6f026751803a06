use std::rc::Rc;

use crate::classic::clvm::args::{atom_bytes, check_arg_count};
use crate::classic::clvm::costs::{
    CONS_COST, EQ_BASE_COST, EQ_COST_PER_BYTE, FIRST_COST, IF_COST, LISTP_COST, REST_COST,
};
use crate::classic::clvm::reduction::{OperatorError, Reduction, Response};
use crate::classic::clvm::sexp::{bool_sexp, cons, first, rest, SExp};

pub fn op_if(args: &Rc<SExp>) -> Response {
    let list = check_arg_count(args, 3, "i")?;
    let chosen = if list[0].nullp() {
        list[2].clone()
    } else {
        list[1].clone()
    };
    Ok(Reduction(IF_COST, chosen))
}

pub fn op_cons(args: &Rc<SExp>) -> Response {
    let list = check_arg_count(args, 2, "c")?;
    Ok(Reduction(CONS_COST, cons(list[0].clone(), list[1].clone())))
}

pub fn op_first(args: &Rc<SExp>) -> Response {
    let list = check_arg_count(args, 1, "f")?;
    first(&list[0]).map(|f| Reduction(FIRST_COST, f))
}

pub fn op_rest(args: &Rc<SExp>) -> Response {
    let list = check_arg_count(args, 1, "r")?;
    rest(&list[0]).map(|r| Reduction(REST_COST, r))
}

pub fn op_listp(args: &Rc<SExp>) -> Response {
    let list = check_arg_count(args, 1, "l")?;
    Ok(Reduction(LISTP_COST, bool_sexp(list[0].listp())))
}

pub fn op_raise(args: &Rc<SExp>) -> Response {
    Err(OperatorError::Raise(args.clone()))
}

pub fn op_eq(args: &Rc<SExp>) -> Response {
    let list = check_arg_count(args, 2, "=")?;
    let b0 = atom_bytes(&list[0], "=")?;
    let b1 = atom_bytes(&list[1], "=")?;
    let cost = EQ_BASE_COST + (b0.len() as u64 + b1.len() as u64) * EQ_COST_PER_BYTE;
    Ok(Reduction(cost, bool_sexp(b0 == b1)))
}

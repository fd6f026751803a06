use std::rc::Rc;

use bls12_381::{G1Affine, G1Projective, Scalar};
use num::Integer;
use num_bigint::Sign;
use num_traits::{One, ToPrimitive, Zero};
use sha2::{Digest, Sha256};

use crate::classic::clvm::args::{
    arg_list, args_len, atom_bytes, check_arg_count, i32_atom, int_atom, new_atom_and_cost,
    ArgIter,
};
use crate::classic::clvm::casts::{
    bigint_from_bytes, bigint_to_bytes_clvm, limbs_for_int, TConvertOption,
};
use crate::classic::clvm::costs::{
    Cost, ARITH_BASE_COST, ARITH_COST_PER_ARG, ARITH_COST_PER_BYTE, ASHIFT_BASE_COST,
    ASHIFT_COST_PER_BYTE, BOOL_BASE_COST, BOOL_COST_PER_ARG, CONCAT_BASE_COST,
    CONCAT_COST_PER_ARG, CONCAT_COST_PER_BYTE, DIVMOD_BASE_COST, DIVMOD_COST_PER_BYTE,
    DIV_BASE_COST, DIV_COST_PER_BYTE, GRS_BASE_COST, GRS_COST_PER_BYTE, GR_BASE_COST,
    GR_COST_PER_BYTE, LOGNOT_BASE_COST, LOGNOT_COST_PER_BYTE, LOG_BASE_COST, LOG_COST_PER_ARG,
    LOG_COST_PER_BYTE, LSHIFT_BASE_COST, LSHIFT_COST_PER_BYTE, MALLOC_COST_PER_BYTE,
    MUL_BASE_COST, MUL_COST_PER_OP, MUL_LINEAR_COST_PER_BYTE, MUL_SQUARE_COST_PER_BYTE_DIVIDER,
    POINT_ADD_BASE_COST, POINT_ADD_COST_PER_ARG, PUBKEY_BASE_COST, PUBKEY_COST_PER_BYTE,
    SHA256_BASE_COST, SHA256_COST_PER_ARG, SHA256_COST_PER_BYTE, STRLEN_BASE_COST,
    STRLEN_COST_PER_BYTE, SUBSTR_COST, UNKNOWN_OP_COST_LIMIT,
};
use crate::classic::clvm::reduction::{OperatorError, Reduction, Response};
use crate::classic::clvm::sexp::{atom, bool_sexp, cons, nil, SExp};
use crate::util::Number;

/// Order of the BLS12-381 scalar field, big endian.
const GROUP_ORDER_BYTES: [u8; 32] = [
    0x73, 0xed, 0xa7, 0x53, 0x29, 0x9d, 0x7d, 0x48, 0x33, 0x39, 0xd8, 0x08, 0x09, 0xa1, 0xd8, 0x05,
    0x53, 0xbd, 0xa4, 0x02, 0xff, 0xfe, 0x5b, 0xfe, 0xff, 0xff, 0xff, 0xff, 0x00, 0x00, 0x00, 0x01,
];

const MAX_SHIFT: i32 = 65535;

lazy_static! {
    static ref GROUP_ORDER: Number = Number::from_bytes_be(Sign::Plus, &GROUP_ORDER_BYTES);
}

/// Cost of an operator this node doesn't know.  The opcode's last byte picks
/// one of four cost shapes (top two bits) and a multiplier (its value plus
/// one).  Unknown operators produce no value.
pub fn op_unknown(o: &[u8], args: &Rc<SExp>) -> Result<Cost, OperatorError> {
    if o.is_empty() || (o.len() >= 2 && o[0] == 0xff && o[1] == 0xff) {
        return Err(OperatorError::ReservedOperator(
            atom(o),
            "reserved operator".to_string(),
        ));
    }

    if o.len() > 5 {
        return Err(OperatorError::ReservedOperator(
            atom(o),
            "reserved operator: opcode too long".to_string(),
        ));
    }

    let last = o[o.len() - 1];
    let cost_function = (last & 0b1100_0000) >> 6;
    let cost_multiplier = last as Cost + 1;

    let cost = match cost_function {
        0 => 1,
        1 => {
            let arg_size = args_len(args, "unknown op")? as Cost;
            let num_args = arg_list(args)?.len() as Cost;
            ARITH_BASE_COST
                .saturating_add(arg_size.saturating_mul(ARITH_COST_PER_BYTE))
                .saturating_add(num_args.saturating_mul(ARITH_COST_PER_ARG))
        }
        2 => unknown_mul_cost(args),
        _ => {
            let length = args_len(args, "unknown op")? as Cost;
            let num_args = arg_list(args)?.len() as Cost;
            CONCAT_BASE_COST
                .saturating_add(length.saturating_mul(CONCAT_COST_PER_BYTE))
                .saturating_add(num_args.saturating_mul(CONCAT_COST_PER_ARG))
        }
    };

    match cost.checked_mul(cost_multiplier) {
        Some(c) if c < UNKNOWN_OP_COST_LIMIT => Ok(c),
        _ => Err(OperatorError::InvalidOperator(
            atom(o),
            "invalid operator".to_string(),
        )),
    }
}

// The running length grows by each argument, as if every argument were
// multiplied into one product.  A pair argument or bad terminator ends the
// walk without an error.
fn unknown_mul_cost(args: &Rc<SExp>) -> Cost {
    let mut cost = MUL_BASE_COST;
    let mut iter = ArgIter::new(args);

    let mut vs = match iter.next() {
        Some(Ok(arg)) => match arg.atom() {
            Some(b) => b.len() as Cost,
            None => return cost,
        },
        _ => return cost,
    };

    for arg in iter {
        let arg = match arg {
            Ok(a) => a,
            Err(_) => break,
        };
        let rs = match arg.atom() {
            Some(b) => b.len() as Cost,
            None => break,
        };
        cost = cost
            .saturating_add(MUL_COST_PER_OP)
            .saturating_add((rs.saturating_add(vs)).saturating_mul(MUL_LINEAR_COST_PER_BYTE))
            .saturating_add(rs.saturating_mul(vs) / MUL_SQUARE_COST_PER_BYTE_DIVIDER);
        vs = vs.saturating_add(rs);
    }

    cost
}

pub fn op_sha256(args: &Rc<SExp>) -> Response {
    let mut cost = SHA256_BASE_COST;
    let mut byte_count: usize = 0;
    let mut hasher = Sha256::new();
    let mut iter = ArgIter::new(args);
    while let Some(b) = iter.next_atom("sha256")? {
        hasher.update(&b);
        byte_count += b.len();
        cost += SHA256_COST_PER_ARG;
    }
    cost += byte_count as Cost * SHA256_COST_PER_BYTE;
    let digest = hasher.finalize();
    Ok(new_atom_and_cost(cost, digest.as_slice()))
}

pub fn op_add(args: &Rc<SExp>) -> Response {
    let mut cost = ARITH_BASE_COST;
    let mut byte_count: usize = 0;
    let mut total: Number = Zero::zero();
    let mut iter = ArgIter::new(args);
    while let Some((v, len)) = iter.next_int("+")? {
        total += v;
        byte_count += len;
        cost += ARITH_COST_PER_ARG;
    }
    cost += byte_count as Cost * ARITH_COST_PER_BYTE;
    Ok(new_atom_and_cost(cost, &bigint_to_bytes_clvm(&total)))
}

pub fn op_subtract(args: &Rc<SExp>) -> Response {
    let mut cost = ARITH_BASE_COST;
    let mut byte_count: usize = 0;
    let mut total: Number = Zero::zero();
    let mut is_first = true;
    let mut iter = ArgIter::new(args);
    while let Some((v, len)) = iter.next_int("-")? {
        if is_first {
            total += v;
        } else {
            total -= v;
        }
        is_first = false;
        byte_count += len;
        cost += ARITH_COST_PER_ARG;
    }
    cost += byte_count as Cost * ARITH_COST_PER_BYTE;
    Ok(new_atom_and_cost(cost, &bigint_to_bytes_clvm(&total)))
}

pub fn op_multiply(args: &Rc<SExp>) -> Response {
    let mut cost = MUL_BASE_COST;
    let mut iter = ArgIter::new(args);
    let (mut total, mut vs) = match iter.next_int("*")? {
        None => {
            let one: Number = One::one();
            return Ok(new_atom_and_cost(cost, &bigint_to_bytes_clvm(&one)));
        }
        Some(first) => first,
    };

    while let Some((r, rs)) = iter.next_int("*")? {
        let (rs, vsc) = (rs as Cost, vs as Cost);
        cost += MUL_COST_PER_OP;
        cost += (rs + vsc) * MUL_LINEAR_COST_PER_BYTE;
        cost += (rs * vsc) / MUL_SQUARE_COST_PER_BYTE_DIVIDER;
        total *= r;
        vs = limbs_for_int(&total);
    }

    Ok(new_atom_and_cost(cost, &bigint_to_bytes_clvm(&total)))
}

pub fn op_divmod(args: &Rc<SExp>) -> Response {
    let list = check_arg_count(args, 2, "divmod")?;
    let (i0, l0) = int_atom(&list[0], "divmod")?;
    let (i1, l1) = int_atom(&list[1], "divmod")?;
    if i1.is_zero() {
        return Err(OperatorError::Range(args.clone(), "divmod with 0".to_string()));
    }

    let mut cost = DIVMOD_BASE_COST + (l0 + l1) as Cost * DIVMOD_COST_PER_BYTE;
    let (q, r) = i0.div_mod_floor(&i1);
    let q1 = bigint_to_bytes_clvm(&q);
    let r1 = bigint_to_bytes_clvm(&r);
    cost += (q1.len() + r1.len()) as Cost * MALLOC_COST_PER_BYTE;
    Ok(Reduction(cost, cons(atom(&q1), atom(&r1))))
}

pub fn op_div(args: &Rc<SExp>) -> Response {
    let list = check_arg_count(args, 2, "/")?;
    let (i0, l0) = int_atom(&list[0], "/")?;
    let (i1, l1) = int_atom(&list[1], "/")?;
    if i1.is_zero() {
        return Err(OperatorError::Range(args.clone(), "div with 0".to_string()));
    }

    let cost = DIV_BASE_COST + (l0 + l1) as Cost * DIV_COST_PER_BYTE;
    let q = i0.div_floor(&i1);
    Ok(new_atom_and_cost(cost, &bigint_to_bytes_clvm(&q)))
}

pub fn op_gr(args: &Rc<SExp>) -> Response {
    let list = check_arg_count(args, 2, ">")?;
    let (i0, l0) = int_atom(&list[0], ">")?;
    let (i1, l1) = int_atom(&list[1], ">")?;
    let cost = GR_BASE_COST + (l0 + l1) as Cost * GR_COST_PER_BYTE;
    Ok(Reduction(cost, bool_sexp(i0 > i1)))
}

pub fn op_gr_bytes(args: &Rc<SExp>) -> Response {
    let list = check_arg_count(args, 2, ">s")?;
    let b0 = atom_bytes(&list[0], ">s")?;
    let b1 = atom_bytes(&list[1], ">s")?;
    let cost = GRS_BASE_COST + (b0.len() + b1.len()) as Cost * GRS_COST_PER_BYTE;
    Ok(Reduction(cost, bool_sexp(b0 > b1)))
}

fn g1_atom(arg: &Rc<SExp>, op_name: &str) -> Result<G1Affine, OperatorError> {
    let b = atom_bytes(arg, op_name)?;
    if b.len() != 48 {
        return Err(OperatorError::Type(
            arg.clone(),
            format!("{}: atom is not G1 size, 48 bytes", op_name),
        ));
    }

    let mut buf = [0u8; 48];
    buf.copy_from_slice(b);
    let point: Option<G1Affine> = G1Affine::from_compressed(&buf).into();
    point.ok_or_else(|| {
        OperatorError::Type(arg.clone(), format!("{}: atom is not a G1 point", op_name))
    })
}

pub fn op_point_add(args: &Rc<SExp>) -> Response {
    let mut cost = POINT_ADD_BASE_COST;
    let mut total = G1Projective::identity();
    for arg in ArgIter::new(args) {
        let arg = arg?;
        let point = g1_atom(&arg, "point_add")?;
        total = total + G1Projective::from(point);
        cost += POINT_ADD_COST_PER_ARG;
    }
    let total = G1Affine::from(total);
    Ok(new_atom_and_cost(cost, &total.to_compressed()))
}

fn number_to_scalar(n: &Number) -> Option<Scalar> {
    let (_sign, as_u8) = n.to_bytes_le();
    if as_u8.len() > 32 {
        return None;
    }
    let mut scalar_array = [0u8; 32];
    scalar_array[..as_u8.len()].copy_from_slice(&as_u8);
    Scalar::from_bytes(&scalar_array).into()
}

pub fn op_pubkey_for_exp(args: &Rc<SExp>) -> Response {
    let list = check_arg_count(args, 1, "pubkey_for_exp")?;
    let (v0, l0) = int_atom(&list[0], "pubkey_for_exp")?;
    let exp = v0.mod_floor(&*GROUP_ORDER);
    let scalar = number_to_scalar(&exp).ok_or_else(|| {
        OperatorError::Range(list[0].clone(), "pubkey_for_exp: bad exponent".to_string())
    })?;
    let point = G1Affine::from(G1Projective::generator() * scalar);
    let cost = PUBKEY_BASE_COST + l0 as Cost * PUBKEY_COST_PER_BYTE;
    Ok(new_atom_and_cost(cost, &point.to_compressed()))
}

pub fn op_strlen(args: &Rc<SExp>) -> Response {
    let list = check_arg_count(args, 1, "strlen")?;
    let a0 = atom_bytes(&list[0], "strlen")?;
    let size = Number::from(a0.len());
    let cost = STRLEN_BASE_COST + a0.len() as Cost * STRLEN_COST_PER_BYTE;
    Ok(new_atom_and_cost(cost, &bigint_to_bytes_clvm(&size)))
}

pub fn op_substr(args: &Rc<SExp>) -> Response {
    let list = arg_list(args)?;
    if list.len() != 2 && list.len() != 3 {
        return Err(OperatorError::Arity(
            args.clone(),
            "substr takes exactly 2 or 3 arguments".to_string(),
        ));
    }

    let s0 = atom_bytes(&list[0], "substr")?;
    let i1 = i32_atom(&list[1], "substr")? as i64;
    let i2 = if list.len() == 3 {
        i32_atom(&list[2], "substr")? as i64
    } else {
        s0.len() as i64
    };

    if i2 > s0.len() as i64 || i2 < i1 || i1 < 0 {
        return Err(OperatorError::Range(
            args.clone(),
            "invalid indices for substr".to_string(),
        ));
    }

    Ok(Reduction(SUBSTR_COST, atom(&s0[i1 as usize..i2 as usize])))
}

pub fn op_concat(args: &Rc<SExp>) -> Response {
    let mut cost = CONCAT_BASE_COST;
    let mut total = Vec::new();
    let mut iter = ArgIter::new(args);
    while let Some(b) = iter.next_atom("concat")? {
        total.extend_from_slice(&b);
        cost += CONCAT_COST_PER_ARG;
    }
    cost += total.len() as Cost * CONCAT_COST_PER_BYTE;
    Ok(new_atom_and_cost(cost, &total))
}

fn shift_amount(arg: &Rc<SExp>, op_name: &str) -> Result<i32, OperatorError> {
    let a1 = i32_atom(arg, op_name)?;
    if a1 > MAX_SHIFT || a1 < -MAX_SHIFT {
        return Err(OperatorError::Range(arg.clone(), "shift too large".to_string()));
    }
    Ok(a1)
}

fn shift(v: Number, amount: i32) -> Number {
    if amount > 0 {
        v << (amount as usize)
    } else {
        v >> ((-amount) as usize)
    }
}

pub fn op_ash(args: &Rc<SExp>) -> Response {
    let list = check_arg_count(args, 2, "ash")?;
    let (i0, l0) = int_atom(&list[0], "ash")?;
    let a1 = shift_amount(&list[1], "ash")?;
    let r = bigint_to_bytes_clvm(&shift(i0, a1));
    let cost = ASHIFT_BASE_COST + (l0 + r.len()) as Cost * ASHIFT_COST_PER_BYTE;
    Ok(new_atom_and_cost(cost, &r))
}

pub fn op_lsh(args: &Rc<SExp>) -> Response {
    let list = check_arg_count(args, 2, "lsh")?;
    let b0 = atom_bytes(&list[0], "lsh")?;
    let a1 = shift_amount(&list[1], "lsh")?;
    let i0 = bigint_from_bytes(b0, Some(TConvertOption { signed: false }));
    let r = bigint_to_bytes_clvm(&shift(i0, a1));
    let cost = LSHIFT_BASE_COST + (b0.len() + r.len()) as Cost * LSHIFT_COST_PER_BYTE;
    Ok(new_atom_and_cost(cost, &r))
}

fn binop_reduction(
    op_name: &str,
    initial_value: Number,
    args: &Rc<SExp>,
    op_f: fn(&mut Number, &Number),
) -> Response {
    let mut total = initial_value;
    let mut arg_size: usize = 0;
    let mut cost = LOG_BASE_COST;
    let mut iter = ArgIter::new(args);
    while let Some((v, len)) = iter.next_int(op_name)? {
        op_f(&mut total, &v);
        arg_size += len;
        cost += LOG_COST_PER_ARG;
    }
    cost += arg_size as Cost * LOG_COST_PER_BYTE;
    Ok(new_atom_and_cost(cost, &bigint_to_bytes_clvm(&total)))
}

pub fn op_logand(args: &Rc<SExp>) -> Response {
    binop_reduction("logand", Number::from(-1), args, |a, b| *a &= b)
}

pub fn op_logior(args: &Rc<SExp>) -> Response {
    binop_reduction("logior", Number::from(0), args, |a, b| *a |= b)
}

pub fn op_logxor(args: &Rc<SExp>) -> Response {
    binop_reduction("logxor", Number::from(0), args, |a, b| *a ^= b)
}

pub fn op_lognot(args: &Rc<SExp>) -> Response {
    let list = check_arg_count(args, 1, "lognot")?;
    let (i0, l0) = int_atom(&list[0], "lognot")?;
    let cost = LOGNOT_BASE_COST + l0 as Cost * LOGNOT_COST_PER_BYTE;
    Ok(new_atom_and_cost(cost, &bigint_to_bytes_clvm(&!i0)))
}

pub fn op_not(args: &Rc<SExp>) -> Response {
    let list = check_arg_count(args, 1, "not")?;
    Ok(Reduction(BOOL_BASE_COST, bool_sexp(list[0].nullp())))
}

fn bool_reduction(op_name: &str, args: &Rc<SExp>, stop_on: bool) -> Response {
    let list = arg_list(args)?;
    let cost = BOOL_BASE_COST + list.len() as Cost * BOOL_COST_PER_ARG;
    for arg in list.iter() {
        if atom_bytes(arg, op_name)?.is_empty() != stop_on {
            return Ok(Reduction(cost, bool_sexp(stop_on)));
        }
    }
    Ok(Reduction(cost, bool_sexp(!stop_on)))
}

pub fn op_any(args: &Rc<SExp>) -> Response {
    bool_reduction("any", args, true)
}

pub fn op_all(args: &Rc<SExp>) -> Response {
    bool_reduction("all", args, false)
}

pub fn op_softfork(args: &Rc<SExp>) -> Response {
    let list = arg_list(args)?;
    if list.is_empty() {
        return Err(OperatorError::Arity(
            args.clone(),
            "softfork takes at least 1 argument".to_string(),
        ));
    }

    let (n, _) = int_atom(&list[0], "softfork")?;
    if n < Number::one() {
        return Err(OperatorError::Range(
            list[0].clone(),
            "cost must be > 0".to_string(),
        ));
    }

    let cost = n.to_u64().ok_or_else(|| {
        OperatorError::Range(list[0].clone(), "softfork cost too large".to_string())
    })?;
    Ok(Reduction(cost, nil()))
}

//! Protocol cost parameters.  Every node validating the chain must agree on
//! these exactly.

pub type Cost = u64;

pub const IF_COST: Cost = 33;
pub const CONS_COST: Cost = 50;
pub const FIRST_COST: Cost = 30;
pub const REST_COST: Cost = 30;
pub const LISTP_COST: Cost = 19;

// Charged per byte of each atom an operator allocates.
pub const MALLOC_COST_PER_BYTE: Cost = 10;

pub const ARITH_BASE_COST: Cost = 99;
pub const ARITH_COST_PER_BYTE: Cost = 3;
pub const ARITH_COST_PER_ARG: Cost = 320;

pub const LOG_BASE_COST: Cost = 100;
pub const LOG_COST_PER_BYTE: Cost = 3;
pub const LOG_COST_PER_ARG: Cost = 264;

pub const GRS_BASE_COST: Cost = 117;
pub const GRS_COST_PER_BYTE: Cost = 1;

pub const EQ_BASE_COST: Cost = 117;
pub const EQ_COST_PER_BYTE: Cost = 1;

pub const GR_BASE_COST: Cost = 498;
pub const GR_COST_PER_BYTE: Cost = 2;

pub const DIVMOD_BASE_COST: Cost = 1116;
pub const DIVMOD_COST_PER_BYTE: Cost = 6;

pub const DIV_BASE_COST: Cost = 988;
pub const DIV_COST_PER_BYTE: Cost = 4;

pub const SHA256_BASE_COST: Cost = 87;
pub const SHA256_COST_PER_ARG: Cost = 134;
pub const SHA256_COST_PER_BYTE: Cost = 2;

pub const POINT_ADD_BASE_COST: Cost = 101094;
pub const POINT_ADD_COST_PER_ARG: Cost = 1343980;

pub const PUBKEY_BASE_COST: Cost = 1325730;
pub const PUBKEY_COST_PER_BYTE: Cost = 38;

pub const MUL_BASE_COST: Cost = 92;
pub const MUL_COST_PER_OP: Cost = 885;
pub const MUL_LINEAR_COST_PER_BYTE: Cost = 6;
pub const MUL_SQUARE_COST_PER_BYTE_DIVIDER: Cost = 128;

pub const STRLEN_BASE_COST: Cost = 173;
pub const STRLEN_COST_PER_BYTE: Cost = 1;

pub const SUBSTR_COST: Cost = 1;

pub const CONCAT_BASE_COST: Cost = 142;
pub const CONCAT_COST_PER_ARG: Cost = 135;
pub const CONCAT_COST_PER_BYTE: Cost = 3;

pub const BOOL_BASE_COST: Cost = 200;
pub const BOOL_COST_PER_ARG: Cost = 300;

pub const ASHIFT_BASE_COST: Cost = 596;
pub const ASHIFT_COST_PER_BYTE: Cost = 3;

pub const LSHIFT_BASE_COST: Cost = 277;
pub const LSHIFT_COST_PER_BYTE: Cost = 3;

pub const LOGNOT_BASE_COST: Cost = 331;
pub const LOGNOT_COST_PER_BYTE: Cost = 3;

/// Unknown operators whose cost reaches this are rejected outright.
pub const UNKNOWN_OP_COST_LIMIT: Cost = 1 << 32;

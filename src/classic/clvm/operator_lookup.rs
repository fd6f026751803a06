use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use log::{debug, trace};

use crate::classic::clvm::core_ops::{
    op_cons, op_eq, op_first, op_if, op_listp, op_raise, op_rest,
};
use crate::classic::clvm::costs::Cost;
use crate::classic::clvm::more_ops::{
    op_add, op_all, op_any, op_ash, op_concat, op_div, op_divmod, op_gr, op_gr_bytes, op_logand,
    op_logior, op_lognot, op_logxor, op_lsh, op_multiply, op_not, op_point_add,
    op_pubkey_for_exp, op_sha256, op_softfork, op_strlen, op_substr, op_subtract, op_unknown,
};
use crate::classic::clvm::reduction::{OperatorError, Response};
use crate::classic::clvm::sexp::{atom, SExp};
use crate::classic::clvm::KeywordTable;

pub type OperatorFn = fn(&Rc<SExp>) -> Response;

/// Operator implementations by canonical name.
#[derive(Clone, Default)]
pub struct OperatorRegistry {
    ops: HashMap<String, OperatorFn>,
}

impl fmt::Debug for OperatorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut names: Vec<&String> = self.ops.keys().collect();
        names.sort();
        f.debug_struct("OperatorRegistry")
            .field("ops", &names)
            .finish()
    }
}

impl OperatorRegistry {
    pub fn new() -> Self {
        OperatorRegistry {
            ops: HashMap::new(),
        }
    }

    /// Every operator clvm defines.
    pub fn standard() -> Self {
        let mut registry = OperatorRegistry::new();
        let ops: [(&str, OperatorFn); 30] = [
            ("if", op_if),
            ("cons", op_cons),
            ("first", op_first),
            ("rest", op_rest),
            ("listp", op_listp),
            ("raise", op_raise),
            ("eq", op_eq),
            ("gr_bytes", op_gr_bytes),
            ("sha256", op_sha256),
            ("substr", op_substr),
            ("strlen", op_strlen),
            ("concat", op_concat),
            ("add", op_add),
            ("subtract", op_subtract),
            ("multiply", op_multiply),
            ("div", op_div),
            ("divmod", op_divmod),
            ("gr", op_gr),
            ("ash", op_ash),
            ("lsh", op_lsh),
            ("logand", op_logand),
            ("logior", op_logior),
            ("logxor", op_logxor),
            ("lognot", op_lognot),
            ("point_add", op_point_add),
            ("pubkey_for_exp", op_pubkey_for_exp),
            ("not", op_not),
            ("any", op_any),
            ("all", op_all),
            ("softfork", op_softfork),
        ];
        for (name, f) in ops.iter() {
            registry.register(name, *f);
        }
        registry
    }

    pub fn register(&mut self, name: &str, f: OperatorFn) {
        self.ops.insert(name.to_string(), f);
    }

    pub fn resolve(&self, name: &str) -> Option<OperatorFn> {
        self.ops.get(name).cloned()
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}

/// How the dispatcher treats opcodes it can't resolve.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LookupOptions {
    /// Reject unknown opcodes instead of charging the soft-fork cost for
    /// them.  Mempool validation runs this way.
    pub strict: bool,
}

/// Resolves opcodes to operators and runs them.
pub struct OperatorLookup {
    keywords: KeywordTable,
    f_lookup: [Option<OperatorFn>; 256],
    quote_kw: Vec<u8>,
    apply_kw: Vec<u8>,
    options: LookupOptions,
}

impl OperatorLookup {
    pub fn new(keywords: KeywordTable, registry: &OperatorRegistry, options: LookupOptions) -> Self {
        let mut f_lookup: [Option<OperatorFn>; 256] = [None; 256];
        for (byte, name) in keywords.iter() {
            match registry.resolve(name) {
                Some(f) => {
                    f_lookup[byte as usize] = Some(f);
                }
                None => {
                    debug!("keyword {} ({:#04x}) has no operator", name, byte);
                }
            }
        }

        let resolved = f_lookup.iter().filter(|f| f.is_some()).count();
        debug!(
            "operator lookup: {} keywords, {} operators resolved, strict {}",
            keywords.len(),
            resolved,
            options.strict
        );

        OperatorLookup {
            quote_kw: keywords.quote_atom(),
            apply_kw: keywords.apply_atom(),
            keywords,
            f_lookup,
            options,
        }
    }

    /// The standard keyword table with every operator, non-strict.
    pub fn standard() -> Self {
        OperatorLookup::new(
            KeywordTable::new(),
            &OperatorRegistry::standard(),
            LookupOptions::default(),
        )
    }

    pub fn quote_kw(&self) -> &[u8] {
        &self.quote_kw
    }

    pub fn apply_kw(&self) -> &[u8] {
        &self.apply_kw
    }

    pub fn keywords(&self) -> &KeywordTable {
        &self.keywords
    }

    pub fn options(&self) -> &LookupOptions {
        &self.options
    }

    /// Run the operator named by `op` on `args`.  Opcodes that resolve to
    /// nothing are costed by the unknown operator formula and yield no value.
    pub fn dispatch(
        &self,
        op: &[u8],
        args: &Rc<SExp>,
    ) -> Result<(Cost, Option<Rc<SExp>>), OperatorError> {
        if let Some(byte) = op.first() {
            if let Some(f) = self.f_lookup[*byte as usize] {
                let reduction = f(args)?;
                return Ok((reduction.0, Some(reduction.1)));
            }
        }

        if self.options.strict {
            return Err(OperatorError::InvalidOperator(
                atom(op),
                "unimplemented operator".to_string(),
            ));
        }

        let cost = op_unknown(op, args)?;
        trace!("unknown operator {} cost {}", hex::encode(op), cost);
        Ok((cost, None))
    }
}

use std::collections::HashMap;

use log::warn;

pub mod args;
pub mod casts;
pub mod core_ops;
pub mod costs;
pub mod more_ops;
pub mod operator_lookup;
pub mod reduction;
pub mod sexp;

/// One token per opcode, starting at 0x00.  "." marks a slot that is
/// reserved and names nothing.
pub const KEYWORDS: &str = concat!(
    // core opcodes 0x01-x08
    ". q a i c f r l x ",
    // opcodes on atoms as strings 0x09-0x0f
    "= >s sha256 substr strlen concat . ",
    // opcodes on atoms as ints 0x10-0x17
    "+ - * / divmod > ash lsh ",
    // opcodes on atoms as vectors of bools 0x18-0x1c
    "logand logior logxor lognot . ",
    // opcodes for bls 1381 0x1d-0x1f
    "point_add pubkey_for_exp . ",
    // bool opcodes 0x20-0x23
    "not any all . ",
    // misc 0x24
    "softfork "
);

/// Symbolic keywords and the operator names they stand for.
pub const OP_REWRITE: [(&str, &str); 13] = [
    ("+", "add"),
    ("-", "subtract"),
    ("*", "multiply"),
    ("/", "div"),
    ("i", "if"),
    ("c", "cons"),
    ("f", "first"),
    ("r", "rest"),
    ("l", "listp"),
    ("x", "raise"),
    ("=", "eq"),
    (">", "gr"),
    (">s", "gr_bytes"),
];

const RESERVED_KEYWORD: &str = ".";

/// Maps single byte opcodes to operator names.  Never changes once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordTable {
    atom_to_keyword: Vec<Option<String>>,
    keyword_to_atom: HashMap<String, u8>,
}

impl Default for KeywordTable {
    fn default() -> Self {
        KeywordTable::new()
    }
}

impl KeywordTable {
    pub fn new() -> Self {
        let rewrite: HashMap<&str, &str> = OP_REWRITE.iter().cloned().collect();
        let mut atom_to_keyword = Vec::new();
        let mut keyword_to_atom = HashMap::new();

        for (byte, token) in KEYWORDS.split_whitespace().enumerate() {
            if token == RESERVED_KEYWORD {
                atom_to_keyword.push(None);
                continue;
            }

            let keyword = rewrite.get(token).cloned().unwrap_or(token).to_string();
            keyword_to_atom.insert(keyword.clone(), byte as u8);
            atom_to_keyword.push(Some(keyword));
        }

        KeywordTable {
            atom_to_keyword,
            keyword_to_atom,
        }
    }

    /// Build a table from an externally supplied name to opcode map, as a
    /// runtime configured dialect would.  Only one byte opcodes can be
    /// placed, and a byte goes to the first name claiming it in name order;
    /// anything else is skipped.
    pub fn from_op_map(op_map: &HashMap<String, Vec<u8>>) -> Self {
        let mut atom_to_keyword: Vec<Option<String>> = Vec::new();
        let mut keyword_to_atom = HashMap::new();

        let mut entries: Vec<(&String, &Vec<u8>)> = op_map.iter().collect();
        entries.sort();

        for (name, opcode) in entries.into_iter() {
            if opcode.len() != 1 {
                warn!("skipping operator {} with opcode {}", name, hex::encode(opcode));
                continue;
            }

            let byte = opcode[0] as usize;
            if atom_to_keyword.len() <= byte {
                atom_to_keyword.resize(byte + 1, None);
            }
            if let Some(taken) = &atom_to_keyword[byte] {
                warn!(
                    "skipping operator {}: opcode {:#04x} already names {}",
                    name, byte, taken
                );
                continue;
            }
            atom_to_keyword[byte] = Some(name.clone());
            keyword_to_atom.insert(name.clone(), opcode[0]);
        }

        KeywordTable {
            atom_to_keyword,
            keyword_to_atom,
        }
    }

    pub fn keyword_from_atom(&self, byte: u8) -> Option<&str> {
        self.atom_to_keyword
            .get(byte as usize)
            .and_then(|k| k.as_ref().map(|s| s.as_str()))
    }

    pub fn atom_for(&self, keyword: &str) -> Option<u8> {
        self.keyword_to_atom.get(keyword).cloned()
    }

    pub fn quote_atom(&self) -> Vec<u8> {
        self.atom_for("q").map(|b| vec![b]).unwrap_or_default()
    }

    pub fn apply_atom(&self) -> Vec<u8> {
        self.atom_for("a").map(|b| vec![b]).unwrap_or_default()
    }

    /// Number of opcode slots, reserved ones included.
    pub fn len(&self) -> usize {
        self.atom_to_keyword.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atom_to_keyword.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u8, &str)> + '_ {
        self.atom_to_keyword
            .iter()
            .enumerate()
            .filter_map(|(i, k)| k.as_ref().map(|k| (i as u8, k.as_str())))
    }
}

lazy_static! {
    static ref KEYWORD_TABLE: KeywordTable = KeywordTable::new();
}

/// The standard keyword table, built on first use.
pub fn keyword_table() -> &'static KeywordTable {
    &KEYWORD_TABLE
}

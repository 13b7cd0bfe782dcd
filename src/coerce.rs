//! Coercion of loosely-typed input into canonical field values.
//!
//! Both entry points are total: malformed or out-of-range input is carried
//! through unchanged and rejected later by the validators, so assignment
//! itself never fails.

use crate::symbol::{FieldValue, Input, Item, Symbol};

fn intern(item: Item) -> Option<Symbol> {
    match item {
        Item::Text(text) if text.is_empty() => None,
        Item::Text(text) => Some(Symbol::new(&text)),
        Item::Sym(symbol) => Some(symbol),
    }
}

/// Coerce input for a scalar attribute: a single symbol, or absence.
pub fn scalar(input: Input) -> FieldValue {
    match input {
        Input::Absent => FieldValue::Absent,
        Input::Text(text) if text.is_empty() => FieldValue::Absent,
        Input::Text(text) => FieldValue::One(Symbol::new(&text)),
        Input::Sym(symbol) => FieldValue::One(symbol),
        // a sequence handed to a scalar attribute is kept verbatim so the
        // inclusion validator can reject it
        Input::Seq(items) => FieldValue::Many(items.into_iter().filter_map(intern).collect()),
    }
}

/// Coerce input for a set-valued attribute: an ordered sequence of unique
/// symbols, preserving first occurrence.
pub fn set(input: Input) -> FieldValue {
    let items = match input {
        Input::Absent => Vec::new(),
        Input::Text(text) => vec![Item::Text(text)],
        Input::Sym(symbol) => vec![Item::Sym(symbol)],
        Input::Seq(items) => items,
    };
    let mut symbols: Vec<Symbol> = Vec::new();
    for symbol in items.into_iter().filter_map(intern) {
        if !symbols.contains(&symbol) {
            symbols.push(symbol);
        }
    }
    FieldValue::Many(symbols)
}

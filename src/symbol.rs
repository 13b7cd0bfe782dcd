// used to keep the one-to-one mapping between symbol names and their handles
use bimap::BiMap;

use std::fmt;
use std::sync::{Arc, Mutex};

use lazy_static::lazy_static;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

// ------------- Symbol -------------
/// An interned symbolic value.
///
/// Symbols are small copyable handles into a process-wide keeper, so two
/// symbols with the same name are always equal and cheap to compare.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Debug)]
pub struct Symbol(u32);

impl Symbol {
    pub fn new(name: &str) -> Self {
        let (symbol, _) = SYMBOLS.lock().unwrap().keep(name);
        symbol
    }
    pub fn name(&self) -> Arc<str> {
        SYMBOLS.lock().unwrap().lookup(self)
    }
}
impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
impl PartialEq<str> for Symbol {
    fn eq(&self, other: &str) -> bool {
        self.name().as_ref() == other
    }
}
impl PartialEq<&str> for Symbol {
    fn eq(&self, other: &&str) -> bool {
        self.name().as_ref() == *other
    }
}
impl Serialize for Symbol {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.name())
    }
}
impl<'de> Deserialize<'de> for Symbol {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Symbol::new(&name))
    }
}

#[derive(Debug)]
pub struct SymbolKeeper {
    kept: BiMap<Arc<str>, Symbol>,
}
impl SymbolKeeper {
    pub fn new() -> Self {
        Self { kept: BiMap::new() }
    }
    pub fn keep(&mut self, name: &str) -> (Symbol, bool) {
        if let Some(symbol) = self.kept.get_by_left(name) {
            return (*symbol, true);
        }
        let symbol = Symbol(self.kept.len() as u32);
        self.kept.insert(Arc::from(name), symbol);
        (symbol, false)
    }
    pub fn lookup(&self, symbol: &Symbol) -> Arc<str> {
        Arc::clone(self.kept.get_by_right(symbol).unwrap())
    }
    pub fn len(&self) -> usize {
        self.kept.len()
    }
}

lazy_static! {
    static ref SYMBOLS: Mutex<SymbolKeeper> = Mutex::new(SymbolKeeper::new());
}

// ------------- Input -------------
/// One element of a sequence assignment.
#[derive(PartialEq, Eq, Clone, Debug)]
pub enum Item {
    Text(String),
    Sym(Symbol),
}

/// Loosely-typed assignment input, as accepted by the generated setters.
///
/// Assignment never fails: whatever shape arrives here is coerced into a
/// canonical [`FieldValue`] and only rejected later, at validation time.
#[derive(PartialEq, Eq, Clone, Debug)]
pub enum Input {
    Absent,
    Text(String),
    Sym(Symbol),
    Seq(Vec<Item>),
}

impl From<&str> for Item {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}
impl From<String> for Item {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}
impl From<Symbol> for Item {
    fn from(symbol: Symbol) -> Self {
        Self::Sym(symbol)
    }
}
impl From<&str> for Input {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}
impl From<String> for Input {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}
impl From<Symbol> for Input {
    fn from(symbol: Symbol) -> Self {
        Self::Sym(symbol)
    }
}
impl<T: Into<Item>> From<Vec<T>> for Input {
    fn from(items: Vec<T>) -> Self {
        Self::Seq(items.into_iter().map(Into::into).collect())
    }
}
impl<T: Into<Item>, const N: usize> From<[T; N]> for Input {
    fn from(items: [T; N]) -> Self {
        Self::Seq(items.into_iter().map(Into::into).collect())
    }
}

// ------------- FieldValue -------------
/// The canonical stored form of an enum-backed field.
#[derive(PartialEq, Eq, Clone, Debug)]
pub enum FieldValue {
    Absent,
    One(Symbol),
    Many(Vec<Symbol>),
}
impl FieldValue {
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }
    pub fn symbol(&self) -> Option<Symbol> {
        match self {
            Self::One(symbol) => Some(*symbol),
            _ => None,
        }
    }
    pub fn sequence(&self) -> Option<&[Symbol]> {
        match self {
            Self::Many(symbols) => Some(symbols),
            _ => None,
        }
    }
    pub fn contains(&self, symbol: Symbol) -> bool {
        match self {
            Self::Absent => false,
            Self::One(kept) => *kept == symbol,
            Self::Many(kept) => kept.contains(&symbol),
        }
    }
}
impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absent => write!(f, "nothing"),
            Self::One(symbol) => write!(f, "{}", symbol),
            Self::Many(symbols) => {
                let mut s = String::new();
                for symbol in symbols {
                    s += &(symbol.to_string() + ",");
                }
                s.pop();
                write!(f, "[{}]", s)
            }
        }
    }
}

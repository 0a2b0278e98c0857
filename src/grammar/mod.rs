//! Decoded grammar: rules, alternates and symbols.
//!
//! Rules are stored in an arena in stream order. References between rules
//! are kept as [`RuleId`] values and resolved through the grammar's
//! indices, so self-references and cycles need no special handling.
//!
//! ```
//! use ruletab::grammar::{Alt, GrammarBuilder, RuleId, Symbol};
//!
//! let grammar = GrammarBuilder::new()
//!     .rule(0, [Alt::new().reference(0).range('a', 'z'), Alt::new()])
//!     .build();
//!
//! let rule = grammar.rule(RuleId(0)).unwrap();
//! assert_eq!(rule.alternates.len(), 2);
//! assert_eq!(rule.alternates[0].symbols[0].symbol, Symbol::Reference(RuleId(0)));
//! ```

mod builder;
mod index;

pub use builder::{Alt, GrammarBuilder};
pub use index::{AlternateIndex, OffsetIndex};

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::stream::Token;

/// Token that terminates the rule list unless configured otherwise.
pub const SENTINEL: Token = 0xFFFF;

/// Identifier of a rule, as written in the rule-id position of the stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct RuleId(pub Token);

impl From<Token> for RuleId {
    fn from(id: Token) -> Self {
        RuleId(id)
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Inclusive range of code points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CharRange {
    pub from: Token,
    pub to: Token,
}

impl CharRange {
    pub fn new(from: Token, to: Token) -> Self {
        CharRange { from, to }
    }

    /// A range holding exactly one code point.
    pub fn single(c: Token) -> Self {
        CharRange { from: c, to: c }
    }

    #[inline]
    pub fn is_single(&self) -> bool {
        self.from == self.to
    }

    #[inline]
    pub fn contains(&self, c: Token) -> bool {
        self.from <= c && c <= self.to
    }
}

impl fmt::Display for CharRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_single() {
            write_code_point(f, self.from)
        } else {
            write_code_point(f, self.from)?;
            f.write_str("-")?;
            write_code_point(f, self.to)
        }
    }
}

/// Quote a code point as a character literal, or `U+XXXX` when it is not
/// a printable scalar value.
fn write_code_point(f: &mut fmt::Formatter<'_>, c: Token) -> fmt::Result {
    match char::from_u32(c) {
        Some(ch) if !ch.is_control() => write!(f, "'{}'", ch.escape_debug()),
        Some(ch) => write!(f, "'{}'", ch.escape_default()),
        None => write!(f, "U+{:04X}", c),
    }
}

/// Ordered list of inclusive code point ranges.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct CharSet {
    ranges: Vec<CharRange>,
}

impl CharSet {
    pub fn new(ranges: Vec<CharRange>) -> Self {
        CharSet { ranges }
    }

    /// Build a set from the flat `from, to, from, to, ...` payload.
    ///
    /// A trailing unpaired value is ignored; callers check parity first.
    pub fn from_pairs(payload: &[Token]) -> Self {
        CharSet {
            ranges: payload
                .chunks_exact(2)
                .map(|pair| CharRange::new(pair[0], pair[1]))
                .collect(),
        }
    }

    pub fn ranges(&self) -> &[CharRange] {
        &self.ranges
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    pub fn contains(&self, c: Token) -> bool {
        self.ranges.iter().any(|r| r.contains(c))
    }

    pub(crate) fn push(&mut self, range: CharRange) {
        self.ranges.push(range);
    }
}

impl fmt::Display for CharSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, range) in self.ranges.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", range)?;
        }
        f.write_str("]")
    }
}

/// One element of an alternate.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Symbol {
    /// Reference to another rule, resolved lazily by id.
    Reference(RuleId),
    /// Match one code point from the set.
    Chars(CharSet),
}

impl Symbol {
    /// Number of tokens this symbol occupies when encoded, length prefix included.
    pub fn token_len(&self) -> usize {
        match self {
            Symbol::Reference(_) => 2,
            Symbol::Chars(set) => 1 + 2 * set.len(),
        }
    }

    pub fn as_reference(&self) -> Option<RuleId> {
        match self {
            Symbol::Reference(id) => Some(*id),
            Symbol::Chars(_) => None,
        }
    }

    pub fn as_chars(&self) -> Option<&CharSet> {
        match self {
            Symbol::Reference(_) => None,
            Symbol::Chars(set) => Some(set),
        }
    }
}

/// A symbol together with the offset of its length prefix.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SymbolEntry {
    pub offset: usize,
    pub symbol: Symbol,
}

/// One ordered choice of symbols within a rule.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Alternate {
    /// Offset of the alternate's length prefix.
    pub offset: usize,
    /// Length prefix as read from the stream (never zero).
    pub declared_len: Token,
    pub symbols: Vec<SymbolEntry>,
}

impl Alternate {
    /// Length the producer would write for this alternate: the prefix itself
    /// plus every symbol, excluding the closing zero.
    pub fn encoded_len(&self) -> usize {
        1 + self
            .symbols
            .iter()
            .map(|entry| entry.symbol.token_len())
            .sum::<usize>()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

/// A numbered production and its alternates.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rule {
    pub id: RuleId,
    /// Offset of the rule's id token.
    pub offset: usize,
    pub alternates: Vec<Alternate>,
}

impl Rule {
    /// Number of tokens this rule occupies, closing zero included.
    pub fn token_len(&self) -> usize {
        1 + self
            .alternates
            .iter()
            .map(|alt| alt.encoded_len() + 1)
            .sum::<usize>()
            + 1
    }
}

/// A reference whose target never appears as a rule header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DanglingRef {
    pub from: RuleId,
    pub alternate: usize,
    pub offset: usize,
    pub target: RuleId,
}

/// A fully decoded grammar table.
///
/// Holds the rule arena in stream order plus the offset index and the
/// alternate index, both keyed by rule id in discovery order.
///
/// Only the arena is serialized; the indices are rebuilt from it on
/// deserialization.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "GrammarData", into = "GrammarData"))]
pub struct Grammar {
    rules: Vec<Rule>,
    offsets: OffsetIndex,
    alternates: AlternateIndex,
    sentinel: Token,
    /// Offset of the sentinel token.
    end_offset: usize,
}

impl Grammar {
    pub(crate) fn new(sentinel: Token) -> Self {
        Grammar {
            rules: Vec::new(),
            offsets: OffsetIndex::default(),
            alternates: AlternateIndex::default(),
            sentinel,
            end_offset: 0,
        }
    }

    /// Register a rule header and return its arena slot.
    ///
    /// A repeated id replaces the earlier index entries but keeps the
    /// earlier discovery position.
    pub(crate) fn begin_rule(&mut self, id: RuleId, offset: usize) -> usize {
        let slot = self.rules.len();
        self.rules.push(Rule {
            id,
            offset,
            alternates: Vec::new(),
        });
        self.offsets.insert(id, offset);
        self.alternates.insert(id, slot);
        slot
    }

    pub(crate) fn push_alternate(&mut self, slot: usize, alternate: Alternate) {
        self.rules[slot].alternates.push(alternate);
    }

    /// Append a symbol to the most recently pushed alternate of `slot`.
    pub(crate) fn push_symbol(&mut self, slot: usize, entry: SymbolEntry) {
        if let Some(alternate) = self.rules[slot].alternates.last_mut() {
            alternate.symbols.push(entry);
        }
    }

    pub(crate) fn finish(&mut self, end_offset: usize) {
        self.end_offset = end_offset;
    }

    /// Every rule in stream order, repeated headers included.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Rule ids in the order they were first discovered.
    pub fn rule_ids(&self) -> impl Iterator<Item = RuleId> + '_ {
        self.offsets.ids()
    }

    /// Number of distinct rule ids.
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    pub fn offsets(&self) -> &OffsetIndex {
        &self.offsets
    }

    pub fn alternate_index(&self) -> &AlternateIndex {
        &self.alternates
    }

    /// Resolve a rule id to its (last) definition.
    pub fn rule(&self, id: RuleId) -> Option<&Rule> {
        self.alternates
            .slot(id)
            .and_then(|slot| self.rules.get(slot))
    }

    pub fn offset_of(&self, id: RuleId) -> Option<usize> {
        self.offsets.get(id)
    }

    pub fn alternates_of(&self, id: RuleId) -> Option<&[Alternate]> {
        self.rule(id).map(|rule| rule.alternates.as_slice())
    }

    pub fn sentinel(&self) -> Token {
        self.sentinel
    }

    /// Offset of the sentinel that closed the rule list.
    pub fn end_offset(&self) -> usize {
        self.end_offset
    }

    /// Number of tokens the grammar occupies, sentinel included.
    pub fn token_len(&self) -> usize {
        self.rules.iter().map(Rule::token_len).sum::<usize>() + 1
    }

    /// Every rule reference as `(owning rule, alternate index, entry, target)`.
    pub fn references(&self) -> impl Iterator<Item = (RuleId, usize, &SymbolEntry, RuleId)> {
        self.rules.iter().flat_map(|rule| {
            rule.alternates
                .iter()
                .enumerate()
                .flat_map(move |(n, alt)| {
                    alt.symbols.iter().filter_map(move |entry| {
                        entry
                            .symbol
                            .as_reference()
                            .map(|target| (rule.id, n, entry, target))
                    })
                })
        })
    }

    /// References whose target has no rule header.
    pub fn dangling_references(&self) -> Vec<DanglingRef> {
        self.references()
            .filter(|(_, _, _, target)| !self.offsets.contains(*target))
            .map(|(from, alternate, entry, target)| DanglingRef {
                from,
                alternate,
                offset: entry.offset,
                target,
            })
            .collect()
    }

    /// Rules that no symbol refers to, in discovery order.
    ///
    /// The first rule is usually the grammar's root and shows up here.
    pub fn unreferenced_rules(&self) -> Vec<RuleId> {
        let referenced: indexmap::IndexSet<RuleId> =
            self.references().map(|(_, _, _, target)| target).collect();
        self.rule_ids()
            .filter(|id| !referenced.contains(id))
            .collect()
    }
}

/// Serialized form of a [`Grammar`].
#[cfg(feature = "serde")]
#[derive(Serialize, Deserialize)]
struct GrammarData {
    rules: Vec<Rule>,
    sentinel: Token,
    end_offset: usize,
}

#[cfg(feature = "serde")]
impl From<Grammar> for GrammarData {
    fn from(grammar: Grammar) -> Self {
        GrammarData {
            rules: grammar.rules,
            sentinel: grammar.sentinel,
            end_offset: grammar.end_offset,
        }
    }
}

#[cfg(feature = "serde")]
impl From<GrammarData> for Grammar {
    fn from(data: GrammarData) -> Self {
        let mut grammar = Grammar::new(data.sentinel);
        for rule in data.rules {
            let slot = grammar.begin_rule(rule.id, rule.offset);
            for alternate in rule.alternates {
                grammar.push_alternate(slot, alternate);
            }
        }
        grammar.finish(data.end_offset);
        grammar
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_range_display() {
        assert_eq!(CharRange::new(97, 122).to_string(), "'a'-'z'");
        assert_eq!(CharRange::single(95).to_string(), "'_'");
        assert_eq!(CharRange::single(10).to_string(), "'\\n'");
        assert_eq!(CharRange::single(39).to_string(), "'\\''");
        assert_eq!(CharRange::single(0xD800).to_string(), "U+D800");
    }

    #[test]
    fn test_char_set_from_pairs() {
        let set = CharSet::from_pairs(&[97, 122, 65, 90, 95, 95]);
        assert_eq!(set.len(), 3);
        assert!(set.contains(b'q' as u32));
        assert!(set.contains(b'_' as u32));
        assert!(!set.contains(b'0' as u32));
        assert_eq!(set.to_string(), "['a'-'z', 'A'-'Z', '_']");
    }

    #[test]
    fn test_symbol_token_len() {
        assert_eq!(Symbol::Reference(RuleId(4)).token_len(), 2);
        let set = CharSet::from_pairs(&[97, 122, 65, 90]);
        assert_eq!(Symbol::Chars(set).token_len(), 5);
    }

    #[test]
    fn test_stale_alternate_slot_resolves_to_none() {
        let mut grammar = Grammar::new(SENTINEL);
        grammar.alternates.insert(RuleId(1), 5);
        assert_eq!(grammar.rule(RuleId(1)), None);
        assert_eq!(grammar.alternates_of(RuleId(1)), None);
    }

    #[test]
    fn test_repeated_rule_keeps_discovery_order() {
        let mut grammar = Grammar::new(SENTINEL);
        grammar.begin_rule(RuleId(4), 0);
        grammar.begin_rule(RuleId(2), 2);
        let slot = grammar.begin_rule(RuleId(4), 4);
        grammar.push_alternate(
            slot,
            Alternate {
                offset: 5,
                declared_len: 1,
                symbols: Vec::new(),
            },
        );

        assert_eq!(grammar.rules().len(), 3);
        assert_eq!(grammar.len(), 2);
        assert_eq!(grammar.rule_ids().collect::<Vec<_>>(), [RuleId(4), RuleId(2)]);
        assert_eq!(grammar.offset_of(RuleId(4)), Some(4));
        assert_eq!(grammar.alternates_of(RuleId(4)).unwrap().len(), 1);
    }

    #[test]
    fn test_reference_checks() {
        let grammar = GrammarBuilder::new()
            .rule(0, [Alt::new().reference(1).reference(9)])
            .rule(1, [Alt::new().range('a', 'z').reference(1)])
            .rule(2, [Alt::new().literal("x")])
            .build();

        let dangling = grammar.dangling_references();
        assert_eq!(dangling.len(), 1);
        assert_eq!(dangling[0].from, RuleId(0));
        assert_eq!(dangling[0].target, RuleId(9));
        assert_eq!(dangling[0].offset, 4);

        assert_eq!(grammar.unreferenced_rules(), [RuleId(0), RuleId(2)]);
    }
}

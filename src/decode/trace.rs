//! Structural events emitted while decoding.
//!
//! A [`TraceSink`] is handed to the decoder and called at every state
//! transition, so events arrive depth-first in stream order with the
//! offsets the decoder saw.

use crate::grammar::{RuleId, SymbolEntry};
use crate::stream::Token;

/// Receiver of structural decode events.
///
/// Every method defaults to doing nothing.
#[allow(unused_variables)]
pub trait TraceSink {
    /// Decoding is about to read the first rule id.
    fn grammar_begin(&mut self) {}

    /// A rule header was read.
    fn rule_enter(&mut self, id: RuleId, offset: usize) {}

    /// A non-zero alternate length prefix was read.
    fn alternate_enter(&mut self, rule: RuleId, index: usize, offset: usize, len: Token) {}

    /// A complete symbol was read.
    fn symbol(&mut self, rule: RuleId, alternate: usize, entry: &SymbolEntry) {}

    /// The zero closing an alternate's symbol list was read at `offset`.
    fn alternate_exit(&mut self, rule: RuleId, index: usize, offset: usize) {}

    /// The zero closing a rule's alternate list was read at `offset`.
    fn rule_exit(&mut self, id: RuleId, offset: usize) {}

    /// The sentinel was read at `offset`.
    fn grammar_end(&mut self, offset: usize, sentinel: Token) {}
}

/// Discards every event.
impl TraceSink for () {}

impl<T: TraceSink + ?Sized> TraceSink for &mut T {
    fn grammar_begin(&mut self) {
        (**self).grammar_begin()
    }

    fn rule_enter(&mut self, id: RuleId, offset: usize) {
        (**self).rule_enter(id, offset)
    }

    fn alternate_enter(&mut self, rule: RuleId, index: usize, offset: usize, len: Token) {
        (**self).alternate_enter(rule, index, offset, len)
    }

    fn symbol(&mut self, rule: RuleId, alternate: usize, entry: &SymbolEntry) {
        (**self).symbol(rule, alternate, entry)
    }

    fn alternate_exit(&mut self, rule: RuleId, index: usize, offset: usize) {
        (**self).alternate_exit(rule, index, offset)
    }

    fn rule_exit(&mut self, id: RuleId, offset: usize) {
        (**self).rule_exit(id, offset)
    }

    fn grammar_end(&mut self, offset: usize, sentinel: Token) {
        (**self).grammar_end(offset, sentinel)
    }
}

/// An owned copy of one trace callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TraceEvent {
    GrammarBegin,
    RuleEnter {
        id: RuleId,
        offset: usize,
    },
    AlternateEnter {
        rule: RuleId,
        index: usize,
        offset: usize,
        len: Token,
    },
    Symbol {
        rule: RuleId,
        alternate: usize,
        entry: SymbolEntry,
    },
    AlternateExit {
        rule: RuleId,
        index: usize,
        offset: usize,
    },
    RuleExit {
        id: RuleId,
        offset: usize,
    },
    GrammarEnd {
        offset: usize,
        sentinel: Token,
    },
}

/// Records every event in order.
impl TraceSink for Vec<TraceEvent> {
    fn grammar_begin(&mut self) {
        self.push(TraceEvent::GrammarBegin);
    }

    fn rule_enter(&mut self, id: RuleId, offset: usize) {
        self.push(TraceEvent::RuleEnter { id, offset });
    }

    fn alternate_enter(&mut self, rule: RuleId, index: usize, offset: usize, len: Token) {
        self.push(TraceEvent::AlternateEnter {
            rule,
            index,
            offset,
            len,
        });
    }

    fn symbol(&mut self, rule: RuleId, alternate: usize, entry: &SymbolEntry) {
        self.push(TraceEvent::Symbol {
            rule,
            alternate,
            entry: entry.clone(),
        });
    }

    fn alternate_exit(&mut self, rule: RuleId, index: usize, offset: usize) {
        self.push(TraceEvent::AlternateExit {
            rule,
            index,
            offset,
        });
    }

    fn rule_exit(&mut self, id: RuleId, offset: usize) {
        self.push(TraceEvent::RuleExit { id, offset });
    }

    fn grammar_end(&mut self, offset: usize, sentinel: Token) {
        self.push(TraceEvent::GrammarEnd { offset, sentinel });
    }
}

//! Property tests over generated grammars.

use proptest::prelude::*;

use ruletab::decode::{decode_with, DecodeConfig, DecodeErrorKind, ErrorClass};
use ruletab::grammar::{Alt, GrammarBuilder};
use ruletab::{decode, encode, Grammar, Token};

#[derive(Debug, Clone)]
enum GenSymbol {
    Reference(Token),
    Chars(Vec<(Token, Token)>),
}

fn symbol_strategy() -> impl Strategy<Value = GenSymbol> {
    prop_oneof![
        (0u32..1000).prop_map(GenSymbol::Reference),
        prop::collection::vec((0u32..0x11_0000, 0u32..0x11_0000), 1..4)
            .prop_map(GenSymbol::Chars),
    ]
}

fn alternate_strategy() -> impl Strategy<Value = Vec<GenSymbol>> {
    prop::collection::vec(symbol_strategy(), 0..5)
}

fn grammar_strategy() -> impl Strategy<Value = Grammar> {
    (
        prop::collection::btree_set(0u32..1000, 0..8),
        prop::collection::vec(prop::collection::vec(alternate_strategy(), 0..4), 8),
    )
        .prop_map(|(ids, rules)| {
            let mut builder = GrammarBuilder::new();
            for (id, alternates) in ids.into_iter().zip(rules) {
                let alts = alternates.into_iter().map(|symbols| {
                    symbols.into_iter().fold(Alt::new(), |alt, symbol| match symbol {
                        GenSymbol::Reference(target) => alt.reference(target),
                        GenSymbol::Chars(ranges) => alt.set(ranges),
                    })
                });
                builder = builder.rule(id, alts);
            }
            builder.build()
        })
}

proptest! {
    #[test]
    fn prop_decode_inverts_encode(grammar in grammar_strategy()) {
        let tokens = encode(&grammar);
        prop_assert_eq!(tokens.len(), grammar.token_len());

        let decoded = decode(&tokens).unwrap();
        prop_assert_eq!(&decoded, &grammar);
        prop_assert_eq!(encode(&decoded), tokens);
    }

    #[test]
    fn prop_built_grammars_pass_strict(grammar in grammar_strategy()) {
        let tokens = encode(&grammar);
        prop_assert!(decode_with(&tokens, &DecodeConfig::strict(), &mut ()).is_ok());
    }

    #[test]
    fn prop_proper_prefix_is_exhausted(
        grammar in grammar_strategy(),
        cut in any::<prop::sample::Index>(),
    ) {
        let tokens = encode(&grammar);
        let len = cut.index(tokens.len());
        let err = decode(&tokens[..len]).unwrap_err();
        prop_assert_eq!(err.class(), ErrorClass::ExhaustedStream);
        prop_assert!(err.offset <= len);
        match err.kind {
            DecodeErrorKind::ExhaustedStream { requested, available, .. } => {
                prop_assert!(requested > available);
                prop_assert_eq!(err.offset + available, len);
            }
            other => prop_assert!(false, "unexpected error {:?}", other),
        }
    }

    #[test]
    fn prop_trailing_tokens_ignored_when_lenient(
        grammar in grammar_strategy(),
        extra in prop::collection::vec(any::<Token>(), 1..8),
    ) {
        let mut tokens = encode(&grammar);
        let end = tokens.len();
        tokens.extend(extra);

        let decoded = decode(&tokens).unwrap();
        prop_assert_eq!(decoded.end_offset() + 1, end);

        let config = DecodeConfig::default().with_allow_trailing(false);
        let err = decode_with(&tokens, &config, &mut ()).unwrap_err();
        prop_assert_eq!(err.offset, end);
        prop_assert_eq!(err.class(), ErrorClass::MalformedGrammar);
    }
}

use jamc::parser::lexer::{tokenize, without_newlines};
use jamc::parser::parse;
use jamc::parser::token::TokenKind;
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    #[test]
    fn token_invariants_hold(s in ".*") {
        // Either a clean lexical error or a well-formed sequence; never a panic.
        if let Ok(tokens) = tokenize(&s) {
            let eofs = tokens.iter().filter(|t| t.kind == TokenKind::Eof).count();
            prop_assert_eq!(eofs, 1, "input={:?}", s);
            prop_assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::Eof));

            for t in &tokens {
                prop_assert!(t.span.line >= 1, "line 0 in {:?}", t);
                prop_assert!(t.span.col_start <= t.span.col_end, "bad span in {:?}", t);
            }

            // Positions never move backwards
            for pair in tokens.windows(2) {
                let (a, b) = (&pair[0].span, &pair[1].span);
                prop_assert!(
                    (a.line, a.col_start) < (b.line, b.col_start) || pair[1].kind == TokenKind::Eof,
                    "tokens out of order: {:?} then {:?}", pair[0], pair[1]
                );
            }
        }
    }

    #[test]
    fn digit_then_letter_always_fails(prefix in "([a-z]{1,4}[ ;=(]){0,3}", digits in "[0-9]{1,6}", letter in "[a-zA-Z]") {
        let source = format!("{prefix}{digits}{letter}");
        let err = tokenize(&source).expect_err("digit run followed by a letter must fail");
        prop_assert!(err.is_lexical());
        prop_assert_eq!(err.column(), prefix.chars().count() + 1);
    }

    #[test]
    fn digits_then_space_then_letter_succeeds(digits in "[0-9]{1,6}", name in "[a-z_][a-z0-9_]{0,6}") {
        let source = format!("{digits} {name}");
        let tokens = tokenize(&source).expect("separated tokens must scan");
        prop_assert_eq!(tokens[0].kind, TokenKind::IntLiteral);
        prop_assert_eq!(tokens.len(), 3);
    }

    #[test]
    fn newline_filter_only_drops_newlines(s in "[a-z0-9 ;=\n]{0,40}") {
        if let Ok(tokens) = tokenize(&s) {
            let filtered = without_newlines(&tokens);
            let expected: Vec<_> = tokens
                .iter()
                .filter(|t| t.kind != TokenKind::Newline)
                .cloned()
                .collect();
            prop_assert_eq!(filtered, expected);
        }
    }

    #[test]
    fn parse_is_deterministic(s in "[a-z0-9 ;=+(){}<\n]{0,60}") {
        let first = parse(&s);
        let second = parse(&s);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn single_operator_accepted_chain_rejected(a in 0i64..1000, b in 0i64..1000, c in 0i64..1000, op in "[-+*/%]") {
        let single = format!("{a} {op} {b} = x;");
        prop_assert!(parse(&single).is_ok(), "rejected {:?}", single);

        let chained = format!("{a} {op} {b} {op} {c} = x;");
        prop_assert!(parse(&chained).is_err(), "accepted {:?}", chained);
    }
}

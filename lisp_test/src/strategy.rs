//! Strategies and input pieces shared by the test suites of several crates.

use std::fmt::{Display, Write};

use proptest::{
    prelude::Arbitrary,
    prop_oneof,
    strategy::{BoxedStrategy, Just, Strategy},
};

/// Characters that may start a symbol.
pub const SYMBOL_START: &str = "[a-zA-Z_!$,.:;?#%&@{|}~]";

/// Characters that may continue a symbol.
pub const SYMBOL_CONTINUE: &str = "[a-zA-Z0-9_!$,.:;?#%&@{|}~+<=>*/-]";

/// Returns a strategy producing symbol names of at most `max_len` characters.
#[must_use]
pub fn symbol(max_len: usize) -> BoxedStrategy<String> {
    let pattern = format!("{SYMBOL_START}{SYMBOL_CONTINUE}{{0,{}}}", max_len.saturating_sub(1));
    proptest::string::string_regex(&pattern)
        .expect("valid symbol regex")
        .boxed()
}

/// Returns a strategy producing the body of a string literal, without its quotes.
///
/// The body may contain `\"`, `\\` and `\n` escapes but never a raw line break.
#[must_use]
pub fn string_body() -> BoxedStrategy<String> {
    r#"([a-z0-9 ()'+]|\\["\\n]){0,8}"#.boxed()
}

/// Resolves the backslash escapes of a string body the way the tokenizer does.
#[must_use]
pub fn unescape(body: &str) -> String {
    let mut value = String::new();
    let mut chars = body.chars();

    while let Some(char) = chars.next() {
        if char == '\\' {
            value.extend(chars.next());
        } else {
            value.push(char);
        }
    }

    value
}

/// Represents a run of whitespace separating two tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum Separator {
    Spaces(u8),
    Tabs(u8),
    NewLines(u8),
    CarriageReturns(u8),
}

impl Arbitrary for Separator {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (1u8..4)
            .prop_flat_map(|count| {
                prop_oneof![
                    4 => Just(Self::Spaces(count)),
                    1 => Just(Self::Tabs(count)),
                    1 => Just(Self::NewLines(count)),
                    1 => Just(Self::CarriageReturns(count)),
                ]
            })
            .boxed()
    }
}

impl Separator {
    /// Gets the character repeated by the separator and how many times it is repeated.
    #[must_use]
    pub fn parts(self) -> (char, u8) {
        match self {
            Self::Spaces(count) => (' ', count),
            Self::Tabs(count) => ('\t', count),
            Self::NewLines(count) => ('\n', count),
            Self::CarriageReturns(count) => ('\r', count),
        }
    }
}

impl Display for Separator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (char, count) = self.parts();
        for _ in 0..count {
            f.write_char(char)?;
        }
        Ok(())
    }
}

//! This module provides a trait [`Input`] for representing inputs generated for property based
//! testing.

use proptest::{
    prop_assert_eq,
    test_runner::{TestCaseError, TestCaseResult},
};

/// Represents an input generated for testing purposes.
///
/// An input is rendered to source text with [`std::fmt::Display`], the text is fed to the phase
/// under test and the result is checked against the input.
pub trait Input<Output> {
    /// Verifies that the given output complies with this input.
    ///
    /// # Errors
    /// [`proptest::test_runner::TestCaseError`]: for any reason the assertion fails.
    fn assert(self, output: Output) -> TestCaseResult;
}

impl<T, U> Input<&Box<T>> for &Box<U>
where
    for<'a, 'b> &'a U: Input<&'b T>,
{
    fn assert(self, output: &Box<T>) -> TestCaseResult { self.as_ref().assert(output.as_ref()) }
}

impl<T, U> Input<Option<T>> for Option<U>
where
    U: Input<T>,
{
    fn assert(self, output: Option<T>) -> TestCaseResult {
        match (self, output) {
            (Some(input), Some(output)) => input.assert(output),
            (None, None) => Ok(()),
            (Some(_), None) => Err(TestCaseError::fail("expected an output, found none")),
            (None, Some(_)) => Err(TestCaseError::fail("expected no output, found one")),
        }
    }
}

impl<'i, 'o, T, U> Input<&'o [T]> for &'i [U]
where
    for<'a, 'b> &'a U: Input<&'b T>,
{
    fn assert(self, output: &'o [T]) -> TestCaseResult {
        prop_assert_eq!(self.len(), output.len(), "the number of elements differs");

        self.iter()
            .zip(output)
            .try_for_each(|(input, output)| input.assert(output))
    }
}

impl<'i, 'o, T, U> Input<&'o Vec<T>> for &'i Vec<U>
where
    for<'a, 'b> &'a U: Input<&'b T>,
{
    fn assert(self, output: &'o Vec<T>) -> TestCaseResult {
        self.as_slice().assert(output.as_slice())
    }
}

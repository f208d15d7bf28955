//! Boolean checks.

use crate::chain::Validator;
use crate::foundation::ErrorKind;

impl Validator<bool> {
    /// Ensures the value is `true`.
    pub fn is_true(self) -> Self {
        self.check(ErrorKind::InvalidArgument, |value| *value, |chain| chain.message("must be true."))
    }

    /// Ensures the value is `false`.
    pub fn is_false(self) -> Self {
        self.check(ErrorKind::InvalidArgument, |value| !*value, |chain| chain.message("must be false."))
    }
}

//! Checks grouped by capability.
//!
//! Every check is written once against [`Validator<T>`](crate::Validator) and
//! applies to each value type that has the capability:
//!
//! | Group | Applies to |
//! |---|---|
//! | object checks (inherent) | every value |
//! | [`ComparableChecks`] | `T: PartialOrd` |
//! | [`NumberChecks`] | primitive integers and floats ([`Number`]) |
//! | [`SizeChecks`] | text and containers ([`Sizeable`]) |
//! | [`CollectionChecks`] | sequences and sets ([`Collection`]) |
//! | [`TextChecks`] | owned and shared strings ([`Text`]) |
//! | boolean checks (inherent) | `bool` |
//!
//! Each check supplies a predicate and a message; failure handling is the
//! chain's. New groups follow the same pattern:
//!
//! ```rust,ignore
//! pub trait PortChecks: Sized {
//!     fn is_unprivileged(self) -> Self;
//! }
//!
//! impl PortChecks for Validator<u16> {
//!     fn is_unprivileged(self) -> Self {
//!         self.check(
//!             ErrorKind::InvalidArgument,
//!             |port| *port >= 1024,
//!             |chain| chain.message_with_actual("must be an unprivileged port."),
//!         )
//!     }
//! }
//! ```

mod boolean;
mod collection;
mod comparable;
mod number;
mod object;
mod size;
mod text;

pub use collection::{Collection, CollectionChecks};
pub use comparable::ComparableChecks;
pub use number::{Number, NumberChecks};
pub use crate::foundation::{Equatable, Identity};
pub use size::{SizeChecks, Sizeable};
pub use text::{Text, TextChecks};

use std::any::Any;
use std::fmt::Debug;

use crate::chain::Validator;

/// Renders a list of values as `[a, b, c]` using the chain's converters.
pub(crate) fn render_list<'a, T, V>(chain: &Validator<T>, values: impl IntoIterator<Item = &'a V>) -> String
where
    V: Any + Debug + 'a,
{
    let items: Vec<String> = values.into_iter().map(|value| chain.render(value)).collect();
    format!("[{}]", items.join(", "))
}

mod error_kind;

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

/// Implements `taylor_error::ErrorKind` for a struct, from an `#[error(...)]` attribute.
///
/// ```
/// use taylor_attrs::ErrorKind;
///
/// #[derive(Debug, ErrorKind)]
/// #[error(
///     message = format!("`{}` is not a variable", name),
///     labels = ["used here"],
///     help = "declare it in the variables field",
/// )]
/// pub struct NotAVariable {
///     name: String,
/// }
/// ```
///
/// The attribute takes three tags, each an arbitrary expression:
///
/// - `message` (required): the headline of the report; anything implementing [`ToString`].
/// - `labels`: anything iterable over [`ToString`] values. The first label is attached to the
///   first span of the error, the second label to the second span, and so on. Empty labels
///   highlight their span without text.
/// - `help`: a hint printed below the report.
///
/// Named fields of the struct are in scope (by reference) inside each expression.
#[proc_macro_derive(ErrorKind, attributes(error))]
pub fn derive_error_kind(item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    error_kind::expand(input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

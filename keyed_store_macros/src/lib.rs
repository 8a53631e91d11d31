mod identifiable;

use proc_macro::TokenStream;

// ============================================================================
// #[derive(Identifiable)]
// ============================================================================

/// Derive macro for the `Identifiable` trait.
///
/// Uses the field named `id` by default. Another field can be marked as the
/// identifier with `#[identifiable(id)]`. The field must be `Copy` and
/// convertible into `keyed_store::Id`.
///
/// # Usage
///
/// ```ignore
/// #[derive(Identifiable)]
/// struct User {
///     id: u64,
///     username: String,
/// }
///
/// #[derive(Identifiable)]
/// struct Ticket {
///     #[identifiable(id)]
///     number: u64,
///     title: String,
/// }
/// ```
#[proc_macro_derive(Identifiable, attributes(identifiable))]
pub fn derive_identifiable(input: TokenStream) -> TokenStream {
    identifiable::derive_identifiable(input)
}

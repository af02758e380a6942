use proc_macro::TokenStream;

mod builder;

#[proc_macro_derive(PredicateBuilder, attributes(predicate))]
pub fn predicate_builder(input: TokenStream) -> TokenStream {
    builder::predicate_builder_impl(input)
}

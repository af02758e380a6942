use darling::{FromDeriveInput, FromVariant, ast};
use heck::ToSnakeCase;
use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote};
use syn::{DeriveInput, parse_macro_input};

#[derive(Debug, FromDeriveInput)]
#[darling(supports(enum_unit))]
struct PredicateDeriveInput {
    ident: syn::Ident,
    data: ast::Data<PredicateVariant, ()>,
}

#[derive(Debug, FromVariant)]
#[darling(attributes(predicate))]
struct PredicateVariant {
    ident: syn::Ident,
    #[darling(default)]
    compare: bool,
    #[darling(default)]
    membership: bool,
    #[darling(default)]
    rename: Option<String>,
}

impl PredicateVariant {
    fn method_name(&self) -> syn::Ident {
        match self.rename {
            Some(ref name) => format_ident!("{}", name),
            None => format_ident!("{}", self.ident.to_string().to_snake_case()),
        }
    }
}

pub fn predicate_builder_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let enum_info = match PredicateDeriveInput::from_derive_input(&input) {
        Ok(v) => v,
        Err(e) => return e.write_errors().into(),
    };

    let enum_name = &enum_info.ident;

    let Some(variants) = enum_info.data.take_enum() else {
        return syn::Error::new_spanned(&input.ident, "only enum is supported")
            .to_compile_error()
            .into();
    };

    let mut column_methods = Vec::new();
    let mut aggregate_methods = Vec::new();

    for var in &variants {
        if var.compare && var.membership {
            return syn::Error::new_spanned(
                &var.ident,
                "a variant is either `compare` or `membership`, not both",
            )
            .to_compile_error()
            .into();
        }

        let (column_bound, aggregate_bound) = if var.compare {
            (
                quote!(crate::resolve::ColumnOperand<T>),
                quote!(crate::resolve::AggregateOperand<T>),
            )
        } else if var.membership {
            (
                quote!(crate::resolve::ColumnMembership<T>),
                quote!(crate::resolve::AggregateMembership<T>),
            )
        } else {
            continue;
        };

        let var_name = &var.ident;
        let method = var.method_name();

        column_methods.push(builder_method(
            &method,
            enum_name,
            var_name,
            column_bound,
            quote!(self.query_value()),
        ));
        aggregate_methods.push(builder_method(
            &method,
            enum_name,
            var_name,
            aggregate_bound,
            quote!(self.expression()),
        ));
    }

    quote! {
        impl<M, T> crate::Column<M, T> {
            #(#column_methods)*
        }

        impl<M, T> crate::Aggregate<M, T> {
            #(#aggregate_methods)*
        }
    }
    .into()
}

fn builder_method(
    method: &syn::Ident,
    enum_name: &syn::Ident,
    var_name: &syn::Ident,
    bound: TokenStream2,
    lhs: TokenStream2,
) -> TokenStream2 {
    let doc = format!(
        "Builds `{}` against `rhs`, the shape of `rhs` selects the predicate kind.",
        var_name
    );
    quote! {
        #[doc = #doc]
        pub fn #method<R>(&self, rhs: R) -> R::Output
        where
            R: #bound,
        {
            rhs.resolve(#lhs, #enum_name::#var_name)
        }
    }
}

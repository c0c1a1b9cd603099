use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{
    punctuated::Punctuated,
    spanned::Spanned,
    Data,
    DeriveInput,
    Expr,
    Fields,
    MetaNameValue,
    Token,
};

/// The tags given in the `#[error(...)]` attribute.
#[derive(Default)]
struct Tags {
    message: Option<Expr>,
    labels: Option<Expr>,
    help: Option<Expr>,
}

impl Tags {
    /// Collects the tags from every `error` attribute on the item. A tag given twice keeps the
    /// last value.
    fn from_attrs(input: &DeriveInput) -> syn::Result<Self> {
        let mut tags = Self::default();
        for attr in input.attrs.iter().filter(|attr| attr.path().is_ident("error")) {
            let pairs = attr.parse_args_with(Punctuated::<MetaNameValue, Token![,]>::parse_terminated)?;
            for MetaNameValue { path, value, .. } in pairs {
                let slot = match path.get_ident().map(|ident| ident.to_string()).as_deref() {
                    Some("message") => &mut tags.message,
                    Some("labels") => &mut tags.labels,
                    Some("help") => &mut tags.help,
                    _ => return Err(syn::Error::new(path.span(), "expected `message`, `labels` or `help`")),
                };
                *slot = Some(value);
            }
        }
        Ok(tags)
    }
}

/// Brings the named fields of `self` into scope as references.
fn bind_fields(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let Data::Struct(data) = &input.data else {
        return Err(syn::Error::new(input.ident.span(), "`ErrorKind` can only be derived for structs"));
    };

    let name = &input.ident;
    match &data.fields {
        Fields::Named(named) => {
            let idents = named.named.iter().map(|field| &field.ident);
            Ok(quote! {
                #[allow(unused_variables)]
                let #name { #(#idents),* } = self;
            })
        },
        Fields::Unit => Ok(TokenStream2::new()),
        Fields::Unnamed(unnamed) => Err(syn::Error::new(
            unnamed.span(),
            "`ErrorKind` needs named fields, so that the tags can refer to them",
        )),
    }
}

/// Generates the `ErrorKind` implementation for the given struct.
pub fn expand(input: DeriveInput) -> syn::Result<TokenStream2> {
    let tags = Tags::from_attrs(&input)?;
    let Some(message) = tags.message else {
        return Err(syn::Error::new(
            input.ident.span(),
            "missing `message` tag: add #[error(message = ...)]",
        ));
    };
    let bindings = bind_fields(&input)?;

    let labels = match tags.labels {
        Some(labels) => quote! { #labels },
        None => quote! { std::vec::Vec::<std::string::String>::new() },
    };
    let help = tags.help.map(|help| quote! { report.set_help(#help); });

    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    Ok(quote! {
        impl #impl_generics taylor_error::ErrorKind for #name #ty_generics #where_clause {
            fn as_any(&self) -> &dyn std::any::Any {
                self
            }

            fn message(&self) -> std::string::String {
                #bindings
                std::string::ToString::to_string(&#message)
            }

            fn build_report<'a>(
                &self,
                src_id: &'a str,
                spans: &[std::ops::Range<usize>],
            ) -> ariadne::Report<(&'a str, std::ops::Range<usize>)> {
                #bindings

                let start = spans.first().map_or(0, |span| span.start);
                let mut report = ariadne::Report::build(ariadne::ReportKind::Error, src_id, start)
                    .with_message(taylor_error::ErrorKind::message(self));

                // labels pair up with spans by position
                for (text, span) in std::iter::IntoIterator::into_iter(#labels).zip(spans) {
                    let text = std::string::ToString::to_string(&text);
                    let label = ariadne::Label::new((src_id, span.clone()))
                        .with_color(taylor_error::EXPR);
                    report = report.with_label(if text.is_empty() { label } else { label.with_message(text) });
                }

                #help
                report.finish()
            }
        }
    })
}

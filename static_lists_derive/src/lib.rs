use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{
    Data, DataStruct, DeriveInput, Field, Fields, Ident, LitStr, Token, Type,
    parse::{Parse, ParseStream},
    parse_macro_input,
};

struct IntrusiveAttribute {
    crate_path: syn::Path,
}

/// Parses the attribute in the format: `crate_path = "path::to::crate"`.
impl Parse for IntrusiveAttribute {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let key: Ident = input.parse()?;
        if key != "crate_path" {
            return Err(syn::Error::new(key.span(), "expected attribute `crate_path`"));
        }

        let _: Token![=] = input.parse()?;
        let value: LitStr = input.parse()?;
        let path: syn::Path = value.parse()?;

        Ok(IntrusiveAttribute { crate_path: path })
    }
}

struct LinksAttribute {
    adapter: Ident,
    value: Option<Type>,
}

/// Parses the attribute in the format: `adapter = Name, value = Type`, where
/// `value` is optional.
impl Parse for LinksAttribute {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut adapter = None;
        let mut value = None;

        while !input.is_empty() {
            let key: Ident = input.parse()?;
            let _: Token![=] = input.parse()?;
            if key == "adapter" {
                if adapter.is_some() {
                    return Err(syn::Error::new(key.span(), "duplicate `adapter`"));
                }
                adapter = Some(input.parse::<Ident>()?);
            } else if key == "value" {
                if value.is_some() {
                    return Err(syn::Error::new(key.span(), "duplicate `value`"));
                }
                value = Some(input.parse::<Type>()?);
            } else {
                return Err(syn::Error::new(
                    key.span(),
                    "expected `adapter` or `value`",
                ));
            }

            if input.is_empty() {
                break;
            }
            let _: Token![,] = input.parse()?;
        }

        match adapter {
            Some(adapter) => Ok(LinksAttribute { adapter, value }),
            None => Err(input.error("missing `adapter = Name`")),
        }
    }
}

/// Derive macro generating list adapters for the links fields of a struct.
///
/// Every field tagged `#[links(adapter = Name)]` gets an adapter type `Name`
/// with the visibility of the struct. For a generic struct the adapter takes
/// the same generic parameters.
#[proc_macro_derive(Intrusive, attributes(links, intrusive))]
pub fn intrusive_derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand(&input) {
        Ok(expanded) => TokenStream::from(expanded),
        Err(e) => e.to_compile_error().into(),
    }
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    // Find absolute crate path
    let mut crate_path = quote! { ::static_lists };

    for attr in &input.attrs {
        if attr.path().is_ident("intrusive") {
            let path = attr.parse_args::<IntrusiveAttribute>()?.crate_path;
            crate_path = quote! { #path };
            break;
        }
    }

    let fields = match &input.data {
        Data::Struct(DataStruct {
            fields: Fields::Named(fields),
            ..
        }) => &fields.named,
        _ => {
            return Err(syn::Error::new_spanned(
                input,
                "Intrusive derive macro only supports structs with named fields",
            ));
        }
    };

    let mut adapters = Vec::new();
    for field in fields {
        for attr in &field.attrs {
            if attr.path().is_ident("links") {
                let links = attr.parse_args::<LinksAttribute>()?;
                adapters.push(adapter(input, &crate_path, field, links));
            }
        }
    }

    if adapters.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "Struct must have a field tagged `#[links(adapter = Name)]`",
        ));
    }

    Ok(quote! { #(#adapters)* })
}

fn adapter(
    input: &DeriveInput,
    crate_path: &TokenStream2,
    field: &Field,
    links: LinksAttribute,
) -> TokenStream2 {
    let vis = &input.vis;
    let owner = &input.ident;
    let generics = &input.generics;
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let adapter = &links.adapter;
    let field_name = &field.ident;
    let links_type = &field.ty;
    let owner_type = quote! { #owner #ty_generics };
    let value_type = match &links.value {
        Some(value) => quote! { #value },
        None => owner_type.clone(),
    };

    let layout_check = quote! {
        ::core::assert!(
            #crate_path::linked_list::intrusive::traits::same_layout::<#owner_type, #value_type>(),
            "adapter value type must have the owner's size and alignment",
        )
    };

    // A generic owner is only checked once the adapter is used.
    let declaration = if generics.params.is_empty() {
        quote! {
            #vis struct #adapter;

            const _: () = #layout_check;
        }
    } else {
        quote! {
            #vis struct #adapter #generics (
                ::core::marker::PhantomData<fn() -> #owner_type>
            ) #where_clause;
        }
    };

    quote! {
        #declaration

        unsafe impl #impl_generics #crate_path::linked_list::intrusive::traits::Adapter
            for #adapter #ty_generics #where_clause
        {
            type Owner = #owner_type;
            type Links = #links_type;
            type Value = #value_type;

            const OFFSET: usize = {
                #layout_check;
                ::core::mem::offset_of!(#owner_type, #field_name)
            };
        }
    }
}

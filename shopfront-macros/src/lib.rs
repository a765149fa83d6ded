use proc_macro::TokenStream;
use quote::quote;
use syn::{
    parse_macro_input, Data, DeriveInput, ImplItem, ImplItemFn, ItemImpl, Stmt,
    Type, Variant, Visibility,
};

/// Turns an enum into a shopfront FFI error.
///
/// The macro:
/// 1. Adds `#[derive(Debug, thiserror::Error, uniffi::Error)]` and `#[uniffi(flat_error)]`
/// 2. Appends a `Generic { message: String }` variant unless the enum already has one
/// 3. Implements `From<anyhow::Error>`, flattening the error chain into `message`
/// 4. Adds `from_anyhow_result` / `from_anyhow_result_with_prefix` helpers
///
/// Only usable inside the `shopfront` crate: the generated code calls
/// `crate::shopfront_error::AnyhowErrorExt`.
///
/// # Usage
///
/// ```rust,ignore
/// #[shopfront_error]
/// pub enum FeedError {
///     #[error("request failed: {0}")]
///     Http(#[from] HttpError),
/// }
/// ```
#[proc_macro_attribute]
pub fn shopfront_error(_args: TokenStream, input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let Data::Enum(data_enum) = &input.data else {
        return syn::Error::new_spanned(
            &input,
            "shopfront_error can only be applied to enums",
        )
        .to_compile_error()
        .into();
    };

    let enum_name = &input.ident;
    let visibility = &input.vis;
    let generics = &input.generics;

    // The macro owns the derives and the uniffi attribute.
    let attrs: Vec<_> = input
        .attrs
        .iter()
        .filter(|attr| !attr.path().is_ident("derive") && !attr.path().is_ident("uniffi"))
        .collect();

    let mut variants = data_enum.variants.clone();
    if !has_generic_variant(variants.iter()) {
        let generic_variant: Variant = syn::parse_quote! {
            /// Any other failure, carrying the flattened `anyhow` error chain.
            #[error("Generic error: {message}")]
            Generic {
                /// The flattened error chain.
                message: String
            }
        };
        variants.push(generic_variant);
    }

    quote! {
        #[derive(Debug, thiserror::Error, uniffi::Error)]
        #[uniffi(flat_error)]
        #(#attrs)*
        #visibility enum #enum_name #generics {
            #variants
        }

        impl #generics From<anyhow::Error> for #enum_name #generics {
            fn from(err: anyhow::Error) -> Self {
                Self::Generic {
                    message: crate::shopfront_error::AnyhowErrorExt::to_generic_message(err),
                }
            }
        }

        impl #generics #enum_name #generics {
            /// Converts an `anyhow::Result` into a result carrying this error type.
            pub fn from_anyhow_result<T>(result: anyhow::Result<T>) -> Result<T, Self> {
                result.map_err(Self::from)
            }

            /// Same as `from_anyhow_result`, prefixing the flattened message.
            pub fn from_anyhow_result_with_prefix<T>(
                result: anyhow::Result<T>,
                prefix: &str,
            ) -> Result<T, Self> {
                result.map_err(|err| Self::Generic {
                    message: crate::shopfront_error::AnyhowErrorExt::to_generic_message_with_prefix(
                        err, prefix,
                    ),
                })
            }
        }
    }
    .into()
}

/// Wraps `uniffi::export` and scopes a logging context around every public method.
///
/// For each synchronous `pub fn` in the impl block a
/// `let _shopfront_log_ctx = crate::primitives::logger::LogContext::new("TypeName");`
/// statement is inserted first, so `crate::info!` and friends are prefixed with
/// `[TypeName]`. Async methods get no context. If any public method is `async`, `async_runtime = "tokio"` is added
/// to the export arguments.
///
/// # Usage
///
/// ```rust,ignore
/// #[shopfront_export]
/// impl ProfileEditor {
///     pub fn open(&self) -> Result<EditableProfile, ProfileEditError> {
///         crate::info!("profile_editor.open");  // logged as "[ProfileEditor] profile_editor.open"
///         // ...
///     }
/// }
/// ```
#[proc_macro_attribute]
pub fn shopfront_export(args: TokenStream, input: TokenStream) -> TokenStream {
    let input_impl = parse_macro_input!(input as ItemImpl);

    let type_name = type_name_of(&input_impl.self_ty);
    let has_async_functions = has_async_functions_in_impl(&input_impl.items);

    let items = input_impl
        .items
        .iter()
        .map(|item| match item {
            ImplItem::Fn(method) if matches!(method.vis, Visibility::Public(_)) => {
                let mut method = method.clone();
                inject_logging_context(&mut method, &type_name);
                ImplItem::Fn(method)
            }
            other => other.clone(),
        })
        .collect();

    let new_impl = ItemImpl {
        items,
        ..input_impl
    };

    let args = export_args(proc_macro2::TokenStream::from(args), has_async_functions);

    quote! {
        #[uniffi::export(#args)]
        #new_impl
    }
    .into()
}

fn has_generic_variant<'a>(mut variants: impl Iterator<Item = &'a Variant>) -> bool {
    variants.any(|variant| variant.ident == "Generic")
}

/// Last path segment of the impl's self type, used as the log prefix.
fn type_name_of(self_ty: &Type) -> String {
    match self_ty {
        Type::Path(type_path) => type_path
            .path
            .segments
            .last()
            .map_or_else(|| "Unknown".to_string(), |segment| segment.ident.to_string()),
        _ => "Unknown".to_string(),
    }
}

/// Whether any *public* method of the impl block is async.
fn has_async_functions_in_impl(impl_items: &[ImplItem]) -> bool {
    impl_items.iter().any(|item| {
        matches!(
            item,
            ImplItem::Fn(method)
                if matches!(method.vis, Visibility::Public(_))
                    && method.sig.asyncness.is_some()
        )
    })
}

fn export_args(
    args: proc_macro2::TokenStream,
    has_async_functions: bool,
) -> proc_macro2::TokenStream {
    match (has_async_functions, args.is_empty()) {
        (false, _) => args,
        (true, true) => quote! { async_runtime = "tokio" },
        (true, false) => quote! { #args, async_runtime = "tokio" },
    }
}

/// Async methods are skipped: the thread-local guard would be held across `.await` and
/// dropped on another worker thread.
fn inject_logging_context(method: &mut ImplItemFn, type_name: &str) {
    if method.sig.asyncness.is_some() {
        return;
    }
    let context_stmt: Stmt = syn::parse_quote! {
        let _shopfront_log_ctx = crate::primitives::logger::LogContext::new(#type_name);
    };
    method.block.stmts.insert(0, context_stmt);
}

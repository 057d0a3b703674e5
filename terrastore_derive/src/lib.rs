//! Procedural macros shared by the terrastore crates.
//!
//! The only macro is [`macro@context`], which attaches a formatted message to every
//! error leaving a function that returns `anyhow::Result`.
//!
//! ```ignore
//! #[context("writing tile {:?} into '{}'", coord, self.path.display())]
//! fn write_tile(&self, coord: &TileCoord, blob: &Blob) -> Result<WriteOutcome> {
//! 	// ...
//! }
//! ```

mod args;

use crate::args::ContextArgs;
use proc_macro::TokenStream;
use proc_macro2::{Ident, Span, TokenStream as TokenStream2};
use quote::{ToTokens, quote};
use syn::{ItemFn, parse_macro_input};

/// Wraps the function body so that an `Err` is returned as `err.context(format!(...))`.
///
/// Only synchronous functions are supported.
#[proc_macro_attribute]
pub fn context(args: TokenStream, input: TokenStream) -> TokenStream {
	let args = parse_macro_input!(args as ContextArgs);
	let mut function = parse_macro_input!(input as ItemFn);

	if let Some(asyncness) = &function.sig.asyncness {
		return syn::Error::new_spanned(asyncness, "#[context] does not support async functions")
			.to_compile_error()
			.into();
	}

	let body = wrap_sync(&function, &args);
	function.block.stmts = vec![syn::Stmt::Expr(syn::Expr::Verbatim(body), None)];
	function.into_token_stream().into()
}

fn wrap_sync(function: &ItemFn, args: &ContextArgs) -> TokenStream2 {
	let ContextArgs { format_args } = args;
	let body = &function.block;
	let return_type = &function.sig.output;
	let err = Ident::new("err", Span::mixed_site());
	let once = Ident::new("once", Span::mixed_site());
	quote! {
		// Capturing a non-Copy value forces the closure to be FnOnce.
		let #once = ::core::iter::empty::<()>();
		(|| #return_type {
			::core::mem::drop(#once);
			#body
		})().map_err(|#err| #err.context(format!(#format_args)).into())
	}
}

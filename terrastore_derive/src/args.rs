use proc_macro2::TokenStream as TokenStream2;
use syn::parse::{self, Parse, ParseStream};

/// Arguments of `#[context(...)]`: the `format!` arguments of the message.
#[derive(Debug)]
pub struct ContextArgs {
	pub format_args: TokenStream2,
}

impl Parse for ContextArgs {
	fn parse(input: ParseStream<'_>) -> parse::Result<Self> {
		if input.is_empty() {
			return Err(input.error("#[context] requires a message"));
		}
		Ok(Self {
			format_args: input.parse()?,
		})
	}
}

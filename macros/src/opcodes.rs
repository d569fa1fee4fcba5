use proc_macro::TokenStream;
use proc_macro2::{Span, TokenStream as TokenStream2};
use quote::quote;
use syn::{Fields, Ident, ItemEnum};

pub fn opcodes(attr: TokenStream, item: TokenStream) -> TokenStream {
    // capture handler trait ident and enum body
    let tr: Ident = syn::parse2(TokenStream2::from(attr))
        .expect("A handler trait must be specified: \"#[opcodes(Trait)]\"");
    let item = TokenStream2::from(item);

    // parse enum body
    let e: ItemEnum = syn::parse2(item).expect("Opcode table must be an enum.");

    assert!(
        !e.variants.is_empty(),
        "Opcode table must contain at least one opcode."
    );

    assert!(
        e.generics.params.is_empty(),
        "Opcode tables cannot be generic."
    );

    let is_repr_u8 = e.attrs.iter().any(|attr| {
        attr.path().is_ident("repr")
            && attr
                .parse_args::<Ident>()
                .map(|repr| repr == "u8")
                .unwrap_or(false)
    });

    assert!(is_repr_u8, "Opcode table must be \"#[repr(u8)]\".");

    // validate variants are unit variants with explicit opcodes
    for variant in &e.variants {
        if !matches!(variant.fields, Fields::Unit) {
            panic!("Opcodes cannot hold data.")
        }

        if variant.discriminant.is_none() {
            panic!(
                "Opcode \"{}\" must declare its byte: \"{} = 0x01\".",
                variant.ident, variant.ident
            )
        }
    }

    let vis = e.vis.clone();
    let ident = e.ident.clone();
    let count = e.variants.len();
    let variant_idents: Vec<Ident> = e.variants.iter().map(|v| v.ident.clone()).collect();

    // handler method for each opcode
    let handlers: Vec<Ident> = variant_idents
        .iter()
        .map(|i| {
            Ident::new(
                &inflector::cases::snakecase::to_snake_case(&i.to_string()),
                Span::call_site(),
            )
        })
        .collect();

    let zero_messages: Vec<String> = variant_idents
        .iter()
        .map(|i| format!("Opcode \"{i}\" is zero, which is reserved as the table terminator."))
        .collect();

    quote! {
        #e

        // zero terminates the table on the wire
        const _: () = {
            #(
                assert!(#ident::#variant_idents as u8 != 0, #zero_messages);
            )*
        };

        impl #ident {
            /// Every opcode, in declaration order.
            #vis const ALL: [Self; #count] = [#(Self::#variant_idents),*];

            /// Invoke the handler method of this opcode.
            ///
            /// Returns the number of bytes the handler wrote to `reply`.
            #[inline]
            #vis fn route<H: #tr + ?Sized>(
                self,
                handler: &mut H,
                payload: &[u8],
                reply: &mut [u8],
            ) -> usize {
                match self {
                    #(
                        Self::#variant_idents => handler.#handlers(payload, reply)
                    ),*
                }
            }
        }

        impl From<#ident> for u8 {
            #[inline]
            fn from(value: #ident) -> Self {
                value as u8
            }
        }

        impl TryFrom<u8> for #ident {
            type Error = u8;

            // first match wins
            fn try_from(value: u8) -> Result<Self, Self::Error> {
                #(
                    if value == #ident::#variant_idents as u8 {
                        return Ok(#ident::#variant_idents);
                    }
                )*

                Err(value)
            }
        }
    }
    .into()
}

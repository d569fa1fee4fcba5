use proc_macro::TokenStream;

mod opcodes;

/// Transform attached enum into an opcode table.
///
/// *What is an opcode table?*
///
/// An opcode table maps single-byte opcodes to handler methods of a common trait.
/// The enum must be `#[repr(u8)]` and every variant must be a unit variant with an
/// explicit, nonzero discriminant. Each variant `FooBar` routes to the trait method
/// `foo_bar(&mut self, payload: &[u8], reply: &mut [u8]) -> usize`, so a missing
/// handler is a compile-time error.
///
/// Generated items:
///
/// - `ALL`, every opcode in declaration order
/// - `route`, which invokes the matching handler method
/// - `From<Enum> for u8` and `TryFrom<u8> for Enum` (the error is the rejected byte)
///
/// Duplicate opcodes are rejected by the compiler as duplicate discriminants,
/// a zero opcode is rejected by a generated const assertion.
#[proc_macro_attribute]
pub fn opcodes(attr: TokenStream, item: TokenStream) -> TokenStream {
    opcodes::opcodes(attr, item)
}

//! Proc-macros implementing thicket's `CHECK`/`REQUIRE`/`FAIL`/`SUCCEED`/
//! `SECTION` surface.
//!
//! `CHECK!`/`REQUIRE!` are function-like (not attribute) macros because they
//! need to parse and decompose an arbitrary expression, not annotate an
//! item. Each expands to a block expression yielding a `CheckHandle`; the
//! handle's `Drop` impl, not this crate, is what actually publishes the
//! check.

mod crate_path;

use proc_macro::TokenStream;
use proc_macro2::{Span, TokenStream as TokenStream2};
use quote::quote;
use syn::parse::{Parse, ParseStream};
use syn::punctuated::Punctuated;
use syn::token::Comma;
use syn::{BinOp, Block, Expr, ExprBinary, Ident, parse_macro_input};

fn expr_text(expr: &Expr) -> String {
    quote!(#expr).to_string()
}

fn comparison_variant(op: &BinOp) -> Option<&'static str> {
    match op {
        BinOp::Eq(_) => Some("Eq"),
        BinOp::Ne(_) => Some("Ne"),
        BinOp::Lt(_) => Some("Lt"),
        BinOp::Le(_) => Some("Le"),
        BinOp::Gt(_) => Some("Gt"),
        BinOp::Ge(_) => Some("Ge"),
        _ => None,
    }
}

/// Expands `CHECK!`/`REQUIRE!`'s shared decomposition logic.
///
/// A top-level binary comparison is decomposed into `Capture::Binary`,
/// evaluating each operand exactly once by reference so non-`Copy` operands
/// (a `String`, say) aren't moved out from under the later debug-format
/// call. Everything else — including chained comparisons and `&&`/`||`
/// expressions, which Rust's grammar already requires to be `bool` — falls
/// back to `Capture::Unary`.
fn expand_check(kind_variant: &str, expr: Expr) -> TokenStream2 {
    let check_path = crate_path::thicket_check_path();
    let kind_ident = Ident::new(kind_variant, Span::call_site());
    let text = expr_text(&expr);

    if let Expr::Binary(ExprBinary { left, op, right, .. }) = &expr {
        if let Some(variant) = comparison_variant(op) {
            let variant = Ident::new(variant, Span::call_site());
            return quote! {
                {
                    let __thicket_lhs = &(#left);
                    let __thicket_rhs = &(#right);
                    let __thicket_passed = __thicket_lhs #op __thicket_rhs;
                    let __thicket_capture = #check_path::Capture::Binary {
                        lhs_debug: ::std::format!("{:?}", __thicket_lhs),
                        rhs_debug: ::std::format!("{:?}", __thicket_rhs),
                        op: #check_path::Comparison::#variant,
                        passed: __thicket_passed,
                    };
                    #check_path::CheckHandle::new(
                        #check_path::CheckKind::#kind_ident,
                        __thicket_capture,
                        #text,
                        #check_path::Location { file: file!(), line: line!() },
                    )
                }
            };
        }
    }

    quote! {
        {
            let __thicket_value: bool = #expr;
            let __thicket_capture = #check_path::Capture::Unary {
                value_debug: ::std::format!("{:?}", __thicket_value),
                passed: __thicket_value,
            };
            #check_path::CheckHandle::new(
                #check_path::CheckKind::#kind_ident,
                __thicket_capture,
                #text,
                #check_path::Location { file: file!(), line: line!() },
            )
        }
    }
}

/// `CHECK!(expr)` — a soft assertion. On failure the check is recorded and
/// the test run continues. Returns a chainable check handle; remember the
/// trailing `;` so the handle is dropped (and therefore published) at the
/// end of the statement.
#[allow(non_snake_case, reason = "mirrors this crate's CHECK/REQUIRE naming surface rather than Rust fn conventions")]
#[proc_macro]
pub fn CHECK(input: TokenStream) -> TokenStream {
    let expr = parse_macro_input!(input as Expr);
    expand_check("Check", expr).into()
}

/// `REQUIRE!(expr)` — a hard assertion. On failure the check is recorded and
/// publishing it unwinds the current run.
#[allow(non_snake_case, reason = "mirrors this crate's CHECK/REQUIRE naming surface rather than Rust fn conventions")]
#[proc_macro]
pub fn REQUIRE(input: TokenStream) -> TokenStream {
    let expr = parse_macro_input!(input as Expr);
    expand_check("Require", expr).into()
}

fn optional_message(input: TokenStream) -> syn::Result<TokenStream2> {
    if input.is_empty() {
        Ok(quote!(None))
    } else {
        let expr: Expr = syn::parse(input)?;
        Ok(quote!(Some(::std::format!("{}", #expr))))
    }
}

/// `FAIL(msg)` or `FAIL()` — an unconditional hard failure.
#[allow(non_snake_case, reason = "mirrors this crate's CHECK/REQUIRE naming surface rather than Rust fn conventions")]
#[proc_macro]
pub fn FAIL(input: TokenStream) -> TokenStream {
    let check_path = crate_path::thicket_check_path();
    let message = match optional_message(input) {
        Ok(tokens) => tokens,
        Err(err) => return err.to_compile_error().into(),
    };
    quote! {
        #check_path::CheckHandle::fail(#message, #check_path::Location { file: file!(), line: line!() })
    }
    .into()
}

/// `SUCCEED(msg)` or `SUCCEED()` — an unconditional pass.
#[allow(non_snake_case, reason = "mirrors this crate's CHECK/REQUIRE naming surface rather than Rust fn conventions")]
#[proc_macro]
pub fn SUCCEED(input: TokenStream) -> TokenStream {
    let check_path = crate_path::thicket_check_path();
    let message = match optional_message(input) {
        Ok(tokens) => tokens,
        Err(err) => return err.to_compile_error().into(),
    };
    quote! {
        #check_path::CheckHandle::succeed(#message, #check_path::Location { file: file!(), line: line!() })
    }
    .into()
}

struct SectionInput {
    format_args: Punctuated<Expr, Comma>,
    body: Block,
}

impl Parse for SectionInput {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut format_args = Punctuated::new();
        loop {
            if input.peek(syn::token::Brace) {
                let body: Block = input.parse()?;
                return Ok(SectionInput { format_args, body });
            }
            let expr: Expr = input.parse()?;
            format_args.push_value(expr);
            if input.peek(Comma) {
                let comma: Comma = input.parse()?;
                format_args.push_punct(comma);
            }
        }
    }
}

/// `SECTION!(fmt, args..., { body })` — a dynamically named section.
///
/// The format template is evaluated once per entry so looped sections can
/// give each iteration a distinct name. The body runs only when the section
/// tree reports this run should enter it; either way the opener's `Drop`
/// updates the parent's traversal bookkeeping before the macro's block ends.
#[allow(non_snake_case, reason = "mirrors this crate's CHECK/REQUIRE naming surface rather than Rust fn conventions")]
#[proc_macro]
pub fn SECTION(input: TokenStream) -> TokenStream {
    let SectionInput { format_args, body } = parse_macro_input!(input as SectionInput);
    let check_path = crate_path::thicket_check_path();
    let section_path = crate_path::thicket_section_path();
    let args = format_args.iter();
    quote! {
        {
            let __thicket_opener = #section_path::enter_section(
                ::std::format!(#(#args),*),
                #check_path::Location { file: file!(), line: line!() },
            );
            if __thicket_opener.entered() {
                #body
            }
        }
    }
    .into()
}

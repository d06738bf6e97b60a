//! Expression Rendering
//!
//! Structural pretty-printer for argument expressions. Output is rebuilt from the
//! syntax tree rather than copied from the source bytes, so spacing is normalized:
//! `a+b` and `a  +  b` both render as `a + b`. Nodes without a structural rule
//! (closures, blocks, struct literals, ...) keep their token text instead.

use crate::error::RenderError;
use quote::ToTokens;
use syn::punctuated::Punctuated;
use syn::{
    Expr, GenericArgument, Macro, MacroDelimiter, Member, Path, PathArguments, RangeLimits,
    ReturnType, Token, Type,
};

/// Render an expression back to source text.
pub fn render_expr(expr: &Expr) -> Result<String, RenderError> {
    let text = match expr {
        Expr::Lit(lit) => tokens(&lit.lit),
        Expr::Path(path) => {
            if path.qself.is_some() {
                tokens(path)
            } else {
                render_path(&path.path)?
            }
        }
        Expr::Binary(bin) => format!(
            "{} {} {}",
            render_expr(&bin.left)?,
            tokens(&bin.op),
            render_expr(&bin.right)?
        ),
        Expr::Unary(unary) => format!("{}{}", tokens(&unary.op), render_expr(&unary.expr)?),
        Expr::Reference(reference) => {
            let mutability = if reference.mutability.is_some() { "mut " } else { "" };
            format!("&{}{}", mutability, render_expr(&reference.expr)?)
        }
        Expr::Call(call) => format!("{}({})", render_expr(&call.func)?, render_list(&call.args)?),
        Expr::MethodCall(call) => {
            let turbofish = match &call.turbofish {
                Some(generics) => format!("::<{}>", render_generic_args(&generics.args)?),
                None => String::new(),
            };
            format!(
                "{}.{}{}({})",
                render_expr(&call.receiver)?,
                call.method,
                turbofish,
                render_list(&call.args)?
            )
        }
        Expr::Index(index) => format!("{}[{}]", render_expr(&index.expr)?, render_expr(&index.index)?),
        Expr::Field(field) => format!("{}.{}", render_expr(&field.base)?, render_member(&field.member)),
        Expr::Paren(paren) => format!("({})", render_expr(&paren.expr)?),
        Expr::Group(group) => render_expr(&group.expr)?,
        Expr::Range(range) => {
            let start = match &range.start {
                Some(start) => render_expr(start)?,
                None => String::new(),
            };
            let end = match &range.end {
                Some(end) => render_expr(end)?,
                None => String::new(),
            };
            let limits = match range.limits {
                RangeLimits::HalfOpen(_) => "..",
                RangeLimits::Closed(_) => "..=",
            };
            format!("{}{}{}", start, limits, end)
        }
        Expr::Cast(cast) => format!("{} as {}", render_expr(&cast.expr)?, render_type(&cast.ty)?),
        Expr::Try(try_expr) => format!("{}?", render_expr(&try_expr.expr)?),
        Expr::Macro(mac) => render_macro(&mac.mac)?,
        Expr::Tuple(tuple) => {
            if tuple.elems.len() == 1 {
                format!("({},)", render_list(&tuple.elems)?)
            } else {
                format!("({})", render_list(&tuple.elems)?)
            }
        }
        Expr::Array(array) => format!("[{}]", render_list(&array.elems)?),
        Expr::Verbatim(_) => return Err(RenderError::Unsupported("verbatim tokens")),
        other => tokens(other),
    };
    Ok(text)
}

/// Render a path such as `std::mem::take` or `Vec::<u8>::new`.
pub fn render_path(path: &Path) -> Result<String, RenderError> {
    let mut out = String::new();
    if path.leading_colon.is_some() {
        out.push_str("::");
    }
    for (i, segment) in path.segments.iter().enumerate() {
        if i > 0 {
            out.push_str("::");
        }
        out.push_str(&segment.ident.to_string());
        match &segment.arguments {
            PathArguments::None => {}
            PathArguments::AngleBracketed(args) => {
                if args.colon2_token.is_some() {
                    out.push_str("::");
                }
                out.push('<');
                out.push_str(&render_generic_args(&args.args)?);
                out.push('>');
            }
            PathArguments::Parenthesized(args) => {
                let inputs = args
                    .inputs
                    .iter()
                    .map(render_type)
                    .collect::<Result<Vec<_>, _>>()?;
                out.push_str(&format!("({})", inputs.join(", ")));
                if let ReturnType::Type(_, ty) = &args.output {
                    out.push_str(" -> ");
                    out.push_str(&render_type(ty)?);
                }
            }
        }
    }
    Ok(out)
}

/// Render a type as written in casts and turbofish arguments.
pub fn render_type(ty: &Type) -> Result<String, RenderError> {
    let text = match ty {
        Type::Path(path) => {
            if path.qself.is_some() {
                tokens(path)
            } else {
                render_path(&path.path)?
            }
        }
        Type::Reference(reference) => {
            let mut out = String::from("&");
            if let Some(lifetime) = &reference.lifetime {
                out.push_str(&format!("{} ", lifetime));
            }
            if reference.mutability.is_some() {
                out.push_str("mut ");
            }
            out.push_str(&render_type(&reference.elem)?);
            out
        }
        Type::Ptr(ptr) => {
            let kind = if ptr.mutability.is_some() { "mut" } else { "const" };
            format!("*{} {}", kind, render_type(&ptr.elem)?)
        }
        Type::Slice(slice) => format!("[{}]", render_type(&slice.elem)?),
        Type::Array(array) => format!("[{}; {}]", render_type(&array.elem)?, render_expr(&array.len)?),
        Type::Tuple(tuple) => {
            let elems = tuple
                .elems
                .iter()
                .map(render_type)
                .collect::<Result<Vec<_>, _>>()?;
            if elems.len() == 1 {
                format!("({},)", elems[0])
            } else {
                format!("({})", elems.join(", "))
            }
        }
        Type::Paren(paren) => format!("({})", render_type(&paren.elem)?),
        Type::Group(group) => render_type(&group.elem)?,
        Type::Infer(_) => "_".to_string(),
        Type::Never(_) => "!".to_string(),
        Type::Verbatim(_) => return Err(RenderError::Unsupported("verbatim type")),
        other => tokens(other),
    };
    Ok(text)
}

fn render_generic_args(args: &Punctuated<GenericArgument, Token![,]>) -> Result<String, RenderError> {
    let rendered = args
        .iter()
        .map(|arg| match arg {
            GenericArgument::Lifetime(lifetime) => Ok(lifetime.to_string()),
            GenericArgument::Type(ty) => render_type(ty),
            GenericArgument::Const(expr) => render_expr(expr),
            GenericArgument::AssocType(assoc) if assoc.generics.is_none() => {
                Ok(format!("{} = {}", assoc.ident, render_type(&assoc.ty)?))
            }
            other => Ok(tokens(other)),
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rendered.join(", "))
}

fn render_macro(mac: &Macro) -> Result<String, RenderError> {
    let (open, close) = match mac.delimiter {
        MacroDelimiter::Paren(_) => ("(", ")"),
        MacroDelimiter::Bracket(_) => ("[", "]"),
        MacroDelimiter::Brace(_) => ("{", "}"),
    };
    // Most macro bodies are plain argument lists; anything else keeps its token text.
    let body = match mac.parse_body_with(Punctuated::<Expr, Token![,]>::parse_terminated) {
        Ok(args) => render_list(&args)?,
        Err(_) => mac.tokens.to_string(),
    };
    Ok(format!("{}!{}{}{}", render_path(&mac.path)?, open, body, close))
}

fn render_list(exprs: &Punctuated<Expr, Token![,]>) -> Result<String, RenderError> {
    let rendered = exprs.iter().map(render_expr).collect::<Result<Vec<_>, _>>()?;
    Ok(rendered.join(", "))
}

fn render_member(member: &Member) -> String {
    match member {
        Member::Named(ident) => ident.to_string(),
        Member::Unnamed(index) => index.index.to_string(),
    }
}

fn tokens<T: ToTokens>(node: &T) -> String {
    node.to_token_stream().to_string()
}

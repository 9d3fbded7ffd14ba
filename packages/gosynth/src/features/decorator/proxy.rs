//! Proxy rendering
//!
//! A proxy is the original unexported struct name re-declared with a single
//! `delegate` field typed as the original package's interface. Every
//! interface method forwards to the delegate; constructors wrap the
//! original constructor's result.

use std::collections::BTreeSet;

use crate::errors::Result;
use crate::features::emit::CodeWriter;
use crate::features::naming::{convert_to_unexported, parameter_names};
use crate::features::parsing::domain::Signature;
use crate::shared::constants::go::DELEGATE_FIELD;
use crate::shared::NameScope;

/// Method forwarded by a proxy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyMethod {
    pub name: String,
    /// Receiver name of the struct's own method, when it had a usable one
    pub receiver: Option<String>,
    /// Unqualified signature
    pub signature: Signature,
}

/// Exported constructor returning the interface
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyConstructor {
    pub name: String,
    pub signature: Signature,
}

impl ProxyConstructor {
    /// Second result is `error`
    pub fn returns_error(&self) -> bool {
        self.signature.results.len() == 2
    }
}

/// One interface/struct pairing to decorate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyPlan {
    pub interface: String,
    pub structure: String,
    pub methods: Vec<ProxyMethod>,
    pub constructors: Vec<ProxyConstructor>,
}

impl ProxyPlan {
    /// Package qualifiers the rendered proxy refers to, besides `alias`
    pub fn collect_qualifiers(&self, out: &mut BTreeSet<String>) {
        for method in &self.methods {
            method.signature.collect_qualifiers(out);
        }
        for ctor in &self.constructors {
            ctor.signature.collect_qualifiers(out);
        }
    }

    /// Render struct, constructors and methods, qualifying local types with `alias`
    pub fn render(&self, alias: &str, w: &mut CodeWriter) -> Result<()> {
        let interface_type = format!("{}.{}", alias, self.interface);
        render_proxy_struct(w, &self.structure, &interface_type);
        for ctor in &self.constructors {
            w.blank();
            render_constructor(w, ctor, &self.structure, alias)?;
        }
        for method in &self.methods {
            w.blank();
            render_method(w, &self.structure, method, alias)?;
        }
        Ok(())
    }
}

pub fn render_proxy_struct(w: &mut CodeWriter, name: &str, interface_type: &str) {
    w.open(format!("type {} struct {{", name))
        .line(format!("{} {}", DELEGATE_FIELD, interface_type))
        .close("}");
}

/// `func (r *s) M(args) R { return r.delegate.M(args) }`
pub fn render_method(
    w: &mut CodeWriter,
    structure: &str,
    method: &ProxyMethod,
    alias: &str,
) -> Result<()> {
    let signature = method.signature.qualify(alias);
    let mut scope = NameScope::new();
    reserve_result_names(&signature, &mut scope);
    let names = parameter_names(&signature, &mut scope)?;

    let receiver = match method.receiver.as_deref() {
        Some(name) if !scope.contains(name) => {
            scope.reserve(name);
            name.to_string()
        }
        _ => {
            let initial: String = structure.chars().take(1).collect();
            scope.fresh(&convert_to_unexported(&initial)?)
        }
    };

    w.open(format!(
        "func ({} *{}) {}{}{} {{",
        receiver,
        structure,
        method.name,
        signature.render_params(&names),
        signature.render_results()
    ));
    let call = format!(
        "{}.{}.{}({})",
        receiver,
        DELEGATE_FIELD,
        method.name,
        signature.forward_args(&names)
    );
    if signature.results.is_empty() {
        w.line(call);
    } else {
        w.line(format!("return {}", call));
    }
    w.close("}");
    Ok(())
}

/// Constructor calling the original and wrapping its result
pub fn render_constructor(
    w: &mut CodeWriter,
    ctor: &ProxyConstructor,
    structure: &str,
    alias: &str,
) -> Result<()> {
    let signature = ctor.signature.qualify(alias);
    let mut scope = NameScope::new();
    reserve_result_names(&signature, &mut scope);
    let names = parameter_names(&signature, &mut scope)?;
    let delegate = scope.fresh(DELEGATE_FIELD);

    w.open(format!(
        "func {}{}{} {{",
        ctor.name,
        signature.render_params(&names),
        signature.render_result_types()
    ));
    let call = format!(
        "{}.{}({})",
        alias,
        ctor.name,
        signature.forward_args(&names)
    );
    let wrapped = format!("&{}{{{}: {}}}", structure, DELEGATE_FIELD, delegate);
    if ctor.returns_error() {
        let err = scope.fresh("err");
        w.line(format!("{}, {} := {}", delegate, err, call))
            .open(format!("if {} != nil {{", err))
            .line(format!("return nil, {}", err))
            .close("}")
            .line(format!("return {}, nil", wrapped));
    } else {
        w.line(format!("{} := {}", delegate, call))
            .line(format!("return {}", wrapped));
    }
    w.close("}");
    Ok(())
}

fn reserve_result_names(signature: &Signature, scope: &mut NameScope) {
    for result in &signature.results {
        if let Some(name) = result.usable_name() {
            scope.reserve(name);
        }
    }
}

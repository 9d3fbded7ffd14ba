//! Mock synthesis
//!
//! An exported interface `T` gets `TMocker` (test handle plus recorded
//! expectations), `TExpectations` with one recorder per method, and `TImpl`
//! implementing `T`. Each call consumes the first unfired expectation whose
//! input is absent or deep-equal to the actual arguments.

use std::collections::{BTreeSet, HashSet};
use std::path::PathBuf;

use tracing::debug;

use crate::config::SynthConfig;
use crate::errors::Result;
use crate::features::compiler::{Consumer, FileInfo, PackageInfo, TypeInfo};
use crate::features::emit::{render_go_file, resolve_imports, CodeWriter, Emitter};
use crate::features::naming::{
    convert_to_unexported, derived_alias, escape_keyword, is_exported, parameter_names,
};
use crate::features::parsing::domain::{ImportSpec, InterfaceType, MethodSpec, Signature, TypeDecl};
use crate::features::value_synth::{SynthMode, ValueSynthesizer};
use crate::shared::constants::output::MOCK_SUBDIR;
use crate::shared::NameScope;

use super::support::{helper_target, local_types};

/// Names every generated function around one interface method shares
#[derive(Debug, Clone)]
struct MethodPlan {
    name: String,
    /// Expectations slice in `TExpectations`
    field: String,
    expectation: String,
    input: String,
    output: String,
    /// Signature qualified for the generated package
    signature: Signature,
    /// Parameter names, also the input record's field names
    params: Vec<String>,
}

impl MethodPlan {
    fn outputs(&self) -> Vec<String> {
        (0..self.signature.results.len())
            .map(|i| format!("out{}", i))
            .collect()
    }

    /// Scope holding the parameter names, for picking receivers and locals
    fn scope(&self) -> NameScope {
        let mut scope = NameScope::new();
        for name in &self.params {
            scope.reserve(name.as_str());
        }
        for result in &self.signature.results {
            if let Some(name) = result.usable_name() {
                scope.reserve(name);
            }
        }
        scope
    }

    /// `func(T1, T2) R`
    fn callback_type(&self) -> String {
        format!("func{}", self.signature.render_unnamed())
    }
}

pub struct MockerObserver<'e> {
    config: &'e SynthConfig,
    emitter: &'e Emitter,
    package: Option<PackageInfo>,
    /// Per-method type names already declared somewhere in the package
    claimed: HashSet<String>,
    imports: Vec<ImportSpec>,
    synth: ValueSynthesizer,
    interfaces: Vec<(String, Vec<MethodSpec>)>,
    written: Vec<PathBuf>,
}

impl<'e> MockerObserver<'e> {
    pub fn new(config: &'e SynthConfig, emitter: &'e Emitter) -> Self {
        Self {
            config,
            emitter,
            package: None,
            claimed: HashSet::new(),
            imports: Vec::new(),
            synth: ValueSynthesizer::new(SynthMode::Zero),
            interfaces: Vec::new(),
            written: Vec::new(),
        }
    }

    fn render(&mut self, package: &PackageInfo) -> Result<String> {
        let alias = derived_alias(&package.name);
        let mut body = CodeWriter::new();
        let mut used = BTreeSet::new();
        let mut any_method = false;
        for (i, (name, methods)) in self.interfaces.iter().enumerate() {
            if i > 0 {
                body.blank();
            }
            for method in methods {
                method.signature.collect_qualifiers(&mut used);
            }
            any_method |= !methods.is_empty();
            render_mocker(&mut body, &alias, name, methods, &mut self.claimed, &mut self.synth)?;
        }

        let mut synthetic = vec![
            ImportSpec::new(None, "testing"),
            ImportSpec::new(Some(alias), package.import_path.clone()),
        ];
        if any_method {
            synthetic.push(ImportSpec::new(None, "reflect"));
        }
        let imports = resolve_imports(&self.imports, &used, &synthetic);
        Ok(render_go_file(&package.name, &imports, &body.finish()))
    }
}

/// Mocker, expectations holder, per-method expectation types and the implementation
pub fn render_mocker(
    w: &mut CodeWriter,
    alias: &str,
    interface: &str,
    methods: &[MethodSpec],
    claimed: &mut HashSet<String>,
    synth: &mut ValueSynthesizer,
) -> Result<()> {
    let plans = plan_methods(interface, methods, alias, claimed)?;
    let mocker = format!("{}Mocker", interface);
    let expectations = format!("{}Expectations", interface);
    let implementation = format!("{}Impl", interface);

    w.open(format!("type {} struct {{", mocker))
        .line("t            *testing.T")
        .line(format!("expectations *{}", expectations))
        .close("}")
        .blank();

    w.open(format!("func Mock{}(t *testing.T) *{} {{", interface, mocker))
        .line(format!(
            "return &{}{{t: t, expectations: &{}{{}}}}",
            mocker, expectations
        ))
        .close("}")
        .blank();

    w.open(format!("func (m *{}) Expect() *{} {{", mocker, expectations))
        .line("return m.expectations")
        .close("}")
        .blank();

    w.open(format!("func (m *{}) Assert() {{", mocker))
        .line("m.t.Helper()");
    for plan in &plans {
        w.open(format!("for n, e := range m.expectations.{} {{", plan.field))
            .open("if !e.fired {")
            .line(format!(
                "m.t.Fatalf(\"{}.{}: expectation %d was never matched\", n)",
                interface, plan.name
            ))
            .close("}")
            .close("}");
    }
    w.close("}").blank();

    w.open(format!("func (m *{}) Impl() {}.{} {{", mocker, alias, interface))
        .line(format!("return &{}{{mocker: m}}", implementation))
        .close("}")
        .blank();

    w.open(format!("type {} struct {{", expectations));
    for plan in &plans {
        w.line(format!("{} []*{}", plan.field, plan.expectation));
    }
    w.close("}");

    for plan in &plans {
        w.blank();
        render_recorder(w, &expectations, plan, synth)?;
    }
    for plan in &plans {
        w.blank();
        render_expectation(w, plan);
    }

    w.blank()
        .open(format!("type {} struct {{", implementation))
        .line(format!("mocker *{}", mocker))
        .close("}");
    for plan in &plans {
        w.blank();
        render_impl_method(w, interface, &implementation, plan);
    }
    Ok(())
}

fn plan_methods(
    interface: &str,
    methods: &[MethodSpec],
    alias: &str,
    claimed: &mut HashSet<String>,
) -> Result<Vec<MethodPlan>> {
    let mut fields = NameScope::new();
    let mut plans = Vec::with_capacity(methods.len());
    for method in methods {
        let base = if claimed.insert(method.name.clone()) {
            method.name.clone()
        } else {
            let prefixed = format!("{}{}", interface, method.name);
            claimed.insert(prefixed.clone());
            prefixed
        };
        let private = convert_to_unexported(&base)?;

        let signature = method.signature.qualify(alias);
        let mut scope = NameScope::new();
        scope.reserve("reflect");
        scope.reserve("testing");
        for result in &signature.results {
            if let Some(name) = result.usable_name() {
                scope.reserve(name);
            }
        }
        let params = parameter_names(&signature, &mut scope)?;

        plans.push(MethodPlan {
            name: method.name.clone(),
            field: fields.fresh(&escape_keyword(&convert_to_unexported(&method.name)?)),
            expectation: format!("{}Expectation", base),
            input: format!("{}Input", private),
            output: format!("{}Output", private),
            signature,
            params,
        });
    }
    Ok(plans)
}

/// `func (x *TExpectations) M() *MExpectation`
fn render_recorder(
    w: &mut CodeWriter,
    expectations: &str,
    plan: &MethodPlan,
    synth: &mut ValueSynthesizer,
) -> Result<()> {
    let mut defaults = Vec::new();
    for (out, result) in plan.outputs().iter().zip(&plan.signature.results) {
        if result.ty.primitive_kind().is_some() {
            let value = synth.synthesize(&result.ty)?;
            defaults.push(format!("{}: {}", out, value.expr));
        }
    }
    let init = if defaults.is_empty() {
        format!("&{}{{}}", plan.expectation)
    } else {
        format!(
            "&{}{{output: {}{{{}}}}}",
            plan.expectation,
            plan.output,
            defaults.join(", ")
        )
    };

    w.open(format!(
        "func (x *{}) {}() *{} {{",
        expectations, plan.name, plan.expectation
    ))
    .line(format!("e := {}", init))
    .line(format!("x.{field} = append(x.{field}, e)", field = plan.field))
    .line("return e")
    .close("}");
    Ok(())
}

/// Input/output records, the expectation type and its fluent setters
fn render_expectation(w: &mut CodeWriter, plan: &MethodPlan) {
    let outputs = plan.outputs();

    w.open(format!("type {} struct {{", plan.input));
    for (name, param) in plan.params.iter().zip(&plan.signature.params) {
        w.line(format!("{} {}", name, param.value_type()));
    }
    w.close("}").blank();

    w.open(format!("type {} struct {{", plan.output));
    for (name, result) in outputs.iter().zip(&plan.signature.results) {
        w.line(format!("{} {}", name, result.ty));
    }
    w.close("}").blank();

    w.open(format!("type {} struct {{", plan.expectation))
        .line(format!("input  *{}", plan.input))
        .line(format!("output {}", plan.output))
        .line(format!("call   {}", plan.callback_type()))
        .line("fired  bool")
        .close("}")
        .blank();

    let mut scope = plan.scope();
    let receiver = scope.fresh("e");
    w.open(format!(
        "func ({} *{}) WithArgs{} *{} {{",
        receiver,
        plan.expectation,
        plan.signature.render_params(&plan.params),
        plan.expectation
    ))
    .line(format!(
        "{}.input = &{}{{{}}}",
        receiver,
        plan.input,
        record_fields(&plan.params)
    ))
    .line(format!("return {}", receiver))
    .close("}")
    .blank();

    let returns: Vec<String> = outputs
        .iter()
        .zip(&plan.signature.results)
        .map(|(name, result)| format!("{} {}", name, result.ty))
        .collect();
    w.open(format!(
        "func (e *{}) Return({}) *{} {{",
        plan.expectation,
        returns.join(", "),
        plan.expectation
    ))
    .line(format!("e.output = {}{{{}}}", plan.output, record_fields(&outputs)))
    .line("return e")
    .close("}")
    .blank();

    w.open(format!(
        "func (e *{}) Call(call {}) *{} {{",
        plan.expectation,
        plan.callback_type(),
        plan.expectation
    ))
    .line("e.call = call")
    .line("return e")
    .close("}");
}

/// Interface method on `TImpl`: first matching unfired expectation wins
fn render_impl_method(w: &mut CodeWriter, interface: &str, implementation: &str, plan: &MethodPlan) {
    let mut scope = plan.scope();
    let receiver = scope.fresh("i");
    let input = scope.fresh("input");
    let e = scope.fresh("e");
    let has_results = !plan.signature.results.is_empty();

    w.open(format!(
        "func ({} *{}) {}{}{} {{",
        receiver,
        implementation,
        plan.name,
        plan.signature.render_params(&plan.params),
        plan.signature.render_results()
    ))
    .line(format!("{}.mocker.t.Helper()", receiver))
    .line(format!(
        "{} := {}{{{}}}",
        input,
        plan.input,
        record_fields(&plan.params)
    ))
    .open(format!(
        "for _, {} := range {}.mocker.expectations.{} {{",
        e, receiver, plan.field
    ))
    .open(format!(
        "if {e}.fired || ({e}.input != nil && !reflect.DeepEqual(*{e}.input, {input})) {{",
        e = e,
        input = input
    ))
    .line("continue")
    .close("}")
    .line(format!("{}.fired = true", e))
    .open(format!("if {}.call != nil {{", e));

    let call = format!("{}.call({})", e, plan.signature.forward_args(&plan.params));
    if has_results {
        w.line(format!("return {}", call));
    } else {
        w.line(call).line("return");
    }
    w.close("}");

    if has_results {
        let outputs: Vec<String> = plan
            .outputs()
            .iter()
            .map(|out| format!("{}.output.{}", e, out))
            .collect();
        w.line(format!("return {}", outputs.join(", ")));
    } else {
        w.line("return");
    }
    w.close("}").line(format!(
        "{}.mocker.t.Fatalf(\"unexpected call to {}.{}: %+v\", {})",
        receiver, interface, plan.name, input
    ));
    if has_results {
        w.line("panic(\"unreachable\")");
    }
    w.close("}");
}

/// `a: a, b: b`
fn record_fields(names: &[String]) -> String {
    names
        .iter()
        .map(|name| format!("{}: {}", name, name))
        .collect::<Vec<String>>()
        .join(", ")
}

impl<'e> Consumer for MockerObserver<'e> {
    fn name(&self) -> &'static str {
        "test_helpers.mocker"
    }

    fn package(&mut self, info: &PackageInfo) -> bool {
        self.claimed.clear();
        self.package = (!info.entry).then(|| info.clone());
        !info.entry
    }

    fn file_pre(&mut self, info: &FileInfo<'_>) -> bool {
        self.imports.clear();
        self.interfaces.clear();
        // Test-only declarations are invisible to the importing helper package
        if info.file.is_test() {
            return false;
        }
        self.synth = ValueSynthesizer::new(SynthMode::Zero)
            .with_qualifier(derived_alias(&info.package.name));
        for (name, kind) in local_types(info.file) {
            self.synth.declare(name, kind);
        }
        true
    }

    fn import(&mut self, _info: &FileInfo<'_>, spec: &ImportSpec) {
        self.imports.push(spec.clone());
    }

    fn interface(&mut self, info: &TypeInfo<'_>, decl: &TypeDecl, shape: &InterfaceType) {
        if !is_exported(info.name) {
            return;
        }
        if decl.is_generic() || !shape.embeds.is_empty() {
            debug!(name = info.name, "Skipping generic or embedding interface");
            return;
        }
        if let Some(method) = shape.methods.iter().find(|m| !is_exported(&m.name)) {
            debug!(interface = info.name, method = %method.name, "Skipping interface with unexported method");
            return;
        }
        self.interfaces
            .push((info.name.to_string(), shape.methods.clone()));
    }

    fn file_post(&mut self, info: &FileInfo<'_>) -> Result<()> {
        let Some(package) = self.package.clone() else {
            return Ok(());
        };
        if self.interfaces.is_empty() {
            return Ok(());
        }
        let source = self.render(&package)?;
        let target = helper_target(self.config, &package, MOCK_SUBDIR, info.file_name());
        let written = self.emitter.emit(&target, &source)?;
        self.written.push(written);
        Ok(())
    }

    fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::parsing::domain::{Param, TypeExpr};
    use pretty_assertions::assert_eq;

    fn lookup_method() -> MethodSpec {
        MethodSpec {
            name: "Lookup".into(),
            signature: Signature::new(
                vec![Param::unnamed(TypeExpr::pointer(TypeExpr::named("Request")))],
                vec![
                    Param::unnamed(TypeExpr::pointer(TypeExpr::named("Response"))),
                    Param::unnamed(TypeExpr::named("error")),
                ],
            ),
        }
    }

    fn render(interface: &str, methods: &[MethodSpec], claimed: &mut HashSet<String>) -> String {
        let mut synth = ValueSynthesizer::new(SynthMode::Zero).with_qualifier("_lookup");
        let mut w = CodeWriter::new();
        render_mocker(&mut w, "_lookup", interface, methods, claimed, &mut synth).unwrap();
        w.finish()
    }

    #[test]
    fn test_lookup_service_mocker() {
        let out = render("Service", &[lookup_method()], &mut HashSet::new());

        for expected in [
            "type ServiceMocker struct {",
            "func MockService(t *testing.T) *ServiceMocker {",
            "func (m *ServiceMocker) Expect() *ServiceExpectations {",
            "func (m *ServiceMocker) Assert() {",
            "func (m *ServiceMocker) Impl() _lookup.Service {",
            "\tlookup []*LookupExpectation\n",
            "type lookupInput struct {\n\trequest *_lookup.Request\n}",
            "type lookupOutput struct {\n\tout0 *_lookup.Response\n\tout1 error\n}",
            "func (e *LookupExpectation) WithArgs(request *_lookup.Request) *LookupExpectation {",
            "func (e *LookupExpectation) Return(out0 *_lookup.Response, out1 error) *LookupExpectation {",
            "func (e *LookupExpectation) Call(call func(*_lookup.Request) (*_lookup.Response, error)) *LookupExpectation {",
            "type ServiceImpl struct {",
        ] {
            assert!(out.contains(expected), "missing {:?} in\n{}", expected, out);
        }
    }

    #[test]
    fn test_recorder_starts_from_zero_outputs() {
        let out = render("Service", &[lookup_method()], &mut HashSet::new());
        assert!(out.contains(
            "func (x *ServiceExpectations) Lookup() *LookupExpectation {\n\
             \te := &LookupExpectation{output: lookupOutput{out1: nil}}\n\
             \tx.lookup = append(x.lookup, e)\n\
             \treturn e\n\
             }\n"
        ));
    }

    #[test]
    fn test_impl_method_body() {
        let out = render("Service", &[lookup_method()], &mut HashSet::new());
        let start = out.find("func (i *ServiceImpl) Lookup").unwrap();
        assert_eq!(
            &out[start..],
            "func (i *ServiceImpl) Lookup(request *_lookup.Request) (*_lookup.Response, error) {\n\
             \ti.mocker.t.Helper()\n\
             \tinput := lookupInput{request: request}\n\
             \tfor _, e := range i.mocker.expectations.lookup {\n\
             \t\tif e.fired || (e.input != nil && !reflect.DeepEqual(*e.input, input)) {\n\
             \t\t\tcontinue\n\
             \t\t}\n\
             \t\te.fired = true\n\
             \t\tif e.call != nil {\n\
             \t\t\treturn e.call(request)\n\
             \t\t}\n\
             \t\treturn e.output.out0, e.output.out1\n\
             \t}\n\
             \ti.mocker.t.Fatalf(\"unexpected call to Service.Lookup: %+v\", input)\n\
             \tpanic(\"unreachable\")\n\
             }\n"
        );
    }

    #[test]
    fn test_void_variadic_method() {
        let notify = MethodSpec {
            name: "Notify".into(),
            signature: Signature::new(
                vec![Param {
                    name: Some("input".into()),
                    ty: TypeExpr::named("string"),
                    variadic: true,
                }],
                vec![],
            ),
        };
        let out = render("Notifier", &[notify], &mut HashSet::new());
        assert!(out.contains("type notifyInput struct {\n\tinput []string\n}"));
        assert!(out.contains("\tinput1 := notifyInput{input: input}\n"));
        assert!(out.contains("\t\t\te.call(input...)\n\t\t\treturn\n"));
        assert!(!out.contains("panic(\"unreachable\")"));
        assert!(out.contains("func (e *NotifyExpectation) Return() *NotifyExpectation {"));
    }

    #[test]
    fn test_colliding_method_names_are_prefixed() {
        let mut claimed = HashSet::new();
        render("Service", &[lookup_method()], &mut claimed);
        let second = render("Cache", &[lookup_method()], &mut claimed);
        assert!(second.contains("type CacheLookupExpectation struct {"));
        assert!(second.contains("type cacheLookupInput struct {"));
        assert!(second.contains("\tlookup []*CacheLookupExpectation\n"));
    }
}

//! Type-directed value synthesis

use std::collections::{BTreeSet, HashMap};

use crate::config::ExampleFactory;
use crate::errors::{Result, SynthError};
use crate::features::parsing::domain::TypeExpr;
use crate::shared::constants::synthesis::EXAMPLE_CARDINALITY;

use super::primitives::{example_call, zero_literal};

/// Which values primitive kinds get
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SynthMode {
    /// Calls into the example-value factory (builders)
    Example,
    /// Literal zeros (mock outputs)
    Zero,
}

/// What the current file declares under a name
#[derive(Debug, Clone, PartialEq)]
pub enum LocalType {
    Struct,
    Interface,
    Func,
    /// Named type over another type expression (`type IDs []string`)
    Other(TypeExpr),
}

/// Preparatory statements plus the value expression
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Synthesized {
    pub prep: Vec<String>,
    pub expr: String,
}

impl Synthesized {
    fn expr(expr: impl Into<String>) -> Self {
        Self {
            prep: Vec::new(),
            expr: expr.into(),
        }
    }
}

/// Stateful synthesizer for one generated file
///
/// Temporaries are numbered per instance; call [`reset_temps`] when a new
/// generated function starts.
///
/// [`reset_temps`]: ValueSynthesizer::reset_temps
#[derive(Debug, Clone)]
pub struct ValueSynthesizer {
    mode: SynthMode,
    cardinality: usize,
    factory: ExampleFactory,
    /// Package alias for same-package types, when emitting into another package
    qualifier: Option<String>,
    locals: HashMap<String, LocalType>,
    next_value: usize,
    next_chan: usize,
    imports: BTreeSet<String>,
    /// Package qualifiers of the types synthesized so far
    qualifiers: BTreeSet<String>,
    /// Local named types being expanded, for cycle detection
    expanding: Vec<String>,
}

impl ValueSynthesizer {
    pub fn new(mode: SynthMode) -> Self {
        Self {
            mode,
            cardinality: EXAMPLE_CARDINALITY,
            factory: ExampleFactory::default(),
            qualifier: None,
            locals: HashMap::new(),
            next_value: 0,
            next_chan: 0,
            imports: BTreeSet::new(),
            qualifiers: BTreeSet::new(),
            expanding: Vec::new(),
        }
    }

    pub fn with_cardinality(mut self, cardinality: usize) -> Self {
        self.cardinality = cardinality.max(1);
        self
    }

    pub fn with_factory(mut self, factory: ExampleFactory) -> Self {
        self.factory = factory;
        self
    }

    pub fn with_qualifier(mut self, alias: impl Into<String>) -> Self {
        self.qualifier = Some(alias.into());
        self
    }

    /// Record a type declared in the current file
    pub fn declare(&mut self, name: impl Into<String>, kind: LocalType) {
        self.locals.insert(name.into(), kind);
    }

    pub fn reset_temps(&mut self) {
        self.next_value = 0;
        self.next_chan = 0;
    }

    /// Import paths the synthesized expressions rely on
    pub fn required_imports(&self) -> impl Iterator<Item = &str> {
        self.imports.iter().map(String::as_str)
    }

    /// Qualifiers of the original imports the synthesized values refer to
    pub fn used_qualifiers(&self) -> &BTreeSet<String> {
        &self.qualifiers
    }

    /// Type as written in the generated package
    pub fn render_type(&self, ty: &TypeExpr) -> String {
        match &self.qualifier {
            Some(alias) => ty.qualify(alias).to_string(),
            None => ty.to_string(),
        }
    }

    /// Synthesize a value of `ty`
    pub fn synthesize(&mut self, ty: &TypeExpr) -> Result<Synthesized> {
        ty.collect_qualifiers(&mut self.qualifiers);
        if let Some(kind) = ty.primitive_kind() {
            return self.primitive(kind);
        }
        match ty {
            TypeExpr::Pointer(inner) => self.pointer(inner),
            TypeExpr::Slice(elem) => {
                let elems = self.elements(elem, self.cardinality)?;
                Ok(self.composite(ty, elems))
            }
            TypeExpr::Array { len, elem } => {
                let count = match len.trim() {
                    "..." => self.cardinality,
                    n => n.parse::<usize>().map(|n| n.min(self.cardinality)).unwrap_or(0),
                };
                let elems = self.elements(elem, count)?;
                Ok(self.composite(ty, elems))
            }
            TypeExpr::Map { key, value } => self.map(ty, key, value),
            TypeExpr::Chan { elem, .. } => self.channel(elem),
            TypeExpr::Named { package, name, .. } => match package {
                Some(_) => Ok(Synthesized::expr(format!("{}{{}}", self.render_type(ty)))),
                None => self.local(ty, name),
            },
            TypeExpr::Func(_) => Err(SynthError::unsupported(format!("function type {}", ty))),
            TypeExpr::Interface(_) => {
                Err(SynthError::unsupported(format!("interface literal {}", ty)))
            }
            TypeExpr::Struct(_) => Err(SynthError::unsupported(format!("struct literal {}", ty))),
            TypeExpr::Other(raw) => Err(SynthError::unsupported(raw.clone())),
        }
    }

    fn primitive(&mut self, kind: &str) -> Result<Synthesized> {
        let expr = match self.mode {
            SynthMode::Zero => zero_literal(kind).map(str::to_string),
            SynthMode::Example => {
                let call = example_call(kind, &self.factory.package);
                if call.is_some() {
                    self.imports.insert(self.factory.import_path.clone());
                    if kind == "error" {
                        self.imports.insert("errors".to_string());
                    }
                }
                call
            }
        };
        expr.map(Synthesized::expr)
            .ok_or_else(|| SynthError::unsupported(kind))
    }

    fn pointer(&mut self, inner: &TypeExpr) -> Result<Synthesized> {
        let value = self.synthesize(inner)?;
        let temp = format!("v{}", self.next_value);
        self.next_value += 1;

        let mut prep = value.prep;
        if self.mode == SynthMode::Zero && inner.primitive_kind().is_some() {
            // An untyped zero literal would give the temporary the wrong type
            prep.push(format!("var {} {}", temp, self.render_type(inner)));
        } else {
            prep.push(format!("{} := {}", temp, value.expr));
        }
        Ok(Synthesized {
            prep,
            expr: format!("&{}", temp),
        })
    }

    fn elements(&mut self, elem: &TypeExpr, count: usize) -> Result<Vec<Synthesized>> {
        (0..count).map(|_| self.synthesize(elem)).collect()
    }

    fn composite(&self, ty: &TypeExpr, elems: Vec<Synthesized>) -> Synthesized {
        let mut prep = Vec::new();
        let mut exprs = Vec::with_capacity(elems.len());
        for elem in elems {
            prep.extend(elem.prep);
            exprs.push(elem.expr);
        }
        Synthesized {
            prep,
            expr: format!("{}{{{}}}", self.render_type(ty), exprs.join(", ")),
        }
    }

    fn map(&mut self, ty: &TypeExpr, key: &TypeExpr, value: &TypeExpr) -> Result<Synthesized> {
        // Repeated constant keys do not compile
        let pairs = match self.mode {
            SynthMode::Zero => 1,
            SynthMode::Example => self.cardinality,
        };
        let mut prep = Vec::new();
        let mut entries = Vec::with_capacity(pairs);
        for _ in 0..pairs {
            let k = self.synthesize(key)?;
            let v = self.synthesize(value)?;
            prep.extend(k.prep);
            prep.extend(v.prep);
            entries.push(format!("{}: {}", k.expr, v.expr));
        }
        Ok(Synthesized {
            prep,
            expr: format!("{}{{{}}}", self.render_type(ty), entries.join(", ")),
        })
    }

    fn channel(&mut self, elem: &TypeExpr) -> Result<Synthesized> {
        let values = self.elements(elem, self.cardinality)?;
        let temp = format!("c{}", self.next_chan);
        self.next_chan += 1;

        let mut prep = Vec::new();
        let mut sends = Vec::with_capacity(values.len());
        for value in values {
            prep.extend(value.prep);
            sends.push(format!("{} <- {}", temp, value.expr));
        }
        prep.push(format!(
            "{} := make(chan {}, {})",
            temp,
            self.render_type(elem),
            self.cardinality
        ));
        prep.extend(sends);
        Ok(Synthesized { prep, expr: temp })
    }

    fn local(&mut self, ty: &TypeExpr, name: &str) -> Result<Synthesized> {
        match self.locals.get(name).cloned() {
            Some(LocalType::Interface) => {
                Err(SynthError::unsupported(format!("interface {}", name)))
            }
            Some(LocalType::Func) => Err(SynthError::unsupported(format!("function type {}", name))),
            Some(LocalType::Other(underlying)) => {
                if self.expanding.iter().any(|n| n == name) {
                    return Err(SynthError::unsupported(format!("recursive type {}", name)));
                }
                self.expanding.push(name.to_string());
                let value = self.synthesize(&underlying);
                self.expanding.pop();
                let value = value?;
                Ok(Synthesized {
                    prep: value.prep,
                    expr: format!("{}({})", self.render_type(ty), value.expr),
                })
            }
            Some(LocalType::Struct) | None => match name {
                "any" | "comparable" => Err(SynthError::unsupported(name)),
                _ => Ok(Synthesized::expr(format!("{}{{}}", self.render_type(ty)))),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::parsing::domain::ChanDir;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use std::collections::HashSet;

    fn named(name: &str) -> TypeExpr {
        TypeExpr::named(name)
    }

    #[test]
    fn test_example_primitives_record_imports() {
        let mut synth = ValueSynthesizer::new(SynthMode::Example);
        assert_eq!(synth.synthesize(&named("string")).unwrap().expr, "gofakeit.Word()");
        assert_eq!(
            synth.synthesize(&named("error")).unwrap().expr,
            "errors.New(gofakeit.Word())"
        );
        let imports: Vec<&str> = synth.required_imports().collect();
        assert_eq!(imports, vec!["errors", "github.com/brianvoe/gofakeit/v6"]);
    }

    #[test]
    fn test_zero_primitives() {
        let mut synth = ValueSynthesizer::new(SynthMode::Zero);
        assert_eq!(synth.synthesize(&named("bool")).unwrap().expr, "false");
        assert_eq!(synth.synthesize(&named("error")).unwrap().expr, "nil");
        assert_eq!(synth.required_imports().count(), 0);
    }

    #[test]
    fn test_pointer_uses_temporary() {
        let mut synth = ValueSynthesizer::new(SynthMode::Example).with_qualifier("_lookup");
        let value = synth
            .synthesize(&TypeExpr::pointer(named("Request")))
            .unwrap();
        assert_eq!(value.prep, vec!["v0 := _lookup.Request{}"]);
        assert_eq!(value.expr, "&v0");

        let next = synth.synthesize(&TypeExpr::pointer(named("int64"))).unwrap();
        assert_eq!(next.prep, vec!["v1 := gofakeit.Int64()"]);

        synth.reset_temps();
        let again = synth.synthesize(&TypeExpr::pointer(named("string"))).unwrap();
        assert_eq!(again.expr, "&v0");
    }

    #[test]
    fn test_zero_pointer_to_primitive_is_typed() {
        let mut synth = ValueSynthesizer::new(SynthMode::Zero);
        let value = synth.synthesize(&TypeExpr::pointer(named("int64"))).unwrap();
        assert_eq!(value.prep, vec!["var v0 int64"]);
        assert_eq!(value.expr, "&v0");
    }

    #[test]
    fn test_collections_use_cardinality() {
        let mut synth = ValueSynthesizer::new(SynthMode::Example);
        let slice = synth.synthesize(&TypeExpr::slice(named("bool"))).unwrap();
        assert_eq!(slice.expr, "[]bool{gofakeit.Bool(), gofakeit.Bool()}");

        let mut synth = ValueSynthesizer::new(SynthMode::Zero).with_cardinality(3);
        let array = synth
            .synthesize(&TypeExpr::Array {
                len: "4".into(),
                elem: Box::new(named("int")),
            })
            .unwrap();
        assert_eq!(array.expr, "[4]int{0, 0, 0}");
    }

    #[test]
    fn test_array_edge_lengths() {
        let mut synth = ValueSynthesizer::new(SynthMode::Zero);
        let empty = TypeExpr::Array {
            len: "0".into(),
            elem: Box::new(named("string")),
        };
        assert_eq!(synth.synthesize(&empty).unwrap().expr, "[0]string{}");

        let short = TypeExpr::Array {
            len: "1".into(),
            elem: Box::new(named("string")),
        };
        assert_eq!(synth.synthesize(&short).unwrap().expr, "[1]string{\"\"}");

        let symbolic = TypeExpr::Array {
            len: "Size".into(),
            elem: Box::new(named("string")),
        };
        assert_eq!(synth.synthesize(&symbolic).unwrap().expr, "[Size]string{}");
    }

    #[test]
    fn test_map_pairs_by_mode() {
        let map = TypeExpr::Map {
            key: Box::new(named("string")),
            value: Box::new(named("int")),
        };
        let mut zero = ValueSynthesizer::new(SynthMode::Zero);
        assert_eq!(zero.synthesize(&map).unwrap().expr, "map[string]int{\"\": 0}");

        let mut example = ValueSynthesizer::new(SynthMode::Example);
        assert_eq!(
            example.synthesize(&map).unwrap().expr,
            "map[string]int{gofakeit.Word(): int(gofakeit.Int64()), gofakeit.Word(): int(gofakeit.Int64())}"
        );
    }

    #[test]
    fn test_channel_statements() {
        let mut synth = ValueSynthesizer::new(SynthMode::Example);
        let chan = TypeExpr::Chan {
            dir: ChanDir::Recv,
            elem: Box::new(named("string")),
        };
        let value = synth.synthesize(&chan).unwrap();
        assert_eq!(
            value.prep,
            vec![
                "c0 := make(chan string, 2)",
                "c0 <- gofakeit.Word()",
                "c0 <- gofakeit.Word()",
            ]
        );
        assert_eq!(value.expr, "c0");
    }

    #[test]
    fn test_nested_pointer_prep_order() {
        let mut synth = ValueSynthesizer::new(SynthMode::Example);
        let ty = TypeExpr::slice(TypeExpr::pointer(named("string")));
        let value = synth.synthesize(&ty).unwrap();
        assert_eq!(value.prep, vec!["v0 := gofakeit.Word()", "v1 := gofakeit.Word()"]);
        assert_eq!(value.expr, "[]*string{&v0, &v1}");
    }

    #[test]
    fn test_local_named_types() {
        let mut synth = ValueSynthesizer::new(SynthMode::Example).with_qualifier("_lookup");
        synth.declare("Status", LocalType::Other(named("int32")));
        synth.declare("Service", LocalType::Interface);
        synth.declare("Handler", LocalType::Func);

        assert_eq!(
            synth.synthesize(&named("Status")).unwrap().expr,
            "_lookup.Status(gofakeit.Int32())"
        );
        assert_eq!(
            synth
                .synthesize(&TypeExpr::qualified("time", "Time"))
                .unwrap()
                .expr,
            "time.Time{}"
        );
        assert!(synth.used_qualifiers().contains("time"));
        assert!(matches!(
            synth.synthesize(&named("Service")),
            Err(SynthError::UnsupportedType(_))
        ));
        assert!(synth.synthesize(&named("Handler")).is_err());
    }

    #[test]
    fn test_unsupported_kinds() {
        let mut synth = ValueSynthesizer::new(SynthMode::Example);
        for ty in [
            named("any"),
            named("comparable"),
            TypeExpr::Interface("interface{}".into()),
            TypeExpr::Struct("struct{}".into()),
            TypeExpr::Func(Box::default()),
        ] {
            let err = synth.synthesize(&ty).unwrap_err();
            assert!(err.is_programming_error(), "{} should be unsupported", ty);
        }
    }

    #[test]
    fn test_recursive_local_type_is_rejected() {
        let mut synth = ValueSynthesizer::new(SynthMode::Example);
        synth.declare("Tree", LocalType::Other(TypeExpr::Array {
            len: "2".into(),
            elem: Box::new(named("Tree")),
        }));
        assert!(synth.synthesize(&named("Tree")).is_err());
    }

    fn nested_type() -> impl Strategy<Value = TypeExpr> {
        let leaf = prop::sample::select(vec!["string", "int", "bool", "float64", "rune"])
            .prop_map(named);
        leaf.prop_recursive(4, 16, 2, |inner| {
            prop_oneof![
                inner.clone().prop_map(TypeExpr::pointer),
                inner.clone().prop_map(TypeExpr::slice),
                inner.clone().prop_map(|elem| TypeExpr::Chan {
                    dir: ChanDir::Both,
                    elem: Box::new(elem),
                }),
                inner.prop_map(|value| TypeExpr::Map {
                    key: Box::new(named("string")),
                    value: Box::new(value),
                }),
            ]
        })
    }

    proptest! {
        #[test]
        fn test_temporaries_never_repeat(types in prop::collection::vec(nested_type(), 1..4)) {
            let mut synth = ValueSynthesizer::new(SynthMode::Example);
            let mut seen = HashSet::new();
            for ty in &types {
                let value = synth.synthesize(ty).unwrap();
                for line in &value.prep {
                    if let Some((temp, _)) = line.split_once(" := ") {
                        prop_assert!(seen.insert(temp.to_string()), "{} declared twice", temp);
                    }
                }
            }
        }

        #[test]
        fn test_zero_mode_needs_no_imports(ty in nested_type()) {
            let mut synth = ValueSynthesizer::new(SynthMode::Zero);
            synth.synthesize(&ty).unwrap();
            prop_assert_eq!(synth.required_imports().count(), 0);
        }
    }
}
